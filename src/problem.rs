use serde_derive::Deserialize;

use crate::error::{Error, Result};

pub mod writer;

/// A single sample test as the browser extension sends it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Test {
    /// stdin fed to the solution
    pub(crate) input: String,

    /// the output the solution is expected to print
    pub(crate) output: String,
}

/// Groups problems sent together when a whole contest is parsed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Batch {
    pub(crate) id: String,
    pub(crate) size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub(crate) name: String,

    /// Sample tests, their order decides the file numbering
    pub(crate) tests: Vec<Test>,

    // Extra metadata the extension attaches, only used for logging
    #[serde(default)]
    pub(crate) group: Option<String>,
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) time_limit: Option<u64>,
    #[serde(default)]
    pub(crate) memory_limit: Option<u64>,

    #[serde(default)]
    pub(crate) batch: Option<Batch>,
}

impl Problem {
    pub fn from_slice(data: &[u8]) -> Result<Problem> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Letter identifying the problem inside its contest, like A, B, C in Codeforces
    pub fn initial(&self) -> Result<char> {
        self.name.chars().next().ok_or(Error::EmptyProblemName)
    }

    /// Number of problems that make up the parse this problem belongs to
    #[inline]
    pub fn expected_problems(&self) -> usize {
        self.batch.as_ref().map_or(1, |batch| batch.size.max(1))
    }
}
