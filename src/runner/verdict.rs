use colored::Colorize;

/// Outcome of one sample run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed { expected: Vec<u8>, actual: Vec<u8> },
}

impl Verdict {
    /// Output must match byte for byte, whitespace included
    pub fn judge(expected: Vec<u8>, actual: Vec<u8>) -> Verdict {
        if expected == actual {
            Verdict::Passed
        } else {
            Verdict::Failed { expected, actual }
        }
    }

    #[inline]
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    pub fn print(&self) {
        match self {
            Verdict::Passed => println!("{}", "PASSED".green()),
            Verdict::Failed { expected, actual } => {
                println!("{}", "FAILED".red());
                println!("{}", "Correct:".truecolor(152, 152, 152));
                println!("{}", String::from_utf8_lossy(expected));
                println!("{}", "Your Output:".truecolor(152, 152, 152));
                println!("{}", String::from_utf8_lossy(actual));
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    verdicts: Vec<Verdict>,
}

impl Report {
    pub fn push(&mut self, verdict: Verdict) {
        self.verdicts.push(verdict);
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    pub fn passed(&self) -> usize {
        self.verdicts.iter().filter(|v| v.passed()).count()
    }

    /// True only if something ran and nothing failed
    pub fn all_passed(&self) -> bool {
        self.total() > 0 && self.passed() == self.total()
    }

    pub fn print_summary(&self) {
        let summary = format!("{}/{} tests passed", self.passed(), self.total());
        if self.passed() == self.total() {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.red());
        }
    }
}
