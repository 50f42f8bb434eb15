use std::{
    error,
    fmt::{self, Display, Formatter},
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

/// Every way an `ru` operation can fail
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// I/O failure on a specific file or directory
    Path(PathBuf, io::Error),
    Json(serde_json::Error),
    /// A problem without a name has no initial to name its directory after
    EmptyProblemName,
    NotAProblemDirectory(PathBuf),
    MissingHome,
    EmptyCompileCommand,
    /// The stored command could not be split into program and arguments
    InvalidCompileCommand(String),
    CompileFailed(ExitStatus),
    RunFailed { test: usize, status: ExitStatus },
    NoClipboard,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{}", e),
            Error::Path(path, e) => write!(f, "{}: {}", path.display(), e),
            Error::Json(e) => write!(f, "invalid problem payload: {}", e),
            Error::EmptyProblemName => write!(f, "error: problem has an empty name"),
            Error::NotAProblemDirectory(dir) => write!(
                f,
                "error: you are not in a problem directory ({})",
                dir.display()
            ),
            Error::MissingHome => write!(f, "error: HOME is not set"),
            Error::EmptyCompileCommand => {
                write!(f, "error: compile command is empty, run `ru config` first")
            }
            Error::InvalidCompileCommand(cmd) => {
                write!(f, "error: could not parse compile command \"{}\"", cmd)
            }
            Error::CompileFailed(status) => write!(f, "compilation failed: {}", status),
            Error::RunFailed { test, status } => {
                write!(f, "test {} did not exit cleanly: {}", test, status)
            }
            Error::NoClipboard => write!(f, "error: no clipboard utility found"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Path(_, e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl Error {
    /// Wraps an I/O error with the path it happened on
    pub fn at(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
        move |e| Error::Path(path.to_path_buf(), e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}
