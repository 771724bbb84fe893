use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum DocumentError {
    /// File could not be read or written.
    Io { path: PathBuf, message: String },
    /// File was read but is not a valid journal document.
    Malformed { path: PathBuf, message: String },
}

impl DocumentError {
    pub(crate) fn io(path: &Path, err: impl fmt::Display) -> Self {
        Self::Io { path: path.to_path_buf(), message: err.to_string() }
    }

    pub(crate) fn malformed(path: &Path, err: impl fmt::Display) -> Self {
        Self::Malformed { path: path.to_path_buf(), message: err.to_string() }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Malformed { path, message } => {
                write!(f, "{}: not a valid journal document: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for DocumentError {}
