// Error taxonomy shared by the filesystem, data channel and transfer layers
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtpError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("No pending rename source")]
    NoRenameSource,

    #[error("Data channel failure: {0}")]
    DataChannel(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FtpError {
    /// Classifies an I/O error raised while operating on `path`.
    pub fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FtpError::NotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => FtpError::PermissionDenied(path.to_string()),
            io::ErrorKind::AlreadyExists => FtpError::AlreadyExists(path.to_string()),
            io::ErrorKind::TimedOut => FtpError::Timeout(path.to_string()),
            _ => FtpError::Io(err),
        }
    }

    /// Wire reply for this failure. Clients only ever see the generic code.
    pub fn to_ftp_response(&self) -> &'static str {
        match self {
            FtpError::MalformedInput(_) => "504 Fail\r\n",
            _ => "550 Fail\r\n",
        }
    }
}
