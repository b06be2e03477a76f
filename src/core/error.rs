//! Error types for the photo copier
//!
//! Namespace errors are recovered while identifying devices. Everything else
//! aborts the run.

use thiserror::Error;

/// Main error type for the photo copier
#[derive(Error, Debug)]
pub enum PhotoCopyError {
    /// Shell namespace session could not be initialized
    #[error("Shell session initialization failed: {0}")]
    SessionError(String),

    /// Binding, enumerating or naming an entry in the shell namespace failed
    #[error("Shell namespace error: {0}")]
    NamespaceError(String),

    /// The desktop has no "this computer" folder
    #[error("Could not find the computer folder on the desktop (looked for: {0})")]
    ComputerFolderNotFound(String),

    /// General I/O error
    #[error("IO error: {0}")]
    IoError(String),

    /// Copying a photo to the target directory failed
    #[error("Write failed for '{filename}': {message}")]
    WriteError { filename: String, message: String },

    /// The shell namespace only exists on Windows
    #[error("The shell namespace is only available on Windows")]
    UnsupportedPlatform,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PhotoCopyError>;

impl From<std::io::Error> for PhotoCopyError {
    fn from(err: std::io::Error) -> Self {
        PhotoCopyError::IoError(err.to_string())
    }
}
