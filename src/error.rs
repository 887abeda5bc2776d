//! Error types for wavflac

use thiserror::Error;

/// Result type alias for wavflac operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wavflac
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed container data
    #[error("Format error: {0}")]
    Format(String),

    /// The `data` tag was not found inside the scanned file prefix
    #[error("payload marker not found in scanned prefix")]
    PayloadNotFound,

    /// Unsupported feature
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The compression engine rejected its configuration
    #[error("Engine initialization error: {0}")]
    EngineInit(String),

    /// A seek callback was supplied without a matching tell callback
    #[error("seek callback supplied without a tell callback")]
    InconsistentCallbacks,

    /// Encode error
    #[error("Encode error: {0}")]
    Encode(String),

    /// Finalization error
    #[error("Finalize error: {0}")]
    Finalize(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl Error {
    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an unsupported feature error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Create an engine initialization error
    pub fn engine_init<S: Into<String>>(msg: S) -> Self {
        Error::EngineInit(msg.into())
    }

    /// Create an encode error
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Error::Encode(msg.into())
    }

    /// Create a finalization error
    pub fn finalize<S: Into<String>>(msg: S) -> Self {
        Error::Finalize(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Error::InvalidState(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unsupported("24-bit PCM");
        assert_eq!(err.to_string(), "Unsupported: 24-bit PCM");

        let err = Error::InconsistentCallbacks;
        assert!(err.to_string().contains("tell"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
