//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error, including short reads while decoding a frame
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Frame carries a format version this crate does not understand
    #[error("Unsupported frame version: {found}")]
    UnsupportedVersion { found: u8 },

    /// Level byte outside the known range
    #[error("Invalid log level on the wire: {0}")]
    InvalidLevel(u8),

    /// Timestamp bytes could not be turned into a point in time
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Text field of a frame is not valid UTF-8
    #[error("Frame field '{field}' is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    /// Field does not fit in its length prefix
    #[error("Field '{field}' is too long to encode: {len} bytes (max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Buffer holds more bytes than one frame
    #[error("{0} trailing bytes after frame")]
    TrailingBytes(usize),

    /// Async dispatcher is gone
    #[error("Failed to send log message to async worker")]
    ChannelSendError,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a field-too-long error
    pub fn field_too_long(field: &'static str, len: usize, max: usize) -> Self {
        LoggerError::FieldTooLong { field, len, max }
    }

    /// Create an invalid timestamp error
    pub fn invalid_timestamp<S: Into<String>>(msg: S) -> Self {
        LoggerError::InvalidTimestamp(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error comes from a frame that ended early
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            LoggerError::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof
        )
    }
}

impl From<LoggerError> for std::io::Error {
    fn from(err: LoggerError) -> Self {
        match err {
            LoggerError::IoError(e) => e,
            other => std::io::Error::other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::field_too_long("group", 300, 255);
        assert!(matches!(err, LoggerError::FieldTooLong { .. }));

        let err = LoggerError::other("sink closed");
        assert_eq!(err.to_string(), "sink closed");

        let err = LoggerError::invalid_timestamp("bad offset");
        assert!(matches!(err, LoggerError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::field_too_long("group", 300, 255);
        assert_eq!(
            err.to_string(),
            "Field 'group' is too long to encode: 300 bytes (max 255)"
        );

        let err = LoggerError::UnsupportedVersion { found: 7 };
        assert_eq!(err.to_string(), "Unsupported frame version: 7");

        let err = LoggerError::InvalidUtf8 { field: "message" };
        assert_eq!(err.to_string(), "Frame field 'message' is not valid UTF-8");
    }

    #[test]
    fn test_is_truncated() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short");
        assert!(LoggerError::from(eof).is_truncated());

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!LoggerError::from(denied).is_truncated());
        assert!(!LoggerError::TrailingBytes(3).is_truncated());
    }

    #[test]
    fn test_into_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let back: std::io::Error = LoggerError::from(io_err).into();
        assert_eq!(back.kind(), std::io::ErrorKind::BrokenPipe);

        let back: std::io::Error = LoggerError::InvalidLevel(9).into();
        assert_eq!(back.kind(), std::io::ErrorKind::Other);
        assert!(back.to_string().contains("Invalid log level"));
    }
}
