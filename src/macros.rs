//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. A leading
//! `group = expr;` tags the message with a group. The caller location is the
//! macro invocation site.
//!
//! # Examples
//!
//! ```
//! use rust_frame_logger::prelude::*;
//! use rust_frame_logger::info;
//!
//! let logger = Logger::new(Writer::text(Vec::new()), true);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Grouped
//! info!(logger, group = "http"; "GET {} -> {}", "/health", 200);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_frame_logger::prelude::*;
/// # let logger = Logger::new(Writer::text(Vec::new()), false);
/// use rust_frame_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, group = "db"; "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, group = $group:expr; $($arg:tt)+) => {
        $logger.log($level, $group, format!($($arg)+))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, "", format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_frame_logger::prelude::*;
/// # let logger = Logger::new(Writer::text(Vec::new()), false);
/// use rust_frame_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, group = $group:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, group = $group; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_frame_logger::prelude::*;
/// # let logger = Logger::new(Writer::text(Vec::new()), false);
/// use rust_frame_logger::info;
/// info!(logger, "Application started");
/// info!(logger, group = "auth"; "Users logged in: {}", 42);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, group = $group:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, group = $group; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_frame_logger::prelude::*;
/// # let logger = Logger::new(Writer::text(Vec::new()), false);
/// use rust_frame_logger::warn;
/// warn!(logger, "Low memory");
/// warn!(logger, "Retry attempt {} of {}", 2, 3);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, group = $group:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, group = $group; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_frame_logger::prelude::*;
/// # let logger = Logger::new(Writer::text(Vec::new()), false);
/// use rust_frame_logger::error;
/// error!(logger, "Connection failed");
/// error!(logger, group = "db"; "Query failed with code: {}", 1064);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, group = $group:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, group = $group; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
