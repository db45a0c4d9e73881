//! Core logger types and traits

pub mod codec;
pub mod color;
pub mod error;
pub mod log_level;
pub mod log_message;
pub mod log_writer;
pub mod logger;
pub mod marshaler;
pub mod metrics;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use log_message::LogMessage;
pub use log_writer::LogWriter;
pub use logger::{GroupLogger, Logger, LoggerBuilder, DEFAULT_MUTE, DEFAULT_SHUTDOWN_TIMEOUT};
pub use marshaler::{MarshalFn, Marshaler};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
