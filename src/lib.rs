//! # Rust Frame Logger
//!
//! Leveled logging around a compact binary message frame.
//!
//! ## Features
//!
//! - **Binary frames**: every message has a fixed big-endian wire encoding
//!   that plain byte sinks receive as-is
//! - **Marshalers**: text, JSON and ANSI color renderings of a message
//! - **Writers**: single destination, fan-out to many, and color terminal
//! - **Repeat muting**: consecutive identical messages from one call site are
//!   suppressed after a threshold
//! - **Async dispatch**: optional background thread that keeps call order
//!
//! ## Example
//!
//! ```
//! use rust_frame_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .output(FanOutWriter::new([
//!         Sink::from(Writer::text(Vec::new())),
//!         Sink::from(Writer::json(Vec::new())),
//!     ]))
//!     .level(LogLevel::Info)
//!     .caller(true)
//!     .build();
//!
//! logger.info("ready");
//! rust_frame_logger::warn!(logger, group = "db"; "slow query: {}ms", 250);
//! ```

pub mod core;
pub mod macros;
pub mod writers;

#[cfg(test)]
mod test_utils;

pub mod prelude {
    pub use crate::core::{
        GroupLogger, LogLevel, LogMessage, LogWriter, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, Marshaler, Result, TimestampFormat, DEFAULT_MUTE,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::writers::{ColorWriter, FanOutWriter, Sink, Writer};
}

pub use crate::core::{
    codec, color, GroupLogger, LogLevel, LogMessage, LogWriter, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, MarshalFn, Marshaler, Result, TimestampFormat, DEFAULT_MUTE,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::writers::{ColorWriter, FanOutWriter, Sink, Writer};
