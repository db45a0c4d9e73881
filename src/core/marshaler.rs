//! Marshalers turn a [`LogMessage`] into bytes for a sink
//!
//! - Text: `2025-01-08 10:30:45.123 [INFO ] [db] pool.rs:42 connection opened`
//! - Json: `{"level":"INFO","group":"db","time":"...","file":"pool.rs","line":42,"message":"..."}`
//! - Color: text wrapped in the level's ANSI color
//!
//! Every marshaler terminates its output with a newline. Only the base name
//! of the source file is rendered.

use super::color;
use super::error::Result;
use super::log_level::LogLevel;
use super::log_message::LogMessage;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// User-supplied marshaling function
pub type MarshalFn = Arc<dyn Fn(&LogMessage) -> Result<Vec<u8>> + Send + Sync>;

#[derive(Clone, Default)]
pub enum Marshaler {
    /// Human-readable single line (default)
    #[default]
    Text,

    /// One JSON object per line
    Json,

    /// Text wrapped in ANSI colors when colors are enabled process-wide
    Color,

    /// Caller-provided function
    Custom(MarshalFn),
}

impl Marshaler {
    /// Build a custom marshaler from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&LogMessage) -> Result<Vec<u8>> + Send + Sync + 'static,
    {
        Marshaler::Custom(Arc::new(f))
    }

    pub fn marshal(&self, msg: &LogMessage, timestamp_format: &TimestampFormat) -> Result<Vec<u8>> {
        match self {
            Marshaler::Text => Ok(marshal_text(msg, timestamp_format)),
            Marshaler::Json => marshal_json(msg),
            Marshaler::Color => Ok(marshal_color(
                msg,
                timestamp_format,
                color::colors_enabled(),
            )),
            Marshaler::Custom(f) => f(msg),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Marshaler::Text => "text",
            Marshaler::Json => "json",
            Marshaler::Color => "color",
            Marshaler::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Marshaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Marshaler").field(&self.name()).finish()
    }
}

/// `TIMESTAMP [LEVEL] [group] file:line message`, group and location
/// omitted when empty
pub fn marshal_text(msg: &LogMessage, timestamp_format: &TimestampFormat) -> Vec<u8> {
    let mut line = format!(
        "{} [{:<5}]",
        timestamp_format.format(&msg.timestamp),
        msg.level
    );
    if !msg.group.is_empty() {
        line.push_str(" [");
        line.push_str(&msg.group);
        line.push(']');
    }
    if !msg.file.is_empty() {
        line.push_str(&format!(" {}:{}", msg.file_base_name(), msg.line));
    }
    line.push(' ');
    line.push_str(&msg.message);
    line.push('\n');
    line.into_bytes()
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    level: LogLevel,
    group: &'a str,
    time: &'a DateTime<FixedOffset>,
    file: &'a str,
    line: u32,
    message: &'a str,
}

pub fn marshal_json(msg: &LogMessage) -> Result<Vec<u8>> {
    let record = JsonRecord {
        level: msg.level,
        group: &msg.group,
        time: &msg.timestamp,
        file: msg.file_base_name(),
        line: msg.line,
        message: &msg.message,
    };
    let mut out = serde_json::to_vec(&record)?;
    out.push(b'\n');
    Ok(out)
}

pub fn marshal_color(
    msg: &LogMessage,
    timestamp_format: &TimestampFormat,
    use_colors: bool,
) -> Vec<u8> {
    let text = marshal_text(msg, timestamp_format);
    if use_colors {
        color::paint(msg.level, &text)
    } else {
        text
    }
}
