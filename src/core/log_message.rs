//! Log message structure

use super::log_level::LogLevel;
use super::timestamp;
use chrono::{DateTime, FixedOffset};
use std::panic::Location;
use std::path::Path;

/// File name used when caller capture is on but no location is available
pub const UNKNOWN_FILE: &str = "???";

/// One log event.
///
/// Empty `group` and `file` mean "not set", which is also how they travel in
/// a frame. `line` is carried as 16 bits on the wire; larger values are
/// truncated when encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: LogLevel,
    pub group: String,
    pub timestamp: DateTime<FixedOffset>,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl LogMessage {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            group: String::new(),
            timestamp: timestamp::now(),
            file: String::new(),
            line: 0,
            message: message.into(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    /// Use the location recorded by `#[track_caller]`, or the `???`/0
    /// placeholder when there is none
    pub fn with_caller(self, location: Option<&Location<'_>>) -> Self {
        match location {
            Some(loc) => self.with_location(loc.file(), loc.line()),
            None => self.with_location(UNKNOWN_FILE, 0),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Last path component of `file`, empty when no file is set
    pub fn file_base_name(&self) -> &str {
        base_name(&self.file)
    }

    /// Repeat detection key: file, line and text, ignoring level and group
    pub(crate) fn same_origin(&self, other: &LogMessage) -> bool {
        self.file == other.file && self.line == other.line && self.message == other.message
    }
}

impl Default for LogMessage {
    fn default() -> Self {
        Self {
            level: LogLevel::Error,
            group: String::new(),
            timestamp: timestamp::zero_time(),
            file: String::new(),
            line: 0,
            message: String::new(),
        }
    }
}

fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return path;
    }
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
