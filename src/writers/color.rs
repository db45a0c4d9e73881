//! Color writer: text output wrapped in per-level ANSI colors

use crate::core::{codec, color, marshaler, LogMessage, LogWriter, Result, TimestampFormat};
use std::io::{self, Stdout, Write};

/// Text writer that colors each line by level.
///
/// Error is bold red, Warn bold yellow, Info bold cyan and Debug unstyled.
/// Unless pinned with [`ColorWriter::with_colors`], every write consults the
/// process-wide switch in [`crate::core::color`].
pub struct ColorWriter<W: Write> {
    sink: W,
    use_colors: Option<bool>,
    timestamp_format: TimestampFormat,
}

impl<W: Write> ColorWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            use_colors: None,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = Some(use_colors);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Whether the next write will be colored
    pub fn uses_colors(&self) -> bool {
        self.use_colors.unwrap_or_else(color::colors_enabled)
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl ColorWriter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LogWriter for ColorWriter<W> {
    fn write_message(&mut self, msg: &LogMessage) -> Result<()> {
        let bytes = marshaler::marshal_color(msg, &self.timestamp_format, self.uses_colors());
        self.sink.write_all(&bytes)?;
        Ok(())
    }

    fn write_raw(&mut self, buf: &[u8]) -> Result<usize> {
        match codec::decode_exact(buf) {
            Ok(msg) => self.write_message(&msg)?,
            // unstyled, same as Debug
            Err(_) => self.sink.write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn name(&self) -> &str {
        "color"
    }
}

impl<W: Write + Send> Write for ColorWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_raw(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_levels_colored() {
        let mut writer = ColorWriter::new(Vec::new()).with_colors(true);
        writer
            .write_message(&LogMessage::new(LogLevel::Error, "disk failure"))
            .unwrap();
        writer
            .write_message(&LogMessage::new(LogLevel::Debug, "tick"))
            .unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("\x1b[31;1m"));
        assert!(lines[0].ends_with("disk failure\x1b[0m"));
        assert!(!lines[1].contains('\x1b'));
    }

    #[test]
    fn test_colors_off() {
        let mut writer = ColorWriter::new(Vec::new()).with_colors(false);
        writer
            .write_message(&LogMessage::new(LogLevel::Warn, "slow query"))
            .unwrap();
        assert!(!writer.get_ref().contains(&0x1b));
    }

    #[test]
    fn test_frame_is_colored_and_raw_is_not() {
        let frame = LogMessage::new(LogLevel::Info, "listening").encode().unwrap();
        let mut writer = ColorWriter::new(Vec::new()).with_colors(true);
        writer.write_all(&frame).unwrap();
        assert!(writer.get_ref().starts_with(b"\x1b[36;1m"));

        let mut writer = ColorWriter::new(Vec::new()).with_colors(true);
        writer.write_all(b"not a frame").unwrap();
        assert_eq!(writer.get_ref().as_slice(), b"not a frame");
    }
}
