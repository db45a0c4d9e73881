//! Plain writer: a byte sink paired with a marshaler

use crate::core::{codec, LogMessage, LogWriter, Marshaler, Result, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;

/// Marshals messages onto a byte sink.
///
/// Raw bytes written through [`std::io::Write`] are decoded as a frame when
/// possible and marshaled like any other message; anything that is not a
/// single complete frame reaches the sink unchanged.
///
/// # Examples
///
/// ```
/// use rust_frame_logger::{LogLevel, LogMessage, LogWriter, Writer};
///
/// let mut writer = Writer::json(Vec::new());
/// writer.write_message(&LogMessage::new(LogLevel::Info, "ready")).unwrap();
/// assert!(writer.get_ref().ends_with(b"\n"));
/// ```
pub struct Writer<W: Write> {
    sink: W,
    marshaler: Marshaler,
    timestamp_format: TimestampFormat,
}

impl<W: Write> Writer<W> {
    pub fn new(sink: W, marshaler: Marshaler) -> Self {
        Self {
            sink,
            marshaler,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn text(sink: W) -> Self {
        Self::new(sink, Marshaler::Text)
    }

    pub fn json(sink: W) -> Self {
        Self::new(sink, Marshaler::Json)
    }

    /// Set the timestamp format used by text output
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_frame_logger::Writer;
    ///
    /// let writer = Writer::text(Vec::new()).with_custom_timestamp("%H:%M:%S");
    /// ```
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    pub fn marshaler(&self) -> &Marshaler {
        &self.marshaler
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl Writer<Stdout> {
    /// Text writer on standard output
    pub fn stdout() -> Self {
        Self::text(io::stdout())
    }
}

impl Writer<BufWriter<File>> {
    /// Text writer appending to `path`
    ///
    /// ```no_run
    /// use rust_frame_logger::Writer;
    ///
    /// let writer = Writer::file("/var/log/app.log").unwrap();
    /// ```
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self::text(BufWriter::new(file)))
    }
}

impl<W: Write + Send> LogWriter for Writer<W> {
    fn write_message(&mut self, msg: &LogMessage) -> Result<()> {
        let bytes = self.marshaler.marshal(msg, &self.timestamp_format)?;
        self.sink.write_all(&bytes)?;
        Ok(())
    }

    fn write_raw(&mut self, buf: &[u8]) -> Result<usize> {
        match codec::decode_exact(buf) {
            Ok(msg) => self.write_message(&msg)?,
            Err(_) => self.sink.write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn name(&self) -> &str {
        self.marshaler.name()
    }
}

impl<W: Write + Send> Write for Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_raw(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
