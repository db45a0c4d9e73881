//! Output destinations accepted by the logger and the fan-out writer

use super::fan_out::FanOutWriter;
use crate::core::{codec, LogMessage, LogWriter, Result};
use std::any::Any;
use std::fmt;
use std::io::{self, Write};

/// Where log output goes.
///
/// The variant records what the destination can do: a plain byte sink only
/// receives bytes (a message is sent as its binary frame), while a
/// [`LogWriter`] receives the message itself.
pub enum Sink {
    Bytes(Box<dyn Write + Send>),
    Messages(Box<dyn LogWriter>),
    FanOut(FanOutWriter),
}

impl Sink {
    /// A destination that only understands bytes
    ///
    /// A [`FanOutWriter`] passed here is kept as a fan-out so it still gets
    /// structured messages and can be flattened into another fan-out.
    pub fn bytes<W: Write + Send + 'static>(sink: W) -> Self {
        let mut sink = Some(sink);
        if let Some(fan_out) = (&mut sink as &mut dyn Any)
            .downcast_mut::<Option<FanOutWriter>>()
            .and_then(Option::take)
        {
            return Sink::FanOut(fan_out);
        }
        match sink {
            Some(sink) => Sink::Bytes(Box::new(sink)),
            None => Sink::FanOut(FanOutWriter::default()),
        }
    }

    /// A destination that takes structured messages
    pub fn messages<W: LogWriter + 'static>(writer: W) -> Self {
        Sink::Messages(Box::new(writer))
    }

    /// Deliver a message, preferring the structured path
    pub fn write_message(&mut self, msg: &LogMessage) -> Result<()> {
        match self {
            Sink::Bytes(w) => {
                let frame = codec::encode(msg)?;
                w.write_all(&frame)?;
                Ok(())
            }
            Sink::Messages(w) => w.write_message(msg),
            Sink::FanOut(f) => f.write_message(msg),
        }
    }

    /// Deliver raw bytes through the destination's byte path
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        match self {
            Sink::Bytes(w) => {
                w.write_all(buf)?;
                Ok(buf.len())
            }
            Sink::Messages(w) => w.write_raw(buf),
            Sink::FanOut(f) => f.write_raw(buf),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        match self {
            Sink::Bytes(w) => w.flush()?,
            Sink::Messages(w) => w.flush()?,
            Sink::FanOut(f) => f.flush_all()?,
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        match self {
            Sink::Bytes(_) => "bytes",
            Sink::Messages(w) => w.name(),
            Sink::FanOut(_) => "fan-out",
        }
    }
}

impl<W: LogWriter + 'static> From<W> for Sink {
    fn from(writer: W) -> Self {
        Sink::messages(writer)
    }
}

impl From<FanOutWriter> for Sink {
    fn from(fan_out: FanOutWriter) -> Self {
        Sink::FanOut(fan_out)
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(Sink::flush(self)?)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::FanOut(fan_out) => f.debug_tuple("Sink").field(fan_out).finish(),
            other => f.debug_tuple("Sink").field(&other.name()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use crate::test_utils::SharedBuf;
    use crate::writers::Writer;

    #[test]
    fn test_bytes_sink_receives_frame() {
        let msg = LogMessage::new(LogLevel::Info, "started").with_group("boot");
        let buf = SharedBuf::default();
        let mut sink = Sink::bytes(buf.clone());
        sink.write_message(&msg).unwrap();

        assert_eq!(codec::decode_exact(&buf.contents()).unwrap(), msg);
        assert_eq!(sink.name(), "bytes");
    }

    #[test]
    fn test_bytes_path_through_message_sink() {
        let buf = SharedBuf::default();
        let mut sink = Sink::messages(Writer::text(buf.clone()));
        let n = sink.write_bytes(b"raw line\n").unwrap();
        assert_eq!(n, 9);
        assert_eq!(buf.text(), "raw line\n");
    }

    #[test]
    fn test_writer_converts_to_message_sink() {
        let sink: Sink = Writer::json(Vec::new()).into();
        assert!(matches!(sink, Sink::Messages(_)));
        assert_eq!(sink.name(), "json");
    }

    #[test]
    fn test_fan_out_given_as_bytes_stays_fan_out() {
        let a = SharedBuf::default();
        let b = SharedBuf::default();
        let sink = Sink::bytes(FanOutWriter::new([
            Sink::from(Writer::text(a.clone())),
            Sink::from(Writer::text(b.clone())),
        ]));
        assert!(matches!(sink, Sink::FanOut(_)));

        let mut outer = FanOutWriter::default();
        outer.push(sink);
        assert_eq!(outer.len(), 2);

        outer
            .write_message(&LogMessage::new(LogLevel::Info, "spliced"))
            .unwrap();
        assert!(a.text().contains("spliced"));
        assert!(b.text().contains("spliced"));
    }
}
