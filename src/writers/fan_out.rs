//! Fan-out writer: one message, many destinations

use super::sink::Sink;
use crate::core::{codec, LogMessage, Result};
use std::io::{self, Write};

/// Forwards every message to an ordered list of sinks.
///
/// Nested fan-outs are flattened when added, so a fan-out never contains
/// another one. Delivery stops at the first failing child and that error is
/// returned; children before it keep what they received and children after
/// it receive nothing.
///
/// # Examples
///
/// ```
/// use rust_frame_logger::{FanOutWriter, LogLevel, LogMessage, Sink, Writer};
///
/// let mut fan_out = FanOutWriter::new([
///     Sink::from(Writer::text(Vec::new())),
///     Sink::from(Writer::json(Vec::new())),
/// ]);
/// fan_out.write_message(&LogMessage::new(LogLevel::Info, "hello")).unwrap();
/// assert_eq!(fan_out.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct FanOutWriter {
    children: Vec<Sink>,
}

impl FanOutWriter {
    pub fn new(children: impl IntoIterator<Item = Sink>) -> Self {
        let mut fan_out = Self::default();
        for child in children {
            fan_out.push(child);
        }
        fan_out
    }

    /// Append a child, splicing in the children of a nested fan-out
    pub fn push(&mut self, child: impl Into<Sink>) {
        match child.into() {
            Sink::FanOut(nested) => self.children.extend(nested.children),
            other => self.children.push(other),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Sink] {
        &self.children
    }

    pub fn write_message(&mut self, msg: &LogMessage) -> Result<()> {
        for child in &mut self.children {
            child.write_message(msg)?;
        }
        Ok(())
    }

    /// Decode `buf` once and forward the message; bytes that are not a
    /// frame are forwarded unchanged to each child's byte path
    pub fn write_raw(&mut self, buf: &[u8]) -> Result<usize> {
        match codec::decode_exact(buf) {
            Ok(msg) => self.write_message(&msg)?,
            Err(_) => {
                for child in &mut self.children {
                    child.write_bytes(buf)?;
                }
            }
        }
        Ok(buf.len())
    }

    /// Flush every child, stopping at the first failure
    pub fn flush_all(&mut self) -> Result<()> {
        for child in &mut self.children {
            child.flush()?;
        }
        Ok(())
    }
}

impl Write for FanOutWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_raw(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.flush_all()?)
    }
}
