//! Writer trait for destinations that understand structured messages

use super::{error::Result, log_message::LogMessage};
use std::io::Write;

/// A byte sink that can also take a [`LogMessage`] directly.
///
/// `write_raw` is the byte path: implementations try to decode `buf` as a
/// frame and fall back to passing it through untouched. Their
/// `std::io::Write::write` should delegate to it.
pub trait LogWriter: Write + Send {
    fn write_message(&mut self, msg: &LogMessage) -> Result<()>;
    fn write_raw(&mut self, buf: &[u8]) -> Result<usize>;
    fn name(&self) -> &str;
}
