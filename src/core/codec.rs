//! Binary frame codec
//!
//! A frame is one self-contained [`LogMessage`]. All integers are big-endian.
//!
//! ```text
//! byte 0       : frame version (1)
//! byte 1       : level (0=Error, 1=Warn, 2=Info, 3=Debug)
//! byte 2       : group length G
//! bytes 3..18  : timestamp (see `timestamp::encode_binary`)
//! bytes 18..20 : file length F
//! bytes 20..22 : line number
//! bytes 22..26 : message length M
//! G bytes group, F bytes file, M bytes message
//! ```
//!
//! The codec moves whole frames only. A reader that runs dry part-way
//! through a frame yields an `UnexpectedEof` IO error and nothing else.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::log_message::LogMessage;
use super::timestamp::{self, TIMESTAMP_LEN};
use std::io::Read;

/// Current frame format version
pub const FRAME_VERSION: u8 = 1;

/// Fixed header length preceding the variable-length text
pub const HEADER_LEN: usize = 3 + TIMESTAMP_LEN + 2 + 2 + 4;

pub const MAX_GROUP_LEN: usize = u8::MAX as usize;
pub const MAX_FILE_LEN: usize = u16::MAX as usize;
pub const MAX_MESSAGE_LEN: usize = u32::MAX as usize;

/// Encode a message into one frame.
///
/// Fails if a text field does not fit in its length prefix or the zone
/// offset cannot be carried by the binary timestamp. Line numbers
/// above 65535 are truncated to their low 16 bits.
pub fn encode(msg: &LogMessage) -> Result<Vec<u8>> {
    check_len("group", msg.group.len(), MAX_GROUP_LEN)?;
    check_len("file", msg.file.len(), MAX_FILE_LEN)?;
    check_len("message", msg.message.len(), MAX_MESSAGE_LEN)?;

    let mut buf =
        Vec::with_capacity(HEADER_LEN + msg.group.len() + msg.file.len() + msg.message.len());
    buf.push(FRAME_VERSION);
    buf.push(msg.level.as_u8());
    buf.push(msg.group.len() as u8);
    buf.extend_from_slice(&timestamp::encode_binary(&msg.timestamp)?);
    buf.extend_from_slice(&(msg.file.len() as u16).to_be_bytes());
    buf.extend_from_slice(&(msg.line as u16).to_be_bytes());
    buf.extend_from_slice(&(msg.message.len() as u32).to_be_bytes());
    buf.extend_from_slice(msg.group.as_bytes());
    buf.extend_from_slice(msg.file.as_bytes());
    buf.extend_from_slice(msg.message.as_bytes());
    Ok(buf)
}

/// Read exactly one frame from `reader`
pub fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<LogMessage> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header)?;

    if header[0] != FRAME_VERSION {
        return Err(LoggerError::UnsupportedVersion { found: header[0] });
    }
    let level = LogLevel::from_u8(header[1])?;
    let group_len = usize::from(header[2]);

    let mut off = 3;
    let timestamp = timestamp::decode_binary(&header[off..off + TIMESTAMP_LEN])?;
    off += TIMESTAMP_LEN;

    let file_len = usize::from(u16::from_be_bytes([header[off], header[off + 1]]));
    off += 2;

    let line = u32::from(u16::from_be_bytes([header[off], header[off + 1]]));
    off += 2;

    let message_len = u32::from_be_bytes([
        header[off],
        header[off + 1],
        header[off + 2],
        header[off + 3],
    ]) as usize;

    // Grows with the bytes actually present, not the announced length.
    let body_len = (group_len + file_len) as u64 + message_len as u64;
    let mut body = Vec::new();
    (&mut *reader).take(body_len).read_to_end(&mut body)?;
    if (body.len() as u64) < body_len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("frame body truncated: {} of {} bytes", body.len(), body_len),
        )
        .into());
    }

    let message = body.split_off(group_len + file_len);
    let file = body.split_off(group_len);
    let group = body;

    Ok(LogMessage {
        level,
        group: into_text("group", group)?,
        timestamp,
        file: into_text("file", file)?,
        line,
        message: into_text("message", message)?,
    })
}

/// Decode a buffer that must hold exactly one frame
pub fn decode_exact(buf: &[u8]) -> Result<LogMessage> {
    let mut cursor = buf;
    let msg = decode(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(LoggerError::TrailingBytes(cursor.len()));
    }
    Ok(msg)
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(LoggerError::field_too_long(field, len, max));
    }
    Ok(())
}

fn into_text(field: &'static str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| LoggerError::InvalidUtf8 { field })
}

impl LogMessage {
    /// Encode this message as a frame
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(self)
    }

    /// Read one frame from `reader`
    pub fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        decode(reader)
    }
}
