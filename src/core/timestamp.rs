//! Timestamp formatting and the binary timestamp encoding
//!
//! Text output uses [`TimestampFormat`]. Frames carry timestamps in a fixed
//! 15-byte form:
//!
//! ```text
//! byte 0     : timestamp encoding version (1)
//! bytes 1..9 : seconds since 0001-01-01T00:00:00Z (i64, big-endian)
//! bytes 9..13: nanoseconds within the second (u32, big-endian)
//! bytes 13..15: zone offset in minutes east of UTC (i16, big-endian, -1 = UTC)
//! ```

use super::error::{LoggerError, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Length of an encoded timestamp
pub const TIMESTAMP_LEN: usize = 1 + 8 + 4 + 2;

/// Version byte of the timestamp encoding
pub const TIMESTAMP_VERSION: u8 = 1;

/// Seconds between 0001-01-01T00:00:00Z and the Unix epoch
const UNIX_TO_INTERNAL: i64 = (1969 * 365 + 1969 / 4 - 1969 / 100 + 1969 / 400) * 86_400;

/// Offset marker used for UTC
const UTC_OFFSET_MARKER: i16 = -1;

/// Current local time with its zone offset
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// The zero timestamp, 0001-01-01T00:00:00Z
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .unwrap_or_default()
}

/// Encode a timestamp into its 15-byte binary form.
///
/// Fails for zone offsets that the form cannot carry: offsets with a
/// sub-minute component and -00:01, whose value is the UTC marker.
pub fn encode_binary(datetime: &DateTime<FixedOffset>) -> Result<[u8; TIMESTAMP_LEN]> {
    let secs = datetime.timestamp().wrapping_add(UNIX_TO_INTERNAL);
    let nanos = datetime.timestamp_subsec_nanos();

    let offset_secs = datetime.offset().local_minus_utc();
    if offset_secs % 60 != 0 {
        return Err(LoggerError::invalid_timestamp(format!(
            "zone offset {}s is not a whole number of minutes",
            offset_secs
        )));
    }
    let offset_minutes = match (offset_secs / 60) as i16 {
        0 => UTC_OFFSET_MARKER,
        UTC_OFFSET_MARKER => {
            return Err(LoggerError::invalid_timestamp(
                "zone offset -00:01 collides with the UTC marker",
            ))
        }
        minutes => minutes,
    };

    let mut buf = [0u8; TIMESTAMP_LEN];
    buf[0] = TIMESTAMP_VERSION;
    buf[1..9].copy_from_slice(&secs.to_be_bytes());
    buf[9..13].copy_from_slice(&nanos.to_be_bytes());
    buf[13..15].copy_from_slice(&offset_minutes.to_be_bytes());
    Ok(buf)
}

/// Decode a timestamp from its 15-byte binary form
pub fn decode_binary(buf: &[u8]) -> Result<DateTime<FixedOffset>> {
    if buf.len() != TIMESTAMP_LEN {
        return Err(LoggerError::invalid_timestamp(format!(
            "expected {} bytes, got {}",
            TIMESTAMP_LEN,
            buf.len()
        )));
    }
    if buf[0] != TIMESTAMP_VERSION {
        return Err(LoggerError::invalid_timestamp(format!(
            "unsupported timestamp version {}",
            buf[0]
        )));
    }

    let mut secs = [0u8; 8];
    secs.copy_from_slice(&buf[1..9]);
    let secs = i64::from_be_bytes(secs);

    let mut nanos = [0u8; 4];
    nanos.copy_from_slice(&buf[9..13]);
    let nanos = u32::from_be_bytes(nanos);

    let offset_minutes = i16::from_be_bytes([buf[13], buf[14]]);
    let offset_secs = if offset_minutes == UTC_OFFSET_MARKER {
        0
    } else {
        i32::from(offset_minutes) * 60
    };

    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        LoggerError::invalid_timestamp(format!("zone offset {} minutes out of range", offset_minutes))
    })?;

    let unix_secs = secs.checked_sub(UNIX_TO_INTERNAL).ok_or_else(|| {
        LoggerError::invalid_timestamp(format!("seconds {} out of range", secs))
    })?;

    let utc: DateTime<Utc> = DateTime::from_timestamp(unix_secs, nanos).ok_or_else(|| {
        LoggerError::invalid_timestamp(format!("{}s {}ns is not representable", secs, nanos))
    })?;

    Ok(utc.with_timezone(&offset))
}

/// Timestamp format used by the text and color marshalers
///
/// # Examples
///
/// ```
/// use rust_frame_logger::core::timestamp::{zero_time, TimestampFormat};
///
/// let format = TimestampFormat::Standard;
/// assert_eq!(format.format(&zero_time()), "0001-01-01 00:00:00.000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45.123`, in the message's own zone
    #[default]
    Standard,

    /// RFC 3339 with nanoseconds: `2025-01-08T10:30:45.123456789+08:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> String {
        match self {
            TimestampFormat::Standard => datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Nanos, false)
            }
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}
