//! Persistent encodings of [`Time`].
//!
//! - **Binary**: 12 bytes, big-endian `sec` (i64) then big-endian `nsec` (i32),
//!   both in the internal (year 1) epoch. This layout is stored on chain and
//!   must never change.
//! - **Text**: RFC 3339 with nanosecond precision, four-digit years only.
//! - **JSON**: the text form as a quoted string; `null` decodes to a no-op
//!   and a malformed value decodes to the zero time.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DecodeError, EncodeError, ParseError, ParseErrorKind};
use crate::rfc3339;
use crate::time::Time;

/// Length of the binary encoding.
pub const BINARY_LEN: usize = 12;

impl Time {
    /// Encodes as 8 bytes of seconds followed by 4 bytes of nanoseconds,
    /// big-endian.
    pub fn encode_binary(self) -> [u8; BINARY_LEN] {
        let (sec, nsec) = self.raw();
        let mut buf = [0u8; BINARY_LEN];
        buf[..8].copy_from_slice(&sec.to_be_bytes());
        buf[8..].copy_from_slice(&nsec.to_be_bytes());
        buf
    }

    /// Decodes the form produced by [`encode_binary`](Self::encode_binary).
    ///
    /// # Errors
    ///
    /// - [`DecodeError::NoData`] if `data` is empty
    /// - [`DecodeError::InvalidLength`] if `data` is not exactly [`BINARY_LEN`] bytes
    pub fn decode_binary(data: &[u8]) -> Result<Time, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::NoData);
        }
        let invalid = || DecodeError::InvalidLength {
            expected: BINARY_LEN,
            actual: data.len(),
        };
        let buf: &[u8; BINARY_LEN] = data.try_into().map_err(|_| invalid())?;

        let (sec, nsec) = buf.split_at(8);
        let sec = i64::from_be_bytes(sec.try_into().map_err(|_| invalid())?);
        let nsec = i32::from_be_bytes(nsec.try_into().map_err(|_| invalid())?);
        Ok(Time::from_raw(sec, nsec))
    }

    /// Encodes as RFC 3339 text with nanosecond precision.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if the year is outside `[0, 9999]`; RFC 3339
    /// requires exactly four year digits.
    pub fn encode_text(self) -> Result<String, EncodeError> {
        self.check_four_digit_year("Time::encode_text")?;
        Ok(rfc3339::format_nano(self))
    }

    /// Decodes RFC 3339 text.
    pub fn decode_text(data: &[u8]) -> Result<Time, ParseError> {
        let text = std::str::from_utf8(data).map_err(|_| {
            ParseError::new(&String::from_utf8_lossy(data), ParseErrorKind::Syntax)
        })?;
        rfc3339::parse(text)
    }

    /// Encodes as a JSON string holding the RFC 3339 text form.
    pub fn encode_json(self) -> Result<String, EncodeError> {
        self.check_four_digit_year("Time::encode_json")?;
        let mut out = String::with_capacity(rfc3339::MAX_LEN + 2);
        out.push('"');
        rfc3339::append_nano(&mut out, self);
        out.push('"');
        Ok(out)
    }

    /// Decodes a JSON string into `self`.
    ///
    /// The literal `null` leaves `self` untouched. Any other input that is
    /// not a quoted RFC 3339 timestamp resets `self` to [`Time::ZERO`] and
    /// returns the error.
    pub fn decode_json(&mut self, data: &[u8]) -> Result<(), ParseError> {
        if data == b"null" {
            return Ok(());
        }
        let decoded = data
            .strip_prefix(b"\"")
            .and_then(|rest| rest.strip_suffix(b"\""))
            .ok_or_else(|| {
                ParseError::new(&String::from_utf8_lossy(data), ParseErrorKind::NotQuoted)
            })
            .and_then(Time::decode_text);
        match decoded {
            Ok(t) => {
                *self = t;
                Ok(())
            }
            Err(err) => {
                *self = Time::ZERO;
                Err(err)
            }
        }
    }

    /// Parses an RFC 3339 timestamp. Numeric offsets are folded into the
    /// instant; the result is always UTC.
    pub fn parse_rfc3339(value: &str) -> Result<Time, ParseError> {
        rfc3339::parse(value)
    }

    fn check_four_digit_year(self, method: &'static str) -> Result<(), EncodeError> {
        let year = self.year();
        if (0..10_000).contains(&year) {
            Ok(())
        } else {
            Err(EncodeError { method, year })
        }
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.encode_text().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TimeVisitor)
    }
}

struct TimeVisitor;

impl Visitor<'_> for TimeVisitor {
    type Value = Time;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Time, E> {
        rfc3339::parse(value).map_err(E::custom)
    }
}
