//! Error types for time encodings.

use thiserror::Error;

/// Failure to decode the fixed 12-byte binary form of a [`Time`](crate::Time).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input buffer was empty.
    #[error("binary time: no data")]
    NoData,

    /// The input buffer was not exactly [`BINARY_LEN`](crate::BINARY_LEN) bytes.
    #[error("binary time: invalid length {actual}, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
}

/// The instant cannot be rendered as RFC 3339 text because its year has
/// more (or fewer) than four digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method}: year {year} outside of range [0,9999]")]
pub struct EncodeError {
    /// Name of the encoding entry point that failed.
    pub method: &'static str,
    /// The calendar year of the rejected instant.
    pub year: i64,
}

/// Malformed RFC 3339 input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing time {value:?}: {reason}")]
pub struct ParseError {
    /// The rejected input, verbatim.
    pub value: String,
    /// What was wrong with it.
    pub reason: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(value: &str, reason: ParseErrorKind) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }
}

/// Classification of RFC 3339 parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("cannot parse as RFC 3339")]
    Syntax,

    #[error("month out of range")]
    Month,

    #[error("day out of range")]
    Day,

    #[error("hour out of range")]
    Hour,

    #[error("minute out of range")]
    Minute,

    #[error("second out of range")]
    Second,

    #[error("time zone offset out of range")]
    Offset,

    #[error("JSON value is not a quoted string")]
    NotQuoted,
}
