//! # gnomon-time: Deterministic time for `Gnomon`
//!
//! Calendar, instant and duration arithmetic that produces byte-identical
//! results on every node, independent of host locale, time zone database or
//! clock resolution.
//!
//! - Instants ([`Time`]) in UTC with nanosecond precision
//! - Calendar fields ([`Month`], [`Weekday`]) via 400/100/4/1-year cycle folding
//! - Durations ([`Duration`]) as saturating signed nanosecond counts
//! - Encodings: fixed 12-byte binary, RFC 3339 text, JSON
//! - The host clock as an injected capability ([`Clock`])
//!
//! ## Key Principles
//!
//! - **No ambient clock**: "now" is read only from a [`Clock`] the caller passes in
//! - **No time zones**: every instant is UTC; numeric offsets are folded on parse
//! - **No floating point** in calendar math or formatting
//!
//! ## Example
//!
//! ```
//! use gnomon_time::{Duration, Month, Time};
//!
//! let t = Time::from_date(2011, Month::JANUARY, 1, 0, 0, 0, 0);
//! assert_eq!(t.add_date(-1, 2, 3), Time::from_date(2010, Month::MARCH, 4, 0, 0, 0, 0));
//!
//! let later = t + Duration::from_nanos(1_500_000_000);
//! assert_eq!((later - t).to_string(), "1.5s");
//! assert_eq!(later.encode_text().unwrap(), "2011-01-01T00:00:01.5Z");
//! ```

mod calendar;
pub mod clock;
mod duration;
mod encoding;
mod error;
pub mod rfc3339;
mod time;


pub use calendar::{Month, Weekday, is_leap};
pub use clock::{Clock, FixedClock, SystemClock, WallReading};
pub use duration::Duration;
pub use encoding::BINARY_LEN;
pub use error::{DecodeError, EncodeError, ParseError, ParseErrorKind};
pub use time::{Time, since, until};
