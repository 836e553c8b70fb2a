//! RFC 3339 text form.
//!
//! Output is always UTC (`Z`) with up to nine fractional digits, trailing
//! zeros removed. Input accepts `Z` or a numeric `±hh:mm` offset, which is
//! folded into the instant.

use std::fmt::Write;

use crate::calendar::{self, Month};
use crate::duration::Duration;
use crate::error::{ParseError, ParseErrorKind};
use crate::time::Time;

/// Longest output for a four-digit year: `2006-01-02T15:04:05.999999999Z`.
pub(crate) const MAX_LEN: usize = 30;

/// Formats `t` as RFC 3339 with nanosecond precision.
pub(crate) fn format_nano(t: Time) -> String {
    let mut out = String::with_capacity(MAX_LEN);
    append_nano(&mut out, t);
    out
}

pub(crate) fn append_nano(out: &mut String, t: Time) {
    let (year, month, day) = t.date();
    let (hour, min, sec) = t.clock();

    // Four digits minimum; the sign is not part of the width.
    if year < 0 {
        out.push('-');
    }
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year.unsigned_abs(),
        month.number(),
        day,
        hour,
        min,
        sec
    );

    let nsec = t.nanosecond();
    if nsec != 0 {
        let digits = format!("{nsec:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push('Z');
}

/// Parses an RFC 3339 timestamp such as `2006-01-02T15:04:05.999999999Z`
/// or `2006-01-02T15:04:05+07:00`.
///
/// Fractional seconds may use `.` or `,` and any number of digits; digits
/// past the ninth are ignored.
pub fn parse(value: &str) -> Result<Time, ParseError> {
    let syntax = || ParseError::new(value, ParseErrorKind::Syntax);
    let b = value.as_bytes();

    if b.len() < "2006-01-02T15:04:05Z".len()
        || b[4] != b'-'
        || b[7] != b'-'
        || b[10] != b'T'
        || b[13] != b':'
        || b[16] != b':'
    {
        return Err(syntax());
    }

    let year = digits(&b[0..4]).ok_or_else(syntax)?;
    let month = digits(&b[5..7]).ok_or_else(syntax)?;
    let day = digits(&b[8..10]).ok_or_else(syntax)?;
    let hour = digits(&b[11..13]).ok_or_else(syntax)?;
    let min = digits(&b[14..16]).ok_or_else(syntax)?;
    let sec = digits(&b[17..19]).ok_or_else(syntax)?;

    let range = |kind| ParseError::new(value, kind);
    if !(1..=12).contains(&month) {
        return Err(range(ParseErrorKind::Month));
    }
    if day < 1 || day > calendar::days_in(month, year) {
        return Err(range(ParseErrorKind::Day));
    }
    if hour >= 24 {
        return Err(range(ParseErrorKind::Hour));
    }
    if min >= 60 {
        return Err(range(ParseErrorKind::Minute));
    }
    if sec >= 60 {
        return Err(range(ParseErrorKind::Second));
    }

    let mut rest = &b[19..];

    let mut nsec = 0;
    if rest.len() >= 2 && (rest[0] == b'.' || rest[0] == b',') && rest[1].is_ascii_digit() {
        let n = 1 + rest[1..].iter().take_while(|c| c.is_ascii_digit()).count();
        nsec = fraction(&rest[1..n]);
        rest = &rest[n..];
    }

    let offset = match rest {
        [b'Z'] => 0,
        [sign @ (b'+' | b'-'), h1, h2, b':', m1, m2] => {
            let hh = digits(&[*h1, *h2]).ok_or_else(syntax)?;
            let mm = digits(&[*m1, *m2]).ok_or_else(syntax)?;
            if hh >= 24 || mm >= 60 {
                return Err(range(ParseErrorKind::Offset));
            }
            let secs = hh * 3600 + mm * 60;
            if *sign == b'-' { -secs } else { secs }
        }
        _ => return Err(syntax()),
    };

    let local = Time::from_date(year, Month::new(month), day, hour, min, sec, nsec);
    Ok(local - Duration::SECOND * offset)
}

/// Decimal value of an all-digit slice.
fn digits(b: &[u8]) -> Option<i64> {
    b.iter().try_fold(0i64, |acc, &c| {
        c.is_ascii_digit()
            .then(|| acc * 10 + i64::from(c - b'0'))
    })
}

/// Nanoseconds represented by fractional digits, keeping at most nine.
fn fraction(b: &[u8]) -> i64 {
    let kept = &b[..b.len().min(9)];
    let mut nsec = digits(kept).unwrap_or(0);
    for _ in kept.len()..9 {
        nsec *= 10;
    }
    nsec
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2006-01-02T15:04:05Z", 2006, 1, 2, 15, 4, 5, 0; "utc")]
    #[test_case("2006-01-02T15:04:05.5Z", 2006, 1, 2, 15, 4, 5, 500_000_000; "one fraction digit")]
    #[test_case("2006-01-02T15:04:05,123Z", 2006, 1, 2, 15, 4, 5, 123_000_000; "comma fraction")]
    #[test_case("2006-01-02T15:04:05.1234567891Z", 2006, 1, 2, 15, 4, 5, 123_456_789; "excess digits dropped")]
    #[test_case("2006-01-02T15:04:05+07:00", 2006, 1, 2, 8, 4, 5, 0; "east offset")]
    #[test_case("2006-01-02T20:04:05-05:30", 2006, 1, 3, 1, 34, 5, 0; "west offset crosses midnight")]
    #[test_case("2024-02-29T00:00:00Z", 2024, 2, 29, 0, 0, 0, 0; "leap day")]
    fn parses(
        input: &str,
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        min: i64,
        sec: i64,
        nsec: i64,
    ) {
        let t = parse(input).expect("valid RFC 3339");
        assert_eq!(t.date(), (year, Month::new(month), day));
        assert_eq!(t.clock(), (hour, min, sec));
        assert_eq!(t.nanosecond(), nsec);
    }

    #[test_case("2006-01-02 15:04:05Z", ParseErrorKind::Syntax; "space separator")]
    #[test_case("2006-01-02T15:04:05", ParseErrorKind::Syntax; "missing zone")]
    #[test_case("2006-01-02T15:04:05z", ParseErrorKind::Syntax; "lowercase zone")]
    #[test_case("2006-01-02T15:04:05.Z", ParseErrorKind::Syntax; "empty fraction")]
    #[test_case("2006-1-02T15:04:05Z", ParseErrorKind::Syntax; "short month")]
    #[test_case("2006-13-02T15:04:05Z", ParseErrorKind::Month; "month thirteen")]
    #[test_case("2023-02-29T15:04:05Z", ParseErrorKind::Day; "no leap day")]
    #[test_case("2006-01-00T15:04:05Z", ParseErrorKind::Day; "day zero")]
    #[test_case("2006-01-02T24:00:00Z", ParseErrorKind::Hour; "hour 24")]
    #[test_case("2006-01-02T15:60:05Z", ParseErrorKind::Minute; "minute 60")]
    #[test_case("2006-01-02T15:04:60Z", ParseErrorKind::Second; "leap second")]
    #[test_case("2006-01-02T15:04:05+24:00", ParseErrorKind::Offset; "offset hour")]
    #[test_case("2006-01-02T15:04:05+07:00junk", ParseErrorKind::Syntax; "trailing bytes")]
    #[test_case("", ParseErrorKind::Syntax; "empty")]
    fn rejects(input: &str, kind: ParseErrorKind) {
        let err = parse(input).expect_err("invalid RFC 3339");
        assert_eq!(err.reason, kind);
        assert_eq!(err.value, input);
    }

    #[test]
    fn formats_trimmed_fraction() {
        let t = Time::from_date(2006, Month::JANUARY, 2, 15, 4, 5, 120_000_000);
        assert_eq!(format_nano(t), "2006-01-02T15:04:05.12Z");
    }

    #[test]
    fn formats_whole_seconds_without_fraction() {
        let t = Time::from_date(1970, Month::JANUARY, 1, 0, 0, 0, 0);
        assert_eq!(format_nano(t), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn formats_out_of_range_years() {
        let t = Time::from_date(-1, Month::MARCH, 4, 0, 0, 0, 1);
        assert_eq!(format_nano(t), "-0001-03-04T00:00:00.000000001Z");
        let t = Time::from_date(12345, Month::JANUARY, 1, 0, 0, 0, 0);
        assert_eq!(format_nano(t), "12345-01-01T00:00:00Z");
    }
}
