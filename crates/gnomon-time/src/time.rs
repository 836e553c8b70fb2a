//! The [`Time`] instant.

use std::fmt::{self, Display};
use std::ops::{Add, Sub};

use crate::calendar::{
    self, ABSOLUTE_TO_INTERNAL, CivilDate, DAYS_BEFORE, INTERNAL_TO_ABSOLUTE, INTERNAL_TO_UNIX,
    Month, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, UNIX_TO_INTERNAL, Weekday,
};
use crate::clock::Clock;
use crate::duration::Duration;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// An instant with nanosecond precision, always in UTC.
///
/// Stored as seconds since January 1, year 1 plus a nanosecond remainder in
/// `[0, 1e9)`. Ordering is lexicographic on `(sec, nsec)`. The zero value
/// ([`Time::ZERO`], also `Default`) is the "no time" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    sec: i64,
    nsec: i32,
}

impl Time {
    /// January 1, year 1, 00:00:00 UTC.
    pub const ZERO: Time = Time { sec: 0, nsec: 0 };

    /// Builds the instant `yyyy-mm-dd hh:mm:ss + nsec`.
    ///
    /// Every field may be out of its usual range and is normalized by
    /// carrying into the next larger unit, so October 32 becomes November 1
    /// and month 13 becomes January of the following year.
    pub fn from_date(
        year: i64,
        month: Month,
        day: i64,
        hour: i64,
        min: i64,
        sec: i64,
        nsec: i64,
    ) -> Time {
        let (year, m) = calendar::norm(year, month.number().wrapping_sub(1), 12);
        let month = m + 1;

        let (sec, nsec) = calendar::norm(sec, nsec, NANOS_PER_SECOND);
        let (min, sec) = calendar::norm(min, sec, 60);
        let (hour, min) = calendar::norm(hour, min, 60);
        let (day, hour) = calendar::norm(day, hour, 24);

        let mut d = calendar::days_since_epoch(year);
        d = d.wrapping_add(DAYS_BEFORE[(month - 1) as usize] as u64);
        if calendar::is_leap(year) && month >= Month::MARCH.number() {
            d = d.wrapping_add(1);
        }
        d = d.wrapping_add(day.wrapping_sub(1) as u64);

        let mut abs = d.wrapping_mul(SECONDS_PER_DAY as u64);
        abs = abs.wrapping_add((hour * SECONDS_PER_HOUR + min * SECONDS_PER_MINUTE + sec) as u64);

        let unix = (abs as i64).wrapping_add(ABSOLUTE_TO_INTERNAL + INTERNAL_TO_UNIX);
        Time::from_unix_parts(unix, nsec as i32)
    }

    /// Instant `sec` seconds and `nsec` nanoseconds after the Unix epoch.
    ///
    /// `nsec` outside `[0, 1e9)` is carried into `sec`.
    pub fn from_unix(mut sec: i64, mut nsec: i64) -> Time {
        if !(0..NANOS_PER_SECOND).contains(&nsec) {
            let n = nsec / NANOS_PER_SECOND;
            sec = sec.wrapping_add(n);
            nsec -= n * NANOS_PER_SECOND;
            if nsec < 0 {
                nsec += NANOS_PER_SECOND;
                sec = sec.wrapping_sub(1);
            }
        }
        Time::from_unix_parts(sec, nsec as i32)
    }

    /// Instant `msec` milliseconds after the Unix epoch.
    pub fn from_unix_milli(msec: i64) -> Time {
        Time::from_unix(msec / 1_000, (msec % 1_000) * 1_000_000)
    }

    /// Instant `usec` microseconds after the Unix epoch.
    pub fn from_unix_micro(usec: i64) -> Time {
        Time::from_unix(usec / 1_000_000, (usec % 1_000_000) * 1_000)
    }

    /// Reads the current instant from `clock`.
    pub fn now<C: Clock + ?Sized>(clock: &C) -> Time {
        let reading = clock.read();
        Time::from_unix(reading.sec, i64::from(reading.nsec))
    }

    pub(crate) fn from_unix_parts(sec: i64, nsec: i32) -> Time {
        Time {
            sec: sec.wrapping_add(UNIX_TO_INTERNAL),
            nsec,
        }
    }

    /// Raw internal representation, used by the binary encoding.
    pub(crate) fn from_raw(sec: i64, nsec: i32) -> Time {
        Time { sec, nsec }
    }

    pub(crate) fn raw(self) -> (i64, i32) {
        (self.sec, self.nsec)
    }

    fn absolute(self) -> u64 {
        self.sec.wrapping_add(INTERNAL_TO_ABSOLUTE) as u64
    }

    /// Moves by `dsec` seconds and `dnsec` nanoseconds, `|dnsec| < 1e9`.
    ///
    /// The nanosecond sum is folded into `[0, 1e9)` in `i64`, so a decoded
    /// value whose nanosecond field is out of range cannot overflow.
    fn shift(self, dsec: i64, dnsec: i64) -> Time {
        let nsec = i64::from(self.nsec) + dnsec;
        let carry = nsec.div_euclid(NANOS_PER_SECOND);
        Time {
            sec: self.sec.wrapping_add(dsec).wrapping_add(carry),
            nsec: nsec.rem_euclid(NANOS_PER_SECOND) as i32,
        }
    }

    fn civil(self, full: bool) -> CivilDate {
        calendar::absolute_date(self.absolute(), full)
    }

    // ------------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------------

    pub fn is_zero(self) -> bool {
        self.sec == 0 && self.nsec == 0
    }

    pub fn before(self, u: Time) -> bool {
        self < u
    }

    pub fn after(self, u: Time) -> bool {
        self > u
    }

    pub fn equal(self, u: Time) -> bool {
        self == u
    }

    // ------------------------------------------------------------------------
    // Calendar decomposition
    // ------------------------------------------------------------------------

    /// Year, month and day in which `self` occurs.
    pub fn date(self) -> (i64, Month, i64) {
        let date = self.civil(true);
        (date.year, date.month, date.day)
    }

    pub fn year(self) -> i64 {
        self.civil(false).year
    }

    pub fn month(self) -> Month {
        self.civil(true).month
    }

    pub fn day(self) -> i64 {
        self.civil(true).day
    }

    /// Day of the year, in `[1, 365]` or `[1, 366]` for leap years.
    pub fn year_day(self) -> i64 {
        self.civil(false).yday + 1
    }

    pub fn weekday(self) -> Weekday {
        calendar::absolute_weekday(self.absolute())
    }

    /// ISO 8601 year and week number (`1..=53`).
    ///
    /// Weeks start on Monday and belong to the year containing their
    /// Thursday, so January 1-3 may fall in the last week of the previous
    /// year and December 29-31 in week 1 of the next.
    pub fn iso_week(self) -> (i64, i64) {
        let mut abs = self.absolute();
        // Offset to the Thursday of the same week: Monday +3 ... Sunday -3.
        let mut d = Weekday::THURSDAY.number() - calendar::absolute_weekday(abs).number();
        if d == 4 {
            d = -3;
        }
        abs = abs.wrapping_add((d * SECONDS_PER_DAY) as u64);
        let date = calendar::absolute_date(abs, false);
        (date.year, date.yday / 7 + 1)
    }

    /// Hour, minute and second within the day.
    pub fn clock(self) -> (i64, i64, i64) {
        calendar::absolute_clock(self.absolute())
    }

    pub fn hour(self) -> i64 {
        (self.absolute() % SECONDS_PER_DAY as u64) as i64 / SECONDS_PER_HOUR
    }

    pub fn minute(self) -> i64 {
        (self.absolute() % SECONDS_PER_HOUR as u64) as i64 / SECONDS_PER_MINUTE
    }

    pub fn second(self) -> i64 {
        (self.absolute() % SECONDS_PER_MINUTE as u64) as i64
    }

    /// Nanosecond within the second, in `[0, 999_999_999]`.
    pub fn nanosecond(self) -> i64 {
        i64::from(self.nsec)
    }

    // ------------------------------------------------------------------------
    // Unix views
    // ------------------------------------------------------------------------

    /// Seconds since the Unix epoch.
    pub fn unix(self) -> i64 {
        self.sec.wrapping_add(INTERNAL_TO_UNIX)
    }

    /// Milliseconds since the Unix epoch. Wraps outside the `i64` range.
    pub fn unix_milli(self) -> i64 {
        self.unix()
            .wrapping_mul(1_000)
            .wrapping_add(i64::from(self.nsec) / 1_000_000)
    }

    /// Microseconds since the Unix epoch. Wraps outside the `i64` range.
    pub fn unix_micro(self) -> i64 {
        self.unix()
            .wrapping_mul(1_000_000)
            .wrapping_add(i64::from(self.nsec) / 1_000)
    }

    /// Nanoseconds since the Unix epoch. Only meaningful for years 1678-2262.
    pub fn unix_nano(self) -> i64 {
        self.unix()
            .wrapping_mul(NANOS_PER_SECOND)
            .wrapping_add(i64::from(self.nsec))
    }

    // ------------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------------

    /// Returns `self - earlier`, saturating at [`Duration::MIN`] / [`Duration::MAX`].
    ///
    /// Also available as `self - earlier`. For `self - d` with a duration,
    /// subtract the [`Duration`] directly.
    pub fn duration_since(self, earlier: Time) -> Duration {
        let Some(mut sec) = self.sec.checked_sub(earlier.sec) else {
            return if self.sec > earlier.sec {
                Duration::MAX
            } else {
                Duration::MIN
            };
        };
        let mut nsec = i64::from(self.nsec) - i64::from(earlier.nsec);
        if sec > 0 && nsec < 0 {
            sec -= 1;
            nsec += NANOS_PER_SECOND;
        } else if sec < 0 && nsec > 0 {
            sec += 1;
            nsec -= NANOS_PER_SECOND;
        }
        sec.checked_mul(NANOS_PER_SECOND)
            .and_then(|n| n.checked_add(nsec))
            .map_or(
                if sec > 0 { Duration::MAX } else { Duration::MIN },
                Duration::from_nanos,
            )
    }

    /// Adds calendar years, months and days, keeping the time of day.
    ///
    /// The result is normalized like [`Time::from_date`]: adding one month
    /// to October 31 yields December 1, the normalized November 31.
    pub fn add_date(self, years: i64, months: i64, days: i64) -> Time {
        let (year, month, day) = self.date();
        let (hour, min, sec) = self.clock();
        Time::from_date(
            year.wrapping_add(years),
            Month::new(month.number().wrapping_add(months)),
            day.wrapping_add(days),
            hour,
            min,
            sec,
            i64::from(self.nsec),
        )
    }
}

/// Time elapsed since `t` according to `clock`.
pub fn since<C: Clock + ?Sized>(clock: &C, t: Time) -> Duration {
    Time::now(clock).duration_since(t)
}

/// Time remaining until `t` according to `clock`.
pub fn until<C: Clock + ?Sized>(clock: &C, t: Time) -> Duration {
    t.duration_since(Time::now(clock))
}

/// Carries nanosecond overflow into seconds in either direction.
impl Add<Duration> for Time {
    type Output = Time;

    fn add(self, rhs: Duration) -> Self::Output {
        let d = rhs.nanoseconds();
        self.shift(d / NANOS_PER_SECOND, d % NANOS_PER_SECOND)
    }
}

/// Subtracts the seconds and nanoseconds of `rhs` directly, so
/// `t - Duration::MIN` is exact.
impl Sub<Duration> for Time {
    type Output = Time;

    fn sub(self, rhs: Duration) -> Self::Output {
        let d = rhs.nanoseconds();
        self.shift(-(d / NANOS_PER_SECOND), -(d % NANOS_PER_SECOND))
    }
}

impl Sub for Time {
    type Output = Duration;

    fn sub(self, rhs: Time) -> Self::Output {
        self.duration_since(rhs)
    }
}

/// RFC 3339 with nanosecond precision. Unlike the text encoding this never
/// fails; five-digit and negative years are written out in full.
impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::rfc3339::format_nano(*self))
    }
}
