//! Civil calendar folding.
//!
//! Instants are stored relative to the *internal* epoch (January 1 of year 1).
//! Calendar math is done on the *absolute* timeline, whose zero year is chosen
//! to be `1 mod 400` and far enough in the past that every representable
//! instant maps to a non-negative day count. That keeps the 400/100/4/1-year
//! cycle folding in unsigned arithmetic.
//!
//! All arithmetic on the absolute timeline wraps on overflow, so extreme
//! inputs produce a defined (if meaningless) answer instead of a panic.

use std::fmt::{self, Display};

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub(crate) const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub(crate) const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

const DAYS_PER_400_YEARS: u64 = 365 * 400 + 97;
const DAYS_PER_100_YEARS: u64 = 365 * 100 + 24;
const DAYS_PER_4_YEARS: u64 = 365 * 4 + 1;

/// The year of the zero [`Time`](crate::Time).
const INTERNAL_YEAR: i64 = 1;

/// Zero year of the absolute timeline. Must be `1 mod 400`.
const ABSOLUTE_ZERO_YEAR: i64 = -292_277_022_399;

/// Seconds from the absolute zero to the internal epoch, negated.
/// 31_556_952 is the mean Gregorian year (365.2425 days) in seconds.
pub(crate) const ABSOLUTE_TO_INTERNAL: i64 = (ABSOLUTE_ZERO_YEAR - INTERNAL_YEAR) * 31_556_952;
pub(crate) const INTERNAL_TO_ABSOLUTE: i64 = -ABSOLUTE_TO_INTERNAL;

/// Seconds from the internal epoch to 1970-01-01T00:00:00Z.
pub(crate) const UNIX_TO_INTERNAL: i64 =
    (1969 * 365 + 1969 / 4 - 1969 / 100 + 1969 / 400) * SECONDS_PER_DAY;
pub(crate) const INTERNAL_TO_UNIX: i64 = -UNIX_TO_INTERNAL;

/// `DAYS_BEFORE[m]` counts the days in a non-leap year before month `m`
/// (0-based) begins. The entry for `m = 12` is the length of the year.
pub(crate) const DAYS_BEFORE: [i64; 13] = [
    0,
    31,
    31 + 28,
    31 + 28 + 31,
    31 + 28 + 31 + 30,
    31 + 28 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,
];

// ============================================================================
// Month / Weekday
// ============================================================================

const LONG_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const LONG_DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A month of the year (January = 1).
///
/// Values outside `1..=12` are representable because [`Time::from_date`](crate::Time::from_date)
/// accepts and normalizes them; they render as `%!Month(n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(i64);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const FEBRUARY: Month = Month(2);
    pub const MARCH: Month = Month(3);
    pub const APRIL: Month = Month(4);
    pub const MAY: Month = Month(5);
    pub const JUNE: Month = Month(6);
    pub const JULY: Month = Month(7);
    pub const AUGUST: Month = Month(8);
    pub const SEPTEMBER: Month = Month(9);
    pub const OCTOBER: Month = Month(10);
    pub const NOVEMBER: Month = Month(11);
    pub const DECEMBER: Month = Month(12);

    pub const fn new(number: i64) -> Self {
        Self(number)
    }

    /// Returns the month number (January = 1).
    pub const fn number(self) -> i64 {
        self.0
    }
}

impl From<i64> for Month {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Month> for i64 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (1..=12).contains(&self.0) {
            f.write_str(LONG_MONTH_NAMES[(self.0 - 1) as usize])
        } else {
            write!(f, "%!Month({})", self.0 as u64)
        }
    }
}

/// A day of the week (Sunday = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weekday(i64);

impl Weekday {
    pub const SUNDAY: Weekday = Weekday(0);
    pub const MONDAY: Weekday = Weekday(1);
    pub const TUESDAY: Weekday = Weekday(2);
    pub const WEDNESDAY: Weekday = Weekday(3);
    pub const THURSDAY: Weekday = Weekday(4);
    pub const FRIDAY: Weekday = Weekday(5);
    pub const SATURDAY: Weekday = Weekday(6);

    pub const fn new(number: i64) -> Self {
        Self(number)
    }

    /// Returns the day number (Sunday = 0).
    pub const fn number(self) -> i64 {
        self.0
    }
}

impl From<i64> for Weekday {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (0..=6).contains(&self.0) {
            f.write_str(LONG_DAY_NAMES[self.0 as usize])
        } else {
            write!(f, "%!Weekday({})", self.0 as u64)
        }
    }
}

// ============================================================================
// Folding
// ============================================================================

/// Gregorian leap year rule.
pub fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`. `month` must be in `1..=12`.
pub(crate) fn days_in(month: i64, year: i64) -> i64 {
    if month == 2 && is_leap(year) {
        return 29;
    }
    DAYS_BEFORE[month as usize] - DAYS_BEFORE[(month - 1) as usize]
}

/// Returns `(nhi, nlo)` such that `hi * base + lo == nhi * base + nlo`
/// and `0 <= nlo < base`.
pub(crate) fn norm(mut hi: i64, mut lo: i64, base: i64) -> (i64, i64) {
    if lo < 0 {
        // -(lo + 1) rather than -lo - 1 so i64::MIN does not overflow.
        let n = -(lo + 1) / base + 1;
        hi = hi.wrapping_sub(n);
        lo = lo.wrapping_add(n.wrapping_mul(base));
    }
    if lo >= base {
        let n = lo / base;
        hi = hi.wrapping_add(n);
        lo -= n * base;
    }
    (hi, lo)
}

/// Weekday of an absolute-timeline second. The absolute zero is a Monday.
pub(crate) fn absolute_weekday(abs: u64) -> Weekday {
    let sec = abs.wrapping_add(Weekday::MONDAY.0 as u64 * SECONDS_PER_DAY as u64)
        % SECONDS_PER_WEEK as u64;
    Weekday((sec / SECONDS_PER_DAY as u64) as i64)
}

/// `(hour, minute, second)` within the day of an absolute-timeline second.
pub(crate) fn absolute_clock(abs: u64) -> (i64, i64, i64) {
    let mut sec = (abs % SECONDS_PER_DAY as u64) as i64;
    let hour = sec / SECONDS_PER_HOUR;
    sec -= hour * SECONDS_PER_HOUR;
    let min = sec / SECONDS_PER_MINUTE;
    sec -= min * SECONDS_PER_MINUTE;
    (hour, min, sec)
}

/// A decomposed calendar position. `month` and `day` are only meaningful
/// when produced with `full = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CivilDate {
    pub year: i64,
    pub month: Month,
    pub day: i64,
    /// Zero-based day of the year.
    pub yday: i64,
}

/// Folds an absolute-timeline second into a calendar date.
pub(crate) fn absolute_date(abs: u64, full: bool) -> CivilDate {
    let mut d = abs / SECONDS_PER_DAY as u64;

    // 400-year cycles.
    let mut n = d / DAYS_PER_400_YEARS;
    let mut y = 400 * n;
    d -= DAYS_PER_400_YEARS * n;

    // 100-year cycles. The last cycle has one extra leap day, so on the last
    // day of a 400-year cycle n comes out as 4; n >> 2 pulls it back to 3.
    n = d / DAYS_PER_100_YEARS;
    n -= n >> 2;
    y += 100 * n;
    d -= DAYS_PER_100_YEARS * n;

    // 4-year cycles. The last one may lack its leap day, which is harmless here.
    n = d / DAYS_PER_4_YEARS;
    y += 4 * n;
    d -= DAYS_PER_4_YEARS * n;

    // Years within a 4-year cycle. Same last-day correction as above.
    n = d / 365;
    n -= n >> 2;
    y += n;
    d -= 365 * n;

    let year = (y as i64).wrapping_add(ABSOLUTE_ZERO_YEAR);
    let yday = d as i64;

    let mut date = CivilDate {
        year,
        month: Month(0),
        day: 0,
        yday,
    };
    if !full {
        return date;
    }

    let mut day = yday;
    if is_leap(year) {
        if day > 31 + 29 - 1 {
            // Past the leap day; fold as if it were absent.
            day -= 1;
        } else if day == 31 + 29 - 1 {
            date.month = Month::FEBRUARY;
            date.day = 29;
            return date;
        }
    }

    // Assume 31-day months; the estimate is at most one month low.
    let mut month = day / 31;
    let end = DAYS_BEFORE[(month + 1) as usize];
    let begin = if day >= end {
        month += 1;
        end
    } else {
        DAYS_BEFORE[month as usize]
    };

    date.month = Month(month + 1);
    date.day = day - begin + 1;
    date
}

/// Days from the absolute zero to January 1 of `year`.
pub(crate) fn days_since_epoch(year: i64) -> u64 {
    let mut y = year.wrapping_sub(ABSOLUTE_ZERO_YEAR) as u64;

    let mut n = y / 400;
    y -= 400 * n;
    let mut d = DAYS_PER_400_YEARS.wrapping_mul(n);

    n = y / 100;
    y -= 100 * n;
    d = d.wrapping_add(DAYS_PER_100_YEARS * n);

    n = y / 4;
    y -= 4 * n;
    d = d.wrapping_add(DAYS_PER_4_YEARS * n);

    d.wrapping_add(365 * y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(2000 => true; "divisible by 400")]
    #[test_case(1900 => false; "century")]
    #[test_case(2024 => true; "divisible by 4")]
    #[test_case(2023 => false; "common year")]
    #[test_case(0 => true; "year zero")]
    #[test_case(-4 => true; "negative leap")]
    #[test_case(-100 => false; "negative century")]
    fn leap_years(year: i64) -> bool {
        is_leap(year)
    }

    #[test_case(0, 61, 60 => (1, 1); "carry up")]
    #[test_case(5, -1, 60 => (4, 59); "borrow one")]
    #[test_case(0, -120, 60 => (-2, 0); "borrow exact")]
    #[test_case(0, -121, 60 => (-3, 59); "borrow past")]
    #[test_case(2023, 12, 12 => (2024, 0); "thirteenth month")]
    fn norm_carries(hi: i64, lo: i64, base: i64) -> (i64, i64) {
        norm(hi, lo, base)
    }

    #[test]
    fn month_names() {
        assert_eq!(Month::JANUARY.to_string(), "January");
        assert_eq!(Month::DECEMBER.to_string(), "December");
        assert_eq!(Month::new(13).to_string(), "%!Month(13)");
        assert_eq!(Month::new(-1).to_string(), "%!Month(18446744073709551615)");
    }

    #[test]
    fn weekday_names() {
        assert_eq!(Weekday::SUNDAY.to_string(), "Sunday");
        assert_eq!(Weekday::SATURDAY.to_string(), "Saturday");
        assert_eq!(Weekday::new(7).to_string(), "%!Weekday(7)");
    }

    #[test]
    fn days_in_february() {
        assert_eq!(days_in(2, 2024), 29);
        assert_eq!(days_in(2, 2023), 28);
        assert_eq!(days_in(2, 1900), 28);
        assert_eq!(days_in(12, 2023), 31);
        assert_eq!(days_in(4, 2023), 30);
    }

    #[test]
    fn year_start_round_trips_through_folding() {
        for year in [1, 4, 100, 400, 1600, 1900, 1970, 2000, 2100, 9999] {
            let abs = days_since_epoch(year) * SECONDS_PER_DAY as u64;
            let date = absolute_date(abs, true);
            assert_eq!((date.year, date.month, date.day), (year, Month::JANUARY, 1));
            assert_eq!(date.yday, 0);
        }
    }

    #[test]
    fn last_day_of_400_year_cycle_is_december_31() {
        // 2001 starts a 400-year cycle, so the day before is day 146096 of the previous one.
        let abs = (days_since_epoch(2001) - 1) * SECONDS_PER_DAY as u64;
        let date = absolute_date(abs, true);
        assert_eq!((date.year, date.month, date.day), (2000, Month::DECEMBER, 31));
        assert_eq!(date.yday, 365);
    }
}
