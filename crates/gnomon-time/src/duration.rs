//! Signed nanosecond durations.

use std::fmt::{self, Display};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Elapsed time between two instants as a signed 64-bit nanosecond count.
///
/// The range is roughly ±292 years. Arithmetic operators saturate at
/// [`Duration::MIN`] / [`Duration::MAX`] instead of wrapping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration(i64);

impl Duration {
    pub const ZERO: Duration = Duration(0);
    pub const NANOSECOND: Duration = Duration(1);
    pub const MICROSECOND: Duration = Duration(1_000);
    pub const MILLISECOND: Duration = Duration(1_000_000);
    pub const SECOND: Duration = Duration(1_000_000_000);
    pub const MINUTE: Duration = Duration(60 * 1_000_000_000);
    pub const HOUR: Duration = Duration(60 * 60 * 1_000_000_000);

    pub const MIN: Duration = Duration(i64::MIN);
    pub const MAX: Duration = Duration(i64::MAX);

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Integer nanosecond count.
    pub const fn nanoseconds(self) -> i64 {
        self.0
    }

    /// Integer microsecond count, truncated toward zero.
    pub const fn microseconds(self) -> i64 {
        self.0 / 1_000
    }

    /// Integer millisecond count, truncated toward zero.
    pub const fn milliseconds(self) -> i64 {
        self.0 / 1_000_000
    }

    // The float accessors split integer and fractional parts first so that
    // converting the result back to an integer rounds the way pure integer
    // division would.

    /// Duration as floating-point seconds.
    pub fn seconds(self) -> f64 {
        let sec = self.0 / Self::SECOND.0;
        let nsec = self.0 % Self::SECOND.0;
        sec as f64 + nsec as f64 / 1e9
    }

    /// Duration as floating-point minutes.
    pub fn minutes(self) -> f64 {
        let min = self.0 / Self::MINUTE.0;
        let nsec = self.0 % Self::MINUTE.0;
        min as f64 + nsec as f64 / (60.0 * 1e9)
    }

    /// Duration as floating-point hours.
    pub fn hours(self) -> f64 {
        let hour = self.0 / Self::HOUR.0;
        let nsec = self.0 % Self::HOUR.0;
        hour as f64 + nsec as f64 / (60.0 * 60.0 * 1e9)
    }

    /// Rounds toward zero to a multiple of `m`. No-op when `m <= 0`.
    pub fn truncate(self, m: Duration) -> Duration {
        if m.0 <= 0 {
            return self;
        }
        Duration(self.0 - self.0 % m.0)
    }

    /// Rounds to the nearest multiple of `m`, halfway values away from zero.
    ///
    /// Saturates at [`Duration::MIN`] / [`Duration::MAX`]. No-op when `m <= 0`.
    pub fn round(self, m: Duration) -> Duration {
        if m.0 <= 0 {
            return self;
        }
        let d = self.0;
        let mut r = d % m.0;
        if d < 0 {
            r = -r;
            if less_than_half(r, m.0) {
                return Duration(d + r);
            }
            let d1 = d.wrapping_sub(m.0).wrapping_add(r);
            if d1 < d {
                return Duration(d1);
            }
            return Duration::MIN;
        }
        if less_than_half(r, m.0) {
            return Duration(d - r);
        }
        let d1 = d.wrapping_add(m.0).wrapping_sub(r);
        if d1 > d {
            return Duration(d1);
        }
        Duration::MAX
    }

    /// Absolute value. [`Duration::MIN`] maps to [`Duration::MAX`].
    pub fn abs(self) -> Duration {
        match self.0 {
            d if d >= 0 => self,
            i64::MIN => Duration::MAX,
            d => Duration(-d),
        }
    }
}

/// Reports whether `x + x < y` without overflowing, for non-negative `x`, `y`.
fn less_than_half(x: i64, y: i64) -> bool {
    (x as u64).wrapping_add(x as u64) < y as u64
}

impl From<i64> for Duration {
    fn from(nanos: i64) -> Self {
        Self(nanos)
    }
}

impl From<Duration> for i64 {
    fn from(d: Duration) -> Self {
        d.0
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Self::Output {
        Duration(self.0.saturating_neg())
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: i64) -> Self::Output {
        Duration(self.0.saturating_mul(rhs))
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Renders the form `72h3m0.5s`.
///
/// Leading zero units are omitted. Durations under one second switch to
/// `ms`, `µs` or `ns` so the leading digit is non-zero. Hours are the
/// largest unit because day length depends on the calendar. Zero is `0s`.
impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Largest output is "-2562047h47m16.854775808s".
        let mut buf = [0u8; 32];
        let mut w = buf.len();

        let neg = self.0 < 0;
        let mut u = if neg {
            (self.0 as u64).wrapping_neg()
        } else {
            self.0 as u64
        };

        if u < Duration::SECOND.0 as u64 {
            let prec;
            w -= 1;
            buf[w] = b's';
            w -= 1;
            if u == 0 {
                return f.write_str("0s");
            } else if u < Duration::MICROSECOND.0 as u64 {
                prec = 0;
                buf[w] = b'n';
            } else if u < Duration::MILLISECOND.0 as u64 {
                prec = 3;
                // U+00B5 MICRO SIGN is two bytes in UTF-8.
                w -= 1;
                buf[w..w + 2].copy_from_slice("µ".as_bytes());
            } else {
                prec = 6;
                buf[w] = b'm';
            }
            (w, u) = fmt_frac(&mut buf[..w], u, prec);
            w = fmt_int(&mut buf[..w], u);
        } else {
            w -= 1;
            buf[w] = b's';

            (w, u) = fmt_frac(&mut buf[..w], u, 9);

            // Integer seconds.
            w = fmt_int(&mut buf[..w], u % 60);
            u /= 60;

            if u > 0 {
                w -= 1;
                buf[w] = b'm';
                w = fmt_int(&mut buf[..w], u % 60);
                u /= 60;

                if u > 0 {
                    w -= 1;
                    buf[w] = b'h';
                    w = fmt_int(&mut buf[..w], u);
                }
            }
        }

        if neg {
            w -= 1;
            buf[w] = b'-';
        }

        let text = std::str::from_utf8(&buf[w..]).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }
}

/// Writes the fraction `v / 10^prec` (e.g. `.12345`) into the tail of `buf`,
/// dropping trailing zeros and the decimal point when the fraction is zero.
/// Returns the start index of the written bytes and `v / 10^prec`.
fn fmt_frac(buf: &mut [u8], mut v: u64, prec: usize) -> (usize, u64) {
    let mut w = buf.len();
    let mut print = false;
    for _ in 0..prec {
        let digit = v % 10;
        print = print || digit != 0;
        if print {
            w -= 1;
            buf[w] = digit as u8 + b'0';
        }
        v /= 10;
    }
    if print {
        w -= 1;
        buf[w] = b'.';
    }
    (w, v)
}

/// Writes `v` in decimal into the tail of `buf`, returning the start index.
fn fmt_int(buf: &mut [u8], mut v: u64) -> usize {
    let mut w = buf.len();
    if v == 0 {
        w -= 1;
        buf[w] = b'0';
    } else {
        while v > 0 {
            w -= 1;
            buf[w] = (v % 10) as u8 + b'0';
            v /= 10;
        }
    }
    w
}
