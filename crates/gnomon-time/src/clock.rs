//! Host clock capability.
//!
//! Reading the wall clock is the only non-deterministic input to this crate.
//! It is modelled as a [`Clock`] value that the host passes in, so everything
//! else stays pure and tests can pin time with a [`FixedClock`].
//!
//! - **Production**: [`SystemClock`] reads the host wall clock
//! - **Tests / replay**: [`FixedClock`] returns a configured instant and only
//!   moves when told to

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::duration::Duration;
use crate::time::Time;

/// One reading of the host clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallReading {
    /// Seconds since the Unix epoch.
    pub sec: i64,
    /// Nanoseconds within the second, in `[0, 1e9)`.
    pub nsec: i32,
    /// Opaque monotonic marker. Not used for calendar math.
    pub mono: i64,
}

/// A source of "now".
///
/// Implementations must be `Send + Sync` so a single clock can be shared by
/// concurrent callers.
pub trait Clock: Send + Sync {
    fn read(&self) -> WallReading;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn read(&self) -> WallReading {
        (**self).read()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn read(&self) -> WallReading {
        (**self).read()
    }
}

// ============================================================================
// Production Implementation
// ============================================================================

/// Host wall clock.
///
/// The monotonic marker is nanoseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn read(&self) -> WallReading {
        let mono = i64::try_from(self.start.elapsed().as_nanos()).unwrap_or(i64::MAX);
        let (sec, nsec) = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => (after.as_secs() as i64, after.subsec_nanos() as i32),
            // Host clock set before 1970: mirror the offset below the epoch.
            Err(err) => {
                let before = err.duration();
                let mut sec = -(before.as_secs() as i64);
                let mut nsec = -(before.subsec_nanos() as i32);
                if nsec < 0 {
                    nsec += 1_000_000_000;
                    sec -= 1;
                }
                (sec, nsec)
            }
        };
        tracing::trace!(sec, nsec, mono, "read host clock");
        WallReading { sec, nsec, mono }
    }
}

// ============================================================================
// Deterministic Implementation
// ============================================================================

/// Clock frozen at a chosen instant.
///
/// Advances only through [`advance`](Self::advance) and [`set`](Self::set).
/// The monotonic marker counts nanoseconds advanced since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: Time,
    mono: i64,
}

impl FixedClock {
    pub fn new(now: Time) -> Self {
        Self { now, mono: 0 }
    }

    /// Clock frozen at `sec` seconds after the Unix epoch.
    pub fn at_unix(sec: i64) -> Self {
        Self::new(Time::from_unix(sec, 0))
    }

    /// Moves the clock by `d`, which may be negative.
    pub fn advance(&mut self, d: Duration) {
        self.now = self.now + d;
        self.mono = self.mono.saturating_add(d.nanoseconds());
    }

    /// Jumps the wall reading to `now`. The monotonic marker is unchanged.
    pub fn set(&mut self, now: Time) {
        self.now = now;
    }

    pub fn current(&self) -> Time {
        self.now
    }
}

impl Clock for FixedClock {
    fn read(&self) -> WallReading {
        WallReading {
            sec: self.now.unix(),
            nsec: self.now.nanosecond() as i32,
            mono: self.mono,
        }
    }
}
