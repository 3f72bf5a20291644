//! Monotonic timestamps in seconds and a simple wall-clock stopwatch.
//!
//! Timestamps are plain `f64` seconds ([`TimeStamp`]) measured from an arbitrary,
//! fixed origin, which keeps interval arithmetic and human-readable reporting
//! trivial: `time_stamp() - start` is the elapsed time in seconds.

#[cfg_attr(unix, path = "clock_unix.rs")]
#[cfg_attr(not(unix), path = "clock_fallback.rs")]
mod clock;

pub mod stopwatch;

pub use stopwatch::Stopwatch;

/// Seconds since an arbitrary fixed origin.
pub type TimeStamp = f64;

pub const SECOND: TimeStamp = 1.0;
pub const MINUTE: TimeStamp = 60.0 * SECOND;
pub const HOUR: TimeStamp = 60.0 * MINUTE;
pub const DAY: TimeStamp = 24.0 * HOUR;

/// Returns a high-resolution monotonic timestamp.
#[inline]
pub fn time_stamp() -> TimeStamp {
    clock::precise_seconds()
}

/// Returns a monotonic timestamp that is cheaper to read than [`time_stamp`] but
/// only accurate to a few milliseconds.
#[inline]
pub fn time_stamp_low() -> TimeStamp {
    clock::coarse_seconds()
}
