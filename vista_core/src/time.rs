// Copyright 2026 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time in microsecond ticks.
//!
//! [`HostTime`] is a point on the host's frame clock. Browsers hand
//! `requestAnimationFrame` callbacks a `DOMHighResTimeStamp` in fractional
//! milliseconds; backends convert that to whole microseconds so that all
//! arithmetic in the core stays in integers.
//!
//! [`Duration`] is a span in the same tick units.

use core::fmt;
use core::ops::Add;

/// Ticks per millisecond.
const TICKS_PER_MS: u64 = 1_000;

/// A point in time expressed as monotonic microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Microseconds.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Converts a host timestamp in fractional milliseconds (as delivered by
    /// `performance.now()` and `requestAnimationFrame`) to ticks.
    ///
    /// Negative and non-finite inputs map to zero.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "host timestamps are small positive f64; microseconds fit in u64"
    )]
    pub fn from_millis_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Self((ms * TICKS_PER_MS as f64) as u64)
        } else {
            Self(0)
        }
    }

    /// Time elapsed since `earlier`, clamped to zero.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}µs)", self.0)
    }
}

/// A duration in microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// No time at all.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms * TICKS_PER_MS)
    }

    /// Microseconds.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}µs)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_convert_to_microsecond_ticks() {
        assert_eq!(HostTime::from_millis_f64(16.5), HostTime(16_500));
        assert_eq!(Duration::from_millis(2000).ticks(), 2_000_000);
    }

    #[test]
    fn bogus_timestamps_clamp_to_zero() {
        assert_eq!(HostTime::from_millis_f64(-3.0), HostTime(0));
        assert_eq!(HostTime::from_millis_f64(f64::NAN), HostTime(0));
    }

    #[test]
    fn clock_arithmetic_saturates() {
        let t = HostTime(1000);
        let d = Duration(200);
        assert_eq!((t + d).ticks(), 1200);
        assert_eq!(t.saturating_duration_since(HostTime(1500)), Duration::ZERO);
        assert_eq!(t.saturating_duration_since(HostTime(400)), Duration(600));
        assert_eq!(HostTime(u64::MAX) + Duration(1), HostTime(u64::MAX));
    }
}
