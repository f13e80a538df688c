//! Monotonic time sources for timeout primitives.
//!
//! Everything in this workspace measures elapsed time against a [`Clock`],
//! a nanosecond-resolution monotonic reading. The owning subsystem decides
//! where that reading comes from: in a kernel it is the timer tick, in tests
//! it is a hand-advanced counter. [`TickClock`] serves both roles.

use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;

pub const NSEC_PER_MSEC: u64 = 1_000_000;
pub const NSEC_PER_SEC: u64 = 1_000_000_000;

/// A monotonic nanosecond time source.
///
/// Readings must never decrease. Absolute origin is meaningless; only
/// differences between readings are.
pub trait Clock {
    fn now_ns(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ns(&self) -> u64 {
        (**self).now_ns()
    }
}

/// Tick-driven monotonic clock.
///
/// An atomic nanosecond counter advanced by whoever owns the time base,
/// typically a periodic timer interrupt calling [`TickClock::advance`] once
/// per tick. One `TickClock` is meant to feed many consumers through shared
/// references.
///
/// Advancing uses `fetch_add`/`fetch_max`, so the counter is monotone no
/// matter how callers race.
pub struct TickClock {
    ns: AtomicU64,
}

impl TickClock {
    #[inline]
    pub const fn new() -> Self {
        Self {
            ns: AtomicU64::new(0),
        }
    }

    /// Advance the clock by one tick period.
    #[inline]
    pub fn advance(&self, period: Duration) {
        self.advance_ns(period.as_nanos() as u64);
    }

    #[inline]
    pub fn advance_ns(&self, ns: u64) {
        self.ns.fetch_add(ns, Ordering::AcqRel);
    }

    /// Move the clock forward to an absolute reading. Readings in the past
    /// are ignored rather than rewinding the counter.
    #[inline]
    pub fn advance_to_ns(&self, ns: u64) {
        self.ns.fetch_max(ns, Ordering::AcqRel);
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        self.ns.load(Ordering::Acquire)
    }
}
