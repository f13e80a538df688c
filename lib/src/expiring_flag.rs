//! Expiring flag: a cached "has duration D elapsed since the last reset?"
//! boolean shared between many hot readers and occasional writers.
//!
//! The type exists for call sites where blocking is unacceptable (per
//! scheduling decision, per frame). The elapsed-time recompute needs a clock
//! read and a comparison, and that work is admitted to at most one caller at
//! a time through a non-blocking soft lock; everyone else gets the cached
//! answer immediately. Staleness is the accepted trade: the flag may report
//! not-expired for a short interval after the true deadline under sustained
//! contention, but it never reports expired before the duration has truly
//! elapsed.
//!
//! # Memory Ordering
//!
//! - The cached flag is read with `Acquire` and written with `Release`, so a
//!   reader observing `EXPIRED` also observes the timestamp that produced it.
//! - `touch` publishes the new timestamp (`fetch_max`, `AcqRel`) *before*
//!   clearing the cached flag (`Release`); no reader can cache a negative
//!   computed against a deadline older than a committed reset.
//! - The soft-lock counter uses `Acquire` on entry and `Release` on exit,
//!   bracketing the recompute/reset critical section.

use core::fmt;
use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use core::time::Duration;

use crate::clock::Clock;

/// A shared elapsed-time flag with a sticky cached result.
///
/// Two logical states: `ARMED` (clock running, duration not yet confirmed
/// elapsed) and `EXPIRED` (elapsed, cached, sticky until the next
/// [`touch`](Self::touch)). Construct one per logical timeout and share it
/// by reference; both operations take `&self` and neither ever blocks.
pub struct ExpiringFlag<C: Clock> {
    clock: C,
    /// Elapsed-time threshold in nanoseconds. Immutable after construction.
    duration_ns: u64,
    /// Monotonic timestamp of the most recent committed reset.
    last_reset: AtomicU64,
    /// Cached result of the last successful recompute. Sticky per epoch.
    expired: AtomicBool,
    /// Soft-lock entrant counter. First entrant (observed zero) owns the
    /// critical section; everyone else backs out without waiting.
    entrants: AtomicU32,
}

impl<C: Clock> ExpiringFlag<C> {
    /// Create an armed flag whose clock starts running now.
    ///
    /// Panics if `duration` is zero; a flag that is born expired is a
    /// programmer error, not a runtime condition.
    pub fn new(duration: Duration, clock: C) -> Self {
        let duration_ns = duration.as_nanos() as u64;
        assert!(duration_ns > 0, "ExpiringFlag duration must be non-zero");
        let start = clock.now_ns();
        Self {
            clock,
            duration_ns,
            last_reset: AtomicU64::new(start),
            expired: AtomicBool::new(false),
            entrants: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.duration_ns)
    }

    /// Hot-path query: has the duration elapsed since the last reset?
    ///
    /// Never blocks and reads the clock at most once. An already-cached
    /// `EXPIRED` returns immediately without touching the soft lock. When
    /// the recompute is contended the current cached value is returned
    /// instead; availability wins over precision here.
    #[inline]
    pub fn check_expired(&self) -> bool {
        if self.expired.load(Ordering::Acquire) {
            return true;
        }

        if self.entrants.fetch_add(1, Ordering::Acquire) == 0 {
            let now = self.clock.now_ns();
            let last = self.last_reset.load(Ordering::Acquire);
            // saturating: a racing touch may commit a timestamp newer than
            // the `now` sampled above, which must read as zero elapsed.
            if now.saturating_sub(last) >= self.duration_ns {
                self.expired.store(true, Ordering::Release);
            }
        }
        let expired = self.expired.load(Ordering::Acquire);
        self.entrants.fetch_sub(1, Ordering::Release);
        expired
    }

    /// Reset the clock, clearing any cached `EXPIRED` state.
    ///
    /// Unlike a contended recompute, a reset cannot be skipped: the call
    /// retries until it either owns the critical section itself or observes
    /// that a fellow writer committed a timestamp at least as new as this
    /// call's own. Ties between racing writers go to the largest timestamp,
    /// never the last caller to finish, so reordering under preemption
    /// cannot move a reset backward in time.
    pub fn touch(&self) {
        let now = self.clock.now_ns();
        loop {
            if self.entrants.fetch_add(1, Ordering::Acquire) == 0 {
                let prev = self.last_reset.fetch_max(now, Ordering::AcqRel);
                if prev <= now {
                    self.expired.store(false, Ordering::Release);
                }
                self.entrants.fetch_sub(1, Ordering::Release);
                return;
            }
            self.entrants.fetch_sub(1, Ordering::Release);

            // A newer reset is already committed; ours is subsumed.
            if self.last_reset.load(Ordering::Acquire) >= now {
                return;
            }
            spin_loop();
        }
    }
}

impl<C: Clock> fmt::Debug for ExpiringFlag<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.expired.load(Ordering::Acquire) {
            "EXPIRED"
        } else {
            "ARMED"
        };
        f.debug_struct("ExpiringFlag")
            .field("duration_ns", &self.duration_ns)
            .field("last_reset", &self.last_reset.load(Ordering::Acquire))
            .field("state", &state)
            .finish()
    }
}
