//! Interactivity signal for scheduling boosts.
//!
//! Any user-input event rearms a five-second window; while the window has
//! not expired, the scheduler treats the workload as interactive and keeps
//! boosting. The window query sits on the scheduling hot path, so it rides
//! on [`ExpiringFlag`] rather than anything that could block.

use core::time::Duration;

use lapse_lib::{Clock, ExpiringFlag, NSEC_PER_MSEC, klog_info};

use crate::input::{DeviceMatch, InputEvent, InputListener, InputRouter, ListenerId, RouterError};

/// Boosting applies within this time frame from the last input event.
pub const INTERACTIVE_INPUT_NS: u64 = 5_000 * NSEC_PER_MSEC;

/// Device rules the signal listens on: touchscreens, touchpads, keypads.
pub const INTERACTIVE_DEVICE_MATCHES: [DeviceMatch; 3] = [
    DeviceMatch::TOUCHSCREEN,
    DeviceMatch::TOUCHPAD,
    DeviceMatch::KEYPAD,
];

/// Tracks whether the user interacted recently.
///
/// Owned by the embedding scheduler and shared by reference with the input
/// path; both sides go through the non-blocking flag operations.
pub struct InteractiveSignal<C: Clock> {
    window: ExpiringFlag<C>,
}

impl<C: Clock> InteractiveSignal<C> {
    pub fn new(clock: C) -> Self {
        Self {
            window: ExpiringFlag::new(Duration::from_nanos(INTERACTIVE_INPUT_NS), clock),
        }
    }

    /// Record a user-input event, rearming the boost window.
    #[inline]
    pub fn note_event(&self) {
        self.window.touch();
    }

    /// Hot-path query: should interactive boosting still apply?
    #[inline]
    pub fn should_boost(&self) -> bool {
        !self.window.check_expired()
    }
}

impl<C: Clock + Sync> InteractiveSignal<C> {
    /// Register this signal on the router for the interactive device set.
    pub fn attach<'a>(&'a self, router: &InputRouter<'a>) -> Result<ListenerId, RouterError> {
        let id = router.register(self, &INTERACTIVE_DEVICE_MATCHES)?;
        klog_info!("sched: interactive signal listening for input");
        Ok(id)
    }
}

impl<C: Clock + Sync> InputListener for InteractiveSignal<C> {
    fn event(&self, _event: &InputEvent) {
        self.note_event();
    }
}
