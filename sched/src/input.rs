//! Input event model and listener routing.
//!
//! Interrupt-adjacent device drivers call [`InputRouter::dispatch`] with a
//! classified event; every registered listener whose device match accepts
//! the event's capability classes is forwarded the event. Listener slots are
//! a fixed-size array behind a mutex; registration is rare, dispatch holds
//! the lock only for the forwarding walk.

use bitflags::bitflags;
use spin::Mutex;

use lapse_lib::klog_debug;

/// Maximum number of registered listeners.
pub const MAX_LISTENERS: usize = 8;

bitflags! {
    /// Capability classes an input event carries, mirroring the event bits
    /// a device advertises.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct EventClass: u32 {
        /// Key or button press/release.
        const KEY = 1 << 0;
        /// Absolute axis motion.
        const ABS = 1 << 1;
        /// Multi-touch position reporting.
        const MT_POSITION = 1 << 2;
        /// Touch contact state.
        const BTN_TOUCH = 1 << 3;
    }
}

/// One device-match rule: the event classes a device must all advertise.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DeviceMatch {
    required: EventClass,
}

impl DeviceMatch {
    /// Multi-touch touchscreen: absolute axes with multi-touch positions.
    pub const TOUCHSCREEN: Self =
        Self::new(EventClass::ABS.union(EventClass::MT_POSITION));
    /// Touchpad: absolute axes with a touch contact button.
    pub const TOUCHPAD: Self = Self::new(EventClass::ABS.union(EventClass::BTN_TOUCH));
    /// Keypad: anything that emits key events.
    pub const KEYPAD: Self = Self::new(EventClass::KEY);

    pub const fn new(required: EventClass) -> Self {
        Self { required }
    }

    #[inline]
    pub fn accepts(&self, classes: EventClass) -> bool {
        classes.contains(self.required)
    }
}

/// A classified input event.
#[derive(Clone, Copy, Debug)]
pub struct InputEvent {
    pub classes: EventClass,
    pub code: u16,
    pub value: i32,
    pub timestamp_ns: u64,
}

impl InputEvent {
    /// Key press or release.
    pub fn key(code: u16, pressed: bool, timestamp_ns: u64) -> Self {
        Self {
            classes: EventClass::KEY,
            code,
            value: pressed as i32,
            timestamp_ns,
        }
    }

    /// Multi-touch position report from a touchscreen.
    pub fn touch_position(code: u16, position: i32, timestamp_ns: u64) -> Self {
        Self {
            classes: EventClass::ABS.union(EventClass::MT_POSITION),
            code,
            value: position,
            timestamp_ns,
        }
    }

    /// Touch contact from a touchpad.
    pub fn touch_contact(down: bool, timestamp_ns: u64) -> Self {
        Self {
            classes: EventClass::ABS.union(EventClass::BTN_TOUCH),
            code: 0,
            value: down as i32,
            timestamp_ns,
        }
    }
}

/// Receives events whose device match accepted them.
///
/// Called with the router lock held, possibly from interrupt-adjacent
/// context; implementations must not block.
pub trait InputListener: Sync {
    fn event(&self, event: &InputEvent);
}

/// Handle returned by [`InputRouter::register`], used to unregister.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ListenerId(usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RouterError {
    /// All listener slots are occupied.
    Full,
}

#[derive(Clone, Copy)]
struct Slot<'a> {
    listener: &'a dyn InputListener,
    matches: &'a [DeviceMatch],
}

/// Fixed-slot listener registry.
pub struct InputRouter<'a> {
    slots: Mutex<[Option<Slot<'a>>; MAX_LISTENERS]>,
}

impl<'a> InputRouter<'a> {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new([None; MAX_LISTENERS]),
        }
    }

    /// Register a listener with its device-match table. The listener is
    /// forwarded every dispatched event at least one rule accepts.
    pub fn register(
        &self,
        listener: &'a dyn InputListener,
        matches: &'a [DeviceMatch],
    ) -> Result<ListenerId, RouterError> {
        let mut slots = self.slots.lock();
        for (i, slot) in slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(Slot { listener, matches });
                klog_debug!("input: listener registered in slot {}", i);
                return Ok(ListenerId(i));
            }
        }
        Err(RouterError::Full)
    }

    /// Drop a registration. Unknown ids are ignored.
    pub fn unregister(&self, id: ListenerId) {
        let mut slots = self.slots.lock();
        if id.0 < MAX_LISTENERS {
            slots[id.0] = None;
        }
    }

    /// Forward an event to every listener whose match table accepts it.
    pub fn dispatch(&self, event: &InputEvent) {
        let slots = self.slots.lock();
        for slot in slots.iter().flatten() {
            if slot.matches.iter().any(|m| m.accepts(event.classes)) {
                slot.listener.event(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.slots.lock().iter().filter(|s| s.is_some()).count()
    }
}

impl<'a> Default for InputRouter<'a> {
    fn default() -> Self {
        Self::new()
    }
}
