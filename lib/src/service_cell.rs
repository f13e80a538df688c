//! Register-once cell for process-wide service tables.
//!
//! Eliminates duplicated `AtomicPtr` boilerplate wherever a subsystem
//! publishes a callback table exactly once at startup (the klog sink, for
//! instance) and everyone else reads it lock-free afterwards.

use core::sync::atomic::{AtomicPtr, Ordering};

/// A cell holding at most one `&'static T`, registered once.
pub struct ServiceCell<T> {
    ptr: AtomicPtr<T>,
    name: &'static str,
}

// SAFETY: Only stores pointers to 'static T; AtomicPtr provides synchronization.
unsafe impl<T> Sync for ServiceCell<T> {}

impl<T> ServiceCell<T> {
    /// Create an empty cell. `name` appears in panic messages.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            ptr: AtomicPtr::new(core::ptr::null_mut()),
            name,
        }
    }

    /// Publish the service table. Panics on a second registration; doing it
    /// twice is a wiring bug, not a runtime condition.
    #[inline]
    pub fn register(&self, table: &'static T) {
        let prev = self
            .ptr
            .swap(table as *const T as *mut T, Ordering::Release);
        assert!(prev.is_null(), "{} already registered", self.name);
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        !self.ptr.load(Ordering::Acquire).is_null()
    }

    /// Read the table, or `None` before registration.
    #[inline]
    pub fn try_get(&self) -> Option<&'static T> {
        let ptr = self.ptr.load(Ordering::Acquire);
        if ptr.is_null() {
            None
        } else {
            // SAFETY: Only valid &'static T pointers are ever stored.
            Some(unsafe { &*ptr })
        }
    }
}
