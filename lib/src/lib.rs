#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod expiring_flag;
pub mod klog;
pub mod math;
pub mod service_cell;

pub use clock::{Clock, NSEC_PER_MSEC, NSEC_PER_SEC, TickClock};
pub use expiring_flag::ExpiringFlag;
pub use klog::{KlogLevel, KlogSink, klog_attach_sink, klog_get_level, klog_set_level};
pub use math::{clamp_i32, clamp_u32, max_i32, max_u32, min_i32, min_u32};
pub use service_cell::ServiceCell;
