#![cfg_attr(not(test), no_std)]

pub mod flicker;
pub mod panel;

pub use flicker::{
    BACKLIGHT_INDEX, DEFAULT_ELVSS_OFF_THRESHOLD, FF_MAX_SCALE, FF_MIN_SCALE, FlickerFree,
    PUSH_WINDOW_NS, depth_for_scale, scale_for_backlight,
};
pub use panel::{DitherConfig, PanelBackend, PanelError, PccConfig, PushOps};
