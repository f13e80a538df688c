//! Flicker-free backlight compensation for OLED panels.
//!
//! Low backlight levels flicker on OLED hardware. Below a panel-specific
//! threshold the pipeline holds the reported backlight at the threshold and
//! instead darkens the image through the pixel-correction block, with the
//! dither depth derived from the applied scale. Identical configurations
//! are not re-pushed while the last push is still fresh; the push window
//! rides on [`ExpiringFlag`] so the backlight path never blocks on it.

use core::time::Duration;

use spin::Mutex;

use lapse_lib::{Clock, ExpiringFlag, NSEC_PER_MSEC, clamp_i32, clamp_u32, klog_info, max_i32, max_u32};

use crate::panel::{DitherConfig, PanelBackend, PanelError, PccConfig, PushOps};

/// Maximum value of the per-channel pixel-correction scale.
pub const FF_MAX_SCALE: u32 = 32_768;

/// Minimum recommended per-channel scale.
pub const FF_MIN_SCALE: u32 = 2_560;

/// Number of backlight table entries.
pub const BACKLIGHT_INDEX: usize = 66;

/// Default minimum backlight value that does not flicker.
pub const DEFAULT_ELVSS_OFF_THRESHOLD: u32 = 66;

/// An unchanged configuration is not re-pushed within this window.
pub const PUSH_WINDOW_NS: u64 = 100 * NSEC_PER_MSEC;

/// Backlight level to pixel-correction curve, measured on panel.
const BKL_TO_PCC: [u32; BACKLIGHT_INDEX] = [
    42, 56, 67, 75, 84, 91, 98, 104, 109, 114, 119, 124, 128, 133, 136,
    140, 143, 146, 150, 152, 156, 159, 162, 165, 168, 172, 176, 178, 181,
    184, 187, 189, 192, 194, 196, 199, 202, 204, 206, 209, 211, 213, 215,
    217, 220, 222, 224, 226, 228, 230, 233, 236, 237, 239, 241, 241, 243,
    245, 246, 249, 249, 250, 252, 254, 255, 256,
];

/// Dither depth ladder: index is the depth, value the minimum scale for it.
const PCC_DEPTH: [u32; 9] = [128, 256, 512, 1_024, 2_048, 4_096, 8_192, 16_384, 32_768];

/// Map a backlight level to the pixel-correction scale for it.
pub fn scale_for_backlight(bl_lvl: u32, threshold: u32) -> u32 {
    let span = max_i32(threshold as i32 - 1, 1);
    let index = clamp_i32(
        ((bl_lvl as i32 - 1) * (BACKLIGHT_INDEX as i32 - 1)) / span + 1,
        1,
        BACKLIGHT_INDEX as i32,
    );
    clamp_u32(
        0x80 * BKL_TO_PCC[(index - 1) as usize],
        FF_MIN_SCALE,
        FF_MAX_SCALE,
    )
}

/// Deepest dither setting the given scale still supports.
pub fn depth_for_scale(scale: u32) -> u32 {
    (1..=8u32)
        .rev()
        .find(|&depth| scale >= PCC_DEPTH[depth as usize])
        .unwrap_or(0)
}

struct FlickerState {
    /// User-facing toggle for the whole feature.
    enabled: bool,
    /// Whether compensation is currently applied to the panel.
    pcc_enabled: bool,
    /// Minimum backlight value that does not flicker.
    threshold: u32,
    /// Scale of the last committed push, for suppression.
    last_scale: u32,
}

/// The flicker-free pipeline.
///
/// Owned by the display driver; `calc_backlight` is called on every
/// backlight update with the requested level and returns the level the
/// panel should actually be driven at.
pub struct FlickerFree<'a, C: Clock> {
    backend: &'a dyn PanelBackend,
    push_window: ExpiringFlag<C>,
    state: Mutex<FlickerState>,
}

impl<'a, C: Clock> FlickerFree<'a, C> {
    pub fn new(clock: C, backend: &'a dyn PanelBackend) -> Self {
        Self {
            backend,
            push_window: ExpiringFlag::new(Duration::from_nanos(PUSH_WINDOW_NS), clock),
            state: Mutex::new(FlickerState {
                enabled: false,
                pcc_enabled: false,
                threshold: DEFAULT_ELVSS_OFF_THRESHOLD,
                last_scale: FF_MAX_SCALE,
            }),
        }
    }

    /// Compute the backlight level to drive, applying or withdrawing
    /// compensation as a side effect.
    ///
    /// Below the threshold with the feature enabled, compensation is pushed
    /// and the threshold is reported instead of `bl_lvl`; when the level
    /// leaves the compensated region the neutral scale is pushed once. A
    /// failed hardware push falls back to the uncompensated level.
    pub fn calc_backlight(&self, bl_lvl: u32) -> u32 {
        let mut state = self.state.lock();
        if state.enabled && bl_lvl < state.threshold {
            state.pcc_enabled = true;
            let scale = scale_for_backlight(bl_lvl, state.threshold);
            if self.push_compensation(&mut state, scale).is_ok() {
                return state.threshold;
            }
            bl_lvl
        } else if state.pcc_enabled {
            state.pcc_enabled = false;
            // Neutral scale; failure here leaves a stale correction that the
            // next backlight update retries.
            let threshold = state.threshold;
            let _ = self.push_compensation(&mut state, scale_for_backlight(threshold, threshold));
            bl_lvl
        } else {
            bl_lvl
        }
    }

    fn push_compensation(
        &self,
        state: &mut FlickerState,
        scale: u32,
    ) -> Result<(), PanelError> {
        if scale == state.last_scale && !self.push_window.check_expired() {
            return Ok(());
        }

        let depth = depth_for_scale(scale);
        let mut flags = PushOps::WRITE;
        flags |= if state.enabled {
            PushOps::ENABLE
        } else {
            PushOps::DISABLE
        };
        let dither = DitherConfig {
            flags,
            r_cr_depth: depth,
            g_y_depth: depth,
            b_cb_depth: depth,
            temporal_en: false,
        };

        let mut ops = PushOps::WRITE;
        ops |= if state.pcc_enabled {
            PushOps::ENABLE
        } else {
            PushOps::DISABLE
        };
        let pcc = PccConfig {
            ops,
            r: scale,
            g: scale,
            b: scale,
        };

        self.backend.push_dither(&dither)?;
        self.backend.push_pcc(&pcc)?;

        state.last_scale = scale;
        self.push_window.touch();
        Ok(())
    }

    /// Flip the user-facing toggle. Returns whether the state changed, the
    /// cue for the caller to refresh the backlight immediately.
    pub fn set_enabled(&self, on: bool) -> bool {
        let mut state = self.state.lock();
        if state.enabled == on {
            return false;
        }
        state.enabled = on;
        klog_info!(
            "video: flicker free {}",
            if on { "enabled" } else { "disabled" }
        );
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    pub fn set_threshold(&self, value: u32) {
        // Threshold 1 would zero the table divider.
        self.state.lock().threshold = max_u32(value, 2);
    }

    pub fn threshold(&self) -> u32 {
        self.state.lock().threshold
    }
}
