//! Panel post-processing configuration types and the backend seam.
//!
//! The flicker-free pipeline does not talk to display hardware itself; it
//! hands finished dither and pixel-correction configurations to a
//! [`PanelBackend`] supplied by the embedding display driver. Tests plug in
//! a recording backend at the same seam.

use bitflags::bitflags;

bitflags! {
    /// Operations requested of the panel post-processing block.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct PushOps: u32 {
        const WRITE = 1 << 0;
        const ENABLE = 1 << 1;
        const DISABLE = 1 << 2;
    }
}

/// Pixel-correction scale for the display block, one value per channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PccConfig {
    pub ops: PushOps,
    pub r: u32,
    pub g: u32,
    pub b: u32,
}

/// Dither depth configuration for the display block.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DitherConfig {
    pub flags: PushOps,
    pub r_cr_depth: u32,
    pub g_y_depth: u32,
    pub b_cb_depth: u32,
    pub temporal_en: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PanelError {
    /// The hardware rejected or failed the configuration write.
    Hardware,
}

/// Display-driver side of the pipeline.
///
/// Implementations may be called from the backlight update path and must
/// not block indefinitely.
pub trait PanelBackend: Sync {
    fn push_dither(&self, config: &DitherConfig) -> Result<(), PanelError>;
    fn push_pcc(&self, config: &PccConfig) -> Result<(), PanelError>;
}
