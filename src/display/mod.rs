mod highgui;

pub use highgui::HighGuiDisplay;

use anyhow::Result;
use image::{GrayImage, RgbImage};

pub const LIVE_FEED: &str = "Live Feed";
pub const MASK: &str = "Yellow Mask";
pub const DETECTED: &str = "Detected Yellow Areas";

/// Windows created at startup, in display order
pub const WINDOWS: [&str; 3] = [LIVE_FEED, MASK, DETECTED];

/// Decode a raw key code from a GUI key poll
///
/// Negative codes mean no key was pressed. Modifier bits above the low byte
/// are discarded.
pub fn decode_key(code: i32) -> Option<char> {
    if code < 0 {
        return None;
    }
    Some(char::from((code & 0xFF) as u8))
}

/// Trait for on-screen display backends
pub trait DisplaySink {
    /// Render a colour frame into the named window
    fn show_color(&mut self, window: &str, frame: &RgbImage) -> Result<()>;

    /// Render a single-channel mask into the named window
    fn show_mask(&mut self, window: &str, mask: &GrayImage) -> Result<()>;

    /// Wait up to `timeout_ms` for a key press
    ///
    /// Returns `None` when no key was pressed in time.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>>;
}
