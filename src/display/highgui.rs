use super::{decode_key, DisplaySink, WINDOWS};
use anyhow::{Context, Result};
use image::{GrayImage, RgbImage};
use opencv::core::{Mat, Scalar, CV_8UC1, CV_8UC3};
use opencv::highgui;
use opencv::prelude::*;

/// OpenCV highgui windows
///
/// All windows are destroyed when this is dropped.
pub struct HighGuiDisplay {
    _private: (),
}

impl HighGuiDisplay {
    pub fn new() -> Result<Self> {
        for window in WINDOWS {
            highgui::named_window(window, highgui::WINDOW_AUTOSIZE)
                .with_context(|| format!("Failed to create window '{}'", window))?;
        }

        tracing::info!("Created windows: {}", WINDOWS.join(", "));

        Ok(Self { _private: () })
    }

    /// Copy an RGB frame into a BGR `Mat`, the layout highgui expects
    fn bgr_mat(frame: &RgbImage) -> Result<Mat> {
        let (width, height) = frame.dimensions();
        let mut mat =
            Mat::new_rows_cols_with_default(height as i32, width as i32, CV_8UC3, Scalar::all(0.0))?;

        let dst = mat.data_bytes_mut()?;
        for (src, dst) in frame.as_raw().chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
        }

        Ok(mat)
    }

    fn gray_mat(mask: &GrayImage) -> Result<Mat> {
        let (width, height) = mask.dimensions();
        let mut mat =
            Mat::new_rows_cols_with_default(height as i32, width as i32, CV_8UC1, Scalar::all(0.0))?;

        mat.data_bytes_mut()?.copy_from_slice(mask.as_raw());

        Ok(mat)
    }
}

impl DisplaySink for HighGuiDisplay {
    fn show_color(&mut self, window: &str, frame: &RgbImage) -> Result<()> {
        let mat = Self::bgr_mat(frame)?;
        highgui::imshow(window, &mat).with_context(|| format!("Failed to show '{}'", window))?;
        Ok(())
    }

    fn show_mask(&mut self, window: &str, mask: &GrayImage) -> Result<()> {
        let mat = Self::gray_mat(mask)?;
        highgui::imshow(window, &mat).with_context(|| format!("Failed to show '{}'", window))?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>> {
        let code = highgui::wait_key(timeout_ms).context("Failed to poll keyboard")?;
        Ok(decode_key(code))
    }
}

impl Drop for HighGuiDisplay {
    fn drop(&mut self) {
        if let Err(err) = highgui::destroy_all_windows() {
            tracing::warn!("Failed to destroy windows: {}", err);
        } else {
            tracing::debug!("Destroyed display windows");
        }
    }
}
