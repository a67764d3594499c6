mod webcam;

pub use webcam::WebcamCapture;

use image::RgbImage;
use nokhwa::NokhwaError;
use thiserror::Error;

/// Errors raised while acquiring frames from a camera
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera {index} is unavailable")]
    DeviceUnavailable {
        index: u32,
        #[source]
        source: NokhwaError,
    },

    #[error("camera returned no frame")]
    Read(#[source] NokhwaError),

    #[error("failed to decode camera frame")]
    Decode(#[source] NokhwaError),
}

impl CaptureError {
    /// Wrap a failure to open or start streaming from camera `index`
    pub fn unavailable(index: u32) -> impl FnOnce(NokhwaError) -> Self {
        move |source| CaptureError::DeviceUnavailable { index, source }
    }
}

/// Trait for camera capture sources
pub trait CaptureSource {
    /// Capture a single frame
    fn capture_frame(&mut self) -> Result<RgbImage, CaptureError>;

    /// Get the resolution of captured frames
    fn resolution(&self) -> (u32, u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn stream_start_failure_reports_device_unavailable() {
        let err = CaptureError::unavailable(2)(NokhwaError::OpenStreamError(
            "device busy".to_string(),
        ));

        assert!(matches!(err, CaptureError::DeviceUnavailable { index: 2, .. }));
        assert_eq!(err.to_string(), "camera 2 is unavailable");
        assert!(err.source().is_some());
    }
}
