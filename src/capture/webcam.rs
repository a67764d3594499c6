use super::{CaptureError, CaptureSource};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// Webcam opened through nokhwa.
///
/// Holds the device exclusively until dropped; the stream is stopped on drop.
pub struct WebcamCapture {
    camera: Camera,
    index: u32,
}

impl WebcamCapture {
    pub fn open(device_index: u32) -> Result<Self, CaptureError> {
        tracing::info!("Opening webcam {}", device_index);

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera =
            Camera::new(index, requested).map_err(CaptureError::unavailable(device_index))?;

        camera
            .open_stream()
            .map_err(CaptureError::unavailable(device_index))?;

        let resolution = camera.resolution();
        tracing::info!(
            "Webcam {} streaming at {}x{}",
            device_index,
            resolution.width(),
            resolution.height()
        );

        Ok(Self {
            camera,
            index: device_index,
        })
    }
}

impl CaptureSource for WebcamCapture {
    fn capture_frame(&mut self) -> Result<RgbImage, CaptureError> {
        let frame = self.camera.frame().map_err(CaptureError::Read)?;

        frame
            .decode_image::<RgbFormat>()
            .map_err(CaptureError::Decode)
    }

    fn resolution(&self) -> (u32, u32) {
        let resolution = self.camera.resolution();
        (resolution.width(), resolution.height())
    }
}

impl Drop for WebcamCapture {
    fn drop(&mut self) {
        if let Err(err) = self.camera.stop_stream() {
            tracing::warn!("Failed to stop webcam {} stream: {}", self.index, err);
        } else {
            tracing::debug!("Released webcam {}", self.index);
        }
    }
}
