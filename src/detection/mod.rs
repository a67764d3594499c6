mod composite;
mod hsv;
mod threshold;

pub use composite::apply_mask;
pub use hsv::to_hsv;
pub use threshold::{in_range, HsvRange, HIT};

use image::{GrayImage, RgbImage};

/// Output of running one frame through the colour detector
pub struct Detection {
    pub mask: GrayImage,
    pub result: RgbImage,
}

impl Detection {
    /// Fraction of pixels inside the range, 0.0 for an empty frame
    pub fn coverage(&self) -> f64 {
        let total = self.mask.pixels().len();
        if total == 0 {
            return 0.0;
        }
        let hits = self.mask.pixels().filter(|p| **p == HIT).count();
        hits as f64 / total as f64
    }
}

/// Convert, threshold and composite a single frame
pub fn detect(frame: &RgbImage, range: &HsvRange) -> Detection {
    let _span = tracing::debug_span!("detect").entered();

    let hsv = to_hsv(frame);
    let mask = in_range(&hsv, range);
    let result = apply_mask(frame, &mask);

    Detection { mask, result }
}

#[cfg(test)]
mod tests {
    use super::hsv::rgb_to_hsv;
    use super::threshold::MISSED;
    use super::*;
    use image::{Luma, Rgb};

    // Converts to HSV (25, 200, 200)
    const YELLOWISH: Rgb<u8> = Rgb([200, 173, 43]);

    #[test]
    fn sample_pixel_lands_in_yellow_band() {
        assert_eq!(rgb_to_hsv(YELLOWISH), Rgb([25, 200, 200]));
    }

    #[test]
    fn single_yellow_pixel_in_black_frame() {
        let frame = RgbImage::from_fn(2, 2, |x, y| {
            if (x, y) == (0, 0) {
                YELLOWISH
            } else {
                Rgb([0, 0, 0])
            }
        });

        let detection = detect(&frame, &HsvRange::YELLOW);

        assert_eq!(*to_hsv(&frame).get_pixel(0, 0), Rgb([25, 200, 200]));
        assert_eq!(*detection.mask.get_pixel(0, 0), HIT);
        assert_eq!(*detection.mask.get_pixel(1, 0), MISSED);
        assert_eq!(*detection.mask.get_pixel(0, 1), MISSED);
        assert_eq!(*detection.mask.get_pixel(1, 1), MISSED);

        assert_eq!(*detection.result.get_pixel(0, 0), YELLOWISH);
        assert_eq!(*detection.result.get_pixel(1, 0), Rgb([0, 0, 0]));
        assert_eq!(*detection.result.get_pixel(0, 1), Rgb([0, 0, 0]));
        assert_eq!(*detection.result.get_pixel(1, 1), Rgb([0, 0, 0]));

        assert_eq!(detection.coverage(), 0.25);
    }

    #[test]
    fn black_frame_detects_nothing() {
        let frame = RgbImage::new(5, 4);

        let detection = detect(&frame, &HsvRange::YELLOW);

        assert!(detection.mask.pixels().all(|p| *p == Luma([0])));
        assert!(detection.result.pixels().all(|p| *p == Rgb([0, 0, 0])));
        assert_eq!(detection.coverage(), 0.0);
    }

    #[test]
    fn pure_yellow_frame_is_fully_detected() {
        let frame = RgbImage::from_pixel(3, 3, Rgb([255, 255, 0]));

        let detection = detect(&frame, &HsvRange::YELLOW);

        assert_eq!(detection.result, frame);
        assert_eq!(detection.coverage(), 1.0);
    }
}
