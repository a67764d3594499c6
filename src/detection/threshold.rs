use super::hsv::HsvImage;
use image::{GrayImage, Luma, Rgb};

/// Mask value for pixels inside the range
pub const HIT: Luma<u8> = Luma([255]);
/// Mask value for pixels outside the range
pub const MISSED: Luma<u8> = Luma([0]);

/// Inclusive per-channel HSV bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Yellow hue band
    pub const YELLOW: HsvRange = HsvRange::new([20, 100, 100], [30, 255, 255]);

    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// True when every channel lies within `[lower, upper]`
    pub fn contains(&self, pixel: &Rgb<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(value, (lo, hi))| lo <= value && value <= hi)
    }
}

/// Build a binary mask of the pixels of `hsv` that fall inside `range`
pub fn in_range(hsv: &HsvImage, range: &HsvRange) -> GrayImage {
    let (width, height) = hsv.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if range.contains(hsv.get_pixel(x, y)) {
            HIT
        } else {
            MISSED
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, value: [u8; 3]) -> HsvImage {
        HsvImage::from_pixel(width, height, Rgb(value))
    }

    #[test]
    fn inside_band_is_hit() {
        let mask = in_range(&uniform(3, 2, [25, 150, 150]), &HsvRange::YELLOW);
        assert!(mask.pixels().all(|p| *p == HIT));
    }

    #[test]
    fn hue_below_band_is_missed() {
        let mask = in_range(&uniform(3, 2, [10, 150, 150]), &HsvRange::YELLOW);
        assert!(mask.pixels().all(|p| *p == MISSED));
    }

    #[test]
    fn bounds_are_inclusive() {
        let upper = in_range(&uniform(1, 1, [30, 255, 255]), &HsvRange::YELLOW);
        assert_eq!(*upper.get_pixel(0, 0), HIT);

        let lower = in_range(&uniform(1, 1, [20, 100, 100]), &HsvRange::YELLOW);
        assert_eq!(*lower.get_pixel(0, 0), HIT);

        let past_upper_hue = in_range(&uniform(1, 1, [31, 255, 255]), &HsvRange::YELLOW);
        assert_eq!(*past_upper_hue.get_pixel(0, 0), MISSED);
    }

    #[test]
    fn every_channel_must_match() {
        let range = HsvRange::YELLOW;
        assert!(!range.contains(&Rgb([25, 99, 150])));
        assert!(!range.contains(&Rgb([25, 150, 99])));
        assert!(range.contains(&Rgb([25, 100, 100])));
    }

    #[test]
    fn black_frame_is_all_missed() {
        let mask = in_range(&uniform(4, 4, [0, 0, 0]), &HsvRange::YELLOW);
        assert!(mask.pixels().all(|p| *p == MISSED));
    }

    #[test]
    fn repeated_thresholding_is_identical() {
        let hsv = HsvImage::from_fn(8, 8, |x, y| Rgb([(x * 5) as u8, (y * 30) as u8, 200]));

        let first = in_range(&hsv, &HsvRange::YELLOW);
        let second = in_range(&hsv, &HsvRange::YELLOW);

        assert_eq!(first, second);
    }

    #[test]
    fn alternate_range() {
        let blue = HsvRange::new([100, 50, 50], [130, 255, 255]);
        let mask = in_range(&uniform(2, 2, [120, 255, 255]), &blue);
        assert!(mask.pixels().all(|p| *p == HIT));

        let mask = in_range(&uniform(2, 2, [120, 255, 255]), &HsvRange::YELLOW);
        assert!(mask.pixels().all(|p| *p == MISSED));
    }
}
