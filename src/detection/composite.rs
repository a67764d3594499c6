use image::{GrayImage, Rgb, RgbImage};

/// Keep the pixels of `frame` where `mask` is set and zero the rest.
///
/// Any non-zero mask value counts as set. `mask` must have the same
/// dimensions as `frame`.
pub fn apply_mask(frame: &RgbImage, mask: &GrayImage) -> RgbImage {
    debug_assert_eq!(frame.dimensions(), mask.dimensions());

    let (width, height) = frame.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        if mask.get_pixel(x, y)[0] != 0 {
            *frame.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    })
}
