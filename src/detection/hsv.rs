use image::{ImageBuffer, Rgb, RgbImage};

/// HSV frame in the OpenCV 8-bit layout: channel 0 is hue in `0..180`
/// (degrees halved), channels 1 and 2 are saturation and value in `0..=255`.
pub type HsvImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

const HSV_SHIFT: u32 = 12;
const HSV_ROUND: i32 = 1 << (HSV_SHIFT - 1);
const HUE_RANGE: i32 = 180;

/// `round(num / den)` for positive operands
const fn div_round(num: i32, den: i32) -> i32 {
    (2 * num + den) / (2 * den)
}

/// Fixed-point reciprocal tables matching OpenCV's 8-bit RGB -> HSV path,
/// so that hue bounds tuned against OpenCV select the same pixels.
const fn sat_table() -> [i32; 256] {
    let mut table = [0; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = div_round(255 << HSV_SHIFT, i as i32);
        i += 1;
    }
    table
}

const fn hue_table() -> [i32; 256] {
    let mut table = [0; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = div_round(HUE_RANGE << HSV_SHIFT, 6 * i as i32);
        i += 1;
    }
    table
}

static SAT_DIV: [i32; 256] = sat_table();
static HUE_DIV: [i32; 256] = hue_table();

/// Convert a single RGB pixel to HSV
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = pixel.0;
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = (diff * SAT_DIV[v as usize] + HSV_ROUND) >> HSV_SHIFT;

    let h = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = (h * HUE_DIV[diff as usize] + HSV_ROUND) >> HSV_SHIFT;
    if h < 0 {
        h += HUE_RANGE;
    }

    Rgb([h as u8, s as u8, v as u8])
}

/// Convert an RGB frame to HSV
pub fn to_hsv(frame: &RgbImage) -> HsvImage {
    let (width, height) = frame.dimensions();

    let mut hsv = HsvImage::new(width, height);
    for (src, dst) in frame.pixels().zip(hsv.pixels_mut()) {
        *dst = rgb_to_hsv(*src);
    }
    hsv
}
