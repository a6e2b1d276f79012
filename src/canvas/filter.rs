use image::{Rgba, RgbaImage};

// Rec. 709 luma weights.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;
const NOIR_CONTRAST: f32 = 0.6;

/// Black-and-white photo effect: luminance with a fixed S-curve contrast boost.
///
/// Returns `None` when the source has no pixels.
pub fn noir(source: &RgbaImage) -> Option<RgbaImage> {
    if source.width() == 0 || source.height() == 0 {
        return None;
    }

    let mut output = RgbaImage::new(source.width(), source.height());
    for (src, dst) in source.pixels().zip(output.pixels_mut()) {
        let [r, g, b, a] = src.0;
        let level = noir_level(r, g, b);
        *dst = Rgba([level, level, level, a]);
    }
    Some(output)
}

fn noir_level(r: u8, g: u8, b: u8) -> u8 {
    let luma = (LUMA_R * f32::from(r) + LUMA_G * f32::from(g) + LUMA_B * f32::from(b)) / 255.0;
    let curved = luma * luma * (3.0 - 2.0 * luma);
    let mixed = luma + (curved - luma) * NOIR_CONTRAST;
    (mixed.clamp(0.0, 1.0) * 255.0).round() as u8
}
