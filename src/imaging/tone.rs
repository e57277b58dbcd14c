//! Per-sample tone adjustments: brightness, contrast, grayscale.
//!
//! Each maps every sample independently, so they run through a 256-entry
//! lookup table built once per call. Arithmetic happens in `i32`/`f64` and
//! saturates into `0..=255`.

use super::buffer::PixelBuffer;
use super::calculations::{contrast_lut, luma};

/// Valid range for brightness deltas and contrast levels.
pub const TONE_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

fn apply_lut(image: &mut PixelBuffer, lut: &[u8; 256]) {
    for sample in image.as_raw_mut() {
        *sample = lut[*sample as usize];
    }
}

/// Add `delta` to every sample, saturating at 0 and 255.
pub fn brightness(image: &mut PixelBuffer, delta: i32) {
    let delta = delta.clamp(*TONE_RANGE.start(), *TONE_RANGE.end());
    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        *slot = (value as i32 + delta).clamp(0, 255) as u8;
    }
    apply_lut(image, &lut);
}

/// Scale every sample away from (or toward) mid-gray by the contrast factor
/// for `level`.
pub fn contrast(image: &mut PixelBuffer, level: i32) {
    let level = level.clamp(*TONE_RANGE.start(), *TONE_RANGE.end());
    apply_lut(image, &contrast_lut(level));
}

/// Replace every channel of every pixel with the pixel's luma.
///
/// The channel count is preserved; single-channel images are already gray
/// and are left untouched.
pub fn grayscale(image: &mut PixelBuffer) {
    if image.num_channels() < 3 {
        return;
    }
    for y in 0..image.height() {
        for x in 0..image.width() {
            let px = image.pixel_mut(x, y);
            let gray = luma(px[0], px[1], px[2]);
            px.iter_mut().for_each(|s| *s = gray);
        }
    }
}
