//! Geometric transforms: mirror flips and rotation about the image center.
//!
//! Right-angle rotations are exact index remaps, so rotating by 90° twice
//! is bit-identical to rotating by 180° once. Any other angle is resampled
//! bilinearly onto a canvas enlarged to the rotated bounding box; canvas the
//! source does not cover is filled with a background sample value.

use super::buffer::PixelBuffer;
use super::calculations::{quarter_turns, rotated_bounds, saturate};
use crate::error::{EditError, Result};

/// Mirror left-to-right.
pub fn flip_horizontal(image: &mut PixelBuffer) {
    let channels = image.num_channels();
    let stride = image.width() * channels;
    if stride == 0 {
        return;
    }
    for row in image.as_raw_mut().chunks_exact_mut(stride) {
        let width = row.len() / channels;
        for x in 0..width / 2 {
            let mirror = width - 1 - x;
            for c in 0..channels {
                row.swap(x * channels + c, mirror * channels + c);
            }
        }
    }
}

/// Mirror top-to-bottom.
pub fn flip_vertical(image: &mut PixelBuffer) {
    let stride = image.width() * image.num_channels();
    if stride == 0 {
        return;
    }
    let data = image.as_raw_mut();
    let half = data.len() / stride / 2 * stride;
    let (top, rest) = data.split_at_mut(half);
    // Odd heights leave the middle row in place
    let bottom_start = rest.len() - half;
    let bottom = &mut rest[bottom_start..];
    for (a, b) in top
        .chunks_exact_mut(stride)
        .zip(bottom.chunks_exact_mut(stride).rev())
    {
        a.swap_with_slice(b);
    }
}

/// Rotate counter-clockwise by `degrees` (negative turns clockwise).
///
/// The output canvas is the smallest box holding the whole rotated image;
/// pixels outside the source are set to `background` on every channel.
/// Non-finite angles are rejected.
pub fn rotate(image: &PixelBuffer, degrees: f64, background: u8) -> Result<PixelBuffer> {
    if !degrees.is_finite() {
        return Err(EditError::InvalidParameter(format!(
            "rotation angle must be finite, got {degrees}"
        )));
    }
    Ok(rotate_finite(image, degrees, background))
}

pub(crate) fn rotate_finite(image: &PixelBuffer, degrees: f64, background: u8) -> PixelBuffer {
    match quarter_turns(degrees) {
        Some(0) => image.clone(),
        Some(1) => rotate_quarter(image, |w, _h, r, c| (w - 1 - r, c), true),
        Some(2) => rotate_quarter(image, |w, h, r, c| (w - 1 - c, h - 1 - r), false),
        Some(_) => rotate_quarter(image, |_w, h, r, c| (r, h - 1 - c), true),
        None => rotate_resampled(image, degrees, background),
    }
}

/// Exact right-angle rotation. `source` maps `(src_w, src_h, out_row,
/// out_col)` to the source `(x, y)`.
fn rotate_quarter(
    image: &PixelBuffer,
    source: impl Fn(usize, usize, usize, usize) -> (usize, usize),
    swaps_axes: bool,
) -> PixelBuffer {
    let (w, h, channels) = (image.width(), image.height(), image.num_channels());
    let (out_w, out_h) = if swaps_axes { (h, w) } else { (w, h) };
    let mut out = PixelBuffer::filled(out_w, out_h, channels, 0);
    for row in 0..out_h {
        for col in 0..out_w {
            let (sx, sy) = source(w, h, row, col);
            out.pixel_mut(col, row).copy_from_slice(image.pixel(sx, sy));
        }
    }
    out
}

fn rotate_resampled(image: &PixelBuffer, degrees: f64, background: u8) -> PixelBuffer {
    let (w, h, channels) = (image.width(), image.height(), image.num_channels());
    let (out_w, out_h) = rotated_bounds(w, h, degrees);
    let mut out = PixelBuffer::filled(out_w, out_h, channels, background);
    if image.is_empty() {
        return out;
    }

    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let (src_cx, src_cy) = ((w as f64 - 1.0) / 2.0, (h as f64 - 1.0) / 2.0);
    let (dst_cx, dst_cy) = ((out_w as f64 - 1.0) / 2.0, (out_h as f64 - 1.0) / 2.0);
    let max_x = (w - 1) as f64;
    let max_y = (h - 1) as f64;
    const EDGE: f64 = 1e-9;

    for oy in 0..out_h {
        for ox in 0..out_w {
            // Inverse map: output pixel back into source coordinates
            let dx = ox as f64 - dst_cx;
            let dy = oy as f64 - dst_cy;
            let sx = cos * dx - sin * dy + src_cx;
            let sy = sin * dx + cos * dy + src_cy;
            if sx < -EDGE || sy < -EDGE || sx > max_x + EDGE || sy > max_y + EDGE {
                continue;
            }
            let sx = sx.clamp(0.0, max_x);
            let sy = sy.clamp(0.0, max_y);

            let x0 = sx.floor() as usize;
            let y0 = sy.floor() as usize;
            let x1 = (x0 + 1).min(w - 1);
            let y1 = (y0 + 1).min(h - 1);
            let fx = sx - x0 as f64;
            let fy = sy - y0 as f64;

            for c in 0..channels {
                let top = image.get(x0, y0, c) as f64 * (1.0 - fx) + image.get(x1, y0, c) as f64 * fx;
                let bottom =
                    image.get(x0, y1, c) as f64 * (1.0 - fx) + image.get(x1, y1, c) as f64 * fx;
                out.set(ox, oy, c, saturate((top * (1.0 - fy) + bottom * fy) as f32));
            }
        }
    }

    out
}
