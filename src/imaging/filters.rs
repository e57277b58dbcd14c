//! Neighborhood filters: box blur, Gaussian blur, median, sharpen.
//!
//! All filters produce an output the same size as the input. Pixels near the
//! border read their missing neighbors by replicating the nearest edge
//! sample. Weighted sums accumulate in `f32` and saturate into `0..=255`.

use super::buffer::PixelBuffer;
use super::calculations::{
    box_kernel, gaussian_kernel, normalize_kernel_size, saturate, sharpen_kernel,
};

#[inline]
fn clamp_coord(value: isize, len: usize) -> usize {
    value.clamp(0, len as isize - 1) as usize
}

/// Convolve `image` with a square `side × side` kernel (row-major weights).
///
/// The kernel is applied as correlation centered on each pixel; every
/// kernel this crate builds is symmetric, so the distinction does not show.
pub fn convolve(image: &PixelBuffer, kernel: &[f32], side: usize) -> PixelBuffer {
    debug_assert_eq!(kernel.len(), side * side);
    let (width, height, channels) = (image.width(), image.height(), image.num_channels());
    let mut out = image.clone();
    if image.is_empty() {
        return out;
    }

    let radius = (side / 2) as isize;
    let mut acc = vec![0.0f32; channels];

    for y in 0..height {
        for x in 0..width {
            acc.iter_mut().for_each(|a| *a = 0.0);
            for ky in 0..side {
                let sy = clamp_coord(y as isize + ky as isize - radius, height);
                for kx in 0..side {
                    let weight = kernel[ky * side + kx];
                    if weight == 0.0 {
                        continue;
                    }
                    let sx = clamp_coord(x as isize + kx as isize - radius, width);
                    for (a, &s) in acc.iter_mut().zip(image.pixel(sx, sy)) {
                        *a += weight * s as f32;
                    }
                }
            }
            for (o, &a) in out.pixel_mut(x, y).iter_mut().zip(acc.iter()) {
                *o = saturate(a);
            }
        }
    }

    out
}

/// Box blur with the normalized kernel side for `size`.
pub fn average_filter(image: &PixelBuffer, size: u32) -> PixelBuffer {
    let side = normalize_kernel_size(size);
    convolve(image, &box_kernel(side), side)
}

/// Gaussian blur with the normalized kernel side for `size`.
pub fn gaussian_blur(image: &PixelBuffer, size: u32) -> PixelBuffer {
    let side = normalize_kernel_size(size);
    convolve(image, &gaussian_kernel(side), side)
}

/// Channel-wise median over the `k × k` neighborhood, `k` being the
/// normalized kernel side for `size`.
pub fn median_filter(image: &PixelBuffer, size: u32) -> PixelBuffer {
    let side = normalize_kernel_size(size);
    let (width, height, channels) = (image.width(), image.height(), image.num_channels());
    let mut out = image.clone();
    if image.is_empty() {
        return out;
    }

    let radius = (side / 2) as isize;
    let middle = side * side / 2;
    let mut window = Vec::with_capacity(side * side);

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                window.clear();
                for dy in -radius..=radius {
                    let sy = clamp_coord(y as isize + dy, height);
                    for dx in -radius..=radius {
                        let sx = clamp_coord(x as isize + dx, width);
                        window.push(image.get(sx, sy, c));
                    }
                }
                let (_, median, _) = window.select_nth_unstable(middle);
                out.set(x, y, c, *median);
            }
        }
    }

    out
}

/// Single-pass 3×3 sharpen with `size` as the center weight.
///
/// `size` is not normalized: `1` is the identity, `0` blacks out the image.
pub fn sharpen(image: &PixelBuffer, size: u32) -> PixelBuffer {
    let size = i32::try_from(size).unwrap_or(i32::MAX);
    convolve(image, &sharpen_kernel(size), 3)
}
