//! Pure calculation functions behind the pixel transforms.
//!
//! Kernel construction, tone curves, and canvas geometry. Nothing here
//! touches a pixel buffer, so every rule can be unit tested on plain numbers.

/// Largest kernel side a neighborhood filter will use. Odd, so capping
/// keeps the kernel centered.
pub const MAX_KERNEL_SIDE: usize = 255;

/// Round a requested filter size to the odd kernel side actually used.
///
/// Odd sizes above 1 are kept. Everything else (0, 1, even sizes) rounds up
/// to the next odd side, with 3 as the floor. Sides are capped at
/// [`MAX_KERNEL_SIDE`].
///
/// # Examples
/// ```
/// # use retouch::imaging::calculations::normalize_kernel_size;
/// assert_eq!(normalize_kernel_size(0), 3);
/// assert_eq!(normalize_kernel_size(4), 5);
/// assert_eq!(normalize_kernel_size(5), 5);
/// assert_eq!(normalize_kernel_size(u32::MAX), 255);
/// ```
pub fn normalize_kernel_size(size: u32) -> usize {
    let side = if size % 2 == 1 && size > 1 {
        size
    } else {
        size.saturating_add(1).max(3)
    };
    (side as usize).min(MAX_KERNEL_SIDE)
}

/// Saturate a wide intermediate back into the 8-bit sample range.
#[inline]
pub fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Signed contrast factor pivoting on mid-gray.
///
/// `level` is expected in `[-100, 100]`; zero yields exactly `1.0`.
pub fn contrast_factor(level: i32) -> f64 {
    let level = level as f64;
    if level >= 0.0 {
        259.0 * (level + 255.0) / (255.0 * (259.0 - level))
    } else {
        259.0 * (level + 255.0) / (255.0 * (259.0 + level))
    }
}

/// Lookup table mapping each input sample through the contrast curve.
pub fn contrast_lut(level: i32) -> [u8; 256] {
    let factor = contrast_factor(level);
    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        *slot = saturate((factor * (value as f64 - 128.0) + 128.0) as f32);
    }
    lut
}

/// Rec.601 luma of an RGB triple.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    saturate(0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
}

/// Uniform `k × k` kernel with weights `1 / k²`.
pub fn box_kernel(side: usize) -> Vec<f32> {
    let weight = 1.0 / (side * side) as f32;
    vec![weight; side * side]
}

/// Isotropic Gaussian sampled on a `k × k` grid spanning `[-1, 1]` on both
/// axes with `sigma = k / 6`, normalized to sum to 1.
pub fn gaussian_kernel(side: usize) -> Vec<f32> {
    let sigma = side as f64 / 6.0;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let step = if side > 1 {
        2.0 / (side - 1) as f64
    } else {
        0.0
    };

    let mut weights = Vec::with_capacity(side * side);
    for row in 0..side {
        let y = -1.0 + row as f64 * step;
        for col in 0..side {
            let x = -1.0 + col as f64 * step;
            weights.push((-(x * x + y * y) / two_sigma_sq).exp());
        }
    }

    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| (w / total) as f32).collect()
}

/// 3×3 sharpening kernel: center `size`, orthogonal neighbors
/// `-((size - 1) / 4)` in integer arithmetic, corners zero.
///
/// `size == 1` is the identity and `size == 0` is the all-zero kernel.
pub fn sharpen_kernel(size: i32) -> [f32; 9] {
    let center = size as f32;
    let edge = -((size - 1) / 4) as f32;
    [
        0.0, edge, 0.0, //
        edge, center, edge, //
        0.0, edge, 0.0,
    ]
}

/// Quarter turns (0..=3, counter-clockwise) when `degrees` is a multiple of
/// 90, else `None`.
pub fn quarter_turns(degrees: f64) -> Option<u8> {
    let normalized = degrees.rem_euclid(360.0);
    let turns = normalized / 90.0;
    if (turns - turns.round()).abs() < 1e-9 {
        Some((turns.round() as u32 % 4) as u8)
    } else {
        None
    }
}

/// Smallest canvas `(width, height)` holding a `width × height` image
/// rotated by `degrees` about its center.
///
/// Extents that land within floating-point noise of an integer snap to it,
/// so right-angle rotations never gain a spurious row or column.
pub fn rotated_bounds(width: usize, height: usize, degrees: f64) -> (usize, usize) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let w = width as f64;
    let h = height as f64;
    (
        snap_ceil(w * cos + h * sin),
        snap_ceil(w * sin + h * cos),
    )
}

fn snap_ceil(value: f64) -> usize {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-6 {
        rounded as usize
    } else {
        value.ceil() as usize
    }
}
