use retouch::imaging::PixelBuffer;

/// Uniform image with every sample set to `value`.
pub fn solid(width: usize, height: usize, channels: usize, value: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, channels, value)
}

/// Blocky test card: `cell`-sized squares alternating between two grays,
/// with a per-channel offset so channels differ.
pub fn test_card(width: usize, height: usize, channels: usize, cell: usize) -> PixelBuffer {
    assert!(cell > 0, "cell size must be positive");
    PixelBuffer::from_fn(width, height, channels, |x, y, c| {
        let base = if (x / cell + y / cell) % 2 == 0 { 70 } else { 180 };
        base + (c as u8) * 10
    })
}

/// Population variance over all samples.
pub fn variance(image: &PixelBuffer) -> f64 {
    let samples = image.as_raw();
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    samples.iter().map(|&s| (s as f64 - mean).powi(2)).sum::<f64>() / n
}
