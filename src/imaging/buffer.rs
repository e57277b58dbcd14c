//! Owned, interleaved 8-bit pixel storage.
//!
//! Samples are stored row-major, channel-interleaved: the sample for channel
//! `c` of the pixel at column `x`, row `y` lives at
//! `(y * width + x) * channels + c`.
//!
//! Duplication is a plain `Clone` of the sample vector. There is no hidden
//! sharing between two buffers, so a transform working on a clone can never
//! disturb the buffer it was cloned from.

use crate::error::{EditError, Result};

/// Channel counts an editing session accepts: grayscale and RGB.
pub const SUPPORTED_CHANNELS: &[usize] = &[1, 3];

/// A decoded image: `height × width × channels` samples in `0..=255`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw interleaved samples.
    ///
    /// Fails when `data` does not hold exactly `width * height * channels`
    /// samples or when `channels` is zero. Zero-sized images are
    /// representable here; [`validate`](Self::validate) is the check a
    /// session applies before accepting one.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels == 0 {
            return Err(EditError::InvalidBuffer("channel count must be non-zero".into()));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(EditError::InvalidBuffer(format!(
                "expected {expected} samples for {width}x{height}x{channels}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A buffer with every sample set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Self {
        Self {
            width,
            height,
            channels: channels.max(1),
            data: vec![value; width * height * channels.max(1)],
        }
    }

    /// Build a buffer by evaluating `f(x, y, channel)` for every sample.
    pub fn from_fn(
        width: usize,
        height: usize,
        channels: usize,
        mut f: impl FnMut(usize, usize, usize) -> u8,
    ) -> Self {
        let channels = channels.max(1);
        let mut data = Vec::with_capacity(width * height * channels);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_channels(&self) -> usize {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check the shape is one a session can edit: non-empty, 1 or 3 channels.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EditError::InvalidBuffer(format!(
                "zero-sized image ({}x{})",
                self.width, self.height
            )));
        }
        if !SUPPORTED_CHANNELS.contains(&self.channels) {
            return Err(EditError::InvalidBuffer(format!(
                "unsupported channel count {}",
                self.channels
            )));
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: usize, y: usize, channel: usize) -> usize {
        (y * self.width + x) * self.channels + channel
    }

    /// Read one sample. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.data[self.index(x, y, channel)]
    }

    /// Write one sample. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, channel: usize, value: u8) {
        let idx = self.index(x, y, channel);
        self.data[idx] = value;
    }

    /// All channel samples of one pixel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.index(x, y, 0);
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = self.index(x, y, 0);
        let channels = self.channels;
        &mut self.data[start..start + channels]
    }

    /// Samples of one row, `width * channels` long.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * self.channels;
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
