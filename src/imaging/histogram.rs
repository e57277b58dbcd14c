//! Per-channel sample frequency counts.

use super::buffer::PixelBuffer;
use serde::Serialize;

/// Number of bins: one per 8-bit sample value.
pub const BINS: usize = 256;

/// Frequency counts for every channel of an image, in channel order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub channels: Vec<Vec<u64>>,
}

impl Histogram {
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Bins for one channel.
    pub fn channel(&self, index: usize) -> Option<&[u64]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Total samples counted in one channel (the pixel count).
    pub fn total(&self, index: usize) -> u64 {
        self.channel(index).map_or(0, |bins| bins.iter().sum())
    }

    /// Mean sample value of one channel, `None` for an empty channel.
    pub fn mean(&self, index: usize) -> Option<f64> {
        let bins = self.channel(index)?;
        let total = self.total(index);
        if total == 0 {
            return None;
        }
        let weighted: u64 = bins
            .iter()
            .enumerate()
            .map(|(value, &count)| value as u64 * count)
            .sum();
        Some(weighted as f64 / total as f64)
    }

    /// Smallest and largest sample values present in one channel.
    pub fn range(&self, index: usize) -> Option<(u8, u8)> {
        let bins = self.channel(index)?;
        let min = bins.iter().position(|&c| c > 0)?;
        let max = bins.iter().rposition(|&c| c > 0)?;
        Some((min as u8, max as u8))
    }
}

/// 256-bin count of the sample values of one channel.
///
/// An out-of-range channel index yields all-zero bins.
pub fn channel_histogram(image: &PixelBuffer, channel: usize) -> Vec<u64> {
    let mut bins = vec![0u64; BINS];
    let channels = image.num_channels();
    if channel >= channels {
        return bins;
    }
    for &sample in image.as_raw().iter().skip(channel).step_by(channels) {
        bins[sample as usize] += 1;
    }
    bins
}

/// Histograms for every channel of `image`.
pub fn histogram(image: &PixelBuffer) -> Histogram {
    Histogram {
        channels: (0..image.num_channels())
            .map(|c| channel_histogram(image, c))
            .collect(),
    }
}
