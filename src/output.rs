//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! # Output Format
//!
//! ## History
//!
//! ```text
//! History (4 actions, 1 pending)
//! 001 brightness 50
//! 002 commit
//!     ── committed above ──
//! 003 contrast 20
//! ```
//!
//! ## Histogram
//!
//! ```text
//! Histogram (640x480, 3 channels)
//! red    mean 118.2  range 3-251  ▁▂▄▆█▇▅▃▂▂▁▁▁▁▁▁
//! green  mean 121.9  range 0-255  ▁▃▅▇█▆▄▃▂▁▁▁▁▁▁▁
//! blue   mean  97.0  range 0-240  ▃▆█▆▄▃▂▁▁▁▁▁▁▁
//! ```

use crate::imaging::{EditAction, Histogram, PixelBuffer};

/// Buckets in the histogram sparkline (16 sample values each).
const SPARK_BUCKETS: usize = 16;
const SPARK_LEVELS: &[char] = &[' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn channel_name(channels: usize, index: usize) -> &'static str {
    match (channels, index) {
        (1, _) => "gray",
        (_, 0) => "red",
        (_, 1) => "green",
        (_, 2) => "blue",
        _ => "other",
    }
}

// ============================================================================
// Image info
// ============================================================================

pub fn format_info(image: &PixelBuffer) -> Vec<String> {
    vec![format!(
        "{}x{}, {}",
        image.width(),
        image.height(),
        plural(image.num_channels(), "channel", "channels")
    )]
}

pub fn print_info(image: &PixelBuffer) {
    for line in format_info(image) {
        println!("{}", line);
    }
}

// ============================================================================
// Action history
// ============================================================================

/// List every action with its position, marking the watermark.
pub fn format_history(actions: &[EditAction], watermark: usize) -> Vec<String> {
    let pending = actions.len().saturating_sub(watermark);
    let mut lines = vec![format!(
        "History ({}, {} pending)",
        plural(actions.len(), "action", "actions"),
        pending
    )];

    for (i, action) in actions.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), action));
        if i + 1 == watermark && watermark < actions.len() {
            lines.push(format!("{}── committed above ──", indent(1)));
        }
    }

    lines
}

pub fn print_history(actions: &[EditAction], watermark: usize) {
    for line in format_history(actions, watermark) {
        println!("{}", line);
    }
}

// ============================================================================
// Histogram
// ============================================================================

/// Render 256 bins as a fixed-width bar sparkline.
fn sparkline(bins: &[u64]) -> String {
    let per_bucket = bins.len().div_ceil(SPARK_BUCKETS).max(1);
    let buckets: Vec<u64> = bins
        .chunks(per_bucket)
        .map(|chunk| chunk.iter().sum())
        .collect();
    let peak = buckets.iter().copied().max().unwrap_or(0);
    let top = SPARK_LEVELS.len() - 1;

    buckets
        .iter()
        .map(|&count| {
            if peak == 0 || count == 0 {
                SPARK_LEVELS[0]
            } else {
                // Any non-empty bucket gets at least the lowest bar
                let level = (count * top as u64).div_ceil(peak) as usize;
                SPARK_LEVELS[level.clamp(1, top)]
            }
        })
        .collect()
}

pub fn format_histogram(hist: &Histogram, width: usize, height: usize) -> Vec<String> {
    let channels = hist.num_channels();
    let mut lines = vec![format!(
        "Histogram ({}x{}, {})",
        width,
        height,
        plural(channels, "channel", "channels")
    )];

    for c in 0..channels {
        let name = channel_name(channels, c);
        let stats = match (hist.mean(c), hist.range(c)) {
            (Some(mean), Some((lo, hi))) => format!("mean {:>5.1}  range {}-{}", mean, lo, hi),
            _ => "empty".to_string(),
        };
        let bins = hist.channel(c).unwrap_or(&[]);
        lines.push(format!("{:<6} {}  {}", name, stats, sparkline(bins)));
    }

    lines
}

pub fn print_histogram(hist: &Histogram, width: usize, height: usize) {
    for line in format_histogram(hist, width, height) {
        println!("{}", line);
    }
}
