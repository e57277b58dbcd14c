//! Shared test utilities for the retouch test suite.
//!
//! Provides deterministic buffer builders, simple image statistics, and an
//! in-memory [`Storage`] that records what was written.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut session = opened_session(gradient(8, 8, 3));
//! session.set_attribute("contrast", Some(40));
//! assert!(variance(&session.effective_image().unwrap()) > variance(&gradient(8, 8, 3)));
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use crate::error::{EditError, Result};
use crate::imaging::{PixelBuffer, Storage};
use crate::session::EditSession;

// =========================================================================
// Buffer builders
// =========================================================================

/// Smooth ramp over x, y, and channel, spanning roughly 40..=210.
///
/// Asymmetric in x and y so geometric transforms are distinguishable.
pub fn gradient(width: usize, height: usize, channels: usize) -> PixelBuffer {
    let span = (2 * width.saturating_sub(1) + 3 * height.saturating_sub(1) + 5 * channels.saturating_sub(1)).max(1);
    PixelBuffer::from_fn(width, height, channels, |x, y, c| {
        (40 + (2 * x + 3 * y + 5 * c) * 170 / span) as u8
    })
}

/// Alternating black and white pixels.
pub fn checkerboard(width: usize, height: usize, channels: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, channels, |x, y, _| {
        if (x + y) % 2 == 0 { 0 } else { 255 }
    })
}

/// Every sample holds its own linear index (mod 256).
pub fn numbered(width: usize, height: usize, channels: usize) -> PixelBuffer {
    let data = (0..width * height * channels).map(|i| i as u8).collect();
    PixelBuffer::new(width, height, channels, data).unwrap()
}

/// Population variance over all samples.
pub fn variance(image: &PixelBuffer) -> f64 {
    let samples = image.as_raw();
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    samples
        .iter()
        .map(|&s| (s as f64 - mean).powi(2))
        .sum::<f64>()
        / n
}

/// A fresh session with `image` already open.
pub fn opened_session(image: PixelBuffer) -> EditSession {
    let mut session = EditSession::new();
    session.open(image).unwrap();
    session
}

// =========================================================================
// In-memory storage
// =========================================================================

/// Storage backed by a map. Uses Mutex (not RefCell) so it stays Sync.
#[derive(Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(path.to_string(), bytes);
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Every written path, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.get(&path.to_string_lossy()).ok_or_else(|| {
            EditError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.insert(&path.to_string_lossy(), bytes.to_vec());
        Ok(())
    }
}
