//! Pixel-level image processing.
//!
//! | Operation | Module / function |
//! |---|---|
//! | **Brightness, contrast, grayscale** | [`tone`] (256-entry lookup tables) |
//! | **Box, Gaussian, median blur; sharpen** | [`filters`] (edge-replicating "same" convolution) |
//! | **Flip, rotate** | [`geometry`] (exact quarter turns, bilinear otherwise) |
//! | **Histogram** | [`histogram`] |
//! | **Decode / encode** | [`codec`] (`image` crate) |
//!
//! The module is split into:
//! - **Buffer**: [`PixelBuffer`], the owned sample grid everything operates on
//! - **Calculations**: Pure functions for kernels, tone curves, canvas math (unit testable)
//! - **Parameters**: [`EditAction`] and the attribute names that build them
//! - **Transforms**: `tone`, `filters`, `geometry`, `histogram` (stateless)
//! - **Operations**: the single dispatch from action to transform, and replay
//! - **Codec**: [`Codec`] / [`Storage`] traits + [`ImageCodec`] / [`FsStorage`]

pub mod buffer;
pub mod calculations;
pub mod codec;
pub mod filters;
pub mod geometry;
pub mod histogram;
pub mod operations;
pub mod params;
pub mod tone;

pub use buffer::PixelBuffer;
pub use codec::{Codec, FsStorage, ImageCodec, OutputFormat, Storage};
pub use histogram::Histogram;
pub use operations::{TransformOptions, apply_action, replay};
pub use params::{AttributeKind, EditAction, EditSpec};
