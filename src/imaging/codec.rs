//! Codec and storage collaborators.
//!
//! The editing core only ever sees decoded [`PixelBuffer`]s. Getting bytes
//! on and off disk is the [`Storage`] trait's job; turning bytes into pixels
//! and back is the [`Codec`] trait's. Both are traits so the session can be
//! driven by in-memory fakes in tests.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image::load_from_memory` |
//! | Encode JPEG | `image::codecs::jpeg::JpegEncoder` with configured quality |
//! | Encode PNG, TIFF, WebP, BMP | `image::DynamicImage::write_to` |
//! | Read / write bytes | `std::fs` |

use super::buffer::PixelBuffer;
use crate::error::{EditError, Result};
use image::{ColorType, DynamicImage, ExtendedColorType, GrayImage, ImageEncoder, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Formats an edited image can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Tiff,
    WebP,
    Bmp,
}

impl OutputFormat {
    /// Infer the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "webp" => Some(OutputFormat::WebP),
            "bmp" => Some(OutputFormat::Bmp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Turns encoded bytes into pixels and back.
pub trait Codec {
    /// Decode an image file's bytes. Malformed or unsupported input fails
    /// with [`EditError::Decode`].
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;

    /// Encode pixels in the given format.
    fn encode(&self, image: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>>;
}

/// Byte I/O keyed by path.
pub trait Storage {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Filesystem storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, bytes)?)
    }
}

/// Codec backed by the `image` crate.
///
/// Grayscale sources decode to one channel; everything else decodes to RGB
/// (alpha is dropped, 16-bit samples are narrowed).
#[derive(Debug, Clone, Copy)]
pub struct ImageCodec {
    jpeg_quality: u8,
}

impl ImageCodec {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new(90)
    }
}

fn to_pixel_buffer(img: DynamicImage) -> Result<PixelBuffer> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            PixelBuffer::new(width, height, 1, img.into_luma8().into_raw())
        }
        _ => PixelBuffer::new(width, height, 3, img.into_rgb8().into_raw()),
    }
}

fn to_dynamic(image: &PixelBuffer) -> Result<DynamicImage> {
    let (w, h) = (image.width() as u32, image.height() as u32);
    let raw = image.as_raw().to_vec();
    let img = match image.num_channels() {
        1 => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        n => {
            return Err(EditError::Encode(format!(
                "cannot encode {n}-channel image"
            )));
        }
    };
    img.ok_or_else(|| EditError::Encode("pixel data does not match dimensions".into()))
}

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| EditError::Decode(e.to_string()))?;
        let buffer = to_pixel_buffer(img)?;
        log::debug!(
            "decoded {} bytes into {}x{}x{}",
            bytes.len(),
            buffer.width(),
            buffer.height(),
            buffer.num_channels()
        );
        Ok(buffer)
    }

    fn encode(&self, image: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>> {
        image.validate().map_err(|e| EditError::Encode(e.to_string()))?;
        let mut bytes = Vec::new();

        if format == OutputFormat::Jpeg {
            let color = match image.num_channels() {
                1 => ExtendedColorType::L8,
                _ => ExtendedColorType::Rgb8,
            };
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, self.jpeg_quality)
                .write_image(
                    image.as_raw(),
                    image.width() as u32,
                    image.height() as u32,
                    color,
                )
                .map_err(|e| EditError::Encode(format!("JPEG encode failed: {e}")))?;
        } else {
            to_dynamic(image)?
                .write_to(&mut Cursor::new(&mut bytes), format.image_format())
                .map_err(|e| EditError::Encode(format!("{format:?} encode failed: {e}")))?;
        }

        log::debug!("encoded {format:?} ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gradient;

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_extension("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("tif"), Some(OutputFormat::Tiff));
        assert_eq!(OutputFormat::from_extension("gif"), None);
        assert_eq!(
            OutputFormat::from_path(Path::new("/out/edited.png")),
            Some(OutputFormat::Png)
        );
        assert_eq!(OutputFormat::from_path(Path::new("/out/noext")), None);
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let codec = ImageCodec::default();
        for channels in [1, 3] {
            let img = gradient(13, 7, channels);
            let bytes = codec.encode(&img, OutputFormat::Png).unwrap();
            assert_eq!(codec.decode(&bytes).unwrap(), img);
        }
    }

    #[test]
    fn jpeg_round_trip_keeps_shape() {
        let codec = ImageCodec::new(95);
        let img = gradient(16, 8, 3);
        let bytes = codec.encode(&img, OutputFormat::Jpeg).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(
            (decoded.width(), decoded.height(), decoded.num_channels()),
            (16, 8, 3)
        );
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let codec = ImageCodec::default();
        assert!(matches!(
            codec.decode(b"definitely not an image"),
            Err(EditError::Decode(_))
        ));
    }

    #[test]
    fn encode_rejects_empty_image() {
        let codec = ImageCodec::default();
        let empty = PixelBuffer::filled(0, 0, 3, 0);
        assert!(codec.encode(&empty, OutputFormat::Png).is_err());
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(ImageCodec::new(0).jpeg_quality(), 1);
        assert_eq!(ImageCodec::new(200).jpeg_quality(), 100);
    }

    #[test]
    fn fs_storage_round_trip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/blob.bin");
        FsStorage.write(&path, b"pixels").unwrap();
        assert_eq!(FsStorage.read(&path).unwrap(), b"pixels");
    }

    #[test]
    fn fs_storage_missing_file_is_io_error() {
        let result = FsStorage.read(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(EditError::Io(_))));
    }
}
