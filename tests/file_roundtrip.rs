//! Load → edit → save through the real filesystem and `image` codecs.

use retouch::imaging::{Codec, FsStorage, ImageCodec, OutputFormat, PixelBuffer, Storage};
use retouch::{EditError, EditSession};
use std::path::Path;
use tempfile::TempDir;

fn write_png(path: &Path, image: &PixelBuffer) {
    let bytes = ImageCodec::default()
        .encode(image, OutputFormat::Png)
        .unwrap();
    FsStorage.write(path, &bytes).unwrap();
}

fn stripes(width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, 3, |x, _, c| ((x * 25) % 256) as u8 ^ (c as u8 * 60))
}

#[test]
fn open_edit_save_png() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.png");
    let output = tmp.path().join("out/edited.png");
    write_png(&input, &stripes(10, 4));

    let codec = ImageCodec::default();
    let mut session = EditSession::new();
    session.open_file(&input, &codec, &FsStorage).unwrap();
    session.set_attribute("rotate", Some(90));
    session.set_attribute("flip_vertically", None);
    session.accept();
    session.save_file(&output, None, &codec, &FsStorage).unwrap();

    let saved = codec.decode(&FsStorage.read(&output).unwrap()).unwrap();
    assert_eq!(saved, session.effective_image().unwrap());
    assert_eq!((saved.width(), saved.height()), (4, 10));
}

#[test]
fn save_jpeg_and_reopen() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in.png");
    let output = tmp.path().join("out.jpg");
    write_png(&input, &stripes(16, 16));

    let codec = ImageCodec::new(80);
    let mut session = EditSession::new();
    session.open_file(&input, &codec, &FsStorage).unwrap();
    session.set_attribute("gaussian_blur", Some(3));
    session.save_file(&output, None, &codec, &FsStorage).unwrap();

    let mut reopened = EditSession::new();
    reopened.open_file(&output, &codec, &FsStorage).unwrap();
    let base = reopened.base().unwrap();
    assert_eq!((base.width(), base.height(), base.num_channels()), (16, 16, 3));
}

#[test]
fn grayscale_png_opens_single_channel() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("gray.png");
    let gray = PixelBuffer::from_fn(5, 5, 1, |x, y, _| (x * 40 + y) as u8);
    write_png(&input, &gray);

    let mut session = EditSession::new();
    session
        .open_file(&input, &ImageCodec::default(), &FsStorage)
        .unwrap();
    assert_eq!(session.base(), Some(&gray));
}

#[test]
fn corrupt_file_does_not_disturb_open_session() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("good.png");
    let bad = tmp.path().join("bad.png");
    write_png(&good, &stripes(6, 6));
    std::fs::write(&bad, b"\x89PNG but not really").unwrap();

    let codec = ImageCodec::default();
    let mut session = EditSession::new();
    session.open_file(&good, &codec, &FsStorage).unwrap();
    session.set_attribute("contrast", Some(30));

    let result = session.open_file(&bad, &codec, &FsStorage);
    assert!(matches!(result, Err(EditError::Decode(_))));
    assert_eq!(session.actions().len(), 1);
    assert_eq!(session.base(), Some(&stripes(6, 6)));
}

#[test]
fn missing_input_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let mut session = EditSession::new();
    let result = session.open_file(
        &tmp.path().join("nope.png"),
        &ImageCodec::default(),
        &FsStorage,
    );
    assert!(matches!(result, Err(EditError::Io(_))));
    assert!(!session.has_image());
}
