//! Action dispatch and replay.
//!
//! [`apply_action`] is the single place an [`EditAction`] becomes pixel work.
//! [`replay`] walks an action list over a base image the way a session
//! computes its effective image: a fresh copy per chained step, markers
//! skipped, nothing cached.

use super::buffer::PixelBuffer;
use super::params::EditAction;
use super::{filters, geometry, tone};

/// Settings that shape transforms without being part of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformOptions {
    /// Sample value for canvas exposed by rotation.
    pub rotate_background: u8,
}

/// Apply one action to `image`, returning the transformed copy.
///
/// The input is never modified. The commit marker returns an unchanged copy.
pub fn apply_action(
    action: &EditAction,
    image: &PixelBuffer,
    options: &TransformOptions,
) -> PixelBuffer {
    match *action {
        EditAction::Brightness(delta) => {
            let mut out = image.clone();
            tone::brightness(&mut out, delta);
            out
        }
        EditAction::Contrast(level) => {
            let mut out = image.clone();
            tone::contrast(&mut out, level);
            out
        }
        EditAction::Grayscale => {
            let mut out = image.clone();
            tone::grayscale(&mut out);
            out
        }
        EditAction::AverageFilter(size) => filters::average_filter(image, size),
        EditAction::GaussianBlur(size) => filters::gaussian_blur(image, size),
        EditAction::MedianFilter(size) => filters::median_filter(image, size),
        EditAction::Sharpen(size) => filters::sharpen(image, size),
        EditAction::FlipHorizontal => {
            let mut out = image.clone();
            geometry::flip_horizontal(&mut out);
            out
        }
        EditAction::FlipVertical => {
            let mut out = image.clone();
            geometry::flip_vertical(&mut out);
            out
        }
        EditAction::Rotate(degrees) => {
            geometry::rotate_finite(image, degrees as f64, options.rotate_background)
        }
        EditAction::CommitMarker => image.clone(),
    }
}

/// Replay `actions` in order over a copy of `base`.
///
/// A pure function of its inputs: the same base and action list always
/// produce bit-identical output.
pub fn replay(base: &PixelBuffer, actions: &[EditAction], options: &TransformOptions) -> PixelBuffer {
    let mut image = base.clone();
    for action in actions {
        if action.applies_to_chained_result() {
            image = apply_action(action, &image, options);
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gradient;

    #[test]
    fn apply_leaves_input_untouched() {
        let img = gradient(6, 4, 3);
        let snapshot = img.clone();
        let opts = TransformOptions::default();
        for action in [
            EditAction::Brightness(40),
            EditAction::Contrast(30),
            EditAction::Grayscale,
            EditAction::AverageFilter(3),
            EditAction::GaussianBlur(3),
            EditAction::MedianFilter(3),
            EditAction::Sharpen(5),
            EditAction::FlipHorizontal,
            EditAction::FlipVertical,
            EditAction::Rotate(30),
            EditAction::CommitMarker,
        ] {
            let _ = apply_action(&action, &img, &opts);
            assert_eq!(img, snapshot, "{action} mutated its input");
        }
    }

    #[test]
    fn replay_of_empty_list_is_base() {
        let img = gradient(5, 5, 1);
        assert_eq!(replay(&img, &[], &TransformOptions::default()), img);
    }

    #[test]
    fn markers_are_skipped() {
        let img = gradient(5, 5, 3);
        let opts = TransformOptions::default();
        let with_markers = replay(
            &img,
            &[
                EditAction::CommitMarker,
                EditAction::Brightness(10),
                EditAction::CommitMarker,
            ],
            &opts,
        );
        let without = replay(&img, &[EditAction::Brightness(10)], &opts);
        assert_eq!(with_markers, without);
    }

    #[test]
    fn replay_applies_in_insertion_order() {
        let img = gradient(6, 3, 1);
        let opts = TransformOptions::default();
        let rotate_then_flip = replay(
            &img,
            &[EditAction::Rotate(90), EditAction::FlipHorizontal],
            &opts,
        );
        let flip_then_rotate = replay(
            &img,
            &[EditAction::FlipHorizontal, EditAction::Rotate(90)],
            &opts,
        );
        assert_ne!(rotate_then_flip, flip_then_rotate);
    }

    #[test]
    fn rotation_uses_configured_background() {
        let img = PixelBuffer::filled(8, 8, 1, 100);
        let opts = TransformOptions {
            rotate_background: 255,
        };
        let out = apply_action(&EditAction::Rotate(45), &img, &opts);
        assert_eq!(out.get(0, 0, 0), 255);
    }
}
