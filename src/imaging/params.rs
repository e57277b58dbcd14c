//! Edit action types.
//!
//! These describe *what* adjustment to make, not *how* to make it. The
//! session stores them in order and [`operations`](super::operations) turns
//! each one into pixel work. Attribute names are the string surface callers
//! (menus, sliders, the CLI) use to request an adjustment.
//!
//! ## Types
//!
//! - [`AttributeKind`] — the recognized attribute names and their valid ranges.
//! - [`EditAction`] — one immutable pending step, including the commit marker.
//! - [`EditSpec`] — a `kind[=value]` request as typed on the command line.

use std::fmt;
use std::str::FromStr;

/// One step in a session's edit list. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Add a delta in `[-100, 100]` to every sample.
    Brightness(i32),
    /// Signed contrast level in `[-100, 100]`.
    Contrast(i32),
    AverageFilter(u32),
    GaussianBlur(u32),
    MedianFilter(u32),
    /// Center weight of the 3×3 sharpening kernel.
    Sharpen(u32),
    Grayscale,
    FlipHorizontal,
    FlipVertical,
    /// Counter-clockwise degrees.
    Rotate(i32),
    /// Transaction boundary written by `accept`. Changes no pixels.
    CommitMarker,
}

impl EditAction {
    /// The attribute this action was created from; `None` for the marker.
    pub fn kind(&self) -> Option<AttributeKind> {
        Some(match self {
            EditAction::Brightness(_) => AttributeKind::Brightness,
            EditAction::Contrast(_) => AttributeKind::Contrast,
            EditAction::AverageFilter(_) => AttributeKind::AverageFilter,
            EditAction::GaussianBlur(_) => AttributeKind::GaussianBlur,
            EditAction::MedianFilter(_) => AttributeKind::MedianFilter,
            EditAction::Sharpen(_) => AttributeKind::Sharpen,
            EditAction::Grayscale => AttributeKind::Grayscale,
            EditAction::FlipHorizontal => AttributeKind::FlipHorizontal,
            EditAction::FlipVertical => AttributeKind::FlipVertical,
            EditAction::Rotate(_) => AttributeKind::Rotate,
            EditAction::CommitMarker => return None,
        })
    }

    /// Whether the action consumes the previous step's output. Every pixel
    /// transform does; the commit marker does not.
    pub fn applies_to_chained_result(&self) -> bool {
        !matches!(self, EditAction::CommitMarker)
    }

    /// Whether a newer action of the same kind may replace this one.
    pub fn is_coalescable(&self) -> bool {
        self.kind().is_some_and(AttributeKind::is_coalescable)
    }

    pub fn parameter(&self) -> Option<i64> {
        match *self {
            EditAction::Brightness(v) | EditAction::Contrast(v) | EditAction::Rotate(v) => {
                Some(v as i64)
            }
            EditAction::AverageFilter(v)
            | EditAction::GaussianBlur(v)
            | EditAction::MedianFilter(v)
            | EditAction::Sharpen(v) => Some(v as i64),
            EditAction::Grayscale
            | EditAction::FlipHorizontal
            | EditAction::FlipVertical
            | EditAction::CommitMarker => None,
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.parameter()) {
            (Some(kind), Some(value)) => write!(f, "{} {}", kind.name(), value),
            (Some(kind), None) => f.write_str(kind.name()),
            (None, _) => f.write_str("commit"),
        }
    }
}

/// Recognized attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Brightness,
    Contrast,
    AverageFilter,
    GaussianBlur,
    MedianFilter,
    Sharpen,
    Grayscale,
    FlipHorizontal,
    FlipVertical,
    Rotate,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 10] = [
        AttributeKind::Brightness,
        AttributeKind::Contrast,
        AttributeKind::AverageFilter,
        AttributeKind::GaussianBlur,
        AttributeKind::MedianFilter,
        AttributeKind::Sharpen,
        AttributeKind::Grayscale,
        AttributeKind::FlipHorizontal,
        AttributeKind::FlipVertical,
        AttributeKind::Rotate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Brightness => "brightness",
            AttributeKind::Contrast => "contrast",
            AttributeKind::AverageFilter => "average_filter",
            AttributeKind::GaussianBlur => "gaussian_blur",
            AttributeKind::MedianFilter => "median_blur",
            AttributeKind::Sharpen => "sharpen",
            AttributeKind::Grayscale => "grayscale",
            AttributeKind::FlipHorizontal => "flip_horizontally",
            AttributeKind::FlipVertical => "flip_vertically",
            AttributeKind::Rotate => "rotate",
        }
    }

    /// Geometric steps are order-significant and never coalesce.
    pub fn is_coalescable(self) -> bool {
        !matches!(
            self,
            AttributeKind::FlipHorizontal | AttributeKind::FlipVertical | AttributeKind::Rotate
        )
    }

    pub fn takes_parameter(self) -> bool {
        !matches!(
            self,
            AttributeKind::Grayscale | AttributeKind::FlipHorizontal | AttributeKind::FlipVertical
        )
    }

    /// Build the action for this attribute.
    ///
    /// Out-of-range parameters are clamped into the attribute's domain.
    /// Returns `None` when a parametric attribute is given no parameter.
    /// Parameterless attributes ignore any parameter they are given.
    pub fn action(self, parameter: Option<i64>) -> Option<EditAction> {
        let tone = |v: i64| v.clamp(-100, 100) as i32;
        let size = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
        let degrees = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;

        Some(match self {
            AttributeKind::Grayscale => EditAction::Grayscale,
            AttributeKind::FlipHorizontal => EditAction::FlipHorizontal,
            AttributeKind::FlipVertical => EditAction::FlipVertical,
            AttributeKind::Brightness => EditAction::Brightness(tone(parameter?)),
            AttributeKind::Contrast => EditAction::Contrast(tone(parameter?)),
            AttributeKind::AverageFilter => EditAction::AverageFilter(size(parameter?)),
            AttributeKind::GaussianBlur => EditAction::GaussianBlur(size(parameter?)),
            AttributeKind::MedianFilter => EditAction::MedianFilter(size(parameter?)),
            AttributeKind::Sharpen => EditAction::Sharpen(size(parameter?)),
            AttributeKind::Rotate => EditAction::Rotate(degrees(parameter?)),
        })
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        AttributeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| format!("unknown attribute '{s}'"))
    }
}

/// A `kind[=value]` edit request, e.g. `brightness=20` or `flip_vertically`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSpec {
    pub kind: AttributeKind,
    pub value: Option<i64>,
}

impl FromStr for EditSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => {
                let value = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| format!("invalid value in '{s}': {e}"))?;
                (name, Some(value))
            }
            None => (s, None),
        };
        let kind: AttributeKind = name.parse()?;
        if kind.takes_parameter() && value.is_none() {
            return Err(format!("'{}' needs a value, e.g. {}=10", kind, kind));
        }
        Ok(EditSpec { kind, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in AttributeKind::ALL {
            assert_eq!(kind.name().parse::<AttributeKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("sepia".parse::<AttributeKind>().is_err());
    }

    #[test]
    fn geometric_kinds_do_not_coalesce() {
        assert!(!EditAction::Rotate(90).is_coalescable());
        assert!(!EditAction::FlipHorizontal.is_coalescable());
        assert!(!EditAction::FlipVertical.is_coalescable());
        assert!(EditAction::Brightness(1).is_coalescable());
        assert!(EditAction::MedianFilter(3).is_coalescable());
        assert!(!EditAction::CommitMarker.is_coalescable());
    }

    #[test]
    fn only_marker_skips_chaining() {
        assert!(!EditAction::CommitMarker.applies_to_chained_result());
        assert!(EditAction::FlipVertical.applies_to_chained_result());
        assert_eq!(EditAction::CommitMarker.parameter(), None);
        assert_eq!(EditAction::CommitMarker.kind(), None);
    }

    #[test]
    fn action_clamps_parameters() {
        assert_eq!(
            AttributeKind::Brightness.action(Some(250)),
            Some(EditAction::Brightness(100))
        );
        assert_eq!(
            AttributeKind::Contrast.action(Some(-300)),
            Some(EditAction::Contrast(-100))
        );
        assert_eq!(
            AttributeKind::GaussianBlur.action(Some(-4)),
            Some(EditAction::GaussianBlur(0))
        );
        assert_eq!(
            AttributeKind::Rotate.action(Some(-450)),
            Some(EditAction::Rotate(-450))
        );
    }

    #[test]
    fn parametric_kind_without_value_builds_nothing() {
        assert_eq!(AttributeKind::Sharpen.action(None), None);
        assert_eq!(
            AttributeKind::FlipHorizontal.action(None),
            Some(EditAction::FlipHorizontal)
        );
    }

    #[test]
    fn edit_spec_parsing() {
        assert_eq!(
            "brightness=20".parse::<EditSpec>(),
            Ok(EditSpec {
                kind: AttributeKind::Brightness,
                value: Some(20)
            })
        );
        assert_eq!(
            "flip_vertically".parse::<EditSpec>(),
            Ok(EditSpec {
                kind: AttributeKind::FlipVertical,
                value: None
            })
        );
        assert!("rotate".parse::<EditSpec>().is_err());
        assert!("rotate=abc".parse::<EditSpec>().is_err());
        assert!("vignette=3".parse::<EditSpec>().is_err());
    }

    #[test]
    fn display_formats() {
        assert_eq!(EditAction::Contrast(-20).to_string(), "contrast -20");
        assert_eq!(EditAction::FlipHorizontal.to_string(), "flip_horizontally");
        assert_eq!(EditAction::CommitMarker.to_string(), "commit");
    }
}
