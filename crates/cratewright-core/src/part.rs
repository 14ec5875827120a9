//! The two-diagonal-corner box model.
//!
//! Every physical piece of a crate is an axis-aligned box described by two
//! opposite corners in crate coordinates (X = width, Y = length, Z = height,
//! origin at the center of the crate floor). Corner order is not
//! significant.

use glam::DVec3;

use crate::color::Rgb;
use crate::panel::Panel;

/// Classification of a part, used for assembly grouping and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartKind {
    Skid,
    Floor,
    Panel,
    Cleat,
    Plywood,
    Klimp,
    Hardware,
    Marking,
}

/// One physical part as an axis-aligned box.
///
/// A `suppressed` part is a zero-volume placeholder holding a slot in a
/// fixed-capacity CAD pattern (floorboards, plywood pieces); it must never
/// reach exported geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    pub name: String,
    pub point1: DVec3,
    pub point2: DVec3,
    pub kind: PartKind,
    pub color: Rgb,
    pub suppressed: bool,
    pub metadata: String,
    pub panel: Option<Panel>,
    pub piece_index: Option<usize>,
}

impl Part {
    pub fn new(
        name: impl Into<String>,
        kind: PartKind,
        point1: DVec3,
        point2: DVec3,
        color: Rgb,
    ) -> Self {
        Self {
            name: name.into(),
            point1,
            point2,
            kind,
            color,
            suppressed: false,
            metadata: String::new(),
            panel: None,
            piece_index: None,
        }
    }

    /// A zero-volume placeholder reserving a CAD pattern slot.
    pub fn suppressed(name: impl Into<String>, kind: PartKind, color: Rgb) -> Self {
        Self {
            name: name.into(),
            point1: DVec3::ZERO,
            point2: DVec3::ZERO,
            kind,
            color,
            suppressed: true,
            metadata: "UNUSED - SUPPRESSED".to_string(),
            panel: None,
            piece_index: None,
        }
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panel = Some(panel);
        self
    }

    pub fn with_piece_index(mut self, index: usize) -> Self {
        self.piece_index = Some(index);
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }

    /// Per-axis extents, independent of corner order.
    pub fn dimensions(&self) -> DVec3 {
        (self.point2 - self.point1).abs()
    }

    pub fn center(&self) -> DVec3 {
        (self.point1 + self.point2) * 0.5
    }

    pub fn min_corner(&self) -> DVec3 {
        self.point1.min(self.point2)
    }

    pub fn max_corner(&self) -> DVec3 {
        self.point1.max(self.point2)
    }

    /// True when any axis extent is below `eps`.
    pub fn is_degenerate(&self, eps: f64) -> bool {
        let d = self.dimensions();
        d.x < eps || d.y < eps || d.z < eps
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.point1.is_finite() && self.point2.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    #[test]
    fn test_dimensions_ignore_corner_order() {
        let a = Part::new(
            "A",
            PartKind::Skid,
            DVec3::new(2.0, 5.0, 1.0),
            DVec3::new(-1.0, 0.0, 4.0),
            palette::SKID,
        );
        assert_eq!(a.dimensions(), DVec3::new(3.0, 5.0, 3.0));
        assert_eq!(a.center(), DVec3::new(0.5, 2.5, 2.5));
        assert_eq!(a.min_corner(), DVec3::new(-1.0, 0.0, 1.0));
    }

    #[test]
    fn test_suppressed_is_degenerate() {
        let p = Part::suppressed("SLOT", PartKind::Floor, palette::FLOORBOARD);
        assert!(p.suppressed);
        assert!(p.is_degenerate(1e-6));
    }

    #[test]
    fn test_is_finite() {
        let mut p = Part::new(
            "B",
            PartKind::Cleat,
            DVec3::ZERO,
            DVec3::ONE,
            palette::CLEAT,
        );
        assert!(p.is_finite());
        p.point2.y = f64::NAN;
        assert!(!p.is_finite());
    }
}
