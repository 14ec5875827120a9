//! Plywood splice collaborator interface.
//!
//! The sheet splicer is an external collaborator: given a panel's outer
//! dimensions it reports the sheet sections covering the panel and the
//! seam (splice) positions between them, in panel-local 2D coordinates
//! (x right, y up from the panel's lower-left corner). The cleat and klimp
//! solvers consume `splices`; the geometry orchestrator consumes `sheets`.

use crate::panel::Panel;

/// Orientation of a splice seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpliceOrientation {
    /// Seam runs vertically; `x` is the seam position.
    Vertical,
    /// Seam runs horizontally; `y` is the seam position.
    Horizontal,
}

/// One seam between two adjacent plywood sheets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Splice {
    pub x: f64,
    pub y: f64,
    pub orientation: SpliceOrientation,
}

/// One rectangular sheet section of a panel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSection {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Sheet and splice layout for one panel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelSpliceLayout {
    pub panel: Panel,
    pub panel_width: f64,
    pub panel_height: f64,
    pub sheet_count: usize,
    pub sheets: Vec<SheetSection>,
    pub splices: Vec<Splice>,
    /// Whether the sheets are rotated 90 degrees on this panel.
    pub is_rotated: bool,
}

impl PanelSpliceLayout {
    /// Vertical splice x positions, sorted ascending.
    pub fn vertical_splices(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self
            .splices
            .iter()
            .filter(|s| s.orientation == SpliceOrientation::Vertical)
            .map(|s| s.x)
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs
    }

    /// Horizontal splice y positions, sorted ascending.
    pub fn horizontal_splices(&self) -> Vec<f64> {
        let mut ys: Vec<f64> = self
            .splices
            .iter()
            .filter(|s| s.orientation == SpliceOrientation::Horizontal)
            .map(|s| s.y)
            .collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ys
    }
}
