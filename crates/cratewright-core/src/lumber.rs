//! Lumber, fastener, and material standards.
//!
//! All dimensions are actual (not nominal) inches. These tables drive every
//! layout solver; nothing downstream should hardcode a lumber dimension.

/// Actual cross-section of a piece of dimensional lumber.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LumberDims {
    /// Vertical extent when installed (board thickness).
    pub thickness: f64,
    /// Horizontal extent when installed (board width).
    pub width: f64,
}

/// Nominal lumber sizes used anywhere in a crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LumberSize {
    L1x4,
    L2x3,
    L2x4,
    L2x6,
    L2x8,
    L2x10,
    L2x12,
    L3x3,
    /// Oriented on edge so the 3.5" face stays vertical for forklift clearance.
    L3x4,
    L4x4,
    L4x6,
    L6x6,
    L8x8,
}

impl LumberSize {
    /// Actual dimensions for the nominal size.
    pub const fn dims(self) -> LumberDims {
        match self {
            LumberSize::L1x4 => LumberDims { thickness: 0.75, width: 3.5 },
            LumberSize::L2x3 => LumberDims { thickness: 1.5, width: 2.5 },
            LumberSize::L2x4 => LumberDims { thickness: 1.5, width: 3.5 },
            LumberSize::L2x6 => LumberDims { thickness: 1.5, width: 5.5 },
            LumberSize::L2x8 => LumberDims { thickness: 1.5, width: 7.25 },
            LumberSize::L2x10 => LumberDims { thickness: 1.5, width: 9.25 },
            LumberSize::L2x12 => LumberDims { thickness: 1.5, width: 11.25 },
            LumberSize::L3x3 => LumberDims { thickness: 2.5, width: 2.5 },
            LumberSize::L3x4 => LumberDims { thickness: 3.5, width: 2.5 },
            LumberSize::L4x4 => LumberDims { thickness: 3.5, width: 3.5 },
            LumberSize::L4x6 => LumberDims { thickness: 3.5, width: 5.5 },
            LumberSize::L6x6 => LumberDims { thickness: 5.5, width: 5.5 },
            LumberSize::L8x8 => LumberDims { thickness: 7.25, width: 7.25 },
        }
    }

    /// Nominal label, e.g. "2x6".
    pub const fn label(self) -> &'static str {
        match self {
            LumberSize::L1x4 => "1x4",
            LumberSize::L2x3 => "2x3",
            LumberSize::L2x4 => "2x4",
            LumberSize::L2x6 => "2x6",
            LumberSize::L2x8 => "2x8",
            LumberSize::L2x10 => "2x10",
            LumberSize::L2x12 => "2x12",
            LumberSize::L3x3 => "3x3",
            LumberSize::L3x4 => "3x4",
            LumberSize::L4x4 => "4x4",
            LumberSize::L4x6 => "4x6",
            LumberSize::L6x6 => "6x6",
            LumberSize::L8x8 => "8x8",
        }
    }
}

/// Lumber sizes allowed for floorboards, widest-compatible set.
pub const FLOORBOARD_SIZES: [LumberSize; 4] = [
    LumberSize::L2x6,
    LumberSize::L2x8,
    LumberSize::L2x10,
    LumberSize::L2x12,
];

/// Skid selection for one weight band.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkidBand {
    pub size: LumberSize,
    /// Maximum center-to-center spacing between skids.
    pub max_spacing: f64,
    /// Minimum skid count from the standards table.
    pub min_count: usize,
}

/// Weight threshold below which 3x4 skids may be substituted.
pub const LIGHTWEIGHT_3X4_MAX: f64 = 500.0;

/// Select skid lumber and spacing from the product weight.
///
/// Bands follow the lumber-size-vs-weight and skid-size-vs-spacing
/// standards tables; weights beyond the final band stay on 8x8.
pub fn skid_band(weight: f64, allow_3x4: bool) -> SkidBand {
    if weight <= LIGHTWEIGHT_3X4_MAX && allow_3x4 {
        SkidBand { size: LumberSize::L3x4, max_spacing: 30.0, min_count: 3 }
    } else if weight <= 4500.0 {
        SkidBand { size: LumberSize::L4x4, max_spacing: 30.0, min_count: 3 }
    } else if weight <= 6000.0 {
        SkidBand { size: LumberSize::L4x6, max_spacing: 41.0, min_count: 3 }
    } else if weight <= 12000.0 {
        SkidBand { size: LumberSize::L4x6, max_spacing: 28.0, min_count: 4 }
    } else if weight <= 20000.0 {
        SkidBand { size: LumberSize::L4x6, max_spacing: 24.0, min_count: 4 }
    } else if weight <= 30000.0 {
        SkidBand { size: LumberSize::L6x6, max_spacing: 24.0, min_count: 4 }
    } else if weight <= 40000.0 {
        SkidBand { size: LumberSize::L6x6, max_spacing: 20.0, min_count: 5 }
    } else {
        SkidBand { size: LumberSize::L8x8, max_spacing: 24.0, min_count: 5 }
    }
}

/// Cleat standards (1x4 lumber).
pub const CLEAT_WIDTH: f64 = 3.5;
pub const CLEAT_THICKNESS: f64 = 0.75;
/// Maximum unreinforced span between vertical cleats.
pub const MAX_CLEAT_SPACING: f64 = 24.0;
/// Minimum distance from a panel edge for non-perimeter cleats.
pub const MIN_CLEAT_EDGE_DISTANCE: f64 = 2.0;
/// A cleat centered within this distance of a splice is tagged `Splice`.
pub const SPLICE_TAG_TOLERANCE: f64 = 1.0;
/// Horizontal splice-cleat segments shorter than this are dropped.
pub const MIN_CLEAT_SEGMENT: f64 = 0.5;

/// Klimp fastener spacing standards.
pub const KLIMP_MIN_SPACING: f64 = 18.0;
pub const KLIMP_MAX_SPACING: f64 = 24.0;
/// Clearance kept between a klimp and a blocking cleat span.
pub const KLIMP_CLEAT_CLEARANCE: f64 = 1.0;
/// Fixed CAD instance pool size for klimps.
pub const KLIMP_POOL_SIZE: usize = 20;

/// Klimp physical geometry (from the vendor spring-clamp model).
pub const KLIMP_LONG_LEG: f64 = 4.0;
pub const KLIMP_SHORT_LEG: f64 = 3.0;
pub const KLIMP_MATERIAL_THICKNESS: f64 = 0.125;
pub const KLIMP_BODY_WIDTH: f64 = 1.0;

/// Lag screw standards (3/8" x 2.50" hardware).
pub const LAG_DEFAULT_SPACING: f64 = 21.0;
pub const LAG_MIN_SPACING: f64 = 18.0;
pub const LAG_MAX_SPACING: f64 = 24.0;
/// Target spacings round to the nearest 1/16".
pub const LAG_SPACING_INCREMENT: f64 = 0.0625;
pub const LAG_SHANK_DIAMETER: f64 = 0.38;
pub const LAG_SHANK_LENGTH: f64 = 2.5;
pub const LAG_HEAD_DIAMETER: f64 = 0.75;
pub const LAG_HEAD_HEIGHT: f64 = 0.25;

/// Plywood sheet standards.
pub const PLYWOOD_SHEET_WIDTH: f64 = 48.0;
pub const PLYWOOD_SHEET_LENGTH: f64 = 96.0;
pub const DEFAULT_PLYWOOD_THICKNESS: f64 = 0.25;
/// Total panel thickness including cleats.
pub const DEFAULT_PANEL_THICKNESS: f64 = 1.0;
/// Fixed plywood piece slots per panel in the CAD template.
pub const PLYWOOD_SLOTS_PER_PANEL: usize = 6;

/// Fixed floorboard slots in the CAD template.
pub const FLOORBOARD_SLOTS: usize = 40;
/// Narrowest permitted custom-ripped floorboard.
pub const MIN_CUSTOM_FLOORBOARD: f64 = 2.5;

/// Panel stop standards (3/8" plywood strips).
pub const PANEL_STOP_THICKNESS: f64 = 0.375;
pub const PANEL_STOP_WIDTH: f64 = 2.0;
pub const PANEL_STOP_EDGE_INSET: f64 = 0.0625;
/// Stop length is this fraction of the smallest cleated-panel edge.
pub const PANEL_STOP_LENGTH_FACTOR: f64 = 0.5;

/// Default ground clearance for the side (end) panels.
pub const SIDE_PANEL_GROUND_CLEARANCE: f64 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lumber_dims() {
        assert_eq!(LumberSize::L1x4.dims(), LumberDims { thickness: 0.75, width: 3.5 });
        assert_eq!(LumberSize::L2x12.dims().width, 11.25);
        // 3x4 rides on edge: 3.5" vertical for forklift clearance.
        assert_eq!(LumberSize::L3x4.dims(), LumberDims { thickness: 3.5, width: 2.5 });
    }

    #[test]
    fn test_skid_band_thresholds() {
        assert_eq!(skid_band(400.0, true).size, LumberSize::L3x4);
        assert_eq!(skid_band(400.0, false).size, LumberSize::L4x4);
        assert_eq!(skid_band(4500.0, false).size, LumberSize::L4x4);
        assert_eq!(skid_band(5000.0, false).size, LumberSize::L4x6);
        assert_eq!(skid_band(5000.0, false).max_spacing, 41.0);
        assert_eq!(skid_band(10000.0, false).max_spacing, 28.0);
        assert_eq!(skid_band(15000.0, false).max_spacing, 24.0);
        assert_eq!(skid_band(25000.0, false).size, LumberSize::L6x6);
        assert_eq!(skid_band(35000.0, false).max_spacing, 20.0);
        assert_eq!(skid_band(50000.0, false).size, LumberSize::L8x8);
        // Beyond the last band the table saturates.
        assert_eq!(skid_band(90000.0, false).size, LumberSize::L8x8);
    }

    #[test]
    fn test_min_counts_increase_with_weight() {
        assert_eq!(skid_band(2000.0, false).min_count, 3);
        assert_eq!(skid_band(8000.0, false).min_count, 4);
        assert_eq!(skid_band(38000.0, false).min_count, 5);
    }
}
