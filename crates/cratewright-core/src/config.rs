//! Crate configuration.

use crate::lumber::{
    LumberSize, DEFAULT_PANEL_THICKNESS, DEFAULT_PLYWOOD_THICKNESS, LAG_DEFAULT_SPACING,
    LAG_MAX_SPACING, LAG_MIN_SPACING, SIDE_PANEL_GROUND_CLEARANCE,
};

/// Product dimensions and weight.
///
/// Length runs along Y (front to back), width along X, height along Z.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Pounds.
    pub weight: f64,
}

/// Clearance between the product and the crate cavity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clearances {
    /// Each side (X).
    pub side: f64,
    /// Each end (Y).
    pub end: f64,
    /// Top (Z).
    pub top: f64,
}

impl Default for Clearances {
    fn default() -> Self {
        Self { side: 2.0, end: 2.0, top: 3.0 }
    }
}

/// Material selections.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialConfig {
    /// Actual plywood sheet thickness.
    pub plywood_thickness: f64,
    /// Total panel thickness including cleats.
    pub panel_thickness: f64,
    pub cleat_size: LumberSize,
    /// Allow 3x4 skids for products under the lightweight threshold.
    pub allow_3x4_skids: bool,
    /// Lumber sizes the shop has on hand for floorboards. Empty falls back
    /// to 2x6.
    pub available_lumber: Vec<LumberSize>,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            plywood_thickness: DEFAULT_PLYWOOD_THICKNESS,
            panel_thickness: DEFAULT_PANEL_THICKNESS,
            cleat_size: LumberSize::L1x4,
            allow_3x4_skids: false,
            available_lumber: crate::lumber::FLOORBOARD_SIZES.to_vec(),
        }
    }
}

/// Hardware overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardwareConfig {
    /// Target lag-screw row spacing, clamped to [18, 24].
    pub lag_target_spacing: f64,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self { lag_target_spacing: LAG_DEFAULT_SPACING }
    }
}

/// Optional stencil / decal flags.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkingConfig {
    pub logo: bool,
    pub fragile_stencil: bool,
    pub handling_symbols: bool,
}

/// Complete input specification for one generation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrateConfig {
    pub product: ProductDimensions,
    pub clearances: Clearances,
    pub materials: MaterialConfig,
    pub hardware: HardwareConfig,
    pub markings: Option<MarkingConfig>,
    /// Ground clearance for the side panels; `None` uses the 2" standard.
    pub side_ground_clearance: Option<f64>,
}

impl CrateConfig {
    pub fn new(product: ProductDimensions) -> Self {
        Self {
            product,
            clearances: Clearances::default(),
            materials: MaterialConfig::default(),
            hardware: HardwareConfig::default(),
            markings: None,
            side_ground_clearance: None,
        }
    }

    /// Sanitized copy with every out-of-range value replaced by its
    /// documented fallback. Generation always runs on a normalized config;
    /// bad input degrades, it never errors.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();

        // Dimensions clamp into (0, 10000] inches; the engine must finish
        // even for enormous requests, and anything past this bound is a
        // data-entry error, not a crate.
        let clamp_dim = |v: f64| if v.is_finite() && v > 0.0 { v.min(10_000.0) } else { 1.0 };
        cfg.product.length = clamp_dim(self.product.length);
        cfg.product.width = clamp_dim(self.product.width);
        cfg.product.height = clamp_dim(self.product.height);
        cfg.product.weight = if self.product.weight.is_finite() && self.product.weight >= 0.0 {
            self.product.weight
        } else {
            0.0
        };

        let clamp_clearance = |v: f64| if v.is_finite() && v >= 0.0 { v } else { 0.0 };
        cfg.clearances.side = clamp_clearance(self.clearances.side);
        cfg.clearances.end = clamp_clearance(self.clearances.end);
        cfg.clearances.top = clamp_clearance(self.clearances.top);

        if !(cfg.materials.plywood_thickness.is_finite() && cfg.materials.plywood_thickness > 0.0) {
            cfg.materials.plywood_thickness = DEFAULT_PLYWOOD_THICKNESS;
        }
        if !(cfg.materials.panel_thickness.is_finite() && cfg.materials.panel_thickness > 0.0) {
            cfg.materials.panel_thickness = DEFAULT_PANEL_THICKNESS;
        }
        cfg.materials
            .available_lumber
            .retain(|size| crate::lumber::FLOORBOARD_SIZES.contains(size));
        if cfg.materials.available_lumber.is_empty() {
            cfg.materials.available_lumber = vec![LumberSize::L2x6];
        }

        if !cfg.hardware.lag_target_spacing.is_finite() {
            cfg.hardware.lag_target_spacing = LAG_DEFAULT_SPACING;
        }
        cfg.hardware.lag_target_spacing = cfg
            .hardware
            .lag_target_spacing
            .clamp(LAG_MIN_SPACING, LAG_MAX_SPACING);

        if let Some(gc) = cfg.side_ground_clearance {
            if !(gc.is_finite() && gc >= 0.0) {
                cfg.side_ground_clearance = None;
            }
        }

        cfg
    }

    /// Cavity width: product width plus both side clearances.
    pub fn internal_width(&self) -> f64 {
        self.product.width + 2.0 * self.clearances.side
    }

    /// Cavity length: product length plus both end clearances.
    pub fn internal_length(&self) -> f64 {
        self.product.length + 2.0 * self.clearances.end
    }

    /// Cavity height: product height plus the top clearance.
    pub fn internal_height(&self) -> f64 {
        self.product.height + self.clearances.top
    }

    /// Effective side-panel ground clearance.
    pub fn ground_clearance(&self) -> f64 {
        self.side_ground_clearance
            .unwrap_or(SIDE_PANEL_GROUND_CLEARANCE)
    }
}
