//! Skid selection and placement.
//!
//! Skid cross-section comes from the weight-band table; count and spacing
//! keep the two outermost skids flush with the extreme edges of the
//! internal width and spread any intermediates evenly between them. Actual
//! spacing may come in under the table maximum, never over it.

use cratewright_core::{skid_band, CrateConfig, LumberDims, LumberSize};

/// Solved skid arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct SkidPlan {
    pub size: LumberSize,
    pub dims: LumberDims,
    pub count: usize,
    /// Table maximum center-to-center spacing.
    pub max_spacing: f64,
    /// Even spacing actually used between skid centers (0 for a single pair
    /// narrower than one spacing).
    pub actual_spacing: f64,
    /// Skid center X positions, left to right, centered on the crate.
    pub positions: Vec<f64>,
}

/// Plan skids for a product weight over an internal width.
pub fn plan_skids(weight: f64, internal_width: f64, allow_3x4: bool) -> SkidPlan {
    let band = skid_band(weight, allow_3x4);
    let dims = band.size.dims();

    // Narrow crates take exactly the two edge skids regardless of the
    // table minimum.
    let count = if internal_width <= band.max_spacing + dims.width {
        2
    } else {
        let available = internal_width - dims.width;
        let required = (available / band.max_spacing).ceil() as usize + 1;
        required.max(band.min_count)
    };

    let edge_offset = (internal_width - dims.width) / 2.0;
    let actual_spacing = if count > 1 {
        2.0 * edge_offset / (count - 1) as f64
    } else {
        0.0
    };

    let positions = (0..count)
        .map(|i| -edge_offset + i as f64 * actual_spacing)
        .collect();

    SkidPlan {
        size: band.size,
        dims,
        count,
        max_spacing: band.max_spacing,
        actual_spacing,
        positions,
    }
}

/// Convenience wrapper taking the full configuration.
pub fn plan_skids_for(config: &CrateConfig) -> SkidPlan {
    plan_skids(
        config.product.weight,
        config.internal_width(),
        config.materials.allow_3x4_skids,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_crate_gets_two_edge_skids() {
        let plan = plan_skids(2000.0, 30.0, false);
        assert_eq!(plan.size, LumberSize::L4x4);
        assert_eq!(plan.count, 2);
        let edge = (30.0 - 3.5) / 2.0;
        assert_eq!(plan.positions, vec![-edge, edge]);
    }

    #[test]
    fn test_wide_crate_meets_table_minimum() {
        // 40" internal at 4x4: required = ceil(36.5/30)+1 = 3.
        let plan = plan_skids(2000.0, 40.0, false);
        assert_eq!(plan.count, 3);
        assert_eq!(plan.positions[1], 0.0);
    }

    #[test]
    fn test_spacing_never_exceeds_table_maximum() {
        for width in [40.0_f64, 65.0, 90.0, 123.0, 144.0] {
            let plan = plan_skids(15000.0, width, false);
            assert!(plan.actual_spacing <= plan.max_spacing + 1e-9);
            for pair in plan.positions.windows(2) {
                assert!((pair[1] - pair[0] - plan.actual_spacing).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_edge_skids_flush() {
        let plan = plan_skids(25000.0, 100.0, false);
        let edge = (100.0 - plan.dims.width) / 2.0;
        assert!((plan.positions.first().unwrap() + edge).abs() < 1e-9);
        assert!((plan.positions.last().unwrap() - edge).abs() < 1e-9);
    }

    #[test]
    fn test_lightweight_3x4_requires_opt_in() {
        assert_eq!(plan_skids(400.0, 40.0, true).size, LumberSize::L3x4);
        assert_eq!(plan_skids(400.0, 40.0, false).size, LumberSize::L4x4);
    }
}
