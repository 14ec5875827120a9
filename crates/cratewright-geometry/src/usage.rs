//! Material usage summaries for downstream BOM and cut-list services.

use cratewright_core::PanelSpliceLayout;
use cratewright_layout::{cleat::PanelCleatLayout, klimp::KlimpLayout};

/// Klimps ship in boxes of 25.
const KLIMPS_PER_PACKAGE: usize = 25;
/// Cleat stock is 8-foot 1x4.
const CLEAT_STOCK_FEET: f64 = 8.0;

/// Aggregate material consumption for one crate.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialUsage {
    pub total_cleats: usize,
    pub cleat_linear_feet: f64,
    /// 8-foot 1x4 boards needed for the cleats.
    pub cleat_board_count: usize,
    pub total_klimps: usize,
    pub klimp_packages: usize,
    pub lag_screw_count: usize,
    pub plywood_sheet_count: usize,
}

pub(crate) fn summarize(
    cleat_layouts: &[PanelCleatLayout],
    klimp_layout: &KlimpLayout,
    splice_layouts: &[PanelSpliceLayout],
    lag_screw_count: usize,
) -> MaterialUsage {
    let total_cleats: usize = cleat_layouts.iter().map(|l| l.cleats.len()).sum();
    let linear_inches: f64 = cleat_layouts
        .iter()
        .flat_map(|l| l.cleats.iter())
        .map(|c| c.length)
        .sum();
    let cleat_linear_feet = linear_inches / 12.0;

    let total_klimps = klimp_layout.total();

    MaterialUsage {
        total_cleats,
        cleat_linear_feet,
        cleat_board_count: (cleat_linear_feet / CLEAT_STOCK_FEET).ceil() as usize,
        total_klimps,
        klimp_packages: total_klimps.div_ceil(KLIMPS_PER_PACKAGE),
        lag_screw_count,
        plywood_sheet_count: splice_layouts.iter().map(|l| l.sheet_count).sum(),
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::generate;
    use cratewright_core::{CrateConfig, ProductDimensions};

    #[test]
    fn test_usage_consistent_with_layouts() {
        let g = generate(&CrateConfig::new(ProductDimensions {
            length: 100.0,
            width: 60.0,
            height: 50.0,
            weight: 8000.0,
        }));

        let cleats: usize = g.cleat_layouts.iter().map(|l| l.cleats.len()).sum();
        assert_eq!(g.usage.total_cleats, cleats);
        assert_eq!(g.usage.total_klimps, g.klimp_layout.total());
        assert!(g.usage.cleat_board_count >= 1);
        assert!(g.usage.klimp_packages >= 1);
        assert!(g.usage.plywood_sheet_count >= 5);
    }
}
