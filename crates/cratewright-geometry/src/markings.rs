//! Stencil and decal boxes.
//!
//! Markings are emitted as thin colored boxes on the outer face of the
//! four vertical panels, sized by overall crate height bands. They carry
//! no structural role; the exporter files them under the STENCILS
//! assembly.

use cratewright_core::{
    palette, MarkingConfig, Panel, PanelSpliceLayout, Part, PartKind, Rgb,
};

use crate::generator::{cleat_origin, panel_box, Dims};

const MARKING_THICKNESS: f64 = 0.0625;
/// Corner markings keep this offset from the panel edges.
const EDGE_OFFSET: f64 = 2.0;

struct MarkingDims {
    width: f64,
    height: f64,
    part_number: &'static str,
}

fn logo_dims(overall_height: f64) -> MarkingDims {
    if overall_height <= 37.0 {
        MarkingDims { width: 5.56, height: 4.0, part_number: "0205-02548" }
    } else if overall_height <= 73.0 {
        MarkingDims { width: 8.34, height: 6.0, part_number: "0205-02548 (Scale 1.5X)" }
    } else {
        MarkingDims { width: 11.13, height: 8.0, part_number: "0205-02548 (Scale 2.0X)" }
    }
}

fn fragile_dims(overall_height: f64) -> MarkingDims {
    if overall_height <= 73.0 {
        MarkingDims { width: 8.0, height: 2.31, part_number: "0205-01930" }
    } else {
        MarkingDims { width: 12.0, height: 3.5, part_number: "0205-01930 (Scale 1.5X)" }
    }
}

fn handling_dims(overall_height: f64) -> MarkingDims {
    if overall_height <= 37.0 {
        MarkingDims { width: 3.0, height: 8.25, part_number: "0205-00606" }
    } else {
        MarkingDims { width: 4.0, height: 11.0, part_number: "0205-00605" }
    }
}

pub(crate) fn add_markings(
    parts: &mut Vec<Part>,
    config: &MarkingConfig,
    splice_layouts: &[PanelSpliceLayout],
    d: &Dims,
) {
    let overall_height = d.base_z + d.internal_height + d.panel_thickness;

    for layout in splice_layouts {
        let panel = layout.panel;
        if panel == Panel::Top {
            continue;
        }

        let w = layout.panel_width;
        let h = layout.panel_height;
        let origin = marking_origin(panel, d);

        if config.logo {
            let dims = logo_dims(overall_height);
            // Upper-left corner.
            let rect = (EDGE_OFFSET, h - EDGE_OFFSET - dims.height);
            push_marking(parts, panel, origin, rect, &dims, "LOGO", palette::MARKING_LOGO);
        }
        if config.fragile_stencil {
            let dims = fragile_dims(overall_height);
            // Panel center.
            let rect = ((w - dims.width) / 2.0, (h - dims.height) / 2.0);
            push_marking(parts, panel, origin, rect, &dims, "FRAGILE", palette::MARKING_FRAGILE);
        }
        if config.handling_symbols {
            let dims = handling_dims(overall_height);
            // Upper-right corner.
            let rect = (w - EDGE_OFFSET - dims.width, h - EDGE_OFFSET - dims.height);
            push_marking(parts, panel, origin, rect, &dims, "HANDLING", palette::MARKING_HANDLING);
        }
    }
}

/// Markings sit one thickness outboard of the cleat plane.
fn marking_origin(panel: Panel, d: &Dims) -> glam::DVec3 {
    let cleats = cleat_origin(panel, d);
    match panel {
        Panel::Front => glam::DVec3::new(cleats.x, cleats.y - MARKING_THICKNESS, cleats.z),
        Panel::Back => glam::DVec3::new(cleats.x, cleats.y + cratewright_core::CLEAT_THICKNESS, cleats.z),
        Panel::LeftEnd => glam::DVec3::new(cleats.x - MARKING_THICKNESS, cleats.y, cleats.z),
        Panel::RightEnd => {
            glam::DVec3::new(cleats.x + cratewright_core::CLEAT_THICKNESS, cleats.y, cleats.z)
        }
        Panel::Top => cleats,
    }
}

fn push_marking(
    parts: &mut Vec<Part>,
    panel: Panel,
    origin: glam::DVec3,
    (x, y): (f64, f64),
    dims: &MarkingDims,
    label: &str,
    color: Rgb,
) {
    // A marking that no longer fits the panel face is skipped, not
    // clamped.
    if x < 0.0 || y < 0.0 {
        return;
    }

    let (p1, p2) = panel_box(panel, origin, x, y, dims.width, dims.height, MARKING_THICKNESS);
    parts.push(
        Part::new(
            format!("{}_MARKING_{}", panel.name(), label),
            PartKind::Marking,
            p1,
            p2,
            color,
        )
        .with_panel(panel)
        .with_metadata(format!("{} ({:.2}\" x {:.2}\")", dims.part_number, dims.width, dims.height)),
    );
}

#[cfg(test)]
mod tests {
    use crate::generator::generate;
    use cratewright_core::{CrateConfig, MarkingConfig, PartKind, ProductDimensions};

    fn config_with_markings() -> CrateConfig {
        let mut config = CrateConfig::new(ProductDimensions {
            length: 100.0,
            width: 60.0,
            height: 50.0,
            weight: 8000.0,
        });
        config.markings = Some(MarkingConfig {
            logo: true,
            fragile_stencil: true,
            handling_symbols: true,
        });
        config
    }

    #[test]
    fn test_markings_on_four_vertical_panels() {
        let g = generate(&config_with_markings());
        let markings: Vec<_> =
            g.parts.iter().filter(|p| p.kind == PartKind::Marking).collect();
        // Three marking types across four panels.
        assert_eq!(markings.len(), 12);
        assert!(markings.iter().all(|p| p.panel.is_some()));
    }

    #[test]
    fn test_no_markings_without_flags() {
        let mut config = config_with_markings();
        config.markings = None;
        let g = generate(&config);
        assert!(g.parts.iter().all(|p| p.kind != PartKind::Marking));
    }

    #[test]
    fn test_fragile_centered_on_front_panel() {
        let g = generate(&config_with_markings());
        let fragile = g
            .parts
            .iter()
            .find(|p| p.name == "FRONT_PANEL_MARKING_FRAGILE")
            .unwrap();
        assert!(fragile.center().x.abs() < 1e-9);
    }
}
