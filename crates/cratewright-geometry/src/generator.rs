//! The generation pipeline: configuration in, placed parts out.

use glam::DVec3;

use cratewright_core::{
    palette, CrateConfig, Panel, PanelSpliceLayout, Part, PartKind, Rgb, CLEAT_THICKNESS,
    FLOORBOARD_SLOTS, PLYWOOD_SLOTS_PER_PANEL,
};
use cratewright_layout::{
    calculate_cleat_layout, calculate_crate_splicing, cleat::CleatKind,
    cleat::Orientation, cleat::PanelCleatLayout, floorboard::FloorboardRow, klimp::CleatSpan,
    klimp::KlimpLayout, plan_floorboards, skid::plan_skids_for, skid::SkidPlan,
};

use crate::fasteners::{self, KlimpInstance};
use crate::markings;
use crate::stops;
use crate::usage::{self, MaterialUsage};

/// Per-piece plywood shading so adjacent sheets read distinctly in viewers.
const PLY_COLORS: [Rgb; 6] = [
    Rgb::new(0xDE, 0xB8, 0x87),
    Rgb::new(0xD2, 0xB4, 0x8C),
    Rgb::new(0xD9, 0xC2, 0xA3),
    Rgb::new(0xE3, 0xD4, 0xB8),
    Rgb::new(0xDC, 0xBF, 0x9F),
    Rgb::new(0xD7, 0xBF, 0xA5),
];

/// Key crate dimensions shared by every placement formula.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dims {
    pub internal_width: f64,
    pub internal_length: f64,
    pub internal_height: f64,
    pub plywood_thickness: f64,
    pub panel_thickness: f64,
    pub skid_height: f64,
    pub floorboard_thickness: f64,
    /// Top of the floor: skid height plus floorboard thickness.
    pub base_z: f64,
    pub ground_clearance: f64,
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct CrateGeometry {
    /// Normalized configuration the run actually used.
    pub config: CrateConfig,
    /// Every part of the crate, suppressed pool slots included.
    pub parts: Vec<Part>,
    pub skid_plan: SkidPlan,
    pub floorboards: Vec<FloorboardRow>,
    pub splice_layouts: Vec<PanelSpliceLayout>,
    pub cleat_layouts: Vec<PanelCleatLayout>,
    pub klimp_layout: KlimpLayout,
    /// Fixed pool of 20 klimp instances for parametric CAD patterning.
    pub klimp_instances: Vec<KlimpInstance>,
    pub usage: MaterialUsage,
}

impl CrateGeometry {
    /// Parts that carry real geometry.
    pub fn active_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter(|p| !p.suppressed)
    }

    pub fn splice_layout(&self, panel: Panel) -> Option<&PanelSpliceLayout> {
        self.splice_layouts.iter().find(|l| l.panel == panel)
    }

    pub fn cleat_layout(&self, panel: Panel) -> Option<&PanelCleatLayout> {
        self.cleat_layouts.iter().find(|l| l.panel == panel)
    }
}

/// Origin of a panel's plywood face in crate coordinates.
pub(crate) fn plywood_origin(panel: Panel, d: &Dims) -> DVec3 {
    let half_width = d.internal_width / 2.0;
    match panel {
        // Plywood sits behind the cleats; its inner surface lands on the
        // floorboard edge.
        Panel::Front => DVec3::new(
            -half_width - d.panel_thickness,
            d.panel_thickness - d.plywood_thickness,
            d.skid_height,
        ),
        // The back panel shifts one inch past the internal length so its
        // inner face meets the last floorboard's edge.
        Panel::Back => DVec3::new(
            -half_width - d.panel_thickness,
            d.internal_length + 1.0,
            d.skid_height,
        ),
        Panel::LeftEnd => DVec3::new(
            -half_width - d.plywood_thickness,
            d.panel_thickness,
            d.ground_clearance,
        ),
        Panel::RightEnd => DVec3::new(half_width, d.panel_thickness, d.ground_clearance),
        Panel::Top => DVec3::new(
            -half_width - d.panel_thickness,
            0.0,
            d.base_z + d.internal_height,
        ),
    }
}

/// Origin of a panel's cleat plane: one cleat thickness outboard of the
/// plywood.
pub(crate) fn cleat_origin(panel: Panel, d: &Dims) -> DVec3 {
    let ply = plywood_origin(panel, d);
    match panel {
        Panel::Front => DVec3::new(ply.x, ply.y - CLEAT_THICKNESS, ply.z),
        Panel::Back => DVec3::new(ply.x, ply.y + d.plywood_thickness, ply.z),
        Panel::LeftEnd => DVec3::new(ply.x - CLEAT_THICKNESS, ply.y, ply.z),
        Panel::RightEnd => DVec3::new(ply.x + d.plywood_thickness, ply.y, ply.z),
        Panel::Top => DVec3::new(
            ply.x,
            ply.y,
            ply.z + d.panel_thickness - CLEAT_THICKNESS,
        ),
    }
}

/// Map a panel-local rectangle (x right, y up) with a thickness into two
/// diagonal corners in crate coordinates.
pub(crate) fn panel_box(
    panel: Panel,
    origin: DVec3,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    thickness: f64,
) -> (DVec3, DVec3) {
    match panel {
        Panel::Front | Panel::Back => (
            DVec3::new(origin.x + x, origin.y, origin.z + y),
            DVec3::new(origin.x + x + w, origin.y + thickness, origin.z + y + h),
        ),
        Panel::LeftEnd | Panel::RightEnd => (
            DVec3::new(origin.x, origin.y + x, origin.z + y),
            DVec3::new(origin.x + thickness, origin.y + x + w, origin.z + y + h),
        ),
        Panel::Top => (
            DVec3::new(origin.x + x, origin.y + y, origin.z),
            DVec3::new(origin.x + x + w, origin.y + y + h, origin.z + thickness),
        ),
    }
}

/// Run the full pipeline for one configuration.
pub fn generate(config: &CrateConfig) -> CrateGeometry {
    let config = config.normalized();

    let skid_plan = plan_skids_for(&config);
    let floorboard_thickness = config
        .materials
        .available_lumber
        .iter()
        .map(|s| s.dims().thickness)
        .fold(1.5, f64::max);

    let d = Dims {
        internal_width: config.internal_width(),
        internal_length: config.internal_length(),
        internal_height: config.internal_height(),
        plywood_thickness: config.materials.plywood_thickness,
        panel_thickness: config.materials.panel_thickness,
        skid_height: skid_plan.dims.thickness,
        floorboard_thickness,
        base_z: skid_plan.dims.thickness + floorboard_thickness,
        ground_clearance: config.ground_clearance(),
    };

    // Panel outer dimensions for the sheet splicer.
    let front_width = d.internal_width + 2.0 * d.panel_thickness;
    let front_height = d.internal_height + d.floorboard_thickness;
    let side_width = d.internal_length;
    let side_height = d.internal_height + d.floorboard_thickness + d.skid_height - 2.0;
    let top_width = front_width;
    let top_length = d.internal_length + 2.0 * d.panel_thickness;

    let splice_layouts = calculate_crate_splicing(
        front_width,
        front_height,
        side_width,
        side_height,
        top_width,
        top_length,
    );

    let cleat_layouts: Vec<PanelCleatLayout> = splice_layouts
        .iter()
        .map(|layout| {
            calculate_cleat_layout(
                layout.panel,
                layout.panel_width,
                layout.panel_height,
                &layout.splices,
                layout.is_rotated,
            )
        })
        .collect();

    let klimp_layout = solve_klimps(&splice_layouts, &cleat_layouts);

    let mut parts = Vec::new();

    // Shipping base: skids run the full external length.
    let skid_end_y = d.internal_length + 2.0 * d.panel_thickness;
    for (i, &center_x) in skid_plan.positions.iter().enumerate() {
        let x = center_x - skid_plan.dims.width / 2.0;
        let name = if i == 0 { "SKID".to_string() } else { format!("SKID_PATTERN_{i}") };
        let metadata = if i == 0 {
            "Base skid (patterned along X)".to_string()
        } else {
            format!("Pattern instance {i}")
        };
        parts.push(
            Part::new(
                name,
                PartKind::Skid,
                DVec3::new(x, 0.0, 0.0),
                DVec3::new(x + skid_plan.dims.width, skid_end_y, d.skid_height),
                palette::SKID,
            )
            .with_metadata(metadata),
        );
    }

    // Floorboards, padded to the fixed 40-slot pool.
    let floorboards = plan_floorboards(
        d.internal_length,
        &config.materials.available_lumber,
        d.panel_thickness,
    );
    for (i, board) in floorboards.iter().enumerate().take(FLOORBOARD_SLOTS) {
        let color = if board.is_custom() { palette::FLOORBOARD_CUSTOM } else { palette::FLOORBOARD };
        let suffix = if board.is_custom() { " - CUSTOM CUT" } else { "" };
        parts.push(
            Part::new(
                format!("FLOORBOARD_{}", i + 1),
                PartKind::Floor,
                DVec3::new(-d.internal_width / 2.0, board.position, d.skid_height),
                DVec3::new(
                    d.internal_width / 2.0,
                    board.position + board.width,
                    d.skid_height + board.thickness,
                ),
                color,
            )
            .with_metadata(format!(
                "{} ({:.2}\" x {}\"){}",
                board.label(),
                board.width,
                board.thickness,
                suffix
            )),
        );
    }
    for i in floorboards.len()..FLOORBOARD_SLOTS {
        parts.push(Part::suppressed(
            format!("FLOORBOARD_{}", i + 1),
            PartKind::Floor,
            palette::FLOORBOARD,
        ));
    }

    // Crate cap: plywood pieces, six fixed slots per panel.
    for layout in &splice_layouts {
        let origin = plywood_origin(layout.panel, &d);
        let mut slot = 0;
        for sheet in layout.sheets.iter().take(PLYWOOD_SLOTS_PER_PANEL) {
            let (p1, p2) = panel_box(
                layout.panel,
                origin,
                sheet.x,
                sheet.y,
                sheet.width,
                sheet.height,
                d.plywood_thickness,
            );
            parts.push(
                Part::new(
                    format!("{}_PLY_{}", layout.panel.name(), slot + 1),
                    PartKind::Plywood,
                    p1,
                    p2,
                    PLY_COLORS[slot],
                )
                .with_panel(layout.panel)
                .with_piece_index(slot)
                .with_metadata(format!(
                    "Plywood piece {} of {} ({:.1}\" x {:.1}\")",
                    slot + 1,
                    layout.sheets.len(),
                    sheet.width,
                    sheet.height
                )),
            );
            slot += 1;
        }
        while slot < PLYWOOD_SLOTS_PER_PANEL {
            parts.push(
                Part::suppressed(
                    format!("{}_PLY_{}", layout.panel.name(), slot + 1),
                    PartKind::Plywood,
                    palette::PLYWOOD,
                )
                .with_panel(layout.panel)
                .with_piece_index(slot),
            );
            slot += 1;
        }
    }

    // Cleats.
    for layout in &cleat_layouts {
        let origin = cleat_origin(layout.panel, &d);
        for cleat in &layout.cleats {
            let (w, h) = match cleat.orientation {
                Orientation::Horizontal => (cleat.length, cleat.width),
                Orientation::Vertical => (cleat.width, cleat.length),
            };
            let (p1, p2) =
                panel_box(layout.panel, origin, cleat.x, cleat.y, w, h, cleat.thickness);
            let color = match (cleat.kind, cleat.orientation) {
                (CleatKind::Splice, _) => palette::CLEAT_SPLICE,
                (CleatKind::Intermediate, Orientation::Horizontal) => palette::CLEAT_SPLICE,
                _ => palette::CLEAT,
            };
            let kind_label = match cleat.kind {
                CleatKind::Perimeter => "perimeter",
                CleatKind::Intermediate => "intermediate",
                CleatKind::Splice => "splice",
            };
            let orient_label = match cleat.orientation {
                Orientation::Horizontal => "horizontal",
                Orientation::Vertical => "vertical",
            };
            parts.push(
                Part::new(cleat.id.clone(), PartKind::Cleat, p1, p2, color)
                    .with_panel(layout.panel)
                    .with_metadata(format!(
                        "{kind_label} cleat ({orient_label}, {:.1}\" x {}\" x {}\")",
                        cleat.length, cleat.width, cleat.thickness
                    )),
            );
        }
    }

    // Hardware: lag rows on the end and back panels, klimps on the front.
    let lag_screw_count = fasteners::add_lag_hardware(
        &mut parts,
        &cleat_layouts,
        &d,
        config.hardware.lag_target_spacing,
    );
    let klimp_instances = fasteners::add_klimps(&mut parts, &klimp_layout, &d);

    // Panel stops and optional stencils.
    stops::add_panel_stops(&mut parts, &d);
    if let Some(marking_config) = &config.markings {
        markings::add_markings(&mut parts, marking_config, &splice_layouts, &d);
    }

    let usage = usage::summarize(&cleat_layouts, &klimp_layout, &splice_layouts, lag_screw_count);

    CrateGeometry {
        config,
        parts,
        skid_plan,
        floorboards,
        splice_layouts,
        cleat_layouts,
        klimp_layout,
        klimp_instances,
        usage,
    }
}

/// Klimps avoid the front panel's non-perimeter cleats: vertical cleats
/// block the top edge, horizontal ones block both side edges.
fn solve_klimps(
    splice_layouts: &[PanelSpliceLayout],
    cleat_layouts: &[PanelCleatLayout],
) -> KlimpLayout {
    let front_splice = splice_layouts
        .iter()
        .find(|l| l.panel == Panel::Front)
        .expect("front panel layout always present");
    let front_cleats = cleat_layouts
        .iter()
        .find(|l| l.panel == Panel::Front)
        .expect("front panel cleats always present");

    let mut top_spans = Vec::new();
    let mut side_spans = Vec::new();
    for cleat in &front_cleats.cleats {
        if cleat.kind == CleatKind::Perimeter {
            continue;
        }
        match cleat.orientation {
            Orientation::Vertical => {
                top_spans.push(CleatSpan { start: cleat.x, width: cleat.width })
            }
            Orientation::Horizontal => {
                side_spans.push(CleatSpan { start: cleat.y, width: cleat.width })
            }
        }
    }

    cratewright_layout::calculate_klimp_layout(
        front_splice.panel_width,
        front_splice.panel_height,
        &top_spans,
        &side_spans,
    )
}
