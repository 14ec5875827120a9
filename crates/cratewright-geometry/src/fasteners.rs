//! Fastener geometry: klimp spring clamps and lag screw hardware.

use glam::DVec3;

use cratewright_core::{
    palette, Panel, Part, PartKind, CLEAT_THICKNESS, KLIMP_BODY_WIDTH, KLIMP_LONG_LEG,
    KLIMP_POOL_SIZE, KLIMP_SHORT_LEG, LAG_HEAD_DIAMETER, LAG_HEAD_HEIGHT, LAG_SHANK_DIAMETER,
    LAG_SHANK_LENGTH,
};
use cratewright_layout::{
    cleat::PanelCleatLayout, klimp::KlimpEdge, klimp::KlimpLayout, solve_panel_lag_rows,
};

use crate::generator::Dims;

/// Small outward offset keeping klimp bodies clear of the panel surface in
/// viewers.
const KLIMP_SURFACE_OFFSET: f64 = 0.05;

/// One slot in the fixed 20-instance klimp pool. Inactive slots carry zero
/// position and rotation so the CAD pattern keeps a stable instance count
/// across crate sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct KlimpInstance {
    pub id: String,
    pub position: DVec3,
    /// Euler angles in degrees.
    pub rotation: DVec3,
    pub edge: KlimpEdge,
    pub active: bool,
}

/// Emit klimp boxes for the active fasteners and build the 20-slot
/// instance pool.
pub(crate) fn add_klimps(
    parts: &mut Vec<Part>,
    layout: &KlimpLayout,
    d: &Dims,
) -> Vec<KlimpInstance> {
    let half_width = d.internal_width / 2.0;
    // Outer face of the front panel's cleat plane.
    let front_face_y =
        d.panel_thickness - d.plywood_thickness - CLEAT_THICKNESS - KLIMP_SURFACE_OFFSET;
    let top_z = d.base_z + d.internal_height;

    for klimp in &layout.klimps {
        let (p1, p2) = match klimp.edge {
            // Top edge: long leg down the panel face, short leg reaching
            // inward over the top panel.
            KlimpEdge::Top => (
                DVec3::new(klimp.x - KLIMP_BODY_WIDTH / 2.0, front_face_y, top_z - KLIMP_LONG_LEG),
                DVec3::new(
                    klimp.x + KLIMP_BODY_WIDTH / 2.0,
                    front_face_y + KLIMP_SHORT_LEG,
                    top_z,
                ),
            ),
            KlimpEdge::Left => (
                DVec3::new(
                    -half_width - d.panel_thickness,
                    front_face_y,
                    d.skid_height + klimp.position - KLIMP_BODY_WIDTH / 2.0,
                ),
                DVec3::new(
                    -half_width - d.panel_thickness + KLIMP_SHORT_LEG,
                    front_face_y + KLIMP_LONG_LEG,
                    d.skid_height + klimp.position + KLIMP_BODY_WIDTH / 2.0,
                ),
            ),
            KlimpEdge::Right => (
                DVec3::new(
                    half_width + d.panel_thickness - KLIMP_SHORT_LEG,
                    front_face_y,
                    d.skid_height + klimp.position - KLIMP_BODY_WIDTH / 2.0,
                ),
                DVec3::new(
                    half_width + d.panel_thickness,
                    front_face_y + KLIMP_LONG_LEG,
                    d.skid_height + klimp.position + KLIMP_BODY_WIDTH / 2.0,
                ),
            ),
        };

        parts.push(
            Part::new(klimp.id.clone(), PartKind::Klimp, p1, p2, palette::KLIMP).with_metadata(
                format!(
                    "Spring clamp on {} edge at {:.1}\"",
                    klimp.edge.label(),
                    klimp.position
                ),
            ),
        );
    }

    build_instances(layout, d)
}

fn build_instances(layout: &KlimpLayout, d: &Dims) -> Vec<KlimpInstance> {
    let mut instances = Vec::with_capacity(KLIMP_POOL_SIZE);

    for (i, klimp) in layout.klimps.iter().take(KLIMP_POOL_SIZE).enumerate() {
        let rotation = match klimp.edge {
            KlimpEdge::Top => DVec3::ZERO,
            KlimpEdge::Left => DVec3::new(0.0, 90.0, 90.0),
            KlimpEdge::Right => DVec3::new(0.0, -90.0, -90.0),
        };
        let position = match klimp.edge {
            KlimpEdge::Top => DVec3::new(klimp.x, 0.0, d.base_z + d.internal_height),
            KlimpEdge::Left | KlimpEdge::Right => {
                DVec3::new(klimp.x, 0.0, d.skid_height + klimp.position)
            }
        };
        instances.push(KlimpInstance {
            id: format!("KLIMP_INSTANCE_{}", i + 1),
            position,
            rotation,
            edge: klimp.edge,
            active: true,
        });
    }

    for i in instances.len()..KLIMP_POOL_SIZE {
        instances.push(KlimpInstance {
            id: format!("KLIMP_INSTANCE_{}", i + 1),
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            edge: KlimpEdge::Top,
            active: false,
        });
    }

    instances
}

/// Lag screws tie the end and back panels to the floor: one head/shank box
/// pair per solved row, on the floorboard centerline, anchored to the
/// panel's vertical cleats.
pub(crate) fn add_lag_hardware(
    parts: &mut Vec<Part>,
    cleat_layouts: &[PanelCleatLayout],
    d: &Dims,
    target_spacing: f64,
) -> usize {
    let mut count = 0;
    let floorboard_mid_z = d.skid_height + d.floorboard_thickness / 2.0;

    for layout in cleat_layouts {
        if !matches!(layout.panel, Panel::LeftEnd | Panel::RightEnd | Panel::Back) {
            continue;
        }

        let centers: Vec<f64> = layout
            .vertical_cleats()
            .iter()
            .map(|c| c.x + c.width / 2.0)
            .collect();
        let rows = solve_panel_lag_rows(layout.panel_width, &centers, target_spacing);

        let origin = crate::generator::cleat_origin(layout.panel, d);
        for (row, &along) in rows.iter().enumerate() {
            let (head, shank) = lag_boxes(layout.panel, origin, along, floorboard_mid_z);
            let base = format!("{}_LAG_{}", layout.panel.name(), row);

            parts.push(
                Part::new(format!("{base}_HEAD"), PartKind::Hardware, head.0, head.1, palette::LAG_HEAD)
                    .with_panel(layout.panel)
                    .with_metadata(format!(
                        "Lag screw head ({LAG_SHANK_DIAMETER}\" x {LAG_SHANK_LENGTH}\"), floorboard centerline"
                    )),
            );
            parts.push(
                Part::new(format!("{base}_SHAFT"), PartKind::Hardware, shank.0, shank.1, palette::LAG_SHANK)
                    .with_panel(layout.panel)
                    .with_metadata(format!(
                        "Lag screw shank ({LAG_SHANK_DIAMETER}\" x {LAG_SHANK_LENGTH}\"), floorboard centerline"
                    )),
            );
            count += 1;
        }
    }

    count
}

type BoxCorners = (DVec3, DVec3);

/// Head and shank boxes for one screw, `along` the panel width from the
/// cleat-plane origin, at height `z`.
fn lag_boxes(panel: Panel, origin: DVec3, along: f64, z: f64) -> (BoxCorners, BoxCorners) {
    let head_r = LAG_HEAD_DIAMETER / 2.0;
    let shank_r = LAG_SHANK_DIAMETER / 2.0;

    match panel {
        Panel::LeftEnd => {
            let center_y = origin.y + along;
            let outside_x = origin.x;
            let head = (
                DVec3::new(outside_x - LAG_HEAD_HEIGHT, center_y - head_r, z - head_r),
                DVec3::new(outside_x, center_y + head_r, z + head_r),
            );
            let shank = (
                DVec3::new(outside_x, center_y - shank_r, z - shank_r),
                DVec3::new(outside_x + LAG_SHANK_LENGTH, center_y + shank_r, z + shank_r),
            );
            (head, shank)
        }
        Panel::RightEnd => {
            let center_y = origin.y + along;
            let outside_x = origin.x + CLEAT_THICKNESS;
            let head = (
                DVec3::new(outside_x, center_y - head_r, z - head_r),
                DVec3::new(outside_x + LAG_HEAD_HEIGHT, center_y + head_r, z + head_r),
            );
            let shank = (
                DVec3::new(outside_x - LAG_SHANK_LENGTH, center_y - shank_r, z - shank_r),
                DVec3::new(outside_x, center_y + shank_r, z + shank_r),
            );
            (head, shank)
        }
        // Back panel screws drive inward along -Y, head flush with the
        // cleat's outer face.
        _ => {
            let center_x = origin.x + along;
            let outside_y = origin.y + CLEAT_THICKNESS;
            let head = (
                DVec3::new(center_x - head_r, outside_y - LAG_HEAD_HEIGHT, z - head_r),
                DVec3::new(center_x + head_r, outside_y, z + head_r),
            );
            let shank = (
                DVec3::new(center_x - shank_r, outside_y - LAG_SHANK_LENGTH, z - shank_r),
                DVec3::new(center_x + shank_r, outside_y, z + shank_r),
            );
            (head, shank)
        }
    }
}
