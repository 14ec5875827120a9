//! Panel stops: plywood strips that keep panels from collapsing inward
//! while the crate is packed.
//!
//! Two stops face the front panel's side edges and one hangs under the top
//! panel's front edge. Length is half the smallest cleated-panel edge,
//! centered along the stop's run.

use glam::DVec3;

use cratewright_core::{
    palette, Panel, Part, PartKind, PANEL_STOP_EDGE_INSET, PANEL_STOP_LENGTH_FACTOR,
    PANEL_STOP_THICKNESS, PANEL_STOP_WIDTH,
};

use crate::generator::Dims;

pub(crate) fn add_panel_stops(parts: &mut Vec<Part>, d: &Dims) {
    let smallest_edge = d
        .internal_width
        .min(d.internal_height)
        .min(d.internal_length);
    let stop_length = smallest_edge * PANEL_STOP_LENGTH_FACTOR;

    let front_inner_y = d.panel_thickness;
    let half_width = d.internal_width / 2.0;

    // Front panel side stops, centered vertically, inset from the side
    // panels.
    let center_z = d.base_z + d.internal_height / 2.0;
    let left_center_x = -half_width + PANEL_STOP_WIDTH / 2.0 + PANEL_STOP_EDGE_INSET;
    let right_center_x = half_width - PANEL_STOP_WIDTH / 2.0 - PANEL_STOP_EDGE_INSET;

    for (name, center_x) in [
        ("PANEL_STOP_FRONT_LEFT", left_center_x),
        ("PANEL_STOP_FRONT_RIGHT", right_center_x),
    ] {
        parts.push(
            Part::new(
                name,
                PartKind::Plywood,
                DVec3::new(
                    center_x - PANEL_STOP_WIDTH / 2.0,
                    front_inner_y,
                    center_z - stop_length / 2.0,
                ),
                DVec3::new(
                    center_x + PANEL_STOP_WIDTH / 2.0,
                    front_inner_y + PANEL_STOP_THICKNESS,
                    center_z + stop_length / 2.0,
                ),
                palette::PLYWOOD,
            )
            .with_panel(Panel::Front)
            .with_metadata(format!("Panel stop, {stop_length:.2}\" long")),
        );
    }

    // Top panel stop, flush under the panel, one inset behind the front
    // panel's inner face.
    let top_z = d.base_z + d.internal_height;
    let stop_y = front_inner_y + PANEL_STOP_EDGE_INSET;
    parts.push(
        Part::new(
            "PANEL_STOP_TOP_FRONT",
            PartKind::Plywood,
            DVec3::new(-stop_length / 2.0, stop_y, top_z - PANEL_STOP_THICKNESS),
            DVec3::new(stop_length / 2.0, stop_y + PANEL_STOP_WIDTH, top_z),
            palette::PLYWOOD,
        )
        .with_panel(Panel::Top)
        .with_metadata(format!("Panel stop, {stop_length:.2}\" long")),
    );
}
