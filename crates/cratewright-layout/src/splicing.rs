//! Default plywood sheet splicer.
//!
//! The splicer is a collaborator consumed through its interface; this
//! default provider covers a panel with 48x96 sheets, keeps full columns on
//! the left and full rows on top, and reports the seams between sheets as
//! splices (vertical remainder column on the right, horizontal remainder
//! row at the bottom). A panel that fits one rotated sheet is rotated when
//! that removes every splice.

use cratewright_core::{
    Panel, PanelSpliceLayout, SheetSection, Splice, SpliceOrientation, PLYWOOD_SHEET_LENGTH,
    PLYWOOD_SHEET_WIDTH,
};

const EPS: f64 = 1e-9;
/// Minimum height of the bottom remainder row, so stacked splice cleats
/// clear the bottom perimeter cleat.
const MIN_BOTTOM_ROW: f64 = 7.25;

/// Compute the sheet and splice layout for one panel.
pub fn calculate_panel_splicing(
    panel: Panel,
    panel_width: f64,
    panel_height: f64,
    allow_rotation: bool,
) -> PanelSpliceLayout {
    let fits_upright = panel_width <= PLYWOOD_SHEET_WIDTH + EPS
        && panel_height <= PLYWOOD_SHEET_LENGTH + EPS;
    let fits_rotated = panel_width <= PLYWOOD_SHEET_LENGTH + EPS
        && panel_height <= PLYWOOD_SHEET_WIDTH + EPS;

    if fits_upright {
        return single_sheet(panel, panel_width, panel_height, false);
    }
    if allow_rotation && fits_rotated {
        return single_sheet(panel, panel_width, panel_height, true);
    }

    grid_layout(panel, panel_width, panel_height)
}

fn single_sheet(panel: Panel, width: f64, height: f64, is_rotated: bool) -> PanelSpliceLayout {
    PanelSpliceLayout {
        panel,
        panel_width: width,
        panel_height: height,
        sheet_count: 1,
        sheets: vec![SheetSection {
            id: format!("{}_SHEET_1", panel.name()),
            x: 0.0,
            y: 0.0,
            width,
            height,
        }],
        splices: Vec::new(),
        is_rotated,
    }
}

fn grid_layout(panel: Panel, panel_width: f64, panel_height: f64) -> PanelSpliceLayout {
    // Full 48" columns from the left, remainder on the right.
    let mut col_widths = Vec::new();
    let mut remaining = panel_width;
    while remaining > PLYWOOD_SHEET_WIDTH + EPS {
        col_widths.push(PLYWOOD_SHEET_WIDTH);
        remaining -= PLYWOOD_SHEET_WIDTH;
    }
    if remaining > EPS {
        col_widths.push(remaining);
    }

    // Full 96" rows from the top, remainder at the bottom, held at the
    // minimum clearance height when it comes out shorter.
    let full_rows = (panel_height / PLYWOOD_SHEET_LENGTH).floor() as usize;
    let mut row_heights = Vec::new(); // bottom-up
    let remainder = panel_height - full_rows as f64 * PLYWOOD_SHEET_LENGTH;
    if remainder > EPS {
        row_heights.push(remainder);
        for _ in 0..full_rows {
            row_heights.push(PLYWOOD_SHEET_LENGTH);
        }
        if row_heights.len() > 1 && row_heights[0] < MIN_BOTTOM_ROW {
            let shift = MIN_BOTTOM_ROW - row_heights[0];
            row_heights[0] = MIN_BOTTOM_ROW;
            row_heights[1] -= shift;
        }
    } else {
        for _ in 0..full_rows.max(1) {
            row_heights.push(PLYWOOD_SHEET_LENGTH.min(panel_height));
        }
    }

    let mut sheets = Vec::new();
    let mut splices = Vec::new();

    let mut y = 0.0;
    for (row, &height) in row_heights.iter().enumerate() {
        if row > 0 {
            splices.push(Splice { x: 0.0, y, orientation: SpliceOrientation::Horizontal });
        }
        let mut x = 0.0;
        for (col, &width) in col_widths.iter().enumerate() {
            if row == 0 && col > 0 {
                splices.push(Splice { x, y: 0.0, orientation: SpliceOrientation::Vertical });
            }
            sheets.push(SheetSection {
                id: format!("{}_SHEET_{}", panel.name(), sheets.len() + 1),
                x,
                y,
                width,
                height,
            });
            x += width;
        }
        y += height;
    }

    PanelSpliceLayout {
        panel,
        panel_width,
        panel_height,
        sheet_count: sheets.len(),
        sheets,
        splices,
        is_rotated: false,
    }
}

/// Splice layouts for all five panels of a crate.
pub fn calculate_crate_splicing(
    front_width: f64,
    front_height: f64,
    side_width: f64,
    side_height: f64,
    top_width: f64,
    top_length: f64,
) -> Vec<PanelSpliceLayout> {
    vec![
        calculate_panel_splicing(Panel::Front, front_width, front_height, true),
        calculate_panel_splicing(Panel::Back, front_width, front_height, true),
        calculate_panel_splicing(Panel::LeftEnd, side_width, side_height, true),
        calculate_panel_splicing(Panel::RightEnd, side_width, side_height, true),
        calculate_panel_splicing(Panel::Top, top_width, top_length, true),
    ]
}
