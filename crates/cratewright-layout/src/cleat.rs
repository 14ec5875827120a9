//! Cleat placement solver.
//!
//! Cleats are 1x4 strips reinforcing a panel's outer face, placed in
//! panel-local 2D coordinates (x right, y up from the lower-left corner):
//! - every panel carries four perimeter cleats; the pair along the panel's
//!   primary axis runs full length, the perpendicular pair is inset by one
//!   cleat width
//! - a vertical cleat is centered over every vertical plywood splice that
//!   clears the panel edges
//! - spans wider than 24" between vertical cleats get evenly spaced
//!   intermediates
//! - horizontal splice rows get cleats cut to fit the segments between
//!   vertical cleats

use cratewright_core::{
    Panel, Splice, SpliceOrientation, CLEAT_THICKNESS, CLEAT_WIDTH, MAX_CLEAT_SPACING,
    MIN_CLEAT_EDGE_DISTANCE, MIN_CLEAT_SEGMENT, SPLICE_TAG_TOLERANCE,
};

/// Cleat role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleatKind {
    Perimeter,
    Intermediate,
    /// Centered over a plywood splice seam.
    Splice,
}

/// Cleat orientation in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One cleat in panel-local coordinates. `x`/`y` locate the lower-left
/// corner of the strip; `length` runs along `orientation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleat {
    pub id: String,
    pub kind: CleatKind,
    pub orientation: Orientation,
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
}

/// All cleats for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelCleatLayout {
    pub panel: Panel,
    pub panel_width: f64,
    pub panel_height: f64,
    pub cleats: Vec<Cleat>,
    pub is_rotated: bool,
}

impl PanelCleatLayout {
    /// Vertical cleats sorted by x, perimeter included.
    pub fn vertical_cleats(&self) -> Vec<&Cleat> {
        let mut v: Vec<&Cleat> = self
            .cleats
            .iter()
            .filter(|c| c.orientation == Orientation::Vertical)
            .collect();
        v.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        v
    }
}

fn perimeter_cleat(
    panel: Panel,
    orientation: Orientation,
    edge: &str,
    x: f64,
    y: f64,
    length: f64,
) -> Cleat {
    Cleat {
        id: format!("{}_CLEAT_{}", panel.name(), edge),
        kind: CleatKind::Perimeter,
        orientation,
        x,
        y,
        length,
        width: CLEAT_WIDTH,
        thickness: CLEAT_THICKNESS,
    }
}

/// Compute the cleat layout for one panel.
pub fn calculate_cleat_layout(
    panel: Panel,
    panel_width: f64,
    panel_height: f64,
    splices: &[Splice],
    is_rotated: bool,
) -> PanelCleatLayout {
    let mut cleats = Vec::new();

    if panel.is_end() {
        // End panels: vertical perimeter cleats run full height, the
        // horizontal pair sits between them.
        cleats.push(perimeter_cleat(panel, Orientation::Vertical, "LEFT", 0.0, 0.0, panel_height));
        cleats.push(perimeter_cleat(
            panel,
            Orientation::Vertical,
            "RIGHT",
            panel_width - CLEAT_WIDTH,
            0.0,
            panel_height,
        ));
        cleats.push(perimeter_cleat(
            panel,
            Orientation::Horizontal,
            "BOTTOM",
            CLEAT_WIDTH,
            0.0,
            panel_width - 2.0 * CLEAT_WIDTH,
        ));
        cleats.push(perimeter_cleat(
            panel,
            Orientation::Horizontal,
            "TOP",
            CLEAT_WIDTH,
            panel_height - CLEAT_WIDTH,
            panel_width - 2.0 * CLEAT_WIDTH,
        ));
    } else {
        // Front/back/top: horizontal perimeter cleats run full width, the
        // vertical pair sits between them.
        cleats.push(perimeter_cleat(panel, Orientation::Horizontal, "BOTTOM", 0.0, 0.0, panel_width));
        cleats.push(perimeter_cleat(
            panel,
            Orientation::Horizontal,
            "TOP",
            0.0,
            panel_height - CLEAT_WIDTH,
            panel_width,
        ));
        cleats.push(perimeter_cleat(
            panel,
            Orientation::Vertical,
            "LEFT",
            0.0,
            CLEAT_WIDTH,
            panel_height - 2.0 * CLEAT_WIDTH,
        ));
        cleats.push(perimeter_cleat(
            panel,
            Orientation::Vertical,
            "RIGHT",
            panel_width - CLEAT_WIDTH,
            CLEAT_WIDTH,
            panel_height - 2.0 * CLEAT_WIDTH,
        ));
    }

    // Vertical splice and intermediate cleats, sandwiched between the
    // horizontal perimeter cleats.
    let vertical_positions = vertical_cleat_positions(panel_width, splices);
    for (index, &x) in vertical_positions.iter().enumerate() {
        let cleat_center = x + CLEAT_WIDTH / 2.0;
        let on_splice = splices.iter().any(|s| {
            s.orientation == SpliceOrientation::Vertical
                && (s.x - cleat_center).abs() < SPLICE_TAG_TOLERANCE
        });

        cleats.push(Cleat {
            id: format!("{}_CLEAT_V_{}", panel.name(), index),
            kind: if on_splice { CleatKind::Splice } else { CleatKind::Intermediate },
            orientation: Orientation::Vertical,
            x,
            y: CLEAT_WIDTH,
            length: panel_height - 2.0 * CLEAT_WIDTH,
            width: CLEAT_WIDTH,
            thickness: CLEAT_THICKNESS,
        });
    }

    // Horizontal splice rows, cut to fit between the vertical cleats.
    let mut row_positions: Vec<f64> = splices
        .iter()
        .filter(|s| s.orientation == SpliceOrientation::Horizontal)
        .map(|s| s.y)
        .collect();
    row_positions.sort_by(|a, b| a.partial_cmp(b).unwrap());

    if !row_positions.is_empty() {
        let mut verticals: Vec<(f64, f64)> = cleats
            .iter()
            .filter(|c| c.orientation == Orientation::Vertical)
            .map(|c| (c.x, c.x + c.width))
            .collect();
        verticals.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        cleats.extend(cut_horizontal_cleats(panel, panel_width, &row_positions, &verticals));
    }

    PanelCleatLayout { panel, panel_width, panel_height, cleats, is_rotated }
}

/// Vertical cleat x positions beyond the perimeter pair: one centered over
/// each eligible splice, then evenly spaced intermediates in any remaining
/// span wider than the 24" maximum.
fn vertical_cleat_positions(panel_width: f64, splices: &[Splice]) -> Vec<f64> {
    let mut candidates: Vec<f64> = Vec::new();

    // Perimeter cleats bound the spacing checks but are placed separately.
    let perimeter = [0.0, panel_width - CLEAT_WIDTH];

    let mut splice_xs: Vec<f64> = splices
        .iter()
        .filter(|s| s.orientation == SpliceOrientation::Vertical)
        .map(|s| s.x)
        .collect();
    splice_xs.sort_by(|a, b| a.partial_cmp(b).unwrap());

    for splice_x in splice_xs {
        let cleat_x = splice_x - CLEAT_WIDTH / 2.0;
        if cleat_x >= 0.0
            && cleat_x + CLEAT_WIDTH <= panel_width
            && cleat_x > MIN_CLEAT_EDGE_DISTANCE
            && cleat_x < panel_width - CLEAT_WIDTH - MIN_CLEAT_EDGE_DISTANCE
        {
            candidates.push(cleat_x);
        }
    }

    let mut boundaries: Vec<f64> = perimeter.iter().chain(candidates.iter()).copied().collect();
    dedup_sorted(&mut boundaries);

    let mut intermediates = Vec::new();
    for window in boundaries.windows(2) {
        let span_start = window[0] + CLEAT_WIDTH;
        let span_end = window[1];
        let gap = span_end - span_start;

        if gap > MAX_CLEAT_SPACING {
            let count = (gap / MAX_CLEAT_SPACING).ceil() as usize - 1;
            let spacing = gap / (count + 1) as f64;
            for j in 1..=count {
                let x = span_start + j as f64 * spacing - CLEAT_WIDTH / 2.0;
                if x > MIN_CLEAT_EDGE_DISTANCE
                    && x + CLEAT_WIDTH < panel_width - MIN_CLEAT_EDGE_DISTANCE
                {
                    intermediates.push(x);
                }
            }
        }
    }

    candidates.extend(intermediates);
    dedup_sorted(&mut candidates);
    candidates
}

/// Sort ascending and drop positions that round to the same 0.01".
fn dedup_sorted(positions: &mut Vec<f64>) {
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    positions.dedup_by(|a, b| (*a * 100.0).round() == (*b * 100.0).round());
}

/// Horizontal cleats for each splice row, cut into the segments between
/// consecutive vertical cleats (plus the leading and trailing segments).
fn cut_horizontal_cleats(
    panel: Panel,
    panel_width: f64,
    row_positions: &[f64],
    verticals: &[(f64, f64)],
) -> Vec<Cleat> {
    let mut cleats = Vec::new();

    for (row, &y) in row_positions.iter().enumerate() {
        let cleat_y = y - CLEAT_WIDTH / 2.0;
        let mut index = 0;
        let mut push = |x: f64, length: f64, index: &mut usize| {
            if length > MIN_CLEAT_SEGMENT {
                cleats.push(Cleat {
                    id: format!("{}_CLEAT_H_INTER_{}_{}", panel.name(), row, index),
                    kind: CleatKind::Intermediate,
                    orientation: Orientation::Horizontal,
                    x,
                    y: cleat_y,
                    length,
                    width: CLEAT_WIDTH,
                    thickness: CLEAT_THICKNESS,
                });
                *index += 1;
            }
        };

        if verticals.is_empty() {
            push(0.0, panel_width, &mut index);
            continue;
        }

        // Leading segment before the first vertical cleat.
        push(0.0, verticals[0].0, &mut index);

        for pair in verticals.windows(2) {
            let start = pair[0].1;
            push(start, pair[1].0 - start, &mut index);
        }

        // Trailing segment after the last vertical cleat.
        let start = verticals.last().unwrap().1;
        push(start, panel_width - start, &mut index);
    }

    cleats
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratewright_core::Splice;

    fn splice_v(x: f64) -> Splice {
        Splice { x, y: 0.0, orientation: SpliceOrientation::Vertical }
    }

    fn splice_h(y: f64) -> Splice {
        Splice { x: 0.0, y, orientation: SpliceOrientation::Horizontal }
    }

    fn perimeter_count(layout: &PanelCleatLayout, orientation: Orientation) -> usize {
        layout
            .cleats
            .iter()
            .filter(|c| c.kind == CleatKind::Perimeter && c.orientation == orientation)
            .count()
    }

    #[test]
    fn test_every_panel_has_four_perimeter_cleats() {
        for panel in Panel::ALL {
            let layout = calculate_cleat_layout(panel, 48.0, 40.0, &[], false);
            assert_eq!(perimeter_count(&layout, Orientation::Horizontal), 2);
            assert_eq!(perimeter_count(&layout, Orientation::Vertical), 2);
        }
    }

    #[test]
    fn test_primary_axis_runs_full_length() {
        let front = calculate_cleat_layout(Panel::Front, 60.0, 40.0, &[], false);
        let horizontals: Vec<_> = front
            .cleats
            .iter()
            .filter(|c| c.kind == CleatKind::Perimeter && c.orientation == Orientation::Horizontal)
            .collect();
        assert!(horizontals.iter().all(|c| c.length == 60.0));

        let end = calculate_cleat_layout(Panel::LeftEnd, 60.0, 40.0, &[], false);
        let verticals: Vec<_> = end
            .cleats
            .iter()
            .filter(|c| c.kind == CleatKind::Perimeter && c.orientation == Orientation::Vertical)
            .collect();
        assert!(verticals.iter().all(|c| c.length == 40.0));
        // Inset pair is shortened by two cleat widths.
        let horizontals: Vec<_> = end
            .cleats
            .iter()
            .filter(|c| c.kind == CleatKind::Perimeter && c.orientation == Orientation::Horizontal)
            .collect();
        assert!(horizontals.iter().all(|c| c.length == 53.0));
    }

    #[test]
    fn test_splice_cleat_centered_over_seam() {
        let layout = calculate_cleat_layout(Panel::Front, 96.0, 48.0, &[splice_v(48.0)], false);
        let splice_cleats: Vec<_> =
            layout.cleats.iter().filter(|c| c.kind == CleatKind::Splice).collect();
        assert_eq!(splice_cleats.len(), 1);
        assert!((splice_cleats[0].x + CLEAT_WIDTH / 2.0 - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_splice_too_close_to_edge_is_skipped() {
        let layout = calculate_cleat_layout(Panel::Front, 96.0, 48.0, &[splice_v(1.0)], false);
        assert!(layout.cleats.iter().all(|c| c.kind != CleatKind::Splice));
    }

    #[test]
    fn test_wide_gaps_receive_intermediates() {
        // 60" wide with no splices: span between perimeter cleats is 53",
        // needing ceil(53/24)-1 = 2 intermediates.
        let layout = calculate_cleat_layout(Panel::Front, 60.0, 40.0, &[], false);
        let intermediates: Vec<_> = layout
            .cleats
            .iter()
            .filter(|c| c.kind == CleatKind::Intermediate && c.orientation == Orientation::Vertical)
            .collect();
        assert_eq!(intermediates.len(), 2);
    }

    #[test]
    fn test_no_gap_wider_than_maximum() {
        for width in [30.0_f64, 49.0, 60.0, 97.0, 120.0, 144.0] {
            let layout = calculate_cleat_layout(Panel::Front, width, 48.0, &[], false);
            let verticals = layout.vertical_cleats();
            for pair in verticals.windows(2) {
                let gap = pair[1].x - (pair[0].x + pair[0].width);
                assert!(
                    gap <= MAX_CLEAT_SPACING + 1e-6,
                    "gap {gap} exceeds max at width {width}"
                );
            }
        }
    }

    #[test]
    fn test_spliced_wide_panel_layout() {
        let splices = [splice_v(48.0), splice_v(84.0), splice_h(48.0)];
        let layout = calculate_cleat_layout(Panel::Front, 120.0, 96.0, &splices, false);

        let perimeter =
            layout.cleats.iter().filter(|c| c.kind == CleatKind::Perimeter).count();
        assert_eq!(perimeter, 4);

        let non_perimeter_verticals: Vec<_> = layout
            .cleats
            .iter()
            .filter(|c| c.orientation == Orientation::Vertical && c.kind != CleatKind::Perimeter)
            .collect();
        assert!(non_perimeter_verticals.len() >= 2);
        assert!(non_perimeter_verticals.iter().any(|c| c.kind == CleatKind::Splice));

        let horizontal_inters: Vec<_> = layout
            .cleats
            .iter()
            .filter(|c| {
                c.orientation == Orientation::Horizontal && c.kind == CleatKind::Intermediate
            })
            .collect();
        assert!(!horizontal_inters.is_empty());
        assert!(horizontal_inters.iter().all(|c| c.length < 120.0));
    }

    #[test]
    fn test_horizontal_row_with_no_verticals_runs_full_width() {
        // Narrow panel: no intermediate verticals fit, but the perimeter
        // verticals still cut the row.
        let layout = calculate_cleat_layout(Panel::Front, 20.0, 60.0, &[splice_h(30.0)], false);
        let row: Vec<_> = layout
            .cleats
            .iter()
            .filter(|c| c.orientation == Orientation::Horizontal && c.kind == CleatKind::Intermediate)
            .collect();
        assert_eq!(row.len(), 1);
        assert!((row[0].x - CLEAT_WIDTH).abs() < 1e-9);
        assert!((row[0].length - (20.0 - 2.0 * CLEAT_WIDTH)).abs() < 1e-9);
    }

    #[test]
    fn test_short_segments_dropped() {
        // Splice right next to the perimeter leaves a sub-0.5" leading
        // segment that must not produce a sliver cleat.
        let layout =
            calculate_cleat_layout(Panel::Front, 96.0, 48.0, &[splice_v(5.5), splice_h(24.0)], false);
        for cleat in layout
            .cleats
            .iter()
            .filter(|c| c.orientation == Orientation::Horizontal && c.kind == CleatKind::Intermediate)
        {
            assert!(cleat.length > MIN_CLEAT_SEGMENT);
        }
    }
}
