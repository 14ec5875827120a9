//! Klimp fastener placement solver.
//!
//! Klimps are L-shaped spring clamps joining the front panel to the top and
//! end panels. Positions run along the front panel's top, left, and right
//! edges with 18"-24" spacing, staying clear of intermediate and splice
//! cleats. Left and right edges share one solved position set, so the two
//! sides are mirror images by construction.

use cratewright_core::{
    Panel, CLEAT_WIDTH, KLIMP_CLEAT_CLEARANCE, KLIMP_MAX_SPACING, KLIMP_MIN_SPACING,
};

const EPS: f64 = 1e-9;
/// Side-edge anchors sit above the bottom perimeter cleat and below the
/// top corner.
const SIDE_BOTTOM_OFFSET: f64 = 2.0;
const SIDE_TOP_OFFSET: f64 = 4.0;

/// Which front-panel edge a klimp sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KlimpEdge {
    Top,
    Left,
    Right,
}

impl KlimpEdge {
    pub const fn label(self) -> &'static str {
        match self {
            KlimpEdge::Top => "top",
            KlimpEdge::Left => "left",
            KlimpEdge::Right => "right",
        }
    }
}

/// One placed fastener. `position` is the scalar distance along the edge
/// (from the panel's left edge for the top, from the panel bottom for the
/// sides); `x`/`y`/`z` are panel-centered coordinates refined by the
/// geometry stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Klimp {
    pub id: String,
    pub edge: KlimpEdge,
    pub position: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Solved klimp set for the front panel.
#[derive(Debug, Clone, PartialEq)]
pub struct KlimpLayout {
    pub panel: Panel,
    pub klimps: Vec<Klimp>,
}

impl KlimpLayout {
    pub fn total(&self) -> usize {
        self.klimps.len()
    }

    pub fn positions(&self, edge: KlimpEdge) -> Vec<f64> {
        self.klimps
            .iter()
            .filter(|k| k.edge == edge)
            .map(|k| k.position)
            .collect()
    }
}

/// A cleat footprint along an edge, measured in the edge's scalar
/// coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleatSpan {
    pub start: f64,
    pub width: f64,
}

/// Merge cleat spans (grown by the clearance) into disjoint blocked
/// intervals, sorted ascending.
fn blocked_intervals(cleats: &[CleatSpan], clearance: f64) -> Vec<(f64, f64)> {
    let mut intervals: Vec<(f64, f64)> = cleats
        .iter()
        .map(|c| (c.start - clearance, c.start + c.width + clearance))
        .collect();
    intervals.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    let mut merged: Vec<(f64, f64)> = Vec::new();
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.0 <= last.1 + EPS => last.1 = last.1.max(interval.1),
            _ => merged.push(interval),
        }
    }
    merged
}

fn containing_interval(x: f64, blocked: &[(f64, f64)]) -> Option<(f64, f64)> {
    blocked
        .iter()
        .copied()
        .find(|&(lo, hi)| x > lo + EPS && x < hi - EPS)
}

fn snap_forward(mut x: f64, blocked: &[(f64, f64)]) -> f64 {
    while let Some((_, hi)) = containing_interval(x, blocked) {
        x = hi;
    }
    x
}

fn snap_backward(mut x: f64, blocked: &[(f64, f64)]) -> f64 {
    while let Some((lo, _)) = containing_interval(x, blocked) {
        x = lo;
    }
    x
}

/// Legal position within `[lo, hi]` nearest `target`, or `None` when the
/// whole window is blocked.
fn legal_near(target: f64, lo: f64, hi: f64, blocked: &[(f64, f64)]) -> Option<f64> {
    if hi < lo - EPS {
        return None;
    }

    let mut candidates = vec![target.clamp(lo, hi)];
    for &(start, end) in blocked {
        if start >= lo - EPS && start <= hi + EPS {
            candidates.push(start);
        }
        if end >= lo - EPS && end <= hi + EPS {
            candidates.push(end);
        }
    }

    candidates
        .into_iter()
        .filter(|&c| c >= lo - EPS && c <= hi + EPS)
        .filter(|&c| containing_interval(c, blocked).is_none())
        .map(|c| (c, (c - target).abs()))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.0.partial_cmp(&b.0).unwrap()))
        .map(|(c, _)| c)
}

/// True when a remaining span of `r` can still be divided into gaps within
/// `[min_spacing, max_spacing]` with both ends pinned.
fn feasible_span(r: f64, min_spacing: f64, max_spacing: f64) -> bool {
    if r <= max_spacing + EPS {
        return r >= min_spacing - EPS;
    }
    let gaps = (r / max_spacing).ceil();
    r >= min_spacing * gaps - EPS
}

/// Place fasteners along one edge.
///
/// Anchors snap out of blocked intervals (start forward, end backward);
/// interior points advance by the maximum spacing, clamped into the
/// nearest legal window that still respects the minimum and leaves the
/// remaining run divisible into legal gaps. A final gap below the minimum
/// drops the previous point; one above the maximum inserts a replacement.
/// Pathologically blocked edges may place fewer points than the nominal
/// minimum; the walk never places an illegal one.
pub fn place_along_edge(
    span_start: f64,
    span_end: f64,
    blocked: &[(f64, f64)],
    min_spacing: f64,
    max_spacing: f64,
) -> Vec<f64> {
    let start = snap_forward(span_start, blocked);
    let end = snap_backward(span_end, blocked);

    if end < start - EPS {
        return Vec::new();
    }
    if end - start < min_spacing - EPS {
        // Too short for a pair: one centered fastener if any legal spot
        // remains.
        return legal_near((start + end) / 2.0, start, end, blocked)
            .map(|p| vec![p])
            .unwrap_or_default();
    }

    let mut points = vec![start];
    let mut current = start;

    while end - current > max_spacing + EPS {
        let lo = current + min_spacing;
        let greedy_hi = (current + max_spacing).min(end - min_spacing);
        if greedy_hi < lo - EPS {
            break;
        }

        // Pull the step back until the leftover run stays divisible; a run
        // that can never be divided takes the greedy step and lets the
        // terminal gap overshoot (documented degenerate behavior).
        let mut hi = greedy_hi;
        loop {
            if hi < lo - EPS {
                hi = greedy_hi;
                break;
            }
            let remainder = end - hi;
            if feasible_span(remainder, min_spacing, max_spacing) {
                break;
            }
            let gaps = (remainder / max_spacing).ceil().max(1.0);
            hi = end - min_spacing * gaps;
        }

        match legal_near(current + max_spacing, lo, hi, blocked) {
            Some(p) if p > current + EPS => {
                points.push(p);
                current = p;
            }
            _ => break,
        }
    }

    if end - current < min_spacing - EPS && points.len() > 1 {
        points.pop();
        current = *points.last().unwrap();
        if end - current > max_spacing + EPS {
            let lo = current + min_spacing;
            let hi = (current + max_spacing).min(end - min_spacing);
            if let Some(p) = legal_near(current + max_spacing, lo, hi, blocked) {
                if p > current + EPS {
                    points.push(p);
                }
            }
        }
    }

    points.push(end);
    points
}

/// Solve klimp positions for the front panel.
///
/// `top_cleats` are the vertical intermediate/splice cleat footprints
/// measured along the panel width; `side_cleats` are the horizontal ones
/// measured along the panel height (identical for both sides).
pub fn calculate_klimp_layout(
    panel_width: f64,
    panel_height: f64,
    top_cleats: &[CleatSpan],
    side_cleats: &[CleatSpan],
) -> KlimpLayout {
    let top_blocked = blocked_intervals(top_cleats, KLIMP_CLEAT_CLEARANCE);
    let side_blocked = blocked_intervals(side_cleats, KLIMP_CLEAT_CLEARANCE);

    let top_positions = place_along_edge(
        CLEAT_WIDTH + KLIMP_CLEAT_CLEARANCE,
        panel_width - CLEAT_WIDTH - KLIMP_CLEAT_CLEARANCE,
        &top_blocked,
        KLIMP_MIN_SPACING,
        KLIMP_MAX_SPACING,
    );
    let side_positions = place_along_edge(
        CLEAT_WIDTH + SIDE_BOTTOM_OFFSET,
        panel_height - SIDE_TOP_OFFSET,
        &side_blocked,
        KLIMP_MIN_SPACING,
        KLIMP_MAX_SPACING,
    );

    let mut klimps = Vec::new();
    let mut id = 0usize;

    for &position in &top_positions {
        klimps.push(Klimp {
            id: format!("KLIMP_TOP_{id}"),
            edge: KlimpEdge::Top,
            position,
            x: position - panel_width / 2.0,
            y: 0.0,
            z: panel_height,
        });
        id += 1;
    }

    // The side edges reuse one solved set, guaranteeing left/right
    // symmetry by construction.
    for &position in &side_positions {
        klimps.push(Klimp {
            id: format!("KLIMP_LEFT_{id}"),
            edge: KlimpEdge::Left,
            position,
            x: -panel_width / 2.0,
            y: 0.0,
            z: position,
        });
        id += 1;
    }
    for &position in &side_positions {
        klimps.push(Klimp {
            id: format!("KLIMP_RIGHT_{id}"),
            edge: KlimpEdge::Right,
            position,
            x: panel_width / 2.0,
            y: 0.0,
            z: position,
        });
        id += 1;
    }

    KlimpLayout { panel: Panel::Front, klimps }
}
