//! Floorboard tiling solver.
//!
//! Tiles the crate's internal length with boards drawn from the allowed
//! lumber widths, mirror-symmetric about the center, preferring maximum
//! coverage, then fewer boards, then wider boards. All arithmetic runs in
//! 1/8" integer units so the search is exact.
//!
//! A combination may include one custom-ripped center board (even number of
//! units wide, between 2.5" and the narrowest standard width) to soak up
//! the residual. Legality requires at most one center board in total and
//! its width no wider than the narrowest paired board, which keeps wide
//! boards outboard and the tiling symmetric.

use cratewright_core::{LumberSize, MIN_CUSTOM_FLOORBOARD};

const UNIT: f64 = 0.125;
const MAX_BOARDS: usize = 40;

/// One placed floorboard.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorboardRow {
    /// Standard lumber size, or `None` for a custom rip.
    pub nominal: Option<LumberSize>,
    pub width: f64,
    pub thickness: f64,
    /// Absolute Y of the board's leading (front) edge.
    pub position: f64,
}

impl FloorboardRow {
    pub fn is_custom(&self) -> bool {
        self.nominal.is_none()
    }

    pub fn label(&self) -> &'static str {
        match self.nominal {
            Some(size) => size.label(),
            None => "CUSTOM",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BoardOption {
    size: LumberSize,
    width: f64,
    width_units: i64,
    thickness: f64,
}

#[derive(Debug, Clone)]
struct Candidate {
    used_units: i64,
    total_boards: usize,
    counts: Vec<usize>,
    custom_units: Option<i64>,
}

struct Search {
    options: Vec<BoardOption>,
    length_units: i64,
    min_custom_units: i64,
    max_custom_units: i64,
    counts: Vec<usize>,
    best: Option<Candidate>,
}

impl Search {
    /// Symmetry check: at most one center (odd-count or custom) board, no
    /// wider than the narrowest paired board.
    fn is_symmetric(&self, custom_units: Option<i64>) -> bool {
        let mut smallest_pair_width = f64::INFINITY;
        let mut center_width: Option<f64> = None;
        let mut center_count = 0usize;

        for (i, opt) in self.options.iter().enumerate() {
            // Options are sorted widest first, so the last paired width
            // seen is the narrowest.
            if self.counts[i] >= 2 {
                smallest_pair_width = opt.width;
            }
            if self.counts[i] % 2 == 1 {
                center_count += 1;
                center_width = Some(opt.width);
            }
        }

        if let Some(cu) = custom_units {
            center_count += 1;
            center_width = Some(cu as f64 * UNIT);
        }

        if center_count > 1 {
            return false;
        }

        match center_width {
            Some(w) => w <= smallest_pair_width + 1e-9,
            None => true,
        }
    }

    fn offer(&mut self, used_units: i64, total_boards: usize, custom_units: Option<i64>) {
        if used_units > self.length_units || !self.is_symmetric(custom_units) {
            return;
        }

        let better = match &self.best {
            None => true,
            Some(best) => {
                if used_units != best.used_units {
                    used_units > best.used_units
                } else if total_boards != best.total_boards {
                    total_boards < best.total_boards
                } else {
                    // Prefer wider boards: counts are ordered widest first.
                    match self.counts.iter().zip(&best.counts).find(|(a, b)| a != b) {
                        Some((a, b)) => a > b,
                        None => custom_units.unwrap_or(0) > best.custom_units.unwrap_or(0),
                    }
                }
            }
        };

        if better {
            self.best = Some(Candidate {
                used_units,
                total_boards,
                counts: self.counts.clone(),
                custom_units,
            });
        }
    }

    fn evaluate(&mut self, sum_units: i64, total_boards: usize) {
        self.offer(sum_units, total_boards, None);

        if total_boards >= MAX_BOARDS {
            return;
        }

        let available = self.length_units - sum_units;
        if available < self.min_custom_units {
            return;
        }

        let mut custom = available.min(self.max_custom_units);
        custom -= custom % 2;
        if custom >= self.min_custom_units {
            self.offer(sum_units + custom, total_boards + 1, Some(custom));
        }
    }

    fn dfs(&mut self, index: usize, total_boards: usize, sum_units: i64) {
        if index == self.options.len() {
            self.evaluate(sum_units, total_boards);
            return;
        }

        let width_units = self.options[index].width_units;
        for count in 0..=(MAX_BOARDS - total_boards) {
            let new_sum = sum_units + count as i64 * width_units;
            if new_sum > self.length_units {
                break;
            }
            self.counts[index] = count;
            self.dfs(index + 1, total_boards + count, new_sum);
        }
        self.counts[index] = 0;
    }
}

/// Tile `internal_length` with boards from `available`, the first board's
/// leading edge at `start_y`.
pub fn plan_floorboards(
    internal_length: f64,
    available: &[LumberSize],
    start_y: f64,
) -> Vec<FloorboardRow> {
    let mut options: Vec<BoardOption> = available
        .iter()
        .map(|&size| {
            let dims = size.dims();
            BoardOption {
                size,
                width: dims.width,
                width_units: (dims.width / UNIT).round() as i64,
                thickness: dims.thickness,
            }
        })
        .collect();
    if options.is_empty() {
        let dims = LumberSize::L2x6.dims();
        options.push(BoardOption {
            size: LumberSize::L2x6,
            width: dims.width,
            width_units: (dims.width / UNIT).round() as i64,
            thickness: dims.thickness,
        });
    }
    options.sort_by(|a, b| b.width.partial_cmp(&a.width).unwrap());

    let smallest_width = options.last().unwrap().width;
    let standard_thickness = options[0].thickness;

    let mut search = Search {
        counts: vec![0; options.len()],
        length_units: ((internal_length / UNIT).round() as i64).max(0),
        min_custom_units: (MIN_CUSTOM_FLOORBOARD / UNIT).round() as i64,
        max_custom_units: (MIN_CUSTOM_FLOORBOARD.max(smallest_width) / UNIT).round() as i64,
        options,
        best: None,
    };
    search.dfs(0, 0, 0);

    let best = match search.best {
        Some(best) if best.total_boards > 0 => best,
        _ => return Vec::new(),
    };

    // Reconstruct the physical order: paired boards mirrored outward-in,
    // the single center board (if any) in the exact middle.
    #[derive(Clone)]
    struct BoardInfo {
        nominal: Option<LumberSize>,
        width: f64,
        thickness: f64,
    }

    let mut left: Vec<BoardInfo> = Vec::new();
    let mut center: Option<BoardInfo> = None;

    for (i, opt) in search.options.iter().enumerate() {
        for _ in 0..best.counts[i] / 2 {
            left.push(BoardInfo {
                nominal: Some(opt.size),
                width: opt.width,
                thickness: opt.thickness,
            });
        }
        if best.counts[i] % 2 == 1 {
            center = Some(BoardInfo {
                nominal: Some(opt.size),
                width: opt.width,
                thickness: opt.thickness,
            });
        }
    }

    if let Some(cu) = best.custom_units {
        center = Some(BoardInfo {
            nominal: None,
            width: cu as f64 * UNIT,
            thickness: standard_thickness,
        });
    }

    let mut ordered: Vec<BoardInfo> = left.clone();
    if let Some(c) = &center {
        ordered.push(c.clone());
    }
    ordered.extend(left.iter().rev().cloned());

    // Any rounding leftover opens one gap adjacent to the center board so
    // the paired halves stay flush against the panels.
    let gap_count = ordered.len().saturating_sub(1);
    let mut gaps = vec![0.0; gap_count];
    let sum_widths: f64 = ordered.iter().map(|b| b.width).sum();
    let mut leftover = internal_length - sum_widths;
    if leftover < 0.0 {
        leftover = 0.0;
    }
    if leftover > 0.0 && gap_count > 0 {
        let gap_index = if center.is_some() {
            left.len().min(gap_count - 1)
        } else {
            left.len().saturating_sub(1).min(gap_count - 1)
        };
        gaps[gap_index] += leftover;
    }

    let mut rows = Vec::with_capacity(ordered.len());
    let mut cursor = start_y;
    for (i, board) in ordered.iter().enumerate() {
        rows.push(FloorboardRow {
            nominal: board.nominal,
            width: board.width,
            thickness: board.thickness,
            position: cursor,
        });
        cursor += board.width;
        if i < gap_count {
            cursor += gaps[i];
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratewright_core::FLOORBOARD_SIZES;
    use proptest::prelude::*;

    fn widths(rows: &[FloorboardRow]) -> Vec<f64> {
        rows.iter().map(|r| r.width).collect()
    }

    #[test]
    fn test_exact_fit_with_pairs() {
        // 22" = 2x 11.25? no; 4x 5.5 = 22 exactly.
        let rows = plan_floorboards(22.0, &[LumberSize::L2x6], 0.0);
        assert_eq!(widths(&rows), vec![5.5, 5.5, 5.5, 5.5]);
        assert_eq!(rows[0].position, 0.0);
        assert_eq!(rows[3].position, 16.5);
    }

    #[test]
    fn test_custom_center_board_fills_residual() {
        // 2x 11.25 + 4.0 custom = 26.5.
        let rows = plan_floorboards(26.5, &FLOORBOARD_SIZES, 0.0);
        let total: f64 = widths(&rows).iter().sum();
        assert!((total - 26.5).abs() < 1e-9);
        let customs: Vec<_> = rows.iter().filter(|r| r.is_custom()).collect();
        assert_eq!(customs.len(), 1);
        // Custom board sits in the exact middle slot.
        assert!(rows[rows.len() / 2].is_custom());
    }

    #[test]
    fn test_prefers_fewer_wider_boards() {
        // 22.5" could be 4x5.5 + gap, but 2x11.25 covers it with 2 boards.
        let rows = plan_floorboards(22.5, &FLOORBOARD_SIZES, 0.0);
        assert_eq!(widths(&rows), vec![11.25, 11.25]);
    }

    #[test]
    fn test_positions_start_at_offset() {
        let rows = plan_floorboards(22.0, &[LumberSize::L2x6], 1.0);
        assert_eq!(rows[0].position, 1.0);
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert!(plan_floorboards(0.0, &FLOORBOARD_SIZES, 0.0).is_empty());
    }

    #[test]
    fn test_custom_never_narrower_than_minimum() {
        for tenths in 120..400 {
            let length = tenths as f64 * 0.1;
            let rows = plan_floorboards(length, &FLOORBOARD_SIZES, 0.0);
            for row in rows.iter().filter(|r| r.is_custom()) {
                assert!(row.width >= MIN_CUSTOM_FLOORBOARD - 1e-9);
                assert!(row.width <= 5.5 + 1e-9);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_widths_mirror_about_center(length in 12.0f64..150.0) {
            let rows = plan_floorboards(length, &FLOORBOARD_SIZES, 0.0);
            let w = widths(&rows);
            for i in 0..w.len() / 2 {
                prop_assert!((w[i] - w[w.len() - 1 - i]).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_widths_nondecreasing_toward_edges(length in 12.0f64..150.0) {
            let rows = plan_floorboards(length, &FLOORBOARD_SIZES, 0.0);
            let w = widths(&rows);
            let half = &w[..w.len() / 2];
            for pair in half.windows(2) {
                prop_assert!(pair[0] >= pair[1] - 1e-9);
            }
        }

        #[test]
        fn prop_at_most_one_gap_and_no_overrun(length in 12.0f64..150.0) {
            let rows = plan_floorboards(length, &FLOORBOARD_SIZES, 0.0);
            prop_assert!(!rows.is_empty());
            let mut gaps = Vec::new();
            for pair in rows.windows(2) {
                let gap = pair[1].position - (pair[0].position + pair[0].width);
                prop_assert!(gap >= -1e-9);
                if gap > 1e-9 {
                    gaps.push((pair[0].position, gap));
                }
            }
            prop_assert!(gaps.len() <= 1);
            if let Some((_, gap)) = gaps.first() {
                // Leftover is always smaller than the narrowest standard
                // board plus the custom minimum, or it would have been
                // tiled instead.
                prop_assert!(*gap < 5.5 + MIN_CUSTOM_FLOORBOARD + 1e-6);
            }
            // Never overruns the available span.
            let last = rows.last().unwrap();
            prop_assert!(last.position + last.width <= length + 1e-6);
        }

        #[test]
        fn prop_boards_within_limit(length in 12.0f64..150.0) {
            let rows = plan_floorboards(length, &FLOORBOARD_SIZES, 0.0);
            prop_assert!(rows.len() <= 40);
        }
    }
}
