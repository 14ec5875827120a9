//! Part classification and geometry deduplication.
//!
//! Parts with identical classification, color, and dimensions (rounded to
//! 1e-6") share one solid and one product definition; each original part
//! becomes a lightweight placement on its group. Group order follows first
//! appearance in the part list so output is deterministic.

use glam::DVec3;
use indexmap::IndexMap;

use cratewright_core::{Panel, Part, PartKind, Rgb};

/// The four fixed top-level assemblies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TopAssembly {
    ShippingBase,
    CrateCap,
    Fasteners,
    Stencils,
}

impl TopAssembly {
    pub(crate) const ALL: [TopAssembly; 4] = [
        TopAssembly::ShippingBase,
        TopAssembly::CrateCap,
        TopAssembly::Fasteners,
        TopAssembly::Stencils,
    ];

    pub(crate) const fn name(self) -> &'static str {
        match self {
            TopAssembly::ShippingBase => "SHIPPING_BASE",
            TopAssembly::CrateCap => "CRATE_CAP",
            TopAssembly::Fasteners => "FASTENERS",
            TopAssembly::Stencils => "STENCILS",
        }
    }
}

/// Every part lands in exactly one top-level assembly.
pub(crate) fn classify(kind: PartKind) -> TopAssembly {
    match kind {
        PartKind::Skid | PartKind::Floor => TopAssembly::ShippingBase,
        PartKind::Panel | PartKind::Cleat | PartKind::Plywood => TopAssembly::CrateCap,
        PartKind::Klimp | PartKind::Hardware => TopAssembly::Fasteners,
        PartKind::Marking => TopAssembly::Stencils,
    }
}

/// One placement of a group's solid.
#[derive(Debug, Clone)]
pub(crate) struct Placement {
    pub occurrence_name: String,
    /// Box center in inches.
    pub center: DVec3,
}

/// Deduplicated solid shared by all identically shaped occurrences.
#[derive(Debug, Clone)]
pub(crate) struct PartGroup {
    pub name: String,
    pub color: Rgb,
    /// Dimensions in inches.
    pub dims: DVec3,
    pub top: TopAssembly,
    /// Panel sub-assembly, for CRATE_CAP parts tagged with a panel.
    pub sub_panel: Option<Panel>,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    kind: PartKind,
    panel: Option<Panel>,
    color: Rgb,
    dims: [i64; 3],
}

/// Strip a trailing `_<digits>` occurrence index for the shared product
/// name (FLOORBOARD_3 -> FLOORBOARD).
fn base_name(name: &str) -> String {
    match name.rfind('_') {
        Some(pos) if name[pos + 1..].chars().all(|c| c.is_ascii_digit())
            && !name[pos + 1..].is_empty() =>
        {
            name[..pos].to_string()
        }
        _ => name.to_string(),
    }
}

fn quantize(v: f64) -> i64 {
    (v * 1e6).round() as i64
}

/// Group the active parts for instancing.
pub(crate) fn group_parts(parts: &[&Part]) -> Vec<PartGroup> {
    let mut groups: IndexMap<GroupKey, PartGroup> = IndexMap::new();

    for part in parts {
        let dims = part.dimensions();
        let key = GroupKey {
            kind: part.kind,
            panel: part.panel,
            color: part.color,
            dims: [quantize(dims.x), quantize(dims.y), quantize(dims.z)],
        };
        let sub_panel = match classify(part.kind) {
            TopAssembly::CrateCap => part.panel,
            _ => None,
        };

        groups
            .entry(key)
            .or_insert_with(|| PartGroup {
                name: base_name(&part.name),
                color: part.color,
                dims,
                top: classify(part.kind),
                sub_panel,
                placements: Vec::new(),
            })
            .placements
            .push(Placement {
                occurrence_name: part.name.clone(),
                center: part.center(),
            });
    }

    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratewright_core::palette;

    fn floor_part(name: &str, y: f64) -> Part {
        Part::new(
            name,
            PartKind::Floor,
            DVec3::new(-20.0, y, 3.5),
            DVec3::new(20.0, y + 5.5, 5.0),
            palette::FLOORBOARD,
        )
    }

    #[test]
    fn test_identical_parts_share_group() {
        let a = floor_part("FLOORBOARD_1", 0.0);
        let b = floor_part("FLOORBOARD_2", 10.0);
        let groups = group_parts(&[&a, &b]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].placements.len(), 2);
        assert_eq!(groups[0].name, "FLOORBOARD");
    }

    #[test]
    fn test_different_dims_split_groups() {
        let a = floor_part("FLOORBOARD_1", 0.0);
        let mut b = floor_part("FLOORBOARD_2", 10.0);
        b.point2.y += 1.75;
        let groups = group_parts(&[&a, &b]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_different_color_splits_groups() {
        let a = floor_part("FLOORBOARD_1", 0.0);
        let mut b = floor_part("FLOORBOARD_2", 10.0);
        b.color = palette::FLOORBOARD_CUSTOM;
        let groups = group_parts(&[&a, &b]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify(PartKind::Skid), TopAssembly::ShippingBase);
        assert_eq!(classify(PartKind::Cleat), TopAssembly::CrateCap);
        assert_eq!(classify(PartKind::Klimp), TopAssembly::Fasteners);
        assert_eq!(classify(PartKind::Hardware), TopAssembly::Fasteners);
        assert_eq!(classify(PartKind::Marking), TopAssembly::Stencils);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("FLOORBOARD_12"), "FLOORBOARD");
        assert_eq!(base_name("SKID"), "SKID");
        assert_eq!(base_name("FRONT_PANEL_CLEAT_TOP"), "FRONT_PANEL_CLEAT_TOP");
        assert_eq!(base_name("KLIMP_TOP_0"), "KLIMP_TOP");
    }
}
