//! Panel identity.
//!
//! The five cleated panels of a crate form a closed set; all per-panel
//! coordinate formulas dispatch on this enum so every panel is covered at
//! compile time.

/// One of the five cleated panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Panel {
    Front,
    Back,
    LeftEnd,
    RightEnd,
    Top,
}

impl Panel {
    /// All panels in generation order.
    pub const ALL: [Panel; 5] = [
        Panel::Front,
        Panel::Back,
        Panel::LeftEnd,
        Panel::RightEnd,
        Panel::Top,
    ];

    /// Canonical part-name prefix, e.g. "FRONT_PANEL".
    pub const fn name(self) -> &'static str {
        match self {
            Panel::Front => "FRONT_PANEL",
            Panel::Back => "BACK_PANEL",
            Panel::LeftEnd => "LEFT_END_PANEL",
            Panel::RightEnd => "RIGHT_END_PANEL",
            Panel::Top => "TOP_PANEL",
        }
    }

    /// Sub-assembly name within the CRATE_CAP assembly.
    pub const fn assembly_name(self) -> &'static str {
        match self {
            Panel::Front => "FRONT_END_PANEL_ASSEMBLY",
            Panel::Back => "BACK_END_PANEL_ASSEMBLY",
            Panel::LeftEnd => "LEFT_SIDE_PANEL_ASSEMBLY",
            Panel::RightEnd => "RIGHT_SIDE_PANEL_ASSEMBLY",
            Panel::Top => "TOP_PANEL_ASSEMBLY",
        }
    }

    /// True for the two end panels whose perimeter cleats run vertically.
    pub const fn is_end(self) -> bool {
        matches!(self, Panel::LeftEnd | Panel::RightEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_distinct() {
        let names: Vec<_> = Panel::ALL.iter().map(|p| p.name()).collect();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_end_panels() {
        assert!(Panel::LeftEnd.is_end());
        assert!(Panel::RightEnd.is_end());
        assert!(!Panel::Front.is_end());
        assert!(!Panel::Top.is_end());
    }
}
