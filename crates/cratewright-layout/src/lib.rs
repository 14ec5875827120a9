//! Layout solvers for the Cratewright engine.
//!
//! Each solver is a pure function from panel or crate dimensions to a
//! layout description:
//! - `skid`: weight-banded lumber selection and flush-edge even spacing
//! - `floorboard`: combinatorial tiling of the internal length
//! - `cleat`: perimeter / intermediate / splice cleat placement per panel
//! - `klimp`: interval-constrained fastener placement on the front panel
//! - `lag`: hardware row spacing anchored to structural cleats
//! - `splicing`: default plywood sheet splicer (collaborator interface)

pub mod cleat;
pub mod floorboard;
pub mod klimp;
pub mod lag;
pub mod skid;
pub mod splicing;

pub use cleat::{calculate_cleat_layout, Cleat, CleatKind, Orientation, PanelCleatLayout};
pub use floorboard::{plan_floorboards, FloorboardRow};
pub use klimp::{calculate_klimp_layout, CleatSpan, Klimp, KlimpEdge, KlimpLayout};
pub use lag::{solve_lag_rows, solve_panel_lag_rows};
pub use skid::{plan_skids, SkidPlan};
pub use splicing::{calculate_crate_splicing, calculate_panel_splicing};
