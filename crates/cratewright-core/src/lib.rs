//! Core types, standards tables, and the part model for the Cratewright engine.
//!
//! This crate provides the foundational types used across all other
//! cratewright crates:
//! - Crate configuration (product, clearances, materials, hardware)
//! - Lumber and fastener standards tables
//! - The two-diagonal-corner `Part` box model
//! - Panel identity and the plywood-splice collaborator interface
//! - Error types

pub mod color;
pub mod config;
pub mod error;
pub mod lumber;
pub mod panel;
pub mod part;
pub mod splice;

pub use color::*;
pub use config::*;
pub use error::*;
pub use lumber::*;
pub use panel::*;
pub use part::*;
pub use splice::*;
