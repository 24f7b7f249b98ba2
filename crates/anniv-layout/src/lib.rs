//! Anniversary Layout - Deterministic placement of timeline and gallery
//!
//! Fills the layout-owned fields of the model from seeded generators. The
//! same content and config always produce the same layout, so the renderer
//! can lay out again on every resize without storing anything.
//!
//! - Timeline: side, expansion and branch lengths per event, anchor positions
//! - Gallery: per-photo offset and tilt, deterministic ordering

pub mod config;
pub mod gallery;
pub mod timeline;

pub use config::*;
pub use gallery::*;
pub use timeline::*;
