//! Anniversary Model - Timeline, gallery and widget data
//!
//! Plain values filled in by page assembly and the layout pass, then handed
//! to the renderer. Nothing here renders or loads anything.
//!
//! # Construction
//!
//! Entries are built from partial field sets: every field is optional and
//! [`Merge::from_partial`] copies exactly the provided ones. Nested handles
//! (components, property bags, deferred images, generators) are reference
//! counted, so copies share them rather than cloning their contents.

pub mod component;
pub mod content;
pub mod gallery;
pub mod geometry;
pub mod merge;
pub mod timeline;
pub mod widgets;

pub use component::*;
pub use content::*;
pub use gallery::*;
pub use geometry::*;
pub use merge::*;
pub use timeline::*;
pub use widgets::*;
