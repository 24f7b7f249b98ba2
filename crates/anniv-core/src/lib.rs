//! Anniversary Core - Deterministic primitives for the anniversary page
//!
//! This crate defines the pieces every layout decision is built from:
//! - Seeded generator (mulberry32) and the range descriptor it samples
//! - String hash that turns stable identifiers into seeds
//! - Sequence helpers (adjacent pairs, strict range check)
//! - The crate-wide error type

pub mod error;
pub mod hash;
pub mod rng;
pub mod seq;

pub use error::*;
pub use hash::*;
pub use rng::*;
pub use seq::*;
