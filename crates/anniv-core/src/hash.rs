//! String hash for deriving generator seeds from stable identifiers
//!
//! Photo filenames and event ids are hashed so layout jitter stays the same
//! across re-renders without storing any generated number.

/// 32-bit polynomial hash over UTF-16 code units.
///
/// `h = h * 31 + unit` for every code unit in order, wrapping at 2^32.
/// Wrapping each step gives the same result as masking the exact sum.
pub fn hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32))
}
