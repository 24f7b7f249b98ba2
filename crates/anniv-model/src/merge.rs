//! Partial-field construction

/// Types built by overlaying a partial field set onto a fresh value.
///
/// `merge` copies every provided (`Some`) field of `partial` onto `self` and
/// keeps the rest. The overlay is shallow: a provided nested value replaces
/// the old one whole, and reference-counted fields end up pointing at the
/// same allocation as the partial's.
pub trait Merge: Default {
    fn merge(self, partial: Self) -> Self;

    /// Fresh value carrying exactly the provided fields
    fn from_partial(partial: Self) -> Self {
        Self::default().merge(partial)
    }
}
