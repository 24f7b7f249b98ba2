//! Sequence helpers used for geometry between consecutive nodes

/// All adjacent pairs `(items[i - 1], items[i])` for `i` in `1..len`.
///
/// Empty and single-element input yield no pairs.
pub fn consecutive_pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    items
        .windows(2)
        .map(|w| (w[0].clone(), w[1].clone()))
        .collect()
}

/// True iff `lo < x < hi`.
#[inline]
pub fn is_strictly_between<T: PartialOrd>(x: T, lo: T, hi: T) -> bool {
    x > lo && x < hi
}
