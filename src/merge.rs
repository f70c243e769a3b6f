//! Merging of parameter grids.
//!
//! Two functions tabulated on independent grids are combined point-wise by
//! first placing both on the sorted union of their knots.

use itertools::Itertools;

/// Knots closer than this to the previously kept knot are treated as equal.
///
/// Absolute, sized for parameter domains of order one. Distinct knots
/// 5e-7 apart survive a merge.
pub const MERGE_TOLERANCE: f64 = 1e-9;

/// Sorted union of two non-decreasing sequences with near-duplicates
/// collapsed, using `MERGE_TOLERANCE`.
///
/// ```rust
/// use srvf::merge::merge_unique;
///
/// let a = [0.0, 0.25, 0.8, 1.0];
/// let b = [0.0, 0.5, 1.0 + 1e-12];
/// assert_eq!(merge_unique(&a, &b), vec![0.0, 0.25, 0.5, 0.8, 1.0]);
/// ```
pub fn merge_unique(a: &[f64], b: &[f64]) -> Vec<f64> {
    merge_unique_with_tolerance(a, b, MERGE_TOLERANCE)
}

/// Sorted union of two non-decreasing sequences with only exact repeats
/// removed.
///
/// For grids built from a function's own knots plus points computed on it,
/// where collapsing close knots would change the function.
pub fn merge_distinct(a: &[f64], b: &[f64]) -> Vec<f64> {
    merge_unique_with_tolerance(a, b, 0.0)
}

/// Sorted union of two non-decreasing sequences; each run of values within
/// `tol` of its first member collapses to that first member.
///
/// Inputs are assumed sorted; this is not checked. The output is strictly
/// increasing.
pub fn merge_unique_with_tolerance(a: &[f64], b: &[f64], tol: f64) -> Vec<f64> {
    let mut merged: Vec<f64> = a.iter().copied().merge(b.iter().copied()).collect();
    let total = merged.len();
    merged.dedup_by(|next, kept| *next - *kept <= tol);

    log::trace!(
        "merged {} + {} knots into {} ({} collapsed)",
        a.len(),
        b.len(),
        merged.len(),
        total - merged.len()
    );
    merged
}
