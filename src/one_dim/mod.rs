//! One-dimensional interpolation over rectilinear parameter grids.
//!
//! Values are tabulated as `dim x ncols` arrays, one column per knot
//! (`linear`) or per segment between knots (`hold`), so a single grid walk
//! produces every coordinate of a D-dimensional point at once.
//!
//! Observation points are expected in non-decreasing order; the grid cursor
//! then advances in lockstep with them for O(grid + observations) total work.
//! Out-of-order observation points are still handled correctly, at the cost
//! of a bisection search each time the cursor has to move backward.

pub mod hold;
pub mod linear;

use ndarray::{Array2, ArrayViewMut2};
use num_traits::Float;

use crate::error::Result;

/// Extrapolation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extrap {
    Inside,
    /// Below the first knot
    OutsideLow,
    /// At or past the last knot
    OutsideHigh,
}

/// The grid cell bracketing an observation point
#[derive(Debug, Clone, Copy)]
pub struct GridSample<T> {
    /// Index of the left knot
    pub i: usize,
    pub x0: T,
    pub x1: T,
    pub extrap: Extrap,
}

/// A one-dimensional interpolator producing `dim()`-dimensional values.
pub trait Interp1D<T: Float> {
    /// Number of rows in each evaluated point
    fn dim(&self) -> usize;

    /// Evaluate the interpolant at a set of observation points,
    /// writing one column of `out` per observation point.
    ///
    /// An empty table or an empty set of observation points leaves `out` untouched.
    fn interp(&self, locs: &[T], out: ArrayViewMut2<'_, T>) -> Result<()>;

    /// Evaluate the interpolant at a set of observation points, allocating
    /// for the output values for convenience.
    #[inline]
    fn interp_alloc(&self, locs: &[T]) -> Result<Array2<T>> {
        let mut out = Array2::zeros((self.dim(), locs.len()));
        self.interp(locs, out.view_mut())?;
        Ok(out)
    }
}

/// A rectilinear grid, which may have uneven spacing and repeated knots.
///
/// Assumes the grid is non-decreasing. Checking this is expensive, and is
/// left to the caller.
#[derive(Clone, Copy)]
pub struct RectilinearGrid1D<'a, T: Float> {
    grid: &'a [T],
}

impl<'a, T: Float> RectilinearGrid1D<'a, T> {
    pub fn new(grid: &'a [T]) -> Self {
        Self { grid }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    #[inline]
    fn extrap(&self, loc: T) -> Extrap {
        match loc {
            x if x < self.grid[0] => Extrap::OutsideLow,
            x if x >= self.grid[self.grid.len() - 1] => Extrap::OutsideHigh,
            _ => Extrap::Inside,
        }
    }

    /// Get the index of the left knot of the containing grid cell by bisection.
    ///
    /// This is the last knot at or below `loc`, so a query sitting exactly on
    /// a knot (or on a run of repeated knots) selects the cell to its right.
    /// The index is clipped to `[0, len - 2]`; requires at least 2 knots.
    #[inline]
    pub fn index(&self, loc: T) -> (usize, Extrap) {
        let n = self.grid.len();
        let i = ((self.grid.partition_point(|v| *v <= loc) as isize - 1).max(0) as usize)
            .min(n - 2);

        (i, self.extrap(loc))
    }

    /// Same as `index`, but walks forward from a previously found cell.
    /// Falls back to bisection if `loc` lies left of the hinted cell.
    #[inline]
    pub fn index_from(&self, loc: T, hint: usize) -> (usize, Extrap) {
        let n = self.grid.len();
        let mut i = hint.min(n - 2);
        if i > 0 && loc < self.grid[i] {
            return self.index(loc);
        }
        while i + 2 < n && self.grid[i + 1] <= loc {
            i += 1;
        }

        (i, self.extrap(loc))
    }

    /// Get the cell bracketing `loc`, starting the search at `hint`
    #[inline]
    pub fn at(&self, loc: T, hint: usize) -> GridSample<T> {
        let (i, extrap) = self.index_from(loc, hint);

        GridSample {
            i,
            x0: self.grid[i],
            x1: self.grid[i + 1],
            extrap,
        }
    }
}
