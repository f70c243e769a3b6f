//! Piecewise-constant 1D interpolation

use ndarray::{ArrayView2, ArrayViewMut2};
use num_traits::Float;

use super::{GridSample, Interp1D, RectilinearGrid1D};
use crate::error::{AlgebraError, Result};

/// Hold-last piecewise constant interpolation over segments.
///
/// `vals` has one column per segment, i.e. one fewer than the number of knots.
/// Column `i` is held on `[grid[i], grid[i+1])`, so the result is
/// right-continuous at every breakpoint; the first and last segment values
/// are held outside the grid, and the last value is taken at the last knot.
pub struct Left1D<'a, T: Float> {
    grid: RectilinearGrid1D<'a, T>,
    vals: ArrayView2<'a, T>,
}

impl<'a, T: Float> Left1D<'a, T> {
    /// # Errors
    /// * If the grid does not have exactly one more knot than `vals` has columns
    ///   (an empty grid with no values is accepted)
    pub fn new(grid: &'a [T], vals: ArrayView2<'a, T>) -> Result<Self> {
        let expected = if vals.ncols() == 0 && grid.is_empty() {
            0
        } else {
            vals.ncols() + 1
        };
        if grid.len() != expected {
            return Err(AlgebraError::GridLength {
                expected,
                actual: grid.len(),
            });
        }

        Ok(Self {
            grid: RectilinearGrid1D::new(grid),
            vals,
        })
    }
}

impl<'a, T: Float> Interp1D<T> for Left1D<'a, T> {
    #[inline]
    fn dim(&self) -> usize {
        self.vals.nrows()
    }

    fn interp(&self, locs: &[T], mut out: ArrayViewMut2<'_, T>) -> Result<()> {
        AlgebraError::check_dim(self.dim(), out.nrows())?;
        AlgebraError::check_dim(locs.len(), out.ncols())?;

        if self.grid.len() < 2 || locs.is_empty() {
            return Ok(());
        }

        // The clipped cell index is already the segment to hold, including outside the grid
        let mut hint = 0;
        for (k, &loc) in locs.iter().enumerate() {
            let GridSample { i, .. } = self.grid.at(loc, hint);
            hint = i;
            out.column_mut(k).assign(&self.vals.column(i));
        }

        Ok(())
    }
}

/// Evaluate the piecewise-constant function tabulated as `(grid, vals)` at `locs`.
pub fn interp_hold<'a, T: Float>(
    grid: &'a [T],
    vals: ArrayView2<'a, T>,
    locs: &[T],
    out: ArrayViewMut2<'_, T>,
) -> Result<()> {
    Left1D::new(grid, vals)?.interp(locs, out)
}
