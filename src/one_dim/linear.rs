//! Linear interpolation of knot-tabulated values, and its inverse for
//! monotone scalar tables.

use ndarray::{ArrayView2, ArrayViewMut2};
use num_traits::Float;

use super::{Extrap, GridSample, Interp1D, RectilinearGrid1D};
use crate::error::{AlgebraError, Result};

/// Linear interpolation with hold-last extrapolation;
/// holds the leftmost value when extrapolating low, and the rightmost
/// value at or past the last knot.
///
/// A zero-width cell (repeated knot) evaluates to its left value.
pub struct Linear1D<'a, T: Float> {
    grid: RectilinearGrid1D<'a, T>,
    vals: ArrayView2<'a, T>,
}

impl<'a, T: Float> Linear1D<'a, T> {
    /// # Errors
    /// * If `vals` does not have one column per knot
    pub fn new(grid: &'a [T], vals: ArrayView2<'a, T>) -> Result<Self> {
        if vals.ncols() != grid.len() {
            return Err(AlgebraError::GridLength {
                expected: vals.ncols(),
                actual: grid.len(),
            });
        }

        Ok(Self {
            grid: RectilinearGrid1D::new(grid),
            vals,
        })
    }
}

impl<'a, T: Float> Interp1D<T> for Linear1D<'a, T> {
    #[inline]
    fn dim(&self) -> usize {
        self.vals.nrows()
    }

    fn interp(&self, locs: &[T], mut out: ArrayViewMut2<'_, T>) -> Result<()> {
        AlgebraError::check_dim(self.dim(), out.nrows())?;
        AlgebraError::check_dim(locs.len(), out.ncols())?;

        let n = self.grid.len();
        if n == 0 || locs.is_empty() {
            return Ok(());
        }
        if n == 1 {
            for mut col in out.columns_mut() {
                col.assign(&self.vals.column(0));
            }
            return Ok(());
        }

        let mut hint = 0;
        for (k, &loc) in locs.iter().enumerate() {
            let GridSample { i, x0, x1, extrap } = self.grid.at(loc, hint);
            hint = i;

            let mut col = out.column_mut(k);
            match extrap {
                Extrap::OutsideLow => col.assign(&self.vals.column(0)),
                Extrap::OutsideHigh => col.assign(&self.vals.column(n - 1)),
                Extrap::Inside if x1 > x0 => {
                    let t = (loc - x0) / (x1 - x0);
                    let s = T::one() - t;
                    for d in 0..self.dim() {
                        col[d] = s * self.vals[[d, i]] + t * self.vals[[d, i + 1]];
                    }
                }
                Extrap::Inside => col.assign(&self.vals.column(i)),
            }
        }

        Ok(())
    }
}

/// Evaluate the piecewise-linear function tabulated as `(grid, vals)` at `locs`.
pub fn interp_linear<'a, T: Float>(
    grid: &'a [T],
    vals: ArrayView2<'a, T>,
    locs: &[T],
    out: ArrayViewMut2<'_, T>,
) -> Result<()> {
    Linear1D::new(grid, vals)?.interp(locs, out)
}

/// Find, for each value in `locs`, a parameter at which the non-decreasing
/// scalar function tabulated as `(grid, vals)` takes that value.
///
/// Where the function is flat at a value, the rightmost preimage is taken.
/// Values outside the function's range clamp to the ends of `grid`.
///
/// An empty table or empty `locs` returns immediately, leaving `out` untouched.
///
/// # Errors
/// * If `vals` does not have exactly one row
/// * If `out` and `locs` differ in length
pub fn preimages<T: Float>(
    grid: &[T],
    vals: ArrayView2<'_, T>,
    locs: &[T],
    out: &mut [T],
) -> Result<()> {
    if vals.nrows() != 1 {
        return Err(AlgebraError::NotOneDimensional { dim: vals.nrows() });
    }
    if grid.is_empty() || locs.is_empty() {
        return Ok(());
    }
    AlgebraError::check_dim(locs.len(), out.len())?;

    // Swap roles: the function values become the knots and the knots become the values
    let knots: Vec<T> = vals.row(0).to_vec();
    let swapped = ArrayView2::from_shape((1, grid.len()), grid).map_err(|_| {
        AlgebraError::GridLength {
            expected: knots.len(),
            actual: grid.len(),
        }
    })?;
    let out_len = out.len();
    let out = ArrayViewMut2::from_shape((1, out_len), out).map_err(|_| {
        AlgebraError::DimensionMismatch {
            expected: locs.len(),
            actual: out_len,
        }
    })?;

    Linear1D::new(&knots, swapped)?.interp(locs, out)
}
