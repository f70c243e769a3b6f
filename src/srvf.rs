//! Square-root velocity functions: piecewise-constant functions on a
//! 1-D parameter domain, and the L2 algebra over them.
//!
//! ```rust
//! use srvf::{l2_distance, l2_norm, l2_product, Pointset, Srvf};
//!
//! let q1 = Srvf::new(
//!     Pointset::from_slice(1, 3, &[1.0, -1.0, 1.0]).unwrap(),
//!     vec![0.0, 0.25, 0.8, 1.0],
//! )
//! .unwrap();
//! let q2 = Srvf::new(Pointset::from_slice(1, 2, &[1.0, -1.0]).unwrap(), vec![0.0, 0.5, 1.0]).unwrap();
//!
//! assert!((l2_product(&q1, &q2).unwrap() - 0.1).abs() < 1e-12);
//! assert!((l2_norm(&q1) - 1.0).abs() < 1e-12);
//! assert!((l2_distance(&q1, &q2).unwrap() - 1.341640786).abs() < 1e-9);
//! ```
use ndarray::Array2;

use crate::error::{AlgebraError, Result};
use crate::merge::{merge_distinct, merge_unique};
use crate::one_dim::hold::interp_hold;
use crate::plf::Plf;
use crate::pointset::{Matrix, Point, Pointset};
use crate::utils::{midpoints, unit_grid};

/// A piecewise-constant function equal to `samps().column(i)` on
/// `(params()[i], params()[i+1])`.
///
/// Evaluation is right-continuous at breakpoints. There is one more knot than
/// there are sample columns; an `Srvf` with no segments is empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Srvf {
    samps: Pointset,
    params: Vec<f64>,
}

impl Srvf {
    /// # Errors
    /// * If `params` does not have exactly one more knot than `samps` has
    ///   columns (an empty grid with no columns is accepted)
    pub fn new(samps: Pointset, params: Vec<f64>) -> Result<Self> {
        let expected = if samps.is_empty() && params.is_empty() {
            0
        } else {
            samps.npts() + 1
        };
        if params.len() != expected {
            return Err(AlgebraError::GridLength {
                expected,
                actual: params.len(),
            });
        }
        debug_assert!(
            params.windows(2).all(|w| w[0] <= w[1]),
            "knots must be non-decreasing: {params:?}"
        );

        Ok(Self { samps, params })
    }

    /// Segment values on a uniform partition of `[0, 1]`
    pub fn from_samps(samps: Pointset) -> Self {
        let params = match samps.npts() {
            0 => Vec::new(),
            n => unit_grid(n + 1),
        };
        Self { samps, params }
    }

    /// The empty function into `dim`-dimensional space
    pub fn empty(dim: usize) -> Self {
        Self {
            samps: Pointset::new(dim, 0),
            params: Vec::new(),
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.samps.dim()
    }

    /// Number of knots
    #[inline]
    pub fn ncp(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samps.is_empty()
    }

    #[inline]
    pub fn samps(&self) -> &Pointset {
        &self.samps
    }

    #[inline]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// First and last knot, if any
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((*self.params.first()?, *self.params.last()?))
    }

    /// Evaluate at a single parameter value.
    /// An empty function gives an empty point.
    pub fn evaluate_at(&self, t: f64) -> Result<Point> {
        if self.is_empty() {
            return Ok(Point::zeros(0));
        }
        let mut out = Pointset::new(self.dim(), 1);
        self.evaluate_into(&[t], &mut out)?;
        Ok(out.column(0).to_owned())
    }

    /// Evaluate at non-decreasing parameter values, one output column per value.
    pub fn evaluate(&self, tv: &[f64]) -> Result<Pointset> {
        let mut out = Pointset::new(self.dim(), tv.len());
        self.evaluate_into(tv, &mut out)?;
        Ok(out)
    }

    /// Evaluate into a caller-supplied `dim() x tv.len()` buffer.
    /// An empty `Srvf` leaves `out` untouched.
    pub fn evaluate_into(&self, tv: &[f64], out: &mut Pointset) -> Result<()> {
        interp_hold(&self.params, self.samps.view(), tv, out.view_mut())
    }

    /// Value on each segment of `grid`, read at segment midpoints so that a
    /// knot shifted by the merge tolerance cannot select a neighbouring segment
    fn evaluate_segments(&self, grid: &[f64]) -> Result<Pointset> {
        self.evaluate(&midpoints(grid))
    }

    /// Add `v` to every segment value.
    pub fn translate(&mut self, v: &Point) -> Result<()> {
        self.samps.translate(v)
    }

    pub fn rotate(&mut self, r: &Matrix) -> Result<()> {
        self.samps.rotate(r)
    }

    pub fn scale(&mut self, s: f64) {
        self.samps.scale(s);
    }
}

/// The L2 inner product of `q1` and `q2` over their merged grid.
///
/// Either function being empty gives zero.
///
/// # Errors
/// * If `q1` and `q2` differ in dimension
pub fn l2_product(q1: &Srvf, q2: &Srvf) -> Result<f64> {
    AlgebraError::check_dim(q1.dim(), q2.dim())?;
    if q1.is_empty() || q2.is_empty() {
        return Ok(0.0);
    }

    let grid = merge_unique(q1.params(), q2.params());
    let v1 = q1.evaluate_segments(&grid)?;
    let v2 = q2.evaluate_segments(&grid)?;

    let mut acc = 0.0;
    for (k, w) in grid.windows(2).enumerate() {
        acc += v1.dot(k, &v2, k)? * (w[1] - w[0]);
    }
    Ok(acc)
}

/// The L2 norm of `q`
pub fn l2_norm(q: &Srvf) -> f64 {
    // A function always matches its own dimension
    l2_product(q, q).unwrap_or(0.0).max(0.0).sqrt()
}

/// The L2 distance between `q1` and `q2`
///
/// # Errors
/// * If `q1` and `q2` differ in dimension
pub fn l2_distance(q1: &Srvf, q2: &Srvf) -> Result<f64> {
    let diff = linear_combination(q1, q2, 1.0, -1.0)?;
    Ok(l2_norm(&diff))
}

/// `w1 * q1 + w2 * q2`, tabulated on the merged knots of both functions.
///
/// If either function is empty the result is empty.
///
/// # Errors
/// * If `q1` and `q2` differ in dimension
pub fn linear_combination(q1: &Srvf, q2: &Srvf, w1: f64, w2: f64) -> Result<Srvf> {
    AlgebraError::check_dim(q1.dim(), q2.dim())?;
    if q1.is_empty() || q2.is_empty() {
        return Ok(Srvf::empty(q1.dim()));
    }

    let params = merge_unique(q1.params(), q2.params());
    let v1 = q1.evaluate_segments(&params)?;
    let v2 = q2.evaluate_segments(&params)?;
    let samps = Pointset::weighted_sum(&v1, &v2, w1, w2)?;

    Srvf::new(samps, params)
}

/// The same function as `q`, tabulated on its own knots together with `tv`.
///
/// Each new segment takes the value of the segment of `q` containing it, so
/// norms and inner products are unchanged. Knots outside the interior of
/// `q`'s domain are ignored.
pub fn refinement(q: &Srvf, tv: &[f64]) -> Result<Srvf> {
    let Some((lo, hi)) = q.domain().filter(|_| !q.is_empty()) else {
        return Ok(q.clone());
    };

    let inner: Vec<f64> = tv.iter().copied().filter(|t| *t > lo && *t < hi).collect();
    let params = merge_unique(q.params(), &inner);
    let samps = q.evaluate_segments(&params)?;

    Srvf::new(samps, params)
}

/// The action of the reparameterization `gamma` on `q`, i.e. the SRVF of
/// `F ∘ gamma` when `q` is the SRVF of `F`: `(q ∘ gamma) * sqrt(gamma')`.
///
/// `gamma` must be a non-decreasing 1-D function whose range lies within the
/// domain of `q`. The result lives on `gamma`'s domain, on a grid holding both
/// `gamma`'s knots and the preimages of `q`'s knots, so each of its segments
/// maps into a single segment of `q`. The L2 norm is preserved.
///
/// # Errors
/// * If `gamma` is not 1-D
pub fn gamma_action(q: &Srvf, gamma: &Plf) -> Result<Srvf> {
    if gamma.dim() != 1 {
        return Err(AlgebraError::NotOneDimensional { dim: gamma.dim() });
    }
    if q.is_empty() || gamma.ncp() < 2 {
        return Ok(Srvf::empty(q.dim()));
    }

    let q_knot_preimages = gamma.preimages(q.params())?;
    let params = merge_distinct(gamma.params(), &q_knot_preimages);
    let gamma_vals = gamma.evaluate(&params)?.to_vec();

    let images = midpoints(&gamma_vals);
    let mut samps = q.evaluate(&images)?;

    let mut slopes_root = Vec::with_capacity(images.len());
    for (t, g) in params.windows(2).zip(gamma_vals.windows(2)) {
        let slope = (g[1] - g[0]) / (t[1] - t[0]);
        slopes_root.push(slope.max(0.0).sqrt());
    }
    let mut data = samps.view_mut();
    for (k, mut col) in data.columns_mut().into_iter().enumerate() {
        col *= slopes_root[k];
    }

    log::debug!(
        "gamma action: {} knots of q, {} knots of gamma, {} knots in result",
        q.ncp(),
        gamma.ncp(),
        params.len()
    );
    Srvf::new(samps, params)
}

/// The SRVF of a curve: on each segment the velocity `v` scaled to `v / sqrt(|v|)`.
///
/// Stationary and zero-width segments give zero. A curve with fewer than two
/// knots has no segments and gives an empty SRVF.
pub fn plf_to_srvf(f: &Plf) -> Srvf {
    if f.ncp() < 2 {
        return Srvf::empty(f.dim());
    }

    let t = f.params();
    let x = f.samps();
    let mut samps = Array2::<f64>::zeros((f.dim(), f.ncp() - 1));
    for (i, mut col) in samps.columns_mut().into_iter().enumerate() {
        let dt = t[i + 1] - t[i];
        if dt <= 0.0 {
            continue;
        }
        let v = (&x.column(i + 1) - &x.column(i)) / dt;
        let speed = v.dot(&v).sqrt();
        if speed > 0.0 {
            col.assign(&(v / speed.sqrt()));
        }
    }

    Srvf {
        samps: Pointset::from_array(samps),
        params: t.to_vec(),
    }
}

/// The curve whose SRVF is `q` and which starts at `start`.
///
/// # Errors
/// * If `start` does not have `q.dim()` entries
pub fn srvf_to_plf(q: &Srvf, start: &Point) -> Result<Plf> {
    AlgebraError::check_dim(q.dim(), start.len())?;
    if q.is_empty() {
        return Ok(Plf::empty(q.dim()));
    }

    let t = q.params();
    let mut samps = Array2::<f64>::zeros((q.dim(), q.ncp()));
    samps.column_mut(0).assign(start);
    for i in 0..q.samps().npts() {
        let qi = q.samps().column(i);
        let norm = qi.dot(&qi).sqrt();
        let step = &qi * (norm * (t[i + 1] - t[i]));
        let next = &samps.column(i) + &step;
        samps.column_mut(i + 1).assign(&next);
    }

    Plf::new(Pointset::from_array(samps), t.to_vec())
}

/// All-pairs `l2_distance` over `qs`; symmetric, with a zero diagonal.
///
/// Every cell is computed independently, in parallel over rows when the
/// `rayon` feature is enabled.
///
/// # Errors
/// * If the functions do not all share one dimension
pub fn distance_matrix(qs: &[Srvf]) -> Result<Array2<f64>> {
    let n = qs.len();
    if let Some(first) = qs.first() {
        for q in qs {
            AlgebraError::check_dim(first.dim(), q.dim())?;
        }
    }

    let row = |i: usize| -> Result<Vec<f64>> {
        (0..n)
            .map(|j| match j > i {
                true => l2_distance(&qs[i], &qs[j]),
                false => Ok(0.0),
            })
            .collect()
    };

    #[cfg(feature = "rayon")]
    let rows: Vec<Vec<f64>> = {
        use rayon::prelude::*;
        (0..n).into_par_iter().map(row).collect::<Result<_>>()?
    };
    #[cfg(not(feature = "rayon"))]
    let rows: Vec<Vec<f64>> = (0..n).map(row).collect::<Result<_>>()?;

    // Only the upper triangle was computed; mirror it
    let mut out = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            out[[i, j]] = rows[i][j];
            out[[j, i]] = rows[i][j];
        }
    }
    Ok(out)
}
