//! Piecewise-linear functions from a 1-D parameter domain into D-dimensional space.
//!
//! ```rust
//! use srvf::{Plf, Pointset};
//! use srvf::plf::{composition, inverse};
//!
//! // F(t) = 2t on [0, 1]
//! let f = Plf::new(Pointset::from_slice(1, 2, &[0.0, 2.0]).unwrap(), vec![0.0, 1.0]).unwrap();
//! assert_eq!(f.evaluate_at(0.25).unwrap()[0], 0.5);
//!
//! // The inverse maps [0, 2] back to [0, 1]
//! let finv = inverse(&f).unwrap();
//! let id = composition(&finv, &f).unwrap();
//! assert!((id.evaluate_at(0.3).unwrap()[0] - 0.3).abs() < 1e-12);
//! ```
use crate::error::{AlgebraError, Result};
use crate::merge::{merge_distinct, merge_unique};
use crate::one_dim::linear::{interp_linear, preimages};
use crate::pointset::{Matrix, Point, Pointset};
use crate::utils::unit_grid;

/// Curves shorter than this are left alone by `scale_to_unit_arc_length`
pub const MIN_ARC_LENGTH: f64 = 1e-9;

/// A continuous function, affine between consecutive knots, taking the value
/// `samps().column(i)` at `params()[i]`.
///
/// The knots are non-decreasing; they must be strictly increasing wherever the
/// function is inverted or used as the inner function of a composition.
/// A `Plf` with no knots is the empty map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plf {
    samps: Pointset,
    params: Vec<f64>,
}

impl Plf {
    /// # Errors
    /// * If `params` does not have one knot per sample point
    pub fn new(samps: Pointset, params: Vec<f64>) -> Result<Self> {
        if params.len() != samps.npts() {
            return Err(AlgebraError::GridLength {
                expected: samps.npts(),
                actual: params.len(),
            });
        }
        debug_assert!(
            params.windows(2).all(|w| w[0] <= w[1]),
            "knots must be non-decreasing: {params:?}"
        );

        Ok(Self { samps, params })
    }

    /// Sample points on a uniform grid over `[0, 1]`
    pub fn from_samps(samps: Pointset) -> Self {
        let params = unit_grid(samps.npts());
        Self { samps, params }
    }

    /// The empty map into `dim`-dimensional space
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

    /// Number of control points
    #[inline]
    pub fn ncp(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ncp() == 0
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
    ///
    /// Values outside the domain take the nearest endpoint's value.
    pub fn evaluate(&self, tv: &[f64]) -> Result<Pointset> {
        let mut out = Pointset::new(self.dim(), tv.len());
        self.evaluate_into(tv, &mut out)?;
        Ok(out)
    }

    /// Evaluate into a caller-supplied `dim() x tv.len()` buffer.
    /// An empty `Plf` leaves `out` untouched.
    pub fn evaluate_into(&self, tv: &[f64], out: &mut Pointset) -> Result<()> {
        interp_linear(&self.params, self.samps.view(), tv, out.view_mut())
    }

    /// Preimages of the non-decreasing values `tv` under this non-decreasing
    /// 1-D function; the rightmost preimage where the function is flat.
    pub fn preimages(&self, tv: &[f64]) -> Result<Vec<f64>> {
        let mut out = vec![0.0; tv.len()];
        self.preimages_into(tv, &mut out)?;
        Ok(out)
    }

    /// Like `preimages`, writing into `out`.
    ///
    /// Returns immediately, leaving `out` untouched, if this `Plf` is empty or
    /// `tv` is empty.
    ///
    /// # Errors
    /// * If `dim() > 1`
    pub fn preimages_into(&self, tv: &[f64], out: &mut [f64]) -> Result<()> {
        preimages(&self.params, self.samps.view(), tv, out)
    }

    /// Sum of the lengths of the linear segments
    pub fn arc_length(&self) -> f64 {
        (1..self.samps.npts())
            .map(|i| self.samps.distance(i - 1, i))
            .sum()
    }

    pub fn centroid(&self) -> Point {
        self.samps.centroid()
    }

    /// Add `v` to every sample point.
    ///
    /// # Errors
    /// * If `v` does not have `dim()` entries
    pub fn translate(&mut self, v: &Point) -> Result<()> {
        self.samps.translate(v)
    }

    /// Apply a `dim() x dim()` matrix to every sample point
    pub fn rotate(&mut self, r: &Matrix) -> Result<()> {
        self.samps.rotate(r)
    }

    pub fn scale(&mut self, s: f64) {
        self.samps.scale(s);
    }

    /// Scale to unit arc length. Curves of (near) zero length are left as they are.
    pub fn scale_to_unit_arc_length(&mut self) {
        let len = self.arc_length();
        if len > MIN_ARC_LENGTH {
            self.scale(1.0 / len);
        } else {
            log::debug!("arc length {len:e} too small to normalize; leaving curve unscaled");
        }
    }

    /// Subtract the centroid from every sample point
    pub fn translate_to_origin(&mut self) {
        self.samps.center();
    }
}

/// `w1 * f1 + w2 * f2`, tabulated on the merged knots of both functions.
///
/// If either function is empty the result is empty.
///
/// # Errors
/// * If `f1` and `f2` differ in dimension
pub fn linear_combination(f1: &Plf, f2: &Plf, w1: f64, w2: f64) -> Result<Plf> {
    AlgebraError::check_dim(f1.dim(), f2.dim())?;
    if f1.is_empty() || f2.is_empty() {
        return Ok(Plf::empty(f1.dim()));
    }

    let params = merge_unique(f1.params(), f2.params());
    let v1 = f1.evaluate(&params)?;
    let v2 = f2.evaluate(&params)?;
    let samps = Pointset::weighted_sum(&v1, &v2, w1, w2)?;

    Plf::new(samps, params)
}

/// `f1 ∘ f2`, the function `t -> f1(f2(t))`.
///
/// `f2` must be a non-decreasing 1-D function whose range lies within the
/// domain of `f1`. The result is tabulated on `f2`'s knots together with the
/// preimages of `f1`'s knots under `f2`, so that every breakpoint of either
/// function is represented.
///
/// # Errors
/// * If `f2` is not 1-D
pub fn composition(f1: &Plf, f2: &Plf) -> Result<Plf> {
    if f2.dim() != 1 {
        return Err(AlgebraError::NotOneDimensional { dim: f2.dim() });
    }
    if f1.is_empty() || f2.is_empty() {
        return Ok(Plf::empty(f1.dim()));
    }

    let f1_knot_preimages = f2.preimages(f1.params())?;
    let params = merge_distinct(f2.params(), &f1_knot_preimages);

    let inner = f2.evaluate(&params)?.to_vec();
    let samps = f1.evaluate(&inner)?;

    log::trace!(
        "composed {} x {} knots onto {} knots",
        f1.ncp(),
        f2.ncp(),
        params.len()
    );
    Plf::new(samps, params)
}

/// The inverse of a monotone 1-D function, obtained by swapping knots and samples.
///
/// `f` may be non-decreasing or non-increasing; a non-increasing `f` has its
/// knots reversed so the inverse is tabulated on a non-decreasing grid.
/// Monotonicity is not re-checked. Where `f` is flat, the result jumps, and
/// evaluation at the jump resolves to the right-hand value.
///
/// # Errors
/// * If `f` is not 1-D
pub fn inverse(f: &Plf) -> Result<Plf> {
    if f.dim() != 1 {
        return Err(AlgebraError::NotOneDimensional { dim: f.dim() });
    }
    let mut knots = f.samps().to_vec();
    let mut vals = f.params().to_vec();
    if knots.first() > knots.last() {
        knots.reverse();
        vals.reverse();
    }
    let samps = Pointset::from_slice(1, vals.len(), &vals)?;

    Plf::new(samps, knots)
}

#[cfg(test)]
mod test {
    use ndarray::array;

    use super::{composition, inverse, linear_combination, Plf};
    use crate::error::AlgebraError;
    use crate::pointset::Pointset;
    use crate::testing::{assert_close, randn, random_grid, rng_fixed_seed};

    fn plf(dim: usize, samps: &[f64], params: &[f64]) -> Plf {
        Plf::new(
            Pointset::from_slice(dim, params.len(), samps).unwrap(),
            params.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn test_construction() {
        let f = Plf::from_samps(Pointset::from_slice(1, 3, &[0.0, 1.0, 0.0]).unwrap());
        assert_eq!(f.params(), &[0.0, 0.5, 1.0]);
        assert_eq!(f.domain(), Some((0.0, 1.0)));

        let err = Plf::new(Pointset::new(2, 3), vec![0.0, 1.0]);
        assert_eq!(
            err,
            Err(AlgebraError::GridLength {
                expected: 3,
                actual: 2
            })
        );

        let e = Plf::empty(3);
        assert!(e.is_empty());
        assert_eq!(e.dim(), 3);
        assert_eq!(e.domain(), None);
    }

    #[test]
    fn test_evaluate() {
        let f = plf(
            2,
            &[
                1.2, -0.5, 0.98, 100.01, -98.03, 7.0, //
                0.0, 3.8, -0.5, -55.33, 100.0, 2.0,
            ],
            &[0.0, 0.1, 0.12, 0.65, 0.8, 1.0],
        );
        let tv = [-1.0, 0.0, 0.05, 0.1, 0.11, 0.9, 1.0, 2.0];
        let v = f.evaluate(&tv).unwrap();

        let expected = [
            [1.2, 0.0],
            [1.2, 0.0],
            [0.35, 1.9],
            [-0.5, 3.8],
            [0.24, 1.65],
            [-45.515, 51.0],
            [7.0, 2.0],
            [7.0, 2.0],
        ];
        for (k, e) in expected.iter().enumerate() {
            assert_close(v.get(0, k), e[0], 1e-12);
            assert_close(v.get(1, k), e[1], 1e-12);
        }

        // Exactly the knot value at an interior breakpoint
        let p = f.evaluate_at(0.1).unwrap();
        assert_eq!(p.to_vec(), vec![-0.5, 3.8]);
        assert_eq!(Plf::empty(2).evaluate_at(0.1).unwrap().len(), 0);
    }

    #[test]
    fn test_preimages() {
        let f = plf(1, &[0.0, 0.5, 0.5, 2.0], &[0.0, 0.25, 0.5, 1.0]);
        let p = f.preimages(&[0.0, 0.25, 0.5, 1.25, 2.0]).unwrap();
        for (a, b) in p.iter().zip([0.0, 0.125, 0.5, 0.75, 1.0].iter()) {
            assert_close(*a, *b, 1e-12);
        }

        // Empty function and empty queries leave the output alone
        let mut out = [3.0, 4.0];
        Plf::empty(1).preimages_into(&[0.1, 0.2], &mut out).unwrap();
        assert_eq!(out, [3.0, 4.0]);
        let mut none: [f64; 0] = [];
        f.preimages_into(&[], &mut none).unwrap();

        let g = plf(2, &[0.0, 1.0, 0.0, 1.0], &[0.0, 1.0]);
        assert_eq!(
            g.preimages(&[0.5]),
            Err(AlgebraError::NotOneDimensional { dim: 2 })
        );
    }

    #[test]
    fn test_arc_length_and_transforms() {
        // 3-4-5 triangle legs
        let mut f = plf(2, &[0.0, 3.0, 3.0, 0.0, 0.0, 4.0], &[0.0, 0.5, 1.0]);
        assert_close(f.arc_length(), 7.0, 1e-12);
        assert_eq!(Plf::empty(2).arc_length(), 0.0);
        assert_eq!(plf(2, &[1.0, 1.0], &[0.0]).arc_length(), 0.0);

        f.scale_to_unit_arc_length();
        assert_close(f.arc_length(), 1.0, 1e-12);

        f.translate_to_origin();
        let c = f.centroid();
        assert_close(c[0], 0.0, 1e-12);
        assert_close(c[1], 0.0, 1e-12);

        f.rotate(&array![[0.0, -1.0], [1.0, 0.0]]).unwrap();
        assert_close(f.arc_length(), 1.0, 1e-12);

        assert_eq!(
            f.translate(&array![1.0, 2.0, 3.0]),
            Err(AlgebraError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );

        // Point-like curves are not blown up
        let mut p = plf(2, &[1.0, 1.0, 2.0, 2.0], &[0.0, 1.0]);
        p.scale_to_unit_arc_length();
        assert_eq!(p.samps().to_vec(), vec![1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_linear_combination() {
        let f1 = plf(1, &[0.0, 1.0, 0.0], &[0.0, 0.5, 1.0]);
        let f2 = plf(1, &[0.0, 2.0], &[0.0, 1.0]);
        let f = linear_combination(&f1, &f2, 2.0, -0.5).unwrap();

        assert_eq!(f.params(), &[0.0, 0.5, 1.0]);
        let s = f.samps().to_vec();
        for (a, b) in s.iter().zip([0.0, 1.5, -1.0].iter()) {
            assert_close(*a, *b, 1e-12);
        }

        let g = plf(2, &[0.0, 1.0, 0.0, 1.0], &[0.0, 1.0]);
        assert!(linear_combination(&f1, &g, 1.0, 1.0).is_err());
        assert!(linear_combination(&f1, &Plf::empty(1), 1.0, 1.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_composition() {
        // F1 is a 2-D curve with a corner at 0.5; F2 warps [0, 1] with a corner at 0.5
        let f1 = plf(2, &[0.0, 1.0, 1.0, 0.0, 0.0, 1.0], &[0.0, 0.5, 1.0]);
        let f2 = plf(1, &[0.0, 0.25, 1.0], &[0.0, 0.5, 1.0]);
        let f = composition(&f1, &f2).unwrap();

        // F1's corner pulls back to t = 2/3
        assert_eq!(f.ncp(), 4);
        assert_close(f.params()[2], 2.0 / 3.0, 1e-12);

        let rng = &mut rng_fixed_seed();
        let mut tv = randn::<f64>(rng, 50);
        tv.sort_unstable_by(|x, y| x.total_cmp(y));
        let direct = f.evaluate(&tv).unwrap();
        let inner = f2.evaluate(&tv).unwrap().to_vec();
        let nested = f1.evaluate(&inner).unwrap();
        for (a, b) in direct.to_vec().iter().zip(nested.to_vec().iter()) {
            assert_close(*a, *b, 1e-12);
        }

        assert_eq!(
            composition(&f1, &f1),
            Err(AlgebraError::NotOneDimensional { dim: 2 })
        );
    }

    #[test]
    fn test_inverse_round_trip() {
        let rng = &mut rng_fixed_seed();
        let params = random_grid(rng, 20);
        let mut samps = randn::<f64>(rng, 20);
        samps.sort_unstable_by(|x, y| x.total_cmp(y));
        let f = plf(1, &samps, &params);

        let finv = inverse(&f).unwrap();
        assert_eq!(finv.params(), &samps[..]);
        assert_eq!(finv.samps().to_vec(), params);

        let ff = inverse(&finv).unwrap();
        for (a, b) in ff.params().iter().zip(f.params().iter()) {
            assert_close(*a, *b, 1e-12);
        }
        for (a, b) in ff.samps().to_vec().iter().zip(f.samps().to_vec().iter()) {
            assert_close(*a, *b, 1e-12);
        }

        // F^-1 ∘ F is the identity on F's domain
        let id = composition(&finv, &f).unwrap();
        let tv = [0.0, 0.1, 0.5, 0.77, 1.0];
        let v = id.evaluate(&tv).unwrap();
        for (k, t) in tv.iter().enumerate() {
            assert_close(v.get(0, k), *t, 1e-9);
        }

        assert!(inverse(&plf(2, &[0.0, 1.0, 0.0, 1.0], &[0.0, 1.0])).is_err());
        assert!(inverse(&Plf::empty(1)).unwrap().is_empty());
    }

    #[test]
    fn test_inverse_decreasing() {
        let f = plf(1, &[1.0, 0.5, 0.0], &[0.0, 0.5, 1.0]);
        let finv = inverse(&f).unwrap();

        assert_eq!(finv.params(), &[0.0, 0.5, 1.0]);
        assert_eq!(finv.samps().to_vec(), vec![1.0, 0.5, 0.0]);

        let ff = inverse(&finv).unwrap();
        assert_eq!(ff, f);

        // Steeper second half
        let g = plf(1, &[2.0, 1.5, 0.0], &[0.0, 0.5, 1.0]);
        let ginv = inverse(&g).unwrap();
        assert_eq!(ginv.params(), &[0.0, 1.5, 2.0]);
        for (y, t) in [(0.0, 1.0), (0.75, 0.75), (1.5, 0.5), (1.75, 0.25), (2.0, 0.0)] {
            assert_close(ginv.evaluate_at(y).unwrap()[0], t, 1e-12);
        }
    }

    #[test]
    fn test_preimages_zero_dim() {
        let f = Plf::new(Pointset::new(0, 3), vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(
            f.preimages(&[0.1]),
            Err(AlgebraError::NotOneDimensional { dim: 0 })
        );
    }
}
