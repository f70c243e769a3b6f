//! Dense buffer of D-dimensional points, one point per column.
//!
//! ```rust
//! use srvf::Pointset;
//!
//! // Two 2-D points, given row-major by dimension: x-coordinates then y-coordinates
//! let mut p = Pointset::from_slice(2, 2, &[0.0, 3.0, 0.0, 4.0]).unwrap();
//! assert_eq!(p.distance(0, 1), 5.0);
//!
//! p.scale(2.0);
//! assert_eq!(p.to_vec(), vec![0.0, 6.0, 0.0, 8.0]);
//! ```
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut2, Axis};

use crate::error::{AlgebraError, Result};

/// A single point
pub type Point = Array1<f64>;

/// A dense matrix, used for rotations
pub type Matrix = Array2<f64>;

/// Column-per-point buffer of `dim` rows by `npts` columns.
///
/// The geometric transforms (`translate`, `rotate`, `scale`) act in place;
/// everything else reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointset {
    data: Array2<f64>,
}

impl Default for Pointset {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Pointset {
    /// Zero-filled buffer
    pub fn new(dim: usize, npts: usize) -> Self {
        Self {
            data: Array2::zeros((dim, npts)),
        }
    }

    /// Build from flat data ordered row-major by dimension, so that
    /// `data[d * npts + i]` is coordinate `d` of point `i`.
    ///
    /// # Errors
    /// * If `data.len() != dim * npts`
    pub fn from_slice(dim: usize, npts: usize, data: &[f64]) -> Result<Self> {
        if data.len() != dim * npts {
            return Err(AlgebraError::BufferLength {
                expected: dim * npts,
                actual: data.len(),
            });
        }
        let data = Array2::from_shape_vec((dim, npts), data.to_vec()).map_err(|_| {
            AlgebraError::BufferLength {
                expected: dim * npts,
                actual: data.len(),
            }
        })?;
        Ok(Self { data })
    }

    /// Take ownership of an existing `dim x npts` array
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn npts(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.npts() == 0
    }

    /// Coordinate `d` of point `i`
    #[inline]
    pub fn get(&self, d: usize, i: usize) -> f64 {
        self.data[[d, i]]
    }

    #[inline]
    pub fn column(&self, i: usize) -> ArrayView1<'_, f64> {
        self.data.column(i)
    }

    /// All points' coordinate `d`
    #[inline]
    pub fn row(&self, d: usize) -> ArrayView1<'_, f64> {
        self.data.row(d)
    }

    #[inline]
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    #[inline]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    #[inline]
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.data.view_mut()
    }

    /// Euclidean distance between points `i` and `j`
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let a = self.data.column(i);
        let b = self.data.column(j);
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }

    /// Euclidean distance between point `i` of `self` and point `j` of `other`
    pub fn distance_to(&self, i: usize, other: &Pointset, j: usize) -> Result<f64> {
        AlgebraError::check_dim(self.dim(), other.dim())?;
        let a = self.data.column(i);
        let b = other.data.column(j);
        Ok(a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt())
    }

    /// Inner product of point `i` of `self` and point `j` of `other`
    pub fn dot(&self, i: usize, other: &Pointset, j: usize) -> Result<f64> {
        AlgebraError::check_dim(self.dim(), other.dim())?;
        Ok(self.data.column(i).dot(&other.data.column(j)))
    }

    /// Mean of all points; the origin for an empty buffer
    pub fn centroid(&self) -> Point {
        self.data
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::zeros(self.dim()))
    }

    /// Add `v` to every point.
    ///
    /// # Errors
    /// * If `v` does not have `dim()` entries
    pub fn translate(&mut self, v: &Point) -> Result<()> {
        AlgebraError::check_dim(self.dim(), v.len())?;
        for mut col in self.data.columns_mut() {
            col += v;
        }
        Ok(())
    }

    /// Subtract the centroid from every point
    pub fn center(&mut self) {
        let ctr = self.centroid();
        for mut col in self.data.columns_mut() {
            col -= &ctr;
        }
    }

    /// Replace every point `x` with `r x`. Orthogonality of `r` is not checked.
    ///
    /// # Errors
    /// * If `r` is not `dim() x dim()`
    pub fn rotate(&mut self, r: &Matrix) -> Result<()> {
        AlgebraError::check_dim(self.dim(), r.nrows())?;
        AlgebraError::check_dim(self.dim(), r.ncols())?;
        self.data = r.dot(&self.data);
        Ok(())
    }

    pub fn scale(&mut self, s: f64) {
        self.data *= s;
    }

    /// Flat copy, row-major by dimension; the inverse of `from_slice`
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// `w1 * a + w2 * b` for two buffers of the same shape
    pub fn weighted_sum(a: &Pointset, b: &Pointset, w1: f64, w2: f64) -> Result<Pointset> {
        AlgebraError::check_dim(a.dim(), b.dim())?;
        AlgebraError::check_dim(a.npts(), b.npts())?;
        Ok(Self {
            data: &a.data * w1 + &b.data * w2,
        })
    }
}
