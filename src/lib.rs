//! Algebra of piecewise-linear functions (PLFs) and square-root velocity
//! functions (SRVFs) over non-uniform, independently defined parameter grids.
//!
//! A [`Plf`] maps a 1-D parameter to a point in D-dimensional space and is
//! affine between knots. An [`Srvf`] is piecewise-constant, the
//! derivative-normalized counterpart of a PLF used in elastic shape analysis.
//! Binary operations place both operands on the merged grid of their knots
//! ([`merge`]), resample them there ([`one_dim`]), and combine point-wise.
//!
//! # Conventions
//! * Grids are non-decreasing; sortedness is not checked outside debug builds.
//! * Evaluation is right-continuous at breakpoints and holds the boundary
//!   values outside the domain.
//! * Inverse lookup on a flat stretch returns the rightmost preimage.
//! * Empty functions and empty query lists pass through without error.
//! * Only `translate`, `rotate`, `scale` and their normalizing wrappers
//!   mutate; every other operation returns a new value.
//!
//! # Example: reparameterization leaves the norm alone
//! ```rust
//! use srvf::{gamma_action, l2_norm, plf_to_srvf, Plf, Pointset};
//!
//! // An L-shaped curve in the plane
//! let curve = Plf::new(
//!     Pointset::from_slice(2, 3, &[0.0, 1.0, 1.0, 0.0, 0.0, 1.0]).unwrap(),
//!     vec![0.0, 0.5, 1.0],
//! )
//! .unwrap();
//! let q = plf_to_srvf(&curve);
//!
//! // A warp of [0, 1] that lingers near the start
//! let gamma = Plf::new(
//!     Pointset::from_slice(1, 3, &[0.0, 0.2, 1.0]).unwrap(),
//!     vec![0.0, 0.6, 1.0],
//! )
//! .unwrap();
//!
//! let qg = gamma_action(&q, &gamma).unwrap();
//! assert!((l2_norm(&qg) - l2_norm(&q)).abs() < 1e-12);
//! // The squared norm of an SRVF is the length of its curve
//! assert!((l2_norm(&q).powi(2) - curve.arc_length()).abs() < 1e-12);
//! ```
// These "needless" range loops read more clearly against the row/column math
#![allow(clippy::needless_range_loop)]

pub mod error;
pub use error::{AlgebraError, Result};

pub mod pointset;
pub use pointset::{Matrix, Point, Pointset};

pub mod merge;

pub mod one_dim;
pub use one_dim::{hold::Left1D, linear::Linear1D, Interp1D, RectilinearGrid1D};

pub mod plf;
pub use plf::{composition, inverse, Plf};

pub mod srvf;
pub use srvf::{
    distance_matrix, gamma_action, l2_distance, l2_norm, l2_product, plf_to_srvf, refinement,
    srvf_to_plf, Srvf,
};

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
