//! # polyhull
//!
//! Exact convex hulls of finite unions of convex polyhedra over the
//! rationals. Each polyhedron is given by linear equalities and
//! inequalities with integer coefficients; the hull of the union is
//! returned as a single polyhedron in minimal constraint form.
//!
//! The bounded, full-dimensional case is handled by facet wrapping in
//! the style of Fukuda et al.'s extended convex hull: starting from
//! one facet, each facet is rotated about each of its ridges until it
//! touches the union again, enumerating the facets of the hull.
//! Unbounded unions go through a Fourier-Motzkin Minkowski-sum
//! construction instead, and low dimensions have closed forms.
//!
//! ## Example
//!
//! ```
//! use num_bigint::BigInt;
//! use polyhull::{BasicSet, Set};
//!
//! fn row(v: &[i64]) -> Vec<BigInt> {
//!     v.iter().map(|&x| BigInt::from(x)).collect()
//! }
//!
//! // {x = 0} union {x = 2} hulls to 0 <= x <= 2.
//! let mut a = BasicSet::universe(1);
//! a.add_equality(row(&[0, 1]));
//! let mut b = BasicSet::universe(1);
//! b.add_equality(row(&[-2, 1]));
//! let hull = Set::from_members(1, vec![a, b]).convex_hull().unwrap();
//! let mut rows = hull.ineqs().to_vec();
//! rows.sort();
//! assert_eq!(rows, vec![row(&[0, 1]), row(&[2, -1])]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod affine;
pub mod error;
pub mod hull;
pub mod lp;
pub mod mat;
pub mod poly;
mod seq;

pub use error::{Error, Result};
pub use poly::{BasicMap, BasicSet, Flags, Map, Set};

/// Convenient re-exports.
pub mod prelude {
    //! The types and traits most callers need.

    pub use crate::error::{Error, Result};
    pub use crate::lp::Lp;
    pub use crate::poly::{BasicMap, BasicSet, Flags, Map, Set};
}
