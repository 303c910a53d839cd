//! Affine hulls of basic sets and unions.
//!
//! The affine hull is represented as a basic set carrying only
//! equality rows. For a single polyhedron it is found by promoting
//! implicit equalities; for a union, by intersecting the members'
//! equality row-spans (in homogeneous coordinates, where affine forms
//! are linear).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::{Error, Result};
use crate::hull::reduce::detect_implicit_equalities;
use crate::mat::{self, Mat};
use crate::poly::{BasicSet, Set};
use crate::seq;

/// Affine hull of a single basic set: its equalities, explicit and
/// implicit.
pub fn affine_hull_basic(bset: &BasicSet) -> Result<BasicSet> {
    let mut b = bset.clone();
    b.simplify();
    if b.is_empty() {
        return Ok(BasicSet::empty(bset.dim()));
    }
    detect_implicit_equalities(&mut b)?;
    if b.is_empty() {
        return Ok(b);
    }
    let mut hull = BasicSet::from_constraints(b.dim(), b.eqs().to_vec(), Vec::new());
    if b.is_rational() {
        hull.set_rational();
    }
    hull.gauss();
    Ok(hull)
}

/// Affine hull of a union.
pub fn affine_hull(set: &Set) -> Result<BasicSet> {
    let width = 1 + set.dim();
    let mut span: Option<Vec<Vec<BigInt>>> = None;
    for member in set.members() {
        if member.is_empty() {
            continue;
        }
        let h = affine_hull_basic(member)?;
        if h.is_empty() {
            continue;
        }
        let rows = h.eqs().to_vec();
        span = Some(match span {
            None => rows,
            Some(prev) => intersect_spans(&prev, &rows, width),
        });
        if span.as_ref().is_some_and(|rows| rows.is_empty()) {
            break;
        }
    }
    let Some(rows) = span else {
        return Ok(BasicSet::empty(set.dim()));
    };
    let mut hull = BasicSet::from_constraints(set.dim(), rows, Vec::new());
    hull.set_rational();
    hull.gauss();
    Ok(hull)
}

/// Intersection of the row spans of two full-row-rank systems, as
/// integer rows.
fn intersect_spans(a: &[Vec<BigInt>], b: &[Vec<BigInt>], width: usize) -> Vec<Vec<BigInt>> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let to_rat = |rows: &[Vec<BigInt>]| -> Vec<Vec<BigRational>> {
        rows.iter()
            .map(|r| r.iter().map(|c| BigRational::from_integer(c.clone())).collect())
            .collect()
    };
    let (rb, pivots) = mat::rref(to_rat(b));
    // Rows of `a` reduced modulo span(b); a combination of the rows
    // of `a` lies in span(b) exactly when the same combination of the
    // residuals vanishes.
    let residuals: Vec<Vec<BigRational>> = to_rat(a)
        .into_iter()
        .map(|row| mat::residual(row, &rb, &pivots))
        .collect();
    let transpose: Vec<Vec<BigRational>> = (0..width)
        .map(|j| residuals.iter().map(|r| r[j].clone()).collect())
        .collect();
    let kernel = mat::nullspace(transpose, a.len());
    let mut out = Vec::new();
    for lambda in kernel {
        let mut combo = vec![BigRational::zero(); width];
        for (l, row) in lambda.iter().zip(a) {
            if !l.is_zero() {
                for (j, c) in row.iter().enumerate() {
                    combo[j] += l * BigRational::from_integer(c.clone());
                }
            }
        }
        let row = mat::clear_denominators(&combo);
        if !seq::is_zero(&row) {
            out.push(row);
        }
    }
    out
}

/// Coordinate changes eliminating the equalities of an affine hull:
/// returns `(T, T2)` with `x_h = T * z_h` parameterizing the affine
/// subspace and `z_h = T2 * x_h` mapping back.
pub fn remove_equalities(aff: &BasicSet) -> Result<(Mat, Mat)> {
    let dim = aff.dim();
    let n_eq = aff.n_eq();
    if n_eq == 0 || n_eq > dim {
        return Err(Error::Internal("remove_equalities needs 0 < n_eq <= dim"));
    }
    let mut rows = Vec::with_capacity(1 + n_eq);
    let mut first = vec![BigInt::zero(); 1 + dim];
    first[0] = BigInt::from(1);
    rows.push(first);
    rows.extend(aff.eqs().iter().cloned());
    let m = Mat::from_rows(rows, 1 + dim);
    let u = m.right_inverse()?;
    let q = u.right_inverse()?;
    let t = u.drop_cols(1, n_eq);
    let t2 = q.drop_rows(1, n_eq);
    Ok((t, t2))
}
