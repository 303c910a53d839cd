//! Facet wrapping: discovering the facets of the hull of a bounded,
//! full-dimensional union by rotating a hyperplane about a ridge
//! until it touches the union again.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::{Error, Result};
use crate::hull::uset_convex_hull_wrap;
use crate::lp::{self, Lp};
use crate::mat::Mat;
use crate::poly::{BasicSet, Set};
use crate::seq;

fn unit_row(width: usize) -> Vec<BigInt> {
    let mut row = vec![BigInt::zero(); width];
    row[0] = BigInt::from(1);
    row
}

/// The wrapping polyhedron of a (transformed) union: one dilation
/// variable `a_i` and one point block `x_i` per member, constrained by
///
/// ```text
///     A_i (a_i, x_i) >= 0        member constraints, homogenized
///           a_i      >= 0
///     sum_i x_{i,1}   = 1
/// ```
fn wrap_constraints(set: &Set) -> BasicSet {
    let blk = 1 + set.dim();
    let n = set.n();
    let total = blk * n;
    let width = 1 + total;
    let mut lp_set = BasicSet::universe(total);
    let mut row = vec![BigInt::zero(); width];
    row[0] = BigInt::from(-1);
    for i in 0..n {
        row[1 + blk * i + 1] = BigInt::from(1);
    }
    lp_set.add_equality(row);
    for (i, member) in set.members().iter().enumerate() {
        debug_assert!(!member.is_empty());
        let base = 1 + blk * i;
        let mut row = vec![BigInt::zero(); width];
        row[base] = BigInt::from(1);
        lp_set.add_inequality(row);
        for e in member.eqs() {
            let mut row = vec![BigInt::zero(); width];
            row[base..base + blk].clone_from_slice(e);
            lp_set.add_equality(row);
        }
        for q in member.ineqs() {
            let mut row = vec![BigInt::zero(); width];
            row[base..base + blk].clone_from_slice(q);
            lp_set.add_inequality(row);
        }
    }
    lp_set.set_rational();
    lp_set
}

/// Given a facet constraint of the hull of `set` and a ridge
/// constraint on that facet, replace `facet` by the adjacent facet of
/// the hull across the ridge.
///
/// The union is moved to coordinates where the facet is `x1 >= 0` and
/// the ridge `x2 >= 0` on it; one LP over the wrapping polyhedron
/// yields the rotation `a = n/d`, and the new facet is `d*R - n*F`.
/// An unbounded LP means the facet does not rotate: it is unbounded
/// in that direction but meets the union in a bounded set, and `facet`
/// is left untouched.
pub(crate) fn wrap_facet(set: &Set, facet: &mut Vec<BigInt>, ridge: &[BigInt]) -> Result<()> {
    let dim = set.dim();
    let width = 1 + dim;
    let blk = width;
    let t = Mat::from_rows(
        vec![unit_row(width), facet.clone(), ridge.to_vec()],
        width,
    );
    let u = t.right_inverse()?;
    let tset = set.preimage(&u)?;
    let lp_set = wrap_constraints(&tset);
    let mut obj = vec![BigInt::zero(); blk * tset.n()];
    for i in 0..tset.n() {
        obj[blk * i + 2] = BigInt::from(1);
    }
    match lp::solve(&lp_set, &obj)? {
        Lp::Minimum(a) => {
            *facet = seq::combine(&-a.numer().clone(), facet, a.denom(), ridge);
            seq::normalize(facet);
            if seq::is_zero(facet) {
                return Err(Error::Internal("wrapped facet collapsed to zero"));
            }
        }
        Lp::Unbounded => {}
        Lp::Empty => return Err(Error::Lp("wrapping polyhedron is empty".into())),
    }
    Ok(())
}

/// Check that `row` is a bounding hyperplane of the union: its linear
/// form must reach its minimum, and the minimum must respect the
/// constant. Used to validate the bounds matrix in debug builds.
fn is_bounding_hyperplane(set: &Set, row: &[BigInt]) -> Result<bool> {
    use num_rational::BigRational;
    for member in set.members() {
        if member.is_empty() {
            continue;
        }
        match lp::solve(member, &row[1..])? {
            Lp::Unbounded => return Ok(false),
            Lp::Empty => {}
            Lp::Minimum(v) => {
                if v + BigRational::from_integer(row[0].clone())
                    < BigRational::from_integer(BigInt::zero())
                {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

/// Walk the independent-bounds matrix down to a single row describing
/// a true facet of the hull.
///
/// Each round slices the union with `bounds[0]`; if the slice's
/// affine hull gains exactly one equality, `bounds[0]` is a facet.
/// Otherwise the remaining bounds are projected onto the span of the
/// slice equalities, zero rows are trimmed, and `bounds[0]` is
/// wrapped around the last row, which is then dropped.
pub(crate) fn initial_facet_constraint(set: &Set, mut bounds: Mat) -> Result<Mat> {
    let dim = set.dim();
    if bounds.n_row() != dim {
        return Err(Error::Internal("bounds matrix does not span the space"));
    }
    while bounds.n_row() > 1 {
        let mut slice = set.clone();
        slice.add_equality(bounds.row(0));
        let face = crate::affine::affine_hull(&slice)?;
        if face.is_empty() || face.n_eq() == 0 {
            return Err(Error::Internal("slice of a bounding hyperplane is degenerate"));
        }
        let n_eq = face.n_eq();
        if n_eq == 1 {
            break;
        }
        let mut rows = vec![unit_row(1 + dim)];
        rows.extend(face.eqs().iter().cloned());
        let m = Mat::from_rows(rows, 1 + dim);
        let u = m.right_inverse()?;
        let q = u.right_inverse()?;
        let u = u.drop_cols(1 + n_eq, dim - n_eq).drop_cols(0, 1);
        let q = q.drop_rows(1 + n_eq, dim - n_eq).drop_rows(0, 1);
        bounds = bounds.product(&u)?.product(&q)?;
        for i in 0..bounds.n_row() {
            seq::normalize(bounds.row_mut(i));
        }
        while seq::is_zero(bounds.row(bounds.n_row() - 1)) {
            bounds.pop_row();
            if bounds.n_row() <= 1 {
                return Err(Error::Internal("bounds matrix collapsed during projection"));
            }
        }
        if cfg!(debug_assertions) && !is_bounding_hyperplane(set, bounds.row(0))? {
            return Err(Error::Internal(
                "projected row is no longer a bounding hyperplane",
            ));
        }
        let ridge = bounds.row_cloned(bounds.n_row() - 1);
        let mut facet = bounds.row_cloned(0);
        wrap_facet(set, &mut facet, &ridge)?;
        *bounds.row_mut(0) = facet;
        bounds.pop_row();
    }
    Ok(bounds)
}

/// Hyperplane description of the facet cut out by constraint `c`:
/// move the union to coordinates where `c` is `z1 = 0`, drop `z1`,
/// take the hull of the slice one dimension down, and map its
/// constraints back.
pub(crate) fn compute_facet(set: &Set, c: &[BigInt]) -> Result<BasicSet> {
    let dim = set.dim();
    let width = 1 + dim;
    let m = Mat::from_rows(vec![unit_row(width), c.to_vec()], width);
    let u = m.right_inverse()?;
    let q = u.right_inverse()?;
    let u = u.drop_cols(1, 1);
    let q = q.drop_rows(1, 1);
    let tset = set.preimage(&u)?;
    let facet_hull = uset_convex_hull_wrap(tset)?;
    facet_hull.preimage(&q)
}

/// Grow the hull from one facet: wrap every facet around each of its
/// ridges, appending facets not seen before, until the list is
/// exhausted.
pub(crate) fn extend(set: &Set, initial: &Mat) -> Result<BasicSet> {
    let dim = set.dim();
    let mut hull = BasicSet::universe(dim);
    hull.set_rational();
    let mut seed = initial.row_cloned(0);
    seq::normalize(&mut seed);
    hull.add_inequality(seed);
    let mut i = 0;
    while i < hull.n_ineq() {
        let facet = compute_facet(set, &hull.ineqs()[i])?;
        for ridge in facet.ineqs() {
            let mut cand = hull.ineqs()[i].clone();
            wrap_facet(set, &mut cand, ridge)?;
            if !hull.ineqs().contains(&cand) {
                hull.add_inequality(cand);
            }
        }
        i += 1;
    }
    hull.simplify();
    Ok(hull)
}
