//! Convex hulls of unions of polyhedra.
//!
//! The entry points are [`Set::convex_hull`], [`Set::simple_hull`]
//! and [`BasicSet::convex_hull`]. The dispatcher normalizes the
//! union, factors out its affine hull, and then picks a strategy:
//! closed forms in dimensions zero and one, plain reduction for a
//! single member, the Fourier-Motzkin Minkowski construction for
//! unbounded unions, and facet wrapping for bounded full-dimensional
//! ones.
//!
//! Results are deterministic: they depend only on the input order,
//! the tie-breaks of the independence test, and the LP pivot rule
//! fixed in [`crate::lp`].

pub(crate) mod bounds;
pub(crate) mod line;
pub(crate) mod pair;
pub(crate) mod reduce;
pub(crate) mod wrap;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::affine;
use crate::error::Result;
use crate::lp::{self, Lp};
use crate::mat::Mat;
use crate::poly::{BasicSet, Set};

impl BasicSet {
    /// Reduce this polyhedron to minimal constraint form: implicit
    /// equalities promoted, redundant inequalities removed.
    pub fn convex_hull(self) -> Result<BasicSet> {
        reduce::reduce(self)
    }
}

impl Set {
    /// The convex hull of the union, as a single polyhedron.
    pub fn convex_hull(mut self) -> Result<BasicSet> {
        let dim = self.dim();
        if self.n() == 0 {
            return Ok(BasicSet::empty(dim));
        }
        self.set_rational();
        self.normalize();
        prune_infeasible(&mut self)?;
        if self.is_empty() {
            return Ok(BasicSet::empty(dim));
        }
        let aff = affine::affine_hull(&self)?;
        if aff.n_eq() > 0 {
            modulo_affine_hull(self, aff)
        } else {
            uset_convex_hull(self)
        }
    }

    /// A superset of the convex hull described only by translates of
    /// the members' own inequalities, each tightened to the union.
    /// Cheaper than the exact hull and equal to it only when the
    /// input normals suffice.
    pub fn simple_hull(mut self) -> Result<BasicSet> {
        let dim = self.dim();
        if self.n() == 0 {
            return Ok(BasicSet::empty(dim));
        }
        if self.n() == 1 {
            let only = self.into_members().pop().expect("one member");
            return Ok(only);
        }
        let candidates: Vec<Vec<BigInt>> = self
            .members()
            .iter()
            .flat_map(|m| m.ineqs().iter().cloned())
            .collect();
        let aff = affine::affine_hull(&self)?;
        if aff.is_empty() {
            return Ok(BasicSet::empty(dim));
        }
        let mut bset = aff;
        for mut row in candidates {
            if bounds::is_bound(&mut self, &mut row)? {
                bset.add_inequality(row);
            }
        }
        let mut hull = reduce::reduce(bset)?;
        hull.clear_rational();
        Ok(hull)
    }
}

/// Mark members whose emptiness is not syntactically visible, then
/// drop every empty member. Keeps the downstream constructions (the
/// Minkowski cones and the wrapping polyhedron) free of phantom
/// members.
fn prune_infeasible(set: &mut Set) -> Result<()> {
    let dim = set.dim();
    let obj = vec![BigInt::zero(); dim];
    for member in set.members_mut() {
        if member.is_empty() {
            continue;
        }
        if let Lp::Empty = lp::solve(member, &obj)? {
            member.set_to_empty();
        }
    }
    set.remove_empty_members();
    Ok(())
}

/// Hull of a union known to span its space affinely.
pub(crate) fn uset_convex_hull(mut set: Set) -> Result<BasicSet> {
    set.set_rational();
    set.normalize();
    prune_infeasible(&mut set)?;
    let dim = set.dim();
    if set.is_empty() {
        let mut e = BasicSet::empty(dim);
        e.set_rational();
        return Ok(e);
    }
    if dim == 0 {
        let mut u = BasicSet::universe(0);
        u.set_rational();
        return Ok(u);
    }
    if set.n() == 1 {
        let only = set.into_members().pop().expect("one member");
        return reduce::reduce(only);
    }
    if dim == 1 {
        return line::convex_hull_1d(set);
    }
    if !bounds::set_is_bounded(&set)? {
        return pair::uset_convex_hull_elim(set);
    }
    let dirs = bounds::independent_bounds(&mut set)?;
    uset_convex_hull_wrap_with_bounds(set, dirs)
}

/// Hull of a union known to be bounded and full-dimensional; this is
/// the recursion entry used when computing the facets of a facet.
pub(crate) fn uset_convex_hull_wrap(mut set: Set) -> Result<BasicSet> {
    set.set_rational();
    set.normalize();
    prune_infeasible(&mut set)?;
    let dim = set.dim();
    if set.is_empty() {
        let mut e = BasicSet::empty(dim);
        e.set_rational();
        return Ok(e);
    }
    if dim == 0 {
        let mut u = BasicSet::universe(0);
        u.set_rational();
        return Ok(u);
    }
    if set.n() == 1 {
        let only = set.into_members().pop().expect("one member");
        return reduce::reduce(only);
    }
    if dim == 1 {
        return line::convex_hull_1d(set);
    }
    let dirs = bounds::independent_bounds(&mut set)?;
    uset_convex_hull_wrap_with_bounds(set, dirs)
}

fn uset_convex_hull_wrap_with_bounds(set: Set, dirs: Mat) -> Result<BasicSet> {
    let dirs = wrap::initial_facet_constraint(&set, dirs)?;
    wrap::extend(&set, &dirs)
}

/// Work modulo the affine hull: eliminate its equalities by a change
/// of variables, hull the reduced union, and move back, intersecting
/// with the affine hull again.
fn modulo_affine_hull(set: Set, aff: BasicSet) -> Result<BasicSet> {
    let (t, t2) = affine::remove_equalities(&aff)?;
    let reduced = set.preimage(&t)?;
    let hull = uset_convex_hull(reduced)?;
    let hull = hull.preimage(&t2)?;
    let mut out = hull.intersect(aff);
    out.simplify();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&x| BigInt::from(x)).collect()
    }

    fn square(x0: i64, y0: i64, x1: i64, y1: i64) -> BasicSet {
        let mut b = BasicSet::universe(2);
        b.add_inequality(row(&[-x0, 1, 0]));
        b.add_inequality(row(&[x1, -1, 0]));
        b.add_inequality(row(&[-y0, 0, 1]));
        b.add_inequality(row(&[y1, 0, -1]));
        b
    }

    #[test]
    fn test_hull_of_two_squares() {
        let s = Set::from_members(2, vec![square(0, 0, 1, 1), square(2, 2, 3, 3)]);
        let hull = s.convex_hull().unwrap();
        assert_eq!(hull.n_eq(), 0);
        let mut rows = hull.ineqs().to_vec();
        rows.sort();
        let mut expected = vec![
            row(&[0, 1, 0]),
            row(&[3, -1, 0]),
            row(&[0, 0, 1]),
            row(&[3, 0, -1]),
            row(&[1, 1, -1]),
            row(&[1, -1, 1]),
        ];
        expected.sort();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_hull_collinear_union_factors_affine_hull() {
        // Two points on the diagonal: the hull is the segment.
        let mut a = BasicSet::universe(2);
        a.add_equality(row(&[0, 1, 0]));
        a.add_equality(row(&[0, 0, 1]));
        let mut b = BasicSet::universe(2);
        b.add_equality(row(&[-2, 1, 0]));
        b.add_equality(row(&[-2, 0, 1]));
        let s = Set::from_members(2, vec![a, b]);
        let hull = s.convex_hull().unwrap();
        assert_eq!(hull.n_eq(), 1);
        use num_rational::BigRational;
        let pt = |x: i64, y: i64| {
            vec![
                BigRational::from_integer(BigInt::from(x)),
                BigRational::from_integer(BigInt::from(y)),
            ]
        };
        assert!(hull.contains(&pt(0, 0)));
        assert!(hull.contains(&pt(1, 1)));
        assert!(hull.contains(&pt(2, 2)));
        assert!(!hull.contains(&pt(3, 3)));
        assert!(!hull.contains(&pt(1, 0)));
    }

    #[test]
    fn test_single_member_is_reduced() {
        let mut b = square(0, 0, 1, 1);
        b.add_inequality(row(&[7, 1, 0])); // slack
        let hull = Set::from_basic(b).convex_hull().unwrap();
        assert_eq!(hull.n_ineq(), 4);
        assert!(hull.flags().no_redundant);
    }

    #[test]
    fn test_union_of_empties_is_empty() {
        let s = Set::from_members(1, vec![BasicSet::empty(1), BasicSet::empty(1)]);
        let hull = s.convex_hull().unwrap();
        assert!(hull.is_empty());
    }
}
