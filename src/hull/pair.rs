//! Hull of an unbounded union: the pairwise Minkowski construction.
//!
//! In homogeneous coordinates the convex hull of two polyhedral cones
//! is their Minkowski sum, so the hull of a pair is obtained by
//! summing the cones over fresh variables and projecting the fresh
//! blocks away with Fourier-Motzkin. The union is folded pairwise.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::Result;
use crate::hull::reduce::reduce;
use crate::poly::{proj, BasicSet, Set};

/// Hull of two basic sets of equal dimension.
///
/// Variables are laid out as `(z | t1, y1 | t2, y2)` with the
/// homogenizing coordinate of `z` being the constant column: member
/// `i`'s constraints act on `(ti, yi)`, `t1 + t2 = 1`, `ti >= 0`, and
/// `z = y1 + y2` coordinate-wise.
pub(crate) fn convex_hull_pair(bset1: BasicSet, bset2: BasicSet) -> Result<BasicSet> {
    debug_assert_eq!(bset1.dim(), bset2.dim());
    if bset1.is_empty() {
        return reduce(bset2);
    }
    if bset2.is_empty() {
        return reduce(bset1);
    }
    let dim = bset1.dim();
    let blk = 1 + dim;
    let total = 2 + 3 * dim;
    let width = 1 + total;
    let mut big = BasicSet::universe(total);
    for (i, b) in [&bset1, &bset2].into_iter().enumerate() {
        let base = (i + 1) * blk;
        for e in b.eqs() {
            let mut row = vec![BigInt::zero(); width];
            row[base..base + blk].clone_from_slice(e);
            big.add_equality(row);
        }
        for q in b.ineqs() {
            let mut row = vec![BigInt::zero(); width];
            row[base..base + blk].clone_from_slice(q);
            big.add_inequality(row);
        }
        let mut row = vec![BigInt::zero(); width];
        row[base] = BigInt::from(1);
        big.add_inequality(row);
    }
    for j in 0..blk {
        let mut row = vec![BigInt::zero(); width];
        row[j] = BigInt::from(-1);
        row[blk + j] = BigInt::from(1);
        row[2 * blk + j] = BigInt::from(1);
        big.add_equality(row);
    }
    big.set_rational();
    let projected = proj::project_out_last(big, 2 * blk);
    reduce(projected)
}

/// Fold the pairwise hull across the members of a union.
pub(crate) fn uset_convex_hull_elim(set: Set) -> Result<BasicSet> {
    let mut members = set.into_members();
    debug_assert!(!members.is_empty());
    let mut hull = members.remove(0);
    for m in members {
        hull = convex_hull_pair(hull, m)?;
    }
    reduce(hull)
}
