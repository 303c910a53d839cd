//! Reduction of a single polyhedron to minimal constraint form.
//!
//! Promotes implicit equalities and removes redundant inequalities,
//! leaving every remaining inequality a facet. An inequality is
//! redundant exactly when the minimum of its linear form over the
//! polyhedron without it is still at least the negated constant.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::Result;
use crate::lp::{self, Lp};
use crate::poly::BasicSet;

/// Promote every inequality that can only be satisfied with equality.
///
/// Also used by the affine hull. Detects emptiness as a side effect.
pub(crate) fn detect_implicit_equalities(b: &mut BasicSet) -> Result<()> {
    loop {
        let mut promoted = false;
        for i in 0..b.n_ineq() {
            let row = &b.ineqs()[i];
            let neg_obj: Vec<BigInt> = row[1..].iter().map(|c| -c.clone()).collect();
            let c0 = BigRational::from_integer(row[0].clone());
            match lp::solve(b, &neg_obj)? {
                Lp::Empty => {
                    b.set_to_empty();
                    return Ok(());
                }
                Lp::Unbounded => {}
                // The minimum of the negated form is the negated
                // maximum: the inequality is an equality in disguise
                // when the form never exceeds zero on the set.
                Lp::Minimum(v) => {
                    if v == c0 {
                        b.promote_inequality(i);
                        b.simplify();
                        promoted = true;
                        break;
                    }
                }
            }
        }
        if !promoted || b.is_empty() {
            return Ok(());
        }
    }
}

/// Whether inequality candidate `row` could possibly be redundant
/// with respect to `ineqs`: a lower (upper) bound on some variable
/// can only be redundant if another lower (upper) bound on that
/// variable exists.
fn may_be_redundant(row: &[BigInt], ineqs: &[Vec<BigInt>]) -> bool {
    for (k, c) in row[1..].iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        let sign = c.is_positive();
        if !ineqs.iter().any(|r| {
            let d = &r[1 + k];
            !d.is_zero() && d.is_positive() == sign
        }) {
            return false;
        }
    }
    true
}

/// Reduce `bset` to minimal constraint form (the convex hull of a
/// single polyhedron).
pub(crate) fn reduce(mut bset: BasicSet) -> Result<BasicSet> {
    bset.simplify();
    if bset.is_empty() || bset.flags().no_redundant {
        return Ok(bset);
    }
    if bset.n_ineq() <= 1 {
        return Ok(bset);
    }
    detect_implicit_equalities(&mut bset)?;
    if bset.is_empty() {
        return Ok(bset);
    }
    let mut i = 0;
    while i < bset.n_ineq() {
        let row = bset.ineqs()[i].clone();
        let mut rest = bset.ineqs().to_vec();
        rest.remove(i);
        if !may_be_redundant(&row, &rest) {
            i += 1;
            continue;
        }
        match lp::solve_rows(bset.dim(), bset.eqs(), &rest, &row[1..])? {
            Lp::Unbounded => i += 1,
            Lp::Empty => {
                bset.set_to_empty();
                return Ok(bset);
            }
            Lp::Minimum(v) => {
                let slack = v + BigRational::from_integer(row[0].clone());
                if slack.is_negative() {
                    i += 1;
                } else {
                    bset.remove_inequality(i);
                }
            }
        }
    }
    bset.mark_reduced();
    Ok(bset)
}
