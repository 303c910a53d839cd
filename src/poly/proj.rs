//! Fourier-Motzkin elimination.
//!
//! Removes trailing variables from a basic set one at a time. When an
//! equality mentions the variable it is used as a substitution;
//! otherwise every pair of inequalities with opposite signs on the
//! variable is combined. Exact on rational polyhedra.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::poly::BasicSet;
use crate::seq;

/// Project out the last `n` variables of `bset`.
pub fn project_out_last(bset: BasicSet, n: usize) -> BasicSet {
    debug_assert!(n <= bset.dim());
    let new_dim = bset.dim() - n;
    if bset.is_empty() {
        let mut b = BasicSet::empty(new_dim);
        if bset.is_rational() {
            b.set_rational();
        }
        return b;
    }
    let rational = bset.is_rational();
    let mut dim = bset.dim();
    let mut eq: Vec<Vec<BigInt>> = bset.eqs().to_vec();
    let mut ineq: Vec<Vec<BigInt>> = bset.ineqs().to_vec();
    for _ in 0..n {
        let col = dim;
        if let Some(r) = eq.iter().position(|row| !row[col].is_zero()) {
            let pivot = eq.remove(r);
            for row in eq.iter_mut().chain(ineq.iter_mut()) {
                seq::elim(row, &pivot, col);
            }
        } else {
            let (pos, mut rest): (Vec<_>, Vec<_>) =
                ineq.into_iter().partition(|row| row[col].is_positive());
            let (neg, zero): (Vec<_>, Vec<_>) =
                rest.drain(..).partition(|row| row[col].is_negative());
            ineq = zero;
            for p in &pos {
                for q in &neg {
                    let mut row = seq::combine(&-q[col].clone(), p, &p[col].clone(), q);
                    debug_assert!(row[col].is_zero());
                    seq::normalize(&mut row);
                    if !ineq.contains(&row) {
                        ineq.push(row);
                    }
                }
            }
        }
        for row in eq.iter_mut().chain(ineq.iter_mut()) {
            row.truncate(col);
        }
        dim -= 1;
    }
    let mut out = BasicSet::from_constraints(new_dim, eq, ineq);
    if rational {
        out.set_rational();
    }
    out.simplify();
    out
}
