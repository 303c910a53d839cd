//! Exact-rational linear programming oracle.
//!
//! Minimizes an integer linear form over a single polyhedron and
//! reports the exact optimum, unboundedness, or infeasibility. The
//! solver is a dense two-phase simplex over `BigRational`: free
//! variables are split `x = u - v`, every inequality receives a slack
//! variable, and phase 1 drives an artificial basis to zero.
//!
//! The pivot rule is Bland's smallest-index rule in both phases. It is
//! part of the crate's observable contract: hull results are
//! deterministic functions of the input order and this rule, so it
//! must not change.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::{Error, Result};
use crate::poly::BasicSet;

/// Outcome of an LP solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lp {
    /// The exact minimum of the objective over the polyhedron.
    Minimum(BigRational),
    /// The objective is unbounded below on the polyhedron.
    Unbounded,
    /// The polyhedron is empty.
    Empty,
}

/// Minimize `sum(obj[i] * x_i)` over `bset`.
///
/// The objective has no constant term; constraint rows keep theirs.
pub fn solve(bset: &BasicSet, obj: &[BigInt]) -> Result<Lp> {
    if bset.is_empty() {
        return Ok(Lp::Empty);
    }
    solve_rows(bset.dim(), bset.eqs(), bset.ineqs(), obj)
}

/// Minimize over explicit equality and inequality rows of length
/// `1 + dim`.
pub(crate) fn solve_rows(
    dim: usize,
    eqs: &[Vec<BigInt>],
    ineqs: &[Vec<BigInt>],
    obj: &[BigInt],
) -> Result<Lp> {
    debug_assert_eq!(obj.len(), dim);

    // Rows without variables are decided immediately.
    let mut kept_eqs = Vec::new();
    let mut kept_ineqs = Vec::new();
    for row in eqs {
        if crate::seq::is_zero(&row[1..]) {
            if !row[0].is_zero() {
                return Ok(Lp::Empty);
            }
        } else {
            kept_eqs.push(row);
        }
    }
    for row in ineqs {
        if crate::seq::is_zero(&row[1..]) {
            if row[0].is_negative() {
                return Ok(Lp::Empty);
            }
        } else {
            kept_ineqs.push(row);
        }
    }
    if dim == 0 || (kept_eqs.is_empty() && kept_ineqs.is_empty()) {
        if obj.iter().all(|c| c.is_zero()) {
            return Ok(Lp::Minimum(BigRational::zero()));
        }
        if kept_eqs.is_empty() && kept_ineqs.is_empty() {
            return Ok(Lp::Unbounded);
        }
    }

    let m = kept_eqs.len() + kept_ineqs.len();
    let n_struct = 2 * dim + kept_ineqs.len();
    let n_total = n_struct + m;

    // Tableau rows: [u | v | slacks | artificials | rhs], rhs >= 0.
    let mut t: Vec<Vec<BigRational>> = Vec::with_capacity(m);
    let mut basis: Vec<usize> = Vec::with_capacity(m);
    let all_rows = kept_eqs.iter().map(|r| (*r, None)).chain(
        kept_ineqs
            .iter()
            .enumerate()
            .map(|(i, r)| (*r, Some(2 * dim + i))),
    );
    for (r, (row, slack)) in all_rows.enumerate() {
        let mut tr = vec![BigRational::zero(); n_total + 1];
        for (i, c) in row[1..].iter().enumerate() {
            if !c.is_zero() {
                tr[i] = BigRational::from_integer(c.clone());
                tr[dim + i] = BigRational::from_integer(-c.clone());
            }
        }
        if let Some(s) = slack {
            tr[s] = -BigRational::from_integer(BigInt::from(1));
        }
        tr[n_total] = BigRational::from_integer(-row[0].clone());
        if tr[n_total].is_negative() {
            for c in tr.iter_mut() {
                *c = -std::mem::take(c);
            }
        }
        tr[n_struct + r] = BigRational::from_integer(BigInt::from(1));
        basis.push(n_struct + r);
        t.push(tr);
    }

    // Phase 1: minimize the artificial sum.
    let mut cost1 = vec![BigRational::zero(); n_total];
    for c in cost1.iter_mut().skip(n_struct) {
        *c = BigRational::from_integer(BigInt::from(1));
    }
    match run_simplex(&mut t, &mut basis, &cost1, n_total)? {
        Outcome::Unbounded => {
            return Err(Error::Lp("artificial objective unbounded".into()))
        }
        Outcome::Optimal(v) if !v.is_zero() => return Ok(Lp::Empty),
        Outcome::Optimal(_) => {}
    }

    // Drive leftover artificials out of the basis; rows that cannot
    // pivot are redundant and dropped.
    let mut r = 0;
    while r < t.len() {
        if basis[r] >= n_struct {
            if let Some(c) = (0..n_struct).find(|&c| !t[r][c].is_zero()) {
                pivot(&mut t, &mut basis, r, c);
            } else {
                t.remove(r);
                basis.remove(r);
                continue;
            }
        }
        r += 1;
    }
    for row in t.iter_mut() {
        let rhs = row[n_total].clone();
        row.truncate(n_struct);
        row.push(rhs);
    }

    // Phase 2: the real objective over (u, v, slacks).
    let mut cost2 = vec![BigRational::zero(); n_struct];
    for (i, c) in obj.iter().enumerate() {
        if !c.is_zero() {
            cost2[i] = BigRational::from_integer(c.clone());
            cost2[dim + i] = BigRational::from_integer(-c.clone());
        }
    }
    match run_simplex(&mut t, &mut basis, &cost2, n_struct)? {
        Outcome::Unbounded => Ok(Lp::Unbounded),
        Outcome::Optimal(v) => Ok(Lp::Minimum(v)),
    }
}

enum Outcome {
    Optimal(BigRational),
    Unbounded,
}

/// Bland-rule simplex on an explicit tableau. Columns `>= n_cols` are
/// never entered (phase 1 passes the full width, phase 2 the
/// structural width).
fn run_simplex(
    t: &mut Vec<Vec<BigRational>>,
    basis: &mut [usize],
    cost: &[BigRational],
    n_cols: usize,
) -> Result<Outcome> {
    loop {
        // Reduced costs: z_j = c_j - c_B . B^-1 A_j. Recomputed each
        // round; tableau sizes here are small enough that the clarity
        // is worth more than the incremental update.
        let entering = (0..n_cols).find(|&j| {
            if basis.contains(&j) {
                return false;
            }
            let mut z = cost[j].clone();
            for (r, row) in t.iter().enumerate() {
                if !row[j].is_zero() && !cost[basis[r]].is_zero() {
                    let s = &cost[basis[r]] * &row[j];
                    z = &z - &s;
                }
            }
            z.is_negative()
        });
        let Some(col) = entering else {
            let rhs = t.first().map_or(0, |row| row.len() - 1);
            let mut value = BigRational::zero();
            for (r, row) in t.iter().enumerate() {
                if !cost[basis[r]].is_zero() {
                    let s = &cost[basis[r]] * &row[rhs];
                    value = &value + &s;
                }
            }
            return Ok(Outcome::Optimal(value));
        };
        let rhs = t[0].len() - 1;
        let mut leave: Option<(usize, BigRational)> = None;
        for (r, row) in t.iter().enumerate() {
            if row[col].is_positive() {
                let ratio = &row[rhs] / &row[col];
                let better = match &leave {
                    None => true,
                    Some((lr, lratio)) => {
                        ratio < *lratio || (ratio == *lratio && basis[r] < basis[*lr])
                    }
                };
                if better {
                    leave = Some((r, ratio));
                }
            }
        }
        let Some((row, _)) = leave else {
            return Ok(Outcome::Unbounded);
        };
        pivot(t, basis, row, col);
    }
}

/// Make column `col` basic in row `row`.
fn pivot(t: &mut [Vec<BigRational>], basis: &mut [usize], row: usize, col: usize) {
    let p = t[row][col].clone();
    for c in t[row].iter_mut() {
        *c = &*c / &p;
    }
    for r in 0..t.len() {
        if r != row && !t[r][col].is_zero() {
            let f = t[r][col].clone();
            for j in 0..t[r].len() {
                let s = &f * &t[row][j];
                t[r][j] = &t[r][j] - &s;
            }
        }
    }
    basis[row] = col;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::BasicSet;

    fn row(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&x| BigInt::from(x)).collect()
    }

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn square() -> BasicSet {
        // 0 <= x <= 2, 0 <= y <= 3
        let mut b = BasicSet::universe(2);
        b.add_inequality(row(&[0, 1, 0]));
        b.add_inequality(row(&[2, -1, 0]));
        b.add_inequality(row(&[0, 0, 1]));
        b.add_inequality(row(&[3, 0, -1]));
        b
    }

    #[test]
    fn test_minimum_on_square() {
        // min x - y = 0 - 3 = -3
        let r = solve(&square(), &row(&[1, -1])).unwrap();
        assert_eq!(r, Lp::Minimum(rat(-3, 1)));
    }

    #[test]
    fn test_minimum_with_equality() {
        // x = y intersected with the square: min -x = -2.
        let mut b = square();
        b.add_equality(row(&[0, 1, -1]));
        let r = solve(&b, &row(&[-1, 0])).unwrap();
        assert_eq!(r, Lp::Minimum(rat(-2, 1)));
    }

    #[test]
    fn test_fractional_optimum() {
        // 2x >= 1, min x = 1/2.
        let mut b = BasicSet::universe(1);
        b.add_inequality(row(&[-1, 2]));
        let r = solve(&b, &row(&[1])).unwrap();
        assert_eq!(r, Lp::Minimum(rat(1, 2)));
    }

    #[test]
    fn test_unbounded() {
        let mut b = BasicSet::universe(1);
        b.add_inequality(row(&[0, 1])); // x >= 0
        assert_eq!(solve(&b, &row(&[1])).unwrap(), Lp::Minimum(rat(0, 1)));
        assert_eq!(solve(&b, &row(&[-1])).unwrap(), Lp::Unbounded);
    }

    #[test]
    fn test_empty() {
        let mut b = BasicSet::universe(1);
        b.add_inequality(row(&[-1, 1])); // x >= 1
        b.add_inequality(row(&[0, -1])); // x <= 0
        assert_eq!(solve(&b, &row(&[1])).unwrap(), Lp::Empty);
    }

    #[test]
    fn test_feasibility_probe() {
        let mut b = BasicSet::universe(2);
        b.add_inequality(row(&[0, 1, 1]));
        assert_eq!(solve(&b, &row(&[0, 0])).unwrap(), Lp::Minimum(rat(0, 1)));
    }

    #[test]
    fn test_universe_unbounded() {
        let b = BasicSet::universe(2);
        assert_eq!(solve(&b, &row(&[1, 0])).unwrap(), Lp::Unbounded);
    }
}
