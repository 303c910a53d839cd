//! Bounding directions of a union.
//!
//! `is_bound` checks whether the union is bounded in a given
//! direction and, if so, tightens the row's constant so it becomes a
//! bounding hyperplane touching the union. `independent_bounds`
//! assembles a maximal linearly independent set of such rows from the
//! members' own constraint normals.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::Result;
use crate::lp::{self, Lp};
use crate::mat::Mat;
use crate::poly::{BasicSet, Set};
use crate::seq;

/// Check whether `row[1..]` is a bounded direction of the union; on
/// success the row is rescaled and its constant set so that the row
/// is a bounding hyperplane of the union (touching it).
///
/// Members discovered to be empty along the way are marked as such.
pub(crate) fn is_bound(set: &mut Set, row: &mut Vec<BigInt>) -> Result<bool> {
    let mut best: Option<BigRational> = None;
    for i in 0..set.n() {
        if set.members()[i].is_empty() {
            continue;
        }
        match lp::solve(&set.members()[i], &row[1..])? {
            Lp::Unbounded => return Ok(false),
            Lp::Empty => set.members_mut()[i].set_to_empty(),
            Lp::Minimum(v) => {
                best = Some(match best {
                    None => v,
                    Some(b) => b.min(v),
                });
            }
        }
    }
    let Some(min) = best else {
        return Ok(false);
    };
    let (num, den) = (min.numer().clone(), min.denom().clone());
    for c in row[1..].iter_mut() {
        *c = &*c * &den;
    }
    row[0] = -num;
    seq::normalize(row);
    Ok(true)
}

/// Reduce `cand[1..]` against the chosen directions in pivot order;
/// returns the insertion index keeping the rows sorted by pivot, or
/// `None` when the candidate is linearly dependent.
fn reduce_against(cand: &mut [BigInt], dirs: &Mat) -> Option<usize> {
    let width = dirs.n_col();
    let mut pos = seq::first_non_zero(&cand[1..])?;
    let mut i = 0;
    while i < dirs.n_row() {
        let pos_i = seq::first_non_zero(&dirs.row(i)[1..]).expect("chosen rows are nonzero");
        if pos_i < pos {
            i += 1;
            continue;
        }
        if pos_i > pos {
            break;
        }
        let src: Vec<BigInt> = dirs.row(i)[1..].to_vec();
        let mut sub: Vec<BigInt> = cand[1..].to_vec();
        seq::elim(&mut sub, &src, pos);
        cand[1..].clone_from_slice(&sub[..width - 1]);
        pos = seq::first_non_zero(&cand[1..])?;
        i += 1;
    }
    Some(i)
}

/// Collect a maximal set of linearly independent bounding rows from
/// the constraints of the members, in member and constraint order.
pub(crate) fn independent_bounds(set: &mut Set) -> Result<Mat> {
    let dim = set.dim();
    let width = 1 + dim;
    let mut dirs = Mat::from_rows(Vec::new(), width);
    for mi in 0..set.n() {
        if dirs.n_row() == dim {
            break;
        }
        let rows: Vec<Vec<BigInt>> = {
            let m = &set.members()[mi];
            m.eqs().iter().chain(m.ineqs()).cloned().collect()
        };
        for c in rows {
            if dirs.n_row() == dim {
                break;
            }
            let mut cand = vec![BigInt::zero(); width];
            cand[1..].clone_from_slice(&c[1..]);
            let Some(at) = reduce_against(&mut cand, &dirs) else {
                continue;
            };
            if is_bound(set, &mut cand)? {
                dirs.insert_row(at, cand);
            }
        }
    }
    Ok(dirs)
}

/// A basic set is bounded exactly when its recession cone is trivial:
/// no coordinate direction may be unbounded in either sign.
pub(crate) fn basic_set_is_bounded(bset: &BasicSet) -> Result<bool> {
    let cone = bset.recession_cone();
    let dim = cone.dim();
    for j in 0..dim {
        let mut obj = vec![BigInt::zero(); dim];
        obj[j] = BigInt::from(1);
        if matches!(lp::solve(&cone, &obj)?, Lp::Unbounded) {
            return Ok(false);
        }
        obj[j] = BigInt::from(-1);
        if matches!(lp::solve(&cone, &obj)?, Lp::Unbounded) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A union is bounded when every non-empty member is.
pub(crate) fn set_is_bounded(set: &Set) -> Result<bool> {
    for member in set.members() {
        if member.is_empty() {
            continue;
        }
        if !basic_set_is_bounded(member)? {
            return Ok(false);
        }
    }
    Ok(true)
}
