//! Primitive operations on single constraint rows.
//!
//! A row is a slice of `BigInt` coefficients `[c0, c1, .., cd]`
//! standing for `c0 + c1*x1 + .. + cd*xd`. Rows are semantically
//! invariant under scaling by a positive integer.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Index of the first nonzero entry, if any.
pub fn first_non_zero(row: &[BigInt]) -> Option<usize> {
    row.iter().position(|c| !c.is_zero())
}

/// True if every entry is zero.
pub fn is_zero(row: &[BigInt]) -> bool {
    row.iter().all(|c| c.is_zero())
}

/// Gcd of all entries (non-negative; zero for an all-zero row).
pub fn content(row: &[BigInt]) -> BigInt {
    row.iter().fold(BigInt::zero(), |acc, c| acc.gcd(c))
}

/// Divide the row by its content, if nonzero.
pub fn normalize(row: &mut [BigInt]) {
    let g = content(row);
    if !g.is_zero() && !g.is_one() {
        for c in row.iter_mut() {
            *c = &*c / &g;
        }
    }
}

/// Negate every entry in place.
pub fn negate(row: &mut [BigInt]) {
    for c in row.iter_mut() {
        *c = -std::mem::take(c);
    }
}

/// `a*r1 + b*r2`, element-wise.
pub fn combine(a: &BigInt, r1: &[BigInt], b: &BigInt, r2: &[BigInt]) -> Vec<BigInt> {
    debug_assert_eq!(r1.len(), r2.len());
    r1.iter()
        .zip(r2)
        .map(|(x, y)| a * x + b * y)
        .collect()
}

/// Cancel entry `pos` of `dst` against `src` (which must be nonzero
/// there), leaving `dst` scaled by a positive factor otherwise.
pub fn elim(dst: &mut Vec<BigInt>, src: &[BigInt], pos: usize) {
    debug_assert!(!src[pos].is_zero());
    if dst[pos].is_zero() {
        return;
    }
    let g = dst[pos].gcd(&src[pos]);
    let a = &src[pos] / &g;
    let b = &dst[pos] / &g;
    let sign = if a.is_negative() { -BigInt::from(1) } else { BigInt::from(1) };
    let a = &a * &sign;
    let b = &b * &sign;
    *dst = combine(&a, dst, &-b, src);
    normalize(dst);
}
