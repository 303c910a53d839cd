//! Closed-form hulls in ambient dimension zero and one.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::error::Result;
use crate::poly::{BasicSet, Set};
use crate::seq;

/// Hull of a zero-dimensional union: empty or the universe point.
pub(crate) fn convex_hull_0d(set: &Set) -> BasicSet {
    if set.is_empty() {
        BasicSet::empty(0)
    } else {
        BasicSet::universe(0)
    }
}

/// Hull of a one-dimensional union: the loosest lower and upper
/// bounds over all members, each dropped entirely as soon as one
/// member lacks a bound on that side. Bounds are compared exactly by
/// cross multiplication; an equality bounds both sides at once.
pub(crate) fn convex_hull_1d(mut set: Set) -> Result<BasicSet> {
    set.normalize();
    if set.is_empty() {
        return Ok(BasicSet::empty(1));
    }
    let neg = |row: &Vec<BigInt>| {
        let mut r = row.clone();
        seq::negate(&mut r);
        r
    };

    let mut lower: Option<Vec<BigInt>> = None;
    let mut upper: Option<Vec<BigInt>> = None;
    let first = &set.members()[0];
    if first.n_eq() > 0 {
        let e = &first.eqs()[0];
        if e[1].is_positive() {
            lower = Some(e.clone());
            upper = Some(neg(e));
        } else {
            lower = Some(neg(e));
            upper = Some(e.clone());
        }
    } else {
        for row in first.ineqs() {
            if row[1].is_positive() {
                lower = Some(row.clone());
            } else {
                upper = Some(row.clone());
            }
        }
    }

    for member in set.members() {
        let mut has_lower = false;
        let mut has_upper = false;
        for e in member.eqs() {
            has_lower = true;
            has_upper = true;
            if let Some(lo) = &mut lower {
                let a = &lo[0] * &e[1];
                let b = &lo[1] * &e[0];
                if a < b && e[1].is_positive() {
                    *lo = e.clone();
                } else if a > b && e[1].is_negative() {
                    *lo = neg(e);
                }
            }
            if let Some(up) = &mut upper {
                let a = &up[0] * &e[1];
                let b = &up[1] * &e[0];
                if a < b && e[1].is_positive() {
                    *up = neg(e);
                } else if a > b && e[1].is_negative() {
                    *up = e.clone();
                }
            }
        }
        for r in member.ineqs() {
            if r[1].is_positive() {
                has_lower = true;
                if let Some(lo) = &mut lower {
                    let a = &lo[0] * &r[1];
                    let b = &lo[1] * &r[0];
                    if a < b {
                        *lo = r.clone();
                    }
                }
            } else if r[1].is_negative() {
                has_upper = true;
                if let Some(up) = &mut upper {
                    let a = &up[0] * &r[1];
                    let b = &up[1] * &r[0];
                    if a > b {
                        *up = r.clone();
                    }
                }
            }
        }
        if !has_lower {
            lower = None;
        }
        if !has_upper {
            upper = None;
        }
    }

    let mut hull = BasicSet::universe(1);
    hull.set_rational();
    if let Some(mut lo) = lower {
        seq::normalize(&mut lo);
        hull.add_inequality(lo);
    }
    if let Some(mut up) = upper {
        seq::normalize(&mut up);
        hull.add_inequality(up);
    }
    Ok(hull)
}
