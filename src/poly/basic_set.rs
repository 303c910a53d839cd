//! Basic sets: single convex polyhedra over the rationals.
//!
//! A basic set of ambient dimension `d` is an ordered sequence of
//! equality rows and inequality rows, each of length `1 + d` with the
//! constant in position 0. Rows are invariant under scaling by a
//! positive integer.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::mat::Mat;
use crate::seq;

/// Status flags of a basic set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// The set is known to be empty; its rows are meaningless.
    pub empty: bool,
    /// The set is interpreted over the rationals, not the integers.
    pub rational: bool,
    /// Every inequality is a facet.
    pub no_redundant: bool,
    /// No inequality is implicitly an equality.
    pub no_implicit: bool,
}

/// A convex polyhedron described by linear equalities and inequalities
/// with exact integer coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicSet {
    dim: usize,
    eq: Vec<Vec<BigInt>>,
    ineq: Vec<Vec<BigInt>>,
    flags: Flags,
}

impl BasicSet {
    /// The universe polyhedron of dimension `dim`.
    pub fn universe(dim: usize) -> Self {
        Self {
            dim,
            eq: Vec::new(),
            ineq: Vec::new(),
            flags: Flags::default(),
        }
    }

    /// The empty polyhedron of dimension `dim`.
    pub fn empty(dim: usize) -> Self {
        let mut b = Self::universe(dim);
        b.set_to_empty();
        b
    }

    /// Build from explicit constraint rows.
    pub fn from_constraints(dim: usize, eq: Vec<Vec<BigInt>>, ineq: Vec<Vec<BigInt>>) -> Self {
        debug_assert!(eq.iter().chain(&ineq).all(|r| r.len() == 1 + dim));
        Self {
            dim,
            eq,
            ineq,
            flags: Flags::default(),
        }
    }

    /// Ambient dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of equality rows.
    pub fn n_eq(&self) -> usize {
        self.eq.len()
    }

    /// Number of inequality rows.
    pub fn n_ineq(&self) -> usize {
        self.ineq.len()
    }

    /// The equality rows.
    pub fn eqs(&self) -> &[Vec<BigInt>] {
        &self.eq
    }

    /// The inequality rows.
    pub fn ineqs(&self) -> &[Vec<BigInt>] {
        &self.ineq
    }

    /// The flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether the set is flagged empty.
    pub fn is_empty(&self) -> bool {
        self.flags.empty
    }

    /// Whether the set is interpreted rationally.
    pub fn is_rational(&self) -> bool {
        self.flags.rational
    }

    /// Interpret the set over the rationals.
    pub fn set_rational(&mut self) {
        self.flags.rational = true;
    }

    /// Drop the rational interpretation.
    pub fn clear_rational(&mut self) {
        self.flags.rational = false;
    }

    /// Mark the set reduced: no redundant and no implicit constraints.
    pub(crate) fn mark_reduced(&mut self) {
        self.flags.no_redundant = true;
        self.flags.no_implicit = true;
    }

    /// Replace the description by the canonical empty one.
    pub fn set_to_empty(&mut self) {
        let mut contradiction = vec![BigInt::zero(); 1 + self.dim];
        contradiction[0] = BigInt::one();
        self.eq = vec![contradiction];
        self.ineq.clear();
        self.flags.empty = true;
        self.flags.no_redundant = true;
        self.flags.no_implicit = true;
    }

    fn touch(&mut self) {
        self.flags.no_redundant = false;
        self.flags.no_implicit = false;
    }

    /// Append an equality row.
    pub fn add_equality(&mut self, row: Vec<BigInt>) {
        debug_assert_eq!(row.len(), 1 + self.dim);
        if self.flags.empty {
            return;
        }
        self.eq.push(row);
        self.touch();
    }

    /// Append an inequality row.
    pub fn add_inequality(&mut self, row: Vec<BigInt>) {
        debug_assert_eq!(row.len(), 1 + self.dim);
        if self.flags.empty {
            return;
        }
        self.ineq.push(row);
        self.touch();
    }

    /// Remove inequality `i` and return it.
    pub(crate) fn remove_inequality(&mut self, i: usize) -> Vec<BigInt> {
        self.touch();
        self.ineq.remove(i)
    }

    /// Promote inequality `i` to an equality.
    pub(crate) fn promote_inequality(&mut self, i: usize) {
        let row = self.ineq.remove(i);
        self.eq.push(row);
        self.touch();
    }

    /// Intersect with another basic set of the same dimension.
    pub fn intersect(mut self, other: BasicSet) -> BasicSet {
        debug_assert_eq!(self.dim, other.dim);
        if other.flags.empty {
            self.set_to_empty();
            return self;
        }
        if self.flags.empty {
            return self;
        }
        self.eq.extend(other.eq);
        self.ineq.extend(other.ineq);
        self.flags.rational |= other.flags.rational;
        self.touch();
        self
    }

    /// Gaussian elimination on the equalities: bring them to echelon
    /// form, substitute into the inequalities, and detect trivial
    /// contradictions.
    pub fn gauss(&mut self) {
        if self.flags.empty {
            return;
        }
        let mut done = 0;
        for col in 1..=self.dim {
            if done == self.eq.len() {
                break;
            }
            let Some(r) = (done..self.eq.len()).find(|&r| !self.eq[r][col].is_zero()) else {
                continue;
            };
            self.eq.swap(done, r);
            let pivot = self.eq[done].clone();
            for (i, row) in self.eq.iter_mut().enumerate() {
                if i != done {
                    seq::elim(row, &pivot, col);
                }
            }
            for row in self.ineq.iter_mut() {
                seq::elim(row, &pivot, col);
            }
            let row = &mut self.eq[done];
            seq::normalize(row);
            if row[col].is_negative() {
                seq::negate(row);
            }
            done += 1;
        }
        let trailing: Vec<_> = self.eq.drain(done..).collect();
        for row in trailing {
            if !row[0].is_zero() {
                self.set_to_empty();
                return;
            }
        }
        let mut j = 0;
        while j < self.ineq.len() {
            if seq::is_zero(&self.ineq[j][1..]) {
                if self.ineq[j][0].is_negative() {
                    self.set_to_empty();
                    return;
                }
                self.ineq.remove(j);
            } else {
                j += 1;
            }
        }
    }

    /// Cheap canonicalization: gauss, row normalization, removal of
    /// duplicate-normal inequalities (keeping the tightest), and
    /// resolution of opposite-normal pairs (contradiction or promotion
    /// to an equality). No LP is involved.
    pub fn simplify(&mut self) {
        loop {
            self.gauss();
            if self.flags.empty {
                return;
            }
            for row in &mut self.ineq {
                seq::normalize(row);
            }
            let mut changed = false;
            let mut i = 0;
            'outer: while i < self.ineq.len() {
                let mut gi = seq::content(&self.ineq[i][1..]);
                let mut j = i + 1;
                while j < self.ineq.len() {
                    let gj = seq::content(&self.ineq[j][1..]);
                    let same = (1..=self.dim)
                        .all(|k| &self.ineq[i][k] * &gj == &self.ineq[j][k] * &gi);
                    let opposite = (1..=self.dim)
                        .all(|k| &self.ineq[i][k] * &gj == -(&self.ineq[j][k] * &gi));
                    if same {
                        // keep the tighter (larger lower bound, i.e.
                        // smaller constant in the common scale)
                        if &self.ineq[j][0] * &gi < &self.ineq[i][0] * &gj {
                            self.ineq.swap(i, j);
                            gi = gj;
                        }
                        self.ineq.remove(j);
                        changed = true;
                    } else if opposite {
                        let sum = &self.ineq[i][0] * &gj + &self.ineq[j][0] * &gi;
                        if sum.is_negative() {
                            self.set_to_empty();
                            return;
                        }
                        if sum.is_zero() {
                            self.ineq.remove(j);
                            self.promote_inequality(i);
                            changed = true;
                            continue 'outer;
                        }
                        j += 1;
                    } else {
                        j += 1;
                    }
                }
                i += 1;
            }
            if !changed {
                return;
            }
        }
    }

    /// Transform constraints through the homogeneous coordinate change
    /// `x_h = T * z_h`: each row `c` becomes `c * T`. The result lives
    /// in dimension `T.n_col() - 1`.
    pub fn preimage(&self, t: &Mat) -> Result<BasicSet> {
        if t.n_row() != 1 + self.dim {
            return Err(Error::DimMismatch(format!(
                "preimage: {} rows for dimension {}",
                t.n_row(),
                self.dim
            )));
        }
        let new_dim = t.n_col() - 1;
        if self.flags.empty {
            let mut b = BasicSet::empty(new_dim);
            b.flags.rational = self.flags.rational;
            return Ok(b);
        }
        let transform = |row: &Vec<BigInt>| -> Vec<BigInt> {
            let mut out = vec![BigInt::zero(); t.n_col()];
            for (k, c) in row.iter().enumerate() {
                if !c.is_zero() {
                    for (j, o) in out.iter_mut().enumerate() {
                        *o += c * &t.row(k)[j];
                    }
                }
            }
            seq::normalize(&mut out);
            out
        };
        let mut b = BasicSet::from_constraints(
            new_dim,
            self.eq.iter().map(transform).collect(),
            self.ineq.iter().map(transform).collect(),
        );
        b.flags.rational = self.flags.rational;
        b.simplify();
        Ok(b)
    }

    /// The recession cone: the same constraints with constant terms
    /// dropped.
    pub fn recession_cone(&self) -> BasicSet {
        let strip = |row: &Vec<BigInt>| {
            let mut r = row.clone();
            r[0] = BigInt::zero();
            r
        };
        let mut cone = BasicSet::from_constraints(
            self.dim,
            self.eq.iter().map(strip).collect(),
            self.ineq.iter().map(strip).collect(),
        );
        cone.flags.rational = true;
        cone.simplify();
        cone
    }

    /// Evaluate membership of an exact rational point.
    pub fn contains(&self, point: &[BigRational]) -> bool {
        debug_assert_eq!(point.len(), self.dim);
        if self.flags.empty {
            return false;
        }
        let eval = |row: &Vec<BigInt>| -> BigRational {
            let mut v = BigRational::from_integer(row[0].clone());
            for (c, p) in row[1..].iter().zip(point) {
                if !c.is_zero() {
                    v += BigRational::from_integer(c.clone()) * p;
                }
            }
            v
        };
        self.eq.iter().all(|r| eval(r).is_zero())
            && self.ineq.iter().all(|r| !eval(r).is_negative())
    }
}

fn fmt_row(f: &mut fmt::Formatter<'_>, row: &[BigInt], rel: &str) -> fmt::Result {
    let mut first = true;
    for (i, c) in row[1..].iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        if first {
            if c.is_negative() {
                write!(f, "-")?;
            }
        } else if c.is_negative() {
            write!(f, " - ")?;
        } else {
            write!(f, " + ")?;
        }
        let a = c.abs();
        if !a.is_one() {
            write!(f, "{} ", a)?;
        }
        write!(f, "x{}", i)?;
        first = false;
    }
    if first {
        write!(f, "{}", row[0])?;
    } else if row[0].is_positive() {
        write!(f, " + {}", row[0])?;
    } else if row[0].is_negative() {
        write!(f, " - {}", row[0].abs())?;
    }
    write!(f, " {} 0", rel)
}

impl fmt::Display for BasicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ [")?;
        for i in 0..self.dim {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "x{}", i)?;
        }
        write!(f, "]")?;
        if self.flags.empty {
            return write!(f, " : false }}");
        }
        if self.n_eq() + self.n_ineq() > 0 {
            write!(f, " : ")?;
            for (i, row) in self.eq.iter().enumerate() {
                if i > 0 {
                    write!(f, " and ")?;
                }
                fmt_row(f, row, "=")?;
            }
            for (i, row) in self.ineq.iter().enumerate() {
                if i > 0 || !self.eq.is_empty() {
                    write!(f, " and ")?;
                }
                fmt_row(f, row, ">=")?;
            }
        }
        write!(f, " }}")
    }
}
