//! Sets: finite unions of basic sets sharing an ambient dimension.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::mat::Mat;
use crate::poly::BasicSet;

/// A finite union of basic sets. The member order is irrelevant to
/// the semantics but stable under iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Set {
    dim: usize,
    members: Vec<BasicSet>,
}

impl Set {
    /// The empty union of dimension `dim`.
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            members: Vec::new(),
        }
    }

    /// Build a union from members of equal dimension.
    pub fn from_members(dim: usize, members: Vec<BasicSet>) -> Self {
        debug_assert!(members.iter().all(|b| b.dim() == dim));
        Self { dim, members }
    }

    /// The union holding a single basic set.
    pub fn from_basic(bset: BasicSet) -> Self {
        Self {
            dim: bset.dim(),
            members: vec![bset],
        }
    }

    /// Ambient dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of members.
    pub fn n(&self) -> usize {
        self.members.len()
    }

    /// The members.
    pub fn members(&self) -> &[BasicSet] {
        &self.members
    }

    /// Mutable access to the members.
    pub fn members_mut(&mut self) -> &mut [BasicSet] {
        &mut self.members
    }

    /// Append a member.
    pub fn push(&mut self, bset: BasicSet) {
        debug_assert_eq!(bset.dim(), self.dim);
        self.members.push(bset);
    }

    /// Take the members out of the union.
    pub fn into_members(self) -> Vec<BasicSet> {
        self.members
    }

    /// True if every member is empty (in particular if there are no
    /// members).
    pub fn is_empty(&self) -> bool {
        self.members.iter().all(|b| b.is_empty())
    }

    /// Interpret every member over the rationals.
    pub fn set_rational(&mut self) {
        for b in &mut self.members {
            b.set_rational();
        }
    }

    /// Simplify every member and drop the ones that are empty.
    pub fn normalize(&mut self) {
        for b in &mut self.members {
            b.simplify();
        }
        self.remove_empty_members();
    }

    /// Drop every member flagged empty.
    pub fn remove_empty_members(&mut self) {
        self.members.retain(|b| !b.is_empty());
    }

    /// Intersect every member with the hyperplane `row = 0`.
    pub fn add_equality(&mut self, row: &[BigInt]) {
        for b in &mut self.members {
            b.add_equality(row.to_vec());
        }
    }

    /// Transform every member through the coordinate change `t`.
    pub fn preimage(&self, t: &Mat) -> Result<Set> {
        let members = self
            .members
            .iter()
            .map(|b| b.preimage(t))
            .collect::<Result<Vec<_>>>()?;
        Ok(Set {
            dim: t.n_col() - 1,
            members,
        })
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            return write!(f, "{{ }}");
        }
        for (i, b) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", b)?;
        }
        Ok(())
    }
}
