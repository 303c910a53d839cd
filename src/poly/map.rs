//! Relations: unions of basic relations between two tuples.
//!
//! A basic relation of arity `n_in -> n_out` is stored as a basic set
//! over the `n_in + n_out` flattened variables. The hull operations
//! flatten to that underlying set, run the set algorithms, and wrap
//! the result back up.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::poly::{BasicSet, Set};

/// A single convex relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMap {
    n_in: usize,
    n_out: usize,
    bset: BasicSet,
}

impl BasicMap {
    /// Wrap a basic set over `n_in + n_out` variables as a relation.
    pub fn from_basic_set(n_in: usize, n_out: usize, bset: BasicSet) -> Self {
        debug_assert_eq!(bset.dim(), n_in + n_out);
        Self { n_in, n_out, bset }
    }

    /// Input arity.
    pub fn n_in(&self) -> usize {
        self.n_in
    }

    /// Output arity.
    pub fn n_out(&self) -> usize {
        self.n_out
    }

    /// The underlying basic set over the flattened variables.
    pub fn underlying(&self) -> &BasicSet {
        &self.bset
    }

    /// Take the underlying basic set.
    pub fn into_underlying(self) -> BasicSet {
        self.bset
    }

    /// Reduce the relation to minimal constraint form.
    pub fn convex_hull(self) -> Result<BasicMap> {
        let (n_in, n_out) = (self.n_in, self.n_out);
        let bset = self.bset.convex_hull()?;
        Ok(BasicMap::from_basic_set(n_in, n_out, bset))
    }
}

/// A union of basic relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    n_in: usize,
    n_out: usize,
    members: Vec<BasicMap>,
}

impl Map {
    /// The empty relation.
    pub fn empty(n_in: usize, n_out: usize) -> Self {
        Self {
            n_in,
            n_out,
            members: Vec::new(),
        }
    }

    /// Build a union of basic relations of equal arity.
    pub fn from_members(n_in: usize, n_out: usize, members: Vec<BasicMap>) -> Self {
        debug_assert!(members
            .iter()
            .all(|m| m.n_in == n_in && m.n_out == n_out));
        Self {
            n_in,
            n_out,
            members,
        }
    }

    /// Number of members.
    pub fn n(&self) -> usize {
        self.members.len()
    }

    fn underlying_set(self) -> Set {
        Set::from_members(
            self.n_in + self.n_out,
            self.members.into_iter().map(BasicMap::into_underlying).collect(),
        )
    }

    /// The convex hull of the union, as a single basic relation.
    ///
    /// The result is presented as an integer relation again: the
    /// rational interpretation used internally is dropped on the way
    /// out.
    pub fn convex_hull(self) -> Result<BasicMap> {
        let (n_in, n_out) = (self.n_in, self.n_out);
        let mut bset = self.underlying_set().convex_hull()?;
        bset.clear_rational();
        Ok(BasicMap::from_basic_set(n_in, n_out, bset))
    }

    /// A cheap superset of the convex hull whose facet normals all
    /// occur in the members.
    pub fn simple_hull(self) -> Result<BasicMap> {
        let (n_in, n_out) = (self.n_in, self.n_out);
        if self.members.len() == 1 {
            let only = self.members.into_iter().next().expect("one member");
            return Ok(only);
        }
        let bset = self.underlying_set().simple_hull()?;
        Ok(BasicMap::from_basic_set(n_in, n_out, bset))
    }
}
