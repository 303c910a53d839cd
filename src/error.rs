//! Error types for the hull computations.
//!
//! Emptiness discovered during a computation is never an error: it is
//! recorded in the polyhedron's flags and short-circuited by callers.
//! Likewise an unbounded LP verdict is a signal handled at each call
//! site. The variants below are the genuinely fatal conditions.

use thiserror::Error;

/// Fatal error during a hull computation.
#[derive(Error, Debug)]
pub enum Error {
    /// The LP solver reached an impossible state.
    #[error("lp solver error: {0}")]
    Lp(String),

    /// A matrix expected to have full row rank did not.
    #[error("singular matrix in {0}")]
    SingularMatrix(&'static str),

    /// Operands disagree on dimension.
    #[error("dimension mismatch: {0}")]
    DimMismatch(String),

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
