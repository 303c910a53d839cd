//! Dense integer matrices and the exact linear algebra behind the
//! coordinate changes of the hull algorithms.
//!
//! Rows hold `BigInt` entries. The one nontrivial operation is
//! [`Mat::right_inverse`]: for a full-row-rank `M` (k rows, m >= k
//! columns) it returns a square invertible integer `U` with
//! `M * U = d * [I_k | 0]` for some positive integer `d`. Since
//! constraint rows are invariant under positive scaling, callers never
//! need `d` itself.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::seq;

/// A dense matrix of exact integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mat {
    rows: Vec<Vec<BigInt>>,
    n_col: usize,
}

impl Mat {
    /// Create a matrix from explicit rows, all of length `n_col`.
    pub fn from_rows(rows: Vec<Vec<BigInt>>, n_col: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == n_col));
        Self { rows, n_col }
    }

    /// The zero matrix.
    pub fn zeros(n_row: usize, n_col: usize) -> Self {
        Self {
            rows: vec![vec![BigInt::zero(); n_col]; n_row],
            n_col,
        }
    }

    /// The identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.rows[i][i] = BigInt::one();
        }
        m
    }

    /// Number of rows.
    pub fn n_row(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_col(&self) -> usize {
        self.n_col
    }

    /// Borrow row `i`.
    pub fn row(&self, i: usize) -> &[BigInt] {
        &self.rows[i]
    }

    /// Mutably borrow row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut Vec<BigInt> {
        &mut self.rows[i]
    }

    /// Clone row `i` out of the matrix.
    pub fn row_cloned(&self, i: usize) -> Vec<BigInt> {
        self.rows[i].clone()
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<BigInt>) {
        debug_assert_eq!(row.len(), self.n_col);
        self.rows.push(row);
    }

    /// Insert `row` at index `i`, shifting later rows down.
    pub fn insert_row(&mut self, i: usize, row: Vec<BigInt>) {
        debug_assert_eq!(row.len(), self.n_col);
        self.rows.insert(i, row);
    }

    /// Remove and return the last row.
    pub fn pop_row(&mut self) -> Option<Vec<BigInt>> {
        self.rows.pop()
    }

    /// Matrix product `self * other`.
    pub fn product(&self, other: &Mat) -> Result<Mat> {
        if self.n_col != other.n_row() {
            return Err(Error::DimMismatch(format!(
                "product: {}x{} by {}x{}",
                self.n_row(),
                self.n_col,
                other.n_row(),
                other.n_col
            )));
        }
        let mut out = Mat::zeros(self.n_row(), other.n_col);
        for (i, row) in self.rows.iter().enumerate() {
            for j in 0..other.n_col {
                let mut sum = BigInt::zero();
                for (k, c) in row.iter().enumerate() {
                    if !c.is_zero() {
                        sum += c * &other.rows[k][j];
                    }
                }
                out.rows[i][j] = sum;
            }
        }
        Ok(out)
    }

    /// Drop `n` rows starting at `first`.
    pub fn drop_rows(mut self, first: usize, n: usize) -> Mat {
        self.rows.drain(first..first + n);
        self
    }

    /// Drop `n` columns starting at `first`.
    pub fn drop_cols(mut self, first: usize, n: usize) -> Mat {
        for row in &mut self.rows {
            row.drain(first..first + n);
        }
        self.n_col -= n;
        self
    }

    fn to_rational(&self) -> Vec<Vec<BigRational>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| BigRational::from_integer(c.clone())).collect())
            .collect()
    }

    /// Right inverse: a square invertible integer `U` with
    /// `self * U = d * [I | 0]` for some positive integer `d`.
    ///
    /// The matrix is completed to an invertible square one by adding a
    /// unit row for every non-pivot column, inverted exactly over the
    /// rationals, and the result cleared of denominators. Fails with
    /// [`Error::SingularMatrix`] when the rows are dependent.
    pub fn right_inverse(&self) -> Result<Mat> {
        let k = self.n_row();
        let m = self.n_col;
        if k > m {
            return Err(Error::SingularMatrix("right_inverse"));
        }
        let (_, pivots) = rref(self.to_rational());
        if pivots.len() < k {
            return Err(Error::SingularMatrix("right_inverse"));
        }
        let mut square = self.to_rational();
        for j in 0..m {
            if !pivots.contains(&j) {
                let mut unit = vec![BigRational::zero(); m];
                unit[j] = BigRational::one();
                square.push(unit);
            }
        }
        let inv = invert(square).ok_or(Error::SingularMatrix("right_inverse"))?;
        let mut denom = BigInt::one();
        for row in &inv {
            for c in row {
                denom = denom.lcm(c.denom());
            }
        }
        let rows = inv
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|c| {
                        let scaled = c * BigRational::from_integer(denom.clone());
                        debug_assert!(scaled.is_integer());
                        scaled.to_integer()
                    })
                    .collect()
            })
            .collect();
        Ok(Mat::from_rows(rows, m))
    }
}

/// Reduced row echelon form; returns the reduced rows and the pivot
/// column of each nonzero row, in order.
pub fn rref(mut rows: Vec<Vec<BigRational>>) -> (Vec<Vec<BigRational>>, Vec<usize>) {
    let n_col = rows.first().map_or(0, |r| r.len());
    let mut pivots = Vec::new();
    let mut rank = 0;
    for col in 0..n_col {
        let Some(pivot_row) = (rank..rows.len()).find(|&r| !rows[r][col].is_zero()) else {
            continue;
        };
        rows.swap(rank, pivot_row);
        let p = rows[rank][col].clone();
        for c in rows[rank].iter_mut() {
            *c = &*c / &p;
        }
        for r in 0..rows.len() {
            if r != rank && !rows[r][col].is_zero() {
                let f = rows[r][col].clone();
                for j in 0..n_col {
                    let sub = &f * &rows[rank][j];
                    rows[r][j] = &rows[r][j] - &sub;
                }
            }
        }
        pivots.push(col);
        rank += 1;
        if rank == rows.len() {
            break;
        }
    }
    rows.truncate(rank);
    (rows, pivots)
}

/// Reduce `row` against an RREF system, returning the residual.
pub fn residual(
    mut row: Vec<BigRational>,
    rref_rows: &[Vec<BigRational>],
    pivots: &[usize],
) -> Vec<BigRational> {
    for (r, &p) in rref_rows.iter().zip(pivots) {
        if !row[p].is_zero() {
            let f = row[p].clone();
            for j in 0..row.len() {
                let sub = &f * &r[j];
                row[j] = &row[j] - &sub;
            }
        }
    }
    row
}

/// Basis of the right kernel `{ x : M x = 0 }` of a rational matrix
/// with `n_col` columns.
pub fn nullspace(rows: Vec<Vec<BigRational>>, n_col: usize) -> Vec<Vec<BigRational>> {
    let (r, pivots) = rref(rows);
    let mut basis = Vec::new();
    for free in 0..n_col {
        if pivots.contains(&free) {
            continue;
        }
        let mut x = vec![BigRational::zero(); n_col];
        x[free] = BigRational::one();
        for (row, &p) in r.iter().zip(&pivots) {
            x[p] = -row[free].clone();
        }
        basis.push(x);
    }
    basis
}

/// Scale a rational row to the integer row with the same direction,
/// normalized by its content.
pub fn clear_denominators(row: &[BigRational]) -> Vec<BigInt> {
    let mut denom = BigInt::one();
    for c in row {
        denom = denom.lcm(c.denom());
    }
    let mut out: Vec<BigInt> = row
        .iter()
        .map(|c| (c * BigRational::from_integer(denom.clone())).to_integer())
        .collect();
    seq::normalize(&mut out);
    out
}

/// Exact Gauss-Jordan inverse of a square rational matrix.
fn invert(mut a: Vec<Vec<BigRational>>) -> Option<Vec<Vec<BigRational>>> {
    let n = a.len();
    let mut inv: Vec<Vec<BigRational>> = (0..n)
        .map(|i| {
            let mut row = vec![BigRational::zero(); n];
            row[i] = BigRational::one();
            row
        })
        .collect();
    for col in 0..n {
        let pivot_row = (col..n).find(|&r| !a[r][col].is_zero())?;
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);
        let p = a[col][col].clone();
        for j in 0..n {
            a[col][j] = &a[col][j] / &p;
            inv[col][j] = &inv[col][j] / &p;
        }
        for r in 0..n {
            if r != col && !a[r][col].is_zero() {
                let f = a[r][col].clone();
                for j in 0..n {
                    let s = &f * &a[col][j];
                    a[r][j] = &a[r][j] - &s;
                    let s = &f * &inv[col][j];
                    inv[r][j] = &inv[r][j] - &s;
                }
            }
        }
    }
    Some(inv)
}

impl std::fmt::Display for Mat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[")?;
        for row in &self.rows {
            write!(f, "  [")?;
            for (j, c) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", c)?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "]")
    }
}
