//! Dense complex matrices.
//!
//! [`Matrix`] is a thin wrapper around a [`nalgebra::DMatrix`] that only
//! exposes what the simulator needs: construction from rows or index
//! functions, the permutation/oracle/controlled builders used by gates, and
//! tolerance-based comparisons. Values are immutable once built.

use std::{ fmt, ops::{ Index, Mul } };
use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use tracing::warn;
use crate::error::MatrixError;

/// A rectangular grid of complex numbers with row-major indexing semantics,
/// i.e. `m[(row, col)]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix(na::DMatrix<C64>);

impl From<na::DMatrix<C64>> for Matrix {
    fn from(data: na::DMatrix<C64>) -> Self { Self(data) }
}

impl From<Matrix> for na::DMatrix<C64> {
    fn from(matrix: Matrix) -> Self { matrix.0 }
}

impl Index<(usize, usize)> for Matrix {
    type Output = C64;

    fn index(&self, idx: (usize, usize)) -> &Self::Output { &self.0[idx] }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output { Matrix(&self.0 * &rhs.0) }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.nrows();
        for (r, row) in self.0.row_iter().enumerate() {
            write!(f, "[{}]", row.iter().join(", "))?;
            if r < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}

impl Matrix {
    /// Build a matrix from a list of rows.
    ///
    /// Fails if there are no rows, the first row is empty, or any row's length
    /// differs from the first.
    pub fn new(rows: Vec<Vec<C64>>) -> Result<Self, MatrixError> {
        let ncols = rows.first().map(|row| row.len()).unwrap_or(0);
        if ncols == 0 { return Err(MatrixError::Empty); }
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != ncols) {
            return Err(MatrixError::RaggedRows { row, len: r.len(), expected: ncols });
        }
        let nrows = rows.len();
        let data: Vec<C64> = rows.into_iter().flatten().collect();
        Ok(Self(na::DMatrix::from_row_slice(nrows, ncols, &data)))
    }

    /// Build an `nrows` × `ncols` matrix by evaluating `f(row, col)` for each
    /// entry.
    pub fn from_fn<F>(nrows: usize, ncols: usize, f: F) -> Self
    where F: FnMut(usize, usize) -> C64
    {
        Self(na::DMatrix::from_fn(nrows, ncols, f))
    }

    /// Build an `n` × `n` matrix from entries stored column after column.
    pub(crate) fn from_column_major(n: usize, data: Vec<C64>) -> Self {
        Self(na::DMatrix::from_vec(n, n, data))
    }

    /// The `n` × `n` identity.
    pub fn identity(n: usize) -> Self { Self(na::DMatrix::identity(n, n)) }

    /// Build the permutation matrix whose `r`-th row has a one at column
    /// `permutation[r]`.
    pub fn permutation(permutation: &[usize]) -> Result<Self, MatrixError> {
        let n = permutation.len();
        if n == 0 { return Err(MatrixError::EmptyPermutation); }
        if let Some(&index) = permutation.iter().find(|&&k| k >= n) {
            return Err(MatrixError::PermutationIndexOutOfRange { index, len: n });
        }
        if let Some(index) = permutation.iter().duplicates().next() {
            return Err(MatrixError::RepeatedPermutationIndex(*index));
        }
        Ok(Self::from_fn(n, n, |r, c| {
            if permutation[r] == c { C64::from(1.0) } else { C64::from(0.0) }
        }))
    }

    /// Build the block-diagonal oracle matrix for `inner` behind
    /// `control_count` control qubits.
    ///
    /// Each of the 2<sup>`control_count`</sup> control patterns owns one
    /// diagonal block the size of `inner`: the block is `inner` itself if the
    /// pattern appears in `truth_table` and the identity otherwise. Truth table
    /// entries are read as base-2 integers whose first character belongs to
    /// the first control; entries that don't parse are ignored.
    ///
    /// *Panics if the resulting size doesn't fit in a `usize`.*
    pub fn oracle<S>(truth_table: &[S], control_count: usize, inner: &Matrix)
        -> Self
    where S: AsRef<str>
    {
        let active = truth_table_values(truth_table);
        Self::block_oracle(&active, control_count, inner)
    }

    /// Build the matrix applying `inner` only when all `control_count`
    /// controls are set.
    ///
    /// *Panics if the resulting size doesn't fit in a `usize`.*
    pub fn controlled(inner: &Matrix, control_count: usize) -> Self {
        let all_ones = (1_usize << control_count) - 1;
        Self::block_oracle(&[all_ones], control_count, inner)
    }

    fn block_oracle(active: &[usize], control_count: usize, inner: &Matrix)
        -> Self
    {
        let size = inner.nrows();
        let n = (1_usize << control_count) * size;
        Self::from_fn(n, n, |r, c| {
            let (block_r, block_c) = (r / size, c / size);
            let (ri, ci) = (r % size, c % size);
            if block_r != block_c {
                C64::from(0.0)
            } else if active.contains(&block_r) {
                inner[(ri, ci)]
            } else if ri == ci {
                C64::from(1.0)
            } else {
                C64::from(0.0)
            }
        })
    }

    pub fn nrows(&self) -> usize { self.0.nrows() }

    pub fn ncols(&self) -> usize { self.0.ncols() }

    pub fn is_square(&self) -> bool { self.0.is_square() }

    /// Borrow the underlying nalgebra matrix.
    pub fn as_dmatrix(&self) -> &na::DMatrix<C64> { &self.0 }

    /// Return the conjugate transpose.
    pub fn adjoint(&self) -> Self { Self(self.0.adjoint()) }

    /// Return `true` if `self` and `other` have the same shape and every pair
    /// of entries differs by at most `tol` in modulus.
    pub fn is_approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.0.shape() == other.0.shape()
            && self.0.iter().zip(other.0.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Return `true` if `self` is square and U U<sup>†</sup> equals the
    /// identity to within `tol` entry-wise.
    pub fn is_unitary(&self, tol: f64) -> bool {
        if !self.is_square() { return false; }
        let n = self.nrows();
        let product = &self.0 * self.0.adjoint();
        product.iter().enumerate()
            .all(|(k, z)| {
                let target = if k % n == k / n { 1.0 } else { 0.0 };
                (z - target).norm() <= tol
            })
    }
}

/// Parse truth-table entries as base-2 integers, skipping (and reporting)
/// anything that doesn't parse.
pub(crate) fn truth_table_values<S>(truth_table: &[S]) -> Vec<usize>
where S: AsRef<str>
{
    truth_table.iter()
        .filter_map(|entry| {
            let entry = entry.as_ref();
            match usize::from_str_radix(entry, 2) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(entry, "ignoring truth table entry that is not a binary number");
                    None
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn c(re: f64, im: f64) -> C64 { C64::new(re, im) }

    fn real(rows: &[&[f64]]) -> Matrix {
        Matrix::new(
            rows.iter()
                .map(|row| row.iter().map(|x| c(*x, 0.0)).collect())
                .collect()
        ).unwrap()
    }

    #[test]
    fn new_checks_shape() {
        assert_eq!(Matrix::new(vec![]), Err(MatrixError::Empty));
        assert_eq!(Matrix::new(vec![vec![]]), Err(MatrixError::Empty));
        assert_eq!(
            Matrix::new(vec![vec![c(1.0, 0.0), c(0.0, 0.0)], vec![c(1.0, 0.0)]]),
            Err(MatrixError::RaggedRows { row: 1, len: 1, expected: 2 }),
        );
        let m = real(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert!(!m.is_square());
        assert_eq!(m[(0, 2)], c(3.0, 0.0));
        assert_eq!(m[(1, 0)], c(4.0, 0.0));
    }

    #[test]
    fn permutation() {
        let m = Matrix::permutation(&[1, 2, 0]).unwrap();
        let expected = real(&[&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0]]);
        assert_eq!(m, expected);
        assert!(m.is_unitary(1e-12));

        assert_eq!(Matrix::permutation(&[]), Err(MatrixError::EmptyPermutation));
        assert_eq!(
            Matrix::permutation(&[0, 0]),
            Err(MatrixError::RepeatedPermutationIndex(0)),
        );
        assert_eq!(
            Matrix::permutation(&[0, 2]),
            Err(MatrixError::PermutationIndexOutOfRange { index: 2, len: 2 }),
        );
    }

    #[test]
    fn controlled_not_is_cnot() {
        let not = real(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let cnot = Matrix::controlled(&not, 1);
        let expected = real(&[
            &[1.0, 0.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0, 0.0],
        ]);
        assert_eq!(cnot, expected);
    }

    #[test]
    fn oracle_blocks() {
        let not = real(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let oracle = Matrix::oracle(&["0", "bogus"], 1, &not);
        let expected = real(&[
            &[0.0, 1.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 1.0, 0.0],
            &[0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(oracle, expected);

        let empty: [&str; 0] = [];
        assert_eq!(Matrix::oracle(&empty, 2, &not), Matrix::identity(8));
        assert_eq!(
            Matrix::oracle(&["11"], 2, &not),
            Matrix::controlled(&not, 2),
        );
    }

    #[test]
    fn unitarity() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let hadamard = real(&[&[h, h], &[h, -h]]);
        assert!(hadamard.is_unitary(1e-12));
        let phase = Matrix::new(vec![
            vec![c(1.0, 0.0), c(0.0, 0.0)],
            vec![c(0.0, 0.0), C64::cis(0.3)],
        ]).unwrap();
        assert!(phase.is_unitary(1e-12));
        assert!(!real(&[&[1.0, 1.0], &[0.0, 1.0]]).is_unitary(1e-3));
        assert!(!real(&[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]]).is_unitary(1e-3));
        assert!(real(&[&[1.0005, 0.0], &[0.0, 1.0]]).is_unitary(1e-2));
    }

    #[test]
    fn approx_eq_and_product() {
        let a = real(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = real(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let ab = &a * &b;
        assert_eq!(ab, real(&[&[2.0, 1.0], &[4.0, 3.0]]));
        let nudged = real(&[&[2.0 + 1e-9, 1.0], &[4.0, 3.0]]);
        assert!(ab.is_approx_eq(&nudged, 1e-6));
        assert!(!ab.is_approx_eq(&nudged, 1e-12));
        assert!(!ab.is_approx_eq(&Matrix::identity(3), 1.0));
    }

    #[test]
    fn display_rows() {
        let m = real(&[&[1.0, 0.0], &[0.0, 1.0]]);
        assert_eq!(format!("{}", m), "[1+0i, 0+0i]\n[0+0i, 1+0i]");
    }
}
