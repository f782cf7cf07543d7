//! LAPACKE-style calling surface over pure-Rust linear algebra routines.
//!
//! Every routine in [`lapacke`] takes the same kind of arguments as its C counterpart: a
//! [`Layout`](flags::Layout), single-character flags such as [`Uplo`](flags::Uplo) or
//! [`Transpose`](flags::Transpose), flat buffers with their leading dimensions, and reports a
//! single [`Info`](info::Info) status code. The precision-specific exports (`dpotrf`, `sgesv`,
//! ...) collapse that status into a `bool`.
//!
//! The numerical work is done by the kernel modules, which operate directly on `ndarray` views
//! and can be used on their own.

pub mod banded;
pub mod cholesky;
pub mod condition;
pub mod eigh;
pub mod equilibrate;
pub mod flags;
mod givens;
pub mod householder;
mod index;
pub mod info;
pub mod lapacke;
pub mod lu;
pub mod norm;
pub mod packed;
pub mod qr;
mod reflection;
pub mod storage;
pub mod svd;
pub mod triangular;
pub mod tridiagonal;

use ndarray::{ArrayBase, Ix2, RawData};
use thiserror::Error;

pub use flags::{Diag, JobEig, JobSvd, Layout, NormType, Side, Transpose, Uplo};
pub use info::Info;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LinalgError {
    /// Non-square matrix
    #[error("Matrix of ({rows}, {cols}) is not square")]
    NotSquare { rows: usize, cols: usize },
    /// Unexpected number of rows
    #[error("Expected {expected} rows, got {actual}")]
    WrongRows { expected: usize, actual: usize },
    /// Unexpected number of columns
    #[error("Expected {expected} columns, got {actual}")]
    WrongColumns { expected: usize, actual: usize },
    /// Argument at position `index` (1-based, layout included) has an illegal value
    #[error("Argument {index} had an illegal value")]
    IllegalArgument { index: usize },
    /// Exactly zero pivot or diagonal element at 1-based `index`
    #[error("Diagonal element {index} is exactly zero, the matrix is singular")]
    Singular { index: usize },
    /// The leading minor of the given order is not positive definite
    #[error("Leading minor of order {order} is not positive definite")]
    NotPositiveDefinite { order: usize },
    /// An iterative algorithm left `count` elements unconverged
    #[error("Algorithm failed to converge, {count} elements did not converge")]
    NotConverged { count: usize },
}

pub type Result<T> = std::result::Result<T, LinalgError>;

/// Return the dimension of a square matrix, or an error if it isn't square
pub(crate) fn check_square<S: RawData>(arr: &ArrayBase<S, Ix2>) -> Result<usize> {
    let (n, m) = (arr.nrows(), arr.ncols());
    if n != m {
        Err(LinalgError::NotSquare { rows: n, cols: m })
    } else {
        Ok(n)
    }
}
