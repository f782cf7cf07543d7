//! Triangular matrices: masking, solves and inversion

use ndarray::{Array2, ArrayBase, ArrayView2, ArrayViewMut2, Data, DataMut, Ix2, NdFloat};
use num_traits::Zero;

use crate::{
    check_square,
    flags::{Diag, Side, Transpose, Uplo},
    index::*,
    LinalgError, Result,
};

/// Transform square matrix into triangular matrix
pub trait IntoTriangular {
    /// Zero out everything outside the `uplo` triangle in place
    fn triangular_inplace(&mut self, uplo: Uplo) -> Result<&mut Self>;

    /// Zero out everything outside the `uplo` triangle
    fn into_triangular(self, uplo: Uplo) -> Result<Self>
    where
        Self: Sized;
}

impl<A, S> IntoTriangular for ArrayBase<S, Ix2>
where
    A: Zero,
    S: DataMut<Elem = A>,
{
    fn triangular_inplace(&mut self, uplo: Uplo) -> Result<&mut Self> {
        let n = check_square(self)?;
        for i in 0..n {
            let cols = match uplo {
                Uplo::Upper => 0..i,
                Uplo::Lower => i + 1..n,
            };
            for j in cols {
                unsafe { *self.atm((i, j)) = A::zero() };
            }
        }
        Ok(self)
    }

    fn into_triangular(mut self, uplo: Uplo) -> Result<Self> {
        self.triangular_inplace(uplo)?;
        Ok(self)
    }
}

/// Operations on triangular matrices
pub trait IsTriangular {
    /// Check if the matrix is square and zero outside the `uplo` triangle
    fn is_triangular(&self, uplo: Uplo) -> bool;
}

impl<A, S> IsTriangular for ArrayBase<S, Ix2>
where
    A: Zero,
    S: Data<Elem = A>,
{
    fn is_triangular(&self, uplo: Uplo) -> bool {
        if let Ok(n) = check_square(self) {
            for i in 0..n {
                let cols = match uplo {
                    Uplo::Upper => 0..i,
                    Uplo::Lower => i + 1..n,
                };
                for j in cols {
                    if !unsafe { self.at((i, j)) }.is_zero() {
                        return false;
                    }
                }
            }
            true
        } else {
            false
        }
    }
}

/// Index of the first exactly zero diagonal element, 1-based
pub(crate) fn first_zero_diagonal<A: NdFloat, S: Data<Elem = A>>(
    a: &ArrayBase<S, Ix2>,
) -> Option<usize> {
    a.diag().iter().position(|d| d.is_zero()).map(|i| i + 1)
}

/// Forward or back substitution of `A * X = B` for a triangular `A`, without singularity checks
fn substitute<A: NdFloat>(uplo: Uplo, diag: Diag, a: ArrayView2<A>, mut b: ArrayViewMut2<A>) {
    let n = a.nrows();
    let unit = diag == Diag::Unit;
    for k in 0..b.ncols() {
        unsafe {
            match uplo {
                Uplo::Lower => {
                    for i in 0..n {
                        let mut s = *b.at((i, k));
                        for j in 0..i {
                            s -= *a.at((i, j)) * *b.at((j, k));
                        }
                        *b.atm((i, k)) = if unit { s } else { s / *a.at((i, i)) };
                    }
                }
                Uplo::Upper => {
                    for i in (0..n).rev() {
                        let mut s = *b.at((i, k));
                        for j in i + 1..n {
                            s -= *a.at((i, j)) * *b.at((j, k));
                        }
                        *b.atm((i, k)) = if unit { s } else { s / *a.at((i, i)) };
                    }
                }
            }
        }
    }
}

fn check_rhs<S: ndarray::RawData>(n: usize, b: &ArrayBase<S, Ix2>) -> Result<()> {
    if b.nrows() != n {
        return Err(LinalgError::WrongRows {
            expected: n,
            actual: b.nrows(),
        });
    }
    Ok(())
}

/// Solves `op(A) * X = B` in place, where `A` is triangular and only its `uplo` triangle is
/// referenced.
///
/// Fails with [`LinalgError::Singular`] if `A` has a non-unit diagonal containing an exact zero,
/// in which case `B` is left untouched.
pub fn solve_triangular<A, Sa, Sb>(
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    a: &ArrayBase<Sa, Ix2>,
    b: &mut ArrayBase<Sb, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    Sa: Data<Elem = A>,
    Sb: DataMut<Elem = A>,
{
    let n = check_square(a)?;
    check_rhs(n, b)?;
    if diag == Diag::NonUnit {
        if let Some(index) = first_zero_diagonal(a) {
            return Err(LinalgError::Singular { index });
        }
    }

    if trans.is_trans() {
        substitute(uplo.flip(), diag, a.t(), b.view_mut());
    } else {
        substitute(uplo, diag, a.view(), b.view_mut());
    }
    Ok(())
}

/// Solves `op(A) * X = alpha * B` (left side) or `X * op(A) = alpha * B` (right side) in place.
///
/// Like BLAS `trsm`, no singularity check is performed.
pub fn solve_triangular_side<A, Sa, Sb>(
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    alpha: A,
    a: &ArrayBase<Sa, Ix2>,
    b: &mut ArrayBase<Sb, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    Sa: Data<Elem = A>,
    Sb: DataMut<Elem = A>,
{
    let n = check_square(a)?;
    if alpha != A::one() {
        *b *= alpha;
    }

    // X * op(A) = B is op(A).t * X.t = B.t
    let (trans, rhs) = match side {
        Side::Left => {
            check_rhs(n, b)?;
            (trans, b.view_mut())
        }
        Side::Right => {
            let rhs = b.view_mut().reversed_axes();
            check_rhs(n, &rhs)?;
            (trans.flip(), rhs)
        }
    };

    if trans.is_trans() {
        substitute(uplo.flip(), diag, a.t(), rhs);
    } else {
        substitute(uplo, diag, a.view(), rhs);
    }
    Ok(())
}

/// Replaces the `uplo` triangle of `A` with the same triangle of its inverse.
///
/// With a unit diagonal, the diagonal of `A` is neither read nor written.
pub fn invert_triangular<A, S>(uplo: Uplo, diag: Diag, a: &mut ArrayBase<S, Ix2>) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    let n = check_square(a)?;
    let mut inv = Array2::<A>::eye(n);
    solve_triangular(uplo, Transpose::No, diag, &*a, &mut inv)?;

    for j in 0..n {
        for i in crate::storage::triangle_rows(uplo, n, j) {
            if i == j && diag == Diag::Unit {
                continue;
            }
            unsafe { *a.atm((i, j)) = *inv.at((i, j)) };
        }
    }
    Ok(())
}
