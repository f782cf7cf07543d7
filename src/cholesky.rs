//! Cholesky decomposition of symmetric positive definite matrices

use ndarray::{Array2, ArrayBase, ArrayViewMut2, Data, DataMut, Ix2, NdFloat};

use crate::{
    check_square,
    flags::{Diag, Transpose, Uplo},
    index::*,
    triangular::{invert_triangular, solve_triangular, IntoTriangular},
    LinalgError, Result,
};

/// Computes `A = L * L.t` on the lower triangle, which is the only part read or written.
fn factor_lower<A: NdFloat>(mut a: ArrayViewMut2<A>) -> Result<()> {
    let n = a.nrows();
    for j in 0..n {
        let mut d = A::zero();
        unsafe {
            for k in 0..j {
                let mut s = A::zero();
                for i in 0..k {
                    s += *a.at((k, i)) * *a.at((j, i));
                }
                s = (*a.at((j, k)) - s) / *a.at((k, k));
                *a.atm((j, k)) = s;
                d += s * s;
            }
            d = *a.at((j, j)) - d;
        }

        // Also catches NaN
        if !(d > A::zero()) {
            return Err(LinalgError::NotPositiveDefinite { order: j + 1 });
        }

        unsafe { *a.atm((j, j)) = d.sqrt() };
    }
    Ok(())
}

/// Cholesky factorization in place.
///
/// With `Uplo::Lower` the lower triangle is overwritten by `L` such that `A = L * L.t`; with
/// `Uplo::Upper` the upper triangle is overwritten by `U` such that `A = U.t * U`. The other
/// triangle is neither read nor written.
pub fn factorize<A, S>(uplo: Uplo, a: &mut ArrayBase<S, Ix2>) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    check_square(a)?;
    match uplo {
        Uplo::Lower => factor_lower(a.view_mut()),
        // The upper triangle of A is the lower triangle of A.t, and U = L.t
        Uplo::Upper => factor_lower(a.view_mut().reversed_axes()),
    }
}

/// Solves `A * X = B` in place, given the factor computed by [`factorize`]
pub fn solve<A, Sa, Sb>(
    uplo: Uplo,
    factor: &ArrayBase<Sa, Ix2>,
    b: &mut ArrayBase<Sb, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    Sa: Data<Elem = A>,
    Sb: DataMut<Elem = A>,
{
    let (first, second) = match uplo {
        Uplo::Lower => (Transpose::No, Transpose::Trans),
        Uplo::Upper => (Transpose::Trans, Transpose::No),
    };
    solve_triangular(uplo, first, Diag::NonUnit, factor, b)?;
    solve_triangular(uplo, second, Diag::NonUnit, factor, b)
}

/// Replaces the factor computed by [`factorize`] with the `uplo` triangle of `inv(A)`
pub fn invert<A, S>(uplo: Uplo, factor: &mut ArrayBase<S, Ix2>) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    let n = check_square(factor)?;
    let mut tri = factor.to_owned().into_triangular(uplo)?;
    invert_triangular(uplo, Diag::NonUnit, &mut tri)?;

    // inv(A) = inv(L).t * inv(L) = inv(U) * inv(U).t
    let inv: Array2<A> = match uplo {
        Uplo::Lower => tri.t().dot(&tri),
        Uplo::Upper => tri.dot(&tri.t()),
    };
    for j in 0..n {
        for i in crate::storage::triangle_rows(uplo, n, j) {
            unsafe { *factor.atm((i, j)) = *inv.at((i, j)) };
        }
    }
    Ok(())
}

/// Cholesky decomposition of a positive definite matrix
pub trait CholeskyInplace {
    /// Computes decomposition `A = L * L.t` where L is a lower-triangular matrix in place.
    /// The upper triangle portion is not zeroed out.
    fn cholesky_inplace_dirty(&mut self) -> Result<&mut Self>;

    /// Computes decomposition `A = L * L.t` where L is a lower-triangular matrix in place.
    fn cholesky_inplace(&mut self) -> Result<&mut Self>;

    /// Computes decomposition `A = L * L.t` where L is a lower-triangular matrix, passing by
    /// value.
    fn cholesky_into(mut self) -> Result<Self>
    where
        Self: Sized,
    {
        self.cholesky_inplace()?;
        Ok(self)
    }
}

impl<A, S> CholeskyInplace for ArrayBase<S, Ix2>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    fn cholesky_inplace_dirty(&mut self) -> Result<&mut Self> {
        factorize(Uplo::Lower, self)?;
        Ok(self)
    }

    fn cholesky_inplace(&mut self) -> Result<&mut Self> {
        self.cholesky_inplace_dirty()?;
        self.triangular_inplace(Uplo::Lower)?;
        Ok(self)
    }
}

/// Cholesky decomposition of a positive definite matrix, without modifying the original
pub trait Cholesky {
    type Output;

    /// Computes decomposition `A = L * L.t` where L is a lower-triangular matrix without modifying
    /// or consuming the original.
    fn cholesky(&self) -> Result<Self::Output>;
}

impl<A, S> Cholesky for ArrayBase<S, Ix2>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    type Output = Array2<A>;

    fn cholesky(&self) -> Result<Self::Output> {
        self.to_owned().cholesky_into()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn decompose() {
        let arr = array![[25., 15., -5.], [15., 18., 0.], [-5., 0., 11.]];
        let lower = array![[5.0, 0.0, 0.0], [3.0, 3.0, 0.0], [-1., 1., 3.]];

        let chol = arr.cholesky().unwrap();
        assert_abs_diff_eq!(chol, lower, epsilon = 1e-4);
        assert_abs_diff_eq!(chol.dot(&chol.t()), arr, epsilon = 1e-4);

        // Only the upper triangle is touched
        let mut up = arr.clone();
        factorize(Uplo::Upper, &mut up).unwrap();
        assert_abs_diff_eq!(
            up.into_triangular(Uplo::Upper).unwrap(),
            lower.t(),
            epsilon = 1e-4
        );
    }

    #[test]
    fn solve_and_invert() {
        let arr = array![[25., 15., -5.], [15., 18., 0.], [-5., 0., 11.]];
        let x = array![[1., -1.], [2., 0.5], [3., 4.]];
        for uplo in [Uplo::Lower, Uplo::Upper] {
            let mut f = arr.clone();
            factorize(uplo, &mut f).unwrap();
            let mut b = arr.dot(&x);
            solve(uplo, &f, &mut b).unwrap();
            assert_abs_diff_eq!(b, x, epsilon = 1e-10);

            invert(uplo, &mut f).unwrap();
            let inv = arr.clone();
            let mut full = f.clone();
            for j in 0..3 {
                for i in crate::storage::triangle_rows(uplo, 3, j) {
                    full[(j, i)] = f[(i, j)];
                }
            }
            assert_abs_diff_eq!(full.dot(&inv), Array2::eye(3), epsilon = 1e-10);
        }
    }

    #[test]
    fn bad_matrix() {
        let row = array![[1., 2., 3.], [3., 4., 5.]];
        assert!(matches!(
            row.cholesky(),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        ));

        let non_pd = array![[1., 2.], [2., 1.]];
        let res = non_pd.cholesky_into();
        assert!(matches!(
            res,
            Err(LinalgError::NotPositiveDefinite { order: 2 })
        ));

        let mut nan = array![[f64::NAN]];
        assert_eq!(
            factorize(Uplo::Upper, &mut nan),
            Err(LinalgError::NotPositiveDefinite { order: 1 })
        );
    }

    #[test]
    fn corner_cases() {
        let empty = Array2::<f64>::zeros((0, 0));
        assert_eq!(empty.cholesky().unwrap(), empty);

        let one = array![[1.]];
        assert_eq!(one.cholesky().unwrap(), one);
    }
}
