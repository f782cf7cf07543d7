//! Reciprocal condition number estimates.
//!
//! `||inv(A)||_1` is estimated with Hager's method as refined by Higham, which only needs the
//! ability to solve with `A` and `A.t`. The estimate is a lower bound that is almost always
//! within a small factor of the true norm.

use ndarray::{Array1, ArrayBase, ArrayViewMut2, Axis, Data, DataMut, Ix1, Ix2, NdFloat};

use crate::{
    check_square, cholesky,
    flags::{Diag, NormType, Transpose, Uplo},
    triangular::solve_triangular,
    LinalgError, Result,
};

/// Maximum number of power iterations of the estimator
pub const MAX_ESTIMATOR_ITER: usize = 5;

fn sum_abs<A: NdFloat>(x: &Array1<A>) -> A {
    x.iter().fold(A::zero(), |acc, v| acc + v.abs())
}

/// Estimates `||inv(A)||_1` for an `n x n` matrix `A`.
///
/// `solve` must overwrite its argument `x` with `inv(A) * x`, and `solve_t` with
/// `inv(A).t * x`.
pub fn estimate_inverse_norm<A, F, G>(n: usize, mut solve: F, mut solve_t: G) -> Result<A>
where
    A: NdFloat,
    F: FnMut(&mut Array1<A>) -> Result<()>,
    G: FnMut(&mut Array1<A>) -> Result<()>,
{
    if n == 0 {
        return Ok(A::zero());
    }
    let n_a = A::from(n).unwrap();

    let mut x = Array1::from_elem(n, A::one() / n_a);
    let mut est = A::zero();
    for iter in 0..MAX_ESTIMATOR_ITER {
        let mut y = x.clone();
        solve(&mut y)?;
        let new_est = sum_abs(&y);
        if iter > 0 && new_est <= est {
            break;
        }
        est = new_est;

        let mut z = y.mapv(|v| if v >= A::zero() { A::one() } else { -A::one() });
        solve_t(&mut z)?;
        let (j, zj) = z
            .iter()
            .map(|v| v.abs())
            .enumerate()
            .fold((0, A::neg_infinity()), |best, (i, v)| {
                if v > best.1 {
                    (i, v)
                } else {
                    best
                }
            });
        // Stop once the gradient no longer points to a better vertex
        if iter > 0 && zj <= z.dot(&x) {
            break;
        }
        x.fill(A::zero());
        x[j] = A::one();
    }

    // Alternating test vector, which catches matrices where the power iteration stalls
    let mut alt = Array1::from_shape_fn(n, |i| {
        let mag = A::one() + A::from(i).unwrap() / A::from(n.max(2) - 1).unwrap();
        if i % 2 == 0 {
            mag
        } else {
            -mag
        }
    });
    solve(&mut alt)?;
    let alt_est = A::from(2.0).unwrap() * sum_abs(&alt) / (A::from(3.0).unwrap() * n_a);
    Ok(est.max(alt_est))
}

fn reciprocal<A: NdFloat>(n: usize, anorm: A, ainvnm: Result<A>) -> Result<A> {
    if n == 0 {
        return Ok(A::one());
    }
    if anorm.is_zero() {
        return Ok(A::zero());
    }
    match ainvnm {
        Ok(ainvnm) if !ainvnm.is_zero() => Ok((A::one() / ainvnm) / anorm),
        Ok(_) | Err(LinalgError::Singular { .. }) => Ok(A::zero()),
        Err(err) => Err(err),
    }
}

fn as_column<A, S: DataMut<Elem = A>>(x: &mut ArrayBase<S, Ix1>) -> ArrayViewMut2<'_, A> {
    x.view_mut().insert_axis(Axis(1))
}

/// Reciprocal condition number of a general matrix in the one or infinity norm, given the
/// factors computed by [`crate::lu::factorize`] and the norm `anorm` of the original matrix.
///
/// Row interchanges don't change either norm, so the pivots aren't needed. `NormType::Max` and
/// `NormType::Frobenius` are treated as the one norm.
pub fn general<A, S>(norm: NormType, lu_factor: &ArrayBase<S, Ix2>, anorm: A) -> Result<A>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let n = check_square(lu_factor)?;
    let solve = |trans: Transpose, x: &mut Array1<A>| {
        let mut x = as_column(x);
        if trans.is_trans() {
            solve_triangular(Uplo::Upper, trans, Diag::NonUnit, lu_factor, &mut x)?;
            solve_triangular(Uplo::Lower, trans, Diag::Unit, lu_factor, &mut x)
        } else {
            solve_triangular(Uplo::Lower, trans, Diag::Unit, lu_factor, &mut x)?;
            solve_triangular(Uplo::Upper, trans, Diag::NonUnit, lu_factor, &mut x)
        }
    };
    // ||inv(A)||_inf = ||inv(A).t||_1
    let (first, second) = match norm {
        NormType::Infinity => (Transpose::Trans, Transpose::No),
        _ => (Transpose::No, Transpose::Trans),
    };
    let ainvnm = estimate_inverse_norm(n, |x| solve(first, x), |x| solve(second, x));
    reciprocal(n, anorm, ainvnm)
}

/// Reciprocal condition number in the one norm of a positive definite matrix, given the factor
/// computed by [`cholesky::factorize`] and the one norm `anorm` of the original matrix
pub fn positive_definite<A, S>(uplo: Uplo, factor: &ArrayBase<S, Ix2>, anorm: A) -> Result<A>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let n = check_square(factor)?;
    let ainvnm = estimate_inverse_norm(
        n,
        |x| cholesky::solve(uplo, factor, &mut as_column(x)),
        |x| cholesky::solve(uplo, factor, &mut as_column(x)),
    );
    reciprocal(n, anorm, ainvnm)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    use super::*;
    use crate::norm;

    #[test]
    fn estimate_exact_for_small() {
        let a = array![[4.0f64, 1.], [2., 3.]];
        // inv(A) = [[0.3, -0.1], [-0.2, 0.4]]
        let mut f = a.clone();
        let mut ipiv = Array1::zeros(2);
        crate::lu::factorize(&mut f, &mut ipiv).unwrap();

        let anorm = norm::general(NormType::One, &a);
        let rcond = general(NormType::One, &f, anorm).unwrap();
        assert_abs_diff_eq!(rcond, 1. / (6. * 0.5), epsilon = 1e-12);

        let anorm = norm::general(NormType::Infinity, &a);
        let rcond = general(NormType::Infinity, &f, anorm).unwrap();
        assert_abs_diff_eq!(rcond, 1. / (5. * 0.6), epsilon = 1e-12);
    }

    #[test]
    fn positive_definite_diagonal() {
        let a = array![[4.0f64, 0., 0.], [0., 1., 0.], [0., 0., 0.25]];
        let mut f = a.clone();
        cholesky::factorize(Uplo::Lower, &mut f).unwrap();
        let rcond = positive_definite(Uplo::Lower, &f, 4.).unwrap();
        assert_abs_diff_eq!(rcond, 1. / 16., epsilon = 1e-12);
    }

    #[test]
    fn degenerate() {
        let empty = Array2::<f64>::zeros((0, 0));
        assert_eq!(general(NormType::One, &empty, 0.).unwrap(), 1.);

        let f = array![[1.0f64, 0.], [0., 0.]];
        assert_eq!(general(NormType::One, &f, 0.).unwrap(), 0.);
        assert_eq!(general(NormType::One, &f, 1.).unwrap(), 0.);
    }
}
