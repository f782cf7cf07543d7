//! LU decomposition with partial pivoting
//!
//! Pivot indices follow the LAPACK convention: `ipiv[i] = p` (1-based) means that row `i` was
//! interchanged with row `p - 1` while factoring column `i`.

use ndarray::{s, Array2, ArrayBase, Data, DataMut, Ix1, Ix2, NdFloat};

use crate::{
    check_square,
    flags::{Diag, Transpose, Uplo},
    index::*,
    triangular::{first_zero_diagonal, solve_triangular},
    LinalgError, Result,
};

/// Factors the `m x n` matrix `A = P * L * U` in place, where `L` is unit lower triangular
/// (trapezoidal when `m > n`) and `U` is upper triangular (trapezoidal when `m < n`).
///
/// `ipiv` must hold at least `min(m, n)` elements. An exactly zero pivot doesn't stop the
/// factorization: it completes, and [`LinalgError::Singular`] reports the first such pivot.
pub fn factorize<A, S, P>(a: &mut ArrayBase<S, Ix2>, ipiv: &mut ArrayBase<P, Ix1>) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    P: DataMut<Elem = i32>,
{
    let (m, n) = a.dim();
    if ipiv.len() < m.min(n) {
        return Err(LinalgError::WrongRows {
            expected: m.min(n),
            actual: ipiv.len(),
        });
    }
    let mut singular = None;

    for k in 0..m.min(n) {
        let mut pivot = k;
        let mut max = A::zero();
        for i in k..m {
            let v = unsafe { a.at((i, k)) }.abs();
            if v > max {
                max = v;
                pivot = i;
            }
        }
        ipiv[k] = (pivot + 1) as i32;

        if max.is_zero() {
            singular.get_or_insert(k + 1);
            continue;
        }
        if pivot != k {
            swap_rows(a, k, pivot);
        }

        let inv = A::one() / unsafe { *a.at((k, k)) };
        let (mut col, row, mut trailing) = a.multi_slice_mut((
            s![k + 1.., k],
            s![k, k + 1..],
            s![k + 1.., k + 1..],
        ));
        col *= inv;
        for (i, &l) in col.iter().enumerate() {
            trailing.row_mut(i).scaled_add(-l, &row);
        }
    }

    match singular {
        Some(index) => Err(LinalgError::Singular { index }),
        None => Ok(()),
    }
}

fn swap_rows<A, S: DataMut<Elem = A>>(a: &mut ArrayBase<S, Ix2>, i: usize, j: usize) {
    for col in 0..a.ncols() {
        a.swap((i, col), (j, col));
    }
}

/// Applies the row interchanges of `ipiv` to `b`, forwards or backwards
fn apply_pivots<A, S, P>(b: &mut ArrayBase<S, Ix2>, ipiv: &ArrayBase<P, Ix1>, forward: bool)
where
    S: DataMut<Elem = A>,
    P: Data<Elem = i32>,
{
    let swap = |b: &mut ArrayBase<S, Ix2>, i: usize| {
        let p = ipiv[i] as usize - 1;
        if p != i {
            swap_rows(b, i, p);
        }
    };
    if forward {
        (0..ipiv.len()).for_each(|i| swap(b, i));
    } else {
        (0..ipiv.len()).rev().for_each(|i| swap(b, i));
    }
}

/// Checks that every pivot index refers to a row of an `n x n` matrix
fn check_pivots<P: Data<Elem = i32>>(n: usize, ipiv: &ArrayBase<P, Ix1>) -> bool {
    ipiv.len() == n && ipiv.iter().all(|&p| p >= 1 && p as usize <= n)
}

/// Solves `op(A) * X = B` in place, given the square factorization computed by [`factorize`]
pub fn solve<A, Sa, P, Sb>(
    trans: Transpose,
    lu: &ArrayBase<Sa, Ix2>,
    ipiv: &ArrayBase<P, Ix1>,
    b: &mut ArrayBase<Sb, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    Sa: Data<Elem = A>,
    P: Data<Elem = i32>,
    Sb: DataMut<Elem = A>,
{
    let n = check_square(lu)?;
    if !check_pivots(n, ipiv) {
        return Err(LinalgError::WrongRows {
            expected: n,
            actual: ipiv.len(),
        });
    }

    if trans.is_trans() {
        // A.t = U.t * L.t * P.t
        solve_triangular(Uplo::Upper, Transpose::Trans, Diag::NonUnit, lu, b)?;
        solve_triangular(Uplo::Lower, Transpose::Trans, Diag::Unit, lu, b)?;
        apply_pivots(b, ipiv, false);
    } else {
        if b.nrows() != n {
            return Err(LinalgError::WrongRows {
                expected: n,
                actual: b.nrows(),
            });
        }
        apply_pivots(b, ipiv, true);
        solve_triangular(Uplo::Lower, Transpose::No, Diag::Unit, lu, b)?;
        solve_triangular(Uplo::Upper, Transpose::No, Diag::NonUnit, lu, b)?;
    }
    Ok(())
}

/// Replaces the square factorization computed by [`factorize`] with `inv(A)`
pub fn invert<A, S, P>(lu: &mut ArrayBase<S, Ix2>, ipiv: &ArrayBase<P, Ix1>) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    P: Data<Elem = i32>,
{
    let n = check_square(lu)?;
    if let Some(index) = first_zero_diagonal(lu) {
        return Err(LinalgError::Singular { index });
    }
    let mut inv = Array2::<A>::eye(n);
    solve(Transpose::No, &*lu, ipiv, &mut inv)?;
    lu.assign(&inv);
    Ok(())
}

/// Solves `A * X = B` for a square `A`, leaving the factorization in `a` and the solution in `b`.
///
/// If `A` is exactly singular, `b` is left untouched.
pub fn factorize_and_solve<A, S, P, Sb>(
    a: &mut ArrayBase<S, Ix2>,
    ipiv: &mut ArrayBase<P, Ix1>,
    b: &mut ArrayBase<Sb, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    P: DataMut<Elem = i32>,
    Sb: DataMut<Elem = A>,
{
    check_square(a)?;
    factorize(a, ipiv)?;
    solve(Transpose::No, &*a, &*ipiv, b)
}
