//! LAPACKE-style routines on flat buffers.
//!
//! Arguments come in the order of the corresponding `LAPACKE_?xxx` function, and an illegal
//! argument is reported as `-i` where `i` is its position counting the layout as argument 1.
//! Dimensions and leading dimensions are `i32` like `lapack_int`, so a negative value is an
//! illegal argument rather than a wrapped one.
//!
//! The generic routines report an [`Info`]. The `s*` and `d*` exports generated at the bottom of
//! this module collapse it to a `bool` and log failures at debug level.
//!
//! Departures from LAPACK:
//! * `syev`, `spev` and `sbev` leave their input untouched unless eigenvectors are requested.
//! * `gesvd` has no `superb` output and leaves `a` untouched unless `jobu` or `jobvt` is
//!   [`JobSvd::Overwrite`].
//! * `getrs` and `getri` check that pivot indices are in range (argument `ipiv`).
//! * The solve routines `getrs`, `potrs`, `pptrs` and `pbtrs` report `info = i > 0` when
//!   the `i`-th diagonal element of the triangular factor is exactly zero, instead of dividing by
//!   it.

use std::{convert::TryFrom, iter::Sum};

use ndarray::{s, Array2, ArrayView1, NdFloat};

use crate::{
    banded, cholesky, condition, eigh, equilibrate,
    flags::{Diag, JobEig, JobSvd, Layout, NormType, Side, Transpose, Uplo},
    info::Info,
    lu, norm, packed, qr,
    storage::{dense, dense_mut, packed_len, vector, vector_mut},
    svd,
    triangular::{invert_triangular, solve_triangular},
    LinalgError, Result,
};

fn illegal(index: usize) -> LinalgError {
    LinalgError::IllegalArgument { index }
}

/// Dimension argument at position `arg`
fn dim(value: i32, arg: usize) -> Result<usize> {
    usize::try_from(value).map_err(|_| illegal(arg))
}

fn call(f: impl FnOnce() -> Result<()>) -> Info {
    f().into()
}

fn pivots(ipiv: &[i32], n: usize, arg: usize) -> Result<ArrayView1<'_, i32>> {
    let ipiv = vector(ipiv, n, arg)?;
    if ipiv.iter().all(|&p| p >= 1 && p as usize <= n) {
        Ok(ipiv)
    } else {
        Err(illegal(arg))
    }
}

fn packed_buf<A>(ap: &[A], n: usize, arg: usize) -> Result<&[A]> {
    ap.get(..packed_len(n)).ok_or_else(|| illegal(arg))
}

fn packed_buf_mut<A>(ap: &mut [A], n: usize, arg: usize) -> Result<&mut [A]> {
    ap.get_mut(..packed_len(n)).ok_or_else(|| illegal(arg))
}

fn check_norm<A: NdFloat>(anorm: A, arg: usize) -> Result<()> {
    // Also rejects NaN
    if anorm >= A::zero() {
        Ok(())
    } else {
        Err(illegal(arg))
    }
}

/// Cholesky factorization of a symmetric positive definite matrix
pub fn potrf<A: NdFloat>(layout: Layout, uplo: Uplo, n: i32, a: &mut [A], lda: i32) -> Info {
    call(move || {
        let n = dim(n, 3)?;
        let mut a = dense_mut(layout, n, n, a, dim(lda, 5)?, 5)?;
        cholesky::factorize(uplo, &mut a)
    })
}

/// Solves `A * X = B` with the Cholesky factor computed by [`potrf`]
#[allow(clippy::too_many_arguments)]
pub fn potrs<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    n: i32,
    nrhs: i32,
    a: &[A],
    lda: i32,
    b: &mut [A],
    ldb: i32,
) -> Info {
    call(move || {
        let (n, nrhs) = (dim(n, 3)?, dim(nrhs, 4)?);
        let a = dense(layout, n, n, a, dim(lda, 6)?, 6)?;
        let mut b = dense_mut(layout, n, nrhs, b, dim(ldb, 8)?, 8)?;
        cholesky::solve(uplo, &a, &mut b)
    })
}

/// Inverse of a symmetric positive definite matrix from the factor computed by [`potrf`]
pub fn potri<A: NdFloat>(layout: Layout, uplo: Uplo, n: i32, a: &mut [A], lda: i32) -> Info {
    call(move || {
        let n = dim(n, 3)?;
        let mut a = dense_mut(layout, n, n, a, dim(lda, 5)?, 5)?;
        cholesky::invert(uplo, &mut a)
    })
}

/// Reciprocal one-norm condition number from the factor computed by [`potrf`]
#[allow(clippy::too_many_arguments)]
pub fn pocon<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    n: i32,
    a: &[A],
    lda: i32,
    anorm: A,
    rcond: &mut A,
) -> Info {
    call(move || {
        let n = dim(n, 3)?;
        let a = dense(layout, n, n, a, dim(lda, 5)?, 5)?;
        check_norm(anorm, 6)?;
        *rcond = condition::positive_definite(uplo, &a, anorm)?;
        Ok(())
    })
}

/// LU factorization with partial pivoting
pub fn getrf<A: NdFloat>(
    layout: Layout,
    m: i32,
    n: i32,
    a: &mut [A],
    lda: i32,
    ipiv: &mut [i32],
) -> Info {
    call(move || {
        let (m, n) = (dim(m, 2)?, dim(n, 3)?);
        let mut a = dense_mut(layout, m, n, a, dim(lda, 5)?, 5)?;
        let mut ipiv = vector_mut(ipiv, m.min(n), 6)?;
        lu::factorize(&mut a, &mut ipiv)
    })
}

/// Solves `op(A) * X = B` with the factorization computed by [`getrf`]
#[allow(clippy::too_many_arguments)]
pub fn getrs<A: NdFloat>(
    layout: Layout,
    trans: Transpose,
    n: i32,
    nrhs: i32,
    a: &[A],
    lda: i32,
    ipiv: &[i32],
    b: &mut [A],
    ldb: i32,
) -> Info {
    call(move || {
        let (n, nrhs) = (dim(n, 3)?, dim(nrhs, 4)?);
        let a = dense(layout, n, n, a, dim(lda, 6)?, 6)?;
        let ipiv = pivots(ipiv, n, 7)?;
        let mut b = dense_mut(layout, n, nrhs, b, dim(ldb, 9)?, 9)?;
        lu::solve(trans, &a, &ipiv, &mut b)
    })
}

/// Inverse of a matrix from the factorization computed by [`getrf`]
pub fn getri<A: NdFloat>(layout: Layout, n: i32, a: &mut [A], lda: i32, ipiv: &[i32]) -> Info {
    call(move || {
        let n = dim(n, 2)?;
        let mut a = dense_mut(layout, n, n, a, dim(lda, 4)?, 4)?;
        let ipiv = pivots(ipiv, n, 5)?;
        lu::invert(&mut a, &ipiv)
    })
}

/// Solves `A * X = B` for a general square `A`
#[allow(clippy::too_many_arguments)]
pub fn gesv<A: NdFloat>(
    layout: Layout,
    n: i32,
    nrhs: i32,
    a: &mut [A],
    lda: i32,
    ipiv: &mut [i32],
    b: &mut [A],
    ldb: i32,
) -> Info {
    call(move || {
        let (n, nrhs) = (dim(n, 2)?, dim(nrhs, 3)?);
        let mut a = dense_mut(layout, n, n, a, dim(lda, 5)?, 5)?;
        let mut ipiv = vector_mut(ipiv, n, 6)?;
        let mut b = dense_mut(layout, n, nrhs, b, dim(ldb, 8)?, 8)?;
        lu::factorize_and_solve(&mut a, &mut ipiv, &mut b)
    })
}

/// Reciprocal condition number in the one or infinity norm from the factors computed by
/// [`getrf`]
#[allow(clippy::too_many_arguments)]
pub fn gecon<A: NdFloat>(
    layout: Layout,
    norm: NormType,
    n: i32,
    a: &[A],
    lda: i32,
    anorm: A,
    rcond: &mut A,
) -> Info {
    call(move || {
        if !matches!(norm, NormType::One | NormType::Infinity) {
            return Err(illegal(2));
        }
        let n = dim(n, 3)?;
        let a = dense(layout, n, n, a, dim(lda, 5)?, 5)?;
        check_norm(anorm, 6)?;
        *rcond = condition::general(norm, &a, anorm)?;
        Ok(())
    })
}

/// Row and column scalings equilibrating a general matrix
#[allow(clippy::too_many_arguments)]
pub fn geequ<A: NdFloat>(
    layout: Layout,
    m: i32,
    n: i32,
    a: &[A],
    lda: i32,
    r: &mut [A],
    c: &mut [A],
    rowcnd: &mut A,
    colcnd: &mut A,
    amax: &mut A,
) -> Info {
    call(move || {
        let (m, n) = (dim(m, 2)?, dim(n, 3)?);
        let a = dense(layout, m, n, a, dim(lda, 5)?, 5)?;
        let mut r = vector_mut(r, m, 6)?;
        let mut c = vector_mut(c, n, 7)?;
        let eq = equilibrate::equilibrate(&a)?;
        r.assign(&eq.r);
        c.assign(&eq.c);
        *rowcnd = eq.rowcnd;
        *colcnd = eq.colcnd;
        *amax = eq.amax;
        Ok(())
    })
}

/// Householder QR factorization
pub fn geqrf<A: NdFloat>(
    layout: Layout,
    m: i32,
    n: i32,
    a: &mut [A],
    lda: i32,
    tau: &mut [A],
) -> Info {
    call(move || {
        let (m, n) = (dim(m, 2)?, dim(n, 3)?);
        let mut a = dense_mut(layout, m, n, a, dim(lda, 5)?, 5)?;
        let mut tau = vector_mut(tau, m.min(n), 6)?;
        qr::factorize(&mut a, &mut tau)
    })
}

/// Overwrites the reflectors computed by [`geqrf`] with the first `n` columns of `Q`
#[allow(clippy::too_many_arguments)]
pub fn orgqr<A: NdFloat>(
    layout: Layout,
    m: i32,
    n: i32,
    k: i32,
    a: &mut [A],
    lda: i32,
    tau: &[A],
) -> Info {
    call(move || {
        let m = dim(m, 2)?;
        let n = dim(n, 3).and_then(|n| if n > m { Err(illegal(3)) } else { Ok(n) })?;
        let k = dim(k, 4).and_then(|k| if k > n { Err(illegal(4)) } else { Ok(k) })?;
        let mut a = dense_mut(layout, m, n, a, dim(lda, 6)?, 6)?;
        let tau = vector(tau, k, 7)?;
        qr::generate_q(&mut a, k, &tau)
    })
}

/// Multiplies `C` by `op(Q)` from either side, with `Q` given by the reflectors computed by
/// [`geqrf`]
#[allow(clippy::too_many_arguments)]
pub fn ormqr<A: NdFloat>(
    layout: Layout,
    side: Side,
    trans: Transpose,
    m: i32,
    n: i32,
    k: i32,
    a: &[A],
    lda: i32,
    tau: &[A],
    c: &mut [A],
    ldc: i32,
) -> Info {
    call(move || {
        let (m, n) = (dim(m, 4)?, dim(n, 5)?);
        let nq = match side {
            Side::Left => m,
            Side::Right => n,
        };
        let k = dim(k, 6).and_then(|k| if k > nq { Err(illegal(6)) } else { Ok(k) })?;
        let a = dense(layout, nq, k, a, dim(lda, 8)?, 8)?;
        let tau = vector(tau, k, 9)?;
        let mut c = dense_mut(layout, m, n, c, dim(ldc, 11)?, 11)?;
        qr::apply_q(side, trans, &a, k, &tau, &mut c)
    })
}

/// Least squares or minimum norm solution of a full rank system
#[allow(clippy::too_many_arguments)]
pub fn gels<A: NdFloat>(
    layout: Layout,
    trans: Transpose,
    m: i32,
    n: i32,
    nrhs: i32,
    a: &mut [A],
    lda: i32,
    b: &mut [A],
    ldb: i32,
) -> Info {
    call(move || {
        let (m, n, nrhs) = (dim(m, 3)?, dim(n, 4)?, dim(nrhs, 5)?);
        let mut a = dense_mut(layout, m, n, a, dim(lda, 7)?, 7)?;
        let mut b = dense_mut(layout, m.max(n), nrhs, b, dim(ldb, 9)?, 9)?;
        qr::least_squares(trans, &mut a, &mut b)
    })
}

/// Solves a triangular system `op(A) * X = B`
#[allow(clippy::too_many_arguments)]
pub fn trtrs<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: i32,
    nrhs: i32,
    a: &[A],
    lda: i32,
    b: &mut [A],
    ldb: i32,
) -> Info {
    call(move || {
        let (n, nrhs) = (dim(n, 5)?, dim(nrhs, 6)?);
        let a = dense(layout, n, n, a, dim(lda, 8)?, 8)?;
        let mut b = dense_mut(layout, n, nrhs, b, dim(ldb, 10)?, 10)?;
        solve_triangular(uplo, trans, diag, &a, &mut b)
    })
}

/// Inverse of a triangular matrix
pub fn trtri<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    diag: Diag,
    n: i32,
    a: &mut [A],
    lda: i32,
) -> Info {
    call(move || {
        let n = dim(n, 4)?;
        let mut a = dense_mut(layout, n, n, a, dim(lda, 6)?, 6)?;
        invert_triangular(uplo, diag, &mut a)
    })
}

/// Eigenvalues, and optionally eigenvectors written over `a`, of a symmetric matrix
#[allow(clippy::too_many_arguments)]
pub fn syev<A: NdFloat>(
    layout: Layout,
    jobz: JobEig,
    uplo: Uplo,
    n: i32,
    a: &mut [A],
    lda: i32,
    w: &mut [A],
) -> Info {
    call(move || {
        let n = dim(n, 4)?;
        let mut a = dense_mut(layout, n, n, a, dim(lda, 6)?, 6)?;
        let mut w = vector_mut(w, n, 7)?;
        let (vals, vecs) = eigh::eigh(jobz, uplo, &a)?;
        w.assign(&vals);
        if let Some(vecs) = vecs {
            a.assign(&vecs);
        }
        Ok(())
    })
}

/// Eigenvalues, and optionally eigenvectors, of a symmetric tridiagonal matrix
#[allow(clippy::too_many_arguments)]
pub fn stev<A: NdFloat>(
    layout: Layout,
    jobz: JobEig,
    n: i32,
    d: &mut [A],
    e: &mut [A],
    z: &mut [A],
    ldz: i32,
) -> Info {
    call(move || {
        let n = dim(n, 3)?;
        let mut d = vector_mut(d, n, 4)?;
        let mut e = vector_mut(e, n.saturating_sub(1), 5)?;
        let z = match jobz {
            JobEig::Vectors => {
                let mut z = dense_mut(layout, n, n, z, dim(ldz, 7)?, 7)?;
                z.assign(&Array2::eye(n));
                Some(z)
            }
            JobEig::ValuesOnly => None,
        };
        eigh::tridiagonal_eig(&mut d, &mut e, z)
    })
}

/// Singular value decomposition of a general matrix
#[allow(clippy::too_many_arguments)]
pub fn gesvd<A: NdFloat>(
    layout: Layout,
    jobu: JobSvd,
    jobvt: JobSvd,
    m: i32,
    n: i32,
    a: &mut [A],
    lda: i32,
    s: &mut [A],
    u: &mut [A],
    ldu: i32,
    vt: &mut [A],
    ldvt: i32,
) -> Info {
    call(move || {
        if jobu == JobSvd::Overwrite && jobvt == JobSvd::Overwrite {
            return Err(illegal(3));
        }
        let (m, n) = (dim(m, 4)?, dim(n, 5)?);
        let k = m.min(n);
        let mut a = dense_mut(layout, m, n, a, dim(lda, 7)?, 7)?;
        let mut s = vector_mut(s, k, 8)?;
        let u_cols = match jobu {
            JobSvd::All => Some(m),
            JobSvd::Reduced => Some(k),
            JobSvd::Overwrite | JobSvd::Skip => None,
        };
        let mut u_out = match u_cols {
            Some(cols) => Some(dense_mut(layout, m, cols, u, dim(ldu, 10)?, 10)?),
            None => None,
        };
        let vt_rows = match jobvt {
            JobSvd::All => Some(n),
            JobSvd::Reduced => Some(k),
            JobSvd::Overwrite | JobSvd::Skip => None,
        };
        let mut vt_out = match vt_rows {
            Some(rows) => Some(dense_mut(layout, rows, n, vt, dim(ldvt, 12)?, 12)?),
            None => None,
        };

        let (u_mat, sigma, vt_mat) = svd::svd(jobu, jobvt, &a)?;
        s.assign(&sigma);
        if let Some(u_mat) = u_mat {
            match u_out.as_mut() {
                Some(out) => out.assign(&u_mat),
                None => a.slice_mut(s![.., ..k]).assign(&u_mat),
            }
        }
        if let Some(vt_mat) = vt_mat {
            match vt_out.as_mut() {
                Some(out) => out.assign(&vt_mat),
                None => a.slice_mut(s![..k, ..]).assign(&vt_mat),
            }
        }
        Ok(())
    })
}

/// Cholesky factorization of a symmetric positive definite matrix in packed storage
pub fn pptrf<A: NdFloat>(layout: Layout, uplo: Uplo, n: i32, ap: &mut [A]) -> Info {
    call(move || {
        let n = dim(n, 3)?;
        let ap = packed_buf_mut(ap, n, 4)?;
        packed::factorize(layout, uplo, n, ap)
    })
}

/// Solves `A * X = B` with the packed factor computed by [`pptrf`]
#[allow(clippy::too_many_arguments)]
pub fn pptrs<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    n: i32,
    nrhs: i32,
    ap: &[A],
    b: &mut [A],
    ldb: i32,
) -> Info {
    call(move || {
        let (n, nrhs) = (dim(n, 3)?, dim(nrhs, 4)?);
        let ap = packed_buf(ap, n, 5)?;
        let mut b = dense_mut(layout, n, nrhs, b, dim(ldb, 7)?, 7)?;
        packed::solve(layout, uplo, n, ap, &mut b)
    })
}

/// Eigenvalues, and optionally eigenvectors, of a symmetric matrix in packed storage
#[allow(clippy::too_many_arguments)]
pub fn spev<A: NdFloat>(
    layout: Layout,
    jobz: JobEig,
    uplo: Uplo,
    n: i32,
    ap: &[A],
    w: &mut [A],
    z: &mut [A],
    ldz: i32,
) -> Info {
    call(move || {
        let n = dim(n, 4)?;
        let ap = packed_buf(ap, n, 5)?;
        let mut w = vector_mut(w, n, 6)?;
        let mut z = match jobz {
            JobEig::Vectors => Some(dense_mut(layout, n, n, z, dim(ldz, 8)?, 8)?),
            JobEig::ValuesOnly => None,
        };
        let (vals, vecs) = packed::eigh(jobz, layout, uplo, n, ap)?;
        w.assign(&vals);
        if let (Some(z), Some(vecs)) = (z.as_mut(), vecs) {
            z.assign(&vecs);
        }
        Ok(())
    })
}

/// Copies a packed triangle into full storage
pub fn tpttr<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    n: i32,
    ap: &[A],
    a: &mut [A],
    lda: i32,
) -> Info {
    call(move || {
        let n = dim(n, 3)?;
        let ap = packed_buf(ap, n, 4)?;
        let mut a = dense_mut(layout, n, n, a, dim(lda, 6)?, 6)?;
        packed::to_dense(layout, uplo, ap, &mut a)
    })
}

/// Copies a triangle in full storage into packed storage
pub fn trttp<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    n: i32,
    a: &[A],
    lda: i32,
    ap: &mut [A],
) -> Info {
    call(move || {
        let n = dim(n, 3)?;
        let a = dense(layout, n, n, a, dim(lda, 5)?, 5)?;
        let ap = packed_buf_mut(ap, n, 6)?;
        packed::from_dense(layout, uplo, &a, ap)
    })
}

/// Cholesky factorization of a symmetric positive definite band matrix
pub fn pbtrf<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    n: i32,
    kd: i32,
    ab: &mut [A],
    ldab: i32,
) -> Info {
    call(move || {
        let (n, kd) = (dim(n, 3)?, dim(kd, 4)?);
        let mut ab = dense_mut(layout, kd + 1, n, ab, dim(ldab, 6)?, 6)?;
        banded::factorize(uplo, kd, &mut ab)
    })
}

/// Solves `A * X = B` with the band factor computed by [`pbtrf`]
#[allow(clippy::too_many_arguments)]
pub fn pbtrs<A: NdFloat>(
    layout: Layout,
    uplo: Uplo,
    n: i32,
    kd: i32,
    nrhs: i32,
    ab: &[A],
    ldab: i32,
    b: &mut [A],
    ldb: i32,
) -> Info {
    call(move || {
        let (n, kd, nrhs) = (dim(n, 3)?, dim(kd, 4)?, dim(nrhs, 5)?);
        let ab = dense(layout, kd + 1, n, ab, dim(ldab, 7)?, 7)?;
        let mut b = dense_mut(layout, n, nrhs, b, dim(ldb, 9)?, 9)?;
        banded::solve(uplo, kd, &ab, &mut b)
    })
}

/// Eigenvalues, and optionally eigenvectors, of a symmetric band matrix
#[allow(clippy::too_many_arguments)]
pub fn sbev<A: NdFloat>(
    layout: Layout,
    jobz: JobEig,
    uplo: Uplo,
    n: i32,
    kd: i32,
    ab: &[A],
    ldab: i32,
    w: &mut [A],
    z: &mut [A],
    ldz: i32,
) -> Info {
    call(move || {
        let (n, kd) = (dim(n, 4)?, dim(kd, 5)?);
        let ab = dense(layout, kd + 1, n, ab, dim(ldab, 7)?, 7)?;
        let mut w = vector_mut(w, n, 8)?;
        let mut z = match jobz {
            JobEig::Vectors => Some(dense_mut(layout, n, n, z, dim(ldz, 10)?, 10)?),
            JobEig::ValuesOnly => None,
        };
        let (vals, vecs) = banded::eigh(jobz, uplo, kd, &ab)?;
        w.assign(&vals);
        if let (Some(z), Some(vecs)) = (z.as_mut(), vecs) {
            z.assign(&vecs);
        }
        Ok(())
    })
}

/// The value of a norm routine, or `-i` (as a float) for an illegal argument `i` like LAPACKE
fn norm_value<A: NdFloat>(routine: &'static str, res: Result<A>) -> A {
    match res {
        Ok(value) => value,
        Err(err) => {
            let info = Info::from(err);
            tracing::debug!(routine, info = info.code(), "illegal argument");
            A::from(info.code()).unwrap()
        }
    }
}

/// Norm of a general matrix
pub fn lange<A: NdFloat + Sum>(
    layout: Layout,
    norm: NormType,
    m: i32,
    n: i32,
    a: &[A],
    lda: i32,
) -> A {
    let res = (move || -> Result<A> {
        let (m, n) = (dim(m, 3)?, dim(n, 4)?);
        let a = dense(layout, m, n, a, dim(lda, 6)?, 6)?;
        Ok(norm::general(norm, &a))
    })();
    norm_value("lange", res)
}

/// Norm of a symmetric matrix stored in one triangle
pub fn lansy<A: NdFloat + Sum>(
    layout: Layout,
    norm: NormType,
    uplo: Uplo,
    n: i32,
    a: &[A],
    lda: i32,
) -> A {
    let res = (move || -> Result<A> {
        let n = dim(n, 4)?;
        let a = dense(layout, n, n, a, dim(lda, 6)?, 6)?;
        Ok(norm::symmetric(norm, uplo, &a))
    })();
    norm_value("lansy", res)
}

/// Collapses `info` to the success flag, logging failures
fn report(routine: &'static str, info: Info) -> bool {
    if !info.is_success() {
        tracing::debug!(routine, info = info.code(), "routine failed");
    }
    info.into()
}

macro_rules! bindings {
    ($($generic:ident => $single:ident, $double:ident ($($arg:ident: $ty:ty),* $(,)?);)+) => {
        /// Single precision exports
        pub mod single {
            use super::*;

            type Elem = f32;

            $(
                #[allow(clippy::too_many_arguments)]
                pub fn $single($($arg: $ty),*) -> bool {
                    report(stringify!($single), $generic::<Elem>($($arg),*))
                }
            )+

            pub fn slange(
                layout: Layout,
                norm: NormType,
                m: i32,
                n: i32,
                a: &[Elem],
                lda: i32,
            ) -> Elem {
                lange(layout, norm, m, n, a, lda)
            }

            pub fn slansy(
                layout: Layout,
                norm: NormType,
                uplo: Uplo,
                n: i32,
                a: &[Elem],
                lda: i32,
            ) -> Elem {
                lansy(layout, norm, uplo, n, a, lda)
            }
        }

        /// Double precision exports
        pub mod double {
            use super::*;

            type Elem = f64;

            $(
                #[allow(clippy::too_many_arguments)]
                pub fn $double($($arg: $ty),*) -> bool {
                    report(stringify!($double), $generic::<Elem>($($arg),*))
                }
            )+

            pub fn dlange(
                layout: Layout,
                norm: NormType,
                m: i32,
                n: i32,
                a: &[Elem],
                lda: i32,
            ) -> Elem {
                lange(layout, norm, m, n, a, lda)
            }

            pub fn dlansy(
                layout: Layout,
                norm: NormType,
                uplo: Uplo,
                n: i32,
                a: &[Elem],
                lda: i32,
            ) -> Elem {
                lansy(layout, norm, uplo, n, a, lda)
            }
        }

        pub use self::{double::*, single::*};
    };
}

bindings! {
    potrf => spotrf, dpotrf(layout: Layout, uplo: Uplo, n: i32, a: &mut [Elem], lda: i32);
    potrs => spotrs, dpotrs(
        layout: Layout, uplo: Uplo, n: i32, nrhs: i32, a: &[Elem], lda: i32, b: &mut [Elem],
        ldb: i32,
    );
    potri => spotri, dpotri(layout: Layout, uplo: Uplo, n: i32, a: &mut [Elem], lda: i32);
    pocon => spocon, dpocon(
        layout: Layout, uplo: Uplo, n: i32, a: &[Elem], lda: i32, anorm: Elem, rcond: &mut Elem,
    );
    getrf => sgetrf, dgetrf(
        layout: Layout, m: i32, n: i32, a: &mut [Elem], lda: i32, ipiv: &mut [i32],
    );
    getrs => sgetrs, dgetrs(
        layout: Layout, trans: Transpose, n: i32, nrhs: i32, a: &[Elem], lda: i32, ipiv: &[i32],
        b: &mut [Elem], ldb: i32,
    );
    getri => sgetri, dgetri(layout: Layout, n: i32, a: &mut [Elem], lda: i32, ipiv: &[i32]);
    gesv => sgesv, dgesv(
        layout: Layout, n: i32, nrhs: i32, a: &mut [Elem], lda: i32, ipiv: &mut [i32],
        b: &mut [Elem], ldb: i32,
    );
    gecon => sgecon, dgecon(
        layout: Layout, norm: NormType, n: i32, a: &[Elem], lda: i32, anorm: Elem,
        rcond: &mut Elem,
    );
    geequ => sgeequ, dgeequ(
        layout: Layout, m: i32, n: i32, a: &[Elem], lda: i32, r: &mut [Elem], c: &mut [Elem],
        rowcnd: &mut Elem, colcnd: &mut Elem, amax: &mut Elem,
    );
    geqrf => sgeqrf, dgeqrf(
        layout: Layout, m: i32, n: i32, a: &mut [Elem], lda: i32, tau: &mut [Elem],
    );
    orgqr => sorgqr, dorgqr(
        layout: Layout, m: i32, n: i32, k: i32, a: &mut [Elem], lda: i32, tau: &[Elem],
    );
    ormqr => sormqr, dormqr(
        layout: Layout, side: Side, trans: Transpose, m: i32, n: i32, k: i32, a: &[Elem],
        lda: i32, tau: &[Elem], c: &mut [Elem], ldc: i32,
    );
    gels => sgels, dgels(
        layout: Layout, trans: Transpose, m: i32, n: i32, nrhs: i32, a: &mut [Elem], lda: i32,
        b: &mut [Elem], ldb: i32,
    );
    trtrs => strtrs, dtrtrs(
        layout: Layout, uplo: Uplo, trans: Transpose, diag: Diag, n: i32, nrhs: i32,
        a: &[Elem], lda: i32, b: &mut [Elem], ldb: i32,
    );
    trtri => strtri, dtrtri(
        layout: Layout, uplo: Uplo, diag: Diag, n: i32, a: &mut [Elem], lda: i32,
    );
    syev => ssyev, dsyev(
        layout: Layout, jobz: JobEig, uplo: Uplo, n: i32, a: &mut [Elem], lda: i32,
        w: &mut [Elem],
    );
    stev => sstev, dstev(
        layout: Layout, jobz: JobEig, n: i32, d: &mut [Elem], e: &mut [Elem], z: &mut [Elem],
        ldz: i32,
    );
    gesvd => sgesvd, dgesvd(
        layout: Layout, jobu: JobSvd, jobvt: JobSvd, m: i32, n: i32, a: &mut [Elem], lda: i32,
        s: &mut [Elem], u: &mut [Elem], ldu: i32, vt: &mut [Elem], ldvt: i32,
    );
    pptrf => spptrf, dpptrf(layout: Layout, uplo: Uplo, n: i32, ap: &mut [Elem]);
    pptrs => spptrs, dpptrs(
        layout: Layout, uplo: Uplo, n: i32, nrhs: i32, ap: &[Elem], b: &mut [Elem], ldb: i32,
    );
    spev => sspev, dspev(
        layout: Layout, jobz: JobEig, uplo: Uplo, n: i32, ap: &[Elem], w: &mut [Elem],
        z: &mut [Elem], ldz: i32,
    );
    tpttr => stpttr, dtpttr(
        layout: Layout, uplo: Uplo, n: i32, ap: &[Elem], a: &mut [Elem], lda: i32,
    );
    trttp => strttp, dtrttp(
        layout: Layout, uplo: Uplo, n: i32, a: &[Elem], lda: i32, ap: &mut [Elem],
    );
    pbtrf => spbtrf, dpbtrf(
        layout: Layout, uplo: Uplo, n: i32, kd: i32, ab: &mut [Elem], ldab: i32,
    );
    pbtrs => spbtrs, dpbtrs(
        layout: Layout, uplo: Uplo, n: i32, kd: i32, nrhs: i32, ab: &[Elem], ldab: i32,
        b: &mut [Elem], ldb: i32,
    );
    sbev => ssbev, dsbev(
        layout: Layout, jobz: JobEig, uplo: Uplo, n: i32, kd: i32, ab: &[Elem], ldab: i32,
        w: &mut [Elem], z: &mut [Elem], ldz: i32,
    );
}
