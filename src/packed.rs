//! Routines on symmetric and triangular matrices in packed storage.
//!
//! Packed matrices are expanded into a dense work matrix, handled by the dense kernels and
//! packed back. Only the referenced triangle of the packed array is ever read or written.

use ndarray::{Array1, Array2, ArrayBase, Data, DataMut, Ix2, NdFloat};

use crate::{
    check_square, cholesky, eigh,
    flags::{JobEig, Layout, Uplo},
    storage::{pack, packed_index, packed_len, triangle_rows, unpack},
    LinalgError, Result,
};

fn check_len<A>(n: usize, ap: &[A]) -> Result<()> {
    if ap.len() < packed_len(n) {
        Err(LinalgError::WrongRows {
            expected: packed_len(n),
            actual: ap.len(),
        })
    } else {
        Ok(())
    }
}

/// Cholesky factorization of the positive definite matrix whose `uplo` triangle is packed in
/// `ap`, overwritten by the factor. Like [`cholesky::factorize`], a failed factorization leaves
/// the partially factored triangle behind.
pub fn factorize<A: NdFloat>(layout: Layout, uplo: Uplo, n: usize, ap: &mut [A]) -> Result<()> {
    check_len(n, ap)?;
    let mut a = unpack(layout, uplo, n, ap);
    let res = cholesky::factorize(uplo, &mut a);
    pack(layout, uplo, &a.view(), ap);
    res
}

/// Solves `A * X = B` given the packed factor computed by [`factorize`]
pub fn solve<A, S>(
    layout: Layout,
    uplo: Uplo,
    n: usize,
    ap: &[A],
    b: &mut ArrayBase<S, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    check_len(n, ap)?;
    let factor = unpack(layout, uplo, n, ap);
    cholesky::solve(uplo, &factor, b)
}

/// Eigenvalues in ascending order of the symmetric matrix whose `uplo` triangle is packed in
/// `ap`, with the eigenvectors if `jobz` asks for them
pub fn eigh<A: NdFloat>(
    jobz: JobEig,
    layout: Layout,
    uplo: Uplo,
    n: usize,
    ap: &[A],
) -> Result<(Array1<A>, Option<Array2<A>>)> {
    check_len(n, ap)?;
    let a = unpack(layout, uplo, n, ap);
    eigh::eigh(jobz, uplo, &a)
}

/// Copies the packed `uplo` triangle into the same triangle of `a`, leaving the rest of `a`
/// untouched
pub fn to_dense<A, S>(
    layout: Layout,
    uplo: Uplo,
    ap: &[A],
    a: &mut ArrayBase<S, Ix2>,
) -> Result<()>
where
    A: Copy,
    S: DataMut<Elem = A>,
{
    let n = check_square(a)?;
    check_len(n, ap)?;
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            a[(i, j)] = ap[packed_index(layout, uplo, n, i, j)];
        }
    }
    Ok(())
}

/// Packs the `uplo` triangle of `a` into `ap`
pub fn from_dense<A, S>(
    layout: Layout,
    uplo: Uplo,
    a: &ArrayBase<S, Ix2>,
    ap: &mut [A],
) -> Result<()>
where
    A: Copy,
    S: Data<Elem = A>,
{
    let n = check_square(a)?;
    check_len(n, ap)?;
    pack(layout, uplo, &a.view(), ap);
    Ok(())
}
