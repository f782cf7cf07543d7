//! Symmetric band matrices.
//!
//! A symmetric band matrix with `kd` off-diagonals is held in a `(kd + 1) x n` array `ab`, laid
//! out as described by [`band_index`]. The Cholesky factor keeps the same band structure and is
//! written over the input.

use ndarray::{s, Array1, Array2, ArrayBase, Data, DataMut, Ix2, NdFloat, RawData};

use crate::{
    eigh,
    flags::{JobEig, Uplo},
    storage::{band_index, band_to_dense},
    LinalgError, Result,
};

fn check_band<S: RawData>(kd: usize, ab: &ArrayBase<S, Ix2>) -> Result<usize> {
    if ab.nrows() != kd + 1 {
        return Err(LinalgError::WrongRows {
            expected: kd + 1,
            actual: ab.nrows(),
        });
    }
    Ok(ab.ncols())
}

/// Position in `ab` of the element `(i, j)` of `L` (for `i >= j`), where the factor is
/// `L * L.t` for `Uplo::Lower` and `U.t * U` with `U = L.t` for `Uplo::Upper`
fn factor_pos(uplo: Uplo, kd: usize, i: usize, j: usize) -> (usize, usize) {
    match uplo {
        Uplo::Lower => band_index(Uplo::Lower, kd, i, j),
        Uplo::Upper => band_index(Uplo::Upper, kd, j, i),
    }
}

/// Cholesky factorization of a symmetric positive definite band matrix, in place
pub fn factorize<A, S>(uplo: Uplo, kd: usize, ab: &mut ArrayBase<S, Ix2>) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    let n = check_band(kd, ab)?;
    let pos = |i, j| factor_pos(uplo, kd, i, j);

    for j in 0..n {
        let ajj = ab[pos(j, j)];
        // Also catches NaN
        if !(ajj > A::zero()) {
            return Err(LinalgError::NotPositiveDefinite { order: j + 1 });
        }
        let ajj = ajj.sqrt();
        ab[pos(j, j)] = ajj;

        let kn = kd.min(n - j - 1);
        for p in 1..=kn {
            ab[pos(j + p, j)] /= ajj;
        }
        // Rank-1 update of the trailing band
        for q in 1..=kn {
            let xq = ab[pos(j + q, j)];
            for p in q..=kn {
                let xp = ab[pos(j + p, j)];
                ab[pos(j + p, j + q)] -= xp * xq;
            }
        }
    }
    Ok(())
}

/// Solves `A * X = B` in place, given the band factor computed by [`factorize`]
pub fn solve<A, Sa, Sb>(
    uplo: Uplo,
    kd: usize,
    ab: &ArrayBase<Sa, Ix2>,
    b: &mut ArrayBase<Sb, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    Sa: Data<Elem = A>,
    Sb: DataMut<Elem = A>,
{
    let n = check_band(kd, ab)?;
    if b.nrows() != n {
        return Err(LinalgError::WrongRows {
            expected: n,
            actual: b.nrows(),
        });
    }
    let l = |i, j| ab[factor_pos(uplo, kd, i, j)];

    // L * Y = B
    for j in 0..n {
        let ljj = l(j, j);
        b.row_mut(j).mapv_inplace(|v| v / ljj);
        for p in 1..=kd.min(n - j - 1) {
            let (row_j, mut row_p) = b.multi_slice_mut((s![j, ..], s![j + p, ..]));
            row_p.scaled_add(-l(j + p, j), &row_j);
        }
    }
    // L.t * X = Y
    for j in (0..n).rev() {
        for p in 1..=kd.min(n - j - 1) {
            let (mut row_j, row_p) = b.multi_slice_mut((s![j, ..], s![j + p, ..]));
            row_j.scaled_add(-l(j + p, j), &row_p);
        }
        let ljj = l(j, j);
        b.row_mut(j).mapv_inplace(|v| v / ljj);
    }
    Ok(())
}

/// Eigenvalues in ascending order of a symmetric band matrix, with the eigenvectors if `jobz`
/// asks for them
pub fn eigh<A, S>(
    jobz: JobEig,
    uplo: Uplo,
    kd: usize,
    ab: &ArrayBase<S, Ix2>,
) -> Result<(Array1<A>, Option<Array2<A>>)>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    check_band(kd, ab)?;
    let a = band_to_dense(uplo, kd, &ab.view());
    eigh::eigh(jobz, Uplo::Lower, &a)
}
