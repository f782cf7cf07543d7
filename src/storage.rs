//! Views over caller-provided flat buffers.
//!
//! The LAPACK convention describes a matrix with a layout, its dimensions, a buffer and a
//! leading dimension. These helpers validate that description and turn it into an `ndarray`
//! view, reporting the offending argument position as an [`IllegalArgument`] error.
//!
//! [`IllegalArgument`]: LinalgError::IllegalArgument

use ndarray::{
    Array2, ArrayBase, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Data, Ix2,
    ShapeBuilder,
};
use num_traits::Zero;

use crate::{
    flags::{Layout, Uplo},
    LinalgError, Result,
};

fn check_ld(layout: Layout, rows: usize, cols: usize, ld: usize, ld_arg: usize) -> Result<()> {
    if ld < layout.leading_dim(rows, cols) {
        Err(LinalgError::IllegalArgument { index: ld_arg })
    } else {
        Ok(())
    }
}

/// Smallest buffer holding a `rows x cols` matrix with leading dimension `ld`
pub fn required_len(layout: Layout, rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        layout.index(rows - 1, cols - 1, ld) + 1
    }
}

fn strides(layout: Layout, ld: usize) -> (usize, usize) {
    match layout {
        Layout::RowMajor => (ld, 1),
        Layout::ColMajor => (1, ld),
    }
}

/// Read-only view of a dense matrix. The buffer is expected at argument `ld_arg - 1`.
pub fn dense<A>(
    layout: Layout,
    rows: usize,
    cols: usize,
    buf: &[A],
    ld: usize,
    ld_arg: usize,
) -> Result<ArrayView2<'_, A>> {
    check_ld(layout, rows, cols, ld, ld_arg)?;
    let buf_err = LinalgError::IllegalArgument { index: ld_arg - 1 };
    let len = required_len(layout, rows, cols, ld);
    if buf.len() < len {
        return Err(buf_err);
    }
    if len == 0 {
        return ArrayView2::from_shape((rows, cols), &buf[..0]).map_err(|_| buf_err);
    }
    ArrayView2::from_shape((rows, cols).strides(strides(layout, ld)), &buf[..len])
        .map_err(|_| buf_err)
}

/// Mutable view of a dense matrix. The buffer is expected at argument `ld_arg - 1`.
pub fn dense_mut<A>(
    layout: Layout,
    rows: usize,
    cols: usize,
    buf: &mut [A],
    ld: usize,
    ld_arg: usize,
) -> Result<ArrayViewMut2<'_, A>> {
    check_ld(layout, rows, cols, ld, ld_arg)?;
    let buf_err = LinalgError::IllegalArgument { index: ld_arg - 1 };
    let len = required_len(layout, rows, cols, ld);
    if buf.len() < len {
        return Err(buf_err);
    }
    if len == 0 {
        return ArrayViewMut2::from_shape((rows, cols), &mut buf[..0]).map_err(|_| buf_err);
    }
    ArrayViewMut2::from_shape((rows, cols).strides(strides(layout, ld)), &mut buf[..len])
        .map_err(|_| buf_err)
}

/// View of the first `len` elements of a vector argument at position `arg`
pub fn vector<A>(buf: &[A], len: usize, arg: usize) -> Result<ArrayView1<'_, A>> {
    buf.get(..len)
        .map(ArrayView1::from)
        .ok_or(LinalgError::IllegalArgument { index: arg })
}

/// Mutable view of the first `len` elements of a vector argument at position `arg`
pub fn vector_mut<A>(buf: &mut [A], len: usize, arg: usize) -> Result<ArrayViewMut1<'_, A>> {
    buf.get_mut(..len)
        .map(ArrayViewMut1::from)
        .ok_or(LinalgError::IllegalArgument { index: arg })
}

/// Number of elements in the packed storage of an `n x n` triangle
pub fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Offset of element `(i, j)` of the `uplo` triangle of an `n x n` matrix in packed storage.
///
/// `(i, j)` must lie in the referenced triangle. Row-major packing of a triangle is the
/// column-major packing of the other triangle of the transpose.
pub fn packed_index(layout: Layout, uplo: Uplo, n: usize, i: usize, j: usize) -> usize {
    let (uplo, i, j) = match layout {
        Layout::ColMajor => (uplo, i, j),
        Layout::RowMajor => (uplo.flip(), j, i),
    };
    match uplo {
        Uplo::Upper => {
            debug_assert!(i <= j);
            i + j * (j + 1) / 2
        }
        Uplo::Lower => {
            debug_assert!(j <= i);
            i + (2 * n - j - 1) * j / 2
        }
    }
}

/// Unpacks the `uplo` triangle into a dense matrix, leaving the other triangle zero
pub fn unpack<A: Clone + Zero>(layout: Layout, uplo: Uplo, n: usize, ap: &[A]) -> Array2<A> {
    let mut a = Array2::zeros((n, n));
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            a[(i, j)] = ap[packed_index(layout, uplo, n, i, j)].clone();
        }
    }
    a
}

/// Writes the `uplo` triangle of `a` into packed storage
pub fn pack<A: Clone>(layout: Layout, uplo: Uplo, a: &ArrayView2<A>, ap: &mut [A]) {
    let n = a.nrows();
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            ap[packed_index(layout, uplo, n, i, j)] = a[(i, j)].clone();
        }
    }
}

/// Row indices of column `j` that belong to the `uplo` triangle of an `n x n` matrix
pub(crate) fn triangle_rows(uplo: Uplo, n: usize, j: usize) -> std::ops::Range<usize> {
    match uplo {
        Uplo::Upper => 0..j + 1,
        Uplo::Lower => j..n,
    }
}

/// Full symmetric matrix whose `uplo` triangle matches that of `a`; the other triangle of `a` is
/// never read
pub fn symmetric_from_triangle<A, S>(uplo: Uplo, a: &ArrayBase<S, Ix2>) -> Array2<A>
where
    A: Copy + Zero,
    S: Data<Elem = A>,
{
    let n = a.nrows().min(a.ncols());
    let mut full = Array2::zeros((n, n));
    for j in 0..n {
        for i in triangle_rows(uplo, n, j) {
            let v = a[(i, j)];
            full[(i, j)] = v;
            full[(j, i)] = v;
        }
    }
    full
}

/// Position of `A(i, j)` in the `(kd + 1) x n` band storage of a symmetric band matrix with `kd`
/// off-diagonals. `(i, j)` must lie inside the referenced half of the band.
pub fn band_index(uplo: Uplo, kd: usize, i: usize, j: usize) -> (usize, usize) {
    match uplo {
        Uplo::Upper => {
            debug_assert!(i <= j && j - i <= kd);
            (kd + i - j, j)
        }
        Uplo::Lower => {
            debug_assert!(j <= i && i - j <= kd);
            (i - j, j)
        }
    }
}

/// Expands symmetric band storage into a full dense symmetric matrix
pub fn band_to_dense<A: Copy + Zero>(uplo: Uplo, kd: usize, ab: &ArrayView2<A>) -> Array2<A> {
    let n = ab.ncols();
    let mut a = Array2::zeros((n, n));
    for j in 0..n {
        let rows = match uplo {
            Uplo::Upper => j.saturating_sub(kd)..j + 1,
            Uplo::Lower => j..(j + kd + 1).min(n),
        };
        for i in rows {
            let v = ab[band_index(uplo, kd, i, j)];
            a[(i, j)] = v;
            a[(j, i)] = v;
        }
    }
    a
}
