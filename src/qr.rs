//! QR decomposition and linear least squares

use ndarray::{prelude::*, Data, DataMut, OwnedRepr, RawDataClone};

use crate::{
    flags::{Diag, Side, Transpose, Uplo},
    householder,
    triangular::solve_triangular,
    LinalgError, Result,
};

/// Compact QR factorization in place: `R` ends up on and above the diagonal and the reflectors
/// below it, with their scalar factors in `tau` (at least `min(m, n)` long).
pub fn factorize<A, S, T>(a: &mut ArrayBase<S, Ix2>, tau: &mut ArrayBase<T, Ix1>) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    T: DataMut<Elem = A>,
{
    let k = a.nrows().min(a.ncols());
    if tau.len() < k {
        return Err(LinalgError::WrongRows {
            expected: k,
            actual: tau.len(),
        });
    }
    householder::qr_compact(a, tau);
    Ok(())
}

/// Overwrites the `m x n` matrix holding `k` reflectors (`m >= n >= k`) with the first `n`
/// columns of `Q`
pub fn generate_q<A, S, T>(
    a: &mut ArrayBase<S, Ix2>,
    k: usize,
    tau: &ArrayBase<T, Ix1>,
) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    T: Data<Elem = A>,
{
    let (m, n) = a.dim();
    if n > m {
        return Err(LinalgError::WrongColumns {
            expected: m,
            actual: n,
        });
    }
    if k > n || tau.len() < k {
        return Err(LinalgError::WrongRows {
            expected: k,
            actual: tau.len().min(n),
        });
    }
    householder::generate_q(a, k, tau);
    Ok(())
}

/// Applies `op(Q)` from the given side to `c`, where `Q` is described by the `k` reflectors in
/// the columns of `v`
pub fn apply_q<A, V, T, C>(
    side: Side,
    trans: Transpose,
    v: &ArrayBase<V, Ix2>,
    k: usize,
    tau: &ArrayBase<T, Ix1>,
    c: &mut ArrayBase<C, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    V: Data<Elem = A>,
    T: Data<Elem = A>,
    C: DataMut<Elem = A>,
{
    let nq = match side {
        Side::Left => c.nrows(),
        Side::Right => c.ncols(),
    };
    if v.nrows() != nq {
        return Err(LinalgError::WrongRows {
            expected: nq,
            actual: v.nrows(),
        });
    }
    if k > nq || k > v.ncols() || tau.len() < k {
        return Err(LinalgError::WrongColumns {
            expected: k,
            actual: v.ncols().min(tau.len()),
        });
    }
    householder::apply_q(side, trans, &v.slice(s![.., ..k]), tau, c);
    Ok(())
}

/// Solves the overdetermined or underdetermined system `op(A) * X = B` in place.
///
/// With `op(A)` of dimension `p x q`, `B` must have at least `max(p, q)` rows. When `p >= q` the
/// least squares solution is returned in the first `q` rows of `B`; otherwise the minimum norm
/// solution is returned in the first `q` rows. `A` is overwritten by its QR factorization (of
/// `op(A)` or of its transpose).
///
/// Fails with [`LinalgError::Singular`] when `A` isn't of full rank.
pub fn least_squares<A, S, Sb>(
    trans: Transpose,
    a: &mut ArrayBase<S, Ix2>,
    b: &mut ArrayBase<Sb, Ix2>,
) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    Sb: DataMut<Elem = A>,
{
    let op = if trans.is_trans() {
        a.view_mut().reversed_axes()
    } else {
        a.view_mut()
    };
    let (p, q) = op.dim();
    if b.nrows() < p.max(q) {
        return Err(LinalgError::WrongRows {
            expected: p.max(q),
            actual: b.nrows(),
        });
    }
    let k = p.min(q);
    let mut tau = Array1::zeros(k);

    if p >= q {
        // op(A) = Q * R, X = inv(R) * Q.t * B
        let mut op = op;
        householder::qr_compact(&mut op, &mut tau);
        householder::apply_q(
            Side::Left,
            Transpose::Trans,
            &op,
            &tau,
            &mut b.slice_mut(s![..p, ..]),
        );
        solve_triangular(
            Uplo::Upper,
            Transpose::No,
            Diag::NonUnit,
            &op.slice(s![..k, ..k]),
            &mut b.slice_mut(s![..k, ..]),
        )
    } else {
        // op(A).t = Q * R, so op(A) = R.t * Q.t and X = Q * [inv(R.t) * B; 0]
        let mut opt = op.reversed_axes();
        householder::qr_compact(&mut opt, &mut tau);
        solve_triangular(
            Uplo::Upper,
            Transpose::Trans,
            Diag::NonUnit,
            &opt.slice(s![..k, ..k]),
            &mut b.slice_mut(s![..k, ..]),
        )?;
        b.slice_mut(s![k..q, ..]).fill(A::zero());
        householder::apply_q(
            Side::Left,
            Transpose::No,
            &opt,
            &tau,
            &mut b.slice_mut(s![..q, ..]),
        );
        Ok(())
    }
}

pub trait QRInto {
    type Decomp;

    fn qr_into(self) -> Result<Self::Decomp>;
}

impl<A: NdFloat, S: DataMut<Elem = A>> QRInto for ArrayBase<S, Ix2> {
    type Decomp = QRDecomp<A, S>;

    fn qr_into(mut self) -> Result<Self::Decomp> {
        let mut tau = Array1::zeros(self.nrows().min(self.ncols()));
        factorize(&mut self, &mut tau)?;
        Ok(QRDecomp { qr: self, tau })
    }
}

pub trait QR {
    type Decomp;

    fn qr(&self) -> Result<Self::Decomp>;
}

impl<A: NdFloat, S: Data<Elem = A>> QR for ArrayBase<S, Ix2> {
    type Decomp = QRDecomp<A, OwnedRepr<A>>;

    fn qr(&self) -> Result<Self::Decomp> {
        self.to_owned().qr_into()
    }
}

/// QR decomposition in compact form
#[derive(Debug)]
pub struct QRDecomp<A, S: DataMut<Elem = A>> {
    qr: ArrayBase<S, Ix2>,
    // min(rows, cols) scalar factors of the reflectors
    tau: Array1<A>,
}

impl<A: Clone, S: DataMut<Elem = A> + RawDataClone> Clone for QRDecomp<A, S> {
    fn clone(&self) -> Self {
        Self {
            qr: self.qr.clone(),
            tau: self.tau.clone(),
        }
    }
}

impl<A: NdFloat, S: DataMut<Elem = A>> QRDecomp<A, S> {
    /// The compact factorization and the reflector factors, as `geqrf` returns them
    pub fn compact(&self) -> (ArrayView2<A>, ArrayView1<A>) {
        (self.qr.view(), self.tau.view())
    }

    /// `Q` with `min(rows, cols)` orthonormal columns
    pub fn q(&self) -> Array2<A> {
        let (m, n) = self.qr.dim();
        let k = m.min(n);
        let mut q = self.qr.slice(s![.., ..k]).to_owned();
        householder::generate_q(&mut q, k, &self.tau);
        q
    }

    /// The `min(rows, cols) x cols` upper trapezoidal factor
    pub fn r(&self) -> Array2<A> {
        let k = self.tau.len();
        let mut r = self.qr.slice(s![..k, ..]).to_owned();
        for ((i, j), v) in r.indexed_iter_mut() {
            if j < i {
                *v = A::zero();
            }
        }
        r
    }

    pub fn into_decomp(self) -> (Array2<A>, Array2<A>) {
        (self.q(), self.r())
    }

    /// Least squares solution of `self * x = b` for a matrix with at least as many rows as
    /// columns
    pub fn solve<Si: Data<Elem = A>>(&self, b: &ArrayBase<Si, Ix2>) -> Result<Array2<A>> {
        let (m, n) = self.qr.dim();
        if m < n {
            return Err(LinalgError::WrongRows {
                expected: n,
                actual: m,
            });
        }
        if b.nrows() != m {
            return Err(LinalgError::WrongRows {
                expected: m,
                actual: b.nrows(),
            });
        }
        let mut b = b.to_owned();
        householder::apply_q(Side::Left, Transpose::Trans, &self.qr, &self.tau, &mut b);
        let mut x = b.slice_move(s![..n, ..]);
        solve_triangular(
            Uplo::Upper,
            Transpose::No,
            Diag::NonUnit,
            &self.qr.slice(s![..n, ..n]),
            &mut x,
        )?;
        Ok(x)
    }
}
