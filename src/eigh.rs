//! Eigendecomposition of symmetric matrices.
//!
//! The matrix is first reduced to tridiagonal form, then diagonalized by the implicit QL
//! algorithm with Wilkinson shifts. Eigenvalues are returned in ascending order.

use ndarray::{s, Array1, Array2, ArrayBase, ArrayViewMut2, Data, DataMut, Ix1, Ix2, NdFloat};

use crate::{
    flags::{JobEig, Uplo},
    givens::GivensRotation,
    tridiagonal::sym_tridiagonal,
    LinalgError, Result,
};

/// Total number of QL sweeps allowed per eigenvalue
pub const MAX_SWEEPS_PER_EIGENVALUE: usize = 30;

/// Computes the wilkinson shift, i.e., the eigenvalue of the 2x2 symmetric matrix closest to its
/// trailing component `tnn`.
///
/// The inputs are interpreted as the 2x2 matrix:
///     tmm  tmn
///     tmn  tnn
fn wilkinson_shift<A: NdFloat>(tmm: A, tnn: A, tmn: A) -> A {
    let tmn_sq = tmn * tmn;
    if !tmn_sq.is_zero() {
        let d = (tmm - tnn) * A::from(0.5).unwrap();
        tnn - tmn_sq / (d + d.signum() * (d * d + tmn_sq).sqrt())
    } else {
        tnn
    }
}

fn implicit_ql<A, S>(
    d: &mut ArrayBase<S, Ix1>,
    off: &mut Array1<A>,
    z: &mut Option<ArrayViewMut2<A>>,
) -> Result<()>
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    let n = d.len();
    let eps = A::epsilon();
    let max_sweeps = MAX_SWEEPS_PER_EIGENVALUE * n;
    let mut sweeps = 0;

    for l in 0..n {
        loop {
            // Split off the unreduced block starting at `l`. `off[n - 1]` is always zero, and NaN
            // never splits.
            let mut m = l;
            while m + 1 < n && !(off[m].abs() <= eps * (d[m].abs() + d[m + 1].abs())) {
                m += 1;
            }
            if m == l {
                break;
            }

            if sweeps == max_sweeps {
                let count = off.iter().filter(|v| !v.is_zero()).count();
                return Err(LinalgError::NotConverged { count });
            }
            sweeps += 1;

            let shift = wilkinson_shift(d[l + 1], d[l], off[l]);
            let mut g = d[m] - shift;
            let (mut sn, mut cs, mut p) = (A::one(), A::one(), A::zero());
            let mut deflated = false;

            for i in (l..m).rev() {
                let f = sn * off[i];
                let b = cs * off[i];
                let r = f.hypot(g);
                off[i + 1] = r;
                if r.is_zero() {
                    // Underflow, the block splits at `i + 1`
                    d[i + 1] -= p;
                    off[m] = A::zero();
                    deflated = true;
                    break;
                }
                sn = f / r;
                cs = g / r;
                g = d[i + 1] - p;
                let r = (d[i] - g) * sn + A::from(2.0).unwrap() * cs * b;
                p = sn * r;
                d[i + 1] = g + p;
                g = cs * r - b;

                if let Some(z) = z.as_mut() {
                    GivensRotation::new_unchecked(cs, -sn)
                        .rotate_columns(&mut z.slice_mut(s![.., i..i + 2]))?;
                }
            }
            if !deflated {
                d[l] -= p;
                off[l] = g;
                off[m] = A::zero();
            }
        }
    }
    Ok(())
}

fn sort_ascending<A, S>(d: &mut ArrayBase<S, Ix1>, z: &mut Option<ArrayViewMut2<A>>)
where
    A: NdFloat,
    S: DataMut<Elem = A>,
{
    let n = d.len();
    for i in 0..n {
        let k = (i..n).fold(i, |k, j| if d[j] < d[k] { j } else { k });
        if k != i {
            d.swap(i, k);
            if let Some(z) = z.as_mut() {
                for r in 0..z.nrows() {
                    z.swap((r, i), (r, k));
                }
            }
        }
    }
}

/// Diagonalizes the symmetric tridiagonal matrix with diagonal `d` and off-diagonal `e`.
///
/// On success `d` holds the eigenvalues in ascending order. `e` needs at least `n - 1` elements
/// and is destroyed; when the iteration fails to converge it holds the off-diagonal of the
/// partially reduced matrix. If `z` is given, it is postmultiplied by the orthogonal matrix of
/// eigenvectors, so passing the identity yields the eigenvectors of the tridiagonal matrix.
pub fn tridiagonal_eig<A, Sd, Se>(
    d: &mut ArrayBase<Sd, Ix1>,
    e: &mut ArrayBase<Se, Ix1>,
    mut z: Option<ArrayViewMut2<A>>,
) -> Result<()>
where
    A: NdFloat,
    Sd: DataMut<Elem = A>,
    Se: DataMut<Elem = A>,
{
    let n = d.len();
    if n == 0 {
        return Ok(());
    }
    if e.len() + 1 < n {
        return Err(LinalgError::WrongRows {
            expected: n - 1,
            actual: e.len(),
        });
    }
    if let Some(z) = &z {
        if z.ncols() != n {
            return Err(LinalgError::WrongColumns {
                expected: n,
                actual: z.ncols(),
            });
        }
    }

    let mut off = Array1::zeros(n);
    off.slice_mut(s![..n - 1]).assign(&e.slice(s![..n - 1]));
    let res = implicit_ql(d, &mut off, &mut z);
    e.slice_mut(s![..n - 1]).assign(&off.slice(s![..n - 1]));
    res?;

    sort_ascending(d, &mut z);
    Ok(())
}

/// Eigenvalues in ascending order of the symmetric matrix stored in the `uplo` triangle of `a`,
/// with the matching orthonormal eigenvectors as columns if `jobz` asks for them
pub fn eigh<A, S>(
    jobz: JobEig,
    uplo: Uplo,
    a: &ArrayBase<S, Ix2>,
) -> Result<(Array1<A>, Option<Array2<A>>)>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let decomp = sym_tridiagonal(uplo, a)?;
    let mut q = (jobz == JobEig::Vectors).then(|| decomp.generate_q());
    let (mut d, mut e) = decomp.into_diagonals();
    tridiagonal_eig(&mut d, &mut e, q.as_mut().map(|q| q.view_mut()))?;
    Ok((d, q))
}

/// Eigendecomposition of symmetric matrices, consuming the original. Only the lower triangle is
/// read.
pub trait EighInto: Sized {
    type EigVal;
    type EigVec;

    /// Calculate eigenvalues and eigenvectors of symmetric matrices, consuming the original
    fn eigh_into(self) -> Result<(Self::EigVal, Self::EigVec)>;

    /// Calculate only the eigenvalues, consuming the original
    fn eigvalsh_into(self) -> Result<Self::EigVal>;
}

impl<A, S> EighInto for ArrayBase<S, Ix2>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    type EigVal = Array1<A>;
    type EigVec = Array2<A>;

    fn eigh_into(self) -> Result<(Self::EigVal, Self::EigVec)> {
        let (vals, vecs) = eigh(JobEig::Vectors, Uplo::Lower, &self)?;
        Ok((vals, vecs.unwrap_or_else(|| Array2::zeros((0, 0)))))
    }

    fn eigvalsh_into(self) -> Result<Self::EigVal> {
        eigh(JobEig::ValuesOnly, Uplo::Lower, &self).map(|(vals, _)| vals)
    }
}

/// Eigendecomposition of symmetric matrices. Only the lower triangle is read.
pub trait Eigh {
    type EigVal;
    type EigVec;

    /// Calculate eigenvalues and eigenvectors of symmetric matrices
    fn eigh(&self) -> Result<(Self::EigVal, Self::EigVec)>;

    /// Calculate only the eigenvalues
    fn eigvalsh(&self) -> Result<Self::EigVal>;
}

impl<A, S> Eigh for ArrayBase<S, Ix2>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    type EigVal = Array1<A>;
    type EigVec = Array2<A>;

    fn eigh(&self) -> Result<(Self::EigVal, Self::EigVec)> {
        self.view().eigh_into()
    }

    fn eigvalsh(&self) -> Result<Self::EigVal> {
        self.view().eigvalsh_into()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Axis};

    use super::*;

    #[test]
    fn symmetric() {
        let arr = array![[3.0f64, 1., 0.], [1., 3., 1.], [0., 1., 3.]];
        let (vals, vecs) = arr.eigh().unwrap();
        let r2 = 2.0f64.sqrt();
        assert_abs_diff_eq!(vals, array![3. - r2, 3., 3. + r2], epsilon = 1e-12);
        assert_abs_diff_eq!(vecs.t().dot(&vecs), Array2::eye(3), epsilon = 1e-12);
        for (i, v) in vecs.axis_iter(Axis(1)).enumerate() {
            assert_abs_diff_eq!(arr.dot(&v), &v * vals[i], epsilon = 1e-12);
        }
        assert_abs_diff_eq!(arr.eigvalsh().unwrap(), vals, epsilon = 1e-12);

        // The upper triangle alone describes the same matrix
        let mut upper = arr.clone();
        upper[(2, 0)] = 100.;
        let (up_vals, up_vecs) = eigh(JobEig::ValuesOnly, Uplo::Upper, &upper).unwrap();
        assert!(up_vecs.is_none());
        assert_abs_diff_eq!(up_vals, vals, epsilon = 1e-12);
    }

    #[test]
    fn tridiagonal() {
        // Eigenvalues of the second difference matrix are 2 - 2 cos(k pi / (n + 1))
        let n = 6;
        let mut d = Array1::from_elem(n, 2.0f64);
        let mut e = Array1::from_elem(n - 1, -1.0f64);
        let mut z = Array2::eye(n);
        tridiagonal_eig(&mut d, &mut e, Some(z.view_mut())).unwrap();
        let expected = Array1::from_shape_fn(n, |k| {
            2. - 2. * ((k + 1) as f64 * std::f64::consts::PI / (n + 1) as f64).cos()
        });
        assert_abs_diff_eq!(d, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(z.t().dot(&z), Array2::eye(n), epsilon = 1e-12);
    }

    #[test]
    fn diagonal_is_sorted() {
        let mut d = array![3.0f64, -1., 2.];
        let mut e = array![0.0f64, 0.];
        let mut z = Array2::eye(3);
        tridiagonal_eig(&mut d, &mut e, Some(z.view_mut())).unwrap();
        assert_eq!(d, array![-1., 2., 3.]);
        assert_eq!(z, array![[0., 0., 1.], [1., 0., 0.], [0., 1., 0.]]);
    }

    #[test]
    fn corner_cases() {
        let empty = Array2::<f64>::zeros((0, 0));
        let (vals, vecs) = empty.eigh().unwrap();
        assert!(vals.is_empty());
        assert_eq!(vecs.dim(), (0, 0));

        let one = array![[-4.0f64]];
        assert_eq!(one.eigh().unwrap(), (array![-4.], array![[1.]]));

        assert!(matches!(
            array![[1., 2., 3.]].eigh(),
            Err(LinalgError::NotSquare { rows: 1, cols: 3 })
        ));
    }

    #[test]
    fn not_converged() {
        let mut d = array![f64::NAN, 1.];
        let mut e = array![1.0f64];
        assert_eq!(
            tridiagonal_eig(&mut d, &mut e, None),
            Err(LinalgError::NotConverged { count: 1 })
        );
    }
}
