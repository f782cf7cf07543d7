//! Singular value decomposition by one-sided Jacobi rotations

use std::cmp::Ordering;

use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix2, NdFloat};

use crate::{flags::JobSvd, givens::GivensRotation, LinalgError, Result};

/// Maximum number of sweeps over all column pairs
pub const MAX_SWEEPS: usize = 60;

/// Orthogonalizes the columns of the tall matrix `w` in place, returning the accumulated
/// rotations `V` such that the original matrix is `w * V.t`
fn orthogonalize_columns<A: NdFloat>(w: &mut Array2<A>) -> Result<Array2<A>> {
    let n = w.ncols();
    let mut v = Array2::eye(n);
    // Rounding in the column dot products grows with their length
    let tol = A::epsilon() * A::from(w.nrows()).unwrap();
    let two = A::from(2.0).unwrap();

    let mut rotations = 0;
    for _ in 0..MAX_SWEEPS {
        rotations = 0;
        for p in 0..n {
            for q in p + 1..n {
                let (alpha, beta, gamma) = {
                    let (cp, cq) = (w.column(p), w.column(q));
                    (cp.dot(&cp), cq.dot(&cq), cp.dot(&cq))
                };
                if !(gamma.abs() > tol * (alpha * beta).sqrt()) {
                    continue;
                }
                rotations += 1;

                let zeta = (beta - alpha) / (two * gamma);
                let t = zeta.signum() / (zeta.abs() + (A::one() + zeta * zeta).sqrt());
                let c = A::one() / (A::one() + t * t).sqrt();
                // col_p = c * col_p - s * col_q, col_q = s * col_p + c * col_q
                let rot = GivensRotation::new_unchecked(c, -(c * t));
                rot.rotate_columns(&mut w.slice_mut(s![.., p..=q; q - p]))?;
                rot.rotate_columns(&mut v.slice_mut(s![.., p..=q; q - p]))?;
            }
        }
        if rotations == 0 {
            return Ok(v);
        }
    }
    Err(LinalgError::NotConverged { count: rotations })
}

/// Overwrites columns `start..` of `q` so that all its columns are orthonormal, assuming the
/// first `start` already are
fn complete_basis<A: NdFloat>(q: &mut Array2<A>, start: usize) {
    let r = q.nrows();
    for j in start..q.ncols() {
        let mut best: Option<(A, Array1<A>)> = None;
        for k in 0..r {
            let mut cand = Array1::zeros(r);
            cand[k] = A::one();
            // Twice is enough
            for _ in 0..2 {
                for i in 0..j {
                    let qi = q.column(i);
                    let proj = qi.dot(&cand);
                    cand.scaled_add(-proj, &qi);
                }
            }
            let norm = cand.dot(&cand).sqrt();
            if best.as_ref().map_or(true, |(b, _)| norm > *b) {
                best = Some((norm, cand));
            }
        }
        if let Some((norm, cand)) = best {
            q.column_mut(j).assign(&(cand / norm));
        }
    }
}

/// `cols` orthonormal columns, the first `valid` of which come from `basis`
fn extend_basis<A: NdFloat>(basis: &Array2<A>, valid: usize, cols: usize) -> Array2<A> {
    let mut q = Array2::zeros((basis.nrows(), cols));
    q.slice_mut(s![.., ..valid]).assign(&basis.slice(s![.., ..valid]));
    complete_basis(&mut q, valid);
    q
}

fn vector_count(job: JobSvd, full: usize, reduced: usize) -> Option<usize> {
    match job {
        JobSvd::All => Some(full),
        JobSvd::Reduced | JobSvd::Overwrite => Some(reduced),
        JobSvd::Skip => None,
    }
}

/// Computes `A = U * diag(s) * Vt` with the singular values in descending order.
///
/// `jobu` and `jobvt` select how many singular vectors are returned: all of them, or only the
/// first `min(m, n)`. `Overwrite` returns the same vectors as `Reduced`; writing them back into
/// the input is left to the caller.
pub fn svd<A, S>(
    jobu: JobSvd,
    jobvt: JobSvd,
    a: &ArrayBase<S, Ix2>,
) -> Result<(Option<Array2<A>>, Array1<A>, Option<Array2<A>>)>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let (m, n) = a.dim();
    let k = m.min(n);
    let wide = m < n;

    let amax = a.iter().fold(A::zero(), |acc, v| acc.max(v.abs()));
    let mut w = if wide { a.t().to_owned() } else { a.to_owned() };
    if !amax.is_zero() {
        w /= amax;
    }

    let v = orthogonalize_columns(&mut w)?;
    let norms = w.map_axis(Axis(0), |col| col.dot(&col).sqrt());
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&i, &j| norms[j].partial_cmp(&norms[i]).unwrap_or(Ordering::Equal));
    let mut sigma = norms.select(Axis(0), &order);
    let mut left = w.select(Axis(1), &order);
    let right = v.select(Axis(1), &order);

    let tol = sigma.get(0).copied().unwrap_or_else(A::zero)
        * A::epsilon()
        * A::from(m.max(n)).unwrap();
    let rank = sigma.iter().take_while(|&&s| s > tol).count();
    for (mut col, &s) in left.axis_iter_mut(Axis(1)).zip(sigma.iter()).take(rank) {
        col /= s;
    }
    sigma *= amax;

    // `left` spans the longer side
    let ((u_basis, u_valid), (v_basis, v_valid)) = if wide {
        ((right, k), (left, rank))
    } else {
        ((left, rank), (right, k))
    };
    let u = vector_count(jobu, m, k).map(|cols| extend_basis(&u_basis, u_valid, cols));
    let vt = vector_count(jobvt, n, k)
        .map(|cols| extend_basis(&v_basis, v_valid, cols).reversed_axes());
    Ok((u, sigma, vt))
}

/// Singular value decomposition
pub trait SVD {
    type U;
    type Vt;
    type Sigma;

    /// Calculate the reduced singular value decomposition `A = U * diag(s) * Vt`, with the
    /// singular values in descending order. `compute_u` and `compute_vt` decide whether the
    /// respective singular vectors are returned.
    fn svd(
        &self,
        compute_u: bool,
        compute_vt: bool,
    ) -> Result<(Option<Self::U>, Self::Sigma, Option<Self::Vt>)>;

    /// Calculate the singular values only
    fn singular_values(&self) -> Result<Self::Sigma> {
        self.svd(false, false).map(|(_, s, _)| s)
    }
}

impl<A, S> SVD for ArrayBase<S, Ix2>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    type U = Array2<A>;
    type Vt = Array2<A>;
    type Sigma = Array1<A>;

    fn svd(
        &self,
        compute_u: bool,
        compute_vt: bool,
    ) -> Result<(Option<Self::U>, Self::Sigma, Option<Self::Vt>)> {
        let job = |compute| if compute { JobSvd::Reduced } else { JobSvd::Skip };
        svd(job(compute_u), job(compute_vt), self)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    fn check_full(a: &Array2<f64>) {
        let (m, n) = a.dim();
        let (u, s, vt) = svd(JobSvd::All, JobSvd::All, a).unwrap();
        let (u, vt) = (u.unwrap(), vt.unwrap());
        assert_abs_diff_eq!(u.t().dot(&u), Array2::eye(m), epsilon = 1e-12);
        assert_abs_diff_eq!(vt.dot(&vt.t()), Array2::eye(n), epsilon = 1e-12);
        let mut sigma = Array2::zeros((m, n));
        sigma.diag_mut().assign(&s);
        assert_abs_diff_eq!(u.dot(&sigma).dot(&vt), *a, epsilon = 1e-10);
        assert!(s.windows(2).into_iter().all(|w| w[0] >= w[1]));
    }

    #[test]
    fn full() {
        check_full(&array![[3., 2., 2.], [2., 3., -2.]]);
        check_full(&array![[3., 2.], [2., 3.], [2., -2.]]);
        check_full(&array![[1., 2.], [2., 4.], [3., 6.]]);
        check_full(&Array2::zeros((2, 3)));
    }

    #[test]
    fn known_values() {
        let a = array![[3., 2., 2.], [2., 3., -2.]];
        let (_, s, _) = a.svd(false, false).unwrap();
        assert_abs_diff_eq!(s, array![5., 3.], epsilon = 1e-12);
        assert_abs_diff_eq!(a.t().singular_values().unwrap(), s, epsilon = 1e-12);
    }

    #[test]
    fn reduced() {
        let a = array![[1., 0.5], [0., 2.], [4., -1.], [1., 1.]];
        let (u, s, vt) = a.svd(true, true).unwrap();
        let (u, vt) = (u.unwrap(), vt.unwrap());
        assert_eq!(u.dim(), (4, 2));
        assert_eq!(vt.dim(), (2, 2));
        assert_abs_diff_eq!(u.dot(&Array2::from_diag(&s)).dot(&vt), a, epsilon = 1e-12);

        let (u, _, vt) = svd(JobSvd::Overwrite, JobSvd::Skip, &a).unwrap();
        assert_eq!(u.unwrap().dim(), (4, 2));
        assert!(vt.is_none());
    }

    #[test]
    fn wide_large_entries() {
        // Entries of a few hundred in a 3x6 matrix, which left pairs rotating forever under a
        // bare epsilon stopping test
        for seed in 0..20u32 {
            let a = Array2::from_shape_fn((3, 6), |(i, j)| {
                let x = (seed * 7 + i as u32 * 13 + j as u32 * 29) as f64;
                1000. * (x * 0.7548776662).fract() - 500. * (x * 0.5698402910).fract()
            });
            let (u, s, vt) = svd(JobSvd::Reduced, JobSvd::Reduced, &a).unwrap();
            let (u, vt) = (u.unwrap(), vt.unwrap());
            assert_abs_diff_eq!(u.dot(&Array2::from_diag(&s)).dot(&vt), a, epsilon = 1e-8);
            assert_abs_diff_eq!(u.t().dot(&u), Array2::eye(3), epsilon = 1e-10);
        }
    }

    #[test]
    fn empty() {
        let a = Array2::<f64>::zeros((0, 3));
        let (u, s, vt) = svd(JobSvd::All, JobSvd::All, &a).unwrap();
        assert!(s.is_empty());
        assert_eq!(u.unwrap().dim(), (0, 0));
        assert_eq!(vt.unwrap(), Array2::eye(3));
    }
}
