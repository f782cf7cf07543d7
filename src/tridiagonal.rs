//! Tridiagonal decomposition of symmetric matrices

use ndarray::{s, Array1, Array2, ArrayBase, Data, Ix2, NdFloat};

use crate::{
    check_square, flags::Uplo, householder, reflection::Reflector,
    storage::symmetric_from_triangle, Result,
};

/// Reduction of a symmetric matrix to tridiagonal form, `A = Q * T * Q.t`
#[derive(Debug, Clone)]
pub struct SymmetricTridiagonalDecomp<A> {
    // reflector `i` lives below the subdiagonal of column `i`
    reflectors: Array2<A>,
    tau: Array1<A>,
    diagonal: Array1<A>,
    off_diagonal: Array1<A>,
}

/// Computes the tridiagonal decomposition of the symmetric matrix whose `uplo` triangle is stored
/// in `a`
pub fn sym_tridiagonal<A, S>(
    uplo: Uplo,
    a: &ArrayBase<S, Ix2>,
) -> Result<SymmetricTridiagonalDecomp<A>>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let n = check_square(a)?;
    let mut work = symmetric_from_triangle(uplo, a);
    let mut tau = Array1::zeros(n.saturating_sub(1));
    let mut off_diagonal = Array1::zeros(n.saturating_sub(1));

    for i in 0..n.saturating_sub(2) {
        let (mut col, mut trailing) =
            work.multi_slice_mut((s![i + 1.., i], s![i + 1.., i + 1..]));
        tau[i] = householder::generate(&mut col);
        off_diagonal[i] = col[0];
        let refl = Reflector::new(col.view(), tau[i]);
        refl.apply_left(&mut trailing);
        refl.apply_right(&mut trailing);
    }
    if n >= 2 {
        off_diagonal[n - 2] = work[(n - 1, n - 2)];
    }

    Ok(SymmetricTridiagonalDecomp {
        diagonal: work.diag().to_owned(),
        reflectors: work,
        tau,
        off_diagonal,
    })
}

impl<A: NdFloat> SymmetricTridiagonalDecomp<A> {
    /// Generates the orthogonal matrix `Q`
    pub fn generate_q(&self) -> Array2<A> {
        let n = self.reflectors.nrows();
        let mut q = Array2::eye(n);
        for i in (0..n.saturating_sub(2)).rev() {
            let refl = Reflector::new(self.reflectors.slice(s![i + 1.., i]), self.tau[i]);
            refl.apply_left(&mut q.slice_mut(s![i + 1.., i + 1..]));
        }
        q
    }

    /// Returns the diagonal and off-diagonal elements of `T`
    pub fn into_diagonals(self) -> (Array1<A>, Array1<A>) {
        (self.diagonal, self.off_diagonal)
    }

    /// Returns the tridiagonal matrix `T`
    pub fn into_tridiag_matrix(self) -> Array2<A> {
        let n = self.diagonal.len();
        let mut t = Array2::from_diag(&self.diagonal);
        for i in 0..n.saturating_sub(1) {
            t[(i, i + 1)] = self.off_diagonal[i];
            t[(i + 1, i)] = self.off_diagonal[i];
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn tridiagonal() {
        let arr = array![
            [4.0f64, 1., -2., 2.],
            [1., 2., 0., 1.],
            [-2., 0., 3., -2.],
            [2., 1., -2., -1.]
        ];
        for uplo in [Uplo::Upper, Uplo::Lower] {
            let decomp = sym_tridiagonal(uplo, &arr).unwrap();
            let q = decomp.generate_q();
            let t = decomp.into_tridiag_matrix();
            assert_abs_diff_eq!(q.dot(&q.t()), Array2::eye(4), epsilon = 1e-12);
            assert_abs_diff_eq!(q.dot(&t).dot(&q.t()), arr, epsilon = 1e-12);
        }
    }

    #[test]
    fn small() {
        let one = array![[3.0f64]];
        let decomp = sym_tridiagonal(Uplo::Lower, &one).unwrap();
        assert_eq!(decomp.generate_q(), array![[1.]]);
        assert_eq!(decomp.into_diagonals(), (array![3.], array![]));

        let two = array![[1.0f64, 5.], [5., 2.]];
        let (d, e) = sym_tridiagonal(Uplo::Upper, &two).unwrap().into_diagonals();
        assert_eq!(d, array![1., 2.]);
        assert_eq!(e, array![5.]);

        let empty = Array2::<f64>::zeros((0, 0));
        assert_eq!(sym_tridiagonal(Uplo::Upper, &empty).unwrap().generate_q().dim(), (0, 0));
    }
}
