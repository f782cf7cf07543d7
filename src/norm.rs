//! Norm of vectors and matrices

use ndarray::{prelude::*, Data};

use crate::{
    flags::{NormType, Uplo},
    storage::symmetric_from_triangle,
};

/// Updates the scaled sum of squares `scale^2 * sumsq` with the squares of `values`, without
/// overflowing or underflowing on the way
pub fn sum_squares<'a, A, I>(values: I, mut scale: A, mut sumsq: A) -> (A, A)
where
    A: NdFloat,
    I: IntoIterator<Item = &'a A>,
{
    for &v in values {
        if v.is_zero() {
            continue;
        }
        let a = v.abs();
        if a.is_infinite() {
            // Keeps a second infinity from turning the sum into inf / inf
            if !sumsq.is_nan() {
                sumsq = A::one();
            }
            scale = a;
        } else if scale < a {
            let r = scale / a;
            sumsq = A::one() + sumsq * r * r;
            scale = a;
        } else {
            let r = a / scale;
            sumsq += r * r;
        }
    }
    (scale, sumsq)
}

fn max_abs<'a, A: NdFloat, I: IntoIterator<Item = &'a A>>(values: I) -> A {
    values.into_iter().fold(A::zero(), |acc, &v| {
        let v = v.abs();
        // NaN wins
        if v > acc || v.is_nan() {
            v
        } else {
            acc
        }
    })
}

/// Define norm as a metric linear space, treating the whole matrix as one big vector.
pub trait Norm {
    type Output;

    /// L-1 norm
    fn norm_l1(&self) -> Self::Output;
    /// L-2 norm
    fn norm_l2(&self) -> Self::Output;
    /// Maximum norm (L-infinite)
    fn norm_max(&self) -> Self::Output;
}

impl<A, S, D> Norm for ArrayBase<S, D>
where
    A: NdFloat + std::iter::Sum,
    S: Data<Elem = A>,
    D: Dimension,
{
    type Output = A;

    fn norm_l1(&self) -> Self::Output {
        self.iter().map(|x| x.abs()).sum()
    }

    fn norm_l2(&self) -> Self::Output {
        let (scale, sumsq) = sum_squares(self.iter(), A::zero(), A::one());
        scale * sumsq.sqrt()
    }

    fn norm_max(&self) -> Self::Output {
        max_abs(self.iter())
    }
}

/// Norm of a general matrix, zero if it is empty
pub fn general<A, S>(norm: NormType, a: &ArrayBase<S, Ix2>) -> A
where
    A: NdFloat + std::iter::Sum,
    S: Data<Elem = A>,
{
    match norm {
        NormType::Max => a.norm_max(),
        NormType::One => max_abs(&a.map_axis(Axis(0), |col| col.norm_l1())),
        NormType::Infinity => max_abs(&a.map_axis(Axis(1), |row| row.norm_l1())),
        NormType::Frobenius => a.norm_l2(),
    }
}

/// Norm of the symmetric matrix stored in the `uplo` triangle of `a`. One and infinity norms
/// coincide.
pub fn symmetric<A, S>(norm: NormType, uplo: Uplo, a: &ArrayBase<S, Ix2>) -> A
where
    A: NdFloat + std::iter::Sum,
    S: Data<Elem = A>,
{
    general(norm, &symmetric_from_triangle(uplo, a))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn norms() {
        let a = array![[1.0f64, -3.], [2., -8.]];
        assert_abs_diff_eq!(a.norm_l1(), 14.);
        assert_abs_diff_eq!(a.norm_l2(), 78.0f64.sqrt());
        assert_abs_diff_eq!(a.norm_max(), 8.);
    }

    #[test]
    fn matrix_norms() {
        let a = array![[1.0f64, -3., 0.5], [2., -8., 0.]];
        assert_abs_diff_eq!(general(NormType::Max, &a), 8.);
        assert_abs_diff_eq!(general(NormType::One, &a), 11.);
        assert_abs_diff_eq!(general(NormType::Infinity, &a), 10.);
        assert_abs_diff_eq!(general(NormType::Frobenius, &a), 78.25f64.sqrt());
        assert_eq!(general(NormType::One, &Array2::<f64>::zeros((0, 3))), 0.);

        let s = array![[1.0f64, -3.], [100., -8.]];
        assert_abs_diff_eq!(symmetric(NormType::One, Uplo::Upper, &s), 11.);
        assert_abs_diff_eq!(symmetric(NormType::Infinity, Uplo::Lower, &s), 108.);
    }

    #[test]
    fn no_overflow() {
        let big = array![3e200f64, 4e200];
        assert_abs_diff_eq!(big.norm_l2(), 5e200, epsilon = 1e187);
        let tiny = array![3e-200f64, 4e-200];
        assert_abs_diff_eq!(tiny.norm_l2() * 1e200, 5., epsilon = 1e-12);
    }

    #[test]
    fn infinite_entries() {
        let a = array![[f64::INFINITY, 1.], [f64::NEG_INFINITY, 2.]];
        assert_eq!(general(NormType::Frobenius, &a), f64::INFINITY);
        assert_eq!(a.norm_l2(), f64::INFINITY);
        let with_nan = array![f64::INFINITY, f64::NAN, f64::INFINITY];
        assert!(with_nan.norm_l2().is_nan());
    }

    #[test]
    fn nan_propagates() {
        let a = array![[1.0f64, f64::NAN], [2., 3.]];
        assert!(general(NormType::Max, &a).is_nan());
        assert!(general(NormType::One, &a).is_nan());
    }
}
