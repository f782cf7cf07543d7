use approx::assert_abs_diff_eq;
use ndarray::prelude::*;
use proptest::prelude::*;

use linfa_lapack::{
    cholesky::{self, *},
    triangular::*,
    LinalgError, Uplo,
};

mod common;

prop_compose! {
    fn semi_pd_arr()
        (arr in common::square_arr()) -> Array2<f64> {
        arr.t().dot(&arr)
    }
}

fn run_cholesky_test(orig: Array2<f64>) {
    let chol = orig.cholesky().unwrap();
    assert_abs_diff_eq!(chol.dot(&chol.t()), orig, epsilon = 1e-7);
    assert!(chol.is_triangular(Uplo::Lower));

    let mut a = orig.clone();
    let dirty = a.cholesky_inplace_dirty().unwrap();
    assert_abs_diff_eq!(
        chol,
        dirty.triangular_inplace(Uplo::Lower).unwrap(),
        epsilon = 1e-7
    );

    // The upper factor is the transpose of the lower one
    let mut upper = orig.clone();
    cholesky::factorize(Uplo::Upper, &mut upper).unwrap();
    let upper = upper.into_triangular(Uplo::Upper).unwrap();
    assert_abs_diff_eq!(upper, chol.t(), epsilon = 1e-7);
}

fn run_solve_test(a: Array2<f64>, x: Array2<f64>) {
    for uplo in [Uplo::Upper, Uplo::Lower] {
        let mut f = a.clone();
        cholesky::factorize(uplo, &mut f).unwrap();
        let mut b = a.dot(&x);
        cholesky::solve(uplo, &f, &mut b).unwrap();
        assert_abs_diff_eq!(b, x, epsilon = 1e-5);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]
    #[test]
    fn cholesky_test(arr in common::spd_arr()) {
        run_cholesky_test(arr)
    }

    #[test]
    fn cholesky_test_semi_pd(arr in semi_pd_arr()) {
        // Semi-definite matrices may fail, but never with anything but a pivot
        match arr.cholesky() {
            Ok(chol) => assert_abs_diff_eq!(chol.dot(&chol.t()), arr, epsilon = 1e-5),
            Err(err) => {
                let pivot_failure = matches!(err, LinalgError::NotPositiveDefinite { .. });
                prop_assert!(pivot_failure, "unexpected error {:?}", err);
            }
        }
    }

    #[test]
    fn solve_test((a, x) in common::system_of_arr(common::spd_arr())) {
        run_solve_test(a, x)
    }
}

#[test]
fn cholesky_f32() {
    let arr = array![[25f32, 15., -5.], [15., 18., 0.], [-5., 0., 11.]];
    let lower = array![[5.0, 0.0, 0.0], [3.0, 3.0, 0.0], [-1., 1., 3.]];

    let chol = arr.cholesky().unwrap();
    assert_abs_diff_eq!(chol, lower, epsilon = 1e-7);
    assert_abs_diff_eq!(chol.dot(&chol.t()), arr, epsilon = 1e-7);
}

#[test]
fn not_positive_definite() {
    let arr = array![[1., 2.], [2., 1.]];
    assert_eq!(
        arr.cholesky(),
        Err(LinalgError::NotPositiveDefinite { order: 2 })
    );
}
