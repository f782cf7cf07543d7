#![allow(unused)]

use std::ops::RangeInclusive;

use linfa_lapack::Layout;
use ndarray::prelude::*;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

pub const FLOAT_RANGE: RangeInclusive<f64> = -1000.0..=1000.0;
pub const DIM_RANGE: RangeInclusive<usize> = 1..=10;

/// Memory order of a generated array, so kernels see non-standard strides
#[derive(Debug, Arbitrary)]
struct Strides {
    invert_rows: bool,
    invert_cols: bool,
    transpose: bool,
}

impl Strides {
    fn apply(&self, mut arr: Array2<f64>) -> Array2<f64> {
        if self.invert_rows {
            arr.invert_axis(Axis(0));
        }
        if self.invert_cols {
            arr.invert_axis(Axis(1));
        }
        if self.transpose {
            arr.reversed_axes()
        } else {
            arr
        }
    }
}

prop_compose! {
    pub fn square_arr()(dim in DIM_RANGE)
        (data in prop::collection::vec(FLOAT_RANGE, dim*dim), dim in Just(dim), strides in any::<Strides>()) -> Array2<f64> {
        strides.apply(Array2::from_shape_vec((dim, dim), data).unwrap())
    }
}

prop_compose! {
    pub fn rect_arr()(rows in DIM_RANGE, cols in DIM_RANGE)
        (data in prop::collection::vec(FLOAT_RANGE, rows*cols), rows in Just(rows), cols in Just(cols), strides in any::<Strides>()) -> Array2<f64> {
        strides.apply(Array2::from_shape_vec((rows, cols), data).unwrap())
    }
}

fn to_symm(arr: &mut Array2<f64>) {
    let n = arr.nrows();
    for i in 0..n {
        for j in 0..i {
            arr[(i, j)] = arr[(j, i)];
        }
    }
}

prop_compose! {
    pub fn symm_arr()(mut arr in square_arr()) -> Array2<f64> {
        to_symm(&mut arr);
        arr
    }
}

prop_compose! {
    /// Symmetric positive definite, `A.t * A + I`
    pub fn spd_arr()(arr in square_arr()) -> Array2<f64> {
        let mut mul = arr.t().dot(&arr);
        mul.diag_mut().map_inplace(|v| *v += 1.0);
        mul
    }
}

/// Square matrix from `arr` together with a solution `x` of matching row count
pub fn system_of_arr(
    arr: impl Strategy<Value = Array2<f64>>,
) -> impl Strategy<Value = (Array2<f64>, Array2<f64>)> {
    arr.prop_flat_map(|a| {
        let rows = a.nrows();
        (Just(a), 1..=3usize).prop_flat_map(move |(a, cols)| {
            prop::collection::vec(FLOAT_RANGE, rows * cols).prop_map(move |data| {
                (a.clone(), Array2::from_shape_vec((rows, cols), data).unwrap())
            })
        })
    })
}

pub fn layout() -> impl Strategy<Value = Layout> {
    prop_oneof![Just(Layout::RowMajor), Just(Layout::ColMajor)]
}

/// Writes `arr` into a flat buffer with `pad` extra elements per leading dimension, returning
/// the buffer and its leading dimension. Padding is filled with NaN so any stray read shows up.
pub fn to_buffer(layout: Layout, arr: &Array2<f64>, pad: usize) -> (Vec<f64>, i32) {
    let (rows, cols) = arr.dim();
    let ld = layout.leading_dim(rows, cols) + pad;
    let len = match layout {
        Layout::RowMajor => rows * ld,
        Layout::ColMajor => cols * ld,
    };
    let mut buf = vec![f64::NAN; len];
    for ((i, j), &v) in arr.indexed_iter() {
        buf[layout.index(i, j, ld)] = v;
    }
    (buf, ld as i32)
}

/// Reads a `rows x cols` matrix back out of a flat buffer
pub fn from_buffer(layout: Layout, rows: usize, cols: usize, buf: &[f64], ld: i32) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| buf[layout.index(i, j, ld as usize)])
}
