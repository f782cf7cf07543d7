//! Row and column scalings that equilibrate a general matrix

use ndarray::{Array1, ArrayBase, Axis, Data, Ix2, NdFloat};

use crate::{LinalgError, Result};

/// Scale factors making the largest element of every row and column of `diag(r) * A * diag(c)`
/// have magnitude 1
#[derive(Debug, Clone, PartialEq)]
pub struct Equilibration<A> {
    /// Row scale factors
    pub r: Array1<A>,
    /// Column scale factors
    pub c: Array1<A>,
    /// Ratio of the smallest to the largest row scale factor
    pub rowcnd: A,
    /// Ratio of the smallest to the largest column scale factor
    pub colcnd: A,
    /// Largest absolute value of any element of `A`
    pub amax: A,
}

fn min_max<'a, A: NdFloat, I: IntoIterator<Item = &'a A>>(values: I) -> (A, A) {
    values
        .into_iter()
        .fold((A::infinity(), A::zero()), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Computes the equilibration scalings of the `m x n` matrix `a`.
///
/// An exactly zero row `i` (1-based) fails with [`LinalgError::Singular`] at index `i`, and an
/// exactly zero column `j` with index `m + j`. Scale factors are clamped to the range of
/// normalized floats.
pub fn equilibrate<A, S>(a: &ArrayBase<S, Ix2>) -> Result<Equilibration<A>>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let (m, n) = a.dim();
    if m == 0 || n == 0 {
        return Ok(Equilibration {
            r: Array1::zeros(m),
            c: Array1::zeros(n),
            rowcnd: A::one(),
            colcnd: A::one(),
            amax: A::zero(),
        });
    }
    let small = A::min_positive_value();
    let big = A::one() / small;
    let clamp = |v: A| v.max(small).min(big);

    let mut r = a.map_axis(Axis(1), |row| row.fold(A::zero(), |acc, v| acc.max(v.abs())));
    let (rmin, amax) = min_max(&r);
    if rmin.is_zero() {
        let index = r.iter().position(|v| v.is_zero()).unwrap_or(0) + 1;
        return Err(LinalgError::Singular { index });
    }
    r.mapv_inplace(|v| A::one() / clamp(v));
    let rowcnd = rmin.max(small) / amax.min(big);

    let mut c = Array1::zeros(n);
    for (j, col) in a.axis_iter(Axis(1)).enumerate() {
        c[j] = col
            .iter()
            .zip(r.iter())
            .fold(A::zero(), |acc, (v, s)| acc.max(v.abs() * *s));
    }
    let (cmin, cmax) = min_max(&c);
    if cmin.is_zero() {
        let index = c.iter().position(|v| v.is_zero()).unwrap_or(0) + 1;
        return Err(LinalgError::Singular { index: m + index });
    }
    c.mapv_inplace(|v| A::one() / clamp(v));
    let colcnd = cmin.max(small) / cmax.min(big);

    Ok(Equilibration {
        r,
        c,
        rowcnd,
        colcnd,
        amax,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    use super::*;

    #[test]
    fn scalings() {
        let a = array![[4.0f64, 2.], [0.5, -0.25]];
        let eq = equilibrate(&a).unwrap();
        assert_abs_diff_eq!(eq.r, array![0.25, 2.]);
        assert_abs_diff_eq!(eq.c, array![1., 2.]);
        assert_abs_diff_eq!(eq.rowcnd, 0.125);
        assert_abs_diff_eq!(eq.colcnd, 0.5);
        assert_abs_diff_eq!(eq.amax, 4.);

        // Every row and column of the scaled matrix reaches 1
        let scaled = Array2::from_shape_fn((2, 2), |(i, j)| eq.r[i] * a[(i, j)] * eq.c[j]);
        for row in scaled.rows() {
            assert_abs_diff_eq!(row.fold(0., |acc: f64, v| acc.max(v.abs())), 1.);
        }
        for col in scaled.columns() {
            assert_abs_diff_eq!(col.fold(0., |acc: f64, v| acc.max(v.abs())), 1.);
        }
    }

    #[test]
    fn zero_lines() {
        let zero_row = array![[1.0f64, 2.], [0., 0.], [3., 4.]];
        assert_eq!(
            equilibrate(&zero_row),
            Err(LinalgError::Singular { index: 2 })
        );
        let zero_col = array![[1.0f64, 0.], [3., 0.], [2., 0.]];
        assert_eq!(
            equilibrate(&zero_col),
            Err(LinalgError::Singular { index: 5 })
        );
    }

    #[test]
    fn empty() {
        let eq = equilibrate(&Array2::<f64>::zeros((0, 2))).unwrap();
        assert_eq!((eq.rowcnd, eq.colcnd, eq.amax), (1., 1., 0.));
        assert_eq!(eq.c.len(), 2);
    }
}
