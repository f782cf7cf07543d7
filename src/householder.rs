//! Householder reflectors in the compact representation used by `geqrf`.
//!
//! A factorization stores reflector `i` below the diagonal of column `i`, with its implicit
//! leading 1 on the diagonal, and the scalar factor in `tau[i]`. `Q = H(0) * H(1) * ... *
//! H(k - 1)`.

use ndarray::{s, ArrayBase, Data, DataMut, Ix1, Ix2, NdFloat};

use crate::{
    flags::{Side, Transpose},
    reflection::Reflector,
};

/// Generates a reflector `H` such that `H * x = [beta, 0, ..., 0]`.
///
/// On return `x[0]` holds `beta`, the tail of `x` holds the tail of the reflector vector, and the
/// returned value is `tau`. If the tail of `x` is already zero, `tau` is 0 and `H` is the
/// identity.
pub fn generate<A: NdFloat, S: DataMut<Elem = A>>(x: &mut ArrayBase<S, Ix1>) -> A {
    let n = x.len();
    if n <= 1 {
        return A::zero();
    }
    let alpha = x[0];
    let mut tail = x.slice_mut(s![1..]);
    let xnorm = tail.dot(&tail).sqrt();
    if xnorm.is_zero() {
        return A::zero();
    }

    let norm = alpha.hypot(xnorm);
    let beta = if alpha >= A::zero() { -norm } else { norm };
    let tau = (beta - alpha) / beta;
    tail /= alpha - beta;
    x[0] = beta;
    tau
}

/// Unblocked QR factorization in place. `tau` must hold at least `min(m, n)` elements.
pub fn qr_compact<A, S, T>(a: &mut ArrayBase<S, Ix2>, tau: &mut ArrayBase<T, Ix1>)
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    T: DataMut<Elem = A>,
{
    let (m, n) = a.dim();
    for i in 0..m.min(n) {
        let (mut col, mut rest) = a.multi_slice_mut((s![i.., i], s![i.., i + 1..]));
        tau[i] = generate(&mut col);
        Reflector::new(col.view(), tau[i]).apply_left(&mut rest);
    }
}

/// Overwrites the `m x n` matrix `a` (`m >= n >= k`) holding `k` reflectors with the first `n`
/// columns of `Q`.
pub fn generate_q<A, S, T>(a: &mut ArrayBase<S, Ix2>, k: usize, tau: &ArrayBase<T, Ix1>)
where
    A: NdFloat,
    S: DataMut<Elem = A>,
    T: Data<Elem = A>,
{
    let (m, n) = a.dim();
    debug_assert!(m >= n && n >= k);

    for j in k..n {
        a.column_mut(j).fill(A::zero());
        a[(j, j)] = A::one();
    }

    for i in (0..k).rev() {
        let (col, mut rest) = a.multi_slice_mut((s![i.., i], s![i.., i + 1..]));
        Reflector::new(col.view(), tau[i]).apply_left(&mut rest);

        let mut col = a.slice_mut(s![.., i]);
        col.slice_mut(s![i + 1..]).mapv_inplace(|v| -tau[i] * v);
        col[i] = A::one() - tau[i];
        col.slice_mut(s![..i]).fill(A::zero());
    }
}

/// Applies `Q` or `Q.t`, described by the `k` reflectors stored in the columns of `v`, to `c`
/// from the given side.
///
/// `v` must have as many rows as `c` has rows (left side) or columns (right side).
pub fn apply_q<A, V, T, C>(
    side: Side,
    trans: Transpose,
    v: &ArrayBase<V, Ix2>,
    tau: &ArrayBase<T, Ix1>,
    c: &mut ArrayBase<C, Ix2>,
) where
    A: NdFloat,
    V: Data<Elem = A>,
    T: Data<Elem = A>,
    C: DataMut<Elem = A>,
{
    let k = v.ncols().min(tau.len());
    // Q = H(0) ... H(k-1), so Q * C applies the last reflector first
    let forward = matches!(
        (side, trans.is_trans()),
        (Side::Left, true) | (Side::Right, false)
    );
    let order: Box<dyn Iterator<Item = usize>> = if forward {
        Box::new(0..k)
    } else {
        Box::new((0..k).rev())
    };

    for i in order {
        let refl = Reflector::new(v.slice(s![i.., i]), tau[i]);
        match side {
            Side::Left => refl.apply_left(&mut c.slice_mut(s![i.., ..])),
            Side::Right => refl.apply_right(&mut c.slice_mut(s![.., i..])),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2, Axis};

    use super::*;

    #[test]
    fn householder() {
        let mut x = array![3.0f64, 4.];
        let tau = generate(&mut x);
        assert_abs_diff_eq!(x[0], -5.0, epsilon = 1e-12);
        // H = I - tau * v * v.t with v = [1, x[1]]
        let v = array![1., x[1]];
        let outer = v
            .clone()
            .insert_axis(Axis(1))
            .dot(&v.insert_axis(Axis(0)));
        let h = Array2::<f64>::eye(2) - outer * tau;
        assert_abs_diff_eq!(h.dot(&array![3., 4.]), array![-5., 0.], epsilon = 1e-12);
        assert_abs_diff_eq!(h.dot(&h.t()), Array2::eye(2), epsilon = 1e-12);

        let mut x = array![-2.0f64, 0., 0.];
        assert_eq!(generate(&mut x), 0.);
        assert_eq!(x, array![-2., 0., 0.]);

        let mut x = array![7.0f64];
        assert_eq!(generate(&mut x), 0.);
    }

    #[test]
    fn qr_and_q() {
        let orig = array![[3.2f64, 1.3], [4.4, 5.2], [1.3, 6.7]];
        let mut a = orig.clone();
        let mut tau = Array1::zeros(2);
        qr_compact(&mut a, &mut tau);

        let mut r = a.slice(s![..2, ..]).to_owned();
        r[(1, 0)] = 0.;
        let mut q = a.clone();
        generate_q(&mut q, 2, &tau);

        assert_abs_diff_eq!(q.t().dot(&q), Array2::eye(2), epsilon = 1e-12);
        assert_abs_diff_eq!(q.dot(&r), orig, epsilon = 1e-12);
        assert_abs_diff_eq!(r[(0, 0)].abs(), 5.594, epsilon = 1e-3);

        // Applying Q.t from the left reproduces R on top
        let mut c = orig.clone();
        apply_q(Side::Left, Transpose::Trans, &a, &tau, &mut c);
        assert_abs_diff_eq!(c.slice(s![..2, ..]), r, epsilon = 1e-12);
        assert_abs_diff_eq!(c.slice(s![2.., ..]), Array2::zeros((1, 2)), epsilon = 1e-12);

        // Right-side application agrees with the explicit product
        let mut full = Array2::zeros((3, 3));
        full.slice_mut(s![.., ..2]).assign(&a);
        let mut qfull = full.clone();
        generate_q(&mut qfull, 2, &tau);
        let b = array![[1., 2., 3.], [4., 5., 6.]];
        let mut c = b.clone();
        apply_q(Side::Right, Transpose::No, &a, &tau, &mut c);
        assert_abs_diff_eq!(c, b.dot(&qfull), epsilon = 1e-12);
        let mut c = b.clone();
        apply_q(Side::Right, Transpose::Trans, &a, &tau, &mut c);
        assert_abs_diff_eq!(c, b.dot(&qfull.t()), epsilon = 1e-12);
    }
}
