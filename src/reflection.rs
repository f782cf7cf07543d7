use ndarray::{ArrayBase, Data, DataMut, Ix1, Ix2, NdFloat};

/// Elementary reflector `H = I - tau * v * v.t`, where the first component of `v` is an
/// implicit 1.
///
/// The stored first component is never read, so `v` can be a column of a compact factorization
/// whose first slot holds an element of `R`.
pub struct Reflector<A, D: Data<Elem = A>> {
    v: ArrayBase<D, Ix1>,
    tau: A,
}

impl<A: NdFloat, D: Data<Elem = A>> Reflector<A, D> {
    pub fn new(v: ArrayBase<D, Ix1>, tau: A) -> Self {
        Self { v, tau }
    }

    /// `v.t * x`, honoring the implicit leading 1
    fn project<S: Data<Elem = A>>(&self, x: &ArrayBase<S, Ix1>) -> A {
        let n = self.v.len();
        let tail = self.v.slice(ndarray::s![1..n]);
        x[0] + tail.dot(&x.slice(ndarray::s![1..n]))
    }

    /// Performs `C = H * C` in place. `C` must have as many rows as `v` has elements.
    pub fn apply_left<M: DataMut<Elem = A>>(&self, c: &mut ArrayBase<M, Ix2>) {
        if self.tau.is_zero() || self.v.is_empty() {
            return;
        }
        let n = self.v.len();
        for mut col in c.columns_mut() {
            let w = self.project(&col) * self.tau;
            col[0] -= w;
            col.slice_mut(ndarray::s![1..n])
                .scaled_add(-w, &self.v.slice(ndarray::s![1..n]));
        }
    }

    /// Performs `C = C * H` in place. `C` must have as many columns as `v` has elements.
    pub fn apply_right<M: DataMut<Elem = A>>(&self, c: &mut ArrayBase<M, Ix2>) {
        if self.tau.is_zero() || self.v.is_empty() {
            return;
        }
        let n = self.v.len();
        for mut row in c.rows_mut() {
            let w = self.project(&row) * self.tau;
            row[0] -= w;
            row.slice_mut(ndarray::s![1..n])
                .scaled_add(-w, &self.v.slice(ndarray::s![1..n]));
        }
    }
}
