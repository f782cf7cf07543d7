//! Element access for the scalar loops of the kernels.
//!
//! The index is checked with a debug assertion only, so callers must derive it from the
//! dimensions of the array they are indexing.

use ndarray::{ArrayBase, Data, DataMut, Dimension, NdIndex};

pub(crate) trait UncheckedIndex<I> {
    type Elem;
    unsafe fn at(&self, index: I) -> &Self::Elem;
}

pub(crate) trait UncheckedIndexMut<I> {
    type Elem;
    unsafe fn atm(&mut self, index: I) -> &mut Self::Elem;
}

impl<A, S, D, I> UncheckedIndex<I> for ArrayBase<S, D>
where
    S: Data<Elem = A>,
    D: Dimension,
    I: NdIndex<D> + Copy,
{
    type Elem = A;

    unsafe fn at(&self, index: I) -> &A {
        debug_assert!(self.get(index).is_some(), "{:?} out of bounds", index);
        self.uget(index)
    }
}

impl<A, S, D, I> UncheckedIndexMut<I> for ArrayBase<S, D>
where
    S: DataMut<Elem = A>,
    D: Dimension,
    I: NdIndex<D> + Copy,
{
    type Elem = A;

    unsafe fn atm(&mut self, index: I) -> &mut A {
        debug_assert!(self.get(index).is_some(), "{:?} out of bounds", index);
        self.uget_mut(index)
    }
}
