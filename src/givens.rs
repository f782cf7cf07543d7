use ndarray::{ArrayBase, DataMut, Ix2, NdFloat};

use crate::{index::*, LinalgError, Result};

/// A plane rotation acting on a pair of columns
#[derive(Debug, Clone)]
pub struct GivensRotation<A> {
    c: A,
    s: A,
}

impl<A: NdFloat> GivensRotation<A> {
    /// Rotation with the given cosine and sine, which must satisfy `c^2 + s^2 = 1`
    pub fn new_unchecked(c: A, s: A) -> Self {
        Self { c, s }
    }

    /// Performs `cols = cols * [[c, -s], [s, c]]` in place, where `cols` has exactly two columns
    pub fn rotate_columns<S>(&self, cols: &mut ArrayBase<S, Ix2>) -> Result<()>
    where
        S: DataMut<Elem = A>,
    {
        if cols.ncols() != 2 {
            return Err(LinalgError::WrongColumns {
                expected: 2,
                actual: cols.ncols(),
            });
        }
        let (c, s) = (self.c, self.s);
        for i in 0..cols.nrows() {
            unsafe {
                let x = *cols.at((i, 0));
                let y = *cols.at((i, 1));
                *cols.atm((i, 0)) = c * x + s * y;
                *cols.atm((i, 1)) = c * y - s * x;
            }
        }
        Ok(())
    }
}
