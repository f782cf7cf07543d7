//! The integer status code every LAPACK routine reports

use std::fmt;

use thiserror::Error;

use crate::LinalgError;

/// Status code of a routine call.
///
/// * `0`: success
/// * `-i`: the `i`-th argument (1-based, the layout being the first) had an illegal value
/// * `i > 0`: routine-specific failure, such as an exactly singular pivot or a failed
///   convergence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Info(i32);

/// Detailed failure carried by a nonzero [`Info`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InfoError {
    #[error("Argument {index} had an illegal value")]
    IllegalArgument { index: usize },
    #[error("Routine failed with info = {info}")]
    Failed { info: usize },
}

impl Info {
    pub const SUCCESS: Info = Info(0);

    pub fn new(code: i32) -> Self {
        Info(code)
    }

    pub fn illegal_argument(index: usize) -> Self {
        Info(-(index as i32))
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    pub fn into_result(self) -> Result<(), InfoError> {
        match self.0 {
            0 => Ok(()),
            i if i < 0 => Err(InfoError::IllegalArgument {
                index: i.unsigned_abs() as usize,
            }),
            i => Err(InfoError::Failed { info: i as usize }),
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "info = {}", self.0)
    }
}

/// Every nonzero code collapses to `false`.
impl From<Info> for bool {
    fn from(info: Info) -> bool {
        info.is_success()
    }
}

impl From<LinalgError> for Info {
    fn from(err: LinalgError) -> Info {
        match err {
            LinalgError::IllegalArgument { index } => Info::illegal_argument(index),
            LinalgError::Singular { index } => Info(index as i32),
            LinalgError::NotPositiveDefinite { order } => Info(order as i32),
            LinalgError::NotConverged { count } => Info(count as i32),
            // Shape mismatches can only come from the argument that carries the dimensions
            LinalgError::NotSquare { .. }
            | LinalgError::WrongRows { .. }
            | LinalgError::WrongColumns { .. } => {
                Info::illegal_argument(1)
            }
        }
    }
}

impl From<crate::Result<()>> for Info {
    fn from(res: crate::Result<()>) -> Info {
        match res {
            Ok(()) => Info::SUCCESS,
            Err(err) => err.into(),
        }
    }
}
