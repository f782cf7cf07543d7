//! Enumerated arguments of the LAPACK calling convention and their ABI codes.
//!
//! Each flag maps to the single character LAPACK expects (or, for [`Layout`], the LAPACKE
//! integer constant). Raw codes parse case-insensitively, like LAPACK's own `lsame`.

use std::{convert::TryFrom, ffi::c_char};

use thiserror::Error;

/// Raw flag code that doesn't name any value of the flag
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Invalid {kind} code {code:?}")]
pub struct ParseFlagError {
    pub kind: &'static str,
    pub code: char,
}

macro_rules! char_flag {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal $(| $alias:literal)*,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value of the flag, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Character code passed across the ABI
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn as_c_char(self) -> c_char {
                self.code() as c_char
            }

            /// Parse a raw character code
            pub fn from_code(code: u8) -> Result<Self, ParseFlagError> {
                match code.to_ascii_uppercase() {
                    $($code $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(ParseFlagError {
                        kind: $kind,
                        code: code as char,
                    }),
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = ParseFlagError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                Self::from_code(code)
            }
        }

        impl TryFrom<char> for $name {
            type Error = ParseFlagError;

            fn try_from(code: char) -> Result<Self, Self::Error> {
                if code.is_ascii() {
                    Self::from_code(code as u8)
                } else {
                    Err(ParseFlagError { kind: $kind, code })
                }
            }
        }

        impl From<$name> for char {
            fn from(flag: $name) -> char {
                flag.code() as char
            }
        }
    };
}

char_flag! {
    /// Which triangle of a matrix is referenced
    Uplo, "uplo" {
        Upper = b'U',
        Lower = b'L',
    }
}

char_flag! {
    /// Operator applied to a matrix operand
    Transpose, "trans" {
        No = b'N',
        Trans = b'T',
        /// Conjugate transpose, identical to `Trans` for real matrices
        Conj = b'C',
    }
}

char_flag! {
    /// Side from which an operator is applied
    Side, "side" {
        Left = b'L',
        Right = b'R',
    }
}

char_flag! {
    /// Whether a triangular matrix has an implicit unit diagonal
    Diag, "diag" {
        NonUnit = b'N',
        Unit = b'U',
    }
}

char_flag! {
    /// Job code of the eigensolvers
    JobEig, "jobz" {
        /// Eigenvalues only
        ValuesOnly = b'N',
        /// Eigenvalues and eigenvectors
        Vectors = b'V',
    }
}

char_flag! {
    /// Job code of `gesvd` for each set of singular vectors
    JobSvd, "job" {
        /// Full square matrix of singular vectors
        All = b'A',
        /// The first `min(m, n)` singular vectors
        Reduced = b'S',
        /// Overwrite the input matrix with the first `min(m, n)` singular vectors
        Overwrite = b'O',
        /// No singular vectors
        Skip = b'N',
    }
}

char_flag! {
    /// Matrix norm selector
    NormType, "norm" {
        /// Largest absolute value
        Max = b'M',
        /// Maximum column sum
        One = b'1' | b'O',
        /// Maximum row sum
        Infinity = b'I',
        /// Frobenius norm
        Frobenius = b'F' | b'E',
    }
}

impl Uplo {
    /// The other triangle, which is what a transposed view of the matrix references
    pub fn flip(self) -> Self {
        match self {
            Uplo::Upper => Uplo::Lower,
            Uplo::Lower => Uplo::Upper,
        }
    }
}

impl Transpose {
    /// Whether the operand is (conjugate) transposed
    pub fn is_trans(self) -> bool {
        !matches!(self, Transpose::No)
    }

    /// The opposite operator, with `Conj` treated as `Trans`
    pub fn flip(self) -> Self {
        if self.is_trans() {
            Transpose::No
        } else {
            Transpose::Trans
        }
    }
}

/// Storage order of a dense matrix in a flat buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Elements of a row are contiguous
    RowMajor,
    /// Elements of a column are contiguous
    #[default]
    ColMajor,
}

impl Layout {
    /// `LAPACK_ROW_MAJOR` and `LAPACK_COL_MAJOR`
    pub fn code(self) -> i32 {
        match self {
            Layout::RowMajor => 101,
            Layout::ColMajor => 102,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, ParseFlagError> {
        match code {
            101 => Ok(Layout::RowMajor),
            102 => Ok(Layout::ColMajor),
            _ => Err(ParseFlagError {
                kind: "layout",
                code: '?',
            }),
        }
    }

    /// Smallest valid leading dimension for a `rows x cols` matrix
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
        .max(1)
    }

    /// Offset of element `(i, j)` in a buffer with leading dimension `ld`
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }
}
