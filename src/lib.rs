/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense linear algebra on flat buffers, backed by BLAS and LAPACK.
//!
//! Matrices are plain slices with their dimensions passed alongside.  By
//! convention callers keep them **row-major**; the factorization and solve
//! routines require **column-major** input, which is obtained from a
//! row-major buffer with [`transpose`].  [`invert`] works in either layout.
//!
//! ```ignore
//! use flat_linalg::{transpose, factorize, solve_general_copied};
//!
//! let a_rows = vec![1.0, 2.0, 3.0, 4.0];           // [[1, 2], [3, 4]]
//! let a_cols = transpose(&a_rows, 2, 2);
//!
//! let mut b = vec![5.0, 11.0];
//! solve_general_copied(&a_cols, &mut b)?;          // b == [1, 2]
//!
//! let mut lu = a_cols.clone();
//! let pivots = factorize(&mut lu, 2, 2)?;
//! let perm = pivots.to_permutation(2);             // A = P L U
//! ```
//!
//! Two kinds of failure are distinguished:
//!
//! * Contract violations (mismatched dimensions, out-of-range strides or
//!   offsets, non-square input to [`invert`]) are bugs in the caller.  They
//!   panic, and are always detected before any data is touched.
//! * Numeric failures reported by the kernels (singular matrices) are
//!   returned as [`LinalgError`].
//!
//! Everything is generic over [`Element`], which is implemented for `f32`
//! and `f64`.

extern crate blas_src;
extern crate lapack_src;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate flat_linalg_assert_close;

pub mod element;
pub mod error;
pub mod strided;
pub mod vector;
pub mod layout;
pub mod lu;
pub mod inverse;
pub mod solve;

pub use crate::element::Element;
pub use crate::error::{LinalgError, Result};
pub use crate::strided::{Strided, square_side};
pub use crate::vector::{scale, fill, affine_combine, polyval};
pub use crate::layout::{ramp, ramp_range, transpose, multiply};
pub use crate::lu::{Pivots, factorize, permutation_from_pivots, permutation_matrix, unpack_lu};
pub use crate::inverse::invert;
pub use crate::solve::{solve_general, solve_general_copied, solve_tridiagonal};
