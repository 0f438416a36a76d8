/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Linear solves, `A X = B`, for dense and tridiagonal `A`.
//!
//! Every matrix here is column-major, including the right-hand sides: `B` is
//! `n x nrhs` with leading dimension `n`, so each right-hand side occupies a
//! contiguous run of `n` elements.  A single right-hand side is therefore
//! just a vector of length `n`.

use crate::element::Element;
use crate::error::{self, Result};
use crate::lu::Pivots;
use crate::strided::{assert_leading_dim, square_side};

/// Check the shape of `B` against `n` rows, returning `(nrhs, ldb)`.
fn rhs_dims(b_len: usize, n: usize, what: &str) -> (usize, usize) {
    assert!(n >= 1, "{}: empty coefficient matrix", what);
    assert_eq!(b_len % n, 0, "{}: length {} of B is not a multiple of n = {}", what, b_len, n);

    let ldb = n;
    let nrhs = b_len / n;
    assert!(nrhs >= 1, "{}: no right-hand sides", what);
    assert_leading_dim(ldb, n, what);
    assert_eq!(ldb * nrhs, b_len);
    (nrhs, ldb)
}

/// Solve `A X = B` for a square column-major `A`, overwriting `B` with `X`.
///
/// This mutates **both** arguments.  On success, `a` holds the LU factors of
/// `A` (in the format of [`crate::lu::factorize`]) and the returned pivots
/// go with them, so further systems with the same `A` can reuse the
/// factorization.  Use [`solve_general_copied`] to leave `a` untouched.
///
/// `n` is derived from `a.len()`, and the number of right-hand sides from
/// `b.len() / n`.
///
/// # Errors
///
/// [`LinalgError::SolveFailed`] if `A` is singular.  The contents of both
/// buffers are then unspecified.
///
/// # Panics
///
/// Panics before touching any data if `a` is empty or not square, or if
/// `b.len()` is not a positive multiple of `n`.
///
/// [`LinalgError::SolveFailed`]: crate::error::LinalgError::SolveFailed
pub fn solve_general<T: Element>(a: &mut [T], b: &mut [T]) -> Result<Pivots> {
    let n = square_side(a.len());
    let (nrhs, ldb) = rhs_dims(b.len(), n, "solve_general");

    trace!("{}gesv: n = {}, nrhs = {}, lda = {}, ldb = {}", T::PREFIX, n, nrhs, n, ldb);
    let mut ipiv = vec![0; n];
    let info = T::gesv(n, nrhs, a, n, &mut ipiv, b, ldb);
    error::check_info::<T>("gesv", info, error::solve_failed)?;
    Ok(Pivots::from_raw(ipiv))
}

/// Solve `A X = B` like [`solve_general`], but factor a copy of `a`.
///
/// Only `b` is mutated.
pub fn solve_general_copied<T: Element>(a: &[T], b: &mut [T]) -> Result<()> {
    let mut a = a.to_vec();
    solve_general(&mut a, b).map(drop)
}

/// Solve a tridiagonal system `A X = B`, overwriting `B` with `X`.
///
/// `A` is given by its diagonal (`n` elements) and its sub- and
/// super-diagonals (`n - 1` elements each).  `B` is column-major `n x nrhs`.
///
/// All three diagonals are used as scratch by the elimination and hold
/// meaningless values afterwards.
///
/// # Errors
///
/// [`LinalgError::SolveFailed`] if a zero pivot is met, i.e. the system is
/// singular.  The contents of all buffers are then unspecified.
///
/// # Panics
///
/// Panics before touching any data if `diag` is empty, if the off-diagonals
/// are not one element shorter than `diag`, or if `b.len() != n * nrhs`.
///
/// [`LinalgError::SolveFailed`]: crate::error::LinalgError::SolveFailed
pub fn solve_tridiagonal<T: Element>(
    diag: &mut [T],
    nrhs: usize,
    subdiag: &mut [T],
    superdiag: &mut [T],
    b: &mut [T],
) -> Result<()> {
    let n = diag.len();
    assert!(n >= 1, "solve_tridiagonal: empty diagonal");
    assert_eq!(subdiag.len(), n - 1, "solve_tridiagonal: subdiagonal length");
    assert_eq!(superdiag.len(), n - 1, "solve_tridiagonal: superdiagonal length");
    assert!(nrhs >= 1, "solve_tridiagonal: no right-hand sides");

    let ldb = n;
    assert_leading_dim(ldb, n, "solve_tridiagonal");
    assert_eq!(
        ldb.checked_mul(nrhs), Some(b.len()),
        "solve_tridiagonal: B must be {} x {}", n, nrhs,
    );

    trace!("{}gtsv: n = {}, nrhs = {}, ldb = {}", T::PREFIX, n, nrhs, ldb);
    let info = T::gtsv(n, nrhs, subdiag, diag, superdiag, b, ldb);
    error::check_info::<T>("gtsv", info, error::solve_failed)
}
