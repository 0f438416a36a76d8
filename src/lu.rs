/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! LU factorization with partial pivoting, and the bookkeeping for its pivots.

use crate::element::Element;
use crate::error::{self, Result};
use crate::strided::assert_matrix_len;

/// Row interchanges recorded by an LU factorization.
///
/// Entry `i` (0-based position) holds a **1-based** row index: during
/// elimination, row `i` was swapped with row `pivots[i] - 1`.  The swaps are
/// applied in order, so the entries do not form a permutation on their own;
/// use [`Pivots::to_permutation`] for that.
///
/// The only way to obtain one is from [`factorize`] (or, for reading the
/// factors left behind by a solve, [`crate::solve::solve_general`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(transparent))]
pub struct Pivots(Vec<i32>);

impl Pivots {
    pub(crate) fn from_raw(ipiv: Vec<i32>) -> Self
    { Pivots(ipiv) }

    pub fn as_slice(&self) -> &[i32]
    { &self.0 }

    pub fn len(&self) -> usize
    { self.0.len() }

    pub fn is_empty(&self) -> bool
    { self.0.is_empty() }

    pub fn into_vec(self) -> Vec<i32>
    { self.0 }

    /// The row permutation of an `m`-row matrix.  See [`permutation_from_pivots`].
    pub fn to_permutation(&self, m: usize) -> Vec<usize>
    { permutation_from_pivots(&self.0, m) }
}

impl From<Pivots> for Vec<i32> {
    fn from(pivots: Pivots) -> Vec<i32>
    { pivots.0 }
}

/// Factor the column-major `m x n` matrix `a` as `A = P L U`, in place.
///
/// On success, `a` holds `U` on and above the diagonal and the strictly
/// lower part of the unit-lower `L` below it, and the returned pivots (of
/// length `min(m, n)`) describe `P`.
///
/// `a` must already be column-major; this does not convert layout.  Use
/// [`crate::layout::transpose`] to convert a row-major buffer first.
///
/// # Errors
///
/// [`LinalgError::FactorizationFailed`] if `U` has an exactly zero diagonal
/// entry, at the reported 1-based position.  The contents of `a` are then
/// unspecified.
///
/// [`LinalgError::FactorizationFailed`]: crate::error::LinalgError::FactorizationFailed
pub fn factorize<T: Element>(a: &mut [T], m: usize, n: usize) -> Result<Pivots> {
    assert_matrix_len(a.len(), m, n, "factorize");

    let k = usize::min(m, n);
    if k == 0 {
        // LAPACK would have nothing to do, and is unhappy with size-zero arrays.
        return Ok(Pivots(vec![]));
    }

    trace!("{}getrf: m = {}, n = {}, lda = {}", T::PREFIX, m, n, m);
    let mut ipiv = vec![0; k];
    let info = T::getrf(m, n, a, m, &mut ipiv);
    error::check_info::<T>("getrf", info, error::factorization_failed)?;
    Ok(Pivots(ipiv))
}

/// Replay the row interchanges of an `m`-row factorization.
///
/// Starting from `p = [0, 1, ..., m - 1]`, swaps `p[i]` with `p[pivots[i] - 1]`
/// for each `i` in order.  The result satisfies `A[p[i], :] == (L U)[i, :]`;
/// equivalently, the permutation matrix `P` of `A = P L U` has a one at row
/// `p[i]`, column `i`.
///
/// # Panics
///
/// Panics if there are more pivots than rows, or if a pivot is not in `1..=m`.
pub fn permutation_from_pivots(pivots: &[i32], m: usize) -> Vec<usize> {
    assert!(pivots.len() <= m, "{} pivots for a matrix with {} rows", pivots.len(), m);

    let mut perm: Vec<usize> = (0..m).collect();
    for (i, &pivot) in pivots.iter().enumerate() {
        assert!(
            1 <= pivot && pivot as usize <= m,
            "pivot {} at position {} is not a 1-based row index for {} rows", pivot, i, m,
        );
        perm.swap(i, pivot as usize - 1);
    }
    perm
}

/// The row-major `m x m` permutation matrix with `P[perm[i], i] = 1`.
pub fn permutation_matrix<T: Element>(perm: &[usize]) -> Vec<T> {
    let m = perm.len();
    let mut out = vec![T::zero(); m * m];
    for (col, &row) in perm.iter().enumerate() {
        assert!(row < m, "permutation entry {} out of range for size {}", row, m);
        out[row * m + col] = T::one();
    }
    out
}

/// Split packed factors from [`factorize`] into separate column-major buffers.
///
/// Returns `(L, U)`, where `L` is `m x k` unit-lower-trapezoidal and `U` is
/// `k x n` upper-trapezoidal, with `k = min(m, n)`.
pub fn unpack_lu<T: Element>(a: &[T], m: usize, n: usize) -> (Vec<T>, Vec<T>) {
    assert_matrix_len(a.len(), m, n, "unpack_lu");
    let k = usize::min(m, n);

    let mut l = vec![T::zero(); m * k];
    for j in 0..k {
        l[j * m + j] = T::one();
        for i in j + 1..m {
            l[j * m + i] = a[j * m + i];
        }
    }

    let mut u = vec![T::zero(); k * n];
    for j in 0..n {
        for i in 0..usize::min(j + 1, k) {
            u[j * k + i] = a[j * m + i];
        }
    }
    (l, u)
}
