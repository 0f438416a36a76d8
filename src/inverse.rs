/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::element::Element;
use crate::error::{self, Result};
use crate::lu::{self, Pivots};
use crate::strided::square_side;

/// Invert a square matrix in place.
///
/// The side length is derived from the buffer length, which must be a
/// perfect square.  The layout of `a` does not matter: the inverse of the
/// transpose is the transpose of the inverse, so a row-major buffer comes
/// back as the row-major inverse and a column-major buffer as the
/// column-major inverse.
///
/// # Errors
///
/// [`LinalgError::FactorizationFailed`] if the matrix is singular, or
/// [`LinalgError::InversionFailed`] if `?getri` rejects the factors.  The
/// contents of `a` are then unspecified.
///
/// # Panics
///
/// Panics if `a.len()` is not a perfect square.  This is checked before
/// anything else happens.
///
/// [`LinalgError::FactorizationFailed`]: crate::error::LinalgError::FactorizationFailed
/// [`LinalgError::InversionFailed`]: crate::error::LinalgError::InversionFailed
pub fn invert<T: Element>(a: &mut [T]) -> Result<()> {
    let n = square_side(a.len());
    if n == 0 {
        return Ok(());
    }

    let pivots = lu::factorize(a, n, n)?;
    let workspace = Workspace::query(a, n, &pivots)?;
    workspace.execute(a, n, &pivots)
}

/// Scratch space for `?getri`, negotiated with the kernel before use.
///
/// `?getri` can only tell us how much scratch it wants by being called with a
/// size sentinel, so inversion is split into [`Workspace::query`] and
/// [`Workspace::execute`].
struct Workspace<T> {
    work: Vec<T>,
}

impl<T: Element> Workspace<T> {
    fn query(a: &mut [T], n: usize, pivots: &Pivots) -> Result<Self> {
        let (info, lwork) = T::getri_query(n, a, n, pivots.as_slice());
        error::check_info::<T>("getri", info, error::inversion_failed)?;

        // never smaller than the documented minimum
        let lwork = usize::max(lwork, n);
        debug!("{}getri: n = {}, workspace = {}", T::PREFIX, n, lwork);
        Ok(Workspace { work: vec![T::zero(); lwork] })
    }

    fn execute(mut self, a: &mut [T], n: usize, pivots: &Pivots) -> Result<()> {
        trace!("{}getri: n = {}, lda = {}", T::PREFIX, n, n);
        let info = T::getri(n, a, n, pivots.as_slice(), &mut self.work);
        error::check_info::<T>("getri", info, error::inversion_failed)
    }
}
