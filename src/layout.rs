/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Matrix construction and layout conversion.
//!
//! Callers keep matrices in row-major order.  LAPACK wants column-major
//! order, and the conversion between the two is exactly [`transpose`]:
//! the row-major buffer of an `m x n` matrix, read as column-major, is the
//! `n x m` transpose.  So to hand a row-major `A` to `lu::factorize`, pass
//! `transpose(&a, m, n)`; to read a column-major result back, transpose it
//! with the dimensions swapped.

use crate::element::Element;
use crate::strided::assert_matrix_len;

/// A buffer of length `n` with `out[i] = start + i * step`.
pub fn ramp<T: Element>(start: T, step: T, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); n];
    if n > 0 {
        T::ramp(start, step, &mut out, 1, n);
    }
    out
}

/// The ramp from `start` towards `stop` (exclusive) in increments of `step`.
///
/// The length is `ceil(|stop - start| / |step|)`.  `step` may be negative
/// for descending ramps.
///
/// # Panics
///
/// Panics if `step` is zero or points away from `stop`, or if any argument
/// is not finite.
pub fn ramp_range<T: Element>(start: T, stop: T, step: T) -> Vec<T> {
    assert!(
        start.is_finite() && stop.is_finite() && step.is_finite(),
        "ramp_range: non-finite arguments ({}, {}, {})", start, stop, step,
    );
    if start == stop {
        return vec![];
    }
    assert!(step != T::zero(), "ramp_range: zero step");
    assert!(
        (stop - start).signum() == step.signum(),
        "ramp_range: step {} does not lead from {} to {}", step, start, stop,
    );

    let n = ((stop - start) / step).abs().ceil();
    let n = n.to_usize().unwrap_or_else(|| panic!("ramp_range: length {} is too large", n));
    ramp(start, step, n)
}

/// Transpose of a row-major `m x n` matrix, as a new row-major `n x m` buffer.
///
/// An empty input is returned as an empty buffer without calling the kernel.
pub fn transpose<T: Element>(a: &[T], m: usize, n: usize) -> Vec<T> {
    assert_matrix_len(a.len(), m, n, "transpose");
    if a.is_empty() {
        return vec![];
    }

    let mut out = vec![T::zero(); a.len()];
    T::transpose(a, 1, &mut out, 1, m, n);
    out
}

/// Product of a row-major `m x p` matrix `a` and a row-major `p x n` matrix `b`,
/// as a new row-major `m x n` buffer.
///
/// When the product is empty (`m == 0` or `n == 0`) an empty buffer is
/// returned without calling the kernel.  When only the inner dimension `p`
/// is zero the product is the `m x n` zero matrix.
pub fn multiply<T: Element>(a: &[T], b: &[T], m: usize, n: usize, p: usize) -> Vec<T> {
    assert_matrix_len(a.len(), m, p, "multiply (a)");
    assert_matrix_len(b.len(), p, n, "multiply (b)");
    if m == 0 || n == 0 {
        return vec![];
    }

    let mut c = vec![T::zero(); m * n];
    if p == 0 {
        return c;
    }

    trace!("{}gemm: ({} x {}) * ({} x {})", T::PREFIX, m, p, p, n);
    T::gemm(m, n, p, a, p, b, n, &mut c, n);
    c
}
