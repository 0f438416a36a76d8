/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Level-1 operations on strided subsequences of a single buffer.
//!
//! These do not care about matrix layout.

use crate::element::Element;
use crate::strided::Strided;

/// `x[i] *= alpha` for every selected element.
///
/// Does nothing (and does not call the kernel) when the selection is empty.
pub fn scale<T: Element>(buf: &mut [T], alpha: T, sel: Strided) {
    let n = sel.resolve(buf.len(), "scale");
    if n == 0 {
        return;
    }
    trace!("{}scal: n = {}, inc = {}, offset = {}", T::PREFIX, n, sel.get_inc(), sel.get_offset());
    T::scal(n, alpha, &mut buf[sel.get_offset()..], sel.get_inc());
}

/// `x[i] = alpha` for every selected element.
///
/// Does nothing when the selection is empty.
pub fn fill<T: Element>(buf: &mut [T], alpha: T, sel: Strided) {
    let n = sel.resolve(buf.len(), "fill");
    if n == 0 {
        return;
    }
    T::set(n, alpha, &mut buf[sel.get_offset()..], sel.get_inc());
}

/// `y := alpha * x + beta * y` over the selected elements.
///
/// `x` is only read.  Both selections must describe the same number of
/// elements.
pub fn affine_combine<T: Element>(
    x: &[T], alpha: T,
    y: &mut [T], beta: T,
    sel_x: Strided,
    sel_y: Strided,
) {
    let n = sel_x.resolve(x.len(), "affine_combine (x)");
    let n_y = sel_y.resolve(y.len(), "affine_combine (y)");
    assert_eq!(n, n_y, "affine_combine: x selects {} elements but y selects {}", n, n_y);
    if n == 0 {
        return;
    }
    trace!("{}axpby: n = {}, incx = {}, incy = {}", T::PREFIX, n, sel_x.get_inc(), sel_y.get_inc());
    T::axpby(
        n,
        alpha, &x[sel_x.get_offset()..], sel_x.get_inc(),
        beta, &mut y[sel_y.get_offset()..], sel_y.get_inc(),
    );
}

/// Evaluate a polynomial at every element of `x`.
///
/// `coeffs` are ordered from the highest power down to the constant term,
/// so `[a, b, c]` is `a x^2 + b x + c`.  An empty coefficient list is the
/// zero polynomial.
pub fn polyval<T: Element>(coeffs: &[T], x: &[T]) -> Vec<T> {
    x.iter().map(|&x| {
        coeffs.iter().fold(T::zero(), |acc, &c| acc * x + c)
    }).collect()
}
