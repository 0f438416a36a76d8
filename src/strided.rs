/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Strides, offsets and the dimension checks shared by every operation.
//!
//! All of the checks in this module are contract checks.  A violation is a
//! bug in the caller, so they panic, and they always run before any data is
//! handed to the kernels provider.

/// Selects a strided subsequence of a buffer.
///
/// The selected elements are `buf[offset + i * inc]` for `i < count`.
/// When no count is given, it is derived from the buffer length so that the
/// selection runs to the end of the buffer.
///
/// ```ignore
/// // every other element, starting at the second
/// Strided::new().offset(1).inc(2)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strided {
    count: Option<usize>,
    inc: usize,
    offset: usize,
}

impl Default for Strided {
    fn default() -> Self
    { Strided { count: None, inc: 1, offset: 0 } }
}

impl Strided {
    /// Every element of the buffer.
    pub fn new() -> Self
    { Default::default() }

    pub fn count(self, count: usize) -> Self
    { Strided { count: Some(count), ..self } }

    pub fn inc(self, inc: usize) -> Self
    { Strided { inc, ..self } }

    pub fn offset(self, offset: usize) -> Self
    { Strided { offset, ..self } }

    pub fn get_inc(&self) -> usize
    { self.inc }

    pub fn get_offset(&self) -> usize
    { self.offset }

    /// Validate against a buffer of length `len` and return the element count.
    ///
    /// # Panics
    ///
    /// Panics if `inc == 0`, if the offset lies outside the buffer (an offset
    /// of zero into an empty buffer is allowed), or if the last selected
    /// element would lie past the end of the buffer.
    pub fn resolve(&self, len: usize, what: &str) -> usize {
        let Strided { count, inc, offset } = *self;
        assert!(inc >= 1, "{}: stride must be at least 1", what);
        if len == 0 {
            assert_eq!(offset, 0, "{}: nonzero offset into an empty buffer", what);
            assert!(count.unwrap_or(0) == 0, "{}: nonzero count for an empty buffer", what);
            return 0;
        }
        assert!(offset < len, "{}: offset {} out of bounds for length {}", what, offset, len);

        let n = count.unwrap_or_else(|| (len - offset + inc - 1) / inc);
        if n > 0 {
            let last = (n - 1).checked_mul(inc).and_then(|x| x.checked_add(offset));
            assert!(
                last.map_or(false, |last| last < len),
                "{}: {} elements with stride {} from offset {} overrun length {}",
                what, n, inc, offset, len,
            );
        }
        n
    }
}

/// Side length of a square matrix stored in a buffer of length `len`.
///
/// # Panics
///
/// Panics unless `len` is a perfect square.
pub fn square_side(len: usize) -> usize {
    let mut n = (len as f64).sqrt().round() as usize;
    // correct for rounding of very large lengths
    while n.saturating_mul(n) > len { n -= 1; }
    while (n + 1).saturating_mul(n + 1) <= len { n += 1; }
    assert_eq!(n * n, len, "buffer of length {} is not a square matrix", len);
    n
}

/// Checks `len == rows * cols`.
pub(crate) fn assert_matrix_len(len: usize, rows: usize, cols: usize, what: &str) {
    let expected = rows.checked_mul(cols);
    assert!(
        expected == Some(len),
        "{}: buffer of length {} cannot hold a {} x {} matrix", what, len, rows, cols,
    );
}

/// Checks `ld >= max(1, rows)`.
pub(crate) fn assert_leading_dim(ld: usize, rows: usize, what: &str) {
    assert!(
        ld >= usize::max(1, rows),
        "{}: leading dimension {} is smaller than max(1, {})", what, ld, rows,
    );
}
