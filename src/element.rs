/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Per-precision binding to the numerical kernels provider.
//!
//! Everything in this crate is written once against [`Element`], and the
//! trait is implemented for exactly two types, `f32` and `f64`, whose methods
//! forward to `cblas` and `lapacke`.  Kernels that BLAS/LAPACK do not offer
//! (constant fill, ramps, out-of-place transpose) are provided as default
//! methods so that both precisions share one body.
//!
//! The methods here are thin.  They take sizes as `usize`,
//! convert them to the provider's integer type, and return the raw `info`
//! code of LAPACK routines untouched.  Validation of dimensions and the
//! decoding of `info` belong to the callers in `vector`, `layout`, `lu`,
//! `inverse` and `solve`.
//!
//! All LAPACK entry points are called in column-major layout.  The one BLAS
//! level-3 routine (`gemm`) is called in row-major layout, since the
//! multiplication primitive works in the caller's convention.

use ::std::convert::TryFrom;
use ::std::fmt;

use ::num_traits::{Float, NumCast};

/// Convert a size to the integer type used by the kernels provider.
///
/// # Panics
///
/// Panics if the value does not fit.
pub(crate) fn blas_int(value: usize, what: &str) -> i32 {
    i32::try_from(value).unwrap_or_else(|_| {
        panic!("{} = {} does not fit in a BLAS integer", what, value)
    })
}

/// A floating point type supported by the kernels provider.
///
/// Strides in this trait are element strides (distance in the buffer between
/// logically adjacent elements), and leading dimensions follow the
/// BLAS/LAPACK meaning.  Callers are responsible for ensuring every slice is
/// long enough for the access pattern they describe; the provider does not
/// check.
pub trait Element: Float + Default + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// LAPACK precision prefix (`'s'` or `'d'`), used in diagnostics.
    const PREFIX: char;

    /// `x := alpha * x` over `n` elements with stride `incx`.
    fn scal(n: usize, alpha: Self, x: &mut [Self], incx: usize);

    /// `y := alpha * x + y`.
    fn axpy(n: usize, alpha: Self, x: &[Self], incx: usize, y: &mut [Self], incy: usize);

    /// Row-major `C := A * B` where `A` is `m x k`, `B` is `k x n` and `C` is `m x n`.
    #[allow(clippy::too_many_arguments)]
    fn gemm(
        m: usize, n: usize, k: usize,
        a: &[Self], lda: usize,
        b: &[Self], ldb: usize,
        c: &mut [Self], ldc: usize,
    );

    /// LU factorization with partial pivoting (`?getrf`).
    fn getrf(m: usize, n: usize, a: &mut [Self], lda: usize, ipiv: &mut [i32]) -> i32;

    /// Calls `?getri` with `lwork = -1`.
    ///
    /// Returns the `info` code together with the optimal workspace length
    /// reported in `work[0]` (meaningless unless `info == 0`).
    fn getri_query(n: usize, a: &mut [Self], lda: usize, ipiv: &[i32]) -> (i32, usize) {
        let mut query = [Self::zero()];
        let info = Self::getri_raw(n, a, lda, ipiv, &mut query, -1);
        (info, query[0].to_usize().unwrap_or(1).max(1))
    }

    /// Inversion from LU factors (`?getri`) using a workspace previously sized
    /// by [`Element::getri_query`].
    fn getri(n: usize, a: &mut [Self], lda: usize, ipiv: &[i32], work: &mut [Self]) -> i32 {
        let lwork = blas_int(work.len(), "lwork");
        Self::getri_raw(n, a, lda, ipiv, work, lwork)
    }

    #[doc(hidden)]
    fn getri_raw(n: usize, a: &mut [Self], lda: usize, ipiv: &[i32], work: &mut [Self], lwork: i32) -> i32;

    /// Dense solve `A X = B` (`?gesv`).  `A` is overwritten by its LU factors.
    #[allow(clippy::too_many_arguments)]
    fn gesv(
        n: usize, nrhs: usize,
        a: &mut [Self], lda: usize,
        ipiv: &mut [i32],
        b: &mut [Self], ldb: usize,
    ) -> i32;

    /// Tridiagonal solve (`?gtsv`).  All three diagonals are overwritten.
    #[allow(clippy::too_many_arguments)]
    fn gtsv(
        n: usize, nrhs: usize,
        dl: &mut [Self], d: &mut [Self], du: &mut [Self],
        b: &mut [Self], ldb: usize,
    ) -> i32;

    /// `y := alpha * x + beta * y`.
    fn axpby(n: usize, alpha: Self, x: &[Self], incx: usize, beta: Self, y: &mut [Self], incy: usize) {
        Self::scal(n, beta, y, incy);
        Self::axpy(n, alpha, x, incx, y, incy);
    }

    /// `x[i * incx] := alpha` for `i < n`.
    fn set(n: usize, alpha: Self, x: &mut [Self], incx: usize) {
        x.iter_mut().step_by(incx).take(n).for_each(|x| *x = alpha);
    }

    /// `out[i * stride] := start + i * step` for `i < n`.
    fn ramp(start: Self, step: Self, out: &mut [Self], stride: usize, n: usize) {
        for (i, x) in out.iter_mut().step_by(stride).take(n).enumerate() {
            let i = <Self as NumCast>::from(i).expect("(BUG) every usize is representable");
            *x = start + i * step;
        }
    }

    /// Out-of-place transpose of a row-major `rows x cols` matrix.
    ///
    /// Element `(r, c)` of `A` lives at `a[(r * cols + c) * stride_a]` and is
    /// written to `c[(c * rows + r) * stride_c]`.
    fn transpose(a: &[Self], stride_a: usize, c: &mut [Self], stride_c: usize, rows: usize, cols: usize) {
        for r in 0..rows {
            for col in 0..cols {
                c[(col * rows + r) * stride_c] = a[(r * cols + col) * stride_a];
            }
        }
    }
}

macro_rules! impl_element {
    (
        $T:ty, $prefix:expr,
        scal: $scal:ident, axpy: $axpy:ident, gemm: $gemm:ident,
        getrf: $getrf:ident, getri: $getri:ident, gesv: $gesv:ident, gtsv: $gtsv:ident $(,)*
    ) => {
        impl Element for $T {
            const PREFIX: char = $prefix;

            fn scal(n: usize, alpha: $T, x: &mut [$T], incx: usize) {
                let (n, incx) = (blas_int(n, "n"), blas_int(incx, "incx"));
                unsafe { ::cblas::$scal(n, alpha, x, incx) }
            }

            fn axpy(n: usize, alpha: $T, x: &[$T], incx: usize, y: &mut [$T], incy: usize) {
                let n = blas_int(n, "n");
                let (incx, incy) = (blas_int(incx, "incx"), blas_int(incy, "incy"));
                unsafe { ::cblas::$axpy(n, alpha, x, incx, y, incy) }
            }

            fn gemm(
                m: usize, n: usize, k: usize,
                a: &[$T], lda: usize,
                b: &[$T], ldb: usize,
                c: &mut [$T], ldc: usize,
            ) {
                use ::cblas::{Layout, Transpose};

                let (m, n, k) = (blas_int(m, "m"), blas_int(n, "n"), blas_int(k, "k"));
                let (lda, ldb, ldc) = (blas_int(lda, "lda"), blas_int(ldb, "ldb"), blas_int(ldc, "ldc"));
                unsafe {
                    ::cblas::$gemm(
                        Layout::RowMajor, Transpose::None, Transpose::None,
                        m, n, k,
                        1.0, a, lda,
                        b, ldb,
                        0.0, c, ldc,
                    )
                }
            }

            fn getrf(m: usize, n: usize, a: &mut [$T], lda: usize, ipiv: &mut [i32]) -> i32 {
                let (m, n, lda) = (blas_int(m, "m"), blas_int(n, "n"), blas_int(lda, "lda"));
                unsafe { ::lapacke::$getrf(::lapacke::Layout::ColumnMajor, m, n, a, lda, ipiv) }
            }

            fn getri_raw(n: usize, a: &mut [$T], lda: usize, ipiv: &[i32], work: &mut [$T], lwork: i32) -> i32 {
                let (n, lda) = (blas_int(n, "n"), blas_int(lda, "lda"));
                unsafe { ::lapacke::$getri(::lapacke::Layout::ColumnMajor, n, a, lda, ipiv, work, lwork) }
            }

            fn gesv(
                n: usize, nrhs: usize,
                a: &mut [$T], lda: usize,
                ipiv: &mut [i32],
                b: &mut [$T], ldb: usize,
            ) -> i32 {
                let (n, nrhs) = (blas_int(n, "n"), blas_int(nrhs, "nrhs"));
                let (lda, ldb) = (blas_int(lda, "lda"), blas_int(ldb, "ldb"));
                unsafe { ::lapacke::$gesv(::lapacke::Layout::ColumnMajor, n, nrhs, a, lda, ipiv, b, ldb) }
            }

            fn gtsv(
                n: usize, nrhs: usize,
                dl: &mut [$T], d: &mut [$T], du: &mut [$T],
                b: &mut [$T], ldb: usize,
            ) -> i32 {
                let (n, nrhs, ldb) = (blas_int(n, "n"), blas_int(nrhs, "nrhs"), blas_int(ldb, "ldb"));
                unsafe { ::lapacke::$gtsv(::lapacke::Layout::ColumnMajor, n, nrhs, dl, d, du, b, ldb) }
            }
        }
    };
}

impl_element! {
    f32, 's',
    scal: sscal, axpy: saxpy, gemm: sgemm,
    getrf: sgetrf, getri: sgetri_work, gesv: sgesv, gtsv: sgtsv,
}

impl_element! {
    f64, 'd',
    scal: dscal, axpy: daxpy, gemm: dgemm,
    getrf: dgetrf, getri: dgetri_work, gesv: dgesv, gtsv: dgtsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kernels_respect_stride() {
        let mut x = vec![0.0; 7];
        f64::set(3, 5.0, &mut x[1..], 2);
        assert_eq!(x, vec![0.0, 5.0, 0.0, 5.0, 0.0, 5.0, 0.0]);

        let mut x = vec![-1.0f32; 5];
        f32::ramp(1.0, 0.5, &mut x, 2, 3);
        assert_eq!(x, vec![1.0, -1.0, 1.5, -1.0, 2.0]);
    }

    #[test]
    fn transpose_kernel() {
        // [[1, 2, 3],
        //  [4, 5, 6]]
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut c = [0.0; 6];
        f64::transpose(&a, 1, &mut c, 1, 2, 3);
        assert_eq!(c, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn axpby_composes_scal_and_axpy() {
        let x = [1.0, 2.0, 3.0];
        let mut y = [10.0, 20.0, 30.0];
        f64::axpby(3, 2.0, &x, 1, 0.5, &mut y, 1);
        assert_eq!(y, [7.0, 14.0, 21.0]);
    }

    #[test]
    fn getri_query_reports_usable_size() {
        // [[4, 3], [6, 3]] in column-major order
        let mut a = [4.0, 6.0, 3.0, 3.0];
        let mut ipiv = [0; 2];
        assert_eq!(f64::getrf(2, 2, &mut a, 2, &mut ipiv), 0);
        let (info, lwork) = f64::getri_query(2, &mut a, 2, &ipiv);
        assert_eq!(info, 0);
        assert!(lwork >= 2);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn oversized_dimension() {
        blas_int(usize::max_value(), "n");
    }
}
