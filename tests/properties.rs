/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Randomized checks of the algebraic identities tying the operations together.

#[macro_use]
extern crate flat_linalg_assert_close;
#[macro_use]
extern crate pretty_assertions;

use flat_linalg::{
    Strided, affine_combine, factorize, invert, multiply, permutation_matrix,
    ramp_range, scale, solve_general, solve_general_copied, solve_tridiagonal,
    transpose, unpack_lu,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TRIALS: usize = 20;

fn init() -> StdRng {
    let _ = env_logger::try_init();
    StdRng::seed_from_u64(0x5eed)
}

fn random_matrix(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

// Strong diagonal keeps these far from singular.
fn random_dominant(rng: &mut StdRng, n: usize) -> Vec<f64> {
    let mut a = random_matrix(rng, n * n);
    for i in 0..n {
        a[i * n + i] += n as f64 + 1.0;
    }
    a
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let (m, n) = (rng.gen_range(1..9), rng.gen_range(1..9));
        let a = random_matrix(&mut rng, m * n);
        let t = transpose(&a, m, n);
        let (r, c) = (rng.gen_range(0..m), rng.gen_range(0..n));
        assert_eq!(t[c * m + r], a[r * n + c]);
        assert_eq!(transpose(&t, n, m), a);
    }
}

#[test]
fn lu_reconstructs_input() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let (m, n) = (rng.gen_range(1..8), rng.gen_range(1..8));
        let k = usize::min(m, n);

        // row-major input, handed over in column-major order
        let rows = random_matrix(&mut rng, m * n);
        let mut factors = transpose(&rows, m, n);
        let pivots = factorize(&mut factors, m, n).unwrap();
        assert_eq!(pivots.len(), k);

        // back to row-major: L is m x k, U is k x n
        let (l, u) = unpack_lu(&factors, m, n);
        let (l, u) = (transpose(&l, k, m), transpose(&u, n, k));
        let p: Vec<f64> = permutation_matrix(&pivots.to_permutation(m));
        let plu = multiply(&p, &multiply(&l, &u, m, n, k), m, n, m);

        assert_close!(rel=1e-12, abs=1e-13, plu, rows, "m = {}, n = {}", m, n);
    }
}

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let n = rng.gen_range(1..8);
        let a = random_dominant(&mut rng, n);
        let mut inv = a.clone();
        invert(&mut inv).unwrap();

        let mut eye = vec![0.0; n * n];
        for i in 0..n {
            eye[i * n + i] = 1.0;
        }
        assert_close!(abs=1e-12, multiply(&a, &inv, n, n, n), eye, "n = {}", n);
    }
}

#[test]
fn solve_agrees_with_inverse() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let (n, nrhs) = (rng.gen_range(1..8), rng.gen_range(1..4));
        let a_rows = random_dominant(&mut rng, n);
        let b_rows = random_matrix(&mut rng, n * nrhs);

        let mut x = transpose(&b_rows, n, nrhs);
        solve_general_copied(&transpose(&a_rows, n, n), &mut x).unwrap();
        let x_rows = transpose(&x, nrhs, n);

        let mut inv = a_rows.clone();
        invert(&mut inv).unwrap();
        let expected = multiply(&inv, &b_rows, n, nrhs, n);

        assert_close!(rel=1e-12, abs=1e-13, x_rows, expected, "n = {}, nrhs = {}", n, nrhs);
    }
}

#[test]
fn solve_factors_match_factorize() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let n = rng.gen_range(1..8);
        let a = random_matrix(&mut rng, n * n);

        let mut from_solve = a.clone();
        let mut b = vec![1.0; n];
        let solve_pivots = solve_general(&mut from_solve, &mut b).unwrap();

        let mut from_factorize = a.clone();
        let pivots = factorize(&mut from_factorize, n, n).unwrap();

        assert_eq!(solve_pivots, pivots);
        assert_close!(rel=1e-14, abs=1e-15, from_solve, from_factorize);
    }
}

#[test]
fn tridiagonal_matches_dense() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let (n, nrhs) = (rng.gen_range(1..10), rng.gen_range(1..3));
        let sub = random_matrix(&mut rng, n - 1);
        let sup = random_matrix(&mut rng, n - 1);
        let diag: Vec<f64> = (0..n).map(|_| 3.0 + rng.gen_range(0.0..1.0)).collect();
        let b = random_matrix(&mut rng, n * nrhs);

        // column-major dense copy
        let mut dense = vec![0.0; n * n];
        for i in 0..n {
            dense[i * n + i] = diag[i];
        }
        for i in 0..n - 1 {
            dense[i * n + i + 1] = sub[i];
            dense[(i + 1) * n + i] = sup[i];
        }
        let mut expected = b.clone();
        solve_general_copied(&dense, &mut expected).unwrap();

        let (mut d, mut dl, mut du) = (diag.clone(), sub.clone(), sup.clone());
        let mut x = b.clone();
        solve_tridiagonal(&mut d, nrhs, &mut dl, &mut du, &mut x).unwrap();

        assert_close!(rel=1e-12, abs=1e-14, x, expected, "n = {}, nrhs = {}", n, nrhs);
    }
}

#[test]
fn single_precision_solve() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let n = rng.gen_range(1..6);
        let a: Vec<f32> = random_dominant(&mut rng, n).into_iter().map(|x| x as f32).collect();
        let x_true: Vec<f32> = (0..n).map(|i| i as f32 - 1.5).collect();
        let mut b = multiply(&transpose(&a, n, n), &x_true, n, 1, n);

        // `a` is used as column-major here, so b was built from its transpose
        solve_general_copied(&a, &mut b).unwrap();
        assert_close!(rel=1e-4, abs=1e-5, b, x_true);
    }
}

#[test]
fn ramp_range_stays_within_bounds() {
    let mut rng = init();
    for _ in 0..TRIALS {
        let start: f64 = rng.gen_range(-10.0..10.0);
        let stop: f64 = rng.gen_range(-10.0..10.0);
        let step = rng.gen_range(0.1..2.0) * (stop - start).signum();

        let r = ramp_range(start, stop, step);
        assert_eq!(r.len() as f64, ((stop - start) / step).ceil());
        for &x in &r {
            assert!((x - start) * step >= 0.0);
            assert!((stop - x) * step > -1e-12, "{} overshoots {}", x, stop);
        }
    }
}

#[test]
fn strided_combine_touches_only_selection() {
    let mut rng = init();
    let x = random_matrix(&mut rng, 12);
    let y0 = random_matrix(&mut rng, 12);

    // every third element of y, starting at 1, from the first four of x
    let mut y = y0.clone();
    let sel_y = Strided::new().inc(3).offset(1);
    affine_combine(&x, 2.0, &mut y, -1.0, Strided::new().count(4), sel_y);
    scale(&mut y, 0.5, sel_y);

    for i in 0..12 {
        if i % 3 == 1 {
            let j = i / 3;
            assert_close!(rel=1e-15, abs=1e-15, y[i], 0.5 * (2.0 * x[j] - y0[i]));
        } else {
            assert_eq!(y[i], y0[i]);
        }
    }
}
