//! Dominant eigenvectors of a symmetric matrix by power iteration.
//!
//! Each vector is found by repeatedly multiplying a seeded random candidate by the matrix. Before
//! every multiplication the candidate is re-orthogonalized (Gram-Schmidt) against the vectors found
//! so far, which deflates them without touching the matrix itself.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rng::XorShift64Star;

pub const DEFAULT_EPSILON: f64 = 1e-40;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_SEED: u64 = 42;

/// `S * v` shorter than this fraction of `|S| * |v|` is rounding noise: `v` is in the null space.
const NULL_SPACE_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PowerIterationOptions {
    /// A vector is accepted once `(v_next . v)^2 >= (1 - epsilon)^2`.
    pub epsilon: f64,
    /// Iteration budget per vector. Running out is not an error; the last estimate is kept.
    pub max_iterations: usize,
    /// Seed for the random starting vectors.
    pub seed: u64,
}

impl Default for PowerIterationOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Returns `count` unit-length, mutually orthogonal dominant eigenvectors of `s`, largest
/// eigenvalue magnitude first.
pub fn power_iteration(
    s: &DMatrix<f64>,
    count: usize,
    opts: &PowerIterationOptions,
) -> Result<Vec<DVector<f64>>> {
    if !s.is_square() {
        return Err(Error::DimensionMismatch {
            expected: s.nrows(),
            actual: s.ncols(),
        });
    }
    let n = s.nrows();
    if count > n {
        return Err(Error::RequestedCountExceedsDimension {
            requested: count,
            dimension: n,
        });
    }

    let mut rng = XorShift64Star::new(opts.seed);
    let threshold = (1.0 - opts.epsilon) * (1.0 - opts.epsilon);
    let max_iterations = opts.max_iterations.max(1);
    let null_floor = NULL_SPACE_TOLERANCE * s.norm();

    let mut vectors: Vec<DVector<f64>> = Vec::with_capacity(count);
    for i in 0..count {
        let mut next = DVector::<f64>::from_fn(n, |_, _| rng.next_f64_unit());
        normalize_in_place(&mut next);

        let mut converged = false;
        for _ in 0..max_iterations {
            let mut v = next;
            orthogonalize(&mut v, &vectors);

            next = s * &v;
            if next.norm() <= null_floor * v.norm() {
                // `v` lies in the null space and is already a fixed point.
                normalize_in_place(&mut v);
                next = v;
                converged = true;
                break;
            }
            normalize_in_place(&mut next);

            let diff = next.dot(&v).powi(2);
            if diff >= threshold {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::debug!(
                vector = i,
                max_iterations,
                "power iteration ran out of iterations; keeping the last estimate"
            );
        }
        // An unconverged estimate may have drifted back toward accepted vectors.
        orthogonalize(&mut next, &vectors);
        normalize_in_place(&mut next);
        vectors.push(next);
    }

    Ok(vectors)
}

fn orthogonalize(v: &mut DVector<f64>, basis: &[DVector<f64>]) {
    for u in basis {
        let proj = v.dot(u);
        v.axpy(-proj, u, 1.0);
    }
}

fn normalize_in_place(v: &mut DVector<f64>) {
    let norm = v.norm();
    if norm.is_finite() && norm > 0.0 {
        *v /= norm;
    }
}
