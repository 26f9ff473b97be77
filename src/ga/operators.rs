//! Generic crossover and mutation operators.
//!
//! These operate on gene slices in place and are encoding-level building
//! blocks: [`BitString`](super::BitString) and
//! [`RealVector`](super::RealVector) are assembled from them, and custom
//! [`GaProblem`](super::GaProblem) implementations can reuse them.
//!
//! # Crossover Operators
//!
//! - [`two_point_crossover`]: swap a contiguous gene range — any gene type
//! - [`blend_crossover`] (BLX-α style): per-gene interpolation/extrapolation,
//!   clipped to the search interval
//!
//! # Mutation Operators
//!
//! - [`flip_bit_mutation`]: independent per-bit flips
//! - [`gaussian_mutation`]: independent additive normal noise, clipped
//!
//! # References
//!
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata"
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"

use super::types::Interval;
use rand::Rng;
use rand_distr::{Distribution, Normal};

// ============================================================================
// Crossover operators
// ============================================================================

/// Two-point crossover.
///
/// Draws two distinct cut indices uniformly over `[0, len)`, sorts them,
/// and swaps the half-open range `[c1, c2)` between the parents.
/// Sequences shorter than two genes are left unchanged.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn two_point_crossover<G, R: Rng>(a: &mut [G], b: &mut [G], rng: &mut R) {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");

    if n < 2 {
        return;
    }

    let (start, end) = random_cut_points(n, rng);
    two_point_crossover_at(a, b, start, end);
}

/// Two-point crossover with fixed cut points: swaps `a[start..end]` with
/// `b[start..end]`.
///
/// ```
/// use u_evolve::ga::operators::two_point_crossover_at;
///
/// let mut a = [0, 0, 0, 0, 0];
/// let mut b = [1, 1, 1, 1, 1];
/// two_point_crossover_at(&mut a, &mut b, 1, 3);
/// assert_eq!(a, [0, 1, 1, 0, 0]);
/// assert_eq!(b, [1, 0, 0, 1, 1]);
/// ```
///
/// # Panics
/// Panics if the parents have different lengths or the range is out of
/// bounds.
pub fn two_point_crossover_at<G>(a: &mut [G], b: &mut [G], start: usize, end: usize) {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    a[start..end].swap_with_slice(&mut b[start..end]);
}

/// Blend crossover.
///
/// For each gene independently, draws `gamma = (1 + 2α)·U(0,1) − α` and
/// sets `a' = γ·a + (1−γ)·b`, `b' = γ·b + (1−γ)·a`, both clipped to
/// `bounds`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn blend_crossover<R: Rng>(
    a: &mut [f64],
    b: &mut [f64],
    alpha: f64,
    bounds: Interval,
    rng: &mut R,
) {
    assert_eq!(a.len(), b.len(), "parents must have equal length");

    for (x, y) in a.iter_mut().zip(b.iter_mut()) {
        let u: f64 = rng.random_range(0.0..1.0);
        let gamma = (1.0 + 2.0 * alpha) * u - alpha;
        (*x, *y) = blend_genes(*x, *y, gamma, bounds);
    }
}

/// Blends one gene pair with a fixed `gamma`, clipping both results.
///
/// ```
/// use u_evolve::ga::{operators::blend_genes, Interval};
///
/// let bounds = Interval::new(0.0, 5.0).unwrap();
/// let (a, _) = blend_genes(4.9, 5.0, -0.5, bounds);
/// assert_eq!(a, 5.0);
/// ```
pub fn blend_genes(a: f64, b: f64, gamma: f64, bounds: Interval) -> (f64, f64) {
    // γa + (1−γ)b written as an offset from the partner, so an overflow
    // saturates to ±∞ and clips instead of turning into NaN.
    let new_a = b + gamma * (a - b);
    let new_b = a + gamma * (b - a);
    (bounds.clip(new_a), bounds.clip(new_b))
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Flips each bit independently with probability `indpb`.
pub fn flip_bit_mutation<R: Rng>(genes: &mut [bool], indpb: f64, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < indpb {
            *gene = !*gene;
        }
    }
}

/// Adds a draw from `noise` to each gene independently with probability
/// `indpb`, then clips to `bounds`.
pub fn gaussian_mutation<R: Rng>(
    genes: &mut [f64],
    noise: Normal<f64>,
    indpb: f64,
    bounds: Interval,
    rng: &mut R,
) {
    for gene in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < indpb {
            *gene = bounds.clip(*gene + noise.sample(rng));
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Picks two distinct cut points in `0..n`, returned as `(low, high)`.
///
/// Requires `n >= 2`.
fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
