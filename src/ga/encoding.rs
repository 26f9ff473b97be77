//! Built-in operator sets for the two standard gene encodings.
//!
//! - [`BitString`]: `bool` genes, two-point crossover, bit-flip mutation
//! - [`RealVector`]: `f64` genes bounded by an [`Interval`], blend crossover,
//!   Gaussian mutation
//!
//! Both take the objective as an injected function and a [`Selection`]
//! strategy, so the runner never branches on the encoding.

use super::operators::{
    blend_crossover, flip_bit_mutation, gaussian_mutation, two_point_crossover,
};
use super::selection::Selection;
use super::types::{Direction, GaProblem, Genome, Interval};
use crate::error::{check_probability, ConfigError, OperatorError};
use rand::Rng;
use rand_distr::Normal;

/// Fixed-length bit-string encoding.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::{BitString, Selection};
///
/// // OneMax: fitness is the number of set bits.
/// let problem = BitString::new(|bits: &[bool]| bits.iter().filter(|&&b| b).count() as f64)
///     .with_selection(Selection::Tournament(2))
///     .with_indpb(0.2);
/// ```
#[derive(Debug, Clone)]
pub struct BitString<F> {
    objective: F,
    selection: Selection,
    indpb: f64,
}

impl<F> BitString<F>
where
    F: Fn(&[bool]) -> f64 + Send + Sync,
{
    /// Creates the encoding with [`Selection::default`] and a per-bit flip
    /// probability of 0.2.
    pub fn new(objective: F) -> Self {
        Self {
            objective,
            selection: Selection::default(),
            indpb: 0.2,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the per-bit flip probability.
    pub fn with_indpb(mut self, indpb: f64) -> Self {
        self.indpb = indpb;
        self
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn indpb(&self) -> f64 {
        self.indpb
    }
}

impl<F> GaProblem for BitString<F>
where
    F: Fn(&[bool]) -> f64 + Send + Sync,
{
    type Gene = bool;

    fn validate(&self) -> Result<(), ConfigError> {
        self.selection.validate()?;
        check_probability("indpb", self.indpb)
    }

    fn create_genes<R: Rng>(&self, length: usize, rng: &mut R) -> Vec<bool> {
        (0..length).map(|_| rng.random_bool(0.5)).collect()
    }

    fn evaluate(&self, genes: &[bool]) -> Result<f64, OperatorError> {
        Ok((self.objective)(genes))
    }

    fn select<R: Rng>(
        &self,
        population: &[Genome<bool>],
        k: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<usize> {
        self.selection.select_many(population, k, direction, rng)
    }

    fn crossover<R: Rng>(&self, a: &mut [bool], b: &mut [bool], rng: &mut R) {
        two_point_crossover(a, b, rng);
    }

    fn mutate<R: Rng>(&self, genes: &mut [bool], rng: &mut R) {
        flip_bit_mutation(genes, self.indpb, rng);
    }
}

/// Parameters of the real-valued operators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealParams {
    /// Blend crossover extrapolation factor.
    pub alpha: f64,
    /// Mean of the Gaussian perturbation.
    pub mu: f64,
    /// Standard deviation of the Gaussian perturbation.
    pub sigma: f64,
    /// Per-gene mutation probability.
    pub indpb: f64,
}

impl Default for RealParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            mu: 0.0,
            sigma: 1.0,
            indpb: 0.2,
        }
    }
}

impl RealParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !self.mu.is_finite() {
            return Err(ConfigError::InvalidParameter(format!(
                "mu must be finite, got {}",
                self.mu
            )));
        }
        if self.sigma < 0.0 {
            return Err(ConfigError::InvalidParameter(format!(
                "sigma must be non-negative, got {}",
                self.sigma
            )));
        }
        self.noise()?;
        check_probability("indpb", self.indpb)
    }

    /// The Gaussian perturbation `Normal(mu, sigma)`.
    pub fn noise(&self) -> Result<Normal<f64>, ConfigError> {
        Normal::new(self.mu, self.sigma).map_err(|e| {
            ConfigError::InvalidParameter(format!("sigma {}: {e}", self.sigma))
        })
    }
}

/// Fixed-length real vector bounded by a closed interval.
///
/// Every gene stays within the interval: initialization samples inside
/// it, and crossover and mutation clip their results.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::{Interval, RealVector};
///
/// let bounds = Interval::new(-5.0, 5.0).unwrap();
/// let sphere = RealVector::new(bounds, |x: &[f64]| -> f64 { x.iter().map(|v| v * v).sum() })
///     .with_gaussian(0.0, 0.5)
///     .with_alpha(0.3);
/// ```
#[derive(Debug, Clone)]
pub struct RealVector<F> {
    objective: F,
    bounds: Interval,
    selection: Selection,
    params: RealParams,
}

impl<F> RealVector<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    /// Creates the encoding with [`Selection::default`] and
    /// [`RealParams::default`].
    pub fn new(bounds: Interval, objective: F) -> Self {
        Self {
            objective,
            bounds,
            selection: Selection::default(),
            params: RealParams::default(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_params(mut self, params: RealParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the blend crossover factor.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Sets the Gaussian mutation mean and standard deviation.
    pub fn with_gaussian(mut self, mu: f64, sigma: f64) -> Self {
        self.params.mu = mu;
        self.params.sigma = sigma;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_indpb(mut self, indpb: f64) -> Self {
        self.params.indpb = indpb;
        self
    }

    pub fn bounds(&self) -> Interval {
        self.bounds
    }

    pub fn params(&self) -> RealParams {
        self.params
    }
}

impl<F> GaProblem for RealVector<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    type Gene = f64;

    fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        self.selection.validate()?;
        self.params.validate()
    }

    fn create_genes<R: Rng>(&self, length: usize, rng: &mut R) -> Vec<f64> {
        (0..length).map(|_| self.bounds.sample(rng)).collect()
    }

    fn evaluate(&self, genes: &[f64]) -> Result<f64, OperatorError> {
        Ok((self.objective)(genes))
    }

    fn select<R: Rng>(
        &self,
        population: &[Genome<f64>],
        k: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<usize> {
        self.selection.select_many(population, k, direction, rng)
    }

    fn crossover<R: Rng>(&self, a: &mut [f64], b: &mut [f64], rng: &mut R) {
        blend_crossover(a, b, self.params.alpha, self.bounds, rng);
    }

    fn mutate<R: Rng>(&self, genes: &mut [f64], rng: &mut R) {
        // Params are checked by `validate` before the run starts.
        if let Ok(noise) = self.params.noise() {
            gaussian_mutation(genes, noise, self.params.indpb, self.bounds, rng);
        }
    }

    fn in_domain(&self, genes: &[f64]) -> bool {
        genes.iter().all(|&g| self.bounds.contains(g))
    }
}
