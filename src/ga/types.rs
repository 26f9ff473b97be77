//! Core type definitions for the evolutionary engine.
//!
//! [`Genome`] carries genes plus a cached fitness, and [`GaProblem`] is the
//! operator set the caller plugs into [`GaRunner`](super::GaRunner).

use super::selection::Selection;
use crate::error::{ConfigError, OperatorError};
use rand::Rng;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Direction {
    /// Returns `true` if `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    /// The worst possible fitness in this direction.
    pub fn worst(self) -> f64 {
        match self {
            Direction::Minimize => f64::INFINITY,
            Direction::Maximize => f64::NEG_INFINITY,
        }
    }
}

/// A candidate solution: a fixed-length gene vector and its cached fitness.
///
/// Fitness is `None` until evaluated. The only mutable access to the genes
/// goes through [`genes_mut`](Genome::genes_mut), which invalidates the
/// fitness at the same time, so a valid fitness always matches the genes.
///
/// ```
/// use u_evolve::ga::Genome;
///
/// let mut genome = Genome::new(vec![true, false, true]);
/// assert!(!genome.is_valid());
///
/// genome.set_fitness(2.0);
/// assert_eq!(genome.fitness(), Some(2.0));
///
/// genome.genes_mut()[1] = true;
/// assert_eq!(genome.fitness(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome<G> {
    genes: Vec<G>,
    fitness: Option<f64>,
}

impl<G> Genome<G> {
    /// Creates an unevaluated genome.
    pub fn new(genes: Vec<G>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// Mutable view of the genes. Invalidates the fitness.
    ///
    /// The slice cannot grow or shrink, so the genome length is fixed.
    pub fn genes_mut(&mut self) -> &mut [G] {
        self.fitness = None;
        &mut self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Cached fitness, or `None` if stale.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn is_valid(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }
}

/// A closed search interval `[lo, hi]` for real-valued genes.
///
/// Deserialization goes through [`Interval::new`], so a deserialized
/// interval is as valid as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawInterval"))]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Creates an interval, rejecting `lo >= hi`, non-finite bounds and
    /// widths that overflow `f64`.
    pub fn new(lo: f64, hi: f64) -> Result<Self, ConfigError> {
        if lo.is_finite() && hi.is_finite() && lo < hi && (hi - lo).is_finite() {
            Ok(Self { lo, hi })
        } else {
            Err(ConfigError::InvalidInterval { lo, hi })
        }
    }

    /// Re-checks the bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.lo, self.hi).map(|_| ())
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[inline]
    pub fn clip(&self, x: f64) -> f64 {
        x.clamp(self.lo, self.hi)
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        (self.lo..=self.hi).contains(&x)
    }

    /// Uniform draw from `[lo, hi]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.lo..=self.hi)
    }
}

/// Unchecked wire form of [`Interval`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawInterval {
    lo: f64,
    hi: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawInterval> for Interval {
    type Error = ConfigError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.lo, raw.hi)
    }
}

/// The operator set: initialization, evaluation, selection, crossover and
/// mutation for one gene encoding.
///
/// The runner is generic over this trait and never inspects the genes
/// itself. [`BitString`](super::BitString) and
/// [`RealVector`](super::RealVector) are the built-in encodings.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because evaluation may run on rayon
/// workers when the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    /// Gene type of this encoding.
    type Gene: Clone + Send + Sync + std::fmt::Debug;

    /// Checks the operator parameters. Called once before the run starts.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Draws the genes of one new genome.
    fn create_genes<R: Rng>(&self, length: usize, rng: &mut R) -> Vec<Self::Gene>;

    /// Computes the fitness of a gene vector.
    ///
    /// Must be a pure function of `genes`. Errors and non-finite values
    /// abort the run.
    fn evaluate(&self, genes: &[Self::Gene]) -> Result<f64, OperatorError>;

    /// Returns `k` indices into `population`, repetition allowed.
    ///
    /// Every genome in `population` has a valid fitness when this is
    /// called. The default is 3-way tournament selection.
    fn select<R: Rng>(
        &self,
        population: &[Genome<Self::Gene>],
        k: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<usize> {
        Selection::default().select_many(population, k, direction, rng)
    }

    /// Recombines two gene vectors in place.
    ///
    /// The default implementation leaves both unchanged.
    fn crossover<R: Rng>(&self, _a: &mut [Self::Gene], _b: &mut [Self::Gene], _rng: &mut R) {}

    /// Mutates a gene vector in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _genes: &mut [Self::Gene], _rng: &mut R) {}

    /// Returns `false` if any gene lies outside the encoding's domain.
    fn in_domain(&self, _genes: &[Self::Gene]) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_better() {
        assert!(Direction::Minimize.is_better(1.0, 2.0));
        assert!(!Direction::Minimize.is_better(2.0, 2.0));
        assert!(Direction::Maximize.is_better(3.0, 2.0));
        assert!(!Direction::Maximize.is_better(2.0, 2.0));
        assert!(Direction::Maximize.is_better(0.0, Direction::Maximize.worst()));
        assert!(Direction::Minimize.is_better(0.0, Direction::Minimize.worst()));
    }

    #[test]
    fn test_genes_mut_invalidates() {
        let mut genome = Genome::new(vec![1.0, 2.0]);
        genome.set_fitness(3.0);
        assert!(genome.is_valid());

        let _ = genome.genes_mut();
        assert!(!genome.is_valid());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut parent = Genome::new(vec![false; 4]);
        parent.set_fitness(0.0);
        let mut child = parent.clone();
        child.genes_mut()[0] = true;

        assert_eq!(parent.genes(), &[false; 4]);
        assert_eq!(parent.fitness(), Some(0.0));
        assert_eq!(child.fitness(), None);
    }

    #[test]
    fn test_interval_rejects_empty() {
        assert!(Interval::new(0.0, 5.0).is_ok());
        assert_eq!(
            Interval::new(5.0, 5.0),
            Err(ConfigError::InvalidInterval { lo: 5.0, hi: 5.0 })
        );
        assert!(Interval::new(0.0, f64::INFINITY).is_err());
        assert!(Interval::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_interval_rejects_overflowing_width() {
        assert_eq!(
            Interval::new(-f64::MAX, f64::MAX),
            Err(ConfigError::InvalidInterval {
                lo: -f64::MAX,
                hi: f64::MAX
            })
        );
        assert!(Interval::new(-f64::MAX / 2.0, f64::MAX / 2.0).is_ok());
    }

    #[test]
    fn test_interval_validate_catches_reversed_bounds() {
        assert!(Interval::new(0.0, 5.0).unwrap().validate().is_ok());

        let reversed = Interval { lo: 5.0, hi: 0.0 };
        assert_eq!(
            reversed.validate(),
            Err(ConfigError::InvalidInterval { lo: 5.0, hi: 0.0 })
        );
    }

    #[test]
    fn test_real_vector_rejects_reversed_bounds() {
        use crate::ga::{GaConfig, GaRunner, RealVector};
        use crate::EvolutionError;

        let reversed = Interval { lo: 5.0, hi: 0.0 };
        let problem = RealVector::new(reversed, |x: &[f64]| -> f64 { x.iter().sum() });
        assert!(problem.validate().is_err());

        let config = GaConfig::default().with_population_size(4).with_seed(1);
        assert_eq!(
            GaRunner::run(&problem, &config).err(),
            Some(EvolutionError::Config(ConfigError::InvalidInterval {
                lo: 5.0,
                hi: 0.0
            }))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_interval_deserialize_validates() {
        let ok: Interval = serde_json::from_str(r#"{"lo":0.0,"hi":5.0}"#).unwrap();
        assert_eq!(ok, Interval::new(0.0, 5.0).unwrap());

        assert!(serde_json::from_str::<Interval>(r#"{"lo":5.0,"hi":0.0}"#).is_err());
        assert!(serde_json::from_str::<Interval>(r#"{"lo":1.0,"hi":1.0}"#).is_err());
    }

    #[test]
    fn test_interval_clip() {
        let bounds = Interval::new(0.0, 5.0).unwrap();
        assert_eq!(bounds.clip(5.05), 5.0);
        assert_eq!(bounds.clip(-1.0), 0.0);
        assert_eq!(bounds.clip(2.5), 2.5);
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(5.0));
        assert!(!bounds.contains(5.000001));
    }
}
