//! Run configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.
//! Encoding-specific parameters (search interval, tournament size,
//! operator rates per gene) live on the [`GaProblem`](super::GaProblem)
//! implementation and are validated together with this config.

use super::types::Direction;
use crate::error::{check_probability, ConfigError};

/// Configuration for one evolutionary run.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::{Direction, GaConfig};
///
/// let config = GaConfig::default()
///     .with_genome_length(5)
///     .with_population_size(10)
///     .with_crossover_rate(0.7)
///     .with_mutation_rate(0.2)
///     .with_generations(10)
///     .with_direction(Direction::Maximize)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of genes per genome. Fixed for the whole run.
    pub genome_length: usize,

    /// Number of genomes in the population. Fixed for the whole run.
    pub population_size: usize,

    /// Number of generations after the initial one. May be 0.
    pub generations: usize,

    /// Probability of applying crossover to a pair of offspring (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of applying mutation to an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether fitness is minimized or maximized.
    pub direction: Direction,

    /// Whether to evaluate genomes in parallel.
    ///
    /// Only takes effect when the `parallel` feature is enabled. Results
    /// do not depend on this flag.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            genome_length: 10,
            population_size: 100,
            generations: 100,
            crossover_rate: 0.7,
            mutation_rate: 0.2,
            direction: Direction::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the genome length.
    pub fn with_genome_length(mut self, n: usize) -> Self {
        self.genome_length = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate. Out-of-range values fail [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate. Out-of-range values fail [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the optimization direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.genome_length == 0 {
            return Err(ConfigError::EmptyGenome);
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.genome_length, 10);
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 100);
        assert!((config.crossover_rate - 0.7).abs() < 1e-10);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert_eq!(config.direction, Direction::Minimize);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_genome_length(32)
            .with_population_size(200)
            .with_generations(1000)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_direction(Direction::Maximize)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.genome_length, 32);
        assert_eq!(config.population_size, 200);
        assert_eq!(config.generations, 1000);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.direction, Direction::Maximize);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations_ok() {
        let config = GaConfig::default().with_generations(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_odd_population_ok() {
        let config = GaConfig::default().with_population_size(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_validate_empty_genome() {
        let config = GaConfig::default().with_genome_length(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyGenome));
    }

    #[test]
    fn test_validate_rates_not_clamped() {
        let config = GaConfig::default().with_crossover_rate(-0.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "crossover_rate",
                value: -0.5
            })
        );

        let config = GaConfig::default().with_mutation_rate(2.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "mutation_rate",
                value: 2.0
            })
        );
    }

    #[test]
    fn test_validate_boundary_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(1.0);
        assert!(config.validate().is_ok());
    }
}
