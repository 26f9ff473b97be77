//! Error types for the evolutionary engine.
//!
//! Every failure is fatal: [`GaRunner`](crate::ga::GaRunner) aborts the
//! run and returns the error, never a partial population.

/// Invalid run configuration or operator parameters.
///
/// Detected before the first operator call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,
    #[error("genome_length must be at least 1")]
    EmptyGenome,
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("search interval [{lo}, {hi}] is empty or not finite")]
    InvalidInterval { lo: f64, hi: f64 },
    #[error("tournament size must be at least 1")]
    EmptyTournament,
    #[error("invalid operator parameter: {0}")]
    InvalidParameter(String),
}

/// A caller-supplied operator failed or broke its contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperatorError {
    #[error("evaluation failed: {0}")]
    Evaluation(String),
    #[error("evaluator returned non-finite fitness {value} for genome {index}")]
    NonFiniteFitness { index: usize, value: f64 },
    #[error("initializer produced {actual} genes, expected {expected}")]
    GenomeLength { expected: usize, actual: usize },
    #[error("selector returned {actual} genomes, expected {expected}")]
    SelectionCount { expected: usize, actual: usize },
    #[error("selector returned index {index} for a population of {len}")]
    SelectionIndex { index: usize, len: usize },
}

/// An engine invariant failed. Unreachable with contract-compliant operators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("generation {generation}: population size {actual}, expected {expected}")]
    PopulationSize {
        generation: usize,
        expected: usize,
        actual: usize,
    },
    #[error("generation {generation}: genome {index} has genes outside the search domain")]
    GeneOutOfDomain { generation: usize, index: usize },
    #[error("generation {generation}: fitness of genome {index} read while invalid")]
    InvalidFitness { generation: usize, index: usize },
}

/// Umbrella error returned by the runner.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolutionError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("operator error: {0}")]
    Operator(#[from] OperatorError),
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}

pub type Result<T> = std::result::Result<T, EvolutionError>;

/// Checks that `value` is a probability in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
