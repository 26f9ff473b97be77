//! Generational evolutionary optimization engine.
//!
//! Evolves a fixed-size population of fixed-length genomes over a fixed
//! number of generations to minimize or maximize a scalar fitness. The
//! encoding, objective and genetic operators are supplied by the caller
//! through [`ga::GaProblem`]; two encodings ship with the crate:
//!
//! - **Bit strings**: two-point crossover and bit-flip mutation.
//! - **Bounded real vectors**: blend crossover and Gaussian mutation,
//!   both clipped to the search interval.
//!
//! Runs are reproducible: a seeded generator owned by the runner is
//! threaded through every operator call. Evaluation can be parallelized
//! with the `parallel` feature without changing results.
//!
//! # Example
//!
//! ```
//! use u_evolve::ga::{BitString, Direction, GaConfig, GaRunner, Selection};
//!
//! let problem = BitString::new(|bits: &[bool]| bits.iter().filter(|&&b| b).count() as f64)
//!     .with_selection(Selection::Tournament(2));
//! let config = GaConfig::default()
//!     .with_genome_length(16)
//!     .with_population_size(40)
//!     .with_generations(50)
//!     .with_direction(Direction::Maximize)
//!     .with_seed(7);
//!
//! let result = GaRunner::run(&problem, &config)?;
//! println!("best: {:?} ({})", result.best.genes(), result.best_fitness);
//! # Ok::<(), u_evolve::EvolutionError>(())
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{ConfigError, EvolutionError, InvariantViolation, OperatorError, Result};
