//! Generational evolutionary algorithm.
//!
//! A generic, encoding-agnostic engine built on one trait. Callers describe
//! their problem by implementing [`GaProblem`] (or using a built-in
//! encoding), and [`GaRunner`] drives the loop: initialize, evaluate, then
//! for each generation select, clone, recombine, mutate, re-evaluate stale
//! genomes and replace the population.
//!
//! # Core Types
//!
//! - [`Genome`]: Gene vector plus cached fitness (`None` = stale)
//! - [`GaProblem`]: Operator set — initialization, evaluation, selection,
//!   crossover, mutation
//! - [`GaConfig`]: Run parameters (sizes, rates, direction, seed)
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Final population, best genome and per-generation statistics
//! - [`Observer`]: Read-only per-generation snapshots
//!
//! # Encodings
//!
//! - [`BitString`]: two-point crossover, bit-flip mutation
//! - [`RealVector`]: blend crossover, Gaussian mutation, clipped to an [`Interval`]
//!
//! # Submodules
//!
//! - [`operators`]: Crossover and mutation building blocks on gene slices
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod encoding;
mod observer;
pub mod operators;
mod runner;
mod selection;
mod stats;
mod types;

pub use config::GaConfig;
pub use encoding::{BitString, RealParams, RealVector};
pub use observer::{NoObserver, Observer};
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use stats::GenerationStats;
pub use types::{Direction, GaProblem, Genome, Interval};
