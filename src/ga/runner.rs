//! Generational loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → {selection → clone → crossover →
//! mutation → re-evaluation → replacement} × generations.

use super::config::GaConfig;
use super::observer::{NoObserver, Observer};
use super::stats::GenerationStats;
use super::types::{Direction, GaProblem, Genome};
use crate::error::{InvariantViolation, OperatorError, Result};
use crate::random::{create_rng, EvolveRng};
use log::{debug, info, trace, warn};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of an evolutionary run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult<G> {
    /// The final population, every genome evaluated.
    pub population: Vec<Genome<G>>,

    /// Best genome of the final population.
    pub best: Genome<G>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed after the initial one.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// One record per generation, starting with generation 0.
    pub history: Vec<GenerationStats>,
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{BitString, Direction, GaConfig, GaRunner};
///
/// let problem = BitString::new(|bits: &[bool]| bits.iter().filter(|&&b| b).count() as f64);
/// let config = GaConfig::default()
///     .with_genome_length(5)
///     .with_population_size(10)
///     .with_generations(10)
///     .with_direction(Direction::Maximize)
///     .with_seed(42);
///
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.population.len(), 10);
/// assert_eq!(result.history.len(), 11);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the evolution without an observer.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Gene>> {
        Self::run_with_cancel(problem, config, &mut NoObserver, None)
    }

    /// Runs the evolution, notifying `observer` after every generation.
    pub fn run_with_observer<P, O>(
        problem: &P,
        config: &GaConfig,
        observer: &mut O,
    ) -> Result<GaResult<P::Gene>>
    where
        P: GaProblem,
        O: Observer<P::Gene> + ?Sized,
    {
        Self::run_with_cancel(problem, config, observer, None)
    }

    /// Runs the evolution with an optional cancellation token.
    ///
    /// The token is checked at generation boundaries only. When it is set,
    /// the run stops before starting the next generation and returns the
    /// last completed population with `cancelled = true`.
    pub fn run_with_cancel<P, O>(
        problem: &P,
        config: &GaConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Gene>>
    where
        P: GaProblem,
        O: Observer<P::Gene> + ?Sized,
    {
        config.validate()?;
        problem.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = create_rng(seed);
        info!(
            "starting evolution: population={} genome_length={} generations={} pc={} pm={} direction={:?} seed={}",
            config.population_size,
            config.genome_length,
            config.generations,
            config.crossover_rate,
            config.mutation_rate,
            config.direction,
            seed,
        );

        // 1. Initialize and evaluate generation 0
        let mut population = initialize(problem, config, &mut rng)?;
        let evaluated = evaluate_invalid(problem, &mut population, config.parallel)?;
        check_population(problem, config, &population, 0)?;

        let mut history = Vec::with_capacity(config.generations + 1);
        let stats = GenerationStats::from_population(0, evaluated, &population)?;
        debug!("{stats:?}");
        history.push(stats);
        observer.on_generation(&population, 0);

        let mut completed = 0;
        let mut cancelled = false;

        // 2. Generational loop
        for generation in 1..=config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    warn!("evolution cancelled before generation {generation}");
                    cancelled = true;
                    break;
                }
            }

            let mut offspring = select_offspring(problem, config, &population, &mut rng)?;
            trace!("generation {generation}: selected {} offspring", offspring.len());

            recombine(problem, config.crossover_rate, &mut offspring, &mut rng);
            mutate(problem, config.mutation_rate, &mut offspring, &mut rng);

            let reevaluated = evaluate_invalid(problem, &mut offspring, config.parallel)?;
            check_population(problem, config, &offspring, generation)?;

            population = offspring;

            let stats = GenerationStats::from_population(generation, reevaluated, &population)?;
            debug!("{stats:?}");
            history.push(stats);
            observer.on_generation(&population, generation);
            completed = generation;
        }

        let (best, best_fitness) = find_best(&population, config.direction, completed)?;
        let best = best.clone();
        info!("evolution finished after {completed} generations, best fitness {best_fitness}");

        Ok(GaResult {
            population,
            best,
            best_fitness,
            generations: completed,
            cancelled,
            history,
        })
    }
}

/// Builds generation 0 with one initializer call per genome.
fn initialize<P: GaProblem>(
    problem: &P,
    config: &GaConfig,
    rng: &mut EvolveRng,
) -> std::result::Result<Vec<Genome<P::Gene>>, OperatorError> {
    (0..config.population_size)
        .map(|_| {
            let genes = problem.create_genes(config.genome_length, rng);
            if genes.len() != config.genome_length {
                return Err(OperatorError::GenomeLength {
                    expected: config.genome_length,
                    actual: genes.len(),
                });
            }
            Ok(Genome::new(genes))
        })
        .collect()
}

/// Selects `population_size` parents and deep-copies each one, so a parent
/// sampled twice yields two independent offspring.
fn select_offspring<P: GaProblem>(
    problem: &P,
    config: &GaConfig,
    population: &[Genome<P::Gene>],
    rng: &mut EvolveRng,
) -> std::result::Result<Vec<Genome<P::Gene>>, OperatorError> {
    let expected = config.population_size;
    let indices = problem.select(population, expected, config.direction, rng);
    if indices.len() != expected {
        return Err(OperatorError::SelectionCount {
            expected,
            actual: indices.len(),
        });
    }

    indices
        .into_iter()
        .map(|index| {
            population
                .get(index)
                .cloned()
                .ok_or(OperatorError::SelectionIndex {
                    index,
                    len: population.len(),
                })
        })
        .collect()
}

/// Crossover over disjoint consecutive pairs, each with probability `rate`.
/// A trailing unpaired genome is left untouched.
fn recombine<P: GaProblem>(
    problem: &P,
    rate: f64,
    offspring: &mut [Genome<P::Gene>],
    rng: &mut EvolveRng,
) {
    for pair in offspring.chunks_exact_mut(2) {
        if rng.random_range(0.0..1.0) < rate {
            let (first, second) = pair.split_at_mut(1);
            problem.crossover(first[0].genes_mut(), second[0].genes_mut(), rng);
        }
    }
}

/// Mutation of each genome independently with probability `rate`.
///
/// A mutated genome is invalidated even if no gene actually changed.
fn mutate<P: GaProblem>(
    problem: &P,
    rate: f64,
    offspring: &mut [Genome<P::Gene>],
    rng: &mut EvolveRng,
) {
    for genome in offspring.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            problem.mutate(genome.genes_mut(), rng);
        }
    }
}

/// Evaluates exactly the genomes with stale fitness. Returns how many.
fn evaluate_invalid<P: GaProblem>(
    problem: &P,
    population: &mut [Genome<P::Gene>],
    parallel: bool,
) -> std::result::Result<usize, OperatorError> {
    let mut pending: Vec<(usize, &mut Genome<P::Gene>)> = population
        .iter_mut()
        .enumerate()
        .filter(|(_, genome)| !genome.is_valid())
        .collect();

    evaluate_pending(problem, &mut pending, parallel)?;
    Ok(pending.len())
}

#[cfg(feature = "parallel")]
fn evaluate_pending<P: GaProblem>(
    problem: &P,
    pending: &mut [(usize, &mut Genome<P::Gene>)],
    parallel: bool,
) -> std::result::Result<(), OperatorError> {
    if parallel {
        pending
            .par_iter_mut()
            .try_for_each(|(index, genome)| assign_fitness(problem, *index, genome))
    } else {
        pending
            .iter_mut()
            .try_for_each(|(index, genome)| assign_fitness(problem, *index, genome))
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_pending<P: GaProblem>(
    problem: &P,
    pending: &mut [(usize, &mut Genome<P::Gene>)],
    _parallel: bool,
) -> std::result::Result<(), OperatorError> {
    pending
        .iter_mut()
        .try_for_each(|(index, genome)| assign_fitness(problem, *index, genome))
}

fn assign_fitness<P: GaProblem>(
    problem: &P,
    index: usize,
    genome: &mut Genome<P::Gene>,
) -> std::result::Result<(), OperatorError> {
    let value = problem.evaluate(genome.genes())?;
    if !value.is_finite() {
        return Err(OperatorError::NonFiniteFitness { index, value });
    }
    genome.set_fitness(value);
    Ok(())
}

/// Checks size, gene domain and fitness validity before a population is
/// published.
fn check_population<P: GaProblem>(
    problem: &P,
    config: &GaConfig,
    population: &[Genome<P::Gene>],
    generation: usize,
) -> std::result::Result<(), InvariantViolation> {
    if population.len() != config.population_size {
        return Err(InvariantViolation::PopulationSize {
            generation,
            expected: config.population_size,
            actual: population.len(),
        });
    }
    for (index, genome) in population.iter().enumerate() {
        if !genome.is_valid() {
            return Err(InvariantViolation::InvalidFitness { generation, index });
        }
        if !problem.in_domain(genome.genes()) {
            return Err(InvariantViolation::GeneOutOfDomain { generation, index });
        }
    }
    Ok(())
}

/// Finds the best genome; the first one wins ties.
fn find_best<G>(
    population: &[Genome<G>],
    direction: Direction,
    generation: usize,
) -> std::result::Result<(&Genome<G>, f64), InvariantViolation> {
    let mut best: Option<(&Genome<G>, f64)> = None;
    for (index, genome) in population.iter().enumerate() {
        let fitness = genome
            .fitness()
            .ok_or(InvariantViolation::InvalidFitness { generation, index })?;
        match best {
            Some((_, current)) if !direction.is_better(fitness, current) => {}
            _ => best = Some((genome, fitness)),
        }
    }
    best.ok_or(InvariantViolation::PopulationSize {
        generation,
        expected: 1,
        actual: 0,
    })
}

// ============================================================================
// Tests
// ============================================================================
