//! Per-generation fitness statistics.

use super::types::Genome;
use crate::error::InvariantViolation;

/// Summary of one generation, produced by the runner after each
/// replacement (and once for the initial population).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Number of genomes evaluated in this generation.
    pub reevaluated: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl GenerationStats {
    /// Summarizes a fully evaluated population.
    ///
    /// Fails if any genome has stale fitness or the population is empty.
    pub fn from_population<G>(
        generation: usize,
        reevaluated: usize,
        population: &[Genome<G>],
    ) -> Result<Self, InvariantViolation> {
        if population.is_empty() {
            return Err(InvariantViolation::PopulationSize {
                generation,
                expected: 1,
                actual: 0,
            });
        }

        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, genome) in population.iter().enumerate() {
            let fitness = genome
                .fitness()
                .ok_or(InvariantViolation::InvalidFitness { generation, index })?;
            sum += fitness;
            min = min.min(fitness);
            max = max.max(fitness);
        }

        Ok(Self {
            generation,
            reevaluated,
            mean: sum / population.len() as f64,
            min,
            max,
        })
    }
}
