//! Selection strategies.
//!
//! Selection resamples the evaluated population into the parent pool of
//! the next generation. Different strategies provide different selection
//! pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{Direction, Genome};
use crate::error::ConfigError;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies honor the [`Direction`] passed at selection time.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// // Binary tournament (light pressure)
/// let sel = Selection::Tournament(2);
///
/// // Rank-based
/// let sel = Selection::Rank;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: draw `k` genomes uniformly with replacement,
    /// keep the best. Ties go to the first drawn.
    ///
    /// Higher `k` = stronger selection pressure.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Fitness is shifted so the worst genome gets a tiny positive weight
    /// and the best gets the largest.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Rank-based selection.
    ///
    /// Genomes are sorted best-first and the one at rank `r` gets weight
    /// `n - r`. This avoids the scaling problems of roulette wheel
    /// selection.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per call to [`select_many`](Selection::select_many)
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Checks strategy parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Selection::Tournament(0) => Err(ConfigError::EmptyTournament),
            _ => Ok(()),
        }
    }

    /// Selects one parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<G, R: Rng>(
        &self,
        population: &[Genome<G>],
        direction: Direction,
        rng: &mut R,
    ) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let fitnesses = fitness_values(population, direction);
        match self {
            Selection::Tournament(k) => tournament(&fitnesses, *k, direction, rng),
            Selection::Roulette => roulette(&roulette_weights(&fitnesses, direction), rng),
            Selection::Rank => rank(&ranked_indices(&fitnesses, direction), rng),
        }
    }

    /// Selects `k` parent indices, slot by slot.
    ///
    /// Returns an empty vector if `population` is empty.
    pub fn select_many<G, R: Rng>(
        &self,
        population: &[Genome<G>],
        k: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<usize> {
        if population.is_empty() {
            return Vec::new();
        }

        let fitnesses = fitness_values(population, direction);
        match self {
            Selection::Tournament(size) => (0..k)
                .map(|_| tournament(&fitnesses, *size, direction, rng))
                .collect(),
            Selection::Roulette => {
                let weights = roulette_weights(&fitnesses, direction);
                (0..k).map(|_| roulette(&weights, rng)).collect()
            }
            Selection::Rank => {
                let ranked = ranked_indices(&fitnesses, direction);
                (0..k).map(|_| rank(&ranked, rng)).collect()
            }
        }
    }
}

/// Fitness per genome; unevaluated genomes count as the worst.
fn fitness_values<G>(population: &[Genome<G>], direction: Direction) -> Vec<f64> {
    population
        .iter()
        .map(|genome| genome.fitness().unwrap_or(direction.worst()))
        .collect()
}

/// Tournament selection: draw k random indices, return the best.
fn tournament<R: Rng>(fitnesses: &[f64], k: usize, direction: Direction, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = fitnesses.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if direction.is_better(fitnesses[idx], fitnesses[best_idx]) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette weights: distance from the worst fitness, plus epsilon.
fn roulette_weights(fitnesses: &[f64], direction: Direction) -> Vec<f64> {
    let epsilon = 1e-10;
    let finite = fitnesses.iter().copied().filter(|f| f.is_finite());

    match direction {
        Direction::Minimize => {
            let worst = finite.fold(f64::NEG_INFINITY, f64::max);
            fitnesses
                .iter()
                .map(|&f| (worst - f + epsilon).max(epsilon))
                .collect()
        }
        Direction::Maximize => {
            let worst = finite.fold(f64::INFINITY, f64::min);
            fitnesses
                .iter()
                .map(|&f| (f - worst + epsilon).max(epsilon))
                .collect()
        }
    }
}

fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    if n == 1 {
        return 0;
    }

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Indices sorted best-first. Stable, so equal fitness keeps input order.
fn ranked_indices(fitnesses: &[f64], direction: Direction) -> Vec<usize> {
    let mut indexed: Vec<usize> = (0..fitnesses.len()).collect();
    indexed.sort_by(|&a, &b| {
        let ord = fitnesses[a]
            .partial_cmp(&fitnesses[b])
            .unwrap_or(std::cmp::Ordering::Equal);
        match direction {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    });
    indexed
}

/// Linear ranking over `ranked` (best first): rank r has weight n - r.
fn rank<R: Rng>(ranked: &[usize], rng: &mut R) -> usize {
    let n = ranked.len();
    if n == 1 {
        return ranked[0];
    }

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &original_idx) in ranked.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    ranked[n - 1] // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Genome<u8>> {
        fitnesses
            .iter()
            .map(|&f| {
                let mut genome = Genome::new(vec![0u8]);
                genome.set_fitness(f);
                genome
            })
            .collect()
    }

    #[test]
    fn test_tournament_favors_best_minimize() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for idx in Selection::Tournament(4).select_many(&pop, n, Direction::Minimize, &mut rng) {
            counts[idx] += 1;
        }
        // Index 2 (fitness=1.0) should dominate
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_favors_best_maximize() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for idx in Selection::Tournament(4).select_many(&pop, 10000, Direction::Maximize, &mut rng) {
            counts[idx] += 1;
        }
        assert!(counts[0] > 6000, "got counts: {counts:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for idx in Selection::Tournament(1).select_many(&pop, 10000, Direction::Minimize, &mut rng) {
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_ties_go_to_first_drawn() {
        let fitnesses = [5.0, 5.0, 5.0, 5.0];
        let mut rng = create_rng(3);
        let mut replay = create_rng(3);

        for _ in 0..100 {
            let chosen = tournament(&fitnesses, 3, Direction::Maximize, &mut rng);
            let first = replay.random_range(0..4usize);
            let _ = replay.random_range(0..4usize);
            let _ = replay.random_range(0..4usize);
            assert_eq!(chosen, first);
        }
    }

    #[test]
    fn test_select_many_count() {
        let pop = make_population(&[1.0, 2.0, 3.0]);
        let mut rng = create_rng(1);
        for sel in [Selection::Tournament(2), Selection::Roulette, Selection::Rank] {
            let picked = sel.select_many(&pop, 7, Direction::Maximize, &mut rng);
            assert_eq!(picked.len(), 7);
            assert!(picked.iter().all(|&i| i < 3));
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for idx in Selection::Roulette.select_many(&pop, 10000, Direction::Minimize, &mut rng) {
            counts[idx] += 1;
        }
        // Index 2 (fitness=1.0, lowest) should be selected most often
        let best_count = counts[2];
        let worst_count = counts[0];
        assert!(
            best_count > worst_count,
            "best should be selected more often: best={best_count}, worst={worst_count}"
        );
    }

    #[test]
    fn test_roulette_maximize() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for idx in Selection::Roulette.select_many(&pop, 10000, Direction::Maximize, &mut rng) {
            counts[idx] += 1;
        }
        assert!(counts[0] > counts[2], "got counts: {counts:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for idx in Selection::Rank.select_many(&pop, 10000, Direction::Minimize, &mut rng) {
            counts[idx] += 1;
        }
        // Index 2 (fitness=1.0, best) should be selected most
        let best_count = counts[2];
        let worst_count = counts[0];
        assert!(
            best_count > worst_count,
            "best should be selected more: best={best_count}, worst={worst_count}"
        );
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);

        for sel in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
            assert_eq!(sel.select(&pop, Direction::Minimize, &mut rng), 0);
        }
    }

    #[test]
    fn test_equal_fitness() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let mut rng = create_rng(42);

        // With equal fitness, tournament should select roughly uniformly
        let mut counts = [0u32; 4];
        for idx in Selection::Tournament(2).select_many(&pop, 10000, Direction::Minimize, &mut rng) {
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(
                c > 1500,
                "expected roughly uniform with equal fitness, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_validate_tournament_size() {
        assert_eq!(
            Selection::Tournament(0).validate(),
            Err(ConfigError::EmptyTournament)
        );
        assert!(Selection::Tournament(1).validate().is_ok());
        assert!(Selection::Rank.validate().is_ok());
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Genome<u8>> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, Direction::Minimize, &mut rng);
    }
}
