//! Generation observers.
//!
//! An [`Observer`] is notified once after the initial population is
//! evaluated and once after every replacement. It only ever sees a shared
//! borrow of the population, so it cannot change engine state or keep
//! references past the call.

use super::types::Genome;

/// Receives a read-only snapshot of each generation.
///
/// Closures of the form `FnMut(&[Genome<G>], usize)` are observers:
///
/// ```
/// use u_evolve::ga::{Genome, Observer};
///
/// let mut sizes = Vec::new();
/// let mut record = |population: &[Genome<bool>], generation: usize| {
///     sizes.push((generation, population.len()));
/// };
/// record.on_generation(&[Genome::new(vec![true])], 0);
/// assert_eq!(sizes, vec![(0, 1)]);
/// ```
pub trait Observer<G> {
    /// Called with the current population and its generation index.
    fn on_generation(&mut self, population: &[Genome<G>], generation: usize);
}

impl<G, F> Observer<G> for F
where
    F: FnMut(&[Genome<G>], usize),
{
    fn on_generation(&mut self, population: &[Genome<G>], generation: usize) {
        self(population, generation)
    }
}

/// Observer that ignores every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl<G> Observer<G> for NoObserver {
    fn on_generation(&mut self, _population: &[Genome<G>], _generation: usize) {}
}
