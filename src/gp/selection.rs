//! Selection operators for genetic programming.
//!
//! Selection determines which individuals reproduce. Selected individuals
//! are always copies with an invalid fitness, so the offspring can be varied
//! freely without touching the population they came from.

// Statistics over population sizes
#![allow(clippy::cast_precision_loss)]

use rand::Rng;
use rand::seq::index;
use serde::Serialize;

use crate::gp::Individual;

/// Copies of `min(k, population.len())` distinct individuals in random order.
#[must_use]
pub fn select_random<R: Rng + ?Sized>(population: &[Individual], k: usize, rng: &mut R) -> Vec<Individual> {
    let amount = k.min(population.len());
    index::sample(rng, population.len(), amount)
        .into_iter()
        .map(|i| population[i].copy())
        .collect()
}

/// Tournament selection.
///
/// Runs `min(k, population.len())` tournaments. Each samples
/// `tournament_size` distinct aspirants (at least one, at most the whole
/// population), compares their current fitness and appends a copy of the
/// fittest. The first aspirant drawn wins ties.
#[must_use]
pub fn select_tournament<R: Rng + ?Sized>(
    population: &[Individual],
    k: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    let k = k.min(population.len());
    let aspirants = tournament_size.clamp(1, population.len().max(1));

    let mut chosen = Vec::with_capacity(k);
    for _ in 0..k {
        let winner = index::sample(rng, population.len(), aspirants)
            .into_iter()
            .map(|i| &population[i])
            .reduce(fitter);
        if let Some(winner) = winner {
            chosen.push(winner.copy());
        }
    }
    chosen
}

/// The fittest individual, first one on ties. `None` for an empty population.
#[must_use]
pub fn best(population: &[Individual]) -> Option<&Individual> {
    population.iter().reduce(fitter)
}

fn fitter<'a>(incumbent: &'a Individual, challenger: &'a Individual) -> &'a Individual {
    if challenger.fitness().greater_than(incumbent.fitness()) {
        challenger
    } else {
        incumbent
    }
}

/// Summary of the first weighted objective over the valid individuals of a
/// population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PopulationStats {
    /// Number of individuals with a valid fitness.
    pub valid: usize,
    /// Highest first weighted value.
    pub best: f64,
    /// Lowest first weighted value.
    pub worst: f64,
    /// Mean first weighted value.
    pub mean: f64,
    /// Standard deviation of the first weighted value.
    pub std: f64,
}

impl PopulationStats {
    /// Compute statistics; all zero when no individual is valid.
    #[must_use]
    pub fn from_population(population: &[Individual]) -> Self {
        let values: Vec<f64> = population
            .iter()
            .filter_map(|ind| ind.fitness().weighted_values().first().copied())
            .collect();
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            valid: values.len(),
            best: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            worst: values.iter().copied().fold(f64::INFINITY, f64::min),
            mean,
            std: variance.sqrt(),
        }
    }
}
