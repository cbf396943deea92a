//! Main evolution loop for genetic programming.
//!
//! Every generation selects offspring by tournament, varies them with
//! crossover and mutation, evaluates the ones whose fitness was invalidated
//! and replaces the population with them.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GpError, GpResult};
use crate::gp::selection::{PopulationStats, best, select_tournament};
use crate::gp::{Crossover, Individual, Mutator};

/// Configuration for the evolution process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of generations to run.
    pub generations: usize,
    /// Aspirants per tournament.
    pub tournament_size: usize,
    /// Offspring selected per generation; `None` keeps the population size.
    pub selection_size: Option<usize>,
    /// Probability that a pair of offspring is crossed over.
    pub crossover_probability: f64,
    /// Probability that an offspring is mutated.
    pub mutation_probability: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generations: 40,
            tournament_size: 7,
            selection_size: None,
            crossover_probability: 0.5,
            mutation_probability: 0.2,
        }
    }
}

/// Configuration plus the variation operators it drives.
#[derive(Debug, Clone, Copy)]
pub struct EvolutionSettings<C, M> {
    /// Loop parameters.
    pub config: EvolutionConfig,
    /// Crossover applied to offspring pairs.
    pub crossover: C,
    /// Mutator applied to single offspring.
    pub mutator: M,
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Generation number, from 0.
    pub generation: usize,
    /// Evaluation callbacks made in this generation.
    pub evaluations: usize,
    /// Fitness summary of the population that came out of the generation.
    pub population: PopulationStats,
}

/// Overall statistics from an evolution run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvolutionStats {
    /// Statistics per generation.
    pub generations: Vec<GenerationStats>,
    /// Evaluation callbacks made in total, initial population included.
    pub evaluations: usize,
    /// Wall-clock duration of the run in seconds.
    pub elapsed_seconds: f64,
}

/// Apply crossover and mutation to freshly selected offspring in place.
///
/// Pairs `(0, 1)`, `(2, 3)`, ... are crossed with the configured probability;
/// then every offspring is mutated with the configured probability. Any
/// individual whose tree is replaced has its fitness invalidated.
///
/// # Errors
///
/// Propagates mutation errors.
pub fn vary<C, M, R>(offspring: &mut [Individual], settings: &EvolutionSettings<C, M>, rng: &mut R) -> GpResult<()>
where
    C: Crossover,
    M: Mutator,
    R: Rng + ?Sized,
{
    for pair in offspring.chunks_exact_mut(2) {
        if rng.r#gen::<f64>() < settings.config.crossover_probability {
            let (first, second) = settings.crossover.cross(pair[0].tree(), pair[1].tree(), rng);
            pair[0].set_tree(first);
            pair[1].set_tree(second);
        }
    }

    for individual in offspring.iter_mut() {
        if rng.r#gen::<f64>() < settings.config.mutation_probability {
            let mutant = settings.mutator.mutate(individual.tree(), rng)?;
            individual.set_tree(mutant);
        }
    }

    Ok(())
}

/// Run the evolution process.
///
/// Invalid members of the initial population are evaluated first. The
/// `evaluate` callback must leave a valid fitness on the individual it is
/// given.
///
/// Returns the final population and run statistics.
///
/// # Errors
///
/// - [`GpError::FitnessNotAssigned`] if `evaluate` leaves a fitness invalid
/// - mutation errors from [`vary`]
pub fn run_evolution<C, M, F, R>(
    mut population: Vec<Individual>,
    settings: &EvolutionSettings<C, M>,
    mut evaluate: F,
    rng: &mut R,
) -> GpResult<(Vec<Individual>, EvolutionStats)>
where
    C: Crossover,
    M: Mutator,
    F: FnMut(&mut Individual),
    R: Rng + ?Sized,
{
    let start_time = Instant::now();
    let config = &settings.config;
    let mut stats = EvolutionStats::default();

    stats.evaluations += evaluate_invalid(&mut population, &mut evaluate)?;
    info!(
        population = population.len(),
        evaluations = stats.evaluations,
        "initial population evaluated"
    );

    for generation in 0..config.generations {
        let selection_size = config.selection_size.unwrap_or(population.len());
        let mut offspring = select_tournament(&population, selection_size, config.tournament_size, rng);
        vary(&mut offspring, settings, rng)?;
        let evaluations = evaluate_invalid(&mut offspring, &mut evaluate)?;
        stats.evaluations += evaluations;

        if let Some(fittest) = best(&population) {
            info!(generation, evaluations, best = %fittest.fitness(), "generation complete");
        }

        let summary = PopulationStats::from_population(&offspring);
        debug!(
            generation,
            best = summary.best,
            mean = summary.mean,
            std = summary.std,
            "offspring fitness"
        );
        stats.generations.push(GenerationStats {
            generation,
            evaluations,
            population: summary,
        });

        population = offspring;
    }

    stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
    Ok((population, stats))
}

/// Evaluate every individual with an invalid fitness, returning how many
/// were evaluated.
fn evaluate_invalid<F>(individuals: &mut [Individual], evaluate: &mut F) -> GpResult<usize>
where
    F: FnMut(&mut Individual),
{
    let mut evaluations = 0;
    for (index, individual) in individuals.iter_mut().enumerate() {
        if individual.fitness().is_valid() {
            continue;
        }
        evaluate(individual);
        evaluations += 1;
        if !individual.fitness().is_valid() {
            return Err(GpError::FitnessNotAssigned { index });
        }
    }
    Ok(evaluations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::vocabulary;
    use crate::generate::{Full, generate};
    use crate::gp::{Fitness, HeightBounded, OnePoint, UniformMutation};
    use crate::tree::PrimitiveTree;
    use crate::value::TypeTag;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn score_by_size(ind: &mut Individual) {
        #[allow(clippy::cast_precision_loss)]
        let size = ind.tree().len() as f64;
        ind.fitness_mut().set_values(&[size]).unwrap();
    }

    #[test]
    fn test_evolution_config_default() {
        let config = EvolutionConfig::default();
        assert_eq!(config.generations, 40);
        assert_eq!(config.tournament_size, 7);
        assert_eq!(config.selection_size, None);
        assert!((config.crossover_probability - 0.5).abs() < f64::EPSILON);
        assert!((config.mutation_probability - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EvolutionConfig = serde_json::from_str(r#"{"generations": 3, "selection_size": 12}"#).unwrap();
        assert_eq!(config.generations, 3);
        assert_eq!(config.selection_size, Some(12));
        assert_eq!(config.tournament_size, 7);
    }

    #[test]
    fn test_vary_probabilities() {
        let v = vocabulary();
        let mut rng = SmallRng::seed_from_u64(42);
        let tree = PrimitiveTree::new(v.valid_nodes()).unwrap();
        let mut offspring: Vec<Individual> = (0..4)
            .map(|_| {
                let mut ind = Individual::new(tree.clone(), Fitness::new([1.0]).unwrap());
                score_by_size(&mut ind);
                ind
            })
            .collect();

        let mut settings = EvolutionSettings {
            config: EvolutionConfig {
                crossover_probability: 0.0,
                mutation_probability: 0.0,
                ..EvolutionConfig::default()
            },
            crossover: OnePoint,
            mutator: UniformMutation::new(&v.set, HeightBounded::new(0, 2, Full)),
        };
        vary(&mut offspring, &settings, &mut rng).unwrap();
        assert!(offspring.iter().all(|ind| ind.fitness().is_valid()));

        settings.config.mutation_probability = 1.0;
        vary(&mut offspring, &settings, &mut rng).unwrap();
        assert!(offspring.iter().all(|ind| !ind.fitness().is_valid()));
    }

    #[test]
    fn test_run_evolution_stats() {
        let v = vocabulary();
        let mut rng = SmallRng::seed_from_u64(7);
        let population: Vec<Individual> = (0..6)
            .map(|_| {
                let tree = generate(&v.set, 1, 3, &Full, TypeTag::Int, &mut rng).unwrap();
                Individual::new(tree, Fitness::new([1.0]).unwrap())
            })
            .collect();
        let settings = EvolutionSettings {
            config: EvolutionConfig {
                generations: 3,
                tournament_size: 3,
                ..EvolutionConfig::default()
            },
            crossover: OnePoint,
            mutator: UniformMutation::new(&v.set, HeightBounded::new(0, 2, Full)),
        };

        let (population, stats) = run_evolution(population, &settings, score_by_size, &mut rng).unwrap();
        assert_eq!(population.len(), 6);
        assert!(population.iter().all(|ind| ind.fitness().is_valid()));
        assert_eq!(stats.generations.len(), 3);
        // selection copies are always re-evaluated
        assert_eq!(stats.evaluations, 6 * 4);
        assert!(stats.generations.iter().all(|g| g.population.valid == 6));
    }

    #[test]
    fn test_missing_fitness_is_an_error() {
        let v = vocabulary();
        let mut rng = SmallRng::seed_from_u64(7);
        let tree = PrimitiveTree::new(v.valid_nodes()).unwrap();
        let population = vec![Individual::new(tree, Fitness::new([1.0]).unwrap())];
        let settings = EvolutionSettings {
            config: EvolutionConfig::default(),
            crossover: OnePoint,
            mutator: UniformMutation::new(&v.set, HeightBounded::new(0, 2, Full)),
        };

        let result = run_evolution(population, &settings, |_| {}, &mut rng);
        assert_eq!(result.unwrap_err(), GpError::FitnessNotAssigned { index: 0 });
    }
}
