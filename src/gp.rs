//! Genetic operators, fitness and the generational loop.
//!
//! This module evolves populations of [`Individual`]s, each pairing a
//! [`PrimitiveTree`](crate::tree::PrimitiveTree) with a multi-objective
//! [`Fitness`]. Every operator takes its trees by reference and returns new
//! ones, so parents and offspring never share a node sequence.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Evolution Loop              │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │     Size Limit (bloat control)      │
//! ├─────────────────────────────────────┤
//! │   Fitness Evaluation (callback)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use treegp::gp::{EvolutionConfig, EvolutionSettings, HeightBounded, OnePoint, UniformMutation, run_evolution};
//! use treegp::generate::Full;
//!
//! let settings = EvolutionSettings {
//!     config: EvolutionConfig::default(),
//!     crossover: OnePoint,
//!     mutator: UniformMutation::new(&registry, HeightBounded::new(0, 2, Full)),
//! };
//! let (population, stats) = run_evolution(population, &settings, evaluate, &mut rng)?;
//! ```

mod crossover;
mod evolution;
mod fitness;
mod individual;
mod limit;
mod mutation;
mod selection;

pub use crossover::{Crossover, OnePoint};
pub use evolution::{EvolutionConfig, EvolutionSettings, EvolutionStats, GenerationStats, run_evolution, vary};
pub use fitness::Fitness;
pub use individual::Individual;
pub use limit::SizeLimit;
pub use mutation::{HeightBounded, Mutator, SubtreeGenerator, UniformMutation};
pub use selection::{PopulationStats, best, select_random, select_tournament};
