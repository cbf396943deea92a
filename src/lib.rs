// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Treegp: strongly typed tree-based genetic programming.
//!
//! Programs are expression trees over a user-supplied vocabulary of typed
//! primitives (functions) and terminals (constants, producers, program
//! arguments). This crate provides:
//! - Type-respecting random tree generation (full, grow, half-and-half)
//! - Evaluation of a tree against a list of program arguments
//! - One-point crossover, uniform mutation and size limiting
//! - Random and tournament selection, multi-objective fitness
//! - A generational evolution loop with per-generation statistics
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Evolution Loop (gp) / Ant Demo    │
//! ├─────────────────────────────────────┤
//! │   Generation │ Variation │ Fitness  │
//! ├─────────────────────────────────────┤
//! │   PrimitiveTree (pre-order nodes)   │
//! ├─────────────────────────────────────┤
//! │  PrimitiveSet │ Node │ Value/Type   │
//! └─────────────────────────────────────┘
//! ```

pub mod ant;
pub mod error;
pub mod generate;
pub mod gp;
pub mod node;
pub mod registry;
pub mod tree;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use error::{EvalError, FitnessError, GpError, GpResult};

// Re-export the core vocabulary at crate root for convenience
pub use generate::{Full, Grow, HalfAndHalf, generate};
pub use node::{Node, Primitive, Terminal};
pub use registry::PrimitiveSet;
pub use tree::PrimitiveTree;
pub use value::{Callable, TypeTag, Value};
