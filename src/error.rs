//! Error types for tree evaluation, generation and fitness assignment.

use thiserror::Error;

use crate::value::TypeTag;

/// Structural failures raised while evaluating a node.
///
/// These indicate a tree that does not respect the typed vocabulary it was
/// built from; they are never produced by a primitive's own function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A node received the wrong number of child values.
    #[error("{node}: expected {expected} argument(s), got {got}")]
    Arity {
        /// Name of the offending node.
        node: String,
        /// Declared arity.
        expected: usize,
        /// Number of values actually supplied.
        got: usize,
    },
    /// A child value does not match the declared argument type.
    #[error("{node}: argument {position} expected {expected}, got {got}")]
    Type {
        /// Name of the offending node.
        node: String,
        /// Zero-based argument position.
        position: usize,
        /// Declared argument type.
        expected: TypeTag,
        /// Runtime type of the supplied value.
        got: TypeTag,
    },
}

/// Errors raised by [`Fitness`](crate::gp::Fitness) construction and updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FitnessError {
    /// A fitness needs at least one objective weight.
    #[error("fitness weights must not be empty")]
    EmptyWeights,
    /// The number of raw values does not match the number of weights.
    #[error("expected {expected} fitness value(s), got {got}")]
    ShapeMismatch {
        /// Number of weights.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}

/// Errors raised by the engine: generation, tree construction and the
/// evolutionary loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GpError {
    /// Generation needed a terminal of a type that has none registered.
    #[error("no terminal registered for type {0}")]
    NoTerminal(TypeTag),
    /// Generation needed a primitive of a type that has none registered.
    #[error("no primitive registered for type {0}")]
    NoPrimitive(TypeTag),
    /// The height range `[min, max)` is empty.
    #[error("invalid height range [{min}, {max})")]
    InvalidHeightRange {
        /// Inclusive lower bound.
        min: usize,
        /// Exclusive upper bound.
        max: usize,
    },
    /// A node sequence is not exactly one pre-order tree.
    #[error("malformed tree: {len} node(s) do not form a single pre-order tree")]
    MalformedTree {
        /// Length of the rejected sequence.
        len: usize,
    },
    /// The evaluation callback returned without setting a fitness.
    #[error("evaluation left individual {index} without a fitness")]
    FitnessNotAssigned {
        /// Offspring index.
        index: usize,
    },
    /// Tree evaluation failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
    /// Fitness assignment failed.
    #[error(transparent)]
    Fitness(#[from] FitnessError),
}

/// Result type for engine operations.
pub type GpResult<T> = Result<T, GpError>;
