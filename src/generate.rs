//! Random tree generation.
//!
//! Trees are built depth-first with an explicit stack of `(depth, type)`
//! slots still to fill. A [`StopCondition`] decides at every slot whether a
//! terminal closes the branch or a primitive opens further slots.

use std::rc::Rc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{GpError, GpResult};
use crate::node::Node;
use crate::registry::PrimitiveSet;
use crate::tree::PrimitiveTree;
use crate::value::TypeTag;

/// Position of the slot being filled, passed to [`StopCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenState {
    /// Target height drawn for this tree.
    pub height: usize,
    /// Depth of the slot; the root is at depth 0.
    pub depth: usize,
    /// Inclusive lower bound of the height range.
    pub min_height: usize,
    /// Exclusive upper bound of the height range.
    pub max_height: usize,
}

/// Decides whether the slot at a given depth receives a terminal.
pub trait StopCondition {
    /// Return `true` to place a terminal, `false` for a primitive.
    fn should_stop<R: Rng + ?Sized>(&self, state: &GenState, registry: &PrimitiveSet, rng: &mut R) -> bool;
}

/// Every branch reaches exactly the target height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Full;

impl StopCondition for Full {
    fn should_stop<R: Rng + ?Sized>(&self, state: &GenState, _registry: &PrimitiveSet, _rng: &mut R) -> bool {
        state.depth == state.height
    }
}

/// Branches may stop early once past the minimum height, with probability
/// equal to the registry's terminal ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grow;

impl StopCondition for Grow {
    fn should_stop<R: Rng + ?Sized>(&self, state: &GenState, registry: &PrimitiveSet, rng: &mut R) -> bool {
        state.depth == state.height
            || (state.depth >= state.min_height && rng.gen_bool(registry.terminal_ratio()))
    }
}

/// Flips a fair coin on every call between [`Grow`] and [`Full`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HalfAndHalf;

impl StopCondition for HalfAndHalf {
    fn should_stop<R: Rng + ?Sized>(&self, state: &GenState, registry: &PrimitiveSet, rng: &mut R) -> bool {
        if rng.gen_bool(0.5) {
            Grow.should_stop(state, registry, rng)
        } else {
            Full.should_stop(state, registry, rng)
        }
    }
}

/// Generate a random tree returning `ret` with height in `[min_height, max_height)`.
///
/// # Errors
///
/// - [`GpError::InvalidHeightRange`] if `max_height <= min_height`
/// - [`GpError::NoTerminal`] / [`GpError::NoPrimitive`] if a slot's type has
///   no node of the kind the condition asked for
pub fn generate<C, R>(
    registry: &PrimitiveSet,
    min_height: usize,
    max_height: usize,
    condition: &C,
    ret: TypeTag,
    rng: &mut R,
) -> GpResult<PrimitiveTree>
where
    C: StopCondition,
    R: Rng + ?Sized,
{
    if max_height <= min_height {
        return Err(GpError::InvalidHeightRange {
            min: min_height,
            max: max_height,
        });
    }

    let height = rng.gen_range(min_height..max_height);
    let mut nodes = Vec::new();
    let mut slots = vec![(0usize, ret)];

    while let Some((depth, ty)) = slots.pop() {
        let state = GenState {
            height,
            depth,
            min_height,
            max_height,
        };

        if condition.should_stop(&state, registry, rng) {
            let terminal = registry.terminals(ty).choose(rng).ok_or(GpError::NoTerminal(ty))?;
            nodes.push(Node::Terminal(Rc::clone(terminal)));
        } else {
            let primitive = registry.primitives(ty).choose(rng).ok_or(GpError::NoPrimitive(ty))?;
            // Reversed so the first argument is popped, and emitted, first
            slots.extend(primitive.arg_types().iter().rev().map(|arg| (depth + 1, *arg)));
            nodes.push(Node::Primitive(Rc::clone(primitive)));
        }
    }

    Ok(PrimitiveTree::from_nodes(nodes))
}
