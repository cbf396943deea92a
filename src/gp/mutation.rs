//! Mutation operators for genetic programming.
//!
//! Uniform mutation picks any node, discards the subtree rooted there and
//! grows a fresh subtree of the same return type in its place.

use rand::Rng;

use crate::error::GpResult;
use crate::generate::{StopCondition, generate};
use crate::registry::PrimitiveSet;
use crate::tree::PrimitiveTree;
use crate::value::TypeTag;

/// Produces a mutated copy of a tree.
pub trait Mutator {
    /// Return a new tree derived from `tree`; the input is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates generation errors from the replacement subtree.
    fn mutate<R: Rng + ?Sized>(&self, tree: &PrimitiveTree, rng: &mut R) -> GpResult<PrimitiveTree>;
}

/// Source of replacement subtrees for [`UniformMutation`].
pub trait SubtreeGenerator {
    /// Generate a tree whose root returns `ret`.
    ///
    /// # Errors
    ///
    /// Propagates generation errors.
    fn generate<R: Rng + ?Sized>(&self, registry: &PrimitiveSet, ret: TypeTag, rng: &mut R) -> GpResult<PrimitiveTree>;
}

/// Generates subtrees with height in `[min, max)` under a stop condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightBounded<C> {
    /// Inclusive lower height bound.
    pub min: usize,
    /// Exclusive upper height bound.
    pub max: usize,
    /// Stop condition driving generation.
    pub condition: C,
}

impl<C> HeightBounded<C> {
    /// Generator for heights in `[min, max)`.
    #[must_use]
    pub fn new(min: usize, max: usize, condition: C) -> Self {
        Self { min, max, condition }
    }
}

impl<C: StopCondition> SubtreeGenerator for HeightBounded<C> {
    fn generate<R: Rng + ?Sized>(&self, registry: &PrimitiveSet, ret: TypeTag, rng: &mut R) -> GpResult<PrimitiveTree> {
        generate(registry, self.min, self.max, &self.condition, ret, rng)
    }
}

/// Replaces a uniformly chosen subtree with a freshly generated one.
#[derive(Debug, Clone, Copy)]
pub struct UniformMutation<'a, G> {
    registry: &'a PrimitiveSet,
    generator: G,
}

impl<'a, G> UniformMutation<'a, G> {
    /// Mutation drawing replacement subtrees from `registry` via `generator`.
    #[must_use]
    pub fn new(registry: &'a PrimitiveSet, generator: G) -> Self {
        Self { registry, generator }
    }
}

impl<G: SubtreeGenerator> Mutator for UniformMutation<'_, G> {
    fn mutate<R: Rng + ?Sized>(&self, tree: &PrimitiveTree, rng: &mut R) -> GpResult<PrimitiveTree> {
        let index = rng.gen_range(0..tree.len());
        let range = tree.subtree_range(index);
        let ret = tree.nodes()[index].ret();

        let replacement = self.generator.generate(self.registry, ret, rng)?;
        Ok(tree.splice(range, replacement.nodes()))
    }
}
