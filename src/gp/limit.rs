//! Static size limit against bloat.

use rand::Rng;
use tracing::debug;

use crate::error::GpResult;
use crate::gp::{Crossover, Mutator};
use crate::tree::PrimitiveTree;

/// Wraps a crossover or mutator and rejects outputs with more than `limit`
/// nodes.
///
/// A rejected crossover child is replaced by one of the two parents, chosen
/// uniformly; a rejected mutant is replaced by the unmutated input. Inputs
/// within the limit therefore always produce outputs within the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimit<T> {
    inner: T,
    limit: usize,
}

impl<T> SizeLimit<T> {
    /// Limit `inner` to outputs of at most `limit` nodes.
    #[must_use]
    pub fn new(inner: T, limit: usize) -> Self {
        Self { inner, limit }
    }

    /// Maximum number of nodes of an accepted output.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl<T: Crossover> Crossover for SizeLimit<T> {
    fn cross<R: Rng + ?Sized>(
        &self,
        first: &PrimitiveTree,
        second: &PrimitiveTree,
        rng: &mut R,
    ) -> (PrimitiveTree, PrimitiveTree) {
        let (first_child, second_child) = self.inner.cross(first, second, rng);
        let mut accept = |child: PrimitiveTree| {
            if child.len() <= self.limit {
                return child;
            }
            debug!(len = child.len(), limit = self.limit, "crossover child over size limit");
            if rng.gen_bool(0.5) { first.clone() } else { second.clone() }
        };
        (accept(first_child), accept(second_child))
    }
}

impl<T: Mutator> Mutator for SizeLimit<T> {
    fn mutate<R: Rng + ?Sized>(&self, tree: &PrimitiveTree, rng: &mut R) -> GpResult<PrimitiveTree> {
        let mutant = self.inner.mutate(tree, rng)?;
        if mutant.len() > self.limit {
            debug!(len = mutant.len(), limit = self.limit, "mutant over size limit");
            return Ok(tree.clone());
        }
        Ok(mutant)
    }
}
