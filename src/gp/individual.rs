//! A program tree paired with its fitness.

use crate::gp::Fitness;
use crate::tree::PrimitiveTree;

/// Member of a population.
///
/// `Clone` duplicates the fitness as well; [`Individual::copy`] is the
/// selection copy, which starts over with an invalid fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    tree: PrimitiveTree,
    fitness: Fitness,
}

impl Individual {
    /// Pair `tree` with `fitness`.
    #[must_use]
    pub fn new(tree: PrimitiveTree, fitness: Fitness) -> Self {
        Self { tree, fitness }
    }

    /// The program tree.
    #[must_use]
    pub fn tree(&self) -> &PrimitiveTree {
        &self.tree
    }

    /// Replace the tree and invalidate the fitness.
    pub fn set_tree(&mut self, tree: PrimitiveTree) {
        self.tree = tree;
        self.fitness.invalidate();
    }

    /// The fitness.
    #[must_use]
    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    /// Mutable access to the fitness, used by evaluation callbacks.
    pub fn fitness_mut(&mut self) -> &mut Fitness {
        &mut self.fitness
    }

    /// Independent copy with the same tree and a fresh, invalid fitness
    /// carrying the same weights.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            fitness: self.fitness.cleared(),
        }
    }
}
