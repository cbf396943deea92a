//! Crossover operators for genetic programming.
//!
//! Crossover exchanges subtrees between two parents. Only subtrees whose
//! roots return the same type are swapped, so both children stay well typed.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::tree::PrimitiveTree;
use crate::value::TypeTag;

/// Combines two parent trees into two children.
pub trait Crossover {
    /// Produce two new trees from `first` and `second`. The parents are left
    /// untouched.
    fn cross<R: Rng + ?Sized>(
        &self,
        first: &PrimitiveTree,
        second: &PrimitiveTree,
        rng: &mut R,
    ) -> (PrimitiveTree, PrimitiveTree);
}

/// One-point subtree crossover.
///
/// Picks a return type present below the root of both parents, one subtree
/// of that type in each, and swaps them. Parents with fewer than two nodes,
/// or without a common non-root type, come back as unchanged copies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnePoint;

impl Crossover for OnePoint {
    fn cross<R: Rng + ?Sized>(
        &self,
        first: &PrimitiveTree,
        second: &PrimitiveTree,
        rng: &mut R,
    ) -> (PrimitiveTree, PrimitiveTree) {
        if first.len() < 2 || second.len() < 2 {
            return (first.clone(), second.clone());
        }

        let first_types = non_root_indices_by_type(first);
        let second_types = non_root_indices_by_type(second);
        let common: Vec<TypeTag> = first_types
            .keys()
            .filter(|ty| second_types.contains_key(ty))
            .copied()
            .collect();

        let Some(ty) = common.choose(rng).copied() else {
            debug!(first = %first, second = %second, "no common type for crossover");
            return (first.clone(), second.clone());
        };

        let first_index = first_types.get(&ty).and_then(|indices| indices.choose(rng)).copied();
        let second_index = second_types.get(&ty).and_then(|indices| indices.choose(rng)).copied();
        let (Some(first_index), Some(second_index)) = (first_index, second_index) else {
            return (first.clone(), second.clone());
        };

        let first_range = first.subtree_range(first_index);
        let second_range = second.subtree_range(second_index);

        let first_child = first.splice(first_range.clone(), &second.nodes()[second_range.clone()]);
        let second_child = second.splice(second_range, &first.nodes()[first_range]);
        (first_child, second_child)
    }
}

/// Indices of every non-root node, grouped by return type.
fn non_root_indices_by_type(tree: &PrimitiveTree) -> BTreeMap<TypeTag, Vec<usize>> {
    let mut by_type: BTreeMap<TypeTag, Vec<usize>> = BTreeMap::new();
    for (index, node) in tree.nodes().iter().enumerate().skip(1) {
        by_type.entry(node.ret()).or_default().push(index);
    }
    by_type
}
