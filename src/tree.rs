//! Flat pre-order representation of program trees.
//!
//! A tree is stored as the pre-order sequence of its nodes: the root first,
//! then the serialization of its first child's subtree, then the second's,
//! and so on. Arities alone determine where every subtree ends, so the
//! sequence can be sliced and spliced without pointers:
//!
//! ```text
//! prim1(4, prim2("hello", 4))
//!
//! index   0      1   2      3        4
//! node    prim1  4   prim2  "hello"  4
//! arity   2      0   2      0        0
//! ```

use std::fmt;
use std::ops::Range;

use crate::error::{EvalError, GpError, GpResult};
use crate::node::Node;
use crate::value::Value;

/// A program tree as a pre-order node sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveTree {
    nodes: Vec<Node>,
}

impl PrimitiveTree {
    /// Build a tree from an explicit pre-order node sequence.
    ///
    /// # Errors
    ///
    /// [`GpError::MalformedTree`] if `nodes` is empty, ends before every node
    /// received its children, or holds more than one tree.
    pub fn new(nodes: Vec<Node>) -> GpResult<Self> {
        match subtree_end(&nodes, 0) {
            Some(end) if end == nodes.len() => Ok(Self { nodes }),
            _ => Err(GpError::MalformedTree { len: nodes.len() }),
        }
    }

    /// Wrap a sequence produced by an invariant-preserving operation.
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        debug_assert_eq!(subtree_end(&nodes, 0), Some(nodes.len()));
        Self { nodes }
    }

    /// The node sequence in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a constructed tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Range of indices covered by the subtree rooted at `begin`.
    ///
    /// Keeps a count of child slots still to fill, starting at the arity of
    /// `begin`; every following node fills one slot and opens its own. The
    /// subtree ends where no slots remain.
    ///
    /// # Panics
    ///
    /// Panics if `begin` is out of bounds.
    #[must_use]
    pub fn subtree_range(&self, begin: usize) -> Range<usize> {
        assert!(
            begin < self.nodes.len(),
            "subtree index {begin} out of bounds for a tree of {} node(s)",
            self.nodes.len()
        );
        let end = subtree_end(&self.nodes, begin).unwrap_or(self.nodes.len());
        begin..end
    }

    /// Nodes of the subtree rooted at `begin`.
    ///
    /// # Panics
    ///
    /// Panics if `begin` is out of bounds.
    #[must_use]
    pub fn subtree(&self, begin: usize) -> &[Node] {
        &self.nodes[self.subtree_range(begin)]
    }

    /// Height of the tree; a lone terminal has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut depths = vec![0usize];
        let mut max_depth = 0;
        for node in &self.nodes {
            let depth = depths.pop().unwrap_or_default();
            max_depth = max_depth.max(depth);
            depths.extend(std::iter::repeat_n(depth + 1, node.arity()));
        }
        max_depth
    }

    /// Render as a fully parenthesized prefix expression.
    #[must_use]
    pub fn render(&self) -> String {
        let rendered: Result<Option<String>, std::convert::Infallible> =
            self.fold(|node, children| Ok(node.render(&children)));
        match rendered {
            Ok(Some(s)) => s,
            Ok(None) | Err(_) => String::new(),
        }
    }

    /// Evaluate the tree, binding `args[i]` to the argument terminal `ARG_i`.
    ///
    /// Arguments beyond those the tree references are ignored.
    ///
    /// # Errors
    ///
    /// [`EvalError::Arity`] if an argument the tree references was not
    /// supplied, [`EvalError::Type`] if a value does not match the type its
    /// consumer declares.
    pub fn compile(&self, args: &[Value]) -> Result<Value, EvalError> {
        let result = self.fold(|node, children| match node.argument_index() {
            Some(index) => node.eval(args.get(index).map(std::slice::from_ref).unwrap_or_default()),
            None => node.eval(&children),
        })?;

        match (result, self.root()) {
            (Some(value), _) => Ok(value),
            (None, root) => Err(EvalError::Arity {
                node: root.map(|n| n.name().to_string()).unwrap_or_default(),
                expected: root.map_or(0, Node::arity),
                got: 0,
            }),
        }
    }

    /// Replace the nodes in `range` with `insertion`, producing a new tree.
    ///
    /// Callers guarantee `insertion` is a whole subtree of the same return
    /// type as the one removed.
    pub(crate) fn splice(&self, range: Range<usize>, insertion: &[Node]) -> Self {
        Self::from_nodes(replace_range(&self.nodes, range, insertion))
    }

    /// Walk the pre-order sequence with an explicit stack, combining each
    /// node with its children's results once all of them are available.
    ///
    /// Returns `None` if the sequence ends before the root completes.
    fn fold<T, E>(
        &self,
        mut visit: impl FnMut(&Node, Vec<T>) -> Result<T, E>,
    ) -> Result<Option<T>, E> {
        let mut stack: Vec<(&Node, Vec<T>)> = Vec::new();

        for node in &self.nodes {
            stack.push((node, Vec::with_capacity(node.arity())));

            while stack
                .last()
                .is_some_and(|(node, children)| children.len() == node.arity())
            {
                let Some((node, children)) = stack.pop() else {
                    break;
                };
                let result = visit(node, children)?;
                match stack.last_mut() {
                    Some((_, siblings)) => siblings.push(result),
                    None => return Ok(Some(result)),
                }
            }
        }

        Ok(None)
    }
}

impl fmt::Display for PrimitiveTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Remove `range` from `seq` and insert `insertion` in its place.
///
/// The result has length `seq.len() - range.len() + insertion.len()` and
/// keeps the relative order of everything outside `range`.
///
/// # Panics
///
/// Panics if `range` is not within `seq`.
#[must_use]
pub fn replace_range<T: Clone>(seq: &[T], range: Range<usize>, insertion: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(seq.len() - range.len() + insertion.len());
    out.extend_from_slice(&seq[..range.start]);
    out.extend_from_slice(insertion);
    out.extend_from_slice(&seq[range.end..]);
    out
}

/// Exclusive end of the subtree rooted at `begin`, or `None` if the
/// sequence runs out first (or `begin` is out of bounds).
fn subtree_end(nodes: &[Node], begin: usize) -> Option<usize> {
    let mut remaining = nodes.get(begin)?.arity();
    let mut end = begin + 1;
    while remaining > 0 {
        remaining = remaining + nodes.get(end)?.arity() - 1;
        end += 1;
    }
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::vocabulary;
    use crate::value::TypeTag;

    #[test]
    fn test_render() {
        let v = vocabulary();
        let tree = PrimitiveTree::new(v.valid_nodes()).unwrap();
        assert_eq!(tree.render(), r#"prim1(4, prim2("hello", 4))"#);
        assert_eq!(tree.to_string(), tree.render());
    }

    #[test]
    fn test_compile() {
        let v = vocabulary();
        let tree = PrimitiveTree::new(v.valid_nodes()).unwrap();
        assert_eq!(tree.compile(&[]).unwrap(), Value::Int(5 * 4 * 4));
    }

    #[test]
    fn test_root_and_height() {
        let v = vocabulary();
        let nodes = v.valid_nodes();
        let tree = PrimitiveTree::new(nodes.clone()).unwrap();
        assert_eq!(tree.root(), Some(&nodes[0]));
        assert_eq!(tree.height(), 2);

        let leaf = PrimitiveTree::new(vec![v.term1.clone()]).unwrap();
        assert_eq!(leaf.height(), 0);
        assert_eq!(leaf.render(), "4");
    }

    #[test]
    fn test_subtree_range() {
        let v = vocabulary();
        let tree = PrimitiveTree::new(v.valid_nodes()).unwrap();

        assert_eq!(tree.subtree_range(0), 0..5);
        assert_eq!(tree.subtree_range(1), 1..2);
        assert_eq!(tree.subtree_range(2), 2..5);
        assert_eq!(tree.subtree_range(3), 3..4);
        assert_eq!(tree.subtree(2), &v.valid_nodes()[2..]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_subtree_range_out_of_bounds() {
        let v = vocabulary();
        let tree = PrimitiveTree::new(v.valid_nodes()).unwrap();
        let _ = tree.subtree_range(tree.len() + 3);
    }

    #[test]
    fn test_malformed_trees_rejected() {
        let v = vocabulary();
        assert_eq!(PrimitiveTree::new(Vec::new()), Err(GpError::MalformedTree { len: 0 }));

        // prim1 missing its second child
        let truncated = vec![v.prim1.clone(), v.term1.clone()];
        assert_eq!(PrimitiveTree::new(truncated), Err(GpError::MalformedTree { len: 2 }));

        // two trees back to back
        let forest = vec![v.term1.clone(), v.term2.clone()];
        assert_eq!(PrimitiveTree::new(forest), Err(GpError::MalformedTree { len: 2 }));
    }

    #[test]
    fn test_compile_type_error() {
        let v = vocabulary();
        // prim1 expects (int, str); give it (str, int)
        let nodes = vec![v.prim1.clone(), v.term2.clone(), v.term1.clone()];
        let tree = PrimitiveTree::new(nodes).unwrap();
        assert!(matches!(
            tree.compile(&[]),
            Err(EvalError::Type { position: 0, expected: TypeTag::Int, got: TypeTag::Str, .. })
        ));
    }

    #[test]
    fn test_compile_with_arguments() {
        let v = vocabulary();
        let set = crate::registry::PrimitiveSet::new(&[TypeTag::Int, TypeTag::Str, TypeTag::Int], TypeTag::Int);
        let args = set.arguments();
        // prim1(ARG_2, prim2(ARG_1, ARG_0))
        let nodes = vec![
            v.prim1.clone(),
            Node::from(std::rc::Rc::clone(&args[2])),
            v.prim2.clone(),
            Node::from(std::rc::Rc::clone(&args[1])),
            Node::from(std::rc::Rc::clone(&args[0])),
        ];
        let tree = PrimitiveTree::new(nodes).unwrap();
        assert_eq!(tree.render(), "prim1(ARG_2, prim2(ARG_1, ARG_0))");

        let out = tree.compile(&[Value::Int(3), Value::from("ab"), Value::Int(2)]).unwrap();
        assert_eq!(out, Value::Int(2 * 6));
        assert_eq!(tree.compile(&[Value::Int(1), Value::from(""), Value::Int(1)]).unwrap(), Value::Int(0));

        // missing argument
        assert!(matches!(
            tree.compile(&[Value::Int(3), Value::from("ab")]),
            Err(EvalError::Arity { expected: 1, got: 0, .. })
        ));
        // mistyped argument
        assert!(matches!(
            tree.compile(&[Value::Bool(true), Value::from("ab"), Value::Int(1)]),
            Err(EvalError::Type { .. })
        ));
        // extra arguments are ignored
        assert!(tree.compile(&[Value::Int(1), Value::from("a"), Value::Int(1), Value::Int(12)]).is_ok());
    }

    #[test]
    fn test_replace_range_cases() {
        let s: Vec<i32> = (1..=10).collect();
        let cases: [(Range<usize>, &[i32], &[i32]); 7] = [
            (0..1, &[11, 12], &[11, 12, 2, 3, 4, 5, 6, 7, 8, 9, 10]),
            (9..10, &[11, 12], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 12]),
            (3..4, &[11, 12], &[1, 2, 3, 11, 12, 5, 6, 7, 8, 9, 10]),
            (0..3, &[11, 12], &[11, 12, 4, 5, 6, 7, 8, 9, 10]),
            (7..10, &[11, 12], &[1, 2, 3, 4, 5, 6, 7, 11, 12]),
            (3..6, &[11, 12], &[1, 2, 3, 11, 12, 7, 8, 9, 10]),
            (
                8..10,
                &[11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
                &[1, 2, 3, 4, 5, 6, 7, 8, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
            ),
        ];

        for (range, insertion, expected) in cases {
            let out = replace_range(&s, range.clone(), insertion);
            assert_eq!(out, expected, "{range:?} <- {insertion:?}");
            assert_eq!(out.len(), s.len() - range.len() + insertion.len());
        }
    }

    #[test]
    fn test_replace_range_nodes() {
        let v = vocabulary();
        let nodes = vec![v.prim1.clone(), v.prim2.clone(), v.term1.clone(), v.term2.clone()];
        let out = replace_range(&nodes, 0..1, &[v.term2.clone(), v.term2.clone()]);
        assert_eq!(out, [v.term2.clone(), v.term2.clone(), v.prim2.clone(), v.term1.clone(), v.term2.clone()]);
    }
}
