//! Typed catalog of the primitives and terminals a tree may be built from.

// Ratio of small counts
#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::rc::Rc;

use crate::node::{Primitive, Terminal};
use crate::value::TypeTag;

/// The vocabulary available to tree generation, indexed by return type.
///
/// Construction synthesizes one argument terminal (`ARG_<i>`) per declared
/// input type, so trees generated from the set can reference the inputs
/// later passed to [`PrimitiveTree::compile`](crate::tree::PrimitiveTree::compile).
#[derive(Debug, Clone)]
pub struct PrimitiveSet {
    primitives: HashMap<TypeTag, Vec<Rc<Primitive>>>,
    terminals: HashMap<TypeTag, Vec<Rc<Terminal>>>,
    arguments: Vec<Rc<Terminal>>,
    input_types: Vec<TypeTag>,
    ret: TypeTag,
    primitive_count: usize,
    terminal_count: usize,
}

impl PrimitiveSet {
    /// Create a set for trees taking `input_types` and returning `ret`.
    #[must_use]
    pub fn new(input_types: &[TypeTag], ret: TypeTag) -> Self {
        let mut set = Self {
            primitives: HashMap::new(),
            terminals: HashMap::new(),
            arguments: Vec::with_capacity(input_types.len()),
            input_types: input_types.to_vec(),
            ret,
            primitive_count: 0,
            terminal_count: 0,
        };

        for (index, ty) in input_types.iter().enumerate() {
            let argument = set.add_terminal(Terminal::argument(index, *ty));
            set.arguments.push(argument);
        }

        set
    }

    /// Register a primitive under its return type.
    ///
    /// Returns the shared definition so callers can build trees by hand.
    pub fn add_primitive(&mut self, primitive: Primitive) -> Rc<Primitive> {
        let primitive = Rc::new(primitive);
        self.primitives
            .entry(primitive.ret())
            .or_default()
            .push(Rc::clone(&primitive));
        self.primitive_count += 1;
        primitive
    }

    /// Register a terminal under its return type.
    pub fn add_terminal(&mut self, terminal: Terminal) -> Rc<Terminal> {
        let terminal = Rc::new(terminal);
        self.terminals
            .entry(terminal.ret())
            .or_default()
            .push(Rc::clone(&terminal));
        self.terminal_count += 1;
        terminal
    }

    /// Fraction of registered nodes that are terminals.
    ///
    /// Used by grow generation as its early-stop probability. Zero for an
    /// empty set.
    #[must_use]
    pub fn terminal_ratio(&self) -> f64 {
        let total = self.terminal_count + self.primitive_count;
        if total == 0 {
            return 0.0;
        }
        self.terminal_count as f64 / total as f64
    }

    /// Primitives returning `ty`, in registration order.
    #[must_use]
    pub fn primitives(&self, ty: TypeTag) -> &[Rc<Primitive>] {
        self.primitives.get(&ty).map(Vec::as_slice).unwrap_or_default()
    }

    /// Terminals returning `ty`, in registration order.
    #[must_use]
    pub fn terminals(&self, ty: TypeTag) -> &[Rc<Terminal>] {
        self.terminals.get(&ty).map(Vec::as_slice).unwrap_or_default()
    }

    /// Synthesized argument terminals, by input position.
    #[must_use]
    pub fn arguments(&self) -> &[Rc<Terminal>] {
        &self.arguments
    }

    /// Declared input types.
    #[must_use]
    pub fn input_types(&self) -> &[TypeTag] {
        &self.input_types
    }

    /// Return type required at the root of generated trees.
    #[must_use]
    pub fn ret(&self) -> TypeTag {
        self.ret
    }

    /// Number of registered primitives.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    /// Number of registered terminals, argument terminals included.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.terminal_count
    }
}
