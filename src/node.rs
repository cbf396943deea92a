//! Tree nodes: typed primitives (internal nodes) and terminals (leaves).
//!
//! Node definitions are created once while a vocabulary is registered and
//! never change afterwards. Trees hold cheap [`Node`] handles that share
//! those definitions, so copying a tree never copies a node.

use std::fmt;
use std::rc::Rc;

use crate::error::EvalError;
use crate::value::{Callable, TypeTag, Value};

/// Prefix of synthesized argument terminal names (`ARG_0`, `ARG_1`, ...).
pub const ARGUMENT_PREFIX: &str = "ARG_";

/// Zero-argument producer evaluated each time its terminal is evaluated.
type Producer = Rc<dyn Fn() -> Value>;

/// Mapping applied to the value bound to an argument terminal.
type ArgumentTransform = Rc<dyn Fn(Value) -> Value>;

/// What a terminal yields when evaluated.
#[derive(Clone)]
enum TerminalKind {
    /// A fixed value.
    Constant(Value),
    /// A value computed on every evaluation.
    Producer(Producer),
    /// Placeholder for the `index`-th input passed to
    /// [`PrimitiveTree::compile`](crate::tree::PrimitiveTree::compile).
    Argument {
        /// Position of the bound input.
        index: usize,
        /// Optional mapping applied to the input for non-function types.
        transform: Option<ArgumentTransform>,
    },
}

impl fmt::Debug for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalKind::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            TerminalKind::Producer(_) => f.write_str("Producer(..)"),
            TerminalKind::Argument { index, transform } => f
                .debug_struct("Argument")
                .field("index", index)
                .field("transform", &transform.is_some())
                .finish(),
        }
    }
}

/// A 0-arity leaf node.
#[derive(Debug, Clone)]
pub struct Terminal {
    name: String,
    ret: TypeTag,
    kind: TerminalKind,
}

impl Terminal {
    /// Terminal yielding a fixed value.
    ///
    /// A value whose type `ret` does not accept is reported when the
    /// terminal is evaluated.
    #[must_use]
    pub fn constant(name: impl Into<String>, ret: TypeTag, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ret,
            kind: TerminalKind::Constant(value.into()),
        }
    }

    /// Terminal whose value is produced by `f` on every evaluation.
    ///
    /// Function-typed producers are not invoked; the terminal evaluates to a
    /// callable that runs the producer instead.
    #[must_use]
    pub fn producer<F>(name: impl Into<String>, ret: TypeTag, f: F) -> Self
    where
        F: Fn() -> Value + 'static,
    {
        Self {
            name: name.into(),
            ret,
            kind: TerminalKind::Producer(Rc::new(f)),
        }
    }

    /// Argument terminal bound to the `index`-th compile-time input.
    #[must_use]
    pub fn argument(index: usize, ret: TypeTag) -> Self {
        Self {
            name: format!("{ARGUMENT_PREFIX}{index}"),
            ret,
            kind: TerminalKind::Argument {
                index,
                transform: None,
            },
        }
    }

    /// Argument terminal that maps its input through `transform`.
    #[must_use]
    pub fn argument_with<F>(index: usize, ret: TypeTag, transform: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        Self {
            name: format!("{ARGUMENT_PREFIX}{index}"),
            ret,
            kind: TerminalKind::Argument {
                index,
                transform: Some(Rc::new(transform)),
            },
        }
    }

    /// Symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return type tag.
    #[must_use]
    pub fn ret(&self) -> TypeTag {
        self.ret
    }

    /// Input position for argument terminals.
    #[must_use]
    pub fn argument_index(&self) -> Option<usize> {
        match self.kind {
            TerminalKind::Argument { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Evaluate this terminal.
    ///
    /// `args` is ignored unless this is an argument terminal, which takes
    /// exactly one value.
    ///
    /// # Errors
    ///
    /// [`EvalError::Arity`] if an argument terminal does not receive exactly
    /// one value, [`EvalError::Type`] if the yielded value does not match the
    /// terminal's return type.
    pub fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        match &self.kind {
            TerminalKind::Constant(value) => self.checked(value.clone()),
            TerminalKind::Producer(producer) => {
                if self.ret == TypeTag::Func {
                    let producer = Rc::clone(producer);
                    Ok(Value::func(move |_| producer()))
                } else {
                    self.checked(producer())
                }
            }
            TerminalKind::Argument { transform, .. } => {
                let [arg] = args else {
                    return Err(EvalError::Arity {
                        node: self.name.clone(),
                        expected: 1,
                        got: args.len(),
                    });
                };
                match transform {
                    Some(transform) if self.ret != TypeTag::Func => self.checked(transform(arg.clone())),
                    _ => self.checked(arg.clone()),
                }
            }
        }
    }

    fn checked(&self, value: Value) -> Result<Value, EvalError> {
        if self.ret.accepts(value.type_tag()) {
            Ok(value)
        } else {
            Err(EvalError::Type {
                node: self.name.clone(),
                position: 0,
                expected: self.ret,
                got: value.type_tag(),
            })
        }
    }

    /// Render as a literal, or by name for arguments, producers and
    /// function-typed terminals.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.kind {
            TerminalKind::Constant(_) if self.ret == TypeTag::Func => self.name.clone(),
            TerminalKind::Constant(Value::Str(s)) => format!("\"{s}\""),
            TerminalKind::Constant(value) => value.to_string(),
            TerminalKind::Producer(_) | TerminalKind::Argument { .. } => self.name.clone(),
        }
    }
}

/// An n-arity internal node wrapping a function.
#[derive(Clone)]
pub struct Primitive {
    name: String,
    function: Callable,
    args: Vec<TypeTag>,
    ret: TypeTag,
}

impl Primitive {
    /// Primitive named `name` taking `args`-typed children and returning `ret`.
    ///
    /// The arity is `args.len()`. `function` is only ever called with
    /// exactly that many values of the declared types.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, args: impl Into<Vec<TypeTag>>, ret: TypeTag, function: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: name.into(),
            function: Rc::new(function),
            args: args.into(),
            ret,
        }
    }

    /// Symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of children.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Declared argument types, one per child.
    #[must_use]
    pub fn arg_types(&self) -> &[TypeTag] {
        &self.args
    }

    /// Return type tag.
    #[must_use]
    pub fn ret(&self) -> TypeTag {
        self.ret
    }

    /// Evaluate with already-evaluated child results.
    ///
    /// # Errors
    ///
    /// [`EvalError::Arity`] on a child count mismatch, [`EvalError::Type`]
    /// when a child value does not match its declared type.
    pub fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        if args.len() != self.args.len() {
            return Err(EvalError::Arity {
                node: self.name.clone(),
                expected: self.args.len(),
                got: args.len(),
            });
        }
        for (position, (expected, value)) in self.args.iter().zip(args).enumerate() {
            if !expected.accepts(value.type_tag()) {
                return Err(EvalError::Type {
                    node: self.name.clone(),
                    position,
                    expected: *expected,
                    got: value.type_tag(),
                });
            }
        }
        Ok((self.function)(args))
    }

    /// Render as `name(child1, child2, ...)`.
    #[must_use]
    pub fn render(&self, children: &[String]) -> String {
        format!("{}({})", self.name, children.join(", "))
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("ret", &self.ret)
            .finish_non_exhaustive()
    }
}

/// Shared handle to a node definition.
///
/// Equality is identity: two handles are equal when they refer to the same
/// registered definition.
#[derive(Clone)]
pub enum Node {
    /// Internal node.
    Primitive(Rc<Primitive>),
    /// Leaf node.
    Terminal(Rc<Terminal>),
}

impl Node {
    /// Number of children this node consumes.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Node::Primitive(p) => p.arity(),
            Node::Terminal(_) => 0,
        }
    }

    /// Return type tag.
    #[must_use]
    pub fn ret(&self) -> TypeTag {
        match self {
            Node::Primitive(p) => p.ret(),
            Node::Terminal(t) => t.ret(),
        }
    }

    /// Symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Primitive(p) => p.name(),
            Node::Terminal(t) => t.name(),
        }
    }

    /// Input position if this is an argument terminal.
    #[must_use]
    pub fn argument_index(&self) -> Option<usize> {
        match self {
            Node::Terminal(t) => t.argument_index(),
            Node::Primitive(_) => None,
        }
    }

    /// Evaluate with child results (or the bound input for arguments).
    ///
    /// # Errors
    ///
    /// Propagates the arity and type errors of [`Primitive::eval`] and
    /// [`Terminal::eval`].
    pub fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        match self {
            Node::Primitive(p) => p.eval(args),
            Node::Terminal(t) => t.eval(args),
        }
    }

    /// Render given the rendered children.
    #[must_use]
    pub fn render(&self, children: &[String]) -> String {
        match self {
            Node::Primitive(p) => p.render(children),
            Node::Terminal(t) => t.render(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Primitive(a), Node::Primitive(b)) => Rc::ptr_eq(a, b),
            (Node::Terminal(a), Node::Terminal(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Primitive> for Node {
    fn from(p: Primitive) -> Self {
        Node::Primitive(Rc::new(p))
    }
}

impl From<Terminal> for Node {
    fn from(t: Terminal) -> Self {
        Node::Terminal(Rc::new(t))
    }
}

impl From<Rc<Primitive>> for Node {
    fn from(p: Rc<Primitive>) -> Self {
        Node::Primitive(p)
    }
}

impl From<Rc<Terminal>> for Node {
    fn from(t: Rc<Terminal>) -> Self {
        Node::Terminal(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat() -> Primitive {
        Primitive::new("prim2", [TypeTag::Str, TypeTag::Int], TypeTag::Str, |a| {
            let s = a[0].as_str().unwrap_or_default();
            let n = a[1].as_int().unwrap_or_default();
            Value::Str(s.repeat(usize::try_from(n).unwrap_or_default()))
        })
    }

    #[test]
    fn test_primitive_eval() {
        let p = repeat();
        let out = p.eval(&[Value::from("ab"), Value::Int(3)]).unwrap();
        assert_eq!(out, Value::from("ababab"));
    }

    #[test]
    fn test_primitive_arity_error() {
        let p = repeat();
        let err = p.eval(&[Value::from("ab")]).unwrap_err();
        assert_eq!(
            err,
            EvalError::Arity {
                node: "prim2".to_string(),
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_primitive_type_error() {
        let p = repeat();
        let err = p.eval(&[Value::Int(1), Value::Int(3)]).unwrap_err();
        assert!(matches!(err, EvalError::Type { position: 0, expected: TypeTag::Str, got: TypeTag::Int, .. }));
    }

    #[test]
    fn test_any_argument_accepts_all() {
        let p = Primitive::new("first", [TypeTag::Any, TypeTag::Any], TypeTag::Any, |a| a[0].clone());
        assert_eq!(p.eval(&[Value::Bool(true), Value::from("x")]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_argument_terminal() {
        let t = Terminal::argument(2, TypeTag::Int);
        assert_eq!(t.name(), "ARG_2");
        assert_eq!(t.argument_index(), Some(2));
        assert_eq!(t.eval(&[Value::Int(7)]).unwrap(), Value::Int(7));
        assert!(matches!(t.eval(&[]), Err(EvalError::Arity { got: 0, .. })));
        assert!(matches!(
            t.eval(&[Value::Int(1), Value::Int(2)]),
            Err(EvalError::Arity { got: 2, .. })
        ));
        assert!(matches!(t.eval(&[Value::Bool(true)]), Err(EvalError::Type { .. })));
    }

    #[test]
    fn test_argument_transform() {
        let t = Terminal::argument_with(0, TypeTag::Int, |v| Value::Int(v.as_int().unwrap_or(0) * 10));
        assert_eq!(t.eval(&[Value::Int(4)]).unwrap(), Value::Int(40));
    }

    #[test]
    fn test_terminal_render() {
        assert_eq!(Terminal::constant("four", TypeTag::Int, 4_i64).render(), "4");
        assert_eq!(Terminal::constant("hi", TypeTag::Str, "hello").render(), "\"hello\"");
        assert_eq!(Terminal::argument(0, TypeTag::Int).render(), "ARG_0");
        let action = Terminal::constant("move", TypeTag::Func, Value::func(|_| Value::Unit));
        assert_eq!(action.render(), "move");
    }

    #[test]
    fn test_producer_terminal() {
        let t = Terminal::producer("seven", TypeTag::Int, || Value::Int(7));
        assert_eq!(t.eval(&[]).unwrap(), Value::Int(7));
        assert_eq!(t.render(), "seven");

        let f = Terminal::producer("tick", TypeTag::Func, || Value::Int(1));
        let value = f.eval(&[]).unwrap();
        assert_eq!(value.type_tag(), TypeTag::Func);
        assert_eq!(value.call(&[]), Some(Value::Int(1)));
    }

    #[test]
    fn test_mistyped_constant_is_reported() {
        let t = Terminal::constant("x", TypeTag::Int, "s");
        assert_eq!(
            t.eval(&[]).unwrap_err(),
            EvalError::Type {
                node: "x".to_string(),
                position: 0,
                expected: TypeTag::Int,
                got: TypeTag::Str
            }
        );

        let p = Terminal::producer("flag", TypeTag::Int, || Value::Bool(true));
        assert!(matches!(p.eval(&[]), Err(EvalError::Type { got: TypeTag::Bool, .. })));
    }

    #[test]
    fn test_node_identity() {
        let a = Node::from(Terminal::constant("a", TypeTag::Int, 1_i64));
        let b = Node::from(Terminal::constant("a", TypeTag::Int, 1_i64));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(format!("{a:?}"), "a");
    }
}
