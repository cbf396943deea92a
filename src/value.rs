//! Runtime values and their type tags.
//!
//! Every node declares the [`TypeTag`] it returns and, for primitives, the
//! tags of its arguments. At evaluation time the engine only ever checks a
//! value's tag against a declared tag, so the set of tags is closed and
//! small.

use std::fmt;
use std::rc::Rc;

/// Shared function value.
///
/// Function-typed trees (for example agent programs) evaluate to a callable
/// that the client invokes later, possibly many times.
pub type Callable = Rc<dyn Fn(&[Value]) -> Value>;

/// Return-type tag of a node or runtime type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// Owned string.
    Str,
    /// No meaningful value (side-effecting callables).
    Unit,
    /// Callable function value.
    Func,
    /// Wildcard accepted in argument position; no value carries it.
    Any,
}

impl TypeTag {
    /// Whether a value tagged `actual` may be passed where `self` is declared.
    #[must_use]
    pub fn accepts(self, actual: TypeTag) -> bool {
        self == TypeTag::Any || self == actual
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::Str => "str",
            TypeTag::Unit => "unit",
            TypeTag::Func => "func",
            TypeTag::Any => "any",
        };
        f.write_str(name)
    }
}

/// A value flowing between nodes during evaluation.
#[derive(Clone)]
pub enum Value {
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Owned string.
    Str(String),
    /// Unit result of a side-effecting call.
    Unit,
    /// Callable function value.
    Func(Callable),
}

impl Value {
    /// Wrap a closure as a function value.
    #[must_use]
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Func(Rc::new(f))
    }

    /// Runtime type tag of this value.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Bool(_) => TypeTag::Bool,
            Value::Str(_) => TypeTag::Str,
            Value::Unit => TypeTag::Unit,
            Value::Func(_) => TypeTag::Func,
        }
    }

    /// Integer payload, if any.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if any.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Invoke a function value. Returns `None` for non-function values.
    #[must_use]
    pub fn call(&self, args: &[Value]) -> Option<Value> {
        match self {
            Value::Func(f) => Some(f(args)),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Unit => f.write_str("Unit"),
            Value::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::Unit => f.write_str("()"),
            Value::Func(_) => f.write_str("<func>"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}
