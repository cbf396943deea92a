//! Small typed vocabulary shared by unit tests.

use crate::node::{Node, Primitive, Terminal};
use crate::registry::PrimitiveSet;
use crate::value::{TypeTag, Value};

pub(crate) struct Vocabulary {
    pub(crate) set: PrimitiveSet,
    pub(crate) prim1: Node,
    pub(crate) prim2: Node,
    pub(crate) term1: Node,
    pub(crate) term2: Node,
}

impl Vocabulary {
    /// `prim1(4, prim2("hello", 4))`
    pub(crate) fn valid_nodes(&self) -> Vec<Node> {
        vec![
            self.prim1.clone(),
            self.term1.clone(),
            self.prim2.clone(),
            self.term2.clone(),
            self.term1.clone(),
        ]
    }
}

/// `prim1(int, str) -> int` multiplies the string length by the integer,
/// `prim2(str, int) -> str` repeats the string.
pub(crate) fn vocabulary() -> Vocabulary {
    let mut set = PrimitiveSet::new(&[], TypeTag::Int);

    let prim1 = set.add_primitive(Primitive::new("prim1", [TypeTag::Int, TypeTag::Str], TypeTag::Int, |a| {
        let n = a[0].as_int().unwrap_or_default();
        let len = i64::try_from(a[1].as_str().unwrap_or_default().len()).unwrap_or(i64::MAX);
        Value::Int(len.saturating_mul(n))
    }));
    let prim2 = set.add_primitive(Primitive::new("prim2", [TypeTag::Str, TypeTag::Int], TypeTag::Str, |a| {
        let s = a[0].as_str().unwrap_or_default();
        let n = a[1].as_int().unwrap_or_default();
        Value::Str(s.repeat(usize::try_from(n).unwrap_or_default()))
    }));
    let term1 = set.add_terminal(Terminal::constant("term1", TypeTag::Int, 4_i64));
    let term2 = set.add_terminal(Terminal::constant("term2", TypeTag::Str, "hello"));

    Vocabulary {
        set,
        prim1: Node::from(prim1),
        prim2: Node::from(prim2),
        term1: Node::from(term1),
        term2: Node::from(term2),
    }
}
