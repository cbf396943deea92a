#![no_main]

//! Raw node sequence fuzzer.
//!
//! Builds arbitrary node sequences from a small vocabulary. Sequences that
//! pass validation must render and evaluate without panicking, whatever
//! their typing; rejected sequences must be rejected cleanly.

use libfuzzer_sys::fuzz_target;
use treegp::{Node, Primitive, PrimitiveSet, PrimitiveTree, Terminal, TypeTag, Value};

fuzz_target!(|data: &[u8]| {
    let mut set = PrimitiveSet::new(&[TypeTag::Int, TypeTag::Str], TypeTag::Int);
    let mut vocabulary: Vec<Node> = vec![
        set.add_primitive(Primitive::new("neg", [TypeTag::Int], TypeTag::Int, |a| {
            Value::Int(a[0].as_int().unwrap_or_default().wrapping_neg())
        }))
        .into(),
        set.add_primitive(Primitive::new("len", [TypeTag::Str, TypeTag::Int], TypeTag::Int, |a| {
            let len = a[0].as_str().map_or(0, str::len);
            Value::Int(i64::try_from(len).unwrap_or(i64::MAX).wrapping_add(a[1].as_int().unwrap_or_default()))
        }))
        .into(),
        set.add_terminal(Terminal::constant("two", TypeTag::Int, 2_i64)).into(),
        set.add_terminal(Terminal::constant("word", TypeTag::Str, "word")).into(),
    ];
    vocabulary.extend(set.arguments().iter().cloned().map(Node::from));

    let sequence: Vec<Node> = data
        .iter()
        .map(|b| vocabulary[usize::from(*b) % vocabulary.len()].clone())
        .collect();

    if let Ok(tree) = PrimitiveTree::new(sequence) {
        let _ = tree.render();
        let _ = tree.height();
        let _ = tree.compile(&[Value::Int(5), Value::Str("abc".to_string())]);
        let _ = tree.compile(&[]);
    }
});
