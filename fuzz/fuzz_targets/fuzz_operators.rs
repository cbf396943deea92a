#![no_main]

//! Variation operator fuzzer.
//!
//! Generates two trees from a fuzzer-chosen seed and height range, then
//! applies limited crossover and mutation, checking after every step that
//! trees are well formed, evaluate to the declared type and respect the
//! size limit.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use treegp::generate::{Grow, HalfAndHalf, generate};
use treegp::gp::{Crossover, HeightBounded, Mutator, OnePoint, SizeLimit, UniformMutation};
use treegp::{Primitive, PrimitiveSet, PrimitiveTree, Terminal, TypeTag, Value};

/// Structured input for operator fuzzing.
#[derive(Arbitrary, Debug)]
struct OperatorInput {
    /// RNG seed driving every operator.
    seed: u64,
    /// Minimum height of the parents.
    min_height: u8,
    /// Height span of the parents.
    span: u8,
    /// Size limit of the wrapped operators.
    limit: u8,
    /// Rounds of crossover and mutation.
    rounds: u8,
}

fn vocabulary() -> PrimitiveSet {
    let mut set = PrimitiveSet::new(&[TypeTag::Int], TypeTag::Int);
    set.add_primitive(Primitive::new("add", [TypeTag::Int; 2], TypeTag::Int, |a| {
        Value::Int(a[0].as_int().unwrap_or_default().wrapping_add(a[1].as_int().unwrap_or_default()))
    }));
    set.add_primitive(Primitive::new(
        "pick",
        [TypeTag::Bool, TypeTag::Int, TypeTag::Int],
        TypeTag::Int,
        |a| if a[0].as_bool().unwrap_or_default() { a[1].clone() } else { a[2].clone() },
    ));
    set.add_primitive(Primitive::new("not", [TypeTag::Bool], TypeTag::Bool, |a| {
        Value::Bool(!a[0].as_bool().unwrap_or_default())
    }));
    set.add_terminal(Terminal::constant("one", TypeTag::Int, 1_i64));
    set.add_terminal(Terminal::constant("yes", TypeTag::Bool, true));
    set
}

fn check(tree: &PrimitiveTree, limit: usize) {
    assert!(tree.len() <= limit, "{} nodes over limit {limit}", tree.len());
    assert!(PrimitiveTree::new(tree.nodes().to_vec()).is_ok());
    assert!(matches!(tree.compile(&[Value::Int(1)]), Ok(Value::Int(_))));
}

fuzz_target!(|input: OperatorInput| {
    let set = vocabulary();
    let mut rng = SmallRng::seed_from_u64(input.seed);
    let min = usize::from(input.min_height % 4);
    let max = min + 1 + usize::from(input.span % 3);
    let limit = usize::from(input.limit).max(1);

    let mut parents = Vec::new();
    while parents.len() < 2 {
        let Ok(tree) = generate(&set, min, max, &HalfAndHalf, TypeTag::Int, &mut rng) else {
            return;
        };
        if tree.len() > limit {
            // fall back to a lone terminal so the pair stays within the limit
            let Ok(leaf) = generate(&set, 0, 1, &Grow, TypeTag::Int, &mut rng) else {
                return;
            };
            parents.push(leaf);
        } else {
            parents.push(tree);
        }
    }

    let crossover = SizeLimit::new(OnePoint, limit);
    let mutator = SizeLimit::new(UniformMutation::new(&set, HeightBounded::new(0, 3, Grow)), limit);

    let (mut first, mut second) = (parents[0].clone(), parents[1].clone());
    for _ in 0..(input.rounds % 16) {
        (first, second) = crossover.cross(&first, &second, &mut rng);
        check(&first, limit);
        check(&second, limit);

        if let Ok(mutant) = mutator.mutate(&first, &mut rng) {
            check(&mutant, limit);
            first = mutant;
        }
    }
});
