//! Benchmarks for tree generation, evaluation and variation.

#![allow(missing_docs)] // Benchmark macros generate undocumented functions

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use treegp::generate::{Full, HalfAndHalf, generate};
use treegp::gp::{Crossover, HeightBounded, Mutator, OnePoint, UniformMutation};
use treegp::{Primitive, PrimitiveSet, PrimitiveTree, Terminal, TypeTag, Value};

fn arithmetic() -> PrimitiveSet {
    let mut set = PrimitiveSet::new(&[TypeTag::Int], TypeTag::Int);
    let int = |v: &Value| v.as_int().unwrap_or_default();

    set.add_primitive(Primitive::new("add", [TypeTag::Int; 2], TypeTag::Int, move |a| {
        Value::Int(int(&a[0]).wrapping_add(int(&a[1])))
    }));
    set.add_primitive(Primitive::new("mul", [TypeTag::Int; 2], TypeTag::Int, move |a| {
        Value::Int(int(&a[0]).wrapping_mul(int(&a[1])))
    }));
    set.add_terminal(Terminal::constant("one", TypeTag::Int, 1_i64));
    set
}

/// A full tree of height 6: 127 nodes.
fn full_tree(set: &PrimitiveSet, rng: &mut SmallRng) -> Option<PrimitiveTree> {
    generate(set, 6, 7, &Full, TypeTag::Int, rng).ok()
}

fn bench_generate(c: &mut Criterion) {
    let set = arithmetic();
    let mut rng = SmallRng::seed_from_u64(42);

    c.bench_function("generate_half_and_half", |b| {
        b.iter(|| {
            let _ = black_box(generate(&set, 2, 7, &HalfAndHalf, TypeTag::Int, &mut rng));
        });
    });
}

fn bench_compile(c: &mut Criterion) {
    let set = arithmetic();
    let mut rng = SmallRng::seed_from_u64(42);
    let Some(tree) = full_tree(&set, &mut rng) else {
        return;
    };
    let args = [Value::Int(3)];

    c.bench_function("compile_127_nodes", |b| {
        b.iter(|| {
            let _ = black_box(tree.compile(black_box(&args)));
        });
    });
}

fn bench_variation(c: &mut Criterion) {
    let set = arithmetic();
    let mut rng = SmallRng::seed_from_u64(42);
    let (Some(first), Some(second)) = (full_tree(&set, &mut rng), full_tree(&set, &mut rng)) else {
        return;
    };
    let mutator = UniformMutation::new(&set, HeightBounded::new(0, 3, Full));

    c.bench_function("one_point_crossover", |b| {
        b.iter(|| {
            let _ = black_box(OnePoint.cross(&first, &second, &mut rng));
        });
    });

    c.bench_function("uniform_mutation", |b| {
        b.iter(|| {
            let _ = black_box(mutator.mutate(&first, &mut rng));
        });
    });
}

criterion_group!(benches, bench_generate, bench_compile, bench_variation);
criterion_main!(benches);
