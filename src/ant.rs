//! Artificial ant demo.
//!
//! Evolves a controller for an ant that must eat as much food as possible
//! along a trail within a fixed number of moves. The controller is a
//! function-typed tree built from:
//!
//! | node            | kind      | effect                                  |
//! |-----------------|-----------|-----------------------------------------|
//! | `prog2`/`prog3` | primitive | run the children in order               |
//! | `if_food_ahead` | primitive | run the first child if food is ahead, else the second |
//! | `move_forward`  | terminal  | step forward, eating food               |
//! | `turn_left`     | terminal  | quarter turn counter-clockwise          |
//! | `turn_right`    | terminal  | quarter turn clockwise                  |
//!
//! The ant is shared with the registered closures through `Rc<RefCell<_>>`;
//! evaluating a tree produces a callable that drives it.

mod agent;
mod trail;

pub use agent::{Ant, Heading};
pub use trail::{Cell, SANTA_FE_TRAIL, Trail, TrailError};

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EvalError, GpError, GpResult};
use crate::generate::{Full, generate};
use crate::gp::{
    EvolutionConfig, EvolutionSettings, EvolutionStats, Fitness, HeightBounded, Individual, OnePoint, SizeLimit,
    UniformMutation, best, run_evolution,
};
use crate::node::{Primitive, Terminal};
use crate::registry::PrimitiveSet;
use crate::tree::PrimitiveTree;
use crate::value::{TypeTag, Value};

/// Configuration for the ant demo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntConfig {
    /// Move budget per evaluation.
    pub moves: usize,
    /// Population size.
    pub population: usize,
    /// Height range `[min, max)` of the initial full trees.
    pub initial_height: (usize, usize),
    /// Height range `[min, max)` of subtrees grown by mutation.
    pub mutation_height: (usize, usize),
    /// Node limit applied to crossover and mutation outputs.
    pub max_nodes: usize,
    /// Evolution loop parameters.
    pub evolution: EvolutionConfig,
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            moves: 600,
            population: 300,
            initial_height: (1, 2),
            mutation_height: (0, 2),
            max_nodes: 200,
            evolution: EvolutionConfig {
                crossover_probability: 0.2,
                mutation_probability: 0.5,
                ..EvolutionConfig::default()
            },
        }
    }
}

/// Outcome of a demo run.
#[derive(Debug, Clone, Serialize)]
pub struct AntReport {
    /// Best program, rendered.
    pub program: String,
    /// Food eaten by the best program.
    pub eaten: usize,
    /// Food available on the trail.
    pub food: usize,
    /// The trail after replaying the best program, visited cells as `X`.
    pub trail: String,
    /// Evolution statistics.
    pub stats: EvolutionStats,
}

/// Build the controller vocabulary, bound to `ant`.
#[must_use]
pub fn primitive_set(ant: &Rc<RefCell<Ant>>) -> PrimitiveSet {
    let mut set = PrimitiveSet::new(&[], TypeTag::Func);

    set.add_primitive(Primitive::new("prog3", [TypeTag::Func; 3], TypeTag::Func, sequence));
    set.add_primitive(Primitive::new("prog2", [TypeTag::Func; 2], TypeTag::Func, sequence));

    let sensor = Rc::clone(ant);
    set.add_primitive(Primitive::new(
        "if_food_ahead",
        [TypeTag::Func, TypeTag::Func],
        TypeTag::Func,
        move |branches| {
            let ant = Rc::clone(&sensor);
            let (on_food, otherwise) = (branches[0].clone(), branches[1].clone());
            Value::func(move |args| {
                let food = ant.borrow().sense_food();
                let branch = if food { &on_food } else { &otherwise };
                branch.call(args).unwrap_or(Value::Unit)
            })
        },
    ));

    set.add_terminal(Terminal::constant("move_forward", TypeTag::Func, action(ant, Ant::move_forward)));
    set.add_terminal(Terminal::constant("turn_left", TypeTag::Func, action(ant, Ant::turn_left)));
    set.add_terminal(Terminal::constant("turn_right", TypeTag::Func, action(ant, Ant::turn_right)));

    set
}

/// Reset the ant and run `tree` until the move budget is spent.
///
/// Returns the food eaten.
///
/// # Errors
///
/// Propagates compile errors of `tree`.
pub fn run_program(ant: &RefCell<Ant>, tree: &PrimitiveTree) -> Result<usize, EvalError> {
    ant.borrow_mut().reset();
    let routine = tree.compile(&[])?;
    while !ant.borrow().is_done() {
        if routine.call(&[]).is_none() {
            break;
        }
    }
    Ok(ant.borrow().eaten())
}

/// Evaluation callback: fitness is the food eaten.
///
/// # Errors
///
/// Returns the compile error of a tree that cannot run; its fitness stays
/// invalid.
pub fn evaluate(ant: &RefCell<Ant>, individual: &mut Individual) -> Result<(), EvalError> {
    let eaten = run_program(ant, individual.tree()).inspect_err(|e| {
        warn!(error = %e, tree = %individual.tree(), "ant program failed");
    })?;
    #[allow(clippy::cast_precision_loss)]
    let score = eaten as f64;
    if let Err(e) = individual.fitness_mut().set_values(&[score]) {
        warn!(error = %e, "failed to assign ant fitness");
    }
    Ok(())
}

/// Replace an unassigned-fitness error with the compile error behind it.
fn explain(err: GpError, failure: Option<EvalError>) -> GpError {
    match (err, failure) {
        (GpError::FitnessNotAssigned { .. }, Some(eval)) => GpError::Eval(eval),
        (err, _) => err,
    }
}

/// Evolve an ant controller on `trail`.
///
/// # Errors
///
/// Propagates generation and evolution errors; a program that fails to
/// compile surfaces as [`GpError::Eval`].
pub fn run_demo<R: Rng + ?Sized>(config: &AntConfig, trail: Trail, rng: &mut R) -> GpResult<AntReport> {
    let food = trail.food_count();
    let ant = Rc::new(RefCell::new(Ant::new(config.moves, trail)));
    let set = primitive_set(&ant);

    let (min_height, max_height) = config.initial_height;
    let population = (0..config.population)
        .map(|_| -> GpResult<Individual> {
            let tree = generate(&set, min_height, max_height, &Full, set.ret(), rng)?;
            Ok(Individual::new(tree, Fitness::new([1.0])?))
        })
        .collect::<GpResult<Vec<_>>>()?;

    let (min_height, max_height) = config.mutation_height;
    let settings = EvolutionSettings {
        config: config.evolution,
        crossover: SizeLimit::new(OnePoint, config.max_nodes),
        mutator: SizeLimit::new(
            UniformMutation::new(&set, HeightBounded::new(min_height, max_height, Full)),
            config.max_nodes,
        ),
    };

    let mut failure = None;
    let evolved = run_evolution(
        population,
        &settings,
        |ind| {
            if let Err(e) = evaluate(&ant, ind) {
                failure = Some(e);
            }
        },
        rng,
    );
    let (population, stats) = evolved.map_err(|e| explain(e, failure))?;

    let Some(champion) = best(&population) else {
        return Ok(AntReport {
            program: String::new(),
            eaten: 0,
            food,
            trail: ant.borrow().trail().to_string(),
            stats,
        });
    };

    let eaten = run_program(&ant, champion.tree())?;
    info!(eaten, food, program = %champion.tree(), "best ant program");

    let trail = ant.borrow().trail().to_string();
    Ok(AntReport {
        program: champion.tree().render(),
        eaten,
        food,
        trail,
        stats,
    })
}

/// `progN`: a callable running every child callable in order.
fn sequence(children: &[Value]) -> Value {
    let children = children.to_vec();
    Value::func(move |args| {
        for child in &children {
            if child.call(args).is_none() {
                break;
            }
        }
        Value::Unit
    })
}

/// A callable applying `act` to the shared ant.
fn action(ant: &Rc<RefCell<Ant>>, act: fn(&mut Ant)) -> Value {
    let ant = Rc::clone(ant);
    Value::func(move |_| {
        act(&mut ant.borrow_mut());
        Value::Unit
    })
}
