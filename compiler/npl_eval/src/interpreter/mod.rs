//! Step-driven interpreter for entity programs.
//!
//! # Architecture
//!
//! Programs never suspend inside an expression, so expressions are evaluated
//! recursively and synchronously (`expr.rs`). Statements are driven one
//! primitive step at a time through the cursor protocol (`step.rs`):
//!
//! - `has_more_steps(stmt)`: whether the statement is not yet `Done`
//! - `step(stmt)`: perform exactly one primitive step
//! - `restart(stmt)`: put the statement back to its initial state
//!
//! All resumable state lives in the [`CursorTable`] of an [`ExecState`];
//! an `Interpreter` is a short-lived view that borrows the program's arena
//! and state for one `advance` call. `foreach` snapshots are built in
//! `snapshot.rs`.
//!
//! # World Access
//!
//! The world is read through [`WorldView`] only. Actions never touch the
//! world directly; they are handed to an [`IntentSink`] and applied by the
//! simulation afterwards.

mod expr;
mod snapshot;
mod step;

use rand::rngs::SmallRng;

use npl_ir::{Name, ProgramArena, Span};
use npl_world::{EntityId, IntentSink, WorldView};

use crate::environment::AssignError;
use crate::errors::{type_mismatch, unknown_variable, EvalError};
use crate::print_handler::PrintHandlerImpl;
use crate::{CursorTable, Environment, ExecConfig, Value};

/// Mutable execution state of one program.
///
/// Variables, cursors and the random number generator all persist across
/// `advance` calls.
#[derive(Clone, Debug)]
pub struct ExecState {
    pub env: Environment,
    pub cursors: CursorTable,
    pub rng: SmallRng,
}

impl ExecState {
    pub fn new(arena: &ProgramArena, rng: SmallRng) -> Self {
        ExecState {
            env: Environment::new(arena.variables()),
            cursors: CursorTable::new(arena),
            rng,
        }
    }
}

/// Interpreter for one program against one world.
pub struct Interpreter<'a> {
    pub(crate) arena: &'a ProgramArena,
    pub(crate) config: &'a ExecConfig,
    pub(crate) state: &'a mut ExecState,
    pub(crate) world: &'a dyn WorldView,
    pub(crate) intents: &'a mut dyn IntentSink,
    pub(crate) print: &'a PrintHandlerImpl,
    /// Entity `self` refers to and actions are submitted for.
    pub(crate) entity: Option<EntityId>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        arena: &'a ProgramArena,
        config: &'a ExecConfig,
        state: &'a mut ExecState,
        world: &'a dyn WorldView,
        intents: &'a mut dyn IntentSink,
        print: &'a PrintHandlerImpl,
    ) -> Self {
        Interpreter {
            arena,
            config,
            state,
            world,
            intents,
            print,
            entity: None,
        }
    }

    /// Bind `self` to an entity.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn arena(&self) -> &'a ProgramArena {
        self.arena
    }

    pub fn env(&self) -> &Environment {
        &self.state.env
    }

    /// Store `value` into a declared variable.
    pub(crate) fn assign(&mut self, name: Name, value: Value, span: Span) -> Result<(), EvalError> {
        self.state
            .env
            .assign(name, value)
            .map_err(|err| match err {
                AssignError::Undefined => unknown_variable(self.arena.name_str(name)),
                AssignError::TypeMismatch { expected } => type_mismatch(expected, value.type_of()),
            })
            .map_err(|err| err.with_span(span))
    }
}
