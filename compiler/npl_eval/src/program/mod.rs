//! Program lifecycle: well-formedness, entity binding and step-budgeted
//! execution.
//!
//! A [`Program`] owns its tree, its variables and its cursors. The
//! simulation binds it to one entity and then calls [`Program::advance`]
//! once per tick with a step budget. An activation that finishes, faults or
//! hits an escaping `break` ends; the next `advance` starts a fresh one from
//! the root, with variables keeping their values.

mod builder;

use std::fmt;

use npl_diagnostic::{has_errors, Diagnostic};
use npl_ir::{ProgramArena, StmtId};
use npl_world::{EntityId, IntentSink, WorldView};
use tracing::{debug, warn};

pub use builder::ProgramBuilder;

use crate::interpreter::{ExecState, Interpreter};
use crate::print_handler::SharedPrintHandler;
use crate::{EvalError, ExecConfig, Signal, Value};

/// Where a program stands between `advance` calls.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ProgramStatus {
    /// No activation in progress; the next `advance` starts one.
    #[default]
    Ready,
    /// An activation is in progress and will resume on the next `advance`.
    Running,
    /// The last activation ran to completion.
    Completed,
    /// The last activation was aborted by a runtime error.
    Faulted,
}

impl ProgramStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProgramStatus::Ready => "ready",
            ProgramStatus::Running => "running",
            ProgramStatus::Completed => "completed",
            ProgramStatus::Faulted => "faulted",
        }
    }
}

/// Outcome of one [`Program::advance`] call.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct AdvanceReport {
    /// Primitive steps actually taken.
    pub steps: u32,
    pub status: ProgramStatus,
}

/// Lifecycle errors.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgramError {
    /// The program failed its well-formedness check.
    IllFormed(Vec<Diagnostic>),
    /// The program is already bound to another entity.
    AlreadyBound { current: EntityId },
    /// `advance` was called before `bind`.
    Unbound,
    /// The entity to bind is not in the world.
    UnknownEntity(EntityId),
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::IllFormed(diagnostics) => {
                let errors = diagnostics.iter().filter(|d| d.is_error()).count();
                write!(f, "program is not well-formed ({errors} error(s))")
            }
            ProgramError::AlreadyBound { current } => {
                write!(f, "program is already bound to entity {current}")
            }
            ProgramError::Unbound => write!(f, "program is not bound to an entity"),
            ProgramError::UnknownEntity(id) => write!(f, "entity {id} is not in the world"),
        }
    }
}

impl std::error::Error for ProgramError {}

/// An entity program: tree, environment, cursors and binding.
pub struct Program {
    arena: ProgramArena,
    root: StmtId,
    diagnostics: Vec<Diagnostic>,
    state: ExecState,
    entity: Option<EntityId>,
    config: ExecConfig,
    print: SharedPrintHandler,
    status: ProgramStatus,
    last_error: Option<EvalError>,
}

impl Program {
    /// Check and build a program with default configuration.
    ///
    /// Output goes to stdout; use [`ProgramBuilder`] to redirect it.
    pub fn new(arena: ProgramArena, root: StmtId) -> Self {
        ProgramBuilder::new(arena, root).build()
    }

    /// Whether the program passed its well-formedness check.
    pub fn is_well_formed(&self) -> bool {
        !has_errors(&self.diagnostics)
    }

    /// Diagnostics from the well-formedness check.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Bind the program to the entity it controls.
    ///
    /// Binding the same entity again is a no-op; a program can never be
    /// rebound to a different entity.
    pub fn bind(&mut self, entity: EntityId, world: &dyn WorldView) -> Result<(), ProgramError> {
        if !self.is_well_formed() {
            return Err(ProgramError::IllFormed(self.diagnostics.clone()));
        }
        match self.entity {
            Some(current) if current == entity => return Ok(()),
            Some(current) => return Err(ProgramError::AlreadyBound { current }),
            None => {}
        }
        if world.entity(entity).is_none() {
            return Err(ProgramError::UnknownEntity(entity));
        }
        debug!(%entity, "program bound");
        self.entity = Some(entity);
        Ok(())
    }

    pub fn bound_entity(&self) -> Option<EntityId> {
        self.entity
    }

    /// Run up to `budget` primitive steps.
    ///
    /// Runtime errors never escape: they abort the activation, are logged
    /// and kept as [`Program::last_error`], and the report says `Faulted`.
    #[tracing::instrument(level = "debug", skip(self, world, intents))]
    pub fn advance(
        &mut self,
        budget: u32,
        world: &dyn WorldView,
        intents: &mut dyn IntentSink,
    ) -> Result<AdvanceReport, ProgramError> {
        let entity = self.entity.ok_or(ProgramError::Unbound)?;
        if matches!(
            self.status,
            ProgramStatus::Completed | ProgramStatus::Faulted
        ) {
            self.state.cursors.reset();
            self.status = ProgramStatus::Ready;
        }
        if self.status == ProgramStatus::Ready {
            debug!(%entity, "activation started");
            self.last_error = None;
        }

        let root = self.root;
        let mut interp = Interpreter::new(
            &self.arena,
            &self.config,
            &mut self.state,
            world,
            intents,
            &self.print,
        )
        .with_entity(entity);

        let mut steps = 0;
        let mut status = ProgramStatus::Running;
        while steps < budget {
            if !interp.has_more_steps(root) {
                status = ProgramStatus::Completed;
                break;
            }
            steps += 1;
            match interp.step(root) {
                Ok(Signal::Continue) => {}
                Ok(Signal::Break) => {
                    warn!(%entity, "break escaped the program root; activation ended");
                    status = ProgramStatus::Completed;
                    break;
                }
                Err(err) => {
                    warn!(%entity, error = %err, "activation aborted");
                    self.last_error = Some(err);
                    status = ProgramStatus::Faulted;
                    break;
                }
            }
        }
        if status == ProgramStatus::Running && !interp.has_more_steps(root) {
            status = ProgramStatus::Completed;
        }
        if status == ProgramStatus::Completed {
            debug!(%entity, steps, "activation completed");
        }

        self.status = status;
        Ok(AdvanceReport { steps, status })
    }

    /// Advance by the configured default budget.
    pub fn tick(
        &mut self,
        world: &dyn WorldView,
        intents: &mut dyn IntentSink,
    ) -> Result<AdvanceReport, ProgramError> {
        self.advance(self.config.default_budget, world, intents)
    }

    pub fn status(&self) -> ProgramStatus {
        self.status
    }

    /// The error that aborted the most recent activation, if any.
    pub fn last_error(&self) -> Option<&EvalError> {
        self.last_error.as_ref()
    }

    /// Current value of a variable, by name.
    pub fn variable(&self, name: &str) -> Option<Value> {
        let decl = self
            .arena
            .variables()
            .iter()
            .find(|decl| self.arena.name_str(decl.name) == name)?;
        self.state.env.get(decl.name)
    }

    pub fn arena(&self) -> &ProgramArena {
        &self.arena
    }

    pub fn root(&self) -> StmtId {
        self.root
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("root", &self.root)
            .field("entity", &self.entity)
            .field("status", &self.status)
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}
