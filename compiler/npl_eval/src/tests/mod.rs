//! Test modules relocated from implementation files.
//!
//! Larger test suites live here instead of inline. `Harness` drives an
//! [`Interpreter`] directly, one step at a time, for the step-protocol tests.

mod program_tests;
mod step_tests;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use npl_ir::{ProgramArena, StmtId};
use npl_world::{EntityId, GridWorld, MovementIntent};

use crate::{buffer_handler, ExecConfig, ExecState, Interpreter, SharedPrintHandler, Signal};

/// Program state plus everything an interpreter borrows.
pub(crate) struct Harness {
    pub arena: ProgramArena,
    pub root: StmtId,
    pub world: GridWorld,
    pub entity: Option<EntityId>,
    pub config: ExecConfig,
    pub state: ExecState,
    pub print: SharedPrintHandler,
    pub intents: Vec<(EntityId, MovementIntent)>,
}

impl Harness {
    pub fn new(arena: ProgramArena, root: StmtId, world: GridWorld) -> Self {
        let state = ExecState::new(&arena, SmallRng::seed_from_u64(7));
        Harness {
            arena,
            root,
            world,
            entity: None,
            config: ExecConfig::default(),
            state,
            print: buffer_handler(),
            intents: Vec::new(),
        }
    }

    pub fn bound_to(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Run `f` against a fresh interpreter over this harness's state.
    pub fn with<R>(&mut self, f: impl FnOnce(&mut Interpreter<'_>) -> R) -> R {
        let mut interp = Interpreter::new(
            &self.arena,
            &self.config,
            &mut self.state,
            &self.world,
            &mut self.intents,
            &self.print,
        );
        if let Some(entity) = self.entity {
            interp = interp.with_entity(entity);
        }
        f(&mut interp)
    }

    pub fn has_more_steps(&mut self) -> bool {
        let root = self.root;
        self.with(|interp| interp.has_more_steps(root))
    }

    pub fn step(&mut self) -> Result<Signal, crate::EvalError> {
        let root = self.root;
        self.with(|interp| interp.step(root))
    }

    /// Step the root until it has no more steps, returning the step count.
    ///
    /// # Panics
    /// Panics if a step fails or more than `limit` steps are taken.
    pub fn run_to_end(&mut self, limit: usize) -> usize {
        let mut steps = 0;
        while self.has_more_steps() {
            assert!(steps < limit, "program did not finish within {limit} steps");
            if let Err(err) = self.step() {
                panic!("step {steps} failed: {err}");
            }
            steps += 1;
        }
        steps
    }

    pub fn output(&self) -> Vec<String> {
        self.print.lines()
    }

    pub fn variable(&self, name: &str) -> Option<crate::Value> {
        let decl = self
            .arena
            .variables()
            .iter()
            .find(|decl| self.arena.name_str(decl.name) == name)?;
        self.state.env.get(decl.name)
    }
}
