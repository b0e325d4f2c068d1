//! `ProgramBuilder` for creating programs with non-default configuration.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use npl_ir::{ProgramArena, StmtId};

use super::{Program, ProgramStatus};
use crate::interpreter::ExecState;
use crate::{stdout_handler, ExecConfig, SharedPrintHandler};

/// Builder for [`Program`].
///
/// Every program is checked when built; an ill-formed program can still be
/// built (so its diagnostics can be reported) but refuses to bind.
pub struct ProgramBuilder {
    arena: ProgramArena,
    root: StmtId,
    config: ExecConfig,
    print_handler: Option<SharedPrintHandler>,
    seed: Option<u64>,
}

impl ProgramBuilder {
    pub fn new(arena: ProgramArena, root: StmtId) -> Self {
        ProgramBuilder {
            arena,
            root,
            config: ExecConfig::default(),
            print_handler: None,
            seed: None,
        }
    }

    /// Set step timing and default budget.
    #[must_use]
    pub fn config(mut self, config: ExecConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where `print` output goes (stdout if unset).
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Seed the `random` operator for reproducible runs.
    ///
    /// Without a seed the generator is seeded from the OS.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Program {
        let diagnostics = npl_check::check_program(&self.arena, self.root);
        let rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let state = ExecState::new(&self.arena, rng);
        Program {
            arena: self.arena,
            root: self.root,
            diagnostics,
            state,
            entity: None,
            config: self.config,
            print: self.print_handler.unwrap_or_else(stdout_handler),
            status: ProgramStatus::Ready,
            last_error: None,
        }
    }
}
