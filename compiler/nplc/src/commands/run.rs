//! The `run` command: a headless simulation loop.
//!
//! Each tick every program gets its step budget, in scenario order, then the
//! collected movement intents are applied and running entities drift
//! sideways. There is no gravity or collision; the loop exists to exercise
//! programs, not to be a physics engine.

use std::fmt;
use std::str::FromStr;

use npl_diagnostic::Diagnostic;
use npl_eval::{
    stdout_handler, AdvanceReport, EvalError, ExecConfig, Program, ProgramBuilder, ProgramError,
    ProgramStatus, SharedPrintHandler,
};
use npl_world::{Direction, EntityId, GridWorld, MovementIntent, WorldView};
use tracing::{debug, trace};

use super::load_scenario;
use crate::scenario::{lower_program, Scenario, ScenarioError};

/// Options of `npl run`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RunOptions {
    /// Number of simulation ticks.
    pub ticks: u32,
    /// Steps per program per tick; derived from `dt` when unset.
    pub budget: Option<u32>,
    /// Simulated seconds per tick.
    pub dt: f64,
    /// Base RNG seed; program `i` is seeded with `seed + i`.
    pub seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            ticks: 100,
            budget: None,
            dt: 0.1,
            seed: None,
        }
    }
}

impl RunOptions {
    /// Step budget for one tick under `config`.
    ///
    /// Without an explicit budget a tick grants as many steps as fit in
    /// `dt` at the configured sub-step, and always at least one.
    pub fn budget(&self, config: &ExecConfig) -> u32 {
        self.budget.unwrap_or_else(|| {
            u32::try_from(config.wait_steps(self.dt))
                .unwrap_or(u32::MAX)
                .max(1)
        })
    }
}

/// Parse `--ticks=N`, `--budget=N`, `--dt=S` and `--seed=N`.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--ticks=") {
            options.ticks = parse_flag("--ticks", value)?;
        } else if let Some(value) = arg.strip_prefix("--budget=") {
            options.budget = Some(parse_flag("--budget", value)?);
        } else if let Some(value) = arg.strip_prefix("--dt=") {
            let dt: f64 = parse_flag("--dt", value)?;
            if !dt.is_finite() || dt <= 0.0 {
                return Err(format!("--dt must be a positive number of seconds, got {value}"));
            }
            options.dt = dt;
        } else if let Some(value) = arg.strip_prefix("--seed=") {
            options.seed = Some(parse_flag("--seed", value)?);
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }
    Ok(options)
}

fn parse_flag<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value '{value}' for {flag}"))
}

/// Errors that stop a simulation before it starts.
#[derive(Debug)]
pub enum RunError {
    Scenario(ScenarioError),
    Program { index: usize, error: ProgramError },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Scenario(err) => write!(f, "{err}"),
            RunError::Program { index, error } => write!(f, "program {index}: {error}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Scenario(err) => Some(err),
            RunError::Program { error, .. } => Some(error),
        }
    }
}

impl From<ScenarioError> for RunError {
    fn from(err: ScenarioError) -> Self {
        RunError::Scenario(err)
    }
}

impl RunError {
    /// Well-formedness diagnostics, when a program failed to bind because
    /// of them.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            RunError::Program {
                error: ProgramError::IllFormed(diagnostics),
                ..
            } => diagnostics,
            _ => &[],
        }
    }
}

/// What happened to one program over a run.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgramOutcome {
    pub index: usize,
    pub entity: EntityId,
    pub status: ProgramStatus,
    pub steps: u64,
    /// Activations that ran to completion.
    pub completed: u32,
    /// Activations aborted by a runtime error.
    pub faults: u32,
    pub last_error: Option<String>,
}

impl ProgramOutcome {
    fn new(index: usize, entity: EntityId) -> Self {
        ProgramOutcome {
            index,
            entity,
            status: ProgramStatus::Ready,
            steps: 0,
            completed: 0,
            faults: 0,
            last_error: None,
        }
    }

    fn record(&mut self, report: AdvanceReport, error: Option<&EvalError>) {
        self.steps += u64::from(report.steps);
        self.status = report.status;
        match report.status {
            ProgramStatus::Completed => self.completed += 1,
            ProgramStatus::Faulted => {
                self.faults += 1;
                self.last_error = error.map(ToString::to_string);
            }
            ProgramStatus::Ready | ProgramStatus::Running => {}
        }
    }
}

/// Result of a finished simulation.
#[derive(Debug)]
pub struct RunSummary {
    pub ticks: u32,
    pub budget: u32,
    pub outcomes: Vec<ProgramOutcome>,
    pub world: GridWorld,
}

/// Run a scenario, sending program output to `print`.
pub fn simulate(
    scenario: &Scenario,
    options: &RunOptions,
    print: &SharedPrintHandler,
) -> Result<RunSummary, RunError> {
    let (mut world, ids) = scenario.build_world()?;
    let config = ExecConfig::default();
    let budget = options.budget(&config);
    let config = config.with_default_budget(budget);

    let mut programs: Vec<(Program, ProgramOutcome)> = Vec::with_capacity(scenario.programs.len());
    for ((index, spec), offset) in scenario.programs.iter().enumerate().zip(0u64..) {
        let entity = spec.entity_id(index, &ids)?;
        let lowered = lower_program(spec)?;
        let mut builder = ProgramBuilder::new(lowered.arena, lowered.root)
            .config(config)
            .print_handler(print.clone());
        if let Some(seed) = options.seed {
            builder = builder.seed(seed.wrapping_add(offset));
        }
        let mut program = builder.build();
        program
            .bind(entity, &world)
            .map_err(|error| RunError::Program { index, error })?;
        programs.push((program, ProgramOutcome::new(index, entity)));
    }
    debug!(
        ticks = options.ticks,
        budget,
        programs = programs.len(),
        "simulation started"
    );

    let distance = scenario.world.speed * options.dt;
    let mut intents: Vec<(EntityId, MovementIntent)> = Vec::new();
    for tick in 0..options.ticks {
        trace!(tick, "tick");
        for (program, outcome) in &mut programs {
            let report = program
                .tick(&world, &mut intents)
                .map_err(|error| RunError::Program {
                    index: outcome.index,
                    error,
                })?;
            outcome.record(report, program.last_error());
        }
        for (entity, intent) in intents.drain(..) {
            world.apply_intent(entity, intent);
        }
        drift(&mut world, distance);
    }

    Ok(RunSummary {
        ticks: options.ticks,
        budget,
        outcomes: programs.into_iter().map(|(_, outcome)| outcome).collect(),
        world,
    })
}

/// Move running entities `distance` pixels along their heading, kept
/// inside the world horizontally.
fn drift(world: &mut GridWorld, distance: f64) {
    let width = world.world_bounds().width;
    for id in world.entity_ids() {
        let Some(info) = world.entity_mut(id) else {
            continue;
        };
        if info.dead {
            continue;
        }
        let dx = match info.horizontal {
            Direction::Left => -distance,
            Direction::Right => distance,
            _ => continue,
        };
        let max_x = (width - info.bounds.width).max(0.0);
        info.bounds.x = (info.bounds.x + dx).clamp(0.0, max_x);
    }
}

/// Run a scenario file, printing program output to stdout and a summary to
/// stderr.
pub fn run_file(path: &str, options: &RunOptions) -> i32 {
    let Some(scenario) = load_scenario(path) else {
        return 1;
    };
    let summary = match simulate(&scenario, options, &stdout_handler()) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("error: {err}");
            for diagnostic in err.diagnostics() {
                eprintln!("{diagnostic}");
            }
            return 1;
        }
    };

    eprintln!(
        "ran {} ticks at {} steps per tick",
        summary.ticks, summary.budget
    );
    for outcome in &summary.outcomes {
        eprintln!(
            "program {} (entity {}): {}, {} steps, {} completed, {} faulted",
            outcome.index,
            outcome.entity,
            outcome.status.as_str(),
            outcome.steps,
            outcome.completed,
            outcome.faults,
        );
        if let Some(error) = &outcome.last_error {
            eprintln!("  last error: {error}");
        }
    }
    0
}
