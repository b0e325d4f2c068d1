//! The `check` command: lower every program and report well-formedness.

use npl_diagnostic::{has_errors, Diagnostic};

use super::load_scenario;
use crate::scenario::{lower_program, Scenario, ScenarioError};

/// Diagnostics for one program of a scenario.
#[derive(Clone, Debug)]
pub struct ProgramCheck {
    pub index: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProgramCheck {
    pub fn is_well_formed(&self) -> bool {
        !has_errors(&self.diagnostics)
    }
}

/// Check every program in a scenario.
///
/// Structural problems in the scenario itself (unknown operators, programs
/// pointing at missing entities) are errors; well-formedness violations are
/// reported per program.
pub fn check_scenario(scenario: &Scenario) -> Result<Vec<ProgramCheck>, ScenarioError> {
    let (_, ids) = scenario.build_world()?;
    scenario
        .programs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            spec.entity_id(index, &ids)?;
            let lowered = lower_program(spec)?;
            let diagnostics = npl_check::check_program(&lowered.arena, lowered.root);
            Ok(ProgramCheck { index, diagnostics })
        })
        .collect()
}

/// Check a scenario file, printing diagnostics to stderr.
pub fn check_file(path: &str) -> i32 {
    let Some(scenario) = load_scenario(path) else {
        return 1;
    };
    let checks = match check_scenario(&scenario) {
        Ok(checks) => checks,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let mut failed = false;
    for check in &checks {
        for diagnostic in &check.diagnostics {
            eprintln!("program {}: {diagnostic}", check.index);
        }
        failed |= !check.is_well_formed();
    }
    if failed {
        return 1;
    }

    println!("OK: {path} ({} programs)", checks.len());
    0
}
