//! Command handlers for the `npl` CLI.
//!
//! Each handler returns the process exit code; the binary only parses
//! arguments and exits with it. The library halves (`check_scenario`,
//! `simulate`) do no printing of their own and are what tests drive.

use std::path::Path;

use crate::scenario::Scenario;

mod check;
mod run;

pub use check::{check_file, check_scenario, ProgramCheck};
pub use run::{
    parse_run_options, run_file, simulate, ProgramOutcome, RunError, RunOptions, RunSummary,
};

/// Load a scenario, reporting failures on stderr.
fn load_scenario(path: &str) -> Option<Scenario> {
    match Scenario::load(Path::new(path)) {
        Ok(scenario) => Some(scenario),
        Err(err) => {
            eprintln!("error: {err}");
            None
        }
    }
}
