//! NPL Eval - step-driven interpreter for entity programs.
//!
//! Entity programs run a few primitive steps per simulation tick and must
//! survive being paused mid-statement, including inside loops and `wait`.
//! Instead of host threads or coroutines, every statement has a resumable
//! cursor stored beside the immutable tree.
//!
//! # Architecture
//!
//! - `Value`: tagged runtime values with checked casts
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `queries`: world-reading operators over a `WorldView`
//! - `Environment`: the program's single flat scope of typed variables
//! - `CursorTable`: per-statement `NotStarted | Running | Done` state
//! - `Interpreter`: expression evaluation and the step protocol
//! - `Program`: checking, entity binding and budgeted `advance`

mod config;
pub mod cursor;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod program;
pub mod queries;
mod unary_operators;
mod value;

pub use config::ExecConfig;
pub use cursor::{CursorState, CursorTable, Frame, Signal};
pub use environment::{AssignError, Environment};
pub use errors::{
    domain_error, no_more_steps, out_of_world_bounds, type_mismatch, unbound, unknown_variable,
    EvalError, EvalErrorKind, EvalResult,
};
pub use interpreter::{ExecState, Interpreter};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use program::{AdvanceReport, Program, ProgramBuilder, ProgramError, ProgramStatus};
pub use unary_operators::{evaluate_unary, random_below};
pub use value::Value;

#[cfg(test)]
mod tests;
