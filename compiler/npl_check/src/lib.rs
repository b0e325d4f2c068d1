//! NPL Check - static well-formedness pass for entity programs.
//!
//! A program is well-formed when the pass reports no error diagnostics.
//! Only well-formed programs can be bound to an entity and executed.
//!
//! # Rules
//!
//! Structural:
//! - `break` needs an enclosing `while` or `foreach` (E2001)
//! - no action statement anywhere inside a `foreach`, including through
//!   nested `if`/`while` (E2002)
//!
//! Typing:
//! - variables must be declared, once (E2003, E2009)
//! - operands must have the operator's types (E2004)
//! - assigned values must match the declared type (E2005)
//! - conditions and `foreach` filters must be boolean (E2006)
//! - `wait` takes a non-negative numeric constant (E2007)
//! - `foreach` variables must be declared as objects (E2008)
//!
//! The pass never evaluates expressions and never mutates the tree.

mod checker;
mod typing;

use npl_diagnostic::Diagnostic;
use npl_ir::{ProgramArena, StmtId};
use tracing::debug;

pub use checker::Checker;
pub use typing::infer_expr_type;

/// Run every check over the program rooted at `root`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check_program(arena: &ProgramArena, root: StmtId) -> Vec<Diagnostic> {
    let diagnostics = Checker::new(arena).check(arena, root);
    debug!(count = diagnostics.len(), "program checked");
    diagnostics
}

/// Whether the program rooted at `root` passes every check.
pub fn is_well_formed(arena: &ProgramArena, root: StmtId) -> bool {
    !npl_diagnostic::has_errors(&check_program(arena, root))
}
