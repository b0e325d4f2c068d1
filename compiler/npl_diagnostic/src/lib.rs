//! Diagnostic system for NPL programs.
//!
//! Every diagnostic carries:
//! - an error code for searchability
//! - a clear message (what went wrong)
//! - a primary span (where it went wrong)
//! - optional context labels and notes
//!
//! Static well-formedness violations use the `E2xxx` range; runtime failures
//! surfaced by the evaluator use `E6xxx`.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;

/// Whether any diagnostic in the slice is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
