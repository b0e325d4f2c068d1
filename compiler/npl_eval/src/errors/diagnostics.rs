//! Runtime error to diagnostic conversion.
//!
//! Runtime failures use the `E6xxx` codes so a scenario report can list
//! them next to static `E2xxx` diagnostics.

use npl_diagnostic::{Diagnostic, ErrorCode};

use super::{EvalError, EvalErrorKind};

impl EvalErrorKind {
    /// Map this error kind to its `ErrorCode`.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. } => ErrorCode::E6001,
            Self::UnknownVariable { .. } => ErrorCode::E6002,
            Self::DomainError { .. } => ErrorCode::E6003,
            Self::OutOfWorldBounds { .. } => ErrorCode::E6004,
            Self::NoMoreSteps => ErrorCode::E6005,
            Self::Unbound => ErrorCode::E6006,
        }
    }

    /// Concise label for the primary span.
    pub fn primary_label(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "wrong kind of value here",
            Self::UnknownVariable { .. } => "not declared",
            Self::DomainError { .. } => "argument out of range",
            Self::OutOfWorldBounds { .. } => "position not on the grid",
            Self::NoMoreSteps => "already finished",
            Self::Unbound => "no entity bound",
        }
    }
}

impl EvalError {
    /// Convert this error into a `Diagnostic`.
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code()).with_message(&self.message);
        if let Some(span) = self.span {
            diag = diag.with_label(span, self.kind.primary_label());
        }
        if matches!(self.kind, EvalErrorKind::NoMoreSteps) {
            diag = diag.with_note("restart the statement before stepping it again");
        }
        diag
    }
}
