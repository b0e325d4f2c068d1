//! Runtime error types.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries typed data for each failure; the message is the
//! kind's `Display`. Factory functions (`type_mismatch()`, `domain_error()`,
//! ...) are the public API for building errors. The evaluator attaches the
//! span of the innermost expression that failed.

use std::fmt;

use npl_ir::Span;

mod diagnostics;

/// Result of evaluating an expression.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    /// A value or object has the wrong tag or capability for an operation.
    TypeMismatch { expected: String, found: String },
    /// Read or assignment of a name the program never declared.
    UnknownVariable { name: String },
    /// Argument outside the operation's domain (`sqrt(-1)`, `random(0)`).
    DomainError { operation: &'static str, detail: String },
    /// Tile query at a position that cannot be mapped onto the grid.
    OutOfWorldBounds { x: f64, y: f64 },
    /// `step()` called on a statement with no steps left.
    NoMoreSteps,
    /// Expression referred to `self` with no entity bound.
    Unbound,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::UnknownVariable { name } => write!(f, "unknown variable: {name}"),
            Self::DomainError { operation, detail } => write!(f, "{operation}: {detail}"),
            Self::OutOfWorldBounds { x, y } => {
                write!(f, "position ({x}, {y}) is outside the world")
            }
            Self::NoMoreSteps => write!(f, "statement has no more steps"),
            Self::Unbound => write!(f, "program is not bound to an entity"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Expression or statement where the error occurred.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a span unless one is already set.
    ///
    /// The innermost span wins; outer callers can add theirs unconditionally.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

/// Value or object of the wrong kind.
#[cold]
pub fn type_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

#[cold]
pub fn unknown_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn domain_error(operation: &'static str, detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DomainError {
        operation,
        detail: detail.into(),
    })
}

#[cold]
pub fn out_of_world_bounds(x: f64, y: f64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutOfWorldBounds { x, y })
}

#[cold]
pub fn no_more_steps() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMoreSteps)
}

#[cold]
pub fn unbound() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unbound)
}

#[cfg(test)]
mod tests;
