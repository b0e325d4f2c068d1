//! Program tree node kinds.
//!
//! Expressions and statements are closed sum types. Evaluation and checking
//! dispatch on the tag with an exhaustive `match`, so adding an operator is a
//! compile error everywhere it is not yet handled.

mod expr;
mod operators;
mod stmt;

pub use expr::ExprKind;
pub use operators::{BinaryOp, EntityKind, UnaryOp};
pub use stmt::{ActionKind, ForeachKind, SortOrder, StmtKind};
