//! NPL IR - syntax tree types for entity programs.
//!
//! This crate contains the core data structures shared by the checker and
//! the evaluator:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The value-level vocabulary of the language (`Type`, `Direction`, `Literal`)
//! - Expression and statement nodes (`ExprKind`, `StmtKind`)
//! - `ProgramArena`, the flat storage for one program's tree
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: variable names are `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId`/`StmtId` indices
//! - **Immutable Trees**: once built, a program's arena is never mutated;
//!   execution state lives in cursors owned by the evaluator

pub mod ast;
mod arena;
mod ids;
mod interner;
mod name;
mod span;
mod ty;
pub mod visitor;

pub use arena::{ProgramArena, VariableDecl};
pub use ast::{
    ActionKind, BinaryOp, EntityKind, ExprKind, ForeachKind, SortOrder, StmtKind, UnaryOp,
};
pub use ids::{ExprId, StmtId, StmtRange};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use ty::{Direction, Literal, Type};
