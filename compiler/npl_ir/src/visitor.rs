//! Program tree visitor.
//!
//! Provides generic read-only traversal of a [`ProgramArena`]. Default
//! implementations call `walk_*` functions that traverse children; override
//! `visit_*` to add behavior at specific nodes and call the matching `walk_*`
//! to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountPrints {
//!     count: usize,
//! }
//!
//! impl Visitor for CountPrints {
//!     fn visit_stmt(&mut self, id: StmtId, arena: &ProgramArena) {
//!         if matches!(arena.stmt(id), StmtKind::Print(_)) {
//!             self.count += 1;
//!         }
//!         walk_stmt(self, id, arena);
//!     }
//! }
//! ```

use crate::{ExprId, ExprKind, ProgramArena, StmtId, StmtKind};

/// Program tree visitor.
///
/// The visitor can mutate its own state during traversal; the tree itself
/// remains immutable.
pub trait Visitor {
    /// Visit a statement.
    fn visit_stmt(&mut self, id: StmtId, arena: &ProgramArena) {
        walk_stmt(self, id, arena);
    }

    /// Visit an expression.
    fn visit_expr(&mut self, id: ExprId, arena: &ProgramArena) {
        walk_expr(self, id, arena);
    }
}

/// Visit every direct child of a statement, expressions first.
pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, id: StmtId, arena: &ProgramArena) {
    match *arena.stmt(id) {
        StmtKind::Skip | StmtKind::Action(_) | StmtKind::Break => {}
        StmtKind::Assign { value, .. } => visitor.visit_expr(value, arena),
        StmtKind::Print(value) | StmtKind::Wait(value) => visitor.visit_expr(value, arena),
        StmtKind::Sequence(range) => {
            for &child in arena.stmt_list(range) {
                visitor.visit_stmt(child, arena);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond, arena);
            visitor.visit_stmt(then_branch, arena);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch, arena);
            }
        }
        StmtKind::While { cond, body } => {
            visitor.visit_expr(cond, arena);
            visitor.visit_stmt(body, arena);
        }
        StmtKind::Foreach {
            filter, sort, body, ..
        } => {
            if let Some(filter) = filter {
                visitor.visit_expr(filter, arena);
            }
            if let Some((key, _)) = sort {
                visitor.visit_expr(key, arena);
            }
            visitor.visit_stmt(body, arena);
        }
    }
}

/// Visit every direct child of an expression.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, id: ExprId, arena: &ProgramArena) {
    match *arena.expr(id) {
        ExprKind::Constant(_) | ExprKind::Variable(_) | ExprKind::SelfRef => {}
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand, arena),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left, arena);
            visitor.visit_expr(right, arena);
        }
    }
}
