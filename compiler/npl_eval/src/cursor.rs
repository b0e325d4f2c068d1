//! Resumable execution state for statements.
//!
//! The program tree is immutable; everything that changes while a statement
//! runs lives in a [`CursorTable`] beside it, one [`CursorState`] per
//! statement. A statement moves `NotStarted -> Running -> Done`; restarting
//! puts it and its whole subtree back to `NotStarted`.
//!
//! Cursors settle eagerly: a step that leaves a statement with nothing more
//! to do marks it `Done` in that same step, so `Running` always means at
//! least one more step is pending.

use npl_ir::{ExprId, ExprKind, Literal, ProgramArena, StmtId, StmtKind};
use npl_stack::ensure_sufficient_stack;
use npl_world::ObjectRef;

use crate::ExecConfig;

/// Outcome of one successful step.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Signal {
    /// Work was done; the enclosing statement carries on.
    Continue,
    /// A `break` ran; the nearest enclosing loop must finish.
    Break,
}

/// Per-statement continuation data.
#[derive(Clone, PartialEq, Debug)]
pub enum Frame {
    /// Index of the child currently running.
    Sequence { index: usize },
    /// Branch chosen by the condition step.
    If { branch: StmtId },
    /// Whether the body is mid-iteration; otherwise the condition is next.
    While { in_body: bool },
    /// Frozen snapshot and the element bound to the loop variable.
    Foreach { items: Vec<ObjectRef>, index: usize },
    /// Idle steps still to take.
    Wait { remaining: u64 },
}

/// Execution state of one statement.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum CursorState {
    #[default]
    NotStarted,
    Running(Frame),
    Done,
}

/// Cursor state for every statement of a program, indexed by `StmtId`.
#[derive(Clone, Debug, Default)]
pub struct CursorTable {
    states: Vec<CursorState>,
}

impl CursorTable {
    pub fn new(arena: &ProgramArena) -> Self {
        CursorTable {
            states: vec![CursorState::NotStarted; arena.stmt_count()],
        }
    }

    #[inline]
    pub fn state(&self, stmt: StmtId) -> &CursorState {
        // Ids come from the same arena the table was sized for.
        &self.states[stmt.index()]
    }

    #[inline]
    pub fn set(&mut self, stmt: StmtId, state: CursorState) {
        self.states[stmt.index()] = state;
    }

    /// Move a statement's state out, leaving `Done` behind.
    ///
    /// The stepper puts the updated state back once the step is over.
    #[inline]
    pub(crate) fn take(&mut self, stmt: StmtId) -> CursorState {
        std::mem::replace(&mut self.states[stmt.index()], CursorState::Done)
    }

    pub fn is_done(&self, stmt: StmtId) -> bool {
        matches!(self.state(stmt), CursorState::Done)
    }

    /// Reset `stmt` and every statement below it to `NotStarted`.
    pub fn restart(&mut self, arena: &ProgramArena, stmt: StmtId) {
        ensure_sufficient_stack(|| {
            self.set(stmt, CursorState::NotStarted);
            for child in children(arena, stmt) {
                self.restart(arena, child);
            }
        });
    }

    /// Reset every statement to `NotStarted`.
    pub fn reset(&mut self) {
        self.states.fill(CursorState::NotStarted);
    }
}

/// Direct child statements of `stmt`.
fn children(arena: &ProgramArena, stmt: StmtId) -> Vec<StmtId> {
    match *arena.stmt(stmt) {
        StmtKind::Sequence(range) => arena.stmt_list(range).to_vec(),
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => std::iter::once(then_branch).chain(else_branch).collect(),
        StmtKind::While { body, .. } | StmtKind::Foreach { body, .. } => vec![body],
        StmtKind::Skip
        | StmtKind::Assign { .. }
        | StmtKind::Print(_)
        | StmtKind::Action(_)
        | StmtKind::Break
        | StmtKind::Wait(_) => Vec::new(),
    }
}

/// Whether a fresh activation of `stmt` takes at least one step.
///
/// A `wait` shorter than one sub-step and a sequence of such statements do
/// nothing and are skipped without consuming budget. Everything else costs
/// at least one step: conditions and `foreach` snapshots are steps too.
pub fn has_work(arena: &ProgramArena, config: &ExecConfig, stmt: StmtId) -> bool {
    match *arena.stmt(stmt) {
        StmtKind::Wait(duration) => wait_steps(arena, config, duration) > 0,
        StmtKind::Sequence(range) => ensure_sufficient_stack(|| {
            arena
                .stmt_list(range)
                .iter()
                .any(|&child| has_work(arena, config, child))
        }),
        StmtKind::Skip
        | StmtKind::Assign { .. }
        | StmtKind::Print(_)
        | StmtKind::Action(_)
        | StmtKind::Break
        | StmtKind::If { .. }
        | StmtKind::While { .. }
        | StmtKind::Foreach { .. } => true,
    }
}

/// Steps taken by `wait(duration)`.
///
/// Only numeric constants are accepted by the checker; anything else is
/// treated as no wait at all.
pub fn wait_steps(arena: &ProgramArena, config: &ExecConfig, duration: ExprId) -> u64 {
    match *arena.expr(duration) {
        ExprKind::Constant(Literal::Number(seconds)) => config.wait_steps(seconds),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npl_ir::Type;

    #[test]
    fn test_restart_resets_subtree_only() {
        let mut arena = ProgramArena::new();
        let a = arena.skip_stmt();
        let b = arena.skip_stmt();
        let inner = arena.sequence_stmt([a, b]);
        let other = arena.skip_stmt();
        let root = arena.sequence_stmt([inner, other]);

        let mut table = CursorTable::new(&arena);
        for stmt in [a, b, inner, other, root] {
            table.set(stmt, CursorState::Done);
        }
        table.restart(&arena, inner);

        assert_eq!(table.state(a), &CursorState::NotStarted);
        assert_eq!(table.state(b), &CursorState::NotStarted);
        assert_eq!(table.state(inner), &CursorState::NotStarted);
        assert!(table.is_done(other));
        assert!(table.is_done(root));
    }

    #[test]
    fn test_has_work() {
        let config = ExecConfig::default();
        let mut arena = ProgramArena::new();
        let zero = arena.number(0.0);
        let no_wait = arena.wait_stmt(zero);
        let empty = arena.sequence_stmt([]);
        let nested = arena.sequence_stmt([no_wait, empty]);
        let tenth = arena.number(0.1);
        let wait = arena.wait_stmt(tenth);
        let x = arena.declare("x", Type::Double);
        let read = arena.var(x);
        let not_constant = arena.wait_stmt(read);

        assert!(!has_work(&arena, &config, no_wait));
        assert!(!has_work(&arena, &config, empty));
        assert!(!has_work(&arena, &config, nested));
        assert!(has_work(&arena, &config, wait));
        assert!(!has_work(&arena, &config, not_constant));
        assert_eq!(wait_steps(&arena, &config, tenth), 100);
    }
}
