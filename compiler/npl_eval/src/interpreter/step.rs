//! Statement stepping.
//!
//! Each call to [`Interpreter::step`] performs exactly one primitive step of
//! a statement and settles its cursor before returning: a statement whose
//! work is finished is `Done` immediately, never "Running with nothing
//! left". Composite statements delegate the step to the child they are
//! currently running.

use npl_ir::{ActionKind, ExprId, ForeachKind, Name, SortOrder, StmtId, StmtKind, StmtRange};
use npl_stack::ensure_sufficient_stack;
use npl_world::{MovementIntent, ObjectRef};

use super::Interpreter;
use crate::cursor::{has_work, wait_steps, CursorState, Frame, Signal};
use crate::errors::{no_more_steps, unbound, EvalError};
use crate::Value;

type StepResult = Result<Signal, EvalError>;

impl Interpreter<'_> {
    /// Whether `stmt` has at least one step left in its current activation.
    ///
    /// Only a `Done` statement has none. A fresh statement with nothing to
    /// do (`wait 0`, an empty sequence) still takes one no-op step to settle.
    pub fn has_more_steps(&self, stmt: StmtId) -> bool {
        !self.state.cursors.is_done(stmt)
    }

    /// Perform one primitive step of `stmt`.
    ///
    /// Stepping a `Done` statement fails with `NoMoreSteps`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn step(&mut self, stmt: StmtId) -> StepResult {
        if !self.has_more_steps(stmt) {
            return Err(no_more_steps().with_span(self.arena.stmt_span(stmt)));
        }
        self.step_stmt(stmt)
    }

    /// Whether a child still needs steps. Unlike [`Self::has_more_steps`],
    /// a fresh child with no work counts as finished so parents skip it.
    fn has_work_left(&self, stmt: StmtId) -> bool {
        match self.state.cursors.state(stmt) {
            CursorState::Done => false,
            CursorState::Running(_) => true,
            CursorState::NotStarted => has_work(self.arena, self.config, stmt),
        }
    }

    /// Put `stmt` and everything below it back to `NotStarted`.
    pub fn restart(&mut self, stmt: StmtId) {
        self.state.cursors.restart(self.arena, stmt);
    }

    /// One step of a statement known to have work left.
    ///
    /// The statement's cursor is taken out for the duration of the step and
    /// left `Done` unless the step stores a new frame.
    fn step_stmt(&mut self, stmt: StmtId) -> StepResult {
        ensure_sufficient_stack(|| {
            let state = self.state.cursors.take(stmt);
            let span = self.arena.stmt_span(stmt);
            match *self.arena.stmt(stmt) {
                StmtKind::Skip => Ok(Signal::Continue),
                StmtKind::Assign { target, value } => {
                    let value = self.eval_expr(value)?;
                    self.assign(target, value, span)?;
                    Ok(Signal::Continue)
                }
                StmtKind::Print(value) => {
                    let value = self.eval_expr(value)?;
                    self.print.println(&value.to_string());
                    Ok(Signal::Continue)
                }
                StmtKind::Action(action) => {
                    self.step_action(action).map_err(|e| e.with_span(span))
                }
                StmtKind::Break => Ok(Signal::Break),
                StmtKind::Wait(duration) => Ok(self.step_wait(stmt, state, duration)),
                StmtKind::Sequence(range) => self.step_sequence(stmt, state, range),
                StmtKind::If {
                    cond,
                    then_branch,
                    else_branch,
                } => self.step_if(stmt, state, cond, then_branch, else_branch),
                StmtKind::While { cond, body } => self.step_while(stmt, state, cond, body),
                StmtKind::Foreach {
                    var,
                    kind,
                    filter,
                    sort,
                    body,
                } => {
                    let parts = ForeachParts {
                        var,
                        kind,
                        filter,
                        sort,
                        body,
                    };
                    self.step_foreach(stmt, state, parts)
                }
            }
        })
    }

    /// Step a child and report whether it still has work afterwards.
    fn step_child(&mut self, child: StmtId) -> Result<(Signal, bool), EvalError> {
        let signal = self.step_stmt(child)?;
        Ok((signal, self.has_work_left(child)))
    }

    fn running(&mut self, stmt: StmtId, frame: Frame) {
        self.state.cursors.set(stmt, CursorState::Running(frame));
    }

    fn step_action(&mut self, action: ActionKind) -> StepResult {
        let entity = self.entity.ok_or_else(unbound)?;
        tracing::trace!(%entity, action = action.as_str(), "submitting intent");
        self.intents.submit(entity, MovementIntent::from(action));
        Ok(Signal::Continue)
    }

    fn step_wait(&mut self, stmt: StmtId, state: CursorState, duration: ExprId) -> Signal {
        let remaining = match state {
            CursorState::Running(Frame::Wait { remaining }) => remaining,
            _ => wait_steps(self.arena, self.config, duration),
        };
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.running(stmt, Frame::Wait { remaining });
        }
        Signal::Continue
    }

    fn step_sequence(&mut self, stmt: StmtId, state: CursorState, range: StmtRange) -> StepResult {
        let arena = self.arena;
        let children = arena.stmt_list(range);
        let start = match state {
            CursorState::Running(Frame::Sequence { index }) => index,
            _ => 0,
        };
        let Some(index) = self.next_with_work(children, start) else {
            return Ok(Signal::Continue);
        };

        let (signal, more) = self.step_child(children[index])?;
        if signal == Signal::Break {
            return Ok(Signal::Break);
        }
        let next = if more {
            Some(index)
        } else {
            self.next_with_work(children, index + 1)
        };
        if let Some(index) = next {
            self.running(stmt, Frame::Sequence { index });
        }
        Ok(Signal::Continue)
    }

    /// First child at or after `start` that still has work.
    fn next_with_work(&self, children: &[StmtId], start: usize) -> Option<usize> {
        (start..children.len()).find(|&i| self.has_work_left(children[i]))
    }

    fn step_if(
        &mut self,
        stmt: StmtId,
        state: CursorState,
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> StepResult {
        if let CursorState::Running(Frame::If { branch }) = state {
            let (signal, more) = self.step_child(branch)?;
            if more && signal == Signal::Continue {
                self.running(stmt, Frame::If { branch });
            }
            return Ok(signal);
        }

        let branch = if self.eval_bool(cond)? {
            Some(then_branch)
        } else {
            else_branch
        };
        if let Some(branch) = branch {
            self.restart(branch);
            if self.has_work_left(branch) {
                self.running(stmt, Frame::If { branch });
            }
        }
        Ok(Signal::Continue)
    }

    fn step_while(
        &mut self,
        stmt: StmtId,
        state: CursorState,
        cond: ExprId,
        body: StmtId,
    ) -> StepResult {
        if let CursorState::Running(Frame::While { in_body: true }) = state {
            let (signal, more) = self.step_child(body)?;
            if signal == Signal::Break {
                // Absorbed: the loop is finished.
                return Ok(Signal::Continue);
            }
            self.running(stmt, Frame::While { in_body: more });
            return Ok(Signal::Continue);
        }

        if self.eval_bool(cond)? {
            self.restart(body);
            let in_body = self.has_work_left(body);
            self.running(stmt, Frame::While { in_body });
        }
        Ok(Signal::Continue)
    }

    fn step_foreach(
        &mut self,
        stmt: StmtId,
        state: CursorState,
        parts: ForeachParts,
    ) -> StepResult {
        let span = self.arena.stmt_span(stmt);
        let CursorState::Running(Frame::Foreach { items, index }) = state else {
            let items = self.snapshot(parts.var, parts.kind, parts.filter, parts.sort, span)?;
            tracing::trace!(count = items.len(), kind = parts.kind.as_str(), "foreach snapshot");
            return self.enter_element(stmt, &parts, items, 0);
        };

        let (signal, more) = self
            .step_child(parts.body)
            .map_err(|err| self.release_loop_var(parts.var, span, err))?;
        if signal == Signal::Break {
            self.assign(parts.var, Value::NULL, span)?;
            return Ok(Signal::Continue);
        }
        if more {
            self.running(stmt, Frame::Foreach { items, index });
            return Ok(Signal::Continue);
        }
        self.enter_element(stmt, &parts, items, index + 1)
    }

    /// Bind the loop variable to `items[index]` and start the body, or clear
    /// the variable and finish when there is nothing left to run.
    fn enter_element(
        &mut self,
        stmt: StmtId,
        parts: &ForeachParts,
        items: Vec<ObjectRef>,
        index: usize,
    ) -> StepResult {
        let span = self.arena.stmt_span(stmt);
        let element = items.get(index).copied();
        match element {
            Some(object) if has_work(self.arena, self.config, parts.body) => {
                self.assign(parts.var, Value::Object(object), span)?;
                self.restart(parts.body);
                self.running(stmt, Frame::Foreach { items, index });
            }
            _ => self.assign(parts.var, Value::NULL, span)?,
        }
        Ok(Signal::Continue)
    }
}

/// Fields of a `foreach` statement.
struct ForeachParts {
    var: Name,
    kind: ForeachKind,
    filter: Option<ExprId>,
    sort: Option<(ExprId, SortOrder)>,
    body: StmtId,
}
