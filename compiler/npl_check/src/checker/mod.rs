//! Structural and statement-level checks.
//!
//! [`Checker`] walks the statement tree with the shared [`Visitor`],
//! tracking the enclosing loops. Root expressions of each statement are
//! typed on the way down; statement rules that need those types run after
//! the statement's children have been visited.

use npl_diagnostic::{Diagnostic, ErrorCode};
use npl_ir::visitor::{walk_stmt, Visitor};
use npl_ir::{ExprId, ExprKind, Literal, Name, ProgramArena, Span, StmtId, StmtKind, Type};
use npl_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::typing::infer_expr_type;

/// Static checker for one program.
pub struct Checker {
    diagnostics: Vec<Diagnostic>,
    /// Types of statement-level expressions, indexed by `ExprId`.
    /// `None` for ill-typed or not-yet-visited expressions.
    expr_types: Vec<Option<Type>>,
    /// Number of enclosing `while`/`foreach` statements.
    loop_depth: u32,
    /// Spans of the enclosing `foreach` statements, innermost last.
    foreach_spans: Vec<Span>,
}

impl Checker {
    pub fn new(arena: &ProgramArena) -> Self {
        Checker {
            diagnostics: Vec::new(),
            expr_types: vec![None; arena.expr_count()],
            loop_depth: 0,
            foreach_spans: Vec::new(),
        }
    }

    /// Check declarations and the tree under `root`, consuming the checker.
    pub fn check(mut self, arena: &ProgramArena, root: StmtId) -> Vec<Diagnostic> {
        self.check_declarations(arena);
        self.visit_stmt(root, arena);
        self.diagnostics
    }

    fn check_declarations(&mut self, arena: &ProgramArena) {
        let mut seen = FxHashSet::default();
        for decl in arena.variables() {
            if !seen.insert(decl.name) {
                self.diagnostics.push(
                    Diagnostic::error(ErrorCode::E2009)
                        .with_message(format!(
                            "variable `{}` is declared more than once",
                            arena.name_str(decl.name)
                        ))
                        .with_label(decl.span, "duplicate declaration"),
                );
            }
        }
    }

    fn expr_type(&self, expr: ExprId) -> Option<Type> {
        self.expr_types.get(expr.index()).copied().flatten()
    }

    /// Rules for a single statement, run after its children were visited.
    fn check_stmt(&mut self, arena: &ProgramArena, stmt: StmtId) {
        let span = arena.stmt_span(stmt);
        match *arena.stmt(stmt) {
            StmtKind::Skip | StmtKind::Print(_) | StmtKind::Sequence(_) => {}
            StmtKind::Break => {
                if self.loop_depth == 0 {
                    self.diagnostics.push(
                        Diagnostic::error(ErrorCode::E2001)
                            .with_message("`break` outside of a loop")
                            .with_label(span, "not inside `while` or `foreach`"),
                    );
                }
            }
            StmtKind::Action(action) => {
                if let Some(&foreach_span) = self.foreach_spans.last() {
                    self.diagnostics.push(
                        Diagnostic::error(ErrorCode::E2002)
                            .with_message(format!(
                                "action `{}` inside a `foreach` loop",
                                action.as_str()
                            ))
                            .with_secondary_label(foreach_span, "enclosing `foreach`")
                            .with_label(span, "action not allowed here")
                            .with_note("entity actions cannot run while iterating world objects"),
                    );
                }
            }
            StmtKind::Assign { target, value } => match arena.variable(target) {
                None => self.diagnostics.push(
                    Diagnostic::error(ErrorCode::E2003)
                        .with_message(format!(
                            "assignment to undeclared variable `{}`",
                            arena.name_str(target)
                        ))
                        .with_label(span, "not declared in this program"),
                ),
                Some(decl) => {
                    if let Some(found) = self.expr_type(value) {
                        if found != decl.ty {
                            self.diagnostics.push(
                                Diagnostic::error(ErrorCode::E2005)
                                    .with_message(format!(
                                        "cannot assign {found} to `{}` of type {}",
                                        arena.name_str(target),
                                        decl.ty
                                    ))
                                    .with_label(arena.expr_span(value), format!("this is {found}"))
                                    .with_secondary_label(decl.span, "declared here"),
                            );
                        }
                    }
                }
            },
            StmtKind::If { cond, .. } => self.expect_bool(arena, cond, "`if` condition"),
            StmtKind::While { cond, .. } => self.expect_bool(arena, cond, "`while` condition"),
            StmtKind::Foreach {
                var, filter, sort, ..
            } => {
                self.check_foreach_variable(arena, var, span);
                if let Some(filter) = filter {
                    self.expect_bool(arena, filter, "`foreach` filter");
                }
                if let Some((key, _)) = sort {
                    if let Some(found) = self.expr_type(key) {
                        if found != Type::Double {
                            self.diagnostics.push(
                                Diagnostic::error(ErrorCode::E2004)
                                    .with_message(format!(
                                        "`foreach` sort key must be double, found {found}"
                                    ))
                                    .with_label(arena.expr_span(key), "sort key"),
                            );
                        }
                    }
                }
            }
            StmtKind::Wait(duration) => self.check_wait(arena, duration),
        }
    }

    fn expect_bool(&mut self, arena: &ProgramArena, expr: ExprId, what: &str) {
        if let Some(found) = self.expr_type(expr) {
            if found != Type::Bool {
                self.diagnostics.push(
                    Diagnostic::error(ErrorCode::E2006)
                        .with_message(format!("{what} must be bool, found {found}"))
                        .with_label(arena.expr_span(expr), "expected bool"),
                );
            }
        }
    }

    fn check_foreach_variable(&mut self, arena: &ProgramArena, var: Name, span: Span) {
        match arena.variable(var) {
            None => self.diagnostics.push(
                Diagnostic::error(ErrorCode::E2003)
                    .with_message(format!(
                        "`foreach` over undeclared variable `{}`",
                        arena.name_str(var)
                    ))
                    .with_label(span, "loop variable not declared"),
            ),
            Some(decl) if decl.ty != Type::Object => self.diagnostics.push(
                Diagnostic::error(ErrorCode::E2008)
                    .with_message(format!(
                        "`foreach` variable `{}` must be an object, found {}",
                        arena.name_str(var),
                        decl.ty
                    ))
                    .with_label(span, "loop binds world objects")
                    .with_secondary_label(decl.span, "declared here"),
            ),
            Some(_) => {}
        }
    }

    fn check_wait(&mut self, arena: &ProgramArena, duration: ExprId) {
        let valid = matches!(
            *arena.expr(duration),
            ExprKind::Constant(Literal::Number(n)) if n.is_finite() && n >= 0.0
        );
        if !valid {
            self.diagnostics.push(
                Diagnostic::error(ErrorCode::E2007)
                    .with_message("`wait` duration must be a non-negative numeric constant")
                    .with_label(arena.expr_span(duration), "not a constant duration"),
            );
        }
    }
}

impl Visitor for Checker {
    fn visit_stmt(&mut self, id: StmtId, arena: &ProgramArena) {
        let kind = arena.stmt(id);
        let is_loop = kind.is_loop();
        let is_foreach = matches!(kind, StmtKind::Foreach { .. });

        if is_loop {
            self.loop_depth += 1;
        }
        if is_foreach {
            self.foreach_spans.push(arena.stmt_span(id));
        }
        ensure_sufficient_stack(|| walk_stmt(self, id, arena));
        if is_foreach {
            self.foreach_spans.pop();
        }
        if is_loop {
            self.loop_depth -= 1;
        }

        self.check_stmt(arena, id);
    }

    fn visit_expr(&mut self, id: ExprId, arena: &ProgramArena) {
        // Typing recurses through operands itself.
        let ty = infer_expr_type(arena, id, &mut self.diagnostics);
        if let Some(slot) = self.expr_types.get_mut(id.index()) {
            *slot = ty;
        }
    }
}
