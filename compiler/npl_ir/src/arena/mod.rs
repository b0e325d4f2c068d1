//! Flat storage for one program's syntax tree.
//!
//! [`ProgramArena`] uses struct-of-arrays layout (parallel `kinds`/`spans`
//! arrays indexed by `ExprId`/`StmtId`) and owns the program's interner and
//! variable declarations. The parsing collaborator builds a tree through the
//! `alloc_*` methods and the convenience constructors below; tests do the
//! same directly.
//!
//! # Index Spaces
//!
//! - `exprs`/`expr_spans`: parallel arrays indexed by [`ExprId`]
//! - `stmts`/`stmt_spans`: parallel arrays indexed by [`StmtId`]
//! - `stmt_lists`: flat `Vec<StmtId>` indexed by [`StmtRange`]

use crate::{
    ActionKind, BinaryOp, Direction, ExprId, ExprKind, ForeachKind, Literal, Name, SortOrder,
    Span, StmtId, StmtKind, StmtRange, StringInterner, Type, UnaryOp,
};

/// Declared program variable.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct VariableDecl {
    pub name: Name,
    pub ty: Type,
    pub span: Span,
}

/// Convert an arena length to a `u32` index.
///
/// # Panics
/// Panics if the arena holds more than `u32::MAX` nodes.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("program has more than u32::MAX {what}"))
}

/// Arena for a program's expressions, statements and declarations.
#[derive(Clone, Debug, Default)]
pub struct ProgramArena {
    interner: StringInterner,
    exprs: Vec<ExprKind>,
    expr_spans: Vec<Span>,
    stmts: Vec<StmtKind>,
    stmt_spans: Vec<Span>,
    stmt_lists: Vec<StmtId>,
    variables: Vec<VariableDecl>,
}

impl ProgramArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // Names and declarations

    /// Intern an identifier.
    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Resolve a name to its text.
    pub fn name_str(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Declare a program variable with its type.
    ///
    /// Declaring the same name twice records both declarations; the checker
    /// reports the duplicate.
    pub fn declare(&mut self, name: &str, ty: Type) -> Name {
        self.declare_at(name, ty, Span::DUMMY)
    }

    /// Declare a program variable with a source span.
    pub fn declare_at(&mut self, name: &str, ty: Type, span: Span) -> Name {
        let name = self.interner.intern(name);
        self.variables.push(VariableDecl { name, ty, span });
        name
    }

    /// All declarations in declaration order.
    pub fn variables(&self) -> &[VariableDecl] {
        &self.variables
    }

    /// The first declaration of `name`, if any.
    pub fn variable(&self, name: Name) -> Option<&VariableDecl> {
        self.variables.iter().find(|decl| decl.name == name)
    }

    // Raw allocation

    /// Allocate an expression node, returning its ID.
    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(kind);
        self.expr_spans.push(span);
        id
    }

    /// Allocate a statement node, returning its ID.
    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(kind);
        self.stmt_spans.push(span);
        id
    }

    /// Store a list of statements contiguously, returning its range.
    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len(), "statement list entries");
        self.stmt_lists.extend(stmts);
        let len = to_u32(self.stmt_lists.len(), "statement list entries") - start;
        StmtRange::new(start, len)
    }

    // Access

    /// Get the expression kind for a node.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()]
    }

    /// Get the source span for an expression.
    #[inline]
    pub fn expr_span(&self, id: ExprId) -> Span {
        self.expr_spans[id.index()]
    }

    /// Get the statement kind for a node.
    #[inline]
    pub fn stmt(&self, id: StmtId) -> &StmtKind {
        &self.stmts[id.index()]
    }

    /// Get the source span for a statement.
    #[inline]
    pub fn stmt_span(&self, id: StmtId) -> Span {
        self.stmt_spans[id.index()]
    }

    /// Get the statements of a sequence.
    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // Expression constructors

    pub fn constant(&mut self, literal: impl Into<Literal>) -> ExprId {
        self.alloc_expr(ExprKind::Constant(literal.into()), Span::DUMMY)
    }

    pub fn number(&mut self, n: f64) -> ExprId {
        self.constant(Literal::Number(n))
    }

    pub fn boolean(&mut self, b: bool) -> ExprId {
        self.constant(Literal::Bool(b))
    }

    pub fn direction(&mut self, d: Direction) -> ExprId {
        self.constant(Literal::Direction(d))
    }

    pub fn null(&mut self) -> ExprId {
        self.constant(Literal::Null)
    }

    pub fn var(&mut self, name: Name) -> ExprId {
        self.alloc_expr(ExprKind::Variable(name), Span::DUMMY)
    }

    pub fn self_ref(&mut self) -> ExprId {
        self.alloc_expr(ExprKind::SelfRef, Span::DUMMY)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Unary { op, operand }, Span::DUMMY)
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc_expr(ExprKind::Binary { op, left, right }, Span::DUMMY)
    }

    // Statement constructors

    pub fn skip_stmt(&mut self) -> StmtId {
        self.alloc_stmt(StmtKind::Skip, Span::DUMMY)
    }

    pub fn assign_stmt(&mut self, target: Name, value: ExprId) -> StmtId {
        self.alloc_stmt(StmtKind::Assign { target, value }, Span::DUMMY)
    }

    pub fn print_stmt(&mut self, value: ExprId) -> StmtId {
        self.alloc_stmt(StmtKind::Print(value), Span::DUMMY)
    }

    pub fn action_stmt(&mut self, action: ActionKind) -> StmtId {
        self.alloc_stmt(StmtKind::Action(action), Span::DUMMY)
    }

    pub fn sequence_stmt(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtId {
        let range = self.alloc_stmt_list(stmts);
        self.alloc_stmt(StmtKind::Sequence(range), Span::DUMMY)
    }

    pub fn if_stmt(
        &mut self,
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> StmtId {
        self.alloc_stmt(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            Span::DUMMY,
        )
    }

    pub fn while_stmt(&mut self, cond: ExprId, body: StmtId) -> StmtId {
        self.alloc_stmt(StmtKind::While { cond, body }, Span::DUMMY)
    }

    pub fn foreach_stmt(
        &mut self,
        var: Name,
        kind: ForeachKind,
        filter: Option<ExprId>,
        sort: Option<(ExprId, SortOrder)>,
        body: StmtId,
    ) -> StmtId {
        self.alloc_stmt(
            StmtKind::Foreach {
                var,
                kind,
                filter,
                sort,
                body,
            },
            Span::DUMMY,
        )
    }

    pub fn break_stmt(&mut self) -> StmtId {
        self.alloc_stmt(StmtKind::Break, Span::DUMMY)
    }

    pub fn wait_stmt(&mut self, duration: ExprId) -> StmtId {
        self.alloc_stmt(StmtKind::Wait(duration), Span::DUMMY)
    }
}
