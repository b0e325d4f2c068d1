//! Lowering scenario program trees into a `ProgramArena`.
//!
//! Lowering only resolves spellings (operators, actions, kinds). Variable
//! names are interned as written; undeclared or mistyped uses are left for
//! the checker to report.

use npl_ir::{
    ActionKind, BinaryOp, ExprId, ForeachKind, ProgramArena, SortOrder, StmtId, UnaryOp,
};

use super::{
    ExprNode, ExprSpec, ForeachKindSpec, OrderSpec, OtherKind, ProgramSpec, ScenarioError,
    StmtSpec,
};

/// A program tree ready for [`npl_eval::ProgramBuilder`].
#[derive(Debug)]
pub struct LoweredProgram {
    pub arena: ProgramArena,
    pub root: StmtId,
}

/// Lower one scenario program.
pub fn lower_program(spec: &ProgramSpec) -> Result<LoweredProgram, ScenarioError> {
    let mut arena = ProgramArena::new();
    for variable in &spec.variables {
        arena.declare(&variable.name, variable.ty);
    }
    let mut lowerer = Lowerer { arena: &mut arena };
    let root = lowerer.stmt(&spec.body)?;
    Ok(LoweredProgram { arena, root })
}

struct Lowerer<'a> {
    arena: &'a mut ProgramArena,
}

impl Lowerer<'_> {
    fn stmt(&mut self, spec: &StmtSpec) -> Result<StmtId, ScenarioError> {
        let id = match spec {
            StmtSpec::Skip => self.arena.skip_stmt(),
            StmtSpec::Break => self.arena.break_stmt(),
            StmtSpec::Assign { var, value } => {
                let value = self.expr(value)?;
                let target = self.arena.intern(var);
                self.arena.assign_stmt(target, value)
            }
            StmtSpec::Print { value } => {
                let value = self.expr(value)?;
                self.arena.print_stmt(value)
            }
            StmtSpec::Action { action, direction } => {
                let action = action_kind(action, *direction)?;
                self.arena.action_stmt(action)
            }
            StmtSpec::Sequence(stmts) => {
                let stmts = stmts
                    .iter()
                    .map(|stmt| self.stmt(stmt))
                    .collect::<Result<Vec<_>, _>>()?;
                self.arena.sequence_stmt(stmts)
            }
            StmtSpec::If {
                cond,
                then,
                otherwise,
            } => {
                let cond = self.expr(cond)?;
                let then = self.stmt(then)?;
                let otherwise = otherwise.as_deref().map(|s| self.stmt(s)).transpose()?;
                self.arena.if_stmt(cond, then, otherwise)
            }
            StmtSpec::While { cond, body } => {
                let cond = self.expr(cond)?;
                let body = self.stmt(body)?;
                self.arena.while_stmt(cond, body)
            }
            StmtSpec::Foreach {
                var,
                kind,
                filter,
                sort,
                body,
            } => {
                let kind = match kind {
                    ForeachKindSpec::Entity(kind) => ForeachKind::Entity(*kind),
                    ForeachKindSpec::Other(OtherKind::Terrain) => ForeachKind::Terrain,
                    ForeachKindSpec::Other(OtherKind::Any) => ForeachKind::Any,
                };
                let var = self.arena.intern(var);
                let filter = filter.as_ref().map(|f| self.expr(f)).transpose()?;
                let sort = match sort {
                    Some(sort) => {
                        let order = match sort.order {
                            OrderSpec::Ascending => SortOrder::Ascending,
                            OrderSpec::Descending => SortOrder::Descending,
                        };
                        Some((self.expr(&sort.key)?, order))
                    }
                    None => None,
                };
                let body = self.stmt(body)?;
                self.arena.foreach_stmt(var, kind, filter, sort, body)
            }
            StmtSpec::Wait { duration } => {
                let duration = self.expr(duration)?;
                self.arena.wait_stmt(duration)
            }
        };
        Ok(id)
    }

    fn expr(&mut self, spec: &ExprSpec) -> Result<ExprId, ScenarioError> {
        let node = match spec {
            ExprSpec::Number(n) => return Ok(self.arena.number(*n)),
            ExprSpec::Boolean(b) => return Ok(self.arena.boolean(*b)),
            ExprSpec::Node(node) => node,
        };
        let id = match &**node {
            ExprNode::Null => self.arena.null(),
            ExprNode::SelfRef => self.arena.self_ref(),
            ExprNode::Direction(direction) => self.arena.direction(*direction),
            ExprNode::Var(name) => {
                let name = self.arena.intern(name);
                self.arena.var(name)
            }
            ExprNode::Unary { op, operand } => {
                let op = UnaryOp::from_symbol(op).ok_or_else(|| unknown_operator(op))?;
                let operand = self.expr(operand)?;
                self.arena.unary(op, operand)
            }
            ExprNode::Binary { op, left, right } => {
                let op = BinaryOp::from_symbol(op).ok_or_else(|| unknown_operator(op))?;
                let left = self.expr(left)?;
                let right = self.expr(right)?;
                self.arena.binary(op, left, right)
            }
        };
        Ok(id)
    }
}

#[cold]
fn unknown_operator(symbol: &str) -> ScenarioError {
    ScenarioError::UnknownOperator {
        symbol: symbol.to_string(),
    }
}

fn action_kind(
    action: &str,
    direction: Option<npl_ir::Direction>,
) -> Result<ActionKind, ScenarioError> {
    let needs_direction = || ScenarioError::MissingDirection {
        action: action.to_string(),
    };
    let kind = match action {
        "start_run" => ActionKind::StartRun(direction.ok_or_else(needs_direction)?),
        "stop_run" => ActionKind::StopRun(direction.ok_or_else(needs_direction)?),
        "start_jump" => ActionKind::StartJump,
        "stop_jump" => ActionKind::StopJump,
        "start_duck" => ActionKind::StartDuck,
        "stop_duck" => ActionKind::StopDuck,
        _ => {
            return Err(ScenarioError::UnknownAction {
                action: action.to_string(),
            })
        }
    };
    Ok(kind)
}
