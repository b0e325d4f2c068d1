//! Expression evaluation.

use npl_ir::{BinaryOp, Direction, ExprId, ExprKind, UnaryOp};
use npl_stack::ensure_sufficient_stack;
use npl_world::ObjectRef;

use super::Interpreter;
use crate::errors::{unbound, unknown_variable, EvalError, EvalResult};
use crate::queries::{get_tile, is_moving, object_query, search_object};
use crate::{evaluate_binary, evaluate_unary, random_below, Value};

impl Interpreter<'_> {
    /// Evaluate an expression to a value.
    ///
    /// Errors carry the span of the innermost expression that failed.
    pub fn eval_expr(&mut self, expr: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|err| err.with_span(self.arena.expr_span(expr)))
    }

    fn eval_expr_inner(&mut self, expr: ExprId) -> EvalResult {
        match *self.arena.expr(expr) {
            ExprKind::Constant(literal) => Ok(Value::from(literal)),
            ExprKind::Variable(name) => self
                .state
                .env
                .get(name)
                .ok_or_else(|| unknown_variable(self.arena.name_str(name))),
            ExprKind::SelfRef => self.entity.map(Value::from).ok_or_else(unbound),
            ExprKind::Unary { op, operand } => self.eval_unary(op, operand),
            ExprKind::Binary { op, left, right } => self.eval_binary(op, left, right),
        }
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: ExprId) -> EvalResult {
        match op {
            UnaryOp::Neg | UnaryOp::Not | UnaryOp::Sqrt => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(value, op)
            }
            UnaryOp::Random => {
                let bound = self.eval_number(operand)?;
                random_below(&mut self.state.rng, bound)
            }
            UnaryOp::SearchObject => {
                let direction = self.eval_direction(operand)?;
                let origin = self.entity.ok_or_else(unbound)?;
                search_object(self.world, origin, direction)
            }
            UnaryOp::GetX
            | UnaryOp::GetY
            | UnaryOp::GetWidth
            | UnaryOp::GetHeight
            | UnaryOp::GetHp
            | UnaryOp::IsDead
            | UnaryOp::IsJumping
            | UnaryOp::IsDucking
            | UnaryOp::IsKind(_)
            | UnaryOp::IsTerrain
            | UnaryOp::IsPassable
            | UnaryOp::IsAir
            | UnaryOp::IsWater
            | UnaryOp::IsMagma => {
                let object = self.eval_object(operand)?;
                object_query(self.world, op, object)
            }
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        match op {
            // Short-circuit: the right operand is not evaluated when the
            // left one decides the result.
            BinaryOp::And => {
                if !self.eval_bool(left)? {
                    return Ok(Value::Boolean(false));
                }
                self.eval_bool(right).map(Value::Boolean)
            }
            BinaryOp::Or => {
                if self.eval_bool(left)? {
                    return Ok(Value::Boolean(true));
                }
                self.eval_bool(right).map(Value::Boolean)
            }
            BinaryOp::GetTile => {
                let x = self.eval_number(left)?;
                let y = self.eval_number(right)?;
                get_tile(self.world, x, y)
            }
            BinaryOp::IsMoving => {
                let object = self.eval_object(left)?;
                let direction = self.eval_direction(right)?;
                is_moving(self.world, object, direction)
            }
            _ => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, op)
            }
        }
    }

    // Typed evaluation. A wrong tag is reported at the operand's span.

    pub(crate) fn eval_bool(&mut self, expr: ExprId) -> Result<bool, EvalError> {
        self.eval_expr(expr)?
            .as_bool()
            .map_err(|err| err.with_span(self.arena.expr_span(expr)))
    }

    pub(crate) fn eval_number(&mut self, expr: ExprId) -> Result<f64, EvalError> {
        self.eval_expr(expr)?
            .as_number()
            .map_err(|err| err.with_span(self.arena.expr_span(expr)))
    }

    fn eval_direction(&mut self, expr: ExprId) -> Result<Direction, EvalError> {
        self.eval_expr(expr)?
            .as_direction()
            .map_err(|err| err.with_span(self.arena.expr_span(expr)))
    }

    fn eval_object(&mut self, expr: ExprId) -> Result<ObjectRef, EvalError> {
        self.eval_expr(expr)?
            .as_object()
            .map_err(|err| err.with_span(self.arena.expr_span(expr)))
    }
}
