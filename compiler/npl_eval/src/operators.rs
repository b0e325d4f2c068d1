//! Binary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for the value-level binary operators.
//! The logical operators short-circuit and the world queries (`gettile`,
//! `ismoving`) need the world, so the interpreter handles those before
//! reaching this module; the eager versions here serve operands that are
//! already evaluated.

use npl_ir::{BinaryOp, Type};

use crate::errors::{type_mismatch, EvalError, EvalResult};
use crate::Value;

/// Evaluate a binary operation on two evaluated operands.
///
/// Division by zero follows IEEE 754: `x / 0` is an infinity (or NaN for
/// `0 / 0`) rather than an error.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (op, left, right) {
        // Equality is defined across the whole union; different tags are unequal.
        (BinaryOp::Eq, a, b) => Ok(Value::Boolean(a == b)),
        (BinaryOp::NotEq, a, b) => Ok(Value::Boolean(a != b)),

        // Logical
        (BinaryOp::And, a, b) => {
            let (a, b) = (a.as_bool()?, b.as_bool()?);
            Ok(Value::Boolean(a && b))
        }
        (BinaryOp::Or, a, b) => {
            let (a, b) = (a.as_bool()?, b.as_bool()?);
            Ok(Value::Boolean(a || b))
        }

        // Arithmetic
        (BinaryOp::Add, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (BinaryOp::Sub, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (BinaryOp::Mul, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
        (BinaryOp::Div, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),

        // Comparison
        (BinaryOp::Lt, Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(a < b)),
        (BinaryOp::LtEq, Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(a <= b)),
        (BinaryOp::Gt, Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(a > b)),
        (BinaryOp::GtEq, Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(a >= b)),

        (BinaryOp::GetTile | BinaryOp::IsMoving, _, _) => Err(world_query_without_world(op)),

        // Numeric operator with a non-number operand
        (_, Value::Number(_), other) | (_, other, _) => {
            Err(invalid_operand(op, Type::Double, other.type_of()))
        }
    }
}

#[cold]
fn invalid_operand(op: BinaryOp, expected: Type, found: Type) -> EvalError {
    type_mismatch(
        format_args!("{expected} operand for `{}`", op.as_symbol()),
        found,
    )
}

#[cold]
fn world_query_without_world(op: BinaryOp) -> EvalError {
    type_mismatch(
        format_args!("a world to evaluate `{}`", op.as_symbol()),
        "plain values",
    )
}
