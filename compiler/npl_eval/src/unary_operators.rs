//! Unary operator implementations for the evaluator.
//!
//! Covers the operators that depend only on their operand. `random` draws
//! from the program's RNG and the object queries read the world; both are
//! dispatched by the interpreter.

use npl_ir::UnaryOp;

use crate::errors::{domain_error, type_mismatch, EvalError, EvalResult};
use crate::Value;

/// Evaluate a pure unary operation.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Number(n), UnaryOp::Neg) => Ok(Value::Number(-n)),
        (Value::Boolean(b), UnaryOp::Not) => Ok(Value::Boolean(!b)),
        (Value::Number(n), UnaryOp::Sqrt) => {
            if n < 0.0 {
                Err(domain_error("sqrt", format!("negative argument {n}")))
            } else {
                Ok(Value::Number(n.sqrt()))
            }
        }
        (value, op) => Err(invalid_unary_op(value, op)),
    }
}

/// Draw a number uniformly from `[0, bound)`.
///
/// `bound` must be positive and finite.
pub fn random_below<R: rand::Rng + ?Sized>(rng: &mut R, bound: f64) -> EvalResult {
    if bound.is_finite() && bound > 0.0 {
        Ok(Value::Number(rng.gen_range(0.0..bound)))
    } else {
        Err(domain_error(
            "random",
            format!("bound must be positive and finite, got {bound}"),
        ))
    }
}

#[cold]
fn invalid_unary_op(value: Value, op: UnaryOp) -> EvalError {
    type_mismatch(
        format_args!("{} operand for `{}`", op.operand_type(), op.as_symbol()),
        value.type_of(),
    )
}
