//! Static expression typing.
//!
//! Every expression has a type fixed by its shape: literals carry their own,
//! variables their declaration's, operators their signature's. Inference
//! recurses bottom-up and reports the first problem in each subtree; a
//! subtree that failed yields `None` so parents don't pile on.

use npl_diagnostic::{Diagnostic, ErrorCode};
use npl_ir::{BinaryOp, ExprId, ExprKind, ProgramArena, Type, UnaryOp};
use npl_stack::ensure_sufficient_stack;

/// Infer the static type of `expr`, appending any problems to `diagnostics`.
///
/// Returns `None` when the expression (or one of its operands) is ill-typed.
pub fn infer_expr_type(
    arena: &ProgramArena,
    expr: ExprId,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Type> {
    ensure_sufficient_stack(|| infer(arena, expr, diagnostics))
}

fn infer(arena: &ProgramArena, expr: ExprId, diagnostics: &mut Vec<Diagnostic>) -> Option<Type> {
    match *arena.expr(expr) {
        ExprKind::Constant(literal) => Some(literal.ty()),
        ExprKind::SelfRef => Some(Type::Object),
        ExprKind::Variable(name) => match arena.variable(name) {
            Some(decl) => Some(decl.ty),
            None => {
                diagnostics.push(undeclared_variable(arena, expr, arena.name_str(name)));
                None
            }
        },
        ExprKind::Unary { op, operand } => {
            let operand_ty = infer_expr_type(arena, operand, diagnostics)?;
            check_unary(arena, op, operand, operand_ty, diagnostics)
        }
        ExprKind::Binary { op, left, right } => {
            // Both sides are inferred so each reports its own problems.
            let left_ty = infer_expr_type(arena, left, diagnostics);
            let right_ty = infer_expr_type(arena, right, diagnostics);
            check_binary(arena, op, (left, left_ty?), (right, right_ty?), diagnostics)
        }
    }
}

fn check_unary(
    arena: &ProgramArena,
    op: UnaryOp,
    operand: ExprId,
    operand_ty: Type,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Type> {
    let expected = op.operand_type();
    if operand_ty == expected {
        Some(op.result_type())
    } else {
        diagnostics.push(operand_mismatch(
            arena,
            op.as_symbol(),
            operand,
            expected,
            operand_ty,
        ));
        None
    }
}

fn check_binary(
    arena: &ProgramArena,
    op: BinaryOp,
    (left, left_ty): (ExprId, Type),
    (right, right_ty): (ExprId, Type),
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Type> {
    let Some((expected_left, expected_right)) = op.operand_types() else {
        // Equality is defined across every pair of types.
        return Some(op.result_type());
    };

    let mut ok = true;
    if left_ty != expected_left {
        diagnostics.push(operand_mismatch(
            arena,
            op.as_symbol(),
            left,
            expected_left,
            left_ty,
        ));
        ok = false;
    }
    if right_ty != expected_right {
        diagnostics.push(operand_mismatch(
            arena,
            op.as_symbol(),
            right,
            expected_right,
            right_ty,
        ));
        ok = false;
    }
    ok.then_some(op.result_type())
}

#[cold]
fn undeclared_variable(arena: &ProgramArena, expr: ExprId, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("use of undeclared variable `{name}`"))
        .with_label(arena.expr_span(expr), "not declared in this program")
}

#[cold]
fn operand_mismatch(
    arena: &ProgramArena,
    symbol: &str,
    operand: ExprId,
    expected: Type,
    found: Type,
) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2004)
        .with_message(format!(
            "operator `{symbol}` expects {expected}, found {found}"
        ))
        .with_label(arena.expr_span(operand), format!("this has type {found}"))
}

#[cfg(test)]
mod tests;
