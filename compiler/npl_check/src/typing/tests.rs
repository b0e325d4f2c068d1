use npl_diagnostic::ErrorCode;
use npl_ir::{BinaryOp, Direction, EntityKind, ProgramArena, Type, UnaryOp};
use pretty_assertions::assert_eq;

use super::infer_expr_type;

fn infer(arena: &ProgramArena, expr: npl_ir::ExprId) -> (Option<Type>, Vec<ErrorCode>) {
    let mut diagnostics = Vec::new();
    let ty = infer_expr_type(arena, expr, &mut diagnostics);
    (ty, diagnostics.into_iter().map(|d| d.code).collect())
}

#[test]
fn test_literal_types() {
    let mut arena = ProgramArena::new();
    let n = arena.number(3.0);
    let b = arena.boolean(false);
    let d = arena.direction(Direction::Left);
    let null = arena.null();
    let this = arena.self_ref();

    assert_eq!(infer(&arena, n).0, Some(Type::Double));
    assert_eq!(infer(&arena, b).0, Some(Type::Bool));
    assert_eq!(infer(&arena, d).0, Some(Type::Direction));
    assert_eq!(infer(&arena, null).0, Some(Type::Object));
    assert_eq!(infer(&arena, this).0, Some(Type::Object));
}

#[test]
fn test_query_signatures() {
    let mut arena = ProgramArena::new();
    let x = arena.number(10.0);
    let y = arena.number(20.0);
    let tile = arena.binary(BinaryOp::GetTile, x, y);
    let passable = arena.unary(UnaryOp::IsPassable, tile);
    let dir = arena.direction(Direction::Right);
    let found = arena.unary(UnaryOp::SearchObject, dir);
    let is_shark = arena.unary(UnaryOp::IsKind(EntityKind::Shark), found);

    assert_eq!(infer(&arena, tile), (Some(Type::Object), vec![]));
    assert_eq!(infer(&arena, passable), (Some(Type::Bool), vec![]));
    assert_eq!(infer(&arena, is_shark), (Some(Type::Bool), vec![]));
}

#[test]
fn test_is_moving_takes_object_and_direction() {
    let mut arena = ProgramArena::new();
    let this = arena.self_ref();
    let dir = arena.direction(Direction::Up);
    let ok = arena.binary(BinaryOp::IsMoving, this, dir);
    let this = arena.self_ref();
    let num = arena.number(1.0);
    let bad = arena.binary(BinaryOp::IsMoving, this, num);

    assert_eq!(infer(&arena, ok), (Some(Type::Bool), vec![]));
    assert_eq!(infer(&arena, bad), (None, vec![ErrorCode::E2004]));
}

#[test]
fn test_equality_accepts_mixed_types() {
    let mut arena = ProgramArena::new();
    let n = arena.number(1.0);
    let d = arena.direction(Direction::None);
    let eq = arena.binary(BinaryOp::Eq, n, d);

    assert_eq!(infer(&arena, eq), (Some(Type::Bool), vec![]));
}

#[test]
fn test_both_operands_report() {
    let mut arena = ProgramArena::new();
    let a = arena.boolean(true);
    let b = arena.direction(Direction::Down);
    let sum = arena.binary(BinaryOp::Mul, a, b);

    assert_eq!(
        infer(&arena, sum),
        (None, vec![ErrorCode::E2004, ErrorCode::E2004])
    );
}

#[test]
fn test_undeclared_variable() {
    let mut arena = ProgramArena::new();
    let ghost = arena.intern("ghost");
    let read = arena.var(ghost);
    let not = arena.unary(UnaryOp::Not, read);

    assert_eq!(infer(&arena, not), (None, vec![ErrorCode::E2003]));
}

#[test]
fn test_logical_operators_need_bools() {
    let mut arena = ProgramArena::new();
    let t = arena.boolean(true);
    let one = arena.number(1.0);
    let and = arena.binary(BinaryOp::And, t, one);

    assert_eq!(infer(&arena, and), (None, vec![ErrorCode::E2004]));
}
