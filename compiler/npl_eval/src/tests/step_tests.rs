//! Tests for the statement step protocol.

use npl_ir::{ActionKind, BinaryOp, Direction, ProgramArena, Type, UnaryOp};
use npl_world::{EntityKind, GridWorld, MovementIntent, Rect};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::Harness;
use crate::cursor::CursorState;
use crate::errors::EvalErrorKind;
use crate::{Signal, Value};

fn empty_world() -> GridWorld {
    GridWorld::new(4, 4, 10.0)
}

#[test]
fn test_step_protocol_is_monotone() {
    let mut arena = ProgramArena::new();
    let x = arena.declare("x", Type::Double);
    let one = arena.number(1.0);
    let assign = arena.assign_stmt(x, one);
    let duration = arena.number(0.003);
    let wait = arena.wait_stmt(duration);
    let read = arena.var(x);
    let print = arena.print_stmt(read);
    let root = arena.sequence_stmt([assign, wait, print]);

    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(h.run_to_end(100), 5);
    assert_eq!(h.output(), vec!["1"]);

    // Once exhausted, the root stays exhausted and refuses to step.
    for _ in 0..3 {
        assert!(!h.has_more_steps());
        let err = h.step().map_err(|e| e.kind);
        assert_eq!(err, Err(EvalErrorKind::NoMoreSteps));
    }
}

#[test]
fn test_while_false_is_done_after_one_step() {
    let mut arena = ProgramArena::new();
    let cond = arena.boolean(false);
    let body = arena.skip_stmt();
    let root = arena.while_stmt(cond, body);

    let mut h = Harness::new(arena, root, empty_world());
    assert!(h.has_more_steps());
    assert_eq!(h.step(), Ok(Signal::Continue));
    assert!(!h.has_more_steps());
}

#[test]
fn test_wait_takes_one_step_per_sub_step() {
    let mut arena = ProgramArena::new();
    let duration = arena.number(0.1);
    let root = arena.wait_stmt(duration);

    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(h.run_to_end(1_000), 100);
}

#[test]
fn test_children_without_work_are_skipped() {
    let mut arena = ProgramArena::new();
    let zero = arena.number(0.0);
    let no_wait = arena.wait_stmt(zero);
    let empty = arena.sequence_stmt([]);
    let value = arena.number(7.0);
    let print = arena.print_stmt(value);
    let root = arena.sequence_stmt([no_wait, empty, print, no_wait]);

    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(h.run_to_end(10), 1);
    assert_eq!(h.output(), vec!["7"]);
}

#[test]
fn test_statements_without_work_settle_in_one_step() {
    let mut arena = ProgramArena::new();
    let zero = arena.number(0.0);
    let no_wait = arena.wait_stmt(zero);
    let empty = arena.sequence_stmt([]);

    for root in [no_wait, empty] {
        let mut h = Harness::new(arena.clone(), root, empty_world());
        assert!(h.has_more_steps());
        assert_eq!(h.step(), Ok(Signal::Continue));
        assert!(matches!(h.state.cursors.state(root), CursorState::Done));
        assert!(!h.has_more_steps());
        let err = h.step().map_err(|e| e.kind);
        assert_eq!(err, Err(EvalErrorKind::NoMoreSteps));
    }
}

#[test]
fn test_if_evaluates_its_condition_once() {
    // if (x == 0) { x := 5; print x } else { print 99 }
    let mut arena = ProgramArena::new();
    let x = arena.declare("x", Type::Double);
    let read = arena.var(x);
    let zero = arena.number(0.0);
    let cond = arena.binary(BinaryOp::Eq, read, zero);
    let five = arena.number(5.0);
    let assign = arena.assign_stmt(x, five);
    let read_again = arena.var(x);
    let print = arena.print_stmt(read_again);
    let then_branch = arena.sequence_stmt([assign, print]);
    let ninety_nine = arena.number(99.0);
    let else_branch = arena.print_stmt(ninety_nine);
    let root = arena.if_stmt(cond, then_branch, Some(else_branch));

    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(h.run_to_end(10), 3);
    assert_eq!(h.output(), vec!["5"]);
}

#[test]
fn test_if_without_else_finishes_on_false() {
    let mut arena = ProgramArena::new();
    let cond = arena.boolean(false);
    let value = arena.number(1.0);
    let print = arena.print_stmt(value);
    let root = arena.if_stmt(cond, print, None);

    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(h.run_to_end(10), 1);
    assert!(h.output().is_empty());
}

/// `while (true) { x := x + 1; if (x >= 3) break }`
fn counting_loop(arena: &mut ProgramArena) -> npl_ir::StmtId {
    let x = arena.declare("x", Type::Double);
    let cond = arena.boolean(true);
    let read = arena.var(x);
    let one = arena.number(1.0);
    let sum = arena.binary(BinaryOp::Add, read, one);
    let increment = arena.assign_stmt(x, sum);
    let read_again = arena.var(x);
    let three = arena.number(3.0);
    let done = arena.binary(BinaryOp::GtEq, read_again, three);
    let brk = arena.break_stmt();
    let check = arena.if_stmt(done, brk, None);
    let body = arena.sequence_stmt([increment, check]);
    arena.while_stmt(cond, body)
}

#[test]
fn test_break_ends_the_enclosing_loop() {
    let mut arena = ProgramArena::new();
    let root = counting_loop(&mut arena);

    let mut h = Harness::new(arena, root, empty_world());
    // Two full iterations of three steps, then condition, increment, test
    // and the break itself.
    assert_eq!(h.run_to_end(100), 10);
    assert_eq!(h.variable("x"), Some(Value::Number(3.0)));
}

#[test]
fn test_break_only_leaves_the_innermost_loop() {
    // while (i < 2) { i := i + 1; while (true) break; print i }
    let mut arena = ProgramArena::new();
    let i = arena.declare("i", Type::Double);
    let read = arena.var(i);
    let two = arena.number(2.0);
    let outer_cond = arena.binary(BinaryOp::Lt, read, two);
    let read = arena.var(i);
    let one = arena.number(1.0);
    let sum = arena.binary(BinaryOp::Add, read, one);
    let increment = arena.assign_stmt(i, sum);
    let forever = arena.boolean(true);
    let brk = arena.break_stmt();
    let inner = arena.while_stmt(forever, brk);
    let read = arena.var(i);
    let print = arena.print_stmt(read);
    let body = arena.sequence_stmt([increment, inner, print]);
    let root = arena.while_stmt(outer_cond, body);

    let mut h = Harness::new(arena, root, empty_world());
    h.run_to_end(100);
    assert_eq!(h.output(), vec!["1", "2"]);
}

#[test]
fn test_break_at_the_root_is_returned_to_the_caller() {
    let mut arena = ProgramArena::new();
    let brk = arena.break_stmt();
    let root = arena.sequence_stmt([brk]);

    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(h.step(), Ok(Signal::Break));
    assert!(!h.has_more_steps());
}

#[test]
fn test_infinite_loop_keeps_running() {
    let mut arena = ProgramArena::new();
    let cond = arena.boolean(true);
    let body = arena.sequence_stmt([]);
    let root = arena.while_stmt(cond, body);

    let mut h = Harness::new(arena, root, empty_world());
    for _ in 0..1_000 {
        assert_eq!(h.step(), Ok(Signal::Continue));
    }
    assert!(h.has_more_steps());
}

#[test]
fn test_execution_resumes_across_interpreters() {
    let mut arena = ProgramArena::new();
    let first = arena.number(1.0);
    let print_first = arena.print_stmt(first);
    let duration = arena.number(0.002);
    let wait = arena.wait_stmt(duration);
    let second = arena.number(2.0);
    let print_second = arena.print_stmt(second);
    let root = arena.sequence_stmt([print_first, wait, print_second]);

    let mut h = Harness::new(arena, root, empty_world());
    h.step().ok();
    h.step().ok();
    assert_eq!(h.output(), vec!["1"]);
    assert!(matches!(h.state.cursors.state(root), CursorState::Running(_)));

    // Each `with` builds a new interpreter; only the state carries over.
    assert_eq!(h.run_to_end(10), 2);
    assert_eq!(h.output(), vec!["1", "2"]);
}

#[test]
fn test_restart_allows_a_fresh_activation() {
    let mut arena = ProgramArena::new();
    let value = arena.number(3.0);
    let root = arena.print_stmt(value);

    let mut h = Harness::new(arena, root, empty_world());
    h.run_to_end(10);
    assert!(!h.has_more_steps());

    h.with(|interp| interp.restart(root));
    assert!(h.has_more_steps());
    h.run_to_end(10);
    assert_eq!(h.output(), vec!["3", "3"]);
}

#[test]
fn test_runtime_errors() {
    // x := true, bypassing the checker.
    let mut arena = ProgramArena::new();
    let x = arena.declare("x", Type::Double);
    let value = arena.boolean(true);
    let root = arena.assign_stmt(x, value);
    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(
        h.step().map_err(|e| e.kind),
        Err(EvalErrorKind::TypeMismatch {
            expected: "double".to_string(),
            found: "bool".to_string(),
        })
    );

    let mut arena = ProgramArena::new();
    let ghost = arena.intern("ghost");
    let read = arena.var(ghost);
    let root = arena.print_stmt(read);
    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(
        h.step().map_err(|e| e.kind),
        Err(EvalErrorKind::UnknownVariable {
            name: "ghost".to_string()
        })
    );
}

#[test]
fn test_short_circuit_skips_failing_operand() {
    // false && sqrt(-1) > 0 never evaluates the square root.
    let mut arena = ProgramArena::new();
    let lhs = arena.boolean(false);
    let minus_one = arena.number(-1.0);
    let root_expr = arena.unary(UnaryOp::Sqrt, minus_one);
    let zero = arena.number(0.0);
    let rhs = arena.binary(BinaryOp::Gt, root_expr, zero);
    let cond = arena.binary(BinaryOp::And, lhs, rhs);
    let root = arena.print_stmt(cond);

    let mut h = Harness::new(arena, root, empty_world());
    assert_eq!(h.step(), Ok(Signal::Continue));
    assert_eq!(h.output(), vec!["false"]);
}

#[test]
fn test_self_and_actions_need_an_entity() {
    let mut arena = ProgramArena::new();
    let action = arena.action_stmt(ActionKind::StartRun(Direction::Left));
    let me = arena.self_ref();
    let print = arena.print_stmt(me);
    let root = arena.sequence_stmt([print, action]);

    let mut world = empty_world();
    let id = world.spawn(EntityKind::Buzam, Rect::new(0.0, 0.0, 5.0, 5.0), 100.0);

    let mut unbound = Harness::new(arena.clone(), root, world.clone());
    assert_eq!(unbound.step().map_err(|e| e.kind), Err(EvalErrorKind::Unbound));

    let mut h = Harness::new(arena, root, world).bound_to(id);
    assert_eq!(h.run_to_end(10), 2);
    assert_eq!(h.output(), vec!["entity #0"]);
    assert_eq!(h.intents, vec![(id, MovementIntent::StartMove(Direction::Left))]);
}

#[test]
fn test_error_spans_point_at_the_failing_expression() {
    let mut arena = ProgramArena::new();
    let span = npl_ir::Span::new(10, 18);
    let minus_one = arena.number(-1.0);
    let sqrt = arena.alloc_expr(
        npl_ir::ExprKind::Unary {
            op: UnaryOp::Sqrt,
            operand: minus_one,
        },
        span,
    );
    let root = arena.print_stmt(sqrt);

    let mut h = Harness::new(arena, root, empty_world());
    let err = h.step().err();
    assert_eq!(err.and_then(|e| e.span), Some(span));
}

proptest! {
    #[test]
    fn sequence_of_prints_takes_one_step_each(count in 0u32..40) {
        let mut arena = ProgramArena::new();
        let prints: Vec<_> = (0..count)
            .map(|i| {
                let value = arena.number(f64::from(i));
                arena.print_stmt(value)
            })
            .collect();
        let root = arena.sequence_stmt(prints);

        let mut h = Harness::new(arena, root, empty_world());
        prop_assert_eq!(h.run_to_end(100), count as usize);
        prop_assert_eq!(h.output().len(), count as usize);
    }

    #[test]
    fn wait_of_whole_milliseconds_takes_that_many_steps(millis in 0u32..2_000) {
        let mut arena = ProgramArena::new();
        let duration = arena.number(f64::from(millis) / 1_000.0);
        let root = arena.wait_stmt(duration);

        let mut h = Harness::new(arena, root, empty_world());
        prop_assert_eq!(h.run_to_end(10_000), millis as usize);
    }
}
