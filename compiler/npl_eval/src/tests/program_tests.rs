//! Tests for the program lifecycle.

use npl_diagnostic::ErrorCode;
use npl_ir::{ActionKind, BinaryOp, Direction, ProgramArena, StmtId, Type, UnaryOp};
use npl_world::{EntityId, EntityKind, GridWorld, MovementIntent, Rect, WorldView};
use pretty_assertions::assert_eq;

use crate::errors::EvalErrorKind;
use crate::{
    buffer_handler, AdvanceReport, ExecConfig, Program, ProgramBuilder, ProgramError,
    ProgramStatus, SharedPrintHandler, Value,
};

fn world_with_mazub() -> (GridWorld, EntityId) {
    let mut world = GridWorld::new(8, 4, 10.0);
    let mazub = world.spawn(EntityKind::Mazub, Rect::new(10.0, 10.0, 5.0, 8.0), 100.0);
    (world, mazub)
}

fn build(arena: ProgramArena, root: StmtId) -> (Program, SharedPrintHandler) {
    let output = buffer_handler();
    let program = ProgramBuilder::new(arena, root)
        .print_handler(output.clone())
        .seed(11)
        .build();
    (program, output)
}

fn intents() -> Vec<(EntityId, MovementIntent)> {
    Vec::new()
}

/// `print 1`
fn print_one() -> (ProgramArena, StmtId) {
    let mut arena = ProgramArena::new();
    let one = arena.number(1.0);
    let root = arena.print_stmt(one);
    (arena, root)
}

#[test]
fn test_ill_formed_program_cannot_bind() {
    let mut arena = ProgramArena::new();
    let root = arena.break_stmt();
    let (mut program, _) = build(arena, root);
    let (world, mazub) = world_with_mazub();

    assert!(!program.is_well_formed());
    match program.bind(mazub, &world) {
        Err(ProgramError::IllFormed(diagnostics)) => {
            assert_eq!(diagnostics[0].code, ErrorCode::E2001);
        }
        other => panic!("expected IllFormed, got {other:?}"),
    }
    assert_eq!(program.bound_entity(), None);
}

#[test]
fn test_binding_rules() {
    let (arena, root) = print_one();
    let (mut program, _) = build(arena, root);
    let (mut world, mazub) = world_with_mazub();
    let slime = world.spawn(EntityKind::Slime, Rect::new(40.0, 10.0, 5.0, 5.0), 10.0);

    assert_eq!(
        program.bind(EntityId::new(99), &world),
        Err(ProgramError::UnknownEntity(EntityId::new(99)))
    );
    assert_eq!(program.bind(mazub, &world), Ok(()));
    assert_eq!(program.bind(mazub, &world), Ok(()));
    assert_eq!(
        program.bind(slime, &world),
        Err(ProgramError::AlreadyBound { current: mazub })
    );
    assert_eq!(program.bound_entity(), Some(mazub));
}

#[test]
fn test_advance_requires_binding() {
    let (arena, root) = print_one();
    let (mut program, output) = build(arena, root);
    let (world, _) = world_with_mazub();
    let mut intents = intents();

    assert_eq!(
        program.advance(10, &world, &mut intents),
        Err(ProgramError::Unbound)
    );
    assert!(output.lines().is_empty());
}

#[test]
fn test_completed_program_restarts_on_next_advance() {
    let (arena, root) = print_one();
    let (mut program, output) = build(arena, root);
    let (world, mazub) = world_with_mazub();
    let mut intents = intents();
    program.bind(mazub, &world).ok();

    let report = program.advance(10, &world, &mut intents);
    assert_eq!(
        report,
        Ok(AdvanceReport {
            steps: 1,
            status: ProgramStatus::Completed
        })
    );
    program.advance(10, &world, &mut intents).ok();
    assert_eq!(output.lines(), vec!["1", "1"]);
}

#[test]
fn test_budget_bounds_each_advance() {
    // while (true) n := n + 1
    let mut arena = ProgramArena::new();
    let n = arena.declare("n", Type::Double);
    let cond = arena.boolean(true);
    let read = arena.var(n);
    let one = arena.number(1.0);
    let sum = arena.binary(BinaryOp::Add, read, one);
    let body = arena.assign_stmt(n, sum);
    let root = arena.while_stmt(cond, body);
    let (mut program, _) = build(arena, root);
    let (world, mazub) = world_with_mazub();
    let mut intents = intents();
    program.bind(mazub, &world).ok();

    let report = program.advance(7, &world, &mut intents);
    assert_eq!(
        report,
        Ok(AdvanceReport {
            steps: 7,
            status: ProgramStatus::Running
        })
    );
    // Condition, body, condition, ... : the 7th step was a condition.
    assert_eq!(program.variable("n"), Some(Value::Number(3.0)));

    program.advance(1, &world, &mut intents).ok();
    assert_eq!(program.variable("n"), Some(Value::Number(4.0)));
    assert_eq!(program.status(), ProgramStatus::Running);
}

#[test]
fn test_wait_spans_several_advances() {
    let mut arena = ProgramArena::new();
    let duration = arena.number(0.1);
    let wait = arena.wait_stmt(duration);
    let done = arena.number(1.0);
    let print = arena.print_stmt(done);
    let root = arena.sequence_stmt([wait, print]);
    let (mut program, output) = build(arena, root);
    let (world, mazub) = world_with_mazub();
    let mut intents = intents();
    program.bind(mazub, &world).ok();

    for _ in 0..3 {
        let report = program.advance(30, &world, &mut intents);
        assert_eq!(report.map(|r| r.status), Ok(ProgramStatus::Running));
    }
    assert!(output.lines().is_empty());
    let report = program.advance(30, &world, &mut intents);
    assert_eq!(
        report,
        Ok(AdvanceReport {
            steps: 11,
            status: ProgramStatus::Completed
        })
    );
    assert_eq!(output.lines(), vec!["1"]);
}

#[test]
fn test_runtime_error_faults_the_activation() {
    // x := sqrt(x - 1)
    let mut arena = ProgramArena::new();
    let x = arena.declare("x", Type::Double);
    let read = arena.var(x);
    let one = arena.number(1.0);
    let diff = arena.binary(BinaryOp::Sub, read, one);
    let sqrt = arena.unary(UnaryOp::Sqrt, diff);
    let root = arena.assign_stmt(x, sqrt);
    let (mut program, _) = build(arena, root);
    let (world, mazub) = world_with_mazub();
    let mut intents = intents();
    program.bind(mazub, &world).ok();

    let report = program.advance(10, &world, &mut intents);
    assert_eq!(
        report,
        Ok(AdvanceReport {
            steps: 1,
            status: ProgramStatus::Faulted
        })
    );
    assert!(matches!(
        program.last_error().map(|e| &e.kind),
        Some(EvalErrorKind::DomainError {
            operation: "sqrt",
            ..
        })
    ));
    assert_eq!(program.variable("x"), Some(Value::Number(0.0)));

    // The next advance starts over and faults again.
    let report = program.advance(10, &world, &mut intents);
    assert_eq!(report.map(|r| r.status), Ok(ProgramStatus::Faulted));
}

#[test]
fn test_variables_persist_across_activations() {
    let mut arena = ProgramArena::new();
    let n = arena.declare("n", Type::Double);
    let read = arena.var(n);
    let one = arena.number(1.0);
    let sum = arena.binary(BinaryOp::Add, read, one);
    let root = arena.assign_stmt(n, sum);
    let (mut program, _) = build(arena, root);
    let (world, mazub) = world_with_mazub();
    let mut intents = intents();
    program.bind(mazub, &world).ok();

    for _ in 0..3 {
        program.advance(5, &world, &mut intents).ok();
    }
    assert_eq!(program.variable("n"), Some(Value::Number(3.0)));
    assert_eq!(program.variable("missing"), None);
}

#[test]
fn test_actions_reach_the_world() {
    // start_run right; wait 0.002; stop_run right
    let mut arena = ProgramArena::new();
    let start = arena.action_stmt(ActionKind::StartRun(Direction::Right));
    let duration = arena.number(0.002);
    let wait = arena.wait_stmt(duration);
    let stop = arena.action_stmt(ActionKind::StopRun(Direction::Right));
    let root = arena.sequence_stmt([start, wait, stop]);
    let (mut program, _) = build(arena, root);
    let (mut world, mazub) = world_with_mazub();
    program.bind(mazub, &world).ok();

    let mut intents = intents();
    program.advance(1, &world, &mut intents).ok();
    assert_eq!(
        intents,
        vec![(mazub, MovementIntent::StartMove(Direction::Right))]
    );
    for (entity, intent) in intents.drain(..) {
        world.apply_intent(entity, intent);
    }
    assert!(world
        .entity(mazub)
        .is_some_and(|info| info.is_moving(Direction::Right)));

    program.advance(10, &world, &mut intents).ok();
    assert_eq!(
        intents,
        vec![(mazub, MovementIntent::StopMove(Direction::Right))]
    );
}

#[test]
fn test_tick_uses_the_default_budget() {
    let mut arena = ProgramArena::new();
    let duration = arena.number(1.0);
    let root = arena.wait_stmt(duration);
    let mut program = ProgramBuilder::new(arena, root)
        .config(ExecConfig::default().with_default_budget(25))
        .print_handler(buffer_handler())
        .build();
    let (world, mazub) = world_with_mazub();
    let mut intents = intents();
    program.bind(mazub, &world).ok();

    let report = program.tick(&world, &mut intents);
    assert_eq!(report.map(|r| r.steps), Ok(25));
}

#[test]
fn test_seeded_programs_are_reproducible() {
    let run = || {
        let mut arena = ProgramArena::new();
        let hundred = arena.number(100.0);
        let roll = arena.unary(UnaryOp::Random, hundred);
        let first = arena.print_stmt(roll);
        let second = arena.print_stmt(roll);
        let root = arena.sequence_stmt([first, second]);
        let (mut program, output) = build(arena, root);
        let (world, mazub) = world_with_mazub();
        program.bind(mazub, &world).ok();
        program.advance(10, &world, &mut intents()).ok();
        output.lines()
    };
    let first = run();
    assert_eq!(first.len(), 2);
    assert_eq!(first, run());
}

#[test]
fn test_self_queries_use_the_bound_entity() {
    // print gethp(self); print searchobj(down)
    let mut arena = ProgramArena::new();
    let me = arena.self_ref();
    let hp = arena.unary(UnaryOp::GetHp, me);
    let print_hp = arena.print_stmt(hp);
    let down = arena.direction(Direction::Down);
    let search = arena.unary(UnaryOp::SearchObject, down);
    let print_search = arena.print_stmt(search);
    let root = arena.sequence_stmt([print_hp, print_search]);
    let (mut program, output) = build(arena, root);

    let (mut world, mazub) = world_with_mazub();
    world.fill_row(0, npl_world::TileKind::Ground);
    program.bind(mazub, &world).ok();
    program.advance(10, &world, &mut intents()).ok();
    assert_eq!(output.lines(), vec!["100", "tile (1, 0)"]);
}
