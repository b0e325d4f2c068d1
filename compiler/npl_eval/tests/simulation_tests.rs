//! End-to-end tests: programs driven tick by tick against a world.
//!
//! A tiny simulation loop stands in for the game: each tick every program
//! gets a step budget, the submitted intents are applied, and moving
//! entities slide a few pixels.

#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use npl_eval::{buffer_handler, Program, ProgramBuilder, ProgramStatus, SharedPrintHandler};
use npl_ir::{
    ActionKind, BinaryOp, Direction, ForeachKind, ProgramArena, SortOrder, StmtId, Type, UnaryOp,
};
use npl_world::{EntityId, EntityKind, GridWorld, MovementIntent, Rect, TileKind, WorldView};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const SPEED: f64 = 5.0;

fn build(arena: ProgramArena, root: StmtId) -> (Program, SharedPrintHandler) {
    let output = buffer_handler();
    let program = ProgramBuilder::new(arena, root)
        .print_handler(output.clone())
        .seed(3)
        .build();
    (program, output)
}

/// Advance the program, apply its intents and move entities.
fn tick(program: &mut Program, world: &mut GridWorld, budget: u32) -> ProgramStatus {
    let mut intents: Vec<(EntityId, MovementIntent)> = Vec::new();
    let report = program.advance(budget, &*world, &mut intents).unwrap();
    for (entity, intent) in intents {
        world.apply_intent(entity, intent);
    }
    for id in world.entity_ids() {
        if let Some(info) = world.entity_mut(id) {
            match info.horizontal {
                Direction::Right => info.bounds.x += SPEED,
                Direction::Left => info.bounds.x -= SPEED,
                _ => {}
            }
        }
    }
    report.status
}

/// ```text
/// while (true) {
///     if (getx(self) < 50) start_run right
///     else { stop_run right; break }
///     wait 0.005
/// }
/// print getx(self)
/// ```
fn walk_to_fifty() -> (ProgramArena, StmtId) {
    let mut arena = ProgramArena::new();
    let forever = arena.boolean(true);
    let me = arena.self_ref();
    let x = arena.unary(UnaryOp::GetX, me);
    let fifty = arena.number(50.0);
    let short = arena.binary(BinaryOp::Lt, x, fifty);
    let start = arena.action_stmt(ActionKind::StartRun(Direction::Right));
    let stop = arena.action_stmt(ActionKind::StopRun(Direction::Right));
    let brk = arena.break_stmt();
    let arrive = arena.sequence_stmt([stop, brk]);
    let decide = arena.if_stmt(short, start, Some(arrive));
    let pause = arena.number(0.005);
    let wait = arena.wait_stmt(pause);
    let body = arena.sequence_stmt([decide, wait]);
    let walk = arena.while_stmt(forever, body);
    let me = arena.self_ref();
    let x = arena.unary(UnaryOp::GetX, me);
    let report = arena.print_stmt(x);
    let root = arena.sequence_stmt([walk, report]);
    (arena, root)
}

#[test]
fn entity_walks_until_it_arrives() {
    let (arena, root) = walk_to_fifty();
    let (mut program, output) = build(arena, root);
    assert!(program.is_well_formed(), "{:?}", program.diagnostics());

    let mut world = GridWorld::new(20, 5, 10.0);
    world.fill_row(0, TileKind::Ground);
    let buzam = world.spawn(EntityKind::Buzam, Rect::new(10.0, 10.0, 6.0, 10.0), 100.0);
    program.bind(buzam, &world).unwrap();

    let mut status = ProgramStatus::Ready;
    for _ in 0..100 {
        status = tick(&mut program, &mut world, 10);
        if status == ProgramStatus::Completed {
            break;
        }
    }
    assert_eq!(status, ProgramStatus::Completed);

    let info = world.entity(buzam).unwrap();
    assert!(info.bounds.x >= 50.0);
    assert!(info.is_moving(Direction::None));
    let printed: f64 = output.lines()[0].parse().unwrap();
    assert!((printed - info.bounds.x).abs() < f64::EPSILON);
}

/// `foreach (slime, s) where (!isdead(s)) sort gethp(s) descending print gethp(s)`
fn survivors_by_health() -> (ProgramArena, StmtId) {
    let mut arena = ProgramArena::new();
    let s = arena.declare("s", Type::Object);
    let read = arena.var(s);
    let dead = arena.unary(UnaryOp::IsDead, read);
    let alive = arena.unary(UnaryOp::Not, dead);
    let read = arena.var(s);
    let key = arena.unary(UnaryOp::GetHp, read);
    let read = arena.var(s);
    let hp = arena.unary(UnaryOp::GetHp, read);
    let body = arena.print_stmt(hp);
    let root = arena.foreach_stmt(
        s,
        ForeachKind::Entity(EntityKind::Slime),
        Some(alive),
        Some((key, SortOrder::Descending)),
        body,
    );
    (arena, root)
}

#[test]
fn foreach_reports_living_slimes_by_health() {
    let (arena, root) = survivors_by_health();
    let (mut program, output) = build(arena, root);

    let mut world = GridWorld::new(10, 3, 10.0);
    let plant = world.spawn(EntityKind::Plant, Rect::new(0.0, 10.0, 5.0, 5.0), 1.0);
    for (x, hp) in [(10.0, 40.0), (20.0, 70.0), (30.0, 55.0)] {
        world.spawn(EntityKind::Slime, Rect::new(x, 10.0, 5.0, 5.0), hp);
    }
    let doomed = world.spawn(EntityKind::Slime, Rect::new(40.0, 10.0, 5.0, 5.0), 99.0);
    world.kill(doomed);
    program.bind(plant, &world).unwrap();

    assert_eq!(tick(&mut program, &mut world, 100), ProgramStatus::Completed);
    assert_eq!(output.lines(), vec!["70", "55", "40"]);
}

#[test]
fn ill_formed_programs_never_run() {
    // foreach (any, o) start_jump
    let mut arena = ProgramArena::new();
    let o = arena.declare("o", Type::Object);
    let jump = arena.action_stmt(ActionKind::StartJump);
    let root = arena.foreach_stmt(o, ForeachKind::Any, None, None, jump);
    let (mut program, _) = build(arena, root);

    let mut world = GridWorld::new(2, 2, 10.0);
    let mazub = world.spawn(EntityKind::Mazub, Rect::new(0.0, 10.0, 5.0, 5.0), 100.0);
    assert!(!program.is_well_formed());
    assert!(program.bind(mazub, &world).is_err());
    assert!(program.advance(10, &world, &mut Vec::<(EntityId, MovementIntent)>::new()).is_err());
}

/// `while (n < 5) { n := n + 1; print n; wait 0.003 }`
fn counter() -> (ProgramArena, StmtId) {
    let mut arena = ProgramArena::new();
    let n = arena.declare("n", Type::Double);
    let read = arena.var(n);
    let five = arena.number(5.0);
    let cond = arena.binary(BinaryOp::Lt, read, five);
    let read = arena.var(n);
    let one = arena.number(1.0);
    let sum = arena.binary(BinaryOp::Add, read, one);
    let increment = arena.assign_stmt(n, sum);
    let read = arena.var(n);
    let print = arena.print_stmt(read);
    let pause = arena.number(0.003);
    let wait = arena.wait_stmt(pause);
    let body = arena.sequence_stmt([increment, print, wait]);
    let root = arena.while_stmt(cond, body);
    (arena, root)
}

/// Total steps to complete one activation of `counter`.
const COUNTER_STEPS: u32 = 5 * (1 + 1 + 1 + 3) + 1;

proptest! {
    #[test]
    fn splitting_the_budget_does_not_change_the_run(
        budgets in prop::collection::vec(1u32..15, 1..60),
    ) {
        let (arena, root) = counter();
        let (mut program, output) = build(arena, root);
        let mut world = GridWorld::new(2, 2, 10.0);
        let me = world.spawn(EntityKind::Shark, Rect::new(0.0, 10.0, 5.0, 5.0), 10.0);
        program.bind(me, &world).unwrap();

        let mut intents: Vec<(EntityId, MovementIntent)> = Vec::new();
        let mut total = 0;
        for budget in budgets {
            let report = program.advance(budget, &world, &mut intents).unwrap();
            total += report.steps;
            if report.status == ProgramStatus::Completed {
                break;
            }
        }

        let lines = output.lines();
        if total >= COUNTER_STEPS {
            prop_assert_eq!(total, COUNTER_STEPS);
            prop_assert_eq!(lines, vec!["1", "2", "3", "4", "5"]);
        } else {
            let expected: Vec<String> = (1..=lines.len()).map(|i| i.to_string()).collect();
            prop_assert_eq!(lines, expected);
        }
    }
}
