//! World queries.
//!
//! Read-through operators over the [`WorldView`]. Getters and capability
//! checks fail with a type mismatch when the object cannot answer them
//! (null, stale handle, wrong kind of entity); `is<Kind>`/`isterrain`/
//! `isair`-style tag tests answer `false` instead.

use npl_ir::{Direction, EntityKind, ForeachKind, UnaryOp};
use npl_world::{EntityId, EntityInfo, ObjectRef, Rect, TileKind, WorldView};

use crate::errors::{domain_error, out_of_world_bounds, type_mismatch, EvalError, EvalResult};
use crate::Value;

/// `gettile(x, y)`: the tile containing pixel `(x, y)`.
///
/// Coordinates are floored to tiles and clamped onto the grid; only
/// non-finite coordinates (or an empty grid) fail.
pub fn get_tile(world: &dyn WorldView, x: f64, y: f64) -> EvalResult {
    world
        .clamped_tile_at(x, y)
        .map(Value::from)
        .ok_or_else(|| out_of_world_bounds(x, y))
}

/// Single-object queries: getters, capability checks and tag tests.
pub fn object_query(world: &dyn WorldView, op: UnaryOp, object: ObjectRef) -> EvalResult {
    match op {
        UnaryOp::GetX => bounds_of(world, object).map(|r| Value::Number(r.x)),
        UnaryOp::GetY => bounds_of(world, object).map(|r| Value::Number(r.y)),
        UnaryOp::GetWidth => bounds_of(world, object).map(|r| Value::Number(r.width)),
        UnaryOp::GetHeight => bounds_of(world, object).map(|r| Value::Number(r.height)),
        UnaryOp::GetHp => entity_of(world, object).map(|e| Value::Number(e.hit_points)),
        UnaryOp::IsDead => entity_of(world, object).map(|e| Value::Boolean(e.dead)),
        UnaryOp::IsJumping => {
            let info = entity_of(world, object)?;
            if info.kind.can_jump() {
                Ok(Value::Boolean(info.jumping))
            } else {
                Err(type_mismatch("mazub, buzam or shark", info.kind.as_str()))
            }
        }
        UnaryOp::IsDucking => {
            let info = entity_of(world, object)?;
            if info.kind.can_duck() {
                Ok(Value::Boolean(info.ducking))
            } else {
                Err(type_mismatch("mazub or buzam", info.kind.as_str()))
            }
        }
        UnaryOp::IsKind(kind) => Ok(Value::Boolean(is_kind(world, object, kind))),
        UnaryOp::IsTerrain => Ok(Value::Boolean(matches!(object, ObjectRef::Tile(_)))),
        UnaryOp::IsPassable => match object {
            ObjectRef::Tile(pos) => Ok(Value::Boolean(world.tile_kind(pos).is_passable())),
            other => Err(type_mismatch("tile", other.describe())),
        },
        UnaryOp::IsAir => Ok(Value::Boolean(tile_is(world, object, TileKind::Air))),
        UnaryOp::IsWater => Ok(Value::Boolean(tile_is(world, object, TileKind::Water))),
        UnaryOp::IsMagma => Ok(Value::Boolean(tile_is(world, object, TileKind::Magma))),
        UnaryOp::Neg | UnaryOp::Not | UnaryOp::Sqrt | UnaryOp::Random | UnaryOp::SearchObject => {
            Err(type_mismatch(
                format_args!("{} operand for `{}`", op.operand_type(), op.as_symbol()),
                "object",
            ))
        }
    }
}

/// `ismoving(object, direction)`.
pub fn is_moving(world: &dyn WorldView, object: ObjectRef, direction: Direction) -> EvalResult {
    entity_of(world, object).map(|info| Value::Boolean(info.is_moving(direction)))
}

/// `searchobj(direction)`: the nearest entity or impassable tile beyond
/// `origin` along `direction`.
///
/// Candidates must overlap the origin's extent on the perpendicular axis and
/// lie entirely beyond its facing edge (touching counts, distance zero).
/// Entities are enumerated in world order before tiles in row-major order;
/// a candidate replaces the current best only when strictly nearer. Returns
/// null when nothing qualifies.
pub fn search_object(world: &dyn WorldView, origin: EntityId, direction: Direction) -> EvalResult {
    if direction == Direction::None {
        return Err(domain_error("searchobj", "direction must not be none"));
    }
    let me = entity_of(world, ObjectRef::Entity(origin))?.bounds;

    let entities = world.entity_ids().into_iter().filter_map(|id| {
        if id == origin {
            return None;
        }
        let info = world.entity(id)?;
        Some((ObjectRef::Entity(id), info.bounds))
    });
    let tiles = world
        .tile_positions()
        .into_iter()
        .filter(|&pos| !world.tile_kind(pos).is_passable())
        .map(|pos| (ObjectRef::Tile(pos), world.tile_bounds(pos)));

    let mut best: Option<(f64, ObjectRef)> = None;
    for (object, bounds) in entities.chain(tiles) {
        let Some(distance) = gap_along(&me, &bounds, direction) else {
            continue;
        };
        match best {
            Some((nearest, _)) if distance >= nearest => {}
            _ => best = Some((distance, object)),
        }
    }
    Ok(Value::Object(best.map_or(ObjectRef::Null, |(_, object)| object)))
}

/// Gap between the facing edges of `from` and `to` along `direction`, if
/// `to` lies beyond `from` and overlaps it on the perpendicular axis.
fn gap_along(from: &Rect, to: &Rect, direction: Direction) -> Option<f64> {
    let (overlaps, gap) = match direction {
        Direction::Right => (from.overlaps_vertically(to), to.left() - from.right()),
        Direction::Left => (from.overlaps_vertically(to), from.left() - to.right()),
        Direction::Up => (from.overlaps_horizontally(to), to.bottom() - from.top()),
        Direction::Down => (from.overlaps_horizontally(to), from.bottom() - to.top()),
        Direction::None => return None,
    };
    (overlaps && gap >= 0.0).then_some(gap)
}

fn entity_of(world: &dyn WorldView, object: ObjectRef) -> Result<EntityInfo, EvalError> {
    match object {
        ObjectRef::Entity(id) => world
            .entity(id)
            .ok_or_else(|| type_mismatch("entity", format_args!("stale entity {id}"))),
        other => Err(type_mismatch("entity", other.describe())),
    }
}

fn bounds_of(world: &dyn WorldView, object: ObjectRef) -> Result<Rect, EvalError> {
    match object {
        ObjectRef::Tile(pos) => Ok(world.tile_bounds(pos)),
        ObjectRef::Entity(_) => entity_of(world, object).map(|info| info.bounds),
        ObjectRef::Null => Err(type_mismatch("entity or tile", "null")),
    }
}

fn is_kind(world: &dyn WorldView, object: ObjectRef, kind: EntityKind) -> bool {
    match object {
        ObjectRef::Entity(id) => world.entity(id).is_some_and(|info| info.kind == kind),
        ObjectRef::Tile(_) | ObjectRef::Null => false,
    }
}

fn tile_is(world: &dyn WorldView, object: ObjectRef, kind: TileKind) -> bool {
    match object {
        ObjectRef::Tile(pos) => world.tile_kind(pos) == kind,
        ObjectRef::Entity(_) | ObjectRef::Null => false,
    }
}

/// Every object of a `foreach` kind, entities (world order) before tiles
/// (row-major).
pub fn enumerate(world: &dyn WorldView, kind: ForeachKind) -> Vec<ObjectRef> {
    let tiles = || world.tile_positions().into_iter().map(ObjectRef::Tile);
    match kind {
        ForeachKind::Entity(entity_kind) => world
            .entity_ids()
            .into_iter()
            .filter(|&id| world.entity(id).is_some_and(|info| info.kind == entity_kind))
            .map(ObjectRef::Entity)
            .collect(),
        ForeachKind::Terrain => tiles().collect(),
        ForeachKind::Any => world
            .entity_ids()
            .into_iter()
            .map(ObjectRef::Entity)
            .chain(tiles())
            .collect(),
    }
}
