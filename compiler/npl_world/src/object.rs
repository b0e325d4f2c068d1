//! Handles to world objects and the state a program can observe.

use std::fmt;

use npl_ir::{Direction, EntityKind};

use crate::Rect;

/// Opaque handle to an entity in the world.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        EntityId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tile coordinates: column from the left, row from the bottom.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TilePos {
    pub col: u32,
    pub row: u32,
}

impl TilePos {
    #[inline]
    pub const fn new(col: u32, row: u32) -> Self {
        TilePos { col, row }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Geological feature of a tile.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TileKind {
    #[default]
    Air,
    Ground,
    Water,
    Magma,
}

impl TileKind {
    /// Whether entities can move through this tile.
    pub const fn is_passable(self) -> bool {
        !matches!(self, TileKind::Ground)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TileKind::Air => "air",
            TileKind::Ground => "ground",
            TileKind::Water => "water",
            TileKind::Magma => "magma",
        }
    }
}

/// Reference to a world object held in a program value.
///
/// References are weak: an entity may leave the world while a program still
/// holds its handle, in which case queries on it fail.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ObjectRef {
    #[default]
    Null,
    Entity(EntityId),
    Tile(TilePos),
}

impl ObjectRef {
    pub const fn is_null(self) -> bool {
        matches!(self, ObjectRef::Null)
    }

    /// Name of the variant, for error messages.
    pub const fn describe(self) -> &'static str {
        match self {
            ObjectRef::Null => "null",
            ObjectRef::Entity(_) => "entity",
            ObjectRef::Tile(_) => "tile",
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRef::Null => write!(f, "null"),
            ObjectRef::Entity(id) => write!(f, "entity {id}"),
            ObjectRef::Tile(pos) => write!(f, "tile {pos}"),
        }
    }
}

/// Observable state of an entity.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct EntityInfo {
    pub kind: EntityKind,
    pub bounds: Rect,
    pub hit_points: f64,
    pub dead: bool,
    pub jumping: bool,
    pub ducking: bool,
    /// Horizontal movement direction, `None` when standing still.
    pub horizontal: Direction,
    /// Vertical movement direction, `None` when not rising or falling.
    pub vertical: Direction,
}

impl EntityInfo {
    /// A standing, live entity.
    pub fn new(kind: EntityKind, bounds: Rect, hit_points: f64) -> Self {
        EntityInfo {
            kind,
            bounds,
            hit_points,
            dead: false,
            jumping: false,
            ducking: false,
            horizontal: Direction::None,
            vertical: Direction::None,
        }
    }

    /// Whether the entity is moving in `direction`.
    ///
    /// `Direction::None` asks whether the entity is standing still.
    pub fn is_moving(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left | Direction::Right => self.horizontal == direction,
            Direction::Up | Direction::Down => self.vertical == direction,
            Direction::None => {
                self.horizontal == Direction::None && self.vertical == Direction::None
            }
        }
    }
}
