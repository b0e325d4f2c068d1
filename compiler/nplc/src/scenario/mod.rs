//! Scenario files: a world plus the programs that drive its entities.
//!
//! A scenario is a JSON document:
//!
//! ```json
//! {
//!   "world": {
//!     "columns": 20, "rows": 5, "tile_size": 10,
//!     "fill": [{ "row": 0, "kind": "ground" }],
//!     "tiles": [{ "col": 4, "row": 1, "kind": "water" }],
//!     "entities": [
//!       { "kind": "mazub", "bounds": { "x": 10, "y": 10, "width": 6, "height": 10 }, "hp": 100 }
//!     ]
//!   },
//!   "programs": [
//!     { "entity": 0,
//!       "variables": [{ "name": "n", "type": "double" }],
//!       "body": { "print": { "value": 42 } } }
//!   ]
//! }
//! ```
//!
//! Program bodies are syntax trees written out as JSON. Numbers and booleans
//! stand for themselves; other expressions are single-key objects such as
//! `{ "var": "n" }`, `{ "unary": { "op": "gethp", "operand": "self" } }` or
//! `{ "binary": { "op": "+", "left": 1, "right": 2 } }`.

mod lower;

use std::fmt;
use std::path::Path;

use npl_ir::{Direction, EntityKind, Type};
use npl_world::{EntityId, GridWorld, Rect, TileKind, TilePos};
use serde::Deserialize;

pub use lower::{lower_program, LoweredProgram};

/// A world and the programs to run in it.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub world: WorldSpec,
    #[serde(default)]
    pub programs: Vec<ProgramSpec>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldSpec {
    pub columns: u32,
    pub rows: u32,
    pub tile_size: f64,
    /// Horizontal speed of running entities in pixels per second.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Whole rows set to one tile kind, applied before `tiles`.
    #[serde(default)]
    pub fill: Vec<RowFill>,
    #[serde(default)]
    pub tiles: Vec<TileSpec>,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
}

fn default_speed() -> f64 {
    50.0
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowFill {
    pub row: u32,
    pub kind: TileKind,
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileSpec {
    pub col: u32,
    pub row: u32,
    pub kind: TileKind,
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub bounds: Rect,
    pub hp: f64,
    #[serde(default)]
    pub dead: bool,
}

/// A program and the entity (by index into `world.entities`) it drives.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSpec {
    pub entity: usize,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
    pub body: StmtSpec,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// Statement node as written in a scenario.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StmtSpec {
    Skip,
    Break,
    Assign {
        var: String,
        value: ExprSpec,
    },
    Print {
        value: ExprSpec,
    },
    Action {
        action: String,
        #[serde(default)]
        direction: Option<Direction>,
    },
    Sequence(Vec<StmtSpec>),
    If {
        cond: ExprSpec,
        then: Box<StmtSpec>,
        #[serde(default, rename = "else")]
        otherwise: Option<Box<StmtSpec>>,
    },
    While {
        cond: ExprSpec,
        body: Box<StmtSpec>,
    },
    Foreach {
        var: String,
        kind: ForeachKindSpec,
        #[serde(default, rename = "where")]
        filter: Option<ExprSpec>,
        #[serde(default)]
        sort: Option<SortSpec>,
        body: Box<StmtSpec>,
    },
    Wait {
        duration: ExprSpec,
    },
}

/// What a `foreach` enumerates: an entity kind, `terrain` or `any`.
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ForeachKindSpec {
    Entity(EntityKind),
    Other(OtherKind),
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtherKind {
    Terrain,
    Any,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortSpec {
    pub key: ExprSpec,
    #[serde(default)]
    pub order: OrderSpec,
}

#[derive(Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSpec {
    #[default]
    Ascending,
    Descending,
}

/// Expression node as written in a scenario.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ExprSpec {
    Number(f64),
    Boolean(bool),
    Node(Box<ExprNode>),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprNode {
    Null,
    #[serde(rename = "self")]
    SelfRef,
    Direction(Direction),
    Var(String),
    Unary {
        op: String,
        operand: ExprSpec,
    },
    Binary {
        op: String,
        left: ExprSpec,
        right: ExprSpec,
    },
}

/// Errors raised while loading or lowering a scenario.
#[derive(Debug)]
pub enum ScenarioError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    UnknownOperator {
        symbol: String,
    },
    UnknownAction {
        action: String,
    },
    MissingDirection {
        action: String,
    },
    UnknownEntity {
        program: usize,
        entity: usize,
    },
    TileOutOfBounds {
        col: u32,
        row: u32,
    },
    InvalidTileSize {
        size: f64,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io { path, source } => write!(f, "cannot read '{path}': {source}"),
            ScenarioError::Json(err) => write!(f, "invalid scenario: {err}"),
            ScenarioError::UnknownOperator { symbol } => write!(f, "unknown operator '{symbol}'"),
            ScenarioError::UnknownAction { action } => write!(f, "unknown action '{action}'"),
            ScenarioError::MissingDirection { action } => {
                write!(f, "action '{action}' needs a direction")
            }
            ScenarioError::UnknownEntity { program, entity } => {
                write!(f, "program {program} drives entity {entity}, which is not in the world")
            }
            ScenarioError::TileOutOfBounds { col, row } => {
                write!(f, "tile ({col}, {row}) is outside the world")
            }
            ScenarioError::InvalidTileSize { size } => {
                write!(f, "tile size must be a positive number of pixels, got {size}")
            }
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Io { source, .. } => Some(source),
            ScenarioError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(err: serde_json::Error) -> Self {
        ScenarioError::Json(err)
    }
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build the world this scenario describes.
    ///
    /// Entity ids follow the order of `world.entities`.
    pub fn build_world(&self) -> Result<(GridWorld, Vec<EntityId>), ScenarioError> {
        let spec = &self.world;
        if !spec.tile_size.is_finite() || spec.tile_size <= 0.0 {
            return Err(ScenarioError::InvalidTileSize {
                size: spec.tile_size,
            });
        }
        let mut world = GridWorld::new(spec.columns, spec.rows, spec.tile_size);
        for fill in &spec.fill {
            if fill.row >= spec.rows {
                return Err(ScenarioError::TileOutOfBounds {
                    col: 0,
                    row: fill.row,
                });
            }
            world.fill_row(fill.row, fill.kind);
        }
        for tile in &spec.tiles {
            if !world.set_tile(TilePos::new(tile.col, tile.row), tile.kind) {
                return Err(ScenarioError::TileOutOfBounds {
                    col: tile.col,
                    row: tile.row,
                });
            }
        }
        let ids = spec
            .entities
            .iter()
            .map(|entity| {
                let id = world.spawn(entity.kind, entity.bounds, entity.hp);
                if entity.dead {
                    world.kill(id);
                }
                id
            })
            .collect();
        Ok((world, ids))
    }
}

impl ProgramSpec {
    /// Entity this program drives, given the ids returned by
    /// [`Scenario::build_world`]. `index` is the program's position, used
    /// for error reporting.
    pub fn entity_id(&self, index: usize, ids: &[EntityId]) -> Result<EntityId, ScenarioError> {
        ids.get(self.entity)
            .copied()
            .ok_or(ScenarioError::UnknownEntity {
                program: index,
                entity: self.entity,
            })
    }
}
