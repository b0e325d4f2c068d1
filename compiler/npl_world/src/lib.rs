//! World interface consumed by entity programs.
//!
//! Programs read the world through [`WorldView`] and affect it only through
//! [`MovementIntent`]s submitted to an [`IntentSink`]; physics, collision and
//! hit-point rules stay with the simulation that implements these traits.
//!
//! Coordinates are pixels with the origin at the bottom-left corner of the
//! world and `y` growing upward. Tiles are square and addressed by
//! [`TilePos`] (column, row).
//!
//! [`GridWorld`] is a small in-memory implementation used by tests and by the
//! headless scenario runner.

mod geometry;
mod grid;
mod intent;
mod object;

pub use geometry::Rect;
pub use grid::GridWorld;
pub use intent::{IntentSink, MovementIntent};
pub use npl_ir::{Direction, EntityKind};
pub use object::{EntityId, EntityInfo, ObjectRef, TileKind, TilePos};

/// Read-only view of the world a program runs in.
///
/// All queries are synchronous. Implementations must enumerate entities in a
/// stable order; `foreach` snapshots and `searchobj` tie-breaks depend on it.
pub trait WorldView {
    /// Edge length of a tile in pixels.
    fn tile_size(&self) -> f64;

    /// Grid dimensions as `(columns, rows)`.
    fn grid_size(&self) -> (u32, u32);

    /// Kind of the tile at `pos`. Positions outside the grid are air.
    fn tile_kind(&self, pos: TilePos) -> TileKind;

    /// Ids of all live and dead entities still present, in stable order.
    fn entity_ids(&self) -> Vec<EntityId>;

    /// Current state of an entity, or `None` if it has left the world.
    fn entity(&self, id: EntityId) -> Option<EntityInfo>;

    /// Pixel rectangle covered by a tile.
    fn tile_bounds(&self, pos: TilePos) -> Rect {
        let size = self.tile_size();
        Rect::new(
            f64::from(pos.col) * size,
            f64::from(pos.row) * size,
            size,
            size,
        )
    }

    /// Pixel rectangle covered by the whole world.
    fn world_bounds(&self) -> Rect {
        let (cols, rows) = self.grid_size();
        let size = self.tile_size();
        Rect::new(0.0, 0.0, f64::from(cols) * size, f64::from(rows) * size)
    }

    /// Tile containing the pixel `(x, y)`, clamped to the grid.
    ///
    /// Coordinates are floored to whole tiles; anything left of or below the
    /// world maps to the first column/row, anything beyond it to the last.
    /// Returns `None` only for non-finite coordinates or an empty grid.
    fn clamped_tile_at(&self, x: f64, y: f64) -> Option<TilePos> {
        let (cols, rows) = self.grid_size();
        if !x.is_finite() || !y.is_finite() || cols == 0 || rows == 0 {
            return None;
        }
        let size = self.tile_size();
        let col = clamp_index((x / size).floor(), cols);
        let row = clamp_index((y / size).floor(), rows);
        Some(TilePos::new(col, row))
    }

    /// Every tile position in row-major order (bottom row first).
    fn tile_positions(&self) -> Vec<TilePos> {
        let (cols, rows) = self.grid_size();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| TilePos::new(col, row)))
            .collect()
    }
}

/// Clamp a floored coordinate to `0..len`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0..len before the cast"
)]
fn clamp_index(floored: f64, len: u32) -> u32 {
    let max = f64::from(len - 1);
    floored.clamp(0.0, max) as u32
}
