//! In-memory tile world.
//!
//! Stores tiles densely in row-major order and entities in spawn order.
//! Movement intents update the entity's movement flags only; there is no
//! physics, so positions change only through [`GridWorld::entity_mut`].

use tracing::{debug, trace};

use crate::{
    Direction, EntityId, EntityInfo, EntityKind, MovementIntent, Rect, TileKind, TilePos,
    WorldView,
};

/// Reference [`WorldView`] over a fixed tile grid.
#[derive(Clone, Debug)]
pub struct GridWorld {
    cols: u32,
    rows: u32,
    tile_size: f64,
    tiles: Vec<TileKind>,
    /// Entities in spawn order. Removed entities leave the vector.
    entities: Vec<(EntityId, EntityInfo)>,
    next_id: u32,
}

impl GridWorld {
    /// An all-air world of `cols` by `rows` tiles.
    pub fn new(cols: u32, rows: u32, tile_size: f64) -> Self {
        GridWorld {
            cols,
            rows,
            tile_size,
            tiles: vec![TileKind::Air; cols as usize * rows as usize],
            entities: Vec::new(),
            next_id: 0,
        }
    }

    fn tile_index(&self, pos: TilePos) -> Option<usize> {
        (pos.col < self.cols && pos.row < self.rows)
            .then(|| pos.row as usize * self.cols as usize + pos.col as usize)
    }

    /// Set the kind of one tile. Returns `false` if `pos` is outside the grid.
    pub fn set_tile(&mut self, pos: TilePos, kind: TileKind) -> bool {
        match self.tile_index(pos) {
            Some(index) => {
                self.tiles[index] = kind;
                true
            }
            None => false,
        }
    }

    /// Fill a whole row with one tile kind.
    pub fn fill_row(&mut self, row: u32, kind: TileKind) {
        for col in 0..self.cols {
            self.set_tile(TilePos::new(col, row), kind);
        }
    }

    /// Add an entity and return its handle.
    pub fn spawn(&mut self, kind: EntityKind, bounds: Rect, hit_points: f64) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities
            .push((id, EntityInfo::new(kind, bounds, hit_points)));
        debug!(entity = %id, kind = kind.as_str(), "spawned entity");
        id
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntityInfo> {
        self.entities
            .iter_mut()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, info)| info)
    }

    /// Take an entity out of the world. Handles to it become stale.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityInfo> {
        let index = self.entities.iter().position(|(candidate, _)| *candidate == id)?;
        debug!(entity = %id, "removed entity");
        Some(self.entities.remove(index).1)
    }

    /// Mark an entity dead. Dead entities stay visible until removed.
    pub fn kill(&mut self, id: EntityId) -> bool {
        match self.entity_mut(id) {
            Some(info) => {
                info.dead = true;
                info.hit_points = 0.0;
                true
            }
            None => false,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Apply a movement intent to an entity's movement flags.
    ///
    /// Intents for unknown or dead entities are dropped. Jumping and ducking
    /// are ignored for entity kinds without those abilities.
    pub fn apply_intent(&mut self, id: EntityId, intent: MovementIntent) {
        let Some(info) = self.entity_mut(id) else {
            debug!(entity = %id, ?intent, "intent for unknown entity dropped");
            return;
        };
        if info.dead {
            trace!(entity = %id, ?intent, "intent for dead entity dropped");
            return;
        }
        match intent {
            MovementIntent::StartMove(direction) => {
                if direction.is_horizontal() {
                    info.horizontal = direction;
                }
            }
            MovementIntent::StopMove(direction) => {
                if info.horizontal == direction {
                    info.horizontal = Direction::None;
                }
            }
            MovementIntent::StartJump if info.kind.can_jump() => {
                info.jumping = true;
                info.vertical = Direction::Up;
            }
            MovementIntent::StopJump if info.kind.can_jump() => {
                info.jumping = false;
                if info.vertical == Direction::Up {
                    info.vertical = Direction::None;
                }
            }
            MovementIntent::StartDuck if info.kind.can_duck() => info.ducking = true,
            MovementIntent::StopDuck if info.kind.can_duck() => info.ducking = false,
            MovementIntent::StartJump
            | MovementIntent::StopJump
            | MovementIntent::StartDuck
            | MovementIntent::StopDuck => {
                trace!(entity = %id, ?intent, "intent not supported by entity kind");
                return;
            }
        }
        trace!(entity = %id, ?intent, "applied intent");
    }
}

impl WorldView for GridWorld {
    fn tile_size(&self) -> f64 {
        self.tile_size
    }

    fn grid_size(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    fn tile_kind(&self, pos: TilePos) -> TileKind {
        self.tile_index(pos)
            .map_or(TileKind::Air, |index| self.tiles[index])
    }

    fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|(id, _)| *id).collect()
    }

    fn entity(&self, id: EntityId) -> Option<EntityInfo> {
        self.entities
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, info)| *info)
    }
}
