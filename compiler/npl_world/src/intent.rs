//! Movement intents: the only way a program affects the world.

use npl_ir::{ActionKind, Direction};

use crate::EntityId;

/// Fire-and-forget command for an entity's movement state machine.
///
/// The receiving simulation decides whether and how an intent takes effect.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MovementIntent {
    StartMove(Direction),
    StopMove(Direction),
    StartJump,
    StopJump,
    StartDuck,
    StopDuck,
}

impl From<ActionKind> for MovementIntent {
    fn from(action: ActionKind) -> Self {
        match action {
            ActionKind::StartRun(direction) => MovementIntent::StartMove(direction),
            ActionKind::StopRun(direction) => MovementIntent::StopMove(direction),
            ActionKind::StartJump => MovementIntent::StartJump,
            ActionKind::StopJump => MovementIntent::StopJump,
            ActionKind::StartDuck => MovementIntent::StartDuck,
            ActionKind::StopDuck => MovementIntent::StopDuck,
        }
    }
}

/// Receiver of movement intents.
pub trait IntentSink {
    fn submit(&mut self, entity: EntityId, intent: MovementIntent);
}

/// Collects intents in submission order.
impl IntentSink for Vec<(EntityId, MovementIntent)> {
    fn submit(&mut self, entity: EntityId, intent: MovementIntent) {
        self.push((entity, intent));
    }
}
