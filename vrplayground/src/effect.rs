use cgmath::Vector3;
use shipyard::EntityId;

use crate::{interaction::ControllerId, transform::Transform};

/// State changes produced by one frame of the session, reported back to the runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ObjectGrabbed {
        controller: ControllerId,
        entity_id: EntityId,
    },
    ObjectReleased {
        controller: ControllerId,
        entity_id: EntityId,
        /// Velocity injected into the physics body, if the controller had an estimate.
        velocity: Option<Vector3<f32>>,
    },
    ObjectCulled {
        entity_id: EntityId,
        position: Vector3<f32>,
    },
    Teleported {
        controller: ControllerId,
        target: Vector3<f32>,
        offset: Transform,
    },
}
