use std::fmt;

use shipyard::EntityId;

use crate::transform::Transform;

use super::{HoldState, VelocityTracker};

/// Index of a tracked controller, in the order the device layer enumerated them.
/// Lower ids take precedence when several controllers compete (teleport).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub usize);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller{}", self.0 + 1)
    }
}

/// Everything the interaction code knows about one hand-held controller.
#[derive(Clone, Debug)]
pub struct ControllerState {
    id: ControllerId,
    pub pose: Transform,
    pub tracker: VelocityTracker,
    pub select_held: bool,
    pub squeeze_held: bool,
    pub hold: HoldState,
    /// Length of the pointer laser, driven by the pick feedback pass.
    pub feedback_length: f32,
}

impl ControllerState {
    pub fn new(id: ControllerId, default_reach: f32) -> Self {
        Self {
            id,
            pose: Transform::identity(),
            tracker: VelocityTracker::new(),
            select_held: false,
            squeeze_held: false,
            hold: HoldState::Idle,
            feedback_length: default_reach,
        }
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn held_object(&self) -> Option<EntityId> {
        match self.hold {
            HoldState::Idle => None,
            HoldState::Holding(entity_id) => Some(entity_id),
        }
    }
}
