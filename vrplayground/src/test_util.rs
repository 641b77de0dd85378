use std::{cell::RefCell, collections::HashMap, rc::Rc};

use cgmath::{Vector3, vec3};
use shipyard::EntityId;

use crate::{
    options::SessionOptions,
    physics::{BodyMode, PhysicsService},
    session::Session,
    transform::Transform,
    world::ObjectShape,
};

#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsCall {
    Add {
        entity_id: EntityId,
        transform: Transform,
        shape: ObjectShape,
        mode: BodyMode,
        restitution: Option<f32>,
    },
    Remove(EntityId),
    SetVelocity(EntityId, Vector3<f32>),
    Step(f32),
}

/// Physics stand-in that records every call and never moves anything.
/// Clones share the same log, so a test can keep one after handing the other to a session.
#[derive(Clone, Default)]
pub struct RecordingPhysics {
    calls: Rc<RefCell<Vec<PhysicsCall>>>,
    bodies: Rc<RefCell<HashMap<EntityId, Transform>>>,
}

impl RecordingPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PhysicsCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Move a body as if the simulation had done it.
    pub fn teleport_body(&self, entity_id: EntityId, position: Vector3<f32>) {
        if let Some(transform) = self.bodies.borrow_mut().get_mut(&entity_id) {
            transform.position = position;
        }
    }
}

impl PhysicsService for RecordingPhysics {
    fn add(
        &mut self,
        entity_id: EntityId,
        transform: &Transform,
        shape: &ObjectShape,
        mode: BodyMode,
        restitution: Option<f32>,
    ) {
        self.calls.borrow_mut().push(PhysicsCall::Add {
            entity_id,
            transform: *transform,
            shape: shape.clone(),
            mode,
            restitution,
        });
        self.bodies.borrow_mut().insert(entity_id, *transform);
    }

    fn remove(&mut self, entity_id: EntityId) {
        self.calls.borrow_mut().push(PhysicsCall::Remove(entity_id));
        self.bodies.borrow_mut().remove(&entity_id);
    }

    fn set_velocity(&mut self, entity_id: EntityId, velocity: Vector3<f32>) {
        self.calls
            .borrow_mut()
            .push(PhysicsCall::SetVelocity(entity_id, velocity));
    }

    fn contains(&self, entity_id: EntityId) -> bool {
        self.bodies.borrow().contains_key(&entity_id)
    }

    fn step(&mut self, delta_time: f32) {
        self.calls.borrow_mut().push(PhysicsCall::Step(delta_time));
    }

    fn transform(&self, entity_id: EntityId) -> Option<Transform> {
        self.bodies.borrow().get(&entity_id).copied()
    }
}

/// Session over a recording physics double with a 10 x 0.2 x 10 floor whose top is at y = 0.
pub fn session_on_floor() -> (Session, RecordingPhysics) {
    let physics = RecordingPhysics::new();
    let mut session = Session::new(SessionOptions::default(), Box::new(physics.clone()), 2);
    session.add_static_surface(
        "floor",
        Transform::from_position(vec3(0.0, -0.1, 0.0)),
        ObjectShape::cuboid(vec3(10.0, 0.2, 10.0)),
    );
    physics.clear_calls();
    (session, physics)
}
