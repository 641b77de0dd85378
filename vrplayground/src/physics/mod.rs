pub mod util;

use std::collections::HashMap;

use cgmath::Vector3;
use engine::physics_log;
use rapier3d::prelude::*;
use shipyard::EntityId;

use crate::{transform::Transform, world::ObjectShape};

use self::util::{isometry_to_transform, vec_to_nvec};

/// How a body takes part in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyMode {
    Static = 0,
    Dynamic = 1,
}

/// The rigid-body simulation as seen from the interaction code: bodies can be added,
/// withdrawn and pushed, and the whole thing can be stepped. Everything else is opaque.
pub trait PhysicsService {
    fn add(
        &mut self,
        entity_id: EntityId,
        transform: &Transform,
        shape: &ObjectShape,
        mode: BodyMode,
        restitution: Option<f32>,
    );

    fn remove(&mut self, entity_id: EntityId);

    fn set_velocity(&mut self, entity_id: EntityId, velocity: Vector3<f32>);

    fn contains(&self, entity_id: EntityId) -> bool;

    /// Advance every dynamic body by `delta_time` seconds.
    fn step(&mut self, delta_time: f32);

    /// Current world transform of a registered body.
    fn transform(&self, entity_id: EntityId) -> Option<Transform>;
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    entity_to_body: HashMap<EntityId, RigidBodyHandle>,
}

impl PhysicsWorld {
    pub fn new(gravity: Vector3<f32>) -> Self {
        Self {
            gravity: vec_to_nvec(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            entity_to_body: HashMap::new(),
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(cgmath::vec3(0.0, -9.81, 0.0))
    }
}

impl PhysicsService for PhysicsWorld {
    fn add(
        &mut self,
        entity_id: EntityId,
        transform: &Transform,
        shape: &ObjectShape,
        mode: BodyMode,
        restitution: Option<f32>,
    ) {
        if self.entity_to_body.contains_key(&entity_id) {
            physics_log!(WARN, "entity {:?} is already simulated, ignoring add", entity_id);
            return;
        }
        if shape.is_empty() {
            physics_log!(WARN, "entity {:?} has no collision geometry, ignoring add", entity_id);
            return;
        }

        let builder = match mode {
            BodyMode::Static => RigidBodyBuilder::fixed(),
            BodyMode::Dynamic => RigidBodyBuilder::dynamic().ccd_enabled(true),
        };
        let body = builder
            .position(crate::world::shape::to_isometry(transform))
            .build();
        let handle = self.rigid_body_set.insert(body);

        let mut collider = ColliderBuilder::new(shape.to_shared_shape());
        if let Some(restitution) = restitution {
            collider = collider.restitution(restitution);
        }
        self.collider_set
            .insert_with_parent(collider.build(), handle, &mut self.rigid_body_set);

        self.entity_to_body.insert(entity_id, handle);
        physics_log!(DEBUG, "added {:?} as {:?}", entity_id, mode);
    }

    fn remove(&mut self, entity_id: EntityId) {
        let Some(handle) = self.entity_to_body.remove(&entity_id) else {
            return;
        };

        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        physics_log!(DEBUG, "removed {:?}", entity_id);
    }

    fn set_velocity(&mut self, entity_id: EntityId, velocity: Vector3<f32>) {
        let Some(handle) = self.entity_to_body.get(&entity_id) else {
            return;
        };

        if let Some(body) = self.rigid_body_set.get_mut(*handle) {
            body.set_linvel(vec_to_nvec(velocity), true);
        }
    }

    fn contains(&self, entity_id: EntityId) -> bool {
        self.entity_to_body.contains_key(&entity_id)
    }

    fn step(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }

        self.integration_parameters.dt = delta_time;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn transform(&self, entity_id: EntityId) -> Option<Transform> {
        let handle = self.entity_to_body.get(&entity_id)?;
        let body = self.rigid_body_set.get(*handle)?;
        Some(isometry_to_transform(body.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ShapePart;
    use cgmath::vec3;
    use shipyard::World;

    fn two_ids() -> (EntityId, EntityId) {
        let mut world = World::new();
        (world.add_entity(()), world.add_entity(()))
    }

    #[test]
    fn test_dynamic_body_falls_and_static_body_stays() {
        let (floor, ball) = two_ids();
        let mut physics = PhysicsWorld::default();

        physics.add(
            floor,
            &Transform::from_position(vec3(0.0, -0.1, 0.0)),
            &ObjectShape::cuboid(vec3(10.0, 0.2, 10.0)),
            BodyMode::Static,
            None,
        );
        physics.add(
            ball,
            &Transform::from_position(vec3(0.0, 3.0, 0.0)),
            &ObjectShape::ball(0.2),
            BodyMode::Dynamic,
            Some(0.2),
        );

        for _ in 0..10 {
            physics.step(1.0 / 60.0);
        }

        assert!(physics.transform(ball).unwrap().position.y < 3.0);
        assert_eq!(physics.transform(floor).unwrap().position.y, -0.1);
    }

    #[test]
    fn test_remove_and_readd_keeps_single_body() {
        let (_, ball) = two_ids();
        let mut physics = PhysicsWorld::default();
        let shape = ObjectShape::ball(0.2);
        let at = Transform::from_position(vec3(0.0, 1.0, 0.0));

        physics.add(ball, &at, &shape, BodyMode::Dynamic, Some(0.2));
        physics.add(ball, &at, &shape, BodyMode::Dynamic, Some(0.2));
        assert_eq!(physics.rigid_body_set.len(), 1);
        assert_eq!(physics.collider_set.len(), 1);

        physics.remove(ball);
        physics.remove(ball);
        assert!(!physics.contains(ball));
        assert!(physics.transform(ball).is_none());

        physics.add(ball, &at, &shape, BodyMode::Dynamic, Some(0.2));
        assert!(physics.contains(ball));
    }

    #[test]
    fn test_set_velocity_is_applied() {
        let (_, ball) = two_ids();
        let mut physics = PhysicsWorld::new(vec3(0.0, 0.0, 0.0));
        physics.add(
            ball,
            &Transform::identity(),
            &ObjectShape::ball(0.2),
            BodyMode::Dynamic,
            None,
        );

        physics.set_velocity(ball, vec3(3.0, 0.0, 0.0));

        physics.step(0.5);
        let x = physics.transform(ball).unwrap().position.x;
        assert!((x - 1.5).abs() < 1e-3, "moved to {}", x);
    }

    #[test]
    fn test_empty_compound_is_not_simulated() {
        let (_, hollow) = two_ids();
        let mut physics = PhysicsWorld::default();
        let shape = ObjectShape::Compound(vec![ShapePart {
            offset: Transform::identity(),
            shape: ObjectShape::Compound(Vec::new()),
        }]);

        physics.add(hollow, &Transform::identity(), &shape, BodyMode::Dynamic, Some(0.2));
        physics.step(1.0 / 60.0);

        assert!(!physics.contains(hollow));
        assert!(physics.rigid_body_set.is_empty());
    }
}
