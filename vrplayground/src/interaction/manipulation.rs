use cgmath::{Vector3, Zero};
use engine::interaction_log;
use shipyard::EntityId;

use crate::{
    effect::Effect,
    options::InteractionOptions,
    physics::{BodyMode, PhysicsService},
    transform::{ParentSpace, Transform, convert_between_spaces},
    world::ObjectRegistry,
};

use super::{ControllerState, PickResolver};

/// Grab state of one controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoldState {
    #[default]
    Idle,
    Holding(EntityId),
}

/// Borrowed session pieces a controller needs to grab or release.
pub struct ManipulationContext<'a> {
    pub registry: &'a ObjectRegistry,
    pub physics: &'a mut dyn PhysicsService,
    pub picker: &'a PickResolver,
    pub options: &'a InteractionOptions,
}

impl ControllerState {
    /// `Idle -> Holding(nearest hit)`. Without a hit, or while already holding, nothing happens.
    pub fn select_start(&mut self, ctx: &mut ManipulationContext<'_>) -> Option<Effect> {
        if let HoldState::Holding(entity_id) = self.hold {
            interaction_log!(
                DEBUG,
                "{} select start while holding {:?}, ignoring",
                self.id(),
                entity_id
            );
            return None;
        }

        let hits = ctx
            .picker
            .resolve(&self.pose, &ctx.registry.pickable_entries());
        let Some(nearest) = hits.first() else {
            interaction_log!(TRACE, "{} select start hit nothing", self.id());
            return None;
        };

        self.grab(nearest.entity_id, ctx)
    }

    fn grab(&mut self, entity_id: EntityId, ctx: &mut ManipulationContext<'_>) -> Option<Effect> {
        let current = ctx.registry.transform(entity_id)?;
        if current.parent != ParentSpace::World {
            return None;
        }

        // Out of the simulation first, so it is never simulated while attached.
        ctx.physics.remove(entity_id);

        let local = convert_between_spaces(&current.transform, &Transform::identity(), &self.pose);
        ctx.registry
            .set_transform(entity_id, local, ParentSpace::Controller(self.id()));
        let controller_id = self.id();
        ctx.registry.update_manipulable(entity_id, |manipulable| {
            manipulable.in_physics = false;
            manipulable.held_by = Some(controller_id);
        });
        ctx.registry
            .set_emissive(entity_id, ctx.options.held_emissive());

        self.hold = HoldState::Holding(entity_id);
        interaction_log!(INFO, "{} grabbed {:?}", self.id(), entity_id);

        Some(Effect::ObjectGrabbed {
            controller: self.id(),
            entity_id,
        })
    }

    /// `Holding(object) -> Idle`, handing the object back to physics with the throw velocity.
    /// Releasing while idle is a no-op.
    pub fn select_end(&mut self, ctx: &mut ManipulationContext<'_>) -> Option<Effect> {
        let HoldState::Holding(entity_id) = self.hold else {
            interaction_log!(TRACE, "{} select end while idle", self.id());
            return None;
        };
        self.hold = HoldState::Idle;

        let current = ctx.registry.transform(entity_id)?;
        let world = match current.parent {
            ParentSpace::Controller(_) => {
                convert_between_spaces(&current.transform, &self.pose, &Transform::identity())
            }
            ParentSpace::World => current.transform,
        };
        ctx.registry
            .set_transform(entity_id, world, ParentSpace::World);
        ctx.registry.set_emissive(entity_id, Vector3::zero());

        let restitution = ctx
            .registry
            .manipulable(entity_id)
            .map(|manipulable| manipulable.restitution);
        let shape = ctx.registry.shape(entity_id)?;
        ctx.physics
            .add(entity_id, &world, &shape, BodyMode::Dynamic, restitution);
        ctx.registry.update_manipulable(entity_id, |manipulable| {
            manipulable.in_physics = true;
            manipulable.held_by = None;
        });

        let velocity = self
            .tracker
            .velocity()
            .map(|velocity| velocity * ctx.options.throw_multiplier);
        if let Some(velocity) = velocity {
            ctx.physics.set_velocity(entity_id, velocity);
        }

        interaction_log!(
            INFO,
            "{} released {:?} with velocity {:?}",
            self.id(),
            entity_id,
            velocity
        );

        Some(Effect::ObjectReleased {
            controller: self.id(),
            entity_id,
            velocity,
        })
    }
}
