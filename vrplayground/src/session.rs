// Session
//
// Owns one playground world: the object registry, the physics service, the controllers
// and the teleport state. `update` runs one frame; everything the presentation layer
// needs afterwards is available from `render_state`.

use cgmath::Vector3;
use engine::{interaction_log, profile, scene_log, teleport_log};
use shipyard::EntityId;

use crate::{
    effect::Effect,
    input_context::{InputContext, InputEdgeDetector},
    interaction::{
        ControllerId, ControllerState, InputEvent, InputEventKind, InputQueue,
        ManipulationContext, PickResolver,
    },
    options::SessionOptions,
    physics::{BodyMode, PhysicsService, PhysicsWorld},
    teleport::{ReferenceFrame, TeleportMarker, TeleportSystem, TeleportTarget},
    time::Time,
    transform::{ParentSpace, Transform},
    world::{ObjectRegistry, ObjectShape},
};

#[derive(Clone, Debug)]
pub struct RenderObject {
    pub entity_id: EntityId,
    /// World-space transform, already resolved through the holding controller if held.
    pub transform: Transform,
    pub shape: ObjectShape,
    pub color: Vector3<f32>,
    pub emissive: Vector3<f32>,
    pub held_by: Option<ControllerId>,
}

#[derive(Clone, Debug)]
pub struct ControllerVisual {
    pub id: ControllerId,
    pub pose: Transform,
    pub laser_length: f32,
    pub held_object: Option<EntityId>,
}

/// Everything needed to draw a frame.
#[derive(Clone, Debug)]
pub struct RenderState {
    pub objects: Vec<RenderObject>,
    pub controllers: Vec<ControllerVisual>,
    pub teleport_marker: TeleportMarker,
    pub reference_offset: Transform,
}

pub struct Session {
    options: SessionOptions,
    registry: ObjectRegistry,
    physics: Box<dyn PhysicsService>,
    controllers: Vec<ControllerState>,
    picker: PickResolver,
    teleport_system: TeleportSystem,
    teleport_marker: TeleportMarker,
    reference_frame: ReferenceFrame,
    input_queue: InputQueue,
    edge_detector: InputEdgeDetector,
}

impl Session {
    pub fn new(
        options: SessionOptions,
        physics: Box<dyn PhysicsService>,
        controller_count: usize,
    ) -> Session {
        let interaction = &options.interaction;
        let controllers = (0..controller_count)
            .map(|index| ControllerState::new(ControllerId(index), interaction.default_reach))
            .collect();
        let picker = PickResolver::new(interaction.pick_max_distance, interaction.default_reach);
        let teleport_system = TeleportSystem::new(options.teleport.clone());

        Session {
            options,
            registry: ObjectRegistry::new(),
            physics,
            controllers,
            picker,
            teleport_system,
            teleport_marker: TeleportMarker::default(),
            reference_frame: ReferenceFrame::new(),
            input_queue: InputQueue::default(),
            edge_detector: InputEdgeDetector::new(),
        }
    }

    /// Session backed by a rapier simulation.
    pub fn with_rapier(options: SessionOptions, controller_count: usize) -> Session {
        let physics = PhysicsWorld::new(options.physics.gravity());
        Session::new(options, Box::new(physics), controller_count)
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn physics(&self) -> &dyn PhysicsService {
        self.physics.as_ref()
    }

    pub fn controllers(&self) -> &[ControllerState] {
        &self.controllers
    }

    pub fn controller(&self, id: ControllerId) -> Option<&ControllerState> {
        self.controllers.get(id.0)
    }

    pub fn teleport_marker(&self) -> &TeleportMarker {
        &self.teleport_marker
    }

    pub fn pending_teleport_target(&self) -> Option<TeleportTarget> {
        self.teleport_system.pending_target()
    }

    pub fn reference_offset(&self) -> Transform {
        self.reference_frame.offset()
    }

    /// Add a dynamic, pickable object and hand it to the simulation.
    pub fn spawn_object(
        &mut self,
        transform: Transform,
        shape: ObjectShape,
        color: Vector3<f32>,
    ) -> EntityId {
        let restitution = self.options.interaction.restitution;
        let entity_id =
            self.registry
                .spawn_manipulable(transform, shape.clone(), restitution, color);
        self.physics.add(
            entity_id,
            &transform,
            &shape,
            BodyMode::Dynamic,
            Some(restitution),
        );
        self.registry
            .update_manipulable(entity_id, |manipulable| manipulable.in_physics = true);

        scene_log!(DEBUG, "spawned {:?} at {:?}", entity_id, transform.position);
        entity_id
    }

    /// Add walkable geometry. Static surfaces never move and are the only teleport targets.
    pub fn add_static_surface(
        &mut self,
        name: &str,
        transform: Transform,
        shape: ObjectShape,
    ) -> EntityId {
        let entity_id = self
            .registry
            .spawn_static_surface(name, transform, shape.clone());
        self.physics
            .add(entity_id, &transform, &shape, BodyMode::Static, None);

        scene_log!(DEBUG, "static surface {} as {:?}", name, entity_id);
        entity_id
    }

    /// Queue an edge event; it is applied during the next `update`.
    pub fn queue_event(&mut self, event: InputEvent) {
        self.input_queue.push(event);
    }

    /// Set a controller's world pose directly, for runtimes that do not go through an
    /// `InputContext`.
    pub fn set_controller_pose(&mut self, id: ControllerId, pose: Transform) {
        match self.controllers.get_mut(id.0) {
            Some(controller) => controller.pose = pose,
            None => interaction_log!(WARN, "pose for unknown {}", id),
        }
    }

    /// World transform of an object, following the holding controller if held.
    pub fn world_transform(&self, entity_id: EntityId) -> Option<Transform> {
        let prop = self.registry.transform(entity_id)?;
        match prop.parent {
            ParentSpace::World => Some(prop.transform),
            ParentSpace::Controller(id) => {
                let controller = self.controller(id)?;
                Some(controller.pose.compose(&prop.transform))
            }
        }
    }

    pub fn update(&mut self, time: &Time, input_context: &InputContext) -> Vec<Effect> {
        let delta_time = time.elapsed.as_secs_f32();
        let mut effects = Vec::new();

        self.apply_input_context(input_context);

        for controller in self.controllers.iter_mut() {
            let position = controller.pose.position;
            controller.tracker.sample(position, delta_time);
        }

        self.cull_fallen_objects(&mut effects);

        let target = self.teleport_system.update(
            &self.controllers,
            &self.registry.static_surface_entries(),
        );
        self.teleport_marker.track(target.as_ref());

        for event in self.input_queue.flush() {
            self.apply_event(event, &mut effects);
        }

        self.update_pick_feedback();

        profile!(
            scope: "physics", level: TRACE, "session.physics_step",
            self.physics.step(delta_time)
        );
        self.synchronize_physics_transforms();

        effects
    }

    fn apply_input_context(&mut self, input_context: &InputContext) {
        for (controller, hand) in self.controllers.iter_mut().zip(&input_context.hands) {
            controller.pose = self.reference_frame.tracked_to_world(&hand.pose());
        }

        for event in self.edge_detector.detect(input_context) {
            self.input_queue.push(event);
        }
    }

    fn cull_fallen_objects(&mut self, effects: &mut Vec<Effect>) {
        let cull_height = self.options.interaction.cull_height;

        for entity_id in self.registry.manipulable_ids() {
            let Some(manipulable) = self.registry.manipulable(entity_id) else {
                continue;
            };
            if manipulable.held_by.is_some() {
                continue;
            }
            let Some(prop) = self.registry.transform(entity_id) else {
                continue;
            };
            if prop.parent != ParentSpace::World || prop.transform.position.y > cull_height {
                continue;
            }

            if manipulable.in_physics {
                self.physics.remove(entity_id);
            }
            self.registry.despawn(entity_id);

            scene_log!(
                INFO,
                "culled {:?} at {:?}",
                entity_id,
                prop.transform.position
            );
            effects.push(Effect::ObjectCulled {
                entity_id,
                position: prop.transform.position,
            });
        }
    }

    fn apply_event(&mut self, event: InputEvent, effects: &mut Vec<Effect>) {
        let Some(controller) = self.controllers.get_mut(event.controller.0) else {
            interaction_log!(WARN, "dropping {:?}: unknown controller", event);
            return;
        };

        let mut ctx = ManipulationContext {
            registry: &self.registry,
            physics: self.physics.as_mut(),
            picker: &self.picker,
            options: &self.options.interaction,
        };

        let effect = match event.kind {
            InputEventKind::SelectStart => {
                controller.select_held = true;
                controller.select_start(&mut ctx)
            }
            InputEventKind::SelectEnd => {
                controller.select_held = false;
                controller.select_end(&mut ctx)
            }
            InputEventKind::SqueezeStart => {
                controller.squeeze_held = true;
                None
            }
            InputEventKind::SqueezeEnd => {
                controller.squeeze_held = false;
                self.teleport_system
                    .confirm(event.controller)
                    .map(|target| {
                        let offset = self.reference_frame.remap_to(target.position);
                        self.teleport_marker.track(None);
                        teleport_log!(
                            INFO,
                            "{} teleported to {:?}",
                            event.controller,
                            target.position
                        );
                        Effect::Teleported {
                            controller: event.controller,
                            target: target.position,
                            offset,
                        }
                    })
            }
        };

        if matches!(effect, Some(Effect::Teleported { .. })) {
            // Every world pose jumps with the reference frame; that jump is not hand motion.
            for controller in self.controllers.iter_mut() {
                controller.tracker.reset();
            }
        }

        effects.extend(effect);
    }

    fn update_pick_feedback(&mut self) {
        let pickable = self.registry.pickable_entries();
        for controller in self
            .controllers
            .iter_mut()
            .filter(|controller| controller.held_object().is_none())
        {
            let hits = self.picker.resolve(&controller.pose, &pickable);
            controller.feedback_length = self.picker.feedback_length(&hits);
        }
    }

    fn synchronize_physics_transforms(&mut self) {
        for entity_id in self.registry.manipulable_ids() {
            let in_physics = self
                .registry
                .manipulable(entity_id)
                .is_some_and(|manipulable| manipulable.in_physics);
            if !in_physics {
                continue;
            }

            if let Some(transform) = self.physics.transform(entity_id) {
                self.registry
                    .set_transform(entity_id, transform, ParentSpace::World);
            }
        }
    }

    pub fn render_state(&self) -> RenderState {
        let objects = self
            .registry
            .manipulable_ids()
            .into_iter()
            .filter_map(|entity_id| {
                let transform = self.world_transform(entity_id)?;
                let shape = self.registry.shape(entity_id)?;
                let appearance = self.registry.appearance(entity_id)?;
                let manipulable = self.registry.manipulable(entity_id)?;
                Some(RenderObject {
                    entity_id,
                    transform,
                    shape,
                    color: appearance.color,
                    emissive: appearance.emissive,
                    held_by: manipulable.held_by,
                })
            })
            .collect();

        let controllers = self
            .controllers
            .iter()
            .map(|controller| ControllerVisual {
                id: controller.id(),
                pose: controller.pose,
                laser_length: controller.feedback_length,
                held_object: controller.held_object(),
            })
            .collect();

        RenderState {
            objects,
            controllers,
            teleport_marker: self.teleport_marker,
            reference_offset: self.reference_frame.offset(),
        }
    }
}
