// Object registry
//
// Everything the interaction code touches lives in one shipyard `World`:
// manipulable objects (pickable, throwable, culled when they fall out of the world)
// and static surfaces (teleport destinations, never moved).

pub mod shape;

pub use shape::{ObjectShape, ShapePart};

use cgmath::{Vector3, Zero};
use shipyard::{Component, EntityId, Get, IntoIter, IntoWithId, View, ViewMut, World};

use crate::{
    interaction::ControllerId,
    transform::{ParentSpace, Transform},
};

/// Transform of an entity, relative to `parent`.
#[derive(Component, Clone, Copy, Debug)]
pub struct PropTransform {
    pub transform: Transform,
    pub parent: ParentSpace,
}

#[derive(Component, Clone, Debug)]
pub struct PropShape(pub ObjectShape);

#[derive(Component, Clone, Copy, Debug)]
pub struct PropManipulable {
    pub restitution: f32,
    pub in_physics: bool,
    pub held_by: Option<ControllerId>,
}

#[derive(Component, Clone, Copy, Debug)]
pub struct PropAppearance {
    pub color: Vector3<f32>,
    pub emissive: Vector3<f32>,
}

#[derive(Component, Clone, Debug)]
pub struct PropStaticSurface {
    pub name: String,
}

/// Read-only view of one registry entry, handed to pickers and the presentation layer.
#[derive(Clone, Debug)]
pub struct ObjectEntry {
    pub entity_id: EntityId,
    pub transform: Transform,
    pub parent: ParentSpace,
    pub shape: ObjectShape,
}

pub struct ObjectRegistry {
    world: World,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
        }
    }

    pub fn spawn_manipulable(
        &mut self,
        transform: Transform,
        shape: ObjectShape,
        restitution: f32,
        color: Vector3<f32>,
    ) -> EntityId {
        self.world.add_entity((
            PropTransform {
                transform,
                parent: ParentSpace::World,
            },
            PropShape(shape),
            PropManipulable {
                restitution,
                in_physics: false,
                held_by: None,
            },
            PropAppearance {
                color,
                emissive: Vector3::zero(),
            },
        ))
    }

    pub fn spawn_static_surface(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        shape: ObjectShape,
    ) -> EntityId {
        self.world.add_entity((
            PropTransform {
                transform,
                parent: ParentSpace::World,
            },
            PropShape(shape),
            PropStaticSurface { name: name.into() },
        ))
    }

    /// Remove an entity and all of its components. Returns false if it was already gone.
    pub fn despawn(&mut self, entity_id: EntityId) -> bool {
        self.world.delete_entity(entity_id)
    }

    pub fn manipulable_ids(&self) -> Vec<EntityId> {
        self.world.run(|v_manipulable: View<PropManipulable>| {
            v_manipulable.iter().with_id().map(|(id, _)| id).collect()
        })
    }

    pub fn contains_manipulable(&self, entity_id: EntityId) -> bool {
        self.manipulable(entity_id).is_some()
    }

    pub fn manipulable(&self, entity_id: EntityId) -> Option<PropManipulable> {
        self.world.run(|v_manipulable: View<PropManipulable>| {
            v_manipulable.get(entity_id).ok().copied()
        })
    }

    pub fn update_manipulable(&self, entity_id: EntityId, update: impl FnOnce(&mut PropManipulable)) {
        self.world.run(|mut v_manipulable: ViewMut<PropManipulable>| {
            if let Ok(manipulable) = (&mut v_manipulable).get(entity_id) {
                update(manipulable);
            }
        });
    }

    pub fn transform(&self, entity_id: EntityId) -> Option<PropTransform> {
        self.world.run(|v_transform: View<PropTransform>| {
            v_transform.get(entity_id).ok().copied()
        })
    }

    pub fn set_transform(&self, entity_id: EntityId, transform: Transform, parent: ParentSpace) {
        self.world.run(|mut v_transform: ViewMut<PropTransform>| {
            if let Ok(prop) = (&mut v_transform).get(entity_id) {
                prop.transform = transform;
                prop.parent = parent;
            }
        });
    }

    pub fn shape(&self, entity_id: EntityId) -> Option<ObjectShape> {
        self.world
            .run(|v_shape: View<PropShape>| v_shape.get(entity_id).ok().map(|s| s.0.clone()))
    }

    pub fn appearance(&self, entity_id: EntityId) -> Option<PropAppearance> {
        self.world.run(|v_appearance: View<PropAppearance>| {
            v_appearance.get(entity_id).ok().copied()
        })
    }

    pub fn set_emissive(&self, entity_id: EntityId, emissive: Vector3<f32>) {
        self.world.run(|mut v_appearance: ViewMut<PropAppearance>| {
            if let Ok(appearance) = (&mut v_appearance).get(entity_id) {
                appearance.emissive = emissive;
            }
        });
    }

    /// Manipulable objects that sit in world space, i.e. the ones not currently held.
    pub fn pickable_entries(&self) -> Vec<ObjectEntry> {
        self.world.run(
            |v_transform: View<PropTransform>,
             v_shape: View<PropShape>,
             v_manipulable: View<PropManipulable>| {
                (&v_transform, &v_shape, &v_manipulable)
                    .iter()
                    .with_id()
                    .filter(|(_, (prop, _, manipulable))| {
                        prop.parent == ParentSpace::World && manipulable.held_by.is_none()
                    })
                    .map(|(entity_id, (prop, shape, _))| ObjectEntry {
                        entity_id,
                        transform: prop.transform,
                        parent: prop.parent,
                        shape: shape.0.clone(),
                    })
                    .collect()
            },
        )
    }

    pub fn static_surface_entries(&self) -> Vec<ObjectEntry> {
        self.world.run(
            |v_transform: View<PropTransform>,
             v_shape: View<PropShape>,
             v_surface: View<PropStaticSurface>| {
                (&v_transform, &v_shape, &v_surface)
                    .iter()
                    .with_id()
                    .map(|(entity_id, (prop, shape, _))| ObjectEntry {
                        entity_id,
                        transform: prop.transform,
                        parent: prop.parent,
                        shape: shape.0.clone(),
                    })
                    .collect()
            },
        )
    }

    pub fn static_surface_name(&self, entity_id: EntityId) -> Option<String> {
        self.world.run(|v_surface: View<PropStaticSurface>| {
            v_surface.get(entity_id).ok().map(|s| s.name.clone())
        })
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
