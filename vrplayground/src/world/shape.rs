use cgmath::Vector3;
use rapier3d::{
    na::{Isometry3, Translation3},
    parry::{
        query::{Ray, RayCast},
        shape::{Ball, Cuboid},
    },
    prelude::SharedShape,
};

use crate::{
    physics::util::{quat_to_nquat, vec_to_npoint, vec_to_nvec},
    transform::Transform,
};

/// Collision and picking geometry of an object, relative to the object's own transform.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectShape {
    Ball { radius: f32 },
    Cuboid { half_extents: Vector3<f32> },
    Compound(Vec<ShapePart>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapePart {
    pub offset: Transform,
    pub shape: ObjectShape,
}

impl ObjectShape {
    pub fn ball(radius: f32) -> Self {
        ObjectShape::Ball { radius }
    }

    /// Box with full side lengths `size`.
    pub fn cuboid(size: Vector3<f32>) -> Self {
        ObjectShape::Cuboid {
            half_extents: size * 0.5,
        }
    }

    /// True when there is no solid part at all, e.g. a compound of empty compounds.
    pub fn is_empty(&self) -> bool {
        match self {
            ObjectShape::Compound(parts) => parts.iter().all(|part| part.shape.is_empty()),
            _ => false,
        }
    }

    /// Distance along `direction` (unit length) from `origin` to the nearest surface of this
    /// shape placed at `transform`. Compound shapes are searched part by part.
    pub fn cast_ray(
        &self,
        transform: &Transform,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<f32> {
        match self {
            ObjectShape::Ball { radius } => {
                let ray = Ray::new(vec_to_npoint(origin), vec_to_nvec(direction));
                Ball::new(*radius).cast_ray(&to_isometry(transform), &ray, max_distance, true)
            }
            ObjectShape::Cuboid { half_extents } => {
                let ray = Ray::new(vec_to_npoint(origin), vec_to_nvec(direction));
                Cuboid::new(vec_to_nvec(*half_extents)).cast_ray(
                    &to_isometry(transform),
                    &ray,
                    max_distance,
                    true,
                )
            }
            ObjectShape::Compound(parts) => parts
                .iter()
                .filter_map(|part| {
                    part.shape.cast_ray(
                        &transform.compose(&part.offset),
                        origin,
                        direction,
                        max_distance,
                    )
                })
                .min_by(f32::total_cmp),
        }
    }

    /// Shape handed to the physics engine. Nested compounds are flattened since the
    /// engine only accepts a single level of composition.
    pub fn to_shared_shape(&self) -> SharedShape {
        match self {
            ObjectShape::Ball { radius } => SharedShape::ball(*radius),
            ObjectShape::Cuboid { half_extents } => {
                SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            ObjectShape::Compound(_) => {
                let mut leaves = Vec::new();
                self.collect_leaves(&Transform::identity(), &mut leaves);
                SharedShape::compound(
                    leaves
                        .into_iter()
                        .map(|(offset, shape)| (to_isometry(&offset), shape.to_shared_shape()))
                        .collect(),
                )
            }
        }
    }

    fn collect_leaves<'a>(&'a self, offset: &Transform, out: &mut Vec<(Transform, &'a ObjectShape)>) {
        match self {
            ObjectShape::Compound(parts) => {
                for part in parts {
                    part.shape
                        .collect_leaves(&offset.compose(&part.offset), out);
                }
            }
            leaf => out.push((*offset, leaf)),
        }
    }
}

pub(crate) fn to_isometry(transform: &Transform) -> Isometry3<f32> {
    let translation = vec_to_nvec(transform.position);
    Isometry3::from_parts(
        Translation3::new(translation.x, translation.y, translation.z),
        quat_to_nquat(transform.rotation),
    )
}
