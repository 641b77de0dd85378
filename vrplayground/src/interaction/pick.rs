use cgmath::{InnerSpace, Vector3};
use ordered_float::OrderedFloat;
use shipyard::EntityId;

use crate::{transform::Transform, world::ObjectEntry};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub entity_id: EntityId,
    /// Distance from the ray origin along the ray.
    pub distance: f32,
    pub point: Vector3<f32>,
}

/// Cast a ray from `pose` along its forward axis against `entries`.
/// Hits come back nearest first; ties keep registry order.
pub fn cast_from_pose(pose: &Transform, entries: &[ObjectEntry], max_distance: f32) -> Vec<RayHit> {
    let origin = pose.position;
    let direction = pose.forward().normalize();

    let mut hits: Vec<RayHit> = entries
        .iter()
        .filter_map(|entry| {
            let distance = entry
                .shape
                .cast_ray(&entry.transform, origin, direction, max_distance)?;
            Some(RayHit {
                entity_id: entry.entity_id,
                distance,
                point: origin + direction * distance,
            })
        })
        .collect();

    hits.sort_by_key(|hit| OrderedFloat(hit.distance));
    hits
}

/// Ray picking against the manipulable objects.
#[derive(Clone, Debug)]
pub struct PickResolver {
    max_distance: f32,
    default_reach: f32,
}

impl PickResolver {
    pub fn new(max_distance: f32, default_reach: f32) -> Self {
        Self {
            max_distance,
            default_reach,
        }
    }

    pub fn resolve(&self, pose: &Transform, pickable: &[ObjectEntry]) -> Vec<RayHit> {
        cast_from_pose(pose, pickable, self.max_distance)
    }

    /// Laser length for a controller that is not holding anything.
    pub fn feedback_length(&self, hits: &[RayHit]) -> f32 {
        hits.first()
            .map(|hit| hit.distance)
            .unwrap_or(self.default_reach)
    }
}
