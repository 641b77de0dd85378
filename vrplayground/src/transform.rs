use cgmath::{Quaternion, Rotation, Vector3, Zero, vec3};

use crate::interaction::ControllerId;

/// Rigid transform (no scale) relative to some parent space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Transform {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::from_position(Vector3::zero())
    }

    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    /// The pointing direction of a tracked device: local -Z.
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation.rotate_vector(vec3(0.0, 0.0, -1.0))
    }

    /// `self * local`: express a transform given relative to `self` in `self`'s parent space.
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation.rotate_vector(local.position),
            rotation: self.rotation * local.rotation,
        }
    }

    pub fn inverse(&self) -> Transform {
        let inverse_rotation = self.rotation.conjugate();
        Transform {
            position: inverse_rotation.rotate_vector(-self.position),
            rotation: inverse_rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Which space an object's transform is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentSpace {
    World,
    Controller(ControllerId),
}

/// Re-express `transform` (relative to a parent whose world transform is `from_parent`)
/// relative to a parent whose world transform is `to_parent`. The world-space result is unchanged.
pub fn convert_between_spaces(
    transform: &Transform,
    from_parent: &Transform,
    to_parent: &Transform,
) -> Transform {
    to_parent.inverse().compose(&from_parent.compose(transform))
}
