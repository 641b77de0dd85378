use cgmath::{Quaternion, Vector3, vec3};
use rapier3d::{
    na::{self, UnitQuaternion},
    prelude::*,
};

use crate::transform::Transform;

pub fn nvec_to_cgmath(vec: Vector<Real>) -> Vector3<f32> {
    Vector3 {
        x: vec.x,
        y: vec.y,
        z: vec.z,
    }
}

pub fn vec_to_npoint(vec: Vector3<f32>) -> Point<Real> {
    point![vec.x, vec.y, vec.z]
}

pub fn vec_to_nvec(vec: Vector3<f32>) -> Vector<Real> {
    vector![vec.x, vec.y, vec.z]
}

pub fn nquat_to_quat(quat: UnitQuaternion<f32>) -> Quaternion<f32> {
    Quaternion {
        v: vec3(quat.i, quat.j, quat.k),

        s: quat.w,
    }
}

pub fn quat_to_nquat(facing: Quaternion<f32>) -> UnitQuaternion<f32> {
    let nquat = na::geometry::Quaternion::new(facing.s, facing.v.x, facing.v.y, facing.v.z);
    UnitQuaternion::from_quaternion(nquat)
}

pub fn isometry_to_transform(isometry: &Isometry<Real>) -> Transform {
    Transform::new(
        nvec_to_cgmath(isometry.translation.vector),
        nquat_to_quat(isometry.rotation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, InnerSpace, Rotation3};

    #[test]
    fn test_quaternion_round_trip_keeps_rotation() {
        let rotation = Quaternion::from_angle_y(Deg(40.0));
        let back = nquat_to_quat(quat_to_nquat(rotation));
        assert!((back - rotation).magnitude() < 1e-5);
    }

    #[test]
    fn test_isometry_to_transform() {
        let isometry = Isometry::translation(1.0, 2.0, 3.0);
        let transform = isometry_to_transform(&isometry);
        assert_eq!(transform.position, vec3(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quaternion::new(1.0, 0.0, 0.0, 0.0));
    }
}
