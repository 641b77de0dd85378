use cgmath::Vector3;

use crate::transform::Transform;

/// The session-wide offset between tracking space and world space.
///
/// A teleport installs `offset = -target` so that the tracking origin lands on the
/// target; the tracking layer reads it back to place the camera and controllers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReferenceFrame {
    offset: Transform,
}

impl ReferenceFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Transform {
        self.offset
    }

    /// Make `target` the new perceived origin. Orientation is not remapped.
    /// The offset is absolute, not accumulated onto the previous one.
    pub fn remap_to(&mut self, target: Vector3<f32>) -> Transform {
        self.offset = Transform::from_position(-target);
        self.offset
    }

    /// Tracking-space pose to world space under the current offset.
    pub fn tracked_to_world(&self, tracked: &Transform) -> Transform {
        self.offset.inverse().compose(tracked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Quaternion, vec3};

    #[test]
    fn test_remap_negates_target() {
        let mut frame = ReferenceFrame::new();
        let offset = frame.remap_to(vec3(3.0, 0.0, -2.0));

        assert_eq!(offset.position, vec3(-3.0, 0.0, 2.0));
        assert_eq!(offset.rotation, Quaternion::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(frame.offset(), offset);
    }

    #[test]
    fn test_tracking_origin_lands_on_target() {
        let mut frame = ReferenceFrame::new();
        frame.remap_to(vec3(3.0, 0.0, -2.0));

        let origin = frame.tracked_to_world(&Transform::identity());
        assert!((origin.position - vec3(3.0, 0.0, -2.0)).magnitude() < 1e-6);

        let hand = frame.tracked_to_world(&Transform::from_position(vec3(0.2, 1.0, 0.0)));
        assert!((hand.position - vec3(3.2, 1.0, -2.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_remap_is_absolute() {
        let mut frame = ReferenceFrame::new();
        frame.remap_to(vec3(3.0, 0.0, -2.0));
        frame.remap_to(vec3(1.0, 0.0, 1.0));

        assert_eq!(frame.offset().position, vec3(-1.0, 0.0, -1.0));
    }
}
