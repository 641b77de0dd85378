use cgmath::{Vector3, vec3};

use super::TeleportTarget;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleportVisualStyle {
    pub target_color: Vector3<f32>,
    pub landing_scale: Vector3<f32>,
    pub landing_height_offset: f32,
}

impl Default for TeleportVisualStyle {
    fn default() -> Self {
        Self {
            target_color: vec3(0.1, 0.9, 1.0),
            landing_scale: vec3(0.5, 0.02, 0.5),
            // Keeps the disc from z-fighting with the floor
            landing_height_offset: 0.02,
        }
    }
}

/// Landing indicator shown at the pending teleport target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleportMarker {
    pub visible: bool,
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
    pub scale: Vector3<f32>,
    style: TeleportVisualStyle,
}

impl TeleportMarker {
    pub fn new(style: TeleportVisualStyle) -> Self {
        Self {
            visible: false,
            position: vec3(0.0, 0.0, 0.0),
            color: style.target_color,
            scale: style.landing_scale,
            style,
        }
    }

    /// Follow the pending target, or hide. The last position is kept while hidden.
    pub fn track(&mut self, target: Option<&TeleportTarget>) {
        match target {
            Some(target) => {
                self.visible = true;
                self.position = target.position + vec3(0.0, self.style.landing_height_offset, 0.0);
            }
            None => self.visible = false,
        }
    }
}

impl Default for TeleportMarker {
    fn default() -> Self {
        Self::new(TeleportVisualStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::ControllerId;
    use shipyard::World;

    #[test]
    fn test_marker_follows_target_and_hides() {
        let mut world = World::new();
        let surface = world.add_entity(());
        let mut marker = TeleportMarker::default();
        assert!(!marker.visible);

        let target = TeleportTarget {
            controller: ControllerId(0),
            position: vec3(2.0, 0.0, 1.0),
            surface,
            distance: 3.0,
        };
        marker.track(Some(&target));
        assert!(marker.visible);
        assert_eq!(marker.position, vec3(2.0, 0.02, 1.0));

        marker.track(None);
        assert!(!marker.visible);
        assert_eq!(marker.position, vec3(2.0, 0.02, 1.0));
    }
}
