use cgmath::Vector3;
use engine::teleport_log;
use serde::{Deserialize, Serialize};
use shipyard::EntityId;

use crate::{
    interaction::{ControllerId, ControllerState, cast_from_pose},
    world::ObjectEntry,
};

/// Configuration for the teleport system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    pub enabled: bool,
    pub max_distance: f32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            enabled: true,
            max_distance: 20.0,
        }
    }
}

/// A point on static geometry the player would land on if the squeeze is released now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleportTarget {
    pub controller: ControllerId,
    pub position: Vector3<f32>,
    pub surface: EntityId,
    pub distance: f32,
}

/// Resolves the pending teleport target from whichever controller is squeezing.
pub struct TeleportSystem {
    config: TeleportConfig,
    pending_target: Option<TeleportTarget>,
}

impl TeleportSystem {
    pub fn new(config: TeleportConfig) -> Self {
        TeleportSystem {
            config,
            pending_target: None,
        }
    }

    /// Re-evaluate the pending target. Only the first squeezing controller (lowest id) casts;
    /// if its ray misses, there is no target this frame.
    pub fn update(
        &mut self,
        controllers: &[ControllerState],
        surfaces: &[ObjectEntry],
    ) -> Option<TeleportTarget> {
        if !self.config.enabled {
            self.pending_target = None;
            return None;
        }

        let previous = self.pending_target;
        self.pending_target = controllers
            .iter()
            .filter(|controller| controller.squeeze_held)
            .min_by_key(|controller| controller.id())
            .and_then(|controller| {
                let hits = cast_from_pose(&controller.pose, surfaces, self.config.max_distance);
                hits.first().map(|hit| TeleportTarget {
                    controller: controller.id(),
                    position: hit.point,
                    surface: hit.entity_id,
                    distance: hit.distance,
                })
            });

        if previous.is_some() != self.pending_target.is_some() {
            teleport_log!(DEBUG, "pending target changed: {:?}", self.pending_target);
        }

        self.pending_target
    }

    /// Squeeze released on `controller`: hands back the target to jump to, if that controller
    /// owned the pending one. Consumes the target.
    pub fn confirm(&mut self, controller: ControllerId) -> Option<TeleportTarget> {
        match self.pending_target {
            Some(target) if target.controller == controller => {
                self.pending_target = None;
                Some(target)
            }
            _ => None,
        }
    }

    /// Get current pending target for rendering/UI
    pub fn pending_target(&self) -> Option<TeleportTarget> {
        self.pending_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        transform::{ParentSpace, Transform},
        world::ObjectShape,
    };
    use cgmath::{Deg, InnerSpace, Quaternion, Rotation3, vec3};
    use shipyard::World;

    fn floor() -> Vec<ObjectEntry> {
        let mut world = World::new();
        vec![ObjectEntry {
            entity_id: world.add_entity(()),
            transform: Transform::from_position(vec3(0.0, -0.1, 0.0)),
            parent: ParentSpace::World,
            shape: ObjectShape::cuboid(vec3(10.0, 0.2, 10.0)),
        }]
    }

    /// Controller at `origin` pointing straight down.
    fn pointing_down(id: usize, origin: Vector3<f32>) -> ControllerState {
        let mut controller = ControllerState::new(ControllerId(id), 1.5);
        controller.pose = Transform::new(origin, Quaternion::from_angle_x(Deg(-90.0)));
        controller
    }

    #[test]
    fn test_no_squeeze_no_target() {
        let mut system = TeleportSystem::new(TeleportConfig::default());
        let controllers = vec![pointing_down(0, vec3(1.0, 1.0, 1.0))];

        assert!(system.update(&controllers, &floor()).is_none());
        assert!(system.pending_target().is_none());
    }

    #[test]
    fn test_squeezing_controller_hits_floor() {
        let mut system = TeleportSystem::new(TeleportConfig::default());
        let mut controllers = vec![pointing_down(0, vec3(3.0, 1.5, -2.0))];
        controllers[0].squeeze_held = true;

        let target = system.update(&controllers, &floor()).unwrap();
        assert_eq!(target.controller, ControllerId(0));
        assert!((target.position - vec3(3.0, 0.0, -2.0)).magnitude() < 1e-4);
        assert!((target.distance - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_lowest_controller_wins_when_both_squeeze() {
        let mut system = TeleportSystem::new(TeleportConfig::default());
        let mut controllers = vec![
            pointing_down(0, vec3(1.0, 1.0, 1.0)),
            pointing_down(1, vec3(-2.0, 1.0, -2.0)),
        ];
        controllers[0].squeeze_held = true;
        controllers[1].squeeze_held = true;

        let target = system.update(&controllers, &floor()).unwrap();
        assert_eq!(target.controller, ControllerId(0));
        assert!((target.position - vec3(1.0, 0.0, 1.0)).magnitude() < 1e-4);

        // Precedence does not depend on slice order.
        controllers.reverse();
        let target = system.update(&controllers, &floor()).unwrap();
        assert_eq!(target.controller, ControllerId(0));
    }

    #[test]
    fn test_missing_ray_clears_target() {
        let mut system = TeleportSystem::new(TeleportConfig::default());
        let mut controllers = vec![pointing_down(0, vec3(0.0, 1.0, 0.0))];
        controllers[0].squeeze_held = true;
        assert!(system.update(&controllers, &floor()).is_some());

        // Pointing at the sky.
        controllers[0].pose.rotation = Quaternion::from_angle_x(Deg(90.0));
        assert!(system.update(&controllers, &floor()).is_none());
    }

    #[test]
    fn test_confirm_only_for_owning_controller() {
        let mut system = TeleportSystem::new(TeleportConfig::default());
        let mut controllers = vec![
            pointing_down(0, vec3(0.0, 1.0, 0.0)),
            pointing_down(1, vec3(2.0, 1.0, 0.0)),
        ];
        controllers[0].squeeze_held = true;
        controllers[1].squeeze_held = true;
        system.update(&controllers, &floor());

        assert!(system.confirm(ControllerId(1)).is_none());
        assert!(system.pending_target().is_some());

        let target = system.confirm(ControllerId(0)).unwrap();
        assert_eq!(target.controller, ControllerId(0));
        assert!(system.pending_target().is_none());
        assert!(system.confirm(ControllerId(0)).is_none());
    }

    #[test]
    fn test_disabled_never_targets() {
        let mut system = TeleportSystem::new(TeleportConfig {
            enabled: false,
            ..TeleportConfig::default()
        });
        let mut controllers = vec![pointing_down(0, vec3(0.0, 1.0, 0.0))];
        controllers[0].squeeze_held = true;

        assert!(system.update(&controllers, &floor()).is_none());
    }
}
