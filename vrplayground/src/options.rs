use cgmath::{Vector3, vec3};
use serde::{Deserialize, Serialize};

use crate::teleport::TeleportConfig;

/// Tunables for picking, holding and throwing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionOptions {
    /// Scale applied to the controller velocity when an object is released.
    pub throw_multiplier: f32,
    /// Laser length when the pointer ray hits nothing.
    pub default_reach: f32,
    /// Objects at or below this height are removed from the world.
    pub cull_height: f32,
    /// Pointer ray range. Unlimited unless configured.
    pub pick_max_distance: f32,
    /// Emissive tint of a held object (0x333333).
    pub held_emissive: [f32; 3],
    /// Restitution of bodies spawned through the session.
    pub restitution: f32,
}

impl InteractionOptions {
    pub fn held_emissive(&self) -> Vector3<f32> {
        Vector3::from(self.held_emissive)
    }
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            throw_multiplier: 3.0,
            default_reach: 1.5,
            cull_height: -5.0,
            pick_max_distance: f32::MAX,
            held_emissive: [0.2, 0.2, 0.2],
            restitution: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsOptions {
    pub gravity: [f32; 3],
}

impl PhysicsOptions {
    pub fn gravity(&self) -> Vector3<f32> {
        Vector3::from(self.gravity)
    }
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        let gravity = vec3(0.0, -9.81, 0.0);
        Self {
            gravity: gravity.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub interaction: InteractionOptions,
    pub teleport: TeleportConfig,
    pub physics: PhysicsOptions,
}

impl SessionOptions {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SessionOptions::default();
        assert_eq!(options.interaction.throw_multiplier, 3.0);
        assert_eq!(options.interaction.default_reach, 1.5);
        assert_eq!(options.interaction.cull_height, -5.0);
        assert_eq!(options.physics.gravity(), vec3(0.0, -9.81, 0.0));
        assert!(options.teleport.enabled);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = SessionOptions::from_json_str(
            r#"{ "interaction": { "throw_multiplier": 5.0 }, "teleport": { "enabled": false } }"#,
        )
        .unwrap();

        assert_eq!(options.interaction.throw_multiplier, 5.0);
        assert_eq!(options.interaction.default_reach, 1.5);
        assert!(!options.teleport.enabled);
        assert_eq!(options.teleport.max_distance, TeleportConfig::default().max_distance);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(SessionOptions::from_json_str("{ \"interaction\": 3 }").is_err());
    }
}
