// Teleport locomotion
//
// The squeezing controller points at static geometry; the nearest hit becomes the pending
// target and is shown with a landing marker. Releasing the squeeze moves the player's
// reference frame so that the tracking origin sits on the target.

pub mod reference_frame;
pub mod teleport_marker;
pub mod teleport_system;

pub use reference_frame::ReferenceFrame;
pub use teleport_marker::{TeleportMarker, TeleportVisualStyle};
pub use teleport_system::{TeleportConfig, TeleportSystem, TeleportTarget};
