// Controller interaction: velocity estimation, ray picking and the grab / release
// state machine that moves objects between the physics simulation and a controller.

pub mod controller;
pub mod input_event;
pub mod manipulation;
pub mod pick;
pub mod velocity_tracker;

pub use controller::{ControllerId, ControllerState};
pub use input_event::{InputEvent, InputEventKind, InputQueue};
pub use manipulation::{HoldState, ManipulationContext};
pub use pick::{PickResolver, RayHit, cast_from_pose};
pub use velocity_tracker::VelocityTracker;
