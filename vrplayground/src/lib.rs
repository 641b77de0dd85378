pub mod effect;
pub mod input_context;
pub mod interaction;
pub mod options;
pub mod physics;
pub mod scenes;
pub mod session;
pub mod teleport;
pub mod time;
pub mod transform;
pub mod world;

#[cfg(test)]
mod test_util;

pub use effect::Effect;
pub use input_context::InputContext;
pub use options::SessionOptions;
pub use session::{RenderState, Session};
pub use time::{FrameClock, Time};
pub use transform::Transform;
