pub mod playground;

pub use playground::{Playground, PlaygroundBuilder};
