use cgmath::{Vector3, Zero};

/// Finite-difference velocity estimate for one tracked device.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    previous_position: Option<Vector3<f32>>,
    velocity: Option<Vector3<f32>>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current world position and the seconds elapsed since the last sample.
    /// The first sample and any sample with a non-positive (or NaN) delta yield zero.
    pub fn sample(&mut self, position: Vector3<f32>, delta_seconds: f32) -> Vector3<f32> {
        let velocity = match self.previous_position {
            Some(previous) if delta_seconds > 0.0 => (position - previous) / delta_seconds,
            _ => Vector3::zero(),
        };

        self.previous_position = Some(position);
        self.velocity = Some(velocity);
        velocity
    }

    /// Latest estimate, or `None` if no sample has been taken yet.
    pub fn velocity(&self) -> Option<Vector3<f32>> {
        self.velocity
    }

    pub fn previous_position(&self) -> Option<Vector3<f32>> {
        self.previous_position
    }

    pub fn reset(&mut self) {
        self.previous_position = None;
        self.velocity = None;
    }
}
