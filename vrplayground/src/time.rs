use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Time {
    /// Time since the previous frame.
    pub elapsed: Duration,
    /// Time since the first frame.
    pub total: Duration,
}

impl Time {
    pub fn from_seconds(elapsed: f32, total: f32) -> Self {
        Self {
            elapsed: Duration::from_secs_f32(elapsed.max(0.0)),
            total: Duration::from_secs_f32(total.max(0.0)),
        }
    }
}

/// Turns the display callback's timestamps into per-frame `Time`.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    total: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first tick reports zero elapsed time. A timestamp earlier than the previous one
    /// also reports zero.
    pub fn tick(&mut self, now: Instant) -> Time {
        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);
        self.total += elapsed;

        Time {
            elapsed,
            total: self.total,
        }
    }
}
