use std::collections::VecDeque;

use super::ControllerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEventKind {
    SelectStart,
    SelectEnd,
    SqueezeStart,
    SqueezeEnd,
}

/// Edge-triggered controller event, as delivered by the tracking layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub controller: ControllerId,
    pub kind: InputEventKind,
}

impl InputEvent {
    pub fn new(controller: ControllerId, kind: InputEventKind) -> Self {
        Self { controller, kind }
    }
}

/// Events arrive whenever the device layer produces them and are applied once per frame,
/// in arrival order.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn flush(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }
}
