// Input context is an abstraction layer over the motion controllers that the runtime provides.
// Poses are in tracking space; the session maps them to world space through the
// current reference frame offset. Analog trigger / squeeze values are turned into
// edge events by `InputEdgeDetector`.

use cgmath::{Quaternion, Vector3, Zero};
use engine::input_log;

use crate::{
    interaction::{ControllerId, InputEvent, InputEventKind},
    transform::Transform,
};

/// Analog value at which a trigger or grip counts as pressed.
pub const BUTTON_THRESHOLD: f32 = 0.5;

#[derive(Clone, Debug)]
pub struct InputContext {
    pub head: Head,
    /// One entry per tracked controller, indexed by `ControllerId`.
    pub hands: Vec<Hand>,
}

impl InputContext {
    /// No tracked devices; controller poses stay where they were set.
    pub fn empty() -> InputContext {
        InputContext {
            head: Head::default(),
            hands: Vec::new(),
        }
    }

    pub fn with_hands(count: usize) -> InputContext {
        InputContext {
            head: Head::default(),
            hands: vec![Hand::default(); count],
        }
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Clone, Debug)]
pub struct Head {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Head {
    fn default() -> Head {
        Head {
            position: Vector3::zero(),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

// Context for an individual hand (motion controller)
#[derive(Clone, Debug)]
pub struct Hand {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub trigger_value: f32,
    pub squeeze_value: f32,
}

impl Hand {
    pub fn pose(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }
}

impl Default for Hand {
    fn default() -> Hand {
        Hand {
            position: Vector3::zero(),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            trigger_value: 0.0,
            squeeze_value: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct ButtonState {
    was_trigger_pressed: bool,
    was_squeeze_pressed: bool,
}

/// Tracks the previous analog state per hand and reports press / release transitions.
#[derive(Clone, Debug, Default)]
pub struct InputEdgeDetector {
    buttons: Vec<ButtonState>,
}

impl InputEdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detect(&mut self, input_context: &InputContext) -> Vec<InputEvent> {
        if self.buttons.len() < input_context.hands.len() {
            self.buttons
                .resize(input_context.hands.len(), ButtonState::default());
        }

        let mut events = Vec::new();
        for (index, hand) in input_context.hands.iter().enumerate() {
            let controller = ControllerId(index);
            let state = &mut self.buttons[index];

            let is_trigger_pressed = hand.trigger_value >= BUTTON_THRESHOLD;
            if is_trigger_pressed != state.was_trigger_pressed {
                let kind = if is_trigger_pressed {
                    InputEventKind::SelectStart
                } else {
                    InputEventKind::SelectEnd
                };
                events.push(InputEvent::new(controller, kind));
            }
            state.was_trigger_pressed = is_trigger_pressed;

            let is_squeeze_pressed = hand.squeeze_value >= BUTTON_THRESHOLD;
            if is_squeeze_pressed != state.was_squeeze_pressed {
                let kind = if is_squeeze_pressed {
                    InputEventKind::SqueezeStart
                } else {
                    InputEventKind::SqueezeEnd
                };
                events.push(InputEvent::new(controller, kind));
            }
            state.was_squeeze_pressed = is_squeeze_pressed;
        }

        if !events.is_empty() {
            input_log!(DEBUG, "analog edges: {:?}", events);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_produce_single_edges() {
        let mut detector = InputEdgeDetector::new();
        let mut input = InputContext::with_hands(2);

        assert!(detector.detect(&input).is_empty());

        input.hands[1].trigger_value = 0.9;
        assert_eq!(
            detector.detect(&input),
            vec![InputEvent::new(ControllerId(1), InputEventKind::SelectStart)]
        );
        // Held: no repeat.
        assert!(detector.detect(&input).is_empty());

        input.hands[1].trigger_value = 0.1;
        input.hands[0].squeeze_value = 1.0;
        assert_eq!(
            detector.detect(&input),
            vec![
                InputEvent::new(ControllerId(0), InputEventKind::SqueezeStart),
                InputEvent::new(ControllerId(1), InputEventKind::SelectEnd),
            ]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut detector = InputEdgeDetector::new();
        let mut input = InputContext::with_hands(1);
        input.hands[0].squeeze_value = BUTTON_THRESHOLD;

        assert_eq!(
            detector.detect(&input),
            vec![InputEvent::new(ControllerId(0), InputEventKind::SqueezeStart)]
        );
    }
}
