// Scripted controller track used in place of a headset.
//
// Hand 0 waits for the scene to settle, points at the nearest object, grabs it, swings
// to the right and lets go. Hand 1 then squeezes and points at the floor ahead to teleport.

use cgmath::{InnerSpace, Quaternion, Vector3, vec3};
use vrplayground::{InputContext, RenderState, Transform};

const SETTLE_FRAMES: u32 = 60;
const SWING_FRAMES: u32 = 20;
const PAUSE_FRAMES: u32 = 20;
const TELEPORT_FRAMES: u32 = 20;

const HAND_HEIGHT: f32 = 1.2;
const FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);

pub struct ControllerScript {
    grab_direction: Vector3<f32>,
}

impl ControllerScript {
    pub fn new() -> Self {
        ControllerScript {
            grab_direction: FORWARD,
        }
    }

    /// Number of frames the whole script needs.
    pub fn length() -> u32 {
        SETTLE_FRAMES + SWING_FRAMES + PAUSE_FRAMES + TELEPORT_FRAMES + 1
    }

    /// Input for `frame`, given what the scene looked like after the previous one.
    pub fn input_for_frame(&mut self, frame: u32, state: &RenderState) -> InputContext {
        let mut input = InputContext::with_hands(2);
        let hand_origin = vec3(0.0, HAND_HEIGHT, 0.0);
        input.hands[0].position = hand_origin;
        input.hands[1].position = vec3(0.3, HAND_HEIGHT, 0.0);

        let swing_start = SETTLE_FRAMES;
        let swing_end = swing_start + SWING_FRAMES;
        let teleport_start = swing_end + PAUSE_FRAMES;
        let teleport_end = teleport_start + TELEPORT_FRAMES;

        if frame == swing_start {
            // Aim from where the hand is in world space, i.e. after any earlier teleport.
            let hand_world = state
                .reference_offset
                .inverse()
                .compose(&Transform::from_position(hand_origin));
            if let Some(direction) = nearest_direction(hand_world.position, state) {
                self.grab_direction = direction;
            }
        }

        if (swing_start..swing_end).contains(&frame) {
            let progress = (frame - swing_start) as f32 / SWING_FRAMES as f32;
            input.hands[0].position = hand_origin + vec3(progress * 0.6, 0.0, 0.0);
            input.hands[0].rotation = look_along(self.grab_direction);
            input.hands[0].trigger_value = 1.0;
        }

        if (teleport_start..=teleport_end).contains(&frame) {
            input.hands[1].rotation = look_along(vec3(0.0, -1.0, -1.5));
            input.hands[1].squeeze_value = if frame < teleport_end { 1.0 } else { 0.0 };
        }

        input
    }
}

fn nearest_direction(from: Vector3<f32>, state: &RenderState) -> Option<Vector3<f32>> {
    state
        .objects
        .iter()
        .map(|object| object.transform.position - from)
        .filter(|offset| offset.magnitude2() > f32::EPSILON)
        .min_by(|a, b| a.magnitude2().total_cmp(&b.magnitude2()))
        .map(|offset| offset.normalize())
}

fn look_along(direction: Vector3<f32>) -> Quaternion<f32> {
    Quaternion::from_arc(FORWARD, direction.normalize(), None)
}
