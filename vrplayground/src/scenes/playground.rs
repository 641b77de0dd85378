use cgmath::{Vector3, vec3};
use engine::scene_log;
use rand::{Rng, SeedableRng, rngs::StdRng};
use shipyard::EntityId;

use crate::{session::Session, transform::Transform, world::ObjectShape};

const FLOOR_SIZE: Vector3<f32> = Vector3::new(10.0, 0.2, 10.0);
const SPHERE_RADIUS: f32 = 0.2;
const BOX_SIZE: f32 = 0.5;
const BOX_SPREAD: f32 = 8.0;

/// Handles to everything the builder put into the session.
#[derive(Clone, Debug)]
pub struct Playground {
    pub floor: EntityId,
    pub spheres: Vec<EntityId>,
    pub boxes: Vec<EntityId>,
}

/// The default scene: a floor to walk on, three stacked spheres and a handful of
/// boxes dropped at random spots.
pub struct PlaygroundBuilder {
    seed: u64,
    box_count: usize,
}

impl PlaygroundBuilder {
    pub fn new() -> Self {
        Self {
            seed: 0,
            box_count: 5,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_box_count(mut self, box_count: usize) -> Self {
        self.box_count = box_count;
        self
    }

    pub fn build(self, session: &mut Session) -> Playground {
        let floor = session.add_static_surface(
            "floor",
            Transform::from_position(vec3(0.0, -FLOOR_SIZE.y / 2.0, 0.0)),
            ObjectShape::cuboid(FLOOR_SIZE),
        );

        let spheres = [
            (vec3(0.0, 3.0, 0.0), vec3(1.0, 0.0, 0.0)),
            (vec3(1.0, 5.0, 0.0), vec3(0.0, 1.0, 0.0)),
            (vec3(2.0, 7.0, 0.0), vec3(0.0, 0.0, 1.0)),
        ]
        .into_iter()
        .map(|(position, color)| {
            session.spawn_object(
                Transform::from_position(position),
                ObjectShape::ball(SPHERE_RADIUS),
                color,
            )
        })
        .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let half_spread = BOX_SPREAD / 2.0;
        let boxes = (0..self.box_count)
            .map(|i| {
                let position = vec3(
                    rng.gen_range(-half_spread..half_spread),
                    1.5 + i as f32 * 0.5,
                    rng.gen_range(-half_spread..half_spread),
                );
                let color = vec3(
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                );
                session.spawn_object(
                    Transform::from_position(position),
                    ObjectShape::cuboid(vec3(BOX_SIZE, BOX_SIZE, BOX_SIZE)),
                    color,
                )
            })
            .collect::<Vec<_>>();

        scene_log!(
            INFO,
            "playground built: seed {}, {} boxes",
            self.seed,
            boxes.len()
        );

        Playground {
            floor,
            spheres,
            boxes,
        }
    }
}

impl Default for PlaygroundBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input_context::InputContext, options::SessionOptions, physics::BodyMode,
        test_util::{PhysicsCall, RecordingPhysics}, time::Time,
    };

    fn recording_session() -> (Session, RecordingPhysics) {
        let physics = RecordingPhysics::new();
        let session = Session::new(SessionOptions::default(), Box::new(physics.clone()), 2);
        (session, physics)
    }

    #[test]
    fn test_builds_floor_spheres_and_boxes() {
        let (mut session, physics) = recording_session();
        let playground = PlaygroundBuilder::new().build(&mut session);

        assert_eq!(playground.spheres.len(), 3);
        assert_eq!(playground.boxes.len(), 5);
        assert_eq!(session.registry().manipulable_ids().len(), 8);
        assert_eq!(
            session.registry().static_surface_name(playground.floor).as_deref(),
            Some("floor")
        );

        let calls = physics.calls();
        assert!(matches!(
            calls[0],
            PhysicsCall::Add { mode: BodyMode::Static, restitution: None, .. }
        ));
        assert!(calls[1..].iter().all(|call| matches!(
            call,
            PhysicsCall::Add { mode: BodyMode::Dynamic, restitution: Some(r), .. } if *r == 0.2
        )));
    }

    #[test]
    fn test_sphere_layout() {
        let (mut session, _physics) = recording_session();
        let playground = PlaygroundBuilder::new().build(&mut session);

        let positions: Vec<_> = playground
            .spheres
            .iter()
            .map(|id| session.world_transform(*id).unwrap().position)
            .collect();
        assert_eq!(
            positions,
            vec![vec3(0.0, 3.0, 0.0), vec3(1.0, 5.0, 0.0), vec3(2.0, 7.0, 0.0)]
        );
        assert_eq!(
            session.registry().appearance(playground.spheres[1]).unwrap().color,
            vec3(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_boxes_stack_up_inside_spread() {
        let (mut session, _physics) = recording_session();
        let playground = PlaygroundBuilder::new().with_seed(7).build(&mut session);

        for (i, id) in playground.boxes.iter().enumerate() {
            let position = session.world_transform(*id).unwrap().position;
            assert_eq!(position.y, 1.5 + i as f32 * 0.5);
            assert!(position.x.abs() <= 4.0 && position.z.abs() <= 4.0);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let layout = |seed| {
            let (mut session, _physics) = recording_session();
            let playground = PlaygroundBuilder::new().with_seed(seed).build(&mut session);
            playground
                .boxes
                .iter()
                .map(|id| session.world_transform(*id).unwrap().position)
                .collect::<Vec<_>>()
        };

        assert_eq!(layout(42), layout(42));
        assert_ne!(layout(42), layout(43));
    }

    #[test]
    fn test_nothing_culled_on_first_frame() {
        let (mut session, _physics) = recording_session();
        PlaygroundBuilder::new().with_box_count(2).build(&mut session);

        let effects = session.update(&Time::from_seconds(0.016, 0.016), &InputContext::empty());
        assert!(effects.is_empty());
        assert_eq!(session.registry().manipulable_ids().len(), 5);
    }
}
