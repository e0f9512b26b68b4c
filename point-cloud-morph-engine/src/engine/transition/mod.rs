//! Per-point transition engine driving the cloud between target shapes.
//!
//! ## Frame Order
//!
//! ```text
//! poll_auto_cycle       (Running only, optional policy)
//!   └─> apply_trigger_events   retarget all P trajectories at once
//!         └─> advance_transitions   one pass over the trajectory arena
//!               └─> sync_point_cloud_mesh (render plugin, when dirty)
//! ```
//!
//! Triggers arrive as [`TriggerShapeEvent`]s from the picker, the web RPC
//! bridge, the start-up transition and the auto-cycle policy. A trigger that
//! lands while points are still moving replaces every trajectory, each one
//! restarting from the point's live position.

/// Easing curves applied to trajectory progress.
pub mod easing;

/// Trigger events and the systems applying them each frame.
pub mod systems;

/// The trajectory arena, shape registry and auto-cycle policy.
pub mod transition_engine;

/// Single-point animation state.
pub mod trajectory;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::point_cloud::PointCloud;

pub use systems::{
    ShapeChangedEvent, TriggerShapeEvent, TriggerSource, advance_transitions,
    apply_trigger_events, poll_auto_cycle,
};
pub use transition_engine::{TransitionEngine, TransitionSettings};

/// Registers trigger events and the per-frame transition systems. The systems
/// wait until the loading stage inserted the engine and the point cloud.
pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TriggerShapeEvent>()
            .add_event::<ShapeChangedEvent>()
            .add_systems(
                Update,
                (
                    poll_auto_cycle.run_if(in_state(AppState::Running)),
                    apply_trigger_events,
                    advance_transitions,
                )
                    .chain()
                    .run_if(resource_exists::<TransitionEngine>)
                    .run_if(resource_exists::<PointCloud>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::shape_set::ShapeId;
    use bevy::time::TimeUpdateStrategy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn test_app(engine: TransitionEngine, cloud: PointCloud) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransitionPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(engine)
            .insert_resource(cloud);
        app
    }

    fn fixed_settings() -> TransitionSettings {
        TransitionSettings {
            min_duration: Duration::from_millis(300),
            max_duration: Duration::from_millis(300),
            easing: easing::Easing::ExponentialIn,
            auto_cycle: None,
        }
    }

    #[test]
    fn trigger_events_morph_the_cloud_over_frames() {
        let mut engine = TransitionEngine::new(5, fixed_settings(), StdRng::seed_from_u64(3));
        engine
            .register_shape_data(
                ShapeId::Cube,
                vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)],
            )
            .unwrap();
        let mut app = test_app(engine, PointCloud::initialize(5, |_| Vec3::ZERO));

        app.world_mut().send_event(TriggerShapeEvent {
            shape: ShapeId::Cube,
            source: TriggerSource::Pointer,
        });
        for _ in 0..10 {
            app.update();
        }

        let cloud = app.world().resource::<PointCloud>();
        let expected = [1.0, 2.0, 3.0, 1.0, 2.0].map(|x| Vec3::new(x, 0.0, 0.0));
        assert_eq!(cloud.snapshot(), &expected);

        let engine = app.world().resource::<TransitionEngine>();
        assert_eq!(engine.current_shape(), Some(ShapeId::Cube));
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn unready_trigger_events_are_ignored() {
        let engine = TransitionEngine::new(3, fixed_settings(), StdRng::seed_from_u64(3));
        let mut app = test_app(engine, PointCloud::initialize(3, |i| Vec3::splat(i as f32)));

        app.world_mut().send_event(TriggerShapeEvent {
            shape: ShapeId::Sphere,
            source: TriggerSource::Rpc,
        });
        app.update();
        app.update();

        let cloud = app.world().resource::<PointCloud>();
        assert_eq!(cloud.position(2), Vec3::splat(2.0));
        assert_eq!(app.world().resource::<TransitionEngine>().current_shape(), None);
    }
}
