use bevy::prelude::*;

use crate::engine::loading::model_source::ShapesReadyEvent;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::transition::{TransitionEngine, TriggerShapeEvent, TriggerSource};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Resource)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Leave the loading stage once every model resolved, kicking off the first
/// morph toward whichever shape comes first in round-robin order.
pub fn finish_loading(
    mut ready_events: EventReader<ShapesReadyEvent>,
    mut loading_progress: ResMut<LoadingProgress>,
    engine: Res<TransitionEngine>,
    mut triggers: EventWriter<TriggerShapeEvent>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(ready) = ready_events.read().last() else {
        return;
    };
    loading_progress.shapes_ready = true;

    if ready.failed.is_empty() {
        info!("✓ All {} shapes loaded", ready.loaded.len());
    } else {
        warn!(
            "{} of {} shapes failed to load: {:?}",
            ready.failed.len(),
            ready.loaded.len() + ready.failed.len(),
            ready.failed
        );
    }

    match engine.next_shape() {
        Some(shape) => {
            triggers.write(TriggerShapeEvent {
                shape,
                source: TriggerSource::Startup,
            });
        }
        None => warn!("No shape available, the cloud stays where it spawned"),
    }

    info!("→ Transitioning to Running state");
    next_state.set(AppState::Running);
}
