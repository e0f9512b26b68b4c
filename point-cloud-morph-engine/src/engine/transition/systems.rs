use bevy::prelude::*;
use serde::Serialize;

use super::transition_engine::TransitionEngine;
use crate::engine::assets::shape_set::ShapeId;
use crate::engine::point_cloud::PointCloud;

/// Request to morph the cloud into `shape`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerShapeEvent {
    pub shape: ShapeId,
    pub source: TriggerSource,
}

/// Origin of a trigger, for logging and frontend notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    Startup,
    Pointer,
    Rpc,
    AutoCycle,
}

/// Fired after a trigger was accepted and every trajectory retargeted.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeChangedEvent {
    pub shape: ShapeId,
    pub source: TriggerSource,
}

/// Ask the engine whether the idle interval elapsed and queue its next shape.
pub fn poll_auto_cycle(
    mut engine: ResMut<TransitionEngine>,
    mut triggers: EventWriter<TriggerShapeEvent>,
) {
    if let Some(shape) = engine.poll_auto_cycle() {
        triggers.write(TriggerShapeEvent {
            shape,
            source: TriggerSource::AutoCycle,
        });
    }
}

/// Apply queued triggers in arrival order. Runs before `advance_transitions`
/// so a frame never observes a half-retargeted cloud.
pub fn apply_trigger_events(
    mut events: EventReader<TriggerShapeEvent>,
    mut engine: ResMut<TransitionEngine>,
    cloud: Res<PointCloud>,
    mut changed: EventWriter<ShapeChangedEvent>,
) {
    for event in events.read() {
        match engine.trigger(event.shape, &cloud) {
            Ok(()) => {
                info!("Morphing {} points into {} ({:?})", cloud.len(), event.shape, event.source);
                changed.write(ShapeChangedEvent {
                    shape: event.shape,
                    source: event.source,
                });
            }
            Err(err) => warn!("Ignoring {:?} trigger: {}", event.source, err),
        }
    }
}

pub fn advance_transitions(
    time: Res<Time>,
    mut engine: ResMut<TransitionEngine>,
    mut cloud: ResMut<PointCloud>,
) {
    engine.tick(time.delta(), &mut cloud);
}
