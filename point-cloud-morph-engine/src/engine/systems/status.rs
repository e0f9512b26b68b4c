use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::assets::shape_set::ShapeId;
use crate::engine::loading::model_source::ShapesReadyEvent;
use crate::engine::transition::{ShapeChangedEvent, TransitionEngine};
use crate::rpc::web_rpc::{WebRpcInterface, current_fps};

#[derive(Component)]
pub struct StatusText;

pub fn spawn_status_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

pub fn format_status(fps: Option<f64>, shape: Option<ShapeId>, moving: usize) -> String {
    let fps = fps.map_or_else(|| "--".to_string(), |value| format!("{value:.1}"));
    let shape = shape.map_or("none", |shape| shape.as_str());
    format!("FPS: {fps}\nShape: {shape}\nMoving: {moving}")
}

pub fn status_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    engine: Option<Res<TransitionEngine>>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    let (shape, moving) = engine
        .map(|engine| (engine.current_shape(), engine.active_count()))
        .unwrap_or((None, 0));

    for mut text in &mut query {
        text.0 = format_status(fps, shape, moving);
    }
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    // Send FPS every 0.5 seconds
    if current_time - *last_send_time >= 0.5 {
        rpc_interface.send_notification(
            "fps_update",
            serde_json::json!({
                "fps": current_fps(&diagnostics)
            }),
        );
        *last_send_time = current_time;
    }
}

/// Forward loading completion and accepted triggers to the host page.
pub fn shape_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut ready_events: EventReader<ShapesReadyEvent>,
    mut changed_events: EventReader<ShapeChangedEvent>,
) {
    for ready in ready_events.read() {
        rpc_interface.send_notification(
            "shapes_ready",
            serde_json::json!({
                "loaded": ready.loaded,
                "failed": ready.failed
            }),
        );
    }

    for changed in changed_events.read() {
        rpc_interface.send_notification(
            "shape_changed",
            serde_json::json!({
                "shape": changed.shape,
                "source": changed.source
            }),
        );
    }
}
