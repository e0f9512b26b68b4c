use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::shape_set::ShapeId;
use crate::engine::transition::{TransitionEngine, TriggerShapeEvent, TriggerSource};

const JSONRPC_VERSION: &str = "2.0";

const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const SHAPE_NOT_READY: i32 = -32001;

/// JSON-RPC 2.0 request. A missing `id` marks a notification.
#[derive(Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

impl RpcResponse {
    fn new(id: serde_json::Value, outcome: Result<serde_json::Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
            error,
            id: Some(id),
        }
    }
}

/// One-way message to the host page.
#[derive(Serialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    fn invalid_params(message: String) -> Self {
        Self {
            code: INVALID_PARAMS,
            message,
            data: None,
        }
    }

    /// The shape exists but its model never loaded.
    fn shape_not_ready(shape: ShapeId) -> Self {
        Self {
            code: SHAPE_NOT_READY,
            message: format!("Shape {} is not loaded", shape),
            data: Some(serde_json::json!({ "shape": shape })),
        }
    }
}

/// Outgoing traffic queued during the frame and flushed at its end.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    notifications: Vec<RpcNotification>,
    responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.notifications.push(RpcNotification {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
        });
    }

    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.notifications
    }

    #[cfg(test)]
    fn pending_responses(&self) -> &[RpcResponse] {
        &self.responses
    }
}

/// Raw request strings pushed by the `message` listener, drained once per
/// frame. Only inserted on wasm.
#[derive(Resource, Clone, Default)]
pub struct HostInbox(Arc<Mutex<VecDeque<String>>>);

impl HostInbox {
    pub fn push(&self, message: String) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push_back(message);
        }
    }

    fn drain(&self) -> Vec<String> {
        self.0
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_systems(Update, (handle_host_requests, flush_outbox).chain());

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, listen_for_host_messages);
    }
}

#[cfg(target_arch = "wasm32")]
fn listen_for_host_messages(mut commands: Commands) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::Closure;
    use web_sys::MessageEvent;

    let inbox = HostInbox::default();
    let sink = inbox.clone();
    let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let Ok(data) = event.data().dyn_into::<js_sys::JsString>() else {
            return;
        };
        let message = String::from(data);
        if message.contains("jsonrpc") {
            sink.push(message);
        }
    });

    match web_sys::window() {
        Some(window) => {
            if let Err(err) =
                window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", err);
            }
        }
        None => error!("No window to listen on for host messages"),
    }

    // The listener lives as long as the page.
    on_message.forget();
    commands.insert_resource(inbox);
}

/// Snapshot of engine state the request handlers answer from.
#[derive(Debug, Clone, Default)]
pub struct RpcContext {
    pub fps: f32,
    pub available_shapes: Vec<ShapeId>,
    pub current_shape: Option<ShapeId>,
}

fn handle_host_requests(
    inbox: Option<Res<HostInbox>>,
    diagnostics: Res<DiagnosticsStore>,
    engine: Option<Res<TransitionEngine>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut trigger_events: EventWriter<TriggerShapeEvent>,
) {
    let Some(inbox) = inbox else {
        return;
    };
    let messages = inbox.drain();
    if messages.is_empty() {
        return;
    }

    let context = RpcContext {
        fps: current_fps(&diagnostics),
        available_shapes: engine
            .as_ref()
            .map(|engine| engine.registered_shapes())
            .unwrap_or_default(),
        current_shape: engine.as_ref().and_then(|engine| engine.current_shape()),
    };

    let mut triggers = Vec::new();
    for message in messages {
        let request = match serde_json::from_str::<RpcRequest>(&message) {
            Ok(request) => request,
            Err(err) => {
                warn!("Dropping malformed RPC message: {}", err);
                continue;
            }
        };
        if let Some(response) = handle_rpc_request(&request, &context, &mut triggers) {
            rpc_interface.responses.push(response);
        }
    }
    trigger_events.write_batch(triggers);
}

/// Dispatch one request. Accepted triggers are appended to `triggers`;
/// the response is `None` for notifications.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    triggers: &mut Vec<TriggerShapeEvent>,
) -> Option<RpcResponse> {
    let outcome = match request.method.as_str() {
        "trigger_shape" => trigger_shape(&request.params, context, triggers),
        "get_shapes" => Ok(serde_json::json!({
            "shapes": context.available_shapes,
            "current": context.current_shape
        })),
        "get_fps" => Ok(serde_json::json!({ "fps": context.fps })),
        method => {
            warn!("Unknown RPC method: {}", method);
            Err(RpcError::method_not_found(method))
        }
    };

    let id = request.id.clone()?;
    Some(RpcResponse::new(id, outcome))
}

fn trigger_shape(
    params: &serde_json::Value,
    context: &RpcContext,
    triggers: &mut Vec<TriggerShapeEvent>,
) -> Result<serde_json::Value, RpcError> {
    let name = params
        .get("shape")
        .and_then(|value| value.as_str())
        .ok_or_else(|| RpcError::invalid_params("Expected 'shape' parameter".to_string()))?;

    let shape = ShapeId::from_string(name)
        .ok_or_else(|| RpcError::invalid_params(format!("Unknown shape: {}", name)))?;

    if !context.available_shapes.contains(&shape) {
        return Err(RpcError::shape_not_ready(shape));
    }

    triggers.push(TriggerShapeEvent {
        shape,
        source: TriggerSource::Rpc,
    });
    info!("Shape trigger dispatched over RPC: {}", shape);

    Ok(serde_json::json!({ "success": true, "shape": shape }))
}

/// Smoothed frame rate, zero until the diagnostic has samples.
pub fn current_fps(diagnostics: &DiagnosticsStore) -> f32 {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0) as f32
}

/// Post queued notifications, then responses, to the parent window.
fn flush_outbox(mut rpc_interface: ResMut<WebRpcInterface>) {
    let rpc_interface = &mut *rpc_interface;
    for notification in rpc_interface.notifications.drain(..) {
        post_to_host(&notification);
    }
    for response in rpc_interface.responses.drain(..) {
        post_to_host(&response);
    }
}

#[cfg(target_arch = "wasm32")]
fn post_to_host<T: Serialize>(message: &T) {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(err) => {
            error!("Failed to serialize RPC message: {}", err);
            return;
        }
    };
    let Some(parent) = web_sys::window().and_then(|window| window.parent().ok().flatten()) else {
        warn!("No parent window to post RPC message to");
        return;
    };
    if let Err(err) = parent.post_message(&wasm_bindgen::JsValue::from_str(&json), "*") {
        error!("Failed to post RPC message: {:?}", err);
    }
}

// Native builds have no host page.
#[cfg(not(target_arch = "wasm32"))]
fn post_to_host<T: Serialize>(_message: &T) {}
