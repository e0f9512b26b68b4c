use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

// Crate engine modules
use crate::engine::camera::viewport_camera::{
    ViewportCamera, camera_controller, spawn_viewport_camera,
};
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::LoadingPlugin;
use crate::engine::render::PointSpriteRenderPlugin;
use crate::engine::scene::background::fit_background_to_view;
use crate::engine::scene::cloud_spin::spin_point_cloud;
use crate::engine::scene::gizmos::draw_axes;
use crate::engine::scene::proxies::highlight_active_proxy;
use crate::engine::systems::status::{
    fps_notification_system, shape_notification_system, status_text_update_system,
};
use crate::engine::transition::TransitionPlugin;
// Crate tools modules
use crate::tools::picker::pick_shape_on_click;
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Manifest asset plus the staged start-up loading.
        .add_plugins(LoadingPlugin)
        .add_plugins(TransitionPlugin)
        .add_plugins(PointSpriteRenderPlugin)
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(Color::BLACK));

    // Initialise resources early
    app.init_resource::<ViewportCamera>();

    app.add_systems(Startup, setup);

    // Scene systems run from the first frame so the view is alive while
    // models load.
    app.add_systems(
        Update,
        (
            (camera_controller, fit_background_to_view).chain(),
            spin_point_cloud,
            draw_axes,
            highlight_active_proxy,
            shape_notification_system,
            fps_notification_system,
        ),
    );

    app.add_systems(
        Update,
        pick_shape_on_click.run_if(in_state(AppState::Running)),
    );

    // Add status_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, status_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, viewport_camera: Res<ViewportCamera>) {
    spawn_lighting(&mut commands);
    spawn_viewport_camera(&mut commands, &viewport_camera);

    #[cfg(not(target_arch = "wasm32"))]
    {
        crate::engine::systems::status::spawn_status_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
