use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;

use crate::constants::camera::{
    FAR_PLANE, FOV_DEGREES, MAX_DISTANCE, MIN_DISTANCE, NEAR_PLANE, START_DISTANCE,
};

const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const PITCH_LIMIT: f32 = 1.55;

/// Orbit state of the scene camera. The camera transform eases toward the
/// pose this describes every frame.
#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub smoothing: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::ZERO,
            distance: START_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
            smoothing: 12.0,
        }
    }
}

impl ViewportCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Camera translation for the current orbit, looking at `focus_point`.
    pub fn eye(&self) -> Vec3 {
        self.focus_point + self.rotation() * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn target_transform(&self) -> Transform {
        Transform {
            translation: self.eye(),
            rotation: self.rotation(),
            ..default()
        }
    }

    pub fn orbit(&mut self, mouse_delta: Vec2) {
        self.yaw -= mouse_delta.x * YAW_SENSITIVITY;
        self.pitch = (self.pitch - mouse_delta.y * PITCH_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scale the orbit distance; positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * 0.9_f32.powf(scroll)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// Spawn the perspective scene camera at its starting orbit pose.
pub fn spawn_viewport_camera(commands: &mut Commands, viewport_camera: &ViewportCamera) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        viewport_camera.target_transform(),
    ));
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport_camera: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    if mouse_button.pressed(MouseButton::Right) && mouse_motion.delta != Vec2::ZERO {
        viewport_camera.orbit(mouse_motion.delta);
    }

    let scroll = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y * 0.05,
    };
    if scroll.abs() > f32::EPSILON {
        viewport_camera.zoom(scroll);
    }

    let target = viewport_camera.target_transform();
    let lerp_speed = (viewport_camera.smoothing * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_looks_down_negative_z_from_six_units() {
        let camera = ViewportCamera::default();
        let transform = camera.target_transform();
        assert!(transform.translation.distance(Vec3::new(0.0, 0.0, 6.0)) < 1e-5);
        assert!(transform.forward().as_vec3().distance(Vec3::NEG_Z) < 1e-5);
    }

    #[test]
    fn orbit_keeps_distance_and_clamps_pitch() {
        let mut camera = ViewportCamera::default();
        camera.orbit(Vec2::new(300.0, -10_000.0));
        assert!((camera.eye().distance(camera.focus_point) - START_DISTANCE).abs() < 1e-4);
        assert_eq!(camera.pitch, PITCH_LIMIT);
    }

    #[test]
    fn zoom_stays_inside_limits() {
        let mut camera = ViewportCamera::default();
        camera.zoom(1.0);
        assert!(camera.distance < START_DISTANCE);
        camera.zoom(-500.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
        camera.zoom(500.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
    }
}
