use bevy::math::EulerRot;
use bevy::prelude::*;

/// Slow continuous tumble of the cloud, accumulated as XYZ Euler angles.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CloudSpin {
    /// Radians per second about x, y and z.
    pub rate: Vec3,
    pub angles: Vec3,
}

impl CloudSpin {
    pub fn new(rate: Vec3) -> Self {
        Self {
            rate,
            angles: Vec3::ZERO,
        }
    }

    pub fn advance(&mut self, dt: f32) -> Quat {
        self.angles += self.rate * dt;
        Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, self.angles.z)
    }
}

pub fn spin_point_cloud(time: Res<Time>, mut query: Query<(&mut Transform, &mut CloudSpin)>) {
    let dt = time.delta_secs();
    for (mut transform, mut spin) in &mut query {
        transform.rotation = spin.advance(dt);
    }
}
