use std::time::Duration;

use bevy::prelude::*;

use super::easing::Easing;

/// Animation state of a single point. Stored in a flat arena indexed like the
/// point cloud buffer.
///
/// Time is kept as [`Duration`] so accumulated frame deltas compare exactly
/// against the drawn duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub start: Vec3,
    pub target: Vec3,
    pub elapsed: Duration,
    pub duration: Duration,
    pub easing: Easing,
    pub active: bool,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            target: Vec3::ZERO,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            easing: Easing::default(),
            active: false,
        }
    }
}

impl Trajectory {
    pub fn new(start: Vec3, target: Vec3, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            target,
            elapsed: Duration::ZERO,
            duration,
            easing,
            active: true,
        }
    }

    /// Advance by `delta` and return the position the point should take.
    ///
    /// Reaching the duration snaps to the exact target and deactivates the
    /// trajectory. Inactive trajectories return `None` and are left untouched.
    pub fn advance(&mut self, delta: Duration) -> Option<Vec3> {
        if !self.active {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.duration {
            self.active = false;
            return Some(self.target);
        }

        let eased = self.easing.apply(self.progress());
        Some(self.start.lerp(self.target, eased))
    }

    /// Normalised progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn finishing_snaps_to_target() {
        let target = Vec3::new(0.1, 0.2, 0.3);
        let mut trajectory = Trajectory::new(Vec3::splat(7.0), target, ms(1000), Easing::ExponentialIn);

        assert!(trajectory.advance(ms(600)).is_some());
        assert!(trajectory.active);
        assert_eq!(trajectory.advance(ms(600)), Some(target));
        assert!(!trajectory.active);
    }

    #[test]
    fn snaps_on_the_frame_the_duration_is_reached() {
        let target = Vec3::new(-1.0, 3.0, 2.0);
        let mut trajectory = Trajectory::new(Vec3::ZERO, target, ms(300), Easing::Linear);

        // 0.1 + 0.1 + 0.1 falls short of 0.3 in f32.
        trajectory.advance(ms(100));
        trajectory.advance(ms(100));
        assert!(trajectory.active);
        assert_eq!(trajectory.advance(ms(100)), Some(target));
        assert!(!trajectory.active);
    }

    #[test]
    fn finished_trajectories_do_nothing() {
        let mut trajectory = Trajectory::new(Vec3::ZERO, Vec3::X, ms(500), Easing::Linear);
        trajectory.advance(ms(1000));
        let before = trajectory;

        assert_eq!(trajectory.advance(ms(1000)), None);
        assert_eq!(trajectory, before);
    }

    #[test]
    fn zero_duration_completes_on_first_advance() {
        let mut trajectory = Trajectory::new(Vec3::ZERO, Vec3::Y, Duration::ZERO, Easing::ExponentialIn);
        assert_eq!(trajectory.advance(Duration::ZERO), Some(Vec3::Y));
        assert!(!trajectory.active);
    }

    #[test]
    fn intermediate_positions_follow_the_easing() {
        let mut trajectory = Trajectory::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), ms(2000), Easing::Linear);
        let position = trajectory.advance(ms(500)).unwrap();
        assert!((position.x - 1.0).abs() < 1e-6);
        assert!((trajectory.progress() - 0.25).abs() < 1e-6);
    }
}
