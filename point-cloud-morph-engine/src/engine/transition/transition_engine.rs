use std::time::Duration;

use bevy::prelude::*;
use constants::transition::{AUTO_CYCLE_ENABLED, AUTO_CYCLE_INTERVAL_MS, MAX_DURATION_MS, MIN_DURATION_MS};
use rand::Rng;
use rand::rngs::StdRng;

use super::easing::Easing;
use super::trajectory::Trajectory;
use crate::engine::assets::shape_set::{ShapeId, ShapeSet};
use crate::engine::errors::MorphError;
use crate::engine::point_cloud::PointCloud;

/// Timing parameters shared by every trajectory the engine starts.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSettings {
    pub min_duration: Duration,
    pub max_duration: Duration,
    pub easing: Easing,
    /// Idle interval after which the engine moves on by itself. `None`
    /// disables the policy and leaves triggering to pointer and RPC input.
    pub auto_cycle: Option<Duration>,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            min_duration: Duration::from_millis(MIN_DURATION_MS),
            max_duration: Duration::from_millis(MAX_DURATION_MS),
            easing: Easing::default(),
            auto_cycle: AUTO_CYCLE_ENABLED.then(|| Duration::from_millis(AUTO_CYCLE_INTERVAL_MS)),
        }
    }
}

impl TransitionSettings {
    /// Duration bounds ordered low to high.
    fn duration_bounds(&self) -> (Duration, Duration) {
        let (a, b) = (self.min_duration, self.max_duration);
        if a <= b { (a, b) } else { (b, a) }
    }
}

/// Owns one trajectory per point and retargets the whole cloud on trigger.
///
/// Trajectories live in a flat arena indexed like [`PointCloud`]; `tick`
/// advances them in one pass and writes the results through to the buffer.
#[derive(Resource)]
pub struct TransitionEngine {
    trajectories: Vec<Trajectory>,
    shapes: ShapeSet,
    current: Option<ShapeId>,
    settings: TransitionSettings,
    active: usize,
    idle: Duration,
    rng: StdRng,
}

impl TransitionEngine {
    pub fn new(point_count: usize, settings: TransitionSettings, rng: StdRng) -> Self {
        Self {
            trajectories: vec![Trajectory::default(); point_count],
            shapes: ShapeSet::default(),
            current: None,
            settings,
            active: 0,
            idle: Duration::ZERO,
            rng,
        }
    }

    /// Store the target sequence for `shape`. A repeated registration
    /// replaces the earlier data and is logged.
    pub fn register_shape_data(
        &mut self,
        shape: ShapeId,
        positions: Vec<Vec3>,
    ) -> Result<(), MorphError> {
        let count = positions.len();
        if self.shapes.insert(shape, positions)? {
            warn!("Shape {} registered twice, keeping the latest {} vertices", shape, count);
        } else {
            info!("Shape {} registered with {} vertices", shape, count);
        }
        Ok(())
    }

    /// Retarget every point toward `shape`.
    ///
    /// Point `i` heads for vertex `i mod len`, starting from wherever it sits
    /// in `cloud` right now. Any trajectory still in flight is replaced.
    /// Unknown shapes leave the engine untouched and return `NotReady`.
    pub fn trigger(&mut self, shape: ShapeId, cloud: &PointCloud) -> Result<(), MorphError> {
        let targets = self.shapes.get(shape).ok_or(MorphError::NotReady(shape))?;
        debug_assert_eq!(cloud.len(), self.trajectories.len());

        let (min, max) = self.settings.duration_bounds();
        let easing = self.settings.easing;
        for (index, trajectory) in self.trajectories.iter_mut().enumerate() {
            let target = targets[index % targets.len()];
            let duration = if max > min {
                self.rng.gen_range(min..=max)
            } else {
                min
            };
            *trajectory = Trajectory::new(cloud.position(index), target, duration, easing);
        }

        self.active = self.trajectories.len();
        self.current = Some(shape);
        self.idle = Duration::ZERO;
        Ok(())
    }

    /// Advance all active trajectories by `delta`, writing positions into
    /// `cloud`. Returns the number of trajectories still in flight.
    pub fn tick(&mut self, delta: Duration, cloud: &mut PointCloud) -> usize {
        self.idle = self.idle.saturating_add(delta);
        if self.active == 0 {
            return 0;
        }

        let mut finished = 0;
        for (index, trajectory) in self.trajectories.iter_mut().enumerate() {
            if !trajectory.active {
                continue;
            }
            if let Some(position) = trajectory.advance(delta) {
                cloud.set_position(index, position);
            }
            if !trajectory.active {
                finished += 1;
            }
        }

        self.active -= finished;
        self.active
    }

    /// Shape the auto-cycle policy wants next, once the idle interval has
    /// elapsed. Polling a due timer restarts it even when nothing is
    /// registered yet.
    pub fn poll_auto_cycle(&mut self) -> Option<ShapeId> {
        let interval = self.settings.auto_cycle?;
        if self.idle < interval {
            return None;
        }
        self.idle = Duration::ZERO;
        self.next_shape()
    }

    /// The registered shape after the current one in round-robin order.
    /// Falls back to the current shape when it is the only one available.
    pub fn next_shape(&self) -> Option<ShapeId> {
        let start = self.current.map_or(0, |shape| shape.order() + 1);
        (0..ShapeId::ALL.len())
            .map(|offset| ShapeId::ALL[(start + offset) % ShapeId::ALL.len()])
            .find(|shape| self.shapes.contains(*shape))
    }

    pub fn current_shape(&self) -> Option<ShapeId> {
        self.current
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn has_shape(&self, shape: ShapeId) -> bool {
        self.shapes.contains(shape)
    }

    pub fn registered_shapes(&self) -> Vec<ShapeId> {
        self.shapes.ids()
    }

    pub fn trajectory(&self, index: usize) -> Option<&Trajectory> {
        self.trajectories.get(index)
    }

    pub fn settings(&self) -> &TransitionSettings {
        &self.settings
    }

    /// Longest duration any trajectory can be given.
    pub fn max_duration(&self) -> Duration {
        self.settings.min_duration.max(self.settings.max_duration)
    }
}
