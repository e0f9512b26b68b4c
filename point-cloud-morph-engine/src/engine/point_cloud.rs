use bevy::prelude::*;
use rand::Rng;

/// Fixed-size buffer of point positions backing the rendered cloud.
///
/// Index `i` is the identity of point `i` for the whole process. The
/// transition engine is the only writer; the renderer reads the buffer when
/// `is_dirty` is set and clears the flag after uploading.
#[derive(Resource, Debug, Clone, Default)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    dirty: bool,
}

impl PointCloud {
    /// Create `count` points, point `i` starting at `generator(i)`.
    pub fn initialize(count: usize, mut generator: impl FnMut(usize) -> Vec3) -> Self {
        Self {
            positions: (0..count).map(&mut generator).collect(),
            dirty: true,
        }
    }

    /// Create `count` points drawn independently and uniformly from the cube
    /// `[-half_extent, half_extent]` on every axis.
    pub fn random_in_cube(count: usize, half_extent: f32, rng: &mut impl Rng) -> Self {
        let half_extent = half_extent.abs();
        Self::initialize(count, |_| {
            if half_extent == 0.0 {
                return Vec3::ZERO;
            }
            Vec3::new(
                rng.gen_range(-half_extent..=half_extent),
                rng.gen_range(-half_extent..=half_extent),
                rng.gen_range(-half_extent..=half_extent),
            )
        })
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
        self.dirty = true;
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    /// Flat view of every position, valid until the next mutation.
    pub fn snapshot(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
