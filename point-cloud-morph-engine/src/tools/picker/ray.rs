use bevy::prelude::*;

/// World-space ray through a pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PickRay {
    /// Unproject `cursor` (logical pixels, origin top-left) through
    /// `world_from_clip`. Depth follows the engine's reverse-Z convention:
    /// the near plane sits at NDC z = 1.
    pub fn from_viewport(cursor: Vec2, viewport_size: Vec2, world_from_clip: Mat4) -> Option<Self> {
        if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
            return None;
        }
        let mut ndc = cursor / viewport_size * 2.0 - Vec2::ONE;
        ndc.y = -ndc.y;

        let near = world_from_clip.project_point3(ndc.extend(1.0));
        let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
        let direction = (far - near).try_normalize()?;
        if !near.is_finite() {
            return None;
        }
        Some(Self {
            origin: near,
            direction,
        })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Pickable extent of a proxy, expressed in the entity's local space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PickVolume {
    Box { size: Vec3 },
    Sphere { radius: f32 },
}

impl PickVolume {
    /// Distance along `ray` to the first hit in front of its origin.
    pub fn hit(&self, ray: &PickRay, xf: &GlobalTransform) -> Option<f32> {
        let inv = xf.compute_matrix().inverse();
        let o_local = inv.transform_point3(ray.origin);
        let d_local = inv.transform_vector3(ray.direction);
        match *self {
            PickVolume::Box { size } => {
                let he = size * 0.5;
                ray_aabb_hit_t(o_local, d_local, -he, he)
            }
            PickVolume::Sphere { radius } => ray_sphere_hit_t(o_local, d_local, radius),
        }
    }
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (ray_origin[axis], ray_direction[axis]);
        if d == 0.0 {
            // Parallel to this slab: inside it or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((min[axis] - o) / d, (max[axis] - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

// Ray–sphere intersection around the local origin
pub fn ray_sphere_hit_t(ray_origin: Vec3, ray_direction: Vec3, radius: f32) -> Option<f32> {
    let a = ray_direction.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * ray_origin.dot(ray_direction);
    let c = ray_origin.length_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t0 = (-b - root) / (2.0 * a);
    let t1 = (-b + root) / (2.0 * a);
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_test_hits_front_face() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn slab_test_misses_parallel_rays_outside() {
        let t = ray_aabb_hit_t(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(t, None);
    }

    #[test]
    fn volumes_behind_the_ray_are_ignored() {
        assert_eq!(ray_sphere_hit_t(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z, 1.0), None);
        assert_eq!(
            ray_aabb_hit_t(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z, Vec3::splat(-1.0), Vec3::ONE),
            None
        );
    }

    #[test]
    fn origin_inside_sphere_hits_exit_point() {
        assert_eq!(ray_sphere_hit_t(Vec3::ZERO, Vec3::X, 2.0), Some(2.0));
    }

    #[test]
    fn box_volume_respects_rotation() {
        let xf = GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, 0.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)),
        );
        let volume = PickVolume::Box { size: Vec3::new(2.0, 2.0, 0.1) };
        // Thin slab rotated 45 degrees, so a ray at x = 0.6 still crosses it.
        let ray = PickRay {
            origin: Vec3::new(0.6, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert!(volume.hit(&ray, &xf).is_some());

        let ray = PickRay {
            origin: Vec3::new(0.9, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert!(volume.hit(&ray, &xf).is_none());
    }

    #[test]
    fn centre_of_viewport_looks_down_the_camera_axis() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_infinite_reverse_rh(45f32.to_radians(), 1.0, 0.1);
        let world_from_clip = (projection * view).inverse();

        let ray = PickRay::from_viewport(Vec2::splat(400.0), Vec2::splat(800.0), world_from_clip)
            .unwrap();
        assert!(ray.origin.distance(Vec3::new(0.0, 0.0, 5.9)) < 1e-3);
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-3);

        assert!(PickRay::from_viewport(Vec2::ZERO, Vec2::ZERO, world_from_clip).is_none());
    }
}
