//! # Picking
//!
//! Converts pointer positions into world-space rays and intersects them with
//! scene objects and the ground plane.
//!
//! ## How it works
//!
//! 1. **Pointer to ray**: unproject the pointer through the inverse view-projection
//! 2. **Ray-object test**: move the ray into each object's local space and test
//!    it against the mesh bounds, so rotated objects pick tightly
//! 3. **Selection**: return the closest hit
//!
//! ## Usage
//!
//! ```no_run
//! use tessel::gfx::picking::{screen_to_ray, Plane};
//! # fn demo(camera: &tessel::gfx::camera::OrbitCamera) {
//! let ray = screen_to_ray((640.0, 400.0), (1280.0, 800.0), camera);
//! if let Some(point) = Plane::ground().intersect_ray(&ray) {
//!     println!("pointer over ({:.2}, {:.2})", point.x, point.z);
//! }
//! # }
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::{camera::Camera, scene::Object};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// The same ray expressed in another space. The direction is left unnormalised
    /// so parameters stay comparable with the source space.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Ray {
        let origin = matrix * self.origin.extend(1.0);
        let direction = matrix * self.direction.extend(0.0);
        Ray {
            origin: origin.truncate() / origin.w,
            direction: direction.truncate(),
        }
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl AABB {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;
        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection
    /// Returns the ray parameter of the entry point (or exit point when the
    /// origin is inside), or None if there is no intersection.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        // NaN (0 * inf on a slab edge) must not win, so fold with f32::max/min.
        let t_near = (0..3)
            .map(|i| t_min[i].min(t_max[i]))
            .fold(f32::NEG_INFINITY, f32::max);
        let t_far = (0..3)
            .map(|i| t_min[i].max(t_max[i]))
            .fold(f32::INFINITY, f32::min);

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    pub fn contains(&self, point: Vector3<f32>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

/// Infinite plane `normal · p = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub offset: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, offset: f32) -> Self {
        Self {
            normal: normal.normalize(),
            offset,
        }
    }

    /// The y = 0 plane.
    pub fn ground() -> Self {
        Self::new(Vector3::unit_y(), 0.0)
    }

    /// Plane through `point` facing `normal`.
    pub fn through(point: Vector3<f32>, normal: Vector3<f32>) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            offset: normal.dot(point),
        }
    }

    /// Point where `ray` crosses the plane in front of its origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vector3<f32>> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.offset - self.normal.dot(ray.origin)) / denom;
        (t >= 0.0).then(|| ray.point_at(t))
    }
}

/// Ground-plane hit restricted to a square of `size` centred on the origin,
/// mirroring a finite plane mesh used as the hit surface.
pub fn ground_hit(ray: &Ray, size: f32) -> Option<Vector3<f32>> {
    let half = size * 0.5;
    Plane::ground()
        .intersect_ray(ray)
        .filter(|p| p.x.abs() <= half && p.z.abs() <= half)
}

/// Convert screen coordinates (pixels, origin top-left) to a world-space ray.
pub fn screen_to_ray(screen_pos: (f32, f32), screen_size: (f32, f32), camera: &impl Camera) -> Ray {
    let (x, y) = screen_pos;
    let (width, height) = (screen_size.0.max(1.0), screen_size.1.max(1.0));

    let ndc_x = (2.0 * x) / width - 1.0;
    let ndc_y = 1.0 - (2.0 * y) / height;

    let inv_view_proj = camera
        .build_view_projection_matrix()
        .invert()
        .unwrap_or_else(Matrix4::identity);

    // wgpu clip space: depth runs from 0 (near) to 1 (far).
    let near = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, 0.0, 1.0));
    let far = unproject(&inv_view_proj, Vector4::new(ndc_x, ndc_y, 1.0, 1.0));

    Ray::new(near, far - near)
}

fn unproject(inv_view_proj: &Matrix4<f32>, ndc: Vector4<f32>) -> Vector3<f32> {
    let world = inv_view_proj * ndc;
    world.truncate() / world.w
}

/// Result of an object picking operation
#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    /// Index of the picked object in the searched slice
    pub object_index: usize,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Ray test against one object's mesh bounds, in world distance.
pub fn intersect_object(ray: &Ray, object: &Object) -> Option<(f32, Vector3<f32>)> {
    if !object.visible {
        return None;
    }
    let bounds = object.local_bounds()?;
    let model = object.model_matrix();
    let inverse = model.invert()?;

    let local_ray = ray.transformed(&inverse);
    let t = bounds.intersect_ray(&local_ray)?;
    let local_hit = local_ray.origin + local_ray.direction * t;
    let world_hit = (model * local_hit.extend(1.0)).truncate();

    Some(((world_hit - ray.origin).magnitude(), world_hit))
}

/// Closest object hit by `ray` among those accepted by `filter`.
pub fn pick_object<'a>(
    ray: &Ray,
    objects: &'a [Object],
    mut filter: impl FnMut(&'a Object) -> bool,
) -> Option<PickResult> {
    objects
        .iter()
        .enumerate()
        .filter(|(_, object)| filter(object))
        .filter_map(|(object_index, object)| {
            intersect_object(ray, object).map(|(distance, intersection_point)| PickResult {
                object_index,
                distance,
                intersection_point,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::OrbitCamera;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn ray_along_a_slab_edge_still_hits() {
        let aabb = AABB::new(Vector3::new(-1.0, 0.0, -1.0), Vector3::new(1.0, 0.0, 1.0));
        let ray = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(5.0));
    }

    #[test]
    fn ground_hits_below_the_camera() {
        let ray = Ray::new(Vector3::new(1.0, 5.0, 2.0), Vector3::new(0.0, -1.0, 0.0));
        let hit = ground_hit(&ray, 1000.0).unwrap();
        assert_eq!(hit, Vector3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn ground_misses_when_looking_up_or_off_the_edge() {
        let up = Ray::new(Vector3::new(0.0, 5.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(ground_hit(&up, 1000.0).is_none());

        let far = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, -0.001, 0.0));
        assert!(ground_hit(&far, 1000.0).is_none());

        let parallel = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(Plane::ground().intersect_ray(&parallel).is_none());
    }

    #[test]
    fn centre_of_screen_looks_at_the_target() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 5.0, 10.0), Vector3::zero(), 1.6);
        let ray = screen_to_ray((640.0, 400.0), (1280.0, 800.0), &camera);
        let hit = ground_hit(&ray, 1000.0).unwrap();
        assert!(hit.magnitude() < 1e-2, "hit {:?}", hit);
    }

    #[test]
    fn rays_leave_the_eye_towards_the_view() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 5.0, 10.0), Vector3::zero(), 1.6);
        let forward = (camera.target - camera.eye).normalize();

        let centre = screen_to_ray((640.0, 400.0), (1280.0, 800.0), &camera);
        assert!(centre.direction.dot(forward) > 0.999, "{:?}", centre.direction);

        // The lower half of the screen sees the ground everywhere.
        for px in (0..1280).step_by(160) {
            for py in (420..800).step_by(60) {
                let ray = screen_to_ray((px as f32, py as f32), (1280.0, 800.0), &camera);
                assert!(ray.direction.dot(forward) > 0.0);
                assert!(ground_hit(&ray, 1000.0).is_some(), "miss at ({}, {})", px, py);
            }
        }
    }

    #[test]
    fn picks_the_closest_rotated_object() {
        let near = Object::new("near", &generate_cube())
            .with_position(Vector3::new(0.0, 0.0, 2.0))
            .with_rotation(Vector3::new(0.0, 0.7, 0.0));
        let far = Object::new("far", &generate_cube()).with_position(Vector3::new(0.0, 0.0, -2.0));
        let objects = vec![far, near];

        let ray = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = pick_object(&ray, &objects, |_| true).unwrap();
        assert_eq!(hit.object_index, 1);
        assert!(hit.distance < 8.0 && hit.distance > 7.0);

        let only_far = pick_object(&ray, &objects, |o| o.name == "far").unwrap();
        assert_eq!(only_far.object_index, 0);
        assert!((only_far.distance - 11.5).abs() < 1e-4);
    }
}
