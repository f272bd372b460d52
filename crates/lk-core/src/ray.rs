//! Ray casting primitives
//!
//! All intersection functions return the ray parameter `t` of the nearest
//! hit in front of the ray origin. The hit point is `ray.at(t)`.

use glam::{Mat4, Vec3, Vec4};

use crate::constants::RAY_EPSILON;

/// A world-space ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Build a ray through a screen pixel.
    ///
    /// `screen_x`/`screen_y` are measured from the top-left corner of a
    /// viewport of `width` x `height`. `view_proj` is `projection * view`
    /// with a 0..1 depth range.
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        width: f32,
        height: f32,
        view_proj: Mat4,
    ) -> Self {
        let ndc_x = (2.0 * screen_x / width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / height);

        let inv = view_proj.inverse();
        let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Self::new(near, far - near)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray in the local space of `transform`.
    ///
    /// The returned direction is not renormalized so that `t` values stay
    /// comparable with the world-space ray.
    pub fn to_local(&self, transform: &Mat4) -> Self {
        let inv = transform.inverse();
        Self {
            origin: inv.transform_point3(self.origin),
            direction: inv.transform_vector3(self.direction),
        }
    }
}

/// Möller–Trumbore ray/triangle intersection
pub fn ray_triangle_intersection(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Parallel to the triangle plane
    if a.abs() < RAY_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > RAY_EPSILON).then_some(t)
}

/// Ray/infinite plane intersection
pub fn ray_plane_intersection(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    (t > RAY_EPSILON).then_some(t)
}

/// Ray/sphere intersection
pub fn ray_sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - a * c;
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-b - sqrt_d) / a;
    if near > RAY_EPSILON {
        return Some(near);
    }
    // Origin inside the sphere
    let far = (-b + sqrt_d) / a;
    (far > RAY_EPSILON).then_some(far)
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty (inverted) box
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bbox, p| bbox.expand_to_include(p))
    }

    pub fn expand_to_include(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the bounding sphere
    pub fn radius(&self) -> f32 {
        ((self.max - self.min) * 0.5).length()
    }

    /// Box containing the transformed corners
    pub fn transform(&self, transform: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];
        Self::from_points(corners.map(|c| transform.transform_point3(c)))
    }

    /// Slab test. Returns the entry parameter, or 0 when the origin is inside.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        if self.is_empty() {
            return None;
        }

        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir.abs() < f32::EPSILON {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (self.min[axis] - origin) * inv;
            let mut t1 = (self.max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_ray_hits_triangle() {
        let t = ray_triangle_intersection(
            &down_ray(0.2, 0.2),
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
        );
        assert!((t.unwrap() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_triangle() {
        let t = ray_triangle_intersection(&down_ray(0.8, 0.8), Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(t.is_none());
    }

    #[test]
    fn test_triangle_behind_ray_is_ignored() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, 10.0), Vec3::Z);
        assert!(ray_triangle_intersection(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_ray_plane() {
        let t = ray_plane_intersection(&down_ray(3.0, 4.0), Vec3::ZERO, Vec3::Z).unwrap();
        assert_eq!(down_ray(3.0, 4.0).at(t), Vec3::new(3.0, 4.0, 0.0));

        let parallel = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(ray_plane_intersection(&parallel, Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn test_ray_sphere() {
        let t = ray_sphere_intersection(&down_ray(0.0, 0.0), Vec3::ZERO, 0.5).unwrap();
        assert!((t - 9.5).abs() < 1e-5);
        assert!(ray_sphere_intersection(&down_ray(2.0, 0.0), Vec3::ZERO, 0.5).is_none());
    }

    #[test]
    fn test_aabb_slab() {
        let bbox = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let t = bbox.ray_intersection(&down_ray(0.0, 0.0)).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(bbox.ray_intersection(&down_ray(5.0, 0.0)).is_none());
        assert!(Aabb::empty().ray_intersection(&down_ray(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_screen_center_ray_points_forward() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 1000.0);
        let ray = Ray::from_screen(50.0, 50.0, 100.0, 100.0, proj * view);

        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!((ray.origin.x).abs() < 1e-4 && (ray.origin.y).abs() < 1e-4);
    }
}
