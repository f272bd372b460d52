//! Ray picking against gizmo handles

use glam::Vec3;

/// Ray-cylinder intersection test.
///
/// The ray and the cylinder axis are projected onto the plane perpendicular
/// to the axis, the 2D circle intersection is solved as a quadratic, and the
/// hit is rejected if it falls outside `cylinder_start..cylinder_end`.
///
/// Returns the ray parameter of the nearest hit in front of the origin.
pub fn ray_cylinder_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    cylinder_start: Vec3,
    cylinder_end: Vec3,
    radius: f32,
) -> Option<f32> {
    let span = cylinder_end - cylinder_start;
    let cylinder_length = span.length();
    if cylinder_length <= f32::EPSILON {
        return None;
    }
    let cylinder_axis = span / cylinder_length;

    let offset = ray_origin - cylinder_start;
    let d = ray_dir - cylinder_axis * ray_dir.dot(cylinder_axis);
    let o = offset - cylinder_axis * offset.dot(cylinder_axis);

    let a = d.dot(d);
    if a <= f32::EPSILON {
        // Ray parallel to the axis
        return None;
    }
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t < 0.0 {
        return None;
    }

    let projection = (ray_origin + ray_dir * t - cylinder_start).dot(cylinder_axis);
    if projection < 0.0 || projection > cylinder_length {
        return None;
    }

    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_cylinder() {
        let result = ray_cylinder_intersection(
            Vec3::new(0.5, 0.0, 1.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            0.1,
        );
        assert!((result.unwrap() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_cylinder() {
        let result =
            ray_cylinder_intersection(Vec3::new(0.5, 0.0, 1.0), Vec3::Z, Vec3::ZERO, Vec3::X, 0.1);
        assert!(result.is_none());
    }

    #[test]
    fn test_ray_outside_cylinder_bounds() {
        let result = ray_cylinder_intersection(
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            Vec3::X,
            0.1,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_ray_along_axis_is_ignored() {
        let result = ray_cylinder_intersection(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::X,
            Vec3::ZERO,
            Vec3::X,
            0.1,
        );
        assert!(result.is_none());
    }
}
