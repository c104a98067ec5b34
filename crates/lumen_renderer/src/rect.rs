//! Axis-aligned rectangles (xy, xz and yz planes).

use crate::{HitRecord, Hittable, MaterialId};
use lumen_math::{Aabb, Interval, Ray, Vec3};

/// Half thickness of a rectangle's bounding box along its constant axis.
const PLANE_PAD: f32 = 0.0001;

/// Orientation of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Constant z, spans x and y
    Xy,
    /// Constant y, spans x and z
    Xz,
    /// Constant x, spans y and z
    Yz,
}

impl Plane {
    /// Axis indices (first in-plane, second in-plane, constant).
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }
}

/// A rectangle lying in an axis-aligned plane.
///
/// The outward normal points along the positive constant axis. Rectangles are
/// two-sided: the hit record's normal is flipped toward the ray.
#[derive(Debug, Clone)]
pub struct AaRect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f32,
    material: MaterialId,
}

impl AaRect {
    /// Rectangle spanning `[a0, a1] x [b0, b1]` in `plane`, at `k` on the constant axis.
    pub fn new(plane: Plane, (a0, a1): (f32, f32), (b0, b1): (f32, f32), k: f32, material: MaterialId) -> Self {
        Self {
            plane,
            a: Interval::new(a0.min(a1), a0.max(a1)),
            b: Interval::new(b0.min(b1), b0.max(b1)),
            k,
            material,
        }
    }

    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(Plane::Xy, (x0, x1), (y0, y1), k, material)
    }

    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(Plane::Xz, (x0, x1), (z0, z1), k, material)
    }

    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: MaterialId) -> Self {
        Self::new(Plane::Yz, (y0, y1), (z0, z1), k, material)
    }
}

impl Hittable for AaRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // Parallel to the plane
        if direction[ik].abs() < 1e-12 {
            return None;
        }

        let t = (self.k - origin[ik]) / direction[ik];
        if !ray_t.contains(t) {
            return None;
        }

        let a = origin[ia] + t * direction[ia];
        let b = origin[ib] + t * direction[ib];
        if !self.a.contains(a) || !self.b.contains(b) {
            return None;
        }

        let uv = (
            (a - self.a.min) / self.a.size(),
            (b - self.b.min) / self.b.size(),
        );

        let mut outward_normal = Vec3::ZERO;
        outward_normal[ik] = 1.0;

        Some(HitRecord::new(ray, t, outward_normal, uv, self.material))
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        let (ia, ib, ik) = self.plane.axes();

        let mut min = Vec3::ZERO;
        let mut max = Vec3::ZERO;
        min[ia] = self.a.min;
        max[ia] = self.a.max;
        min[ib] = self.b.min;
        max[ib] = self.b.max;
        min[ik] = self.k - PLANE_PAD;
        max[ik] = self.k + PLANE_PAD;

        Aabb::from_points(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAT: MaterialId = MaterialId::new(0);
    const RANGE: Interval = Interval::new(0.001, f32::INFINITY);

    #[test]
    fn test_xy_rect_hit() {
        let rect = AaRect::xy(-1.0, 1.0, -1.0, 3.0, -2.0, MAT);
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);

        let rec = rect.hit(&ray, RANGE).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
        assert!((rec.u - 0.5).abs() < 1e-6);
        assert!((rec.v - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_rect_back_side_flips_normal() {
        let rect = AaRect::xz(-1.0, 1.0, -1.0, 1.0, 5.0, MAT);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Y);

        let rec = rect.hit(&ray, RANGE).unwrap();
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Y);
        assert_eq!(rec.p, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_rect_misses_outside_bounds() {
        let rect = AaRect::yz(-1.0, 1.0, -1.0, 1.0, 3.0, MAT);
        let ray = Ray::new_simple(Vec3::new(0.0, 2.0, 0.0), Vec3::X);
        assert!(rect.hit(&ray, RANGE).is_none());
    }

    #[test]
    fn test_rect_parallel_ray_misses() {
        let rect = AaRect::xy(-1.0, 1.0, -1.0, 1.0, 0.0, MAT);
        let ray = Ray::new_simple(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(rect.hit(&ray, RANGE).is_none());
    }

    #[test]
    fn test_rect_beyond_range() {
        let rect = AaRect::xy(-1.0, 1.0, -1.0, 1.0, -10.0, MAT);
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        assert!(rect.hit(&ray, Interval::new(0.001, 5.0)).is_none());
    }

    #[test]
    fn test_rect_bbox_padded_on_constant_axis() {
        let rect = AaRect::xz(0.0, 2.0, 0.0, 3.0, 1.0, MAT);
        let bbox = rect.bounding_box(0.0, 1.0);

        assert_eq!(bbox.x, Interval::new(0.0, 2.0));
        assert_eq!(bbox.z, Interval::new(0.0, 3.0));
        assert!(bbox.y.size() > 0.0);
        assert!(bbox.y.min < 1.0 && bbox.y.max > 1.0);
    }
}
