//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{HitRecord, Hittable, MaterialId};
use lumen_math::{Aabb, Interval, Ray, Vec3};

/// Determinant threshold below which a ray counts as parallel (or back-facing).
const DET_EPSILON: f32 = 1e-4;

/// Padding applied to every axis of a triangle's bounding box.
const BBOX_PAD: f32 = 0.001;

/// Shading normal source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Geometric face normal everywhere
    Flat,
    /// Barycentric interpolation of per-vertex normals (Phong-style)
    Smooth([Vec3; 3]),
}

/// Which faces of the triangle can be hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Culling {
    /// Only rays arriving against the counter-clockwise face normal hit
    #[default]
    BackFace,
    /// Both faces hit
    DoubleSided,
}

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Face normal from counter-clockwise winding (unit length)
    face_normal: Vec3,
    shading: Shading,
    culling: Culling,
    material: MaterialId,
    bbox: Aabb,
}

impl Triangle {
    /// Flat-shaded triangle, for meshes without authored vertex normals.
    pub fn flat(a: Vec3, b: Vec3, c: Vec3, material: MaterialId) -> Self {
        Self::build(a, b, c, Shading::Flat, material)
    }

    /// Smooth-shaded triangle interpolating the given vertex normals.
    pub fn smooth(a: Vec3, b: Vec3, c: Vec3, normals: [Vec3; 3], material: MaterialId) -> Self {
        Self::build(a, b, c, Shading::Smooth(normals), material)
    }

    fn build(a: Vec3, b: Vec3, c: Vec3, shading: Shading, material: MaterialId) -> Self {
        let face_normal = (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Y);

        let min = a.min(b).min(c) - Vec3::splat(BBOX_PAD);
        let max = a.max(b).max(c) + Vec3::splat(BBOX_PAD);

        Self {
            a,
            b,
            c,
            face_normal,
            shading,
            culling: Culling::default(),
            material,
            bbox: Aabb::from_points(min, max),
        }
    }

    /// Set which faces can be hit.
    pub fn with_culling(mut self, culling: Culling) -> Self {
        self.culling = culling;
        self
    }

    pub fn face_normal(&self) -> Vec3 {
        self.face_normal
    }

    fn shading_normal(&self, u: f32, v: f32) -> Vec3 {
        match self.shading {
            Shading::Flat => self.face_normal,
            Shading::Smooth([na, nb, nc]) => ((1.0 - u - v) * na + u * nb + v * nc)
                .try_normalize()
                .unwrap_or(self.face_normal),
        }
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;

        let p = ray.direction().cross(e2);
        let det = p.dot(e1);

        // Parallel, grazing, or (when culling) back-facing
        let rejected = match self.culling {
            Culling::BackFace => det < DET_EPSILON,
            Culling::DoubleSided => det.abs() < DET_EPSILON,
        };
        if rejected {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.a;
        let u = inv_det * s.dot(p);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(e1);
        let v = inv_det * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * e2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            self.shading_normal(u, v),
            (u, v),
            self.material,
        ))
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAT: MaterialId = MaterialId::new(0);
    const RANGE: Interval = Interval::new(0.001, f32::INFINITY);

    /// Counter-clockwise when seen from +Z, so rays travelling -Z hit the front face.
    fn xy_triangle() -> Triangle {
        Triangle::flat(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            MAT,
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = xy_triangle().hit(&ray, RANGE).unwrap();
        assert!((rec.t - 1.0).abs() < 0.001);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_triangle_miss() {
        // Ray pointing away
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(xy_triangle().hit(&ray, RANGE).is_none());
    }

    #[test]
    fn test_centroid_barycentrics() {
        let a = Vec3::new(2.0, 0.5, -3.0);
        let b = Vec3::new(4.0, 1.0, -3.5);
        let c = Vec3::new(3.0, 3.0, -2.0);
        let tri = Triangle::flat(a, b, c, MAT);

        let centroid = (a + b + c) / 3.0;
        // Approach from the front side
        let origin = centroid + 5.0 * tri.face_normal();
        let ray = Ray::new_simple(origin, centroid - origin);

        let rec = tri.hit(&ray, RANGE).unwrap();
        assert!((rec.u - 1.0 / 3.0).abs() < 1e-4);
        assert!((rec.v - 1.0 / 3.0).abs() < 1e-4);
        assert!((rec.p - centroid).length() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_rejected() {
        let ray = Ray::new_simple(Vec3::new(-5.0, 0.0, -1.0), Vec3::X);
        assert!(xy_triangle().hit(&ray, RANGE).is_none());
        assert!(xy_triangle()
            .with_culling(Culling::DoubleSided)
            .hit(&ray, RANGE)
            .is_none());
    }

    #[test]
    fn test_back_face_culling() {
        // Arrives from behind: det < 0
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        assert!(xy_triangle().hit(&ray, RANGE).is_none());

        let rec = xy_triangle()
            .with_culling(Culling::DoubleSided)
            .hit(&ray, RANGE)
            .unwrap();
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
        assert!((rec.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_smooth_normal_interpolation() {
        let n_a = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let n_b = Vec3::new(1.0, 0.0, 1.0).normalize();
        let n_c = Vec3::Z;
        let tri = Triangle::smooth(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            [n_a, n_b, n_c],
            MAT,
        );

        // Hit exactly on vertex A's side: u = v = 0 gives n_a
        let ray = Ray::new_simple(Vec3::new(-0.999, -0.999, 0.0), -Vec3::Z);
        let rec = tri.hit(&ray, RANGE).unwrap();
        assert!((rec.normal - n_a).length() < 0.01);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bbox_padding() {
        let bbox = xy_triangle().bounding_box(0.0, 1.0);
        assert!(bbox.z.min < -1.0 && bbox.z.max > -1.0);
        assert!((bbox.x.min - (-1.001)).abs() < 1e-5);
    }
}
