//! Closed set of geometric primitives.
//!
//! The BVH stores primitives by value in this enum, so traversal dispatches
//! with a match instead of a vtable call per candidate.

use crate::{AaRect, HitRecord, Hittable, MovingSphere, Sphere, Triangle};
use lumen_math::{Aabb, Interval, Ray};

#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    MovingSphere(MovingSphere),
    Rect(AaRect),
    Triangle(Triangle),
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t),
            Primitive::MovingSphere(s) => s.hit(ray, ray_t),
            Primitive::Rect(r) => r.hit(ray, ray_t),
            Primitive::Triangle(t) => t.hit(ray, ray_t),
        }
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        match self {
            Primitive::Sphere(s) => s.bounding_box(time0, time1),
            Primitive::MovingSphere(s) => s.bounding_box(time0, time1),
            Primitive::Rect(r) => r.bounding_box(time0, time1),
            Primitive::Triangle(t) => t.bounding_box(time0, time1),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<MovingSphere> for Primitive {
    fn from(s: MovingSphere) -> Self {
        Primitive::MovingSphere(s)
    }
}

impl From<AaRect> for Primitive {
    fn from(r: AaRect) -> Self {
        Primitive::Rect(r)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}
