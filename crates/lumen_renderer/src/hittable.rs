//! Hittable trait and HitRecord for ray-object intersection.

use crate::MaterialId;
use lumen_math::{Aabb, Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material of the surface that was hit
    pub material: MaterialId,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record for a hit at `t`, orienting `outward_normal` against the ray.
    ///
    /// `outward_normal` is expected to be unit length.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        (u, v): (f32, f32),
        material: MaterialId,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementors are immutable after construction and shared read-only by all
/// render workers.
pub trait Hittable: Send + Sync {
    /// Nearest intersection of `ray` with this object within `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Axis-aligned bounding box enclosing the object over the shutter interval.
    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb;
}

/// A list of hittable objects, tested linearly.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;

        for object in &self.objects {
            let interval = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.objects.iter().fold(Aabb::EMPTY, |acc, object| {
            Aabb::surrounding(&acc, &object.bounding_box(time0, time1))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialTable, Material, Sphere};

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let id = MaterialTable::new().add(Material::lambertian(Vec3::ONE));

        let front = HitRecord::new(&ray, 1.0, Vec3::Z, (0.0, 0.0), id);
        assert!(front.front_face);
        assert_eq!(front.normal, Vec3::Z);

        let back = HitRecord::new(&ray, 1.0, -Vec3::Z, (0.0, 0.0), id);
        assert!(!back.front_face);
        assert_eq!(back.normal, Vec3::Z);
        assert_eq!(back.p, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_list_returns_closest() {
        let mut materials = MaterialTable::new();
        let near = materials.add(Material::lambertian(Vec3::ONE));
        let far = materials.add(Material::lambertian(Vec3::ZERO));

        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, far)));
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, near)));
        assert_eq!(list.len(), 2);

        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let rec = list.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert_eq!(rec.material, near);
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);
        assert!(list.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
        assert_eq!(list.bounding_box(0.0, 1.0), Aabb::EMPTY);
    }
}
