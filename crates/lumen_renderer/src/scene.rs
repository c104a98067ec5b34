//! Renderable scene: the material arena plus the top-level objects.

use crate::{HitRecord, Hittable, HittableList, Material, MaterialId, MaterialTable};
use lumen_math::{Aabb, Interval, Ray};

/// Everything the estimator needs to shade a ray.
///
/// A scene is assembled single-threaded, then shared read-only by all workers.
#[derive(Default)]
pub struct Scene {
    materials: MaterialTable,
    objects: HittableList,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return the id primitives should reference.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.add(material)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Add a top-level object (a primitive, a mesh BVH, ...).
    pub fn add<H: Hittable + 'static>(&mut self, object: H) {
        self.objects.add(Box::new(object));
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.objects.hit(ray, ray_t)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.objects.bounding_box(time0, time1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;
    use lumen_math::{Color, Vec3};

    #[test]
    fn test_scene_resolves_hit_material() {
        let mut scene = Scene::new();
        let red = scene.add_material(Material::lambertian(Color::new(1.0, 0.0, 0.0)));
        let glass = scene.add_material(Material::dielectric(1.5));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, red));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, glass));

        assert_eq!(scene.object_count(), 2);
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert_eq!(
            scene.material(rec.material),
            Some(&Material::lambertian(Color::new(1.0, 0.0, 0.0)))
        );
    }
}
