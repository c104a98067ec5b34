//! Triangle meshes as renderable geometry.
//!
//! A loaded `Mesh` is turned into triangles once and wrapped in its own BVH,
//! which is then added to the scene as a single top-level object.

use crate::{BvhNode, Culling, HitRecord, Hittable, MaterialId, Primitive, Triangle};
use lumen_core::Mesh;
use lumen_math::{Aabb, Interval, Ray};

/// A mesh's triangles behind a dedicated BVH.
#[derive(Debug)]
pub struct MeshGeometry {
    bvh: BvhNode,
    triangle_count: usize,
}

impl MeshGeometry {
    /// Build triangles from `mesh` with one shared material.
    ///
    /// Meshes with per-vertex normals produce smooth triangles, others flat ones.
    pub fn new(mesh: &Mesh, material: MaterialId, culling: Culling) -> Self {
        let triangles: Vec<Primitive> = mesh
            .triangles()
            .enumerate()
            .map(|(i, [a, b, c])| {
                let triangle = match mesh.triangle_normals(i) {
                    Some(normals) => Triangle::smooth(a, b, c, normals, material),
                    None => Triangle::flat(a, b, c, material),
                };
                triangle.with_culling(culling).into()
            })
            .collect();

        let triangle_count = triangles.len();
        // Triangles are static, the shutter does not matter
        let bvh = BvhNode::build(triangles, 0.0, 0.0);

        log::info!(
            "Mesh BVH: {} triangles ({} shading), depth {}",
            triangle_count,
            if mesh.has_normals() { "smooth" } else { "flat" },
            bvh.stats().depth
        );

        Self {
            bvh,
            triangle_count,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }
}

impl Hittable for MeshGeometry {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.bvh.hit(ray, ray_t)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.bvh.bounding_box(time0, time1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;

    /// Two triangles forming the unit square at z = -2, facing +Z.
    fn quad(normals: bool) -> Mesh {
        let positions = vec![
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(1.0, 0.0, -2.0),
            Vec3::new(1.0, 1.0, -2.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(1.0, 1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
        ];
        let normals = normals.then(|| vec![Vec3::new(0.0, 0.6, 0.8); 6]);
        Mesh::new(positions, normals).unwrap()
    }

    #[test]
    fn test_flat_mesh_hits_face_normal() {
        let geometry = MeshGeometry::new(&quad(false), MaterialId::new(3), Culling::BackFace);
        assert_eq!(geometry.triangle_count(), 2);

        let ray = Ray::new_simple(Vec3::new(0.25, 0.75, 0.0), -Vec3::Z);
        let rec = geometry.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.material, MaterialId::new(3));
    }

    #[test]
    fn test_smooth_mesh_uses_vertex_normals() {
        let geometry = MeshGeometry::new(&quad(true), MaterialId::new(0), Culling::BackFace);
        let ray = Ray::new_simple(Vec3::new(0.75, 0.25, 0.0), -Vec3::Z);
        let rec = geometry.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.normal - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_culling_applies_to_every_triangle() {
        let from_behind = Ray::new_simple(Vec3::new(0.5, 0.4, -5.0), Vec3::Z);
        let range = Interval::new(0.001, f32::INFINITY);

        let culled = MeshGeometry::new(&quad(false), MaterialId::new(0), Culling::BackFace);
        assert!(culled.hit(&from_behind, range).is_none());

        let double = MeshGeometry::new(&quad(false), MaterialId::new(0), Culling::DoubleSided);
        assert!(double.hit(&from_behind, range).is_some());
    }
}
