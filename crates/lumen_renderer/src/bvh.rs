//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over `Primitive`s. Nodes own their children and primitives by
//! value, so traversal is a plain recursive match with no dynamic dispatch.

use crate::{HitRecord, Hittable, Primitive};
use lumen_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf with primitives.
#[derive(Debug)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with one or two primitives.
    Leaf {
        primitives: Vec<Primitive>,
        bbox: Aabb,
    },
    /// Empty tree.
    Empty,
}

/// Shape of a built tree, logged after construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,
    pub primitives: usize,
    pub depth: usize,
}

impl BvhNode {
    /// Build a BVH over `primitives` for the shutter interval `[time0, time1]`.
    pub fn build(primitives: Vec<Primitive>, time0: f32, time1: f32) -> Self {
        if primitives.is_empty() {
            return BvhNode::Empty;
        }

        // Each box is computed once and travels with its primitive
        let items: Vec<(Primitive, Aabb)> = primitives
            .into_iter()
            .map(|p| {
                let bbox = p.bounding_box(time0, time1);
                (p, bbox)
            })
            .collect();

        let node = Self::build_recursive(items);
        let stats = node.stats();
        log::debug!(
            "BVH built: {} primitives, {} nodes, {} leaves, depth {}",
            stats.primitives,
            stats.nodes,
            stats.leaves,
            stats.depth
        );
        node
    }

    /// Median split along the longest axis of the centroid bounds.
    fn build_recursive(mut items: Vec<(Primitive, Aabb)>) -> Self {
        let bbox = items
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, b)| Aabb::surrounding(&acc, b));

        if items.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                primitives: items.into_iter().map(|(p, _)| p).collect(),
                bbox,
            };
        }

        let centroid_bounds = items.iter().fold(Aabb::EMPTY, |acc, (_, b)| {
            let c = b.centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        // Stable: ties keep input order
        items.sort_by(|(_, a), (_, b)| a.centroid()[axis].total_cmp(&b.centroid()[axis]));

        let right_items = items.split_off(items.len() / 2);
        let left = Self::build_recursive(items);
        let right = Self::build_recursive(right_items);

        BvhNode::Branch {
            bbox: Aabb::surrounding(&left.node_box(), &right.node_box()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn node_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    /// Count nodes, leaves, primitives and depth.
    pub fn stats(&self) -> BvhStats {
        match self {
            BvhNode::Empty => BvhStats::default(),
            BvhNode::Leaf { primitives, .. } => BvhStats {
                nodes: 1,
                leaves: 1,
                primitives: primitives.len(),
                depth: 1,
            },
            BvhNode::Branch { left, right, .. } => {
                let l = left.stats();
                let r = right.stats();
                BvhStats {
                    nodes: 1 + l.nodes + r.nodes,
                    leaves: l.leaves + r.leaves,
                    primitives: l.primitives + r.primitives,
                    depth: 1 + l.depth.max(r.depth),
                }
            }
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { primitives, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest: Option<HitRecord> = None;
                for prim in primitives {
                    let range = closest.map_or(ray_t, |rec| ray_t.with_max(rec.t));
                    if let Some(rec) = prim.hit(ray, range) {
                        closest = Some(rec);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_range = hit_left.map_or(ray_t, |rec| ray_t.with_max(rec.t));
                right.hit(ray, right_range).or(hit_left)
            }
        }
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        self.node_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AaRect, HittableList, MaterialId, MovingSphere, Sphere, Triangle};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const RANGE: Interval = Interval::new(0.001, f32::INFINITY);

    fn random_scene(rng: &mut StdRng, count: usize) -> Vec<Primitive> {
        (0..count)
            .map(|i| {
                let center = Vec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-30.0..-5.0),
                );
                let mat = MaterialId::new(i as u32);
                match i % 4 {
                    0 => Sphere::new(center, rng.gen_range(0.2..1.5), mat).into(),
                    1 => MovingSphere::new(
                        (center, 0.0),
                        (center + Vec3::new(0.0, 0.5, 0.0), 1.0),
                        0.4,
                        mat,
                    )
                    .into(),
                    2 => AaRect::xy(
                        center.x - 0.5,
                        center.x + 0.5,
                        center.y - 0.5,
                        center.y + 0.5,
                        center.z,
                        mat,
                    )
                    .into(),
                    _ => Triangle::flat(
                        center,
                        center + Vec3::new(1.0, 0.0, 0.0),
                        center + Vec3::new(0.0, 1.0, 0.0),
                        mat,
                    )
                    .into(),
                }
            })
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::build(vec![], 0.0, 1.0);
        assert!(matches!(bvh, BvhNode::Empty));
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        assert!(bvh.hit(&ray, RANGE).is_none());
    }

    #[test]
    fn test_bvh_single_sphere() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::new(0));
        let bvh = BvhNode::build(vec![sphere.into()], 0.0, 1.0);

        // Should create a leaf
        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(bvh.hit(&ray, RANGE).is_some());
    }

    #[test]
    fn test_bvh_leaf_size_and_stats() {
        let mut rng = StdRng::seed_from_u64(2);
        let bvh = BvhNode::build(random_scene(&mut rng, 37), 0.0, 1.0);
        let stats = bvh.stats();

        assert_eq!(stats.primitives, 37);
        assert_eq!(stats.nodes, 2 * stats.leaves - 1);
        // Median split with two per leaf: at least ceil(37 / 2) leaves
        assert!(stats.leaves >= 19);
        assert!(stats.depth <= 7);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let spheres: Vec<Primitive> = (0..10)
            .map(|i| Sphere::new(Vec3::new(i as f32, 0.0, -5.0), 0.5, MaterialId::new(i)).into())
            .collect();
        let bvh = BvhNode::build(spheres, 0.0, 1.0);

        // Test ray that hits sphere at x=5
        let ray = Ray::new_simple(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh.hit(&ray, RANGE).unwrap();

        // Hit point should be near z = -4.5 (sphere at z=-5, radius 0.5)
        assert!((rec.p.z - (-4.5)).abs() < 0.01);
        assert_eq!(rec.material, MaterialId::new(5));
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(17);
        let primitives = random_scene(&mut rng, 200);

        let mut list = HittableList::new();
        for prim in primitives.iter().cloned() {
            list.add(Box::new(prim));
        }
        let bvh = BvhNode::build(primitives, 0.0, 1.0);

        for _ in 0..2000 {
            let origin = Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 5.0);
            let target = Vec3::new(
                rng.gen_range(-12.0..12.0),
                rng.gen_range(-12.0..12.0),
                -20.0,
            );
            let ray = Ray::new(origin, target - origin, rng.gen_range(0.0..1.0));

            match (bvh.hit(&ray, RANGE), list.hit(&ray, RANGE)) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert!((a.t - b.t).abs() < 1e-4, "t mismatch: {} vs {}", a.t, b.t);
                    // Every primitive has its own material id, so the same id
                    // means the same primitive; only an exact tie may pick either
                    if a.t != b.t {
                        assert_eq!(a.material, b.material, "different primitive at t = {}", a.t);
                        assert!((a.normal - b.normal).length() < 1e-4);
                    }
                }
                (a, b) => panic!("bvh {:?} vs linear {:?}", a.map(|r| r.t), b.map(|r| r.t)),
            }
        }
    }

    #[test]
    fn test_bvh_bbox_encloses_primitives() {
        let mut rng = StdRng::seed_from_u64(4);
        let primitives = random_scene(&mut rng, 50);
        let boxes: Vec<Aabb> = primitives.iter().map(|p| p.bounding_box(0.0, 1.0)).collect();
        let bvh = BvhNode::build(primitives, 0.0, 1.0);
        let root = bvh.bounding_box(0.0, 1.0);

        for b in boxes {
            assert!(root.x.min <= b.x.min && root.x.max >= b.x.max);
            assert!(root.y.min <= b.y.min && root.y.max >= b.y.max);
            assert!(root.z.min <= b.z.min && root.z.max >= b.z.max);
        }
    }
}
