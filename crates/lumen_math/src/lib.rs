//! Lumen math: vector algebra, rays, intervals and bounding boxes.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{Mat3Ext, Mat4Ext};

/// RGB color with linear components (typically 0-1, lights may exceed 1).
pub type Color = Vec3;

/// Returns true if every component of `v` is within `eps` of zero.
#[inline]
pub fn near_zero(v: Vec3, eps: f32) -> bool {
    v.x.abs() < eps && v.y.abs() < eps && v.z.abs() < eps
}

/// Mirror `v` about the plane with normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector `uv` through a surface with normal `n` (Snell's law).
///
/// `etai_over_etat` is the ratio of the refractive indices on the incoming and
/// outgoing side. The caller is responsible for checking total internal reflection.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
