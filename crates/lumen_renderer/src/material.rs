//! Surface scattering materials.
//!
//! Materials live once in a `MaterialTable`; primitives refer to them by
//! `MaterialId`, so thousands of mesh triangles share one instance.

use crate::sampling::{gen_f32, random_unit_vector};
use crate::HitRecord;
use lumen_math::{near_zero, reflect, refract, Color, Ray, Vec3};
use rand::RngCore;

/// Result of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Per-channel throughput applied to light arriving along `scattered`
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Material models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse reflector
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` in [0, 1] roughens the reflection
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive material with index of refraction `ir`
    Dielectric { ir: f32 },
    /// Constant emitter that does not scatter
    DiffuseLight { emit: Color },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with `fuzz` clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Dielectric with index of refraction `ir` (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn dielectric(ir: f32) -> Self {
        Material::Dielectric { ir }
    }

    pub fn diffuse_light(emit: Color) -> Self {
        Material::DiffuseLight { emit }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed (or, for lights, terminated).
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate directions and rounding below the surface
                if near_zero(direction, 1e-8) || direction.dot(rec.normal) < 0.0 {
                    direction = rec.normal;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }

            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_unit_vector(rng);

                // Fuzzed into the surface: absorbed
                if direction.dot(rec.normal) <= 0.0 {
                    return None;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }

            Material::Dielectric { ir } => {
                let refraction_ratio = if rec.front_face { 1.0 / ir } else { ir };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

                let cannot_refract = refraction_ratio * sin_theta > 1.0;

                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(Scatter {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }

            Material::DiffuseLight { .. } => None,
        }
    }

    /// Light emitted at the given surface point. Black unless the material is a light.
    pub fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        match *self {
            Material::DiffuseLight { emit } => emit,
            _ => Color::ZERO,
        }
    }
}

/// Schlick's approximation for Fresnel reflectance.
///
/// Matched indices form no interface, so nothing is reflected.
fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    if refraction_ratio == 1.0 {
        return 0.0;
    }
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Index of a material in a `MaterialTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena of materials shared by every primitive in a scene.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its id.
    pub fn add(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    /// Look up a material. Ids are only valid for the table that issued them.
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
