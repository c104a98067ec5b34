//! Core path tracing estimator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a maximum depth
//! - Emission from light materials
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma 2 correction and 8-bit quantization

use crate::{Camera, Hittable, Scene, TileGrid};
use lumen_math::{Color, Interval, Ray};
use rand::RngCore;

use crate::sampling::gen_f32;

/// Closest accepted hit distance, keeps bounced rays off their own surface.
const T_MIN: f32 = 0.001;

/// Render settings shared by every worker.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Radiance returned by rays that escape the scene
    pub background: Color,
    /// How the image is partitioned among workers
    pub tiles: TileGrid,
    /// Base seed for per-tile generators; `None` draws from entropy
    pub seed: Option<u64>,
}

impl RenderSettings {
    /// Settings for an image `width` pixels wide, height derived as `⌊width / aspect⌋`.
    pub fn with_aspect(width: u32, aspect_ratio: f32) -> Self {
        Self {
            image_width: width,
            image_height: (width as f32 / aspect_ratio) as u32,
            ..Self::default()
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 400,
            samples_per_pixel: 1000,
            max_depth: 50,
            background: Color::ZERO,
            tiles: TileGrid::default(),
            seed: None,
        }
    }
}

/// Compute the radiance carried back along a ray.
///
/// Depth exhaustion returns black, a miss returns `background`, an absorbed
/// ray returns only the surface's emission.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    background: Color,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return background;
    };

    let Some(material) = scene.material(rec.material) else {
        log::warn!("hit references unknown material {:?}", rec.material);
        return Color::ZERO;
    };

    let emitted = material.emitted(rec.u, rec.v, rec.p);

    match material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            emitted
                + scatter.attenuation
                    * ray_color(&scatter.scattered, scene, background, depth - 1, rng)
        }
        None => emitted,
    }
}

/// Average of `samples_per_pixel` jittered samples for pixel `(col, row)`.
///
/// Row 0 is the top of the image.
pub fn sample_pixel(
    camera: &Camera,
    scene: &Scene,
    settings: &RenderSettings,
    col: u32,
    row: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let denom_s = settings.image_width.saturating_sub(1).max(1) as f32;
    let denom_t = settings.image_height.saturating_sub(1).max(1) as f32;
    let flipped_row = settings.image_height.saturating_sub(1 + row) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..settings.samples_per_pixel {
        let s = (col as f32 + gen_f32(rng)) / denom_s;
        let t = (flipped_row + gen_f32(rng)) / denom_t;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, settings.background, settings.max_depth, rng);
    }

    pixel_color / settings.samples_per_pixel.max(1) as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and quantize one channel. Non-finite values become 0.
#[inline]
fn quantize(channel: f32) -> u8 {
    if !channel.is_finite() {
        return 0;
    }
    (256.0 * linear_to_gamma(channel).clamp(0.0, 0.999)) as u8
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}
