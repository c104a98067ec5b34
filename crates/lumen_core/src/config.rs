//! Render job configuration.
//!
//! A render job is described by a JSON document. Every field is optional and
//! falls back to the reference Cornell box setup, so `{}` is a valid job.
//!
//! ```json
//! {
//!   "image": { "width": 400, "samples_per_pixel": 100, "tiles": [4, 4] },
//!   "camera": { "look_from": [0, 0, -800], "vfov": 40 },
//!   "scene": "cornell",
//!   "objects": [
//!     { "mesh": "teapot.txt", "model_view": "mv_mat_0.txt",
//!       "normal_matrix": "norm_mat_0.txt", "material": "metal", "scale": 10 }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LoadError;

/// Top-level render job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfigFile {
    pub image: ImageConfig,
    pub camera: CameraConfig,
    pub background: [f32; 3],
    pub scene: SceneKind,
    pub objects: Vec<ObjectConfig>,
}

/// Output image and sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    pub width: u32,
    /// Width / height; the height is derived from it.
    pub aspect_ratio: f32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// Tile grid as [columns, rows].
    pub tiles: [u32; 2],
    /// Fixed seed for reproducible renders.
    pub seed: Option<u64>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 400,
            aspect_ratio: 1.0,
            samples_per_pixel: 1000,
            max_depth: 50,
            tiles: [4, 4],
            seed: None,
        }
    }
}

impl ImageConfig {
    /// Reject aspect ratios that cannot derive a height (zero, negative, NaN, infinite).
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite() {
            Ok(())
        } else {
            Err(LoadError::AspectRatio(self.aspect_ratio))
        }
    }
}

/// Camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub vup: [f32; 3],
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub aperture: f32,
    pub focus_dist: f32,
    /// Shutter open/close times
    pub shutter: [f32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: [0.0, 0.0, -800.0],
            look_at: [0.0, 0.0, 0.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 40.0,
            aperture: 0.0,
            focus_dist: 10.0,
            shutter: [0.0, 1.0],
        }
    }
}

/// A mesh placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectConfig {
    pub mesh: PathBuf,
    #[serde(default)]
    pub model_view: Option<PathBuf>,
    #[serde(default)]
    pub normal_matrix: Option<PathBuf>,
    #[serde(default)]
    pub material: MaterialPreset,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Render both faces of every triangle instead of culling back faces.
    #[serde(default)]
    pub double_sided: bool,
}

fn default_scale() -> f32 {
    1.0
}

/// Built-in scene the objects are placed into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// The Cornell room centered on the origin
    #[default]
    Cornell,
    /// Spheres over a ground sphere
    Spheres,
    /// Nothing but the listed objects
    Empty,
}

/// Named materials available to loaded objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    #[default]
    Diffuse,
    Metal,
    Mirror,
    Glass,
    Light,
}

impl MaterialPreset {
    pub const ALL: [MaterialPreset; 5] = [
        MaterialPreset::Diffuse,
        MaterialPreset::Metal,
        MaterialPreset::Mirror,
        MaterialPreset::Glass,
        MaterialPreset::Light,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MaterialPreset::Diffuse => "diffuse",
            MaterialPreset::Metal => "metal",
            MaterialPreset::Mirror => "mirror",
            MaterialPreset::Glass => "glass",
            MaterialPreset::Light => "light",
        }
    }
}

impl fmt::Display for MaterialPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaterialPreset {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LoadError::UnknownMaterial(s.to_string()))
    }
}

impl FromStr for SceneKind {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cornell" => Ok(SceneKind::Cornell),
            "spheres" => Ok(SceneKind::Spheres),
            "empty" => Ok(SceneKind::Empty),
            _ => Err(LoadError::UnknownScene(s.to_string())),
        }
    }
}
