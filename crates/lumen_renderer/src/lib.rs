//! Lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for offline rendering of physically-based scenes:
//! spheres, axis-aligned rectangles and triangle meshes behind a BVH, shaded
//! with diffuse, metal, glass and emissive materials.
//!
//! The image is split into a fixed grid of tiles, each rendered by its own
//! worker thread with its own random stream.
//!
//! # Example
//!
//! ```ignore
//! use lumen_renderer::{render, scenes, CameraSettings, RenderContext, RenderSettings, Scene};
//!
//! let mut scene = Scene::new();
//! scenes::cornell_box(&mut scene);
//! let camera = CameraSettings::new()
//!     .with_position(Vec3::new(0.0, 0.0, -800.0), Vec3::ZERO, Vec3::Y)
//!     .with_lens(40.0, 0.0, 10.0)
//!     .build();
//! let image = render(&RenderContext::new(scene, camera, RenderSettings::default()))?;
//! ```

mod bvh;
mod camera;
mod driver;
mod error;
mod hittable;
mod material;
mod mesh_geometry;
mod pixel_buffer;
mod primitive;
mod rect;
mod renderer;
mod scene;
mod sphere;
mod tile;
mod triangle;

pub mod output;
pub mod sampling;
pub mod scenes;

pub use bvh::{BvhNode, BvhStats};
pub use camera::{Camera, CameraSettings};
pub use driver::{render, RenderContext};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Material, MaterialId, MaterialTable, Scatter};
pub use mesh_geometry::MeshGeometry;
pub use pixel_buffer::{PixelBuffer, Rgb, TileView};
pub use primitive::Primitive;
pub use rect::{AaRect, Plane};
pub use renderer::{color_to_rgb, linear_to_gamma, ray_color, sample_pixel, RenderSettings};
pub use scene::Scene;
pub use sphere::{MovingSphere, Sphere};
pub use tile::{Tile, TileGrid, DEFAULT_TILE_GRID};
pub use triangle::{Culling, Shading, Triangle};

/// Re-export common math types from lumen_math
pub use lumen_math::{Aabb, Color, Interval, Ray, Vec3};
