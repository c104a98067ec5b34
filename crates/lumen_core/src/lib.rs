//! Lumen Core - scene inputs for the Lumen path tracer.
//!
//! This crate provides:
//!
//! - **Mesh geometry**: triangle soups with optional vertex normals
//! - **Text loaders**: vertex/normal mesh files and row-major matrix files
//! - **Render jobs**: JSON render configuration with reference defaults
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{load_config, load_object};
//!
//! let job = load_config("job.json")?;
//! for object in &job.objects {
//!     let mesh = load_object(object)?;
//!     println!("{} triangles", mesh.triangle_count());
//! }
//! ```

pub mod config;
pub mod loader;
pub mod mesh;
pub mod parser;

// Re-export commonly used types
pub use config::{CameraConfig, ImageConfig, MaterialPreset, ObjectConfig, RenderConfigFile, SceneKind};
pub use loader::{
    load_config, load_mesh, load_model_view, load_normal_matrix, load_object, LoadError, LoadResult,
};
pub use mesh::{Mesh, MeshError};
pub use parser::ParseError;
