//! File loading for render jobs, meshes and transforms.
//!
//! Everything here runs before rendering starts; any malformed input is
//! reported as a `LoadError` so the renderer only ever sees well-formed scenes.

use std::path::Path;

use lumen_math::{Mat3, Mat3Ext, Mat4, Mat4Ext};
use thiserror::Error;

use crate::config::{ObjectConfig, RenderConfigFile};
use crate::mesh::{Mesh, MeshError};
use crate::parser::{parse_matrix_rows, parse_mesh_text, ParseError};

/// Errors that can occur while loading scene inputs.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse { path: String, source: ParseError },

    #[error("Invalid mesh {path}: {source}")]
    Mesh { path: String, source: MeshError },

    #[error("Invalid render config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Unknown material '{0}' (expected diffuse, metal, mirror, glass or light)")]
    UnknownMaterial(String),

    #[error("Unknown scene '{0}' (expected cornell, spheres or empty)")]
    UnknownScene(String),

    #[error("Aspect ratio must be positive and finite, got {0}")]
    AspectRatio(f32),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn read(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_error(path: &Path) -> impl FnOnce(ParseError) -> LoadError + '_ {
    move |source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    }
}

/// Load a render job from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> LoadResult<RenderConfigFile> {
    let content = read(path.as_ref())?;
    let config: RenderConfigFile = serde_json::from_str(&content)?;
    config.image.validate()?;
    Ok(config)
}

/// Load a vertex/normal mesh file.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let text = parse_mesh_text(&read(path)?).map_err(parse_error(path))?;

    let mesh = Mesh::new(text.positions, text.normals).map_err(|source| LoadError::Mesh {
        path: path.display().to_string(),
        source,
    })?;

    log::info!(
        "Loaded mesh {}: {} triangles{}",
        path.display(),
        mesh.triangle_count(),
        if mesh.has_normals() { " with vertex normals" } else { "" }
    );

    Ok(mesh)
}

/// Load a 4x4 model-view matrix file (rows as written).
pub fn load_model_view<P: AsRef<Path>>(path: P) -> LoadResult<Mat4> {
    let path = path.as_ref();
    let rows = parse_matrix_rows::<4>(&read(path)?).map_err(parse_error(path))?;
    Ok(<Mat4 as Mat4Ext>::from_rows(rows))
}

/// Load a 3x3 normal matrix file (rows as written).
pub fn load_normal_matrix<P: AsRef<Path>>(path: P) -> LoadResult<Mat3> {
    let path = path.as_ref();
    let rows = parse_matrix_rows::<3>(&read(path)?).map_err(parse_error(path))?;
    Ok(<Mat3 as Mat3Ext>::from_rows(rows))
}

/// Load an object's mesh and bring it into world space.
///
/// Scale is applied first, then the model-view and normal matrices. Missing
/// matrices default to identity.
pub fn load_object(object: &ObjectConfig) -> LoadResult<Mesh> {
    let model_view = match &object.model_view {
        Some(path) => load_model_view(path)?,
        None => Mat4::IDENTITY,
    };
    let normal_matrix = match &object.normal_matrix {
        Some(path) => load_normal_matrix(path)?,
        None => Mat3::IDENTITY,
    };

    let mesh = load_mesh(&object.mesh)?
        .scaled(object.scale)
        .transformed(&model_view, &normal_matrix);

    log::debug!("Object {} world bounds: {:?}", object.mesh.display(), mesh.bounds());
    Ok(mesh)
}
