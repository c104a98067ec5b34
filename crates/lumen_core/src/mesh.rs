//! Triangle mesh geometry for Lumen scenes.
//!
//! Meshes are stored as a triangle soup: every three consecutive vertices form
//! one triangle. This matches the vertex/normal text files the loader reads and
//! keeps the renderer's conversion a straight walk over the vertex list.

use lumen_math::{Aabb, Mat3, Mat3Ext, Mat4, Mat4Ext, Vec3};
use thiserror::Error;

/// Structural problems in mesh data.
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    #[error("Vertex count {0} is not a multiple of 3")]
    VertexCount(usize),

    #[error("Normal count {normals} does not match vertex count {positions}")]
    NormalCount { positions: usize, normals: usize },

    #[error("Mesh has no triangles")]
    Empty,
}

/// A triangle soup with optional per-vertex normals.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions, three per triangle
    positions: Vec<Vec3>,

    /// Per-vertex normals (None for flat-shaded meshes)
    normals: Option<Vec<Vec3>>,

    /// Axis-aligned bounding box
    bounds: Aabb,
}

impl Mesh {
    /// Create a mesh, validating that the vertex and normal lists describe whole triangles.
    pub fn new(positions: Vec<Vec3>, normals: Option<Vec<Vec3>>) -> Result<Self, MeshError> {
        if positions.is_empty() {
            return Err(MeshError::Empty);
        }
        if positions.len() % 3 != 0 {
            return Err(MeshError::VertexCount(positions.len()));
        }
        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                return Err(MeshError::NormalCount {
                    positions: positions.len(),
                    normals: normals.len(),
                });
            }
        }

        let bounds = Self::compute_bounds(&positions);
        Ok(Self {
            positions,
            normals,
            bounds,
        })
    }

    fn compute_bounds(positions: &[Vec3]) -> Aabb {
        let (min, max) = positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        Aabb::from_points(min, max)
    }

    /// Uniformly scale every vertex position about the origin.
    pub fn scaled(mut self, factor: f32) -> Self {
        for p in &mut self.positions {
            *p *= factor;
        }
        self.bounds = Self::compute_bounds(&self.positions);
        self
    }

    /// Apply a model-view transform to positions and a normal matrix to normals.
    ///
    /// Normals that collapse under the normal matrix fall back to the triangle's
    /// face normal.
    pub fn transformed(mut self, model_view: &Mat4, normal_matrix: &Mat3) -> Self {
        for p in &mut self.positions {
            *p = model_view.transform_position(*p);
        }

        if let Some(normals) = &mut self.normals {
            let mut degenerate = 0usize;
            for (i, n) in normals.iter_mut().enumerate() {
                *n = match normal_matrix.transform_normal(*n) {
                    Some(transformed) => transformed,
                    None => {
                        degenerate += 1;
                        let base = i - i % 3;
                        face_normal(&self.positions[base..base + 3])
                    }
                };
            }
            if degenerate > 0 {
                log::warn!(
                    "{} vertex normals collapsed under the normal matrix, using face normals",
                    degenerate
                );
            }
        }

        self.bounds = Self::compute_bounds(&self.positions);
        self
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Per-vertex normals of triangle `index`, if the mesh has them.
    pub fn triangle_normals(&self, index: usize) -> Option<[Vec3; 3]> {
        let normals = self.normals.as_ref()?;
        let base = index * 3;
        normals
            .get(base..base + 3)
            .map(|n| [n[0], n[1], n[2]])
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Unit normal of a counter-clockwise triangle, or +Y if it is degenerate.
fn face_normal(vertices: &[Vec3]) -> Vec3 {
    (vertices[1] - vertices[0])
        .cross(vertices[2] - vertices[0])
        .try_normalize()
        .unwrap_or(Vec3::Y)
}
