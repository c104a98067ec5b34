// Transform utilities for scene loading.
//
// Matrix files are written row-major while glam stores columns, so both
// extensions offer a `from_rows` constructor alongside the vector helpers.

use glam::{Mat3, Mat4, Vec3};

/// Extension trait for 4x4 model-view matrices.
pub trait Mat4Ext {
    /// Build a matrix from four rows, as written in a matrix text file.
    fn from_rows(rows: [[f32; 4]; 4]) -> Self;

    /// Transform a point (w=1), applying the projective divide when w != 1.
    fn transform_position(&self, point: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Mat4::from_cols_array_2d(&rows).transpose()
    }

    fn transform_position(&self, point: Vec3) -> Vec3 {
        self.project_point3(point)
    }
}

/// Extension trait for 3x3 normal matrices.
pub trait Mat3Ext {
    /// Build a matrix from three rows, as written in a matrix text file.
    fn from_rows(rows: [[f32; 3]; 3]) -> Self;

    /// Transform a surface normal and renormalize it.
    ///
    /// Returns `None` if the transformed normal collapses to zero length.
    fn transform_normal(&self, normal: Vec3) -> Option<Vec3>;
}

impl Mat3Ext for Mat3 {
    fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Mat3::from_cols_array_2d(&rows).transpose()
    }

    fn transform_normal(&self, normal: Vec3) -> Option<Vec3> {
        (*self * normal).try_normalize()
    }
}
