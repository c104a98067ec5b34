//! Parsers for the plain-text scene inputs.
//!
//! # Supported Formats
//!
//! - Mesh files: line 1 holds comma-separated vertex positions
//!   (`x,y,z,x,y,z,...`), line 2 optionally holds per-vertex normals in the
//!   same layout.
//! - Matrix files: one row per line, whitespace-separated numbers.
//!   4x4 for model-view transforms, 3x3 for normal matrices.

use lumen_math::Vec3;
use thiserror::Error;

/// Errors that can occur while parsing scene text.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Invalid number '{token}' at line {line}")]
    InvalidNumber { line: usize, token: String },

    #[error("Line {line}: {count} values is not a multiple of 3")]
    NotTriples { line: usize, count: usize },

    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} matrix rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("Missing vertex position line")]
    MissingPositions,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Positions and optional normals read from a mesh file.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshText {
    pub positions: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
}

/// Parse a mesh file's content.
///
/// Empty tokens (e.g. a trailing comma) are ignored.
pub fn parse_mesh_text(content: &str) -> ParseResult<MeshText> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, s)| (i + 1, s.trim()))
        .filter(|(_, s)| !s.is_empty());

    let (line, positions) = lines.next().ok_or(ParseError::MissingPositions)?;
    let positions = parse_vec3_list(line, positions)?;

    let normals = match lines.next() {
        Some((line, normals)) => Some(parse_vec3_list(line, normals)?),
        None => None,
    };

    Ok(MeshText { positions, normals })
}

/// Parse an `N`x`N` matrix as rows, in file order.
pub fn parse_matrix_rows<const N: usize>(content: &str) -> ParseResult<[[f32; N]; N]> {
    let mut rows = [[0.0; N]; N];
    let mut found = 0;

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if found == N {
            return Err(ParseError::RowCount {
                expected: N,
                found: found + 1,
            });
        }

        let values = trimmed
            .split_whitespace()
            .map(|token| parse_number(line_no, token))
            .collect::<ParseResult<Vec<f32>>>()?;

        if values.len() != N {
            return Err(ParseError::ColumnCount {
                line: line_no,
                expected: N,
                found: values.len(),
            });
        }

        rows[found].copy_from_slice(&values);
        found += 1;
    }

    if found != N {
        return Err(ParseError::RowCount { expected: N, found });
    }

    Ok(rows)
}

fn parse_vec3_list(line: usize, text: &str) -> ParseResult<Vec<Vec3>> {
    let values = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_number(line, token))
        .collect::<ParseResult<Vec<f32>>>()?;

    if values.len() % 3 != 0 {
        return Err(ParseError::NotTriples {
            line,
            count: values.len(),
        });
    }

    Ok(values
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}

fn parse_number(line: usize, token: &str) -> ParseResult<f32> {
    token.parse::<f32>().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
