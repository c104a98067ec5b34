//! Tile partitioning for parallel rendering.
//!
//! The image is split into a regular grid of equally sized tiles; each tile is
//! rendered by exactly one worker.

use crate::{RenderError, RenderResult};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner
    pub x: u32,
    /// Y coordinate of the tile's top-left corner (row 0 is the image top)
    pub y: u32,
    /// Width of the tile in pixels
    pub width: u32,
    /// Height of the tile in pixels
    pub height: u32,
    /// Row-major index of this tile in the grid
    pub index: usize,
}

impl Tile {
    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x..self.x + self.width).contains(&x) && (self.y..self.y + self.height).contains(&y)
    }
}

/// Number of tile columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub columns: u32,
    pub rows: u32,
}

/// Default grid: 4 x 4 tiles.
pub const DEFAULT_TILE_GRID: TileGrid = TileGrid {
    columns: 4,
    rows: 4,
};

impl Default for TileGrid {
    fn default() -> Self {
        DEFAULT_TILE_GRID
    }
}

impl TileGrid {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Total number of tiles (and workers).
    pub fn count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Check that the grid evenly divides a `width x height` image.
    pub fn validate(&self, width: u32, height: u32) -> RenderResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(RenderError::ZeroTiles);
        }
        if width % self.columns != 0 || height % self.rows != 0 {
            return Err(RenderError::TileGrid {
                columns: self.columns,
                rows: self.rows,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Partition a `width x height` image into tiles, in row-major order.
    pub fn tiles(&self, width: u32, height: u32) -> RenderResult<Vec<Tile>> {
        self.validate(width, height)?;

        let tile_w = width / self.columns;
        let tile_h = height / self.rows;

        let tiles = (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |col| (row, col)))
            .enumerate()
            .map(|(index, (row, col))| Tile {
                x: col * tile_w,
                y: row * tile_h,
                width: tile_w,
                height: tile_h,
                index,
            })
            .collect();

        Ok(tiles)
    }

    /// Grid of `workers` tiles that evenly partitions the image, as close to
    /// square as possible.
    pub fn for_workers(workers: u32, width: u32, height: u32) -> RenderResult<Self> {
        if workers == 0 {
            return Err(RenderError::ZeroTiles);
        }

        (1..=workers)
            .filter(|columns| workers % columns == 0)
            .map(|columns| Self::new(columns, workers / columns))
            .filter(|grid| grid.validate(width, height).is_ok())
            .min_by_key(|grid| (grid.columns.abs_diff(grid.rows), grid.rows))
            .ok_or(RenderError::NoTileFactorization {
                workers,
                width,
                height,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_cover_every_pixel_once() {
        let (width, height) = (120, 60);
        let tiles = TileGrid::new(4, 3).tiles(width, height).unwrap();
        assert_eq!(tiles.len(), 12);

        for y in 0..height {
            for x in 0..width {
                let owners = tiles.iter().filter(|t| t.contains(x, y)).count();
                assert_eq!(owners, 1, "pixel ({x}, {y}) owned by {owners} tiles");
            }
        }

        let total_pixels: u32 = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total_pixels, width * height);
    }

    #[test]
    fn test_tiles_row_major_indices() {
        let tiles = TileGrid::new(2, 2).tiles(4, 4).unwrap();
        let origins: Vec<(u32, u32)> = tiles.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(origins, vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
        assert!(tiles.iter().enumerate().all(|(i, t)| t.index == i));
    }

    #[test]
    fn test_uneven_grid_rejected() {
        let err = TileGrid::default().tiles(401, 400).unwrap_err();
        assert!(matches!(err, RenderError::TileGrid { columns: 4, .. }));
        assert!(err.to_string().contains("401x400"));

        assert!(matches!(
            TileGrid::new(0, 4).tiles(400, 400),
            Err(RenderError::ZeroTiles)
        ));
    }

    #[test]
    fn test_for_workers_prefers_square() {
        assert_eq!(TileGrid::for_workers(16, 400, 400).unwrap(), TileGrid::new(4, 4));
        assert_eq!(TileGrid::for_workers(8, 400, 400).unwrap(), TileGrid::new(4, 2));
        assert_eq!(TileGrid::for_workers(1, 7, 3).unwrap(), TileGrid::new(1, 1));
    }

    #[test]
    fn test_for_workers_respects_divisibility() {
        // 6 = 3x2 or 2x3; only 2 columns divide a width of 10
        assert_eq!(TileGrid::for_workers(6, 10, 9).unwrap(), TileGrid::new(2, 3));

        assert!(matches!(
            TileGrid::for_workers(7, 10, 10),
            Err(RenderError::NoTileFactorization { workers: 7, .. })
        ));
    }
}
