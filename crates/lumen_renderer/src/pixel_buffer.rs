//! Final 8-bit image and per-tile write views.

use crate::Tile;

/// Quantized 8-bit RGB pixel.
pub type Rgb = [u8; 3];

/// Row-major RGB image, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: Rgb) {
        let offset = self.offset(x, y);
        self.pixels[offset] = rgb;
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Packed RGB bytes (for saving).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Split the buffer into one mutable view per tile.
    ///
    /// `tiles` must come from a grid that evenly divides this buffer (see
    /// `TileGrid::tiles`) and be in row-major order. Views borrow disjoint
    /// row segments, so each cell has exactly one writer.
    pub fn tile_views_mut<'a>(&'a mut self, tiles: &[Tile]) -> Vec<TileView<'a>> {
        let mut views: Vec<TileView<'a>> = tiles
            .iter()
            .map(|&tile| TileView {
                tile,
                rows: Vec::with_capacity(tile.height as usize),
            })
            .collect();

        let Some(first) = tiles.first() else {
            return views;
        };
        let tile_w = first.width.max(1) as usize;
        let tile_h = first.height.max(1) as usize;
        let columns = self.width as usize / tile_w;

        for (y, row) in self.pixels.chunks_mut(self.width.max(1) as usize).enumerate() {
            let band = y / tile_h;
            for (col, segment) in row.chunks_mut(tile_w).enumerate() {
                if let Some(view) = views.get_mut(band * columns + col) {
                    view.rows.push(segment);
                }
            }
        }

        views
    }
}

/// Exclusive access to one tile's pixels.
pub struct TileView<'a> {
    tile: Tile,
    rows: Vec<&'a mut [Rgb]>,
}

impl<'a> TileView<'a> {
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Visit the tile's cells row by row with their global image coordinates.
    pub fn for_each_pixel(&mut self, mut f: impl FnMut(u32, u32, &mut Rgb)) {
        let Tile { x, y, .. } = self.tile;
        for (dy, row) in self.rows.iter_mut().enumerate() {
            for (dx, cell) in row.iter_mut().enumerate() {
                f(x + dx as u32, y + dy as u32, cell);
            }
        }
    }
}
