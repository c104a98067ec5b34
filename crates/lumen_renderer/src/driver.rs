//! Tiled parallel render driver.
//!
//! One worker thread per tile; workers share the scene read-only and write
//! only to their own tile's cells, then the driver joins them all.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::pixel_buffer::TileView;
use crate::renderer::{color_to_rgb, sample_pixel};
use crate::{Camera, PixelBuffer, RenderError, RenderResult, RenderSettings, Scene};

/// Everything a worker reads while rendering.
pub struct RenderContext {
    pub scene: Scene,
    pub camera: Camera,
    pub settings: RenderSettings,
}

impl RenderContext {
    pub fn new(scene: Scene, camera: Camera, settings: RenderSettings) -> Self {
        Self {
            scene,
            camera,
            settings,
        }
    }
}

/// Render the scene into a new pixel buffer, blocking until every tile is done.
///
/// Settings are validated before any worker starts.
pub fn render(ctx: &RenderContext) -> RenderResult<PixelBuffer> {
    let settings = &ctx.settings;
    let (width, height) = (settings.image_width, settings.image_height);

    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    if settings.samples_per_pixel == 0 {
        return Err(RenderError::ZeroSamples);
    }
    let tiles = settings.tiles.tiles(width, height)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(tiles.len())
        .thread_name(|i| format!("lumen-tile-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {}x{} tiles",
        width,
        height,
        settings.samples_per_pixel,
        settings.max_depth,
        settings.tiles.columns,
        settings.tiles.rows
    );
    let start = Instant::now();

    let mut buffer = PixelBuffer::new(width, height);
    let views = buffer.tile_views_mut(&tiles);

    pool.scope(|s| {
        for view in views {
            let mut rng = tile_rng(settings.seed, view.tile().index);
            s.spawn(move |_| render_tile(ctx, view, &mut rng));
        }
    });

    log::info!("Render complete in {:.2?}", start.elapsed());
    Ok(buffer)
}

/// Render every pixel of one tile.
fn render_tile(ctx: &RenderContext, mut view: TileView<'_>, rng: &mut StdRng) {
    let tile = view.tile();
    let start = Instant::now();

    view.for_each_pixel(|x, y, cell| {
        let color = sample_pixel(&ctx.camera, &ctx.scene, &ctx.settings, x, y, rng);
        *cell = color_to_rgb(color);
    });

    log::debug!(
        "Tile {} ({}x{} at {},{}) done in {:.2?}",
        tile.index,
        tile.width,
        tile.height,
        tile.x,
        tile.y,
        start.elapsed()
    );
}

/// Independent generator for one tile.
///
/// With a seed, every tile gets a distinct, reproducible stream.
fn tile_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(tile_seed(seed, index)),
        None => StdRng::from_entropy(),
    }
}

fn tile_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
