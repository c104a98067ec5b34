//! `lumen` - render a scene to an image file.

mod job;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lumen_core::{load_config, MaterialPreset, ObjectConfig, RenderConfigFile, SceneKind};
use lumen_renderer::{output, render, RenderContext, TileGrid};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(version)]
#[command(about = "Offline path tracer")]
#[command(long_about = "
lumen renders a scene with Monte Carlo path tracing and writes the image to disk.

The render job comes from an optional JSON config file; flags override it.
Without a config the reference Cornell room is rendered.")]
struct Cli {
    /// JSON render job
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image (.ppm writes plain-text P3, other extensions go through the image encoder);
    /// `-` streams P3 to stdout
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,

    /// Built-in scene: cornell, spheres or empty
    #[arg(long)]
    scene: Option<SceneKind>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Width / height ratio
    #[arg(long)]
    aspect: Option<f32>,

    /// Samples per pixel
    #[arg(short, long)]
    spp: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    /// Tile grid as COLUMNSxROWS, one worker per tile
    #[arg(long, value_name = "COLSxROWS", value_parser = parse_tiles, conflicts_with = "workers")]
    tiles: Option<TileGrid>,

    /// Worker count; picks the most square tile grid that divides the image
    #[arg(long)]
    workers: Option<u32>,

    /// Seed for reproducible renders
    #[arg(long)]
    seed: Option<u64>,

    /// Extra mesh files (vertex/normal text format)
    #[arg(long = "mesh", value_name = "PATH")]
    meshes: Vec<PathBuf>,

    /// Material preset for meshes given with --mesh
    #[arg(long, default_value_t = MaterialPreset::Metal)]
    material: MaterialPreset,

    /// Uniform scale for meshes given with --mesh
    #[arg(long, default_value_t = 1.0)]
    mesh_scale: f32,

    /// Log level, overriding RUST_LOG
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn parse_tiles(s: &str) -> Result<TileGrid, String> {
    let (columns, rows) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLUMNSxROWS, got '{s}'"))?;
    let columns = columns.trim().parse().map_err(|e| format!("bad column count: {e}"))?;
    let rows = rows.trim().parse().map_err(|e| format!("bad row count: {e}"))?;
    Ok(TileGrid::new(columns, rows))
}

fn is_stdout(path: &std::path::Path) -> bool {
    path.as_os_str() == "-"
}

impl Cli {
    /// Apply command line overrides on top of the file's job.
    fn apply(&self, config: &mut RenderConfigFile) -> Result<()> {
        if let Some(scene) = self.scene {
            config.scene = scene;
        }
        if let Some(width) = self.width {
            config.image.width = width;
        }
        if let Some(aspect) = self.aspect {
            config.image.aspect_ratio = aspect;
        }
        if let Some(spp) = self.spp {
            config.image.samples_per_pixel = spp;
        }
        if let Some(depth) = self.depth {
            config.image.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            config.image.seed = Some(seed);
        }
        config.image.validate()?;
        if let Some(grid) = self.tiles {
            config.image.tiles = [grid.columns, grid.rows];
        }
        if let Some(workers) = self.workers {
            let settings = job::render_settings(config);
            let grid = TileGrid::for_workers(workers, settings.image_width, settings.image_height)?;
            config.image.tiles = [grid.columns, grid.rows];
        }

        config.objects.extend(self.meshes.iter().map(|mesh| ObjectConfig {
            mesh: mesh.clone(),
            model_view: None,
            normal_matrix: None,
            material: self.material,
            scale: self.mesh_scale,
            double_sided: false,
        }));

        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = cli.log_level {
        logger.parse_filters(&level.to_string());
    }
    logger.init();

    let mut config = match &cli.config {
        Some(path) => {
            log::info!("Loading render job from {}", path.display());
            load_config(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => RenderConfigFile::default(),
    };
    cli.apply(&mut config)?;

    let scene = job::build_scene(&config)?;
    let ctx = RenderContext::new(scene, job::camera(&config), job::render_settings(&config));

    let image = render(&ctx).context("render failed")?;
    if is_stdout(&cli.output) {
        let stdout = std::io::BufWriter::new(std::io::stdout().lock());
        output::write_ppm(stdout, &image).context("failed to write image to stdout")?;
    } else {
        output::save_image(&cli.output, &image)
            .with_context(|| format!("failed to save {}", cli.output.display()))?;
    }

    Ok(())
}
