//! Render setup errors.
//!
//! Every check runs before a worker is spawned; a render that starts always
//! completes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("tile grid must have at least one column and one row")]
    ZeroTiles,

    #[error(
        "{columns}x{rows} tile grid does not evenly divide a {width}x{height} image"
    )]
    TileGrid {
        columns: u32,
        rows: u32,
        width: u32,
        height: u32,
    },

    #[error("no factorization of {workers} workers evenly partitions a {width}x{height} image")]
    NoTileFactorization { workers: u32, width: u32, height: u32 },

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
