//! Image serialization.
//!
//! PPM (plain text P3) is written directly; every other extension is handed
//! to the `image` crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::PixelBuffer;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match its {width}x{height} dimensions")]
    BufferSize { width: u32, height: u32 },
}

/// Write `buffer` as a plain-text P3 PPM, rows top to bottom.
pub fn write_ppm<W: Write>(mut writer: W, buffer: &PixelBuffer) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", buffer.width(), buffer.height())?;
    writeln!(writer, "255")?;

    for [r, g, b] in buffer.pixels() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Save `buffer` to `path`, choosing the format from the extension.
pub fn save_image<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<(), OutputError> {
    let path = path.as_ref();
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path).map_err(io_error)?;
        write_ppm(BufWriter::new(file), buffer).map_err(io_error)?;
    } else {
        let (width, height) = (buffer.width(), buffer.height());
        let image = image::RgbImage::from_raw(width, height, buffer.to_rgb_bytes())
            .ok_or(OutputError::BufferSize { width, height })?;
        image.save(path)?;
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}
