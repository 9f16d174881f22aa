use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::SketchResult;
use crate::surface::RasterSurface;

/// Filename offered for an exported drawing
pub const DEFAULT_FILE_NAME: &str = "canvas.png";

/// Hands an encoded image to the user as a file.
pub trait Download {
    fn download(&mut self, payload: &[u8], file_name: &str) -> SketchResult<()>;
}

/// Saves downloads into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Download for DirectoryDownload {
    fn download(&mut self, payload: &[u8], file_name: &str) -> SketchResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, payload)?;
        log::info!("Wrote {} ({} bytes)", path.display(), payload.len());
        Ok(())
    }
}

/// Encodes the surface as PNG.
pub fn encode_png(surface: &RasterSurface) -> SketchResult<Vec<u8>> {
    let mut bytes = Vec::new();
    surface
        .to_rgba_image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
