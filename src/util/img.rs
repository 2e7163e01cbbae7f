use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::io::Reader as ImageReader;
use image::{guess_format, DynamicImage, ImageFormat, RgbaImage};

/// Extensions offered in the file pickers
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "tif", "tiff", "webp", "bmp", "tga", "ico", "pnm", "qoi"];

#[derive(Debug, thiserror::Error)]
pub enum TileImageError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{} contains no image data", path.display())]
    Empty {
        path: PathBuf,
    },
}

/// Read and decode an image file for use as tile image
pub fn load_tile_image(path: impl AsRef<Path>) -> Result<RgbaImage,TileImageError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|source| TileImageError::Io { path: path.to_owned(), source } )?;
    let image = load_image_from_memory(&bytes, path)
        .map_err(|source| TileImageError::Decode { path: path.to_owned(), source } )?
        .to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(TileImageError::Empty { path: path.to_owned() });
    }
    Ok(image)
}

/// Load image from memory, determining the format from the magic bytes or the file extension
pub fn load_image_from_memory(bytes: &[u8], path: &Path) -> image::ImageResult<DynamicImage> {
    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(
        guess_format(bytes)
            .or_else(|_| ImageFormat::from_path(path) )?
    );
    reader.decode()
}

pub fn may_be_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str() )
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|v| e.eq_ignore_ascii_case(v)) )
}
