//! Image file loading, saving and output path generation

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix appended to the input stem when no output path is given.
pub const DEFAULT_SUFFIX: &str = "_anime4k";

/// Error type for reading and writing image files
#[derive(Debug, Error)]
pub enum CodecError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Load any format the `image` crate understands as packed 8-bit RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, CodecError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Save an RGBA image; the format follows the file extension.
///
/// Parent directories are created when missing.
pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<(), CodecError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Where the upscaled image for `input` is written.
///
/// | Scenario | Output |
/// |----------|--------|
/// | no `-o` | `<input dir>/<stem>_anime4k.png` |
/// | `-o big.png` | `big.png` |
/// | `-o dir/` or an existing directory | `dir/<stem>_anime4k.png` |
pub fn output_path(input: &Path, output_arg: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}{}.png", stem, DEFAULT_SUFFIX);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                PathBuf::from(file_name)
            } else {
                parent.join(file_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_default() {
        let path = output_path(Path::new("frame.png"), None);
        assert_eq!(path, PathBuf::from("frame_anime4k.png"));
    }

    #[test]
    fn test_output_path_nested_input() {
        let path = output_path(Path::new("shots/ep01/frame.jpg"), None);
        assert_eq!(path, PathBuf::from("shots/ep01/frame_anime4k.png"));
    }

    #[test]
    fn test_output_path_explicit_file() {
        let path = output_path(Path::new("frame.png"), Some(Path::new("out/big.png")));
        assert_eq!(path, PathBuf::from("out/big.png"));
    }

    #[test]
    fn test_output_path_directory() {
        let path = output_path(Path::new("in/frame.png"), Some(Path::new("upscaled/")));
        assert_eq!(path, PathBuf::from("upscaled/frame_anime4k.png"));
    }

    #[test]
    fn test_output_path_existing_directory() {
        let dir = TempDir::new().unwrap();
        let path = output_path(Path::new("frame.png"), Some(dir.path()));
        assert_eq!(path, dir.path().join("frame_anime4k.png"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/pixel.png");

        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(2, 1, Rgba([10, 20, 30, 255]));

        save_rgba(&image, &path).unwrap();
        assert!(path.exists());

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*loaded.get_pixel(2, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_rgba(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, CodecError::Image(_) | CodecError::Io(_)));
    }

    #[test]
    fn test_load_garbage_is_image_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(load_rgba(&path), Err(CodecError::Image(_))));
    }
}
