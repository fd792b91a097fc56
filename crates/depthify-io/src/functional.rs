use std::path::{Path, PathBuf};

use depthify_image::Image;

use crate::{error::IoError, jpeg, png};

/// File extensions accepted as source images, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Extension used for export paths when the source path has none.
const DEFAULT_EXPORT_EXTENSION: &str = "png";

/// The codecs this crate can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics, lossless.
    Png,
    /// JPEG, lossy.
    Jpeg,
}

impl ImageFormat {
    /// Pick the codec from the extension of the given path.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidFileExtension`] for anything but `png`, `jpg` and `jpeg`.
    pub fn from_path(file_path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file_path = file_path.as_ref();
        let ext = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
            _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
        }
    }
}

/// Returns true if the path carries one of the [`SUPPORTED_EXTENSIONS`].
///
/// # Example
///
/// ```
/// use depthify_io::functional::is_supported_image;
///
/// assert!(is_supported_image("photo.JPG"));
/// assert!(is_supported_image("scan.png"));
/// assert!(!is_supported_image("notes.txt"));
/// ```
pub fn is_supported_image(file_path: impl AsRef<Path>) -> bool {
    ImageFormat::from_path(file_path).is_ok()
}

/// Reads a JPEG or PNG image from the given file path as RGB8.
///
/// The codec is selected from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A three channel image, whatever the channel layout stored in the file.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists before looking at the format
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    log::debug!("reading image `{}`", file_path.display());

    match ImageFormat::from_path(file_path)? {
        ImageFormat::Png => png::read_image_png_rgb8(file_path),
        ImageFormat::Jpeg => jpeg::read_image_jpeg_rgb8(file_path),
    }
}

/// Writes a single channel image, selecting the codec from the file extension.
///
/// # Arguments
///
/// * `file_path` - The destination path, ending in `png`, `jpg` or `jpeg`.
/// * `image` - The image to write.
/// * `jpeg_quality` - The quality used when the destination is a JPEG file.
pub fn write_image_any_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
    jpeg_quality: u8,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    match ImageFormat::from_path(file_path)? {
        ImageFormat::Png => png::write_image_png_gray8(file_path, image),
        ImageFormat::Jpeg => jpeg::write_image_jpeg_gray8(file_path, image, jpeg_quality),
    }
}

/// Writes a three channel image, selecting the codec from the file extension.
///
/// # Arguments
///
/// * `file_path` - The destination path, ending in `png`, `jpg` or `jpeg`.
/// * `image` - The image to write.
/// * `jpeg_quality` - The quality used when the destination is a JPEG file.
pub fn write_image_any_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    jpeg_quality: u8,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    match ImageFormat::from_path(file_path)? {
        ImageFormat::Png => png::write_image_png_rgb8(file_path, image),
        ImageFormat::Jpeg => jpeg::write_image_jpeg_rgb8(file_path, image, jpeg_quality),
    }
}

/// Derive an export path by inserting `suffix` before the extension of `source`.
///
/// A source without extension gets a `png` extension.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use depthify_io::functional::export_path_with_suffix;
///
/// assert_eq!(
///     export_path_with_suffix("shots/cat.jpeg", "_map"),
///     PathBuf::from("shots/cat_map.jpeg")
/// );
/// assert_eq!(
///     export_path_with_suffix("cat", "_depth"),
///     PathBuf::from("cat_depth.png")
/// );
/// ```
pub fn export_path_with_suffix(source: impl AsRef<Path>, suffix: &str) -> PathBuf {
    let source = source.as_ref();
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_EXPORT_EXTENSION.to_string());

    source.with_file_name(format!("{stem}{suffix}.{ext}"))
}
