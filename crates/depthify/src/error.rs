use depthify_field::FieldError;
use depthify_image::ImageError;
use depthify_io::error::IoError;
use depthify_viz::VizError;

/// An error type for the annotation session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// The action needs a source image and none is loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// The source image has no pixels.
    #[error("The source image is empty")]
    EmptyImage,

    /// No destination was given and none can be derived from the source.
    #[error("No export path given and the source image has no path")]
    NoExportPath,

    /// Error reading or writing an image file.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error computing the depth field.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Error rendering a visualization.
    #[error(transparent)]
    Viz(#[from] VizError),

    /// Error from the underlying image.
    #[error(transparent)]
    Image(#[from] ImageError),
}
