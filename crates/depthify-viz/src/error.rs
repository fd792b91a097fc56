use depthify_image::{ImageError, ImageSize};

/// An error type for the visualization module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum VizError {
    /// Two rasters that must share a grid do not.
    #[error("Dimension mismatch: {0} vs {1}")]
    DimensionMismatch(ImageSize, ImageSize),

    /// A color bar needs a positive length and thickness.
    #[error("Invalid color bar size: length {0}, thickness {1}")]
    InvalidColorBarSize(usize, usize),

    /// The value span is empty, reversed or not finite.
    #[error("Invalid value span [{0}, {1}]")]
    InvalidSpan(f32, f32),

    /// The colormap name is not known.
    #[error("Unknown colormap `{0}`, expected one of viridis, magma, inferno, plasma, gray")]
    UnknownColorMap(String),

    /// The color bar orientation name is not known.
    #[error("Unknown orientation `{0}`, expected vertical or horizontal")]
    UnknownOrientation(String),

    /// Error from the underlying image.
    #[error(transparent)]
    Image(#[from] ImageError),
}
