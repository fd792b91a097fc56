use depthify_image::ImageError;

/// An error type for the depth field module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FieldError {
    /// The requested grid has a zero dimension.
    #[error("Invalid grid size {0}x{1}, both dimensions must be positive")]
    InvalidGridSize(usize, usize),

    /// A textual sample could not be parsed.
    #[error("Invalid sample `{0}`, expected `x,y,depth`")]
    InvalidSample(String),

    /// Not enough distinct finite points to build a triangulation.
    #[error("Not enough distinct points to triangulate: {0}")]
    NotEnoughPoints(usize),

    /// All the points lie on a single line.
    #[error("All {0} points are collinear")]
    CollinearPoints(usize),

    /// Error from the underlying image.
    #[error(transparent)]
    Image(#[from] ImageError),
}
