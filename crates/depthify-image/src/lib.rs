#![deny(missing_docs)]
//! Image types for depth annotation and visualization

/// image representation for depth annotation purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
