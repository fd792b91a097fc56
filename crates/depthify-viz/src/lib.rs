#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Color bar rendering for a depth span.
pub mod colorbar;

/// Color transfer functions and depth normalization.
pub mod colormap;

/// Depth field colorization.
pub mod colorize;

/// Luminance and depth compositing.
pub mod composite;

/// Error types for the visualization module.
pub mod error;

/// Sample markers drawn over the source image.
pub mod overlay;

pub use crate::colorbar::{render_colorbar, Orientation};
pub use crate::colormap::{color_for_value, normalize_depth, ColorMap, ColorTransferFunction};
pub use crate::colorize::{colorize, colorize_rgb, ColorRaster};
pub use crate::composite::composite;
pub use crate::error::VizError;
pub use crate::overlay::draw_samples;
