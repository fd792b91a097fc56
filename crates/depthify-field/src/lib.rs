#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the depth field module.
pub mod error;

/// Depth samples and the ordered store holding them.
pub mod sample;

/// Dense depth field synthesis from sparse samples.
pub mod synthesize;

/// Delaunay triangulation of scattered 2D points.
pub mod triangulation;

pub use crate::error::FieldError;
pub use crate::sample::{Sample, SampleStore};
pub use crate::synthesize::{
    blank_field, synthesize, DepthField, DepthFieldSynthesizer, SynthesizerConfig,
};
pub use crate::triangulation::Triangulation;
