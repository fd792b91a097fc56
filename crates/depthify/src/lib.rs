#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use depthify_image as image;

#[doc(inline)]
pub use depthify_imgproc as imgproc;

#[doc(inline)]
pub use depthify_io as io;

#[doc(inline)]
pub use depthify_field as field;

#[doc(inline)]
pub use depthify_viz as viz;

/// Error types for the session.
pub mod error;

/// The annotation session tying samples, depth field and visualization together.
pub mod session;

pub use crate::error::SessionError;
pub use crate::session::{DepthExportMode, Session, SessionConfig};
