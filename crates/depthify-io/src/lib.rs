#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access, encoding/decoding
/// failures and unsupported formats.
pub mod error;

/// High-level image reading and writing functions.
///
/// Dispatches on the file extension between the PNG and JPEG codecs and derives
/// default export paths from a source path.
pub mod functional;

/// PNG image encoding and decoding.
pub mod png;

/// JPEG image encoding and decoding.
pub mod jpeg;

/// Internal utility functions for channel layout conversion.
mod conv_utils;
