//! Common types and utilities shared by the extraction and rendering stages.
//!
//! This module holds the crate-level error type, length-unit conversions used
//! to normalise slide geometry, and the small XML helpers every part parser
//! relies on.

// Submodule declarations
pub mod error;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{ConversionWarning, Error, Result};
