//! Unified error types for the conversion pipeline.
//!
//! Package-level failures abort the whole conversion. Slide-level failures
//! carry the slide index so callers can choose to skip them.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{ConversionWarning, Error, Result};
