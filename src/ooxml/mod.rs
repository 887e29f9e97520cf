//! Office Open XML (OOXML) presentation reading.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): ZIP container, part names and relationships
//! 2. **Presentation Layer** (`pptx`): slide order, slide size and the
//!    per-slide shape extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_reveal::ooxml::pptx::Package;
//!
//! let pkg = Package::open("deck.pptx")?;
//! for slide in pkg.slides()? {
//!     println!("slide {} -> {}", slide.index, slide.partname);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
pub use opc::PackURI;
