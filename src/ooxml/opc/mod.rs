/// Open Packaging Conventions (OPC) access for presentation containers.
///
/// This module provides the read side of the packaging conventions that a
/// presentation converter needs:
///
/// - ZIP-based physical packaging (`phys_pkg`)
/// - Part names and relative reference resolution (`packuri`)
/// - Relationship parts (`rel`)
///
/// Parts are decompressed once when the package is opened and then only
/// borrowed, so independent slides can be processed on separate workers.
pub mod constants;
pub mod error;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use packuri::PackURI;
pub use phys_pkg::PhysPkgReader;
pub use rel::{Relationship, Relationships};
