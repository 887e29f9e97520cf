//! pptx-reveal - convert PowerPoint presentations into Reveal.js markup
//!
//! This library reads an OOXML presentation (.pptx), extracts the content of
//! every slide into typed records and renders those records as Reveal.js
//! `<section>` markup.
//!
//! # Features
//!
//! - **Package reader**: slide order, slide size and relationship resolution
//! - **Shape extraction**: titles, formatted runs, bullets, tables, pictures
//!   and their geometry as percentages of the slide
//! - **Bullet hierarchy**: flat indent levels become nested lists
//! - **Two layouts**: flowing fit-to-slide text or absolutely positioned shapes
//! - **Parallel extraction**: large decks are processed on the rayon pool
//! - **Serializable model**: every record derives `serde::Serialize`
//!
//! # Example - Converting a deck
//!
//! ```no_run
//! use pptx_reveal::html::ToHtml;
//! use pptx_reveal::ooxml::pptx::DirImageStore;
//! use pptx_reveal::presentation::Converter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Pictures are written to out/images and referenced as images/<file>
//! let store = DirImageStore::new("out/images");
//! let deck = Converter::default().convert("talk.pptx", &store)?;
//!
//! std::fs::write("out/slides.html", deck.to_html())?;
//! for warning in deck.warnings() {
//!     eprintln!("warning: {:?}", warning);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level package access
//!
//! ```no_run
//! use pptx_reveal::ooxml::pptx::{MemoryImageStore, Package, SlideExtractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("talk.pptx")?;
//! let store = MemoryImageStore::new();
//! let extractor = SlideExtractor::new(pkg.phys(), pkg.slide_size(), &store);
//!
//! for source in pkg.slides()? {
//!     let content = extractor.extract(&source)?;
//!     println!("{}: {} shapes", source.partname, content.shapes.len());
//! }
//! # Ok(())
//! # }
//! ```

/// Common types shared by extraction and rendering
///
/// Error and warning types, unit conversions and XML helpers.
pub mod common;

/// OOXML (Office Open XML) package reading
///
/// Physical package access, relationships, and the PowerPoint part and shape
/// parsers.
pub mod ooxml;

/// Slide and deck assembly on top of the extracted shapes
pub mod presentation;

/// Reveal.js markup rendering
pub mod html;

// Re-export commonly used types for convenience
pub use common::{ConversionWarning, Error, Result};
pub use html::{HtmlOptions, LayoutMode, RenderedDeck, ToHtml};
pub use presentation::{ConvertOptions, Converter, DeckRecord, SlideErrorPolicy, SlideRecord};
