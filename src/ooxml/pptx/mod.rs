//! PowerPoint (.pptx) presentation reading.
//!
//! - `Package`: the .pptx package, slide order and slide size
//! - `parts`: the presentation manifest and the slide shape extractor
//! - `shapes`: the extracted shape records
//! - `hyperlinks` and `media`: run hyperlinks and picture storage
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_reveal::ooxml::pptx::{MemoryImageStore, Package, SlideExtractor};
//!
//! let pkg = Package::open("presentation.pptx")?;
//! let store = MemoryImageStore::new();
//! let extractor = SlideExtractor::new(pkg.phys(), pkg.slide_size(), &store);
//! for slide in pkg.slides()? {
//!     let content = extractor.extract(&slide)?;
//!     println!("slide {}: {} shapes", slide.index + 1, content.shapes.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod hyperlinks;
pub mod media;
pub mod package;
pub mod parts;
pub mod shapes;

pub use hyperlinks::{Hyperlink, HyperlinkKind, HyperlinkMap};
pub use media::{DirImageStore, ImageStore, MemoryImageStore};
pub use package::Package;
pub use parts::{PresentationPart, SlideContent, SlideExtractor, SlideLinks, SlideSize, SlideSource};
pub use shapes::{
    Alignment, Geometry, ImageShape, ParagraphKind, ParagraphRecord, PlaceholderRole, Run,
    ShapeRecord, TableCell, TableRecord, TableShape, TextShape, TitleShape,
};
