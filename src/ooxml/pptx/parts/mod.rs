/// Parts for PowerPoint presentation documents.
///
/// This module contains the parsers for the XML parts a conversion reads:
/// the presentation manifest and individual slides.
pub mod presentation;
pub mod slide;

pub use presentation::{PresentationPart, SlideSize};
pub use slide::{SlideContent, SlideExtractor, SlideLinks, SlideSource};
