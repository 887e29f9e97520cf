//! Slide and deck assembly.
//!
//! This module drives the whole extraction pipeline: it opens the package,
//! extracts every slide's shapes, splits off slide titles and collects the
//! result into an immutable [`DeckRecord`] that the renderer borrows.
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_reveal::ooxml::pptx::DirImageStore;
//! use pptx_reveal::presentation::{ConvertOptions, Converter, SlideErrorPolicy};
//!
//! # fn main() -> Result<(), pptx_reveal::Error> {
//! let store = DirImageStore::new("out/images");
//! let converter = Converter::new(ConvertOptions::new().with_slide_error_policy(SlideErrorPolicy::Skip));
//! let deck = converter.convert("talk.pptx", &store)?;
//!
//! for slide in deck.slides() {
//!     println!("slide {}: {} shapes", slide.index + 1, slide.body.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bullets;


pub use bullets::{BulletNode, BulletTree, ContentBlock, SlideStream, build_tree, group_paragraphs};

use crate::common::{ConversionWarning, Error, Result};
use crate::ooxml::pptx::{ImageStore, Package, SlideContent, SlideExtractor, SlideSize, SlideSource};
use crate::ooxml::pptx::shapes::{ShapeRecord, TitleShape};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Minimum number of slides to justify parallel extraction.
pub const PARALLEL_THRESHOLD: usize = 10;

/// One assembled slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideRecord {
    /// Zero-based position in presentation order
    pub index: usize,
    pub title: Option<TitleShape>,
    /// Remaining shapes in document order
    pub body: Vec<ShapeRecord>,
}

impl SlideRecord {
    /// Split the first title-role shape off as the slide title.
    ///
    /// Later title shapes (a subtitle, say) stay in the body.
    pub fn assemble(index: usize, shapes: Vec<ShapeRecord>) -> Self {
        let mut title = None;
        let mut body = Vec::with_capacity(shapes.len());
        for shape in shapes {
            match shape {
                ShapeRecord::Title(t) if title.is_none() => title = Some(t),
                other => body.push(other),
            }
        }
        Self { index, title, body }
    }

    /// An empty slide standing in for one that failed to parse.
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            title: None,
            body: Vec::new(),
        }
    }

    #[inline]
    pub fn has_table(&self) -> bool {
        self.body.iter().any(ShapeRecord::is_table)
    }

    /// Title text, or an empty string for untitled slides.
    pub fn title_text(&self) -> String {
        self.title.as_ref().map(TitleShape::text).unwrap_or_default()
    }
}

/// An extracted presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckRecord {
    slides: Vec<SlideRecord>,
    slide_size: SlideSize,
    warnings: Vec<ConversionWarning>,
}

impl DeckRecord {
    pub fn new(slides: Vec<SlideRecord>, slide_size: SlideSize, warnings: Vec<ConversionWarning>) -> Self {
        Self {
            slides,
            slide_size,
            warnings,
        }
    }

    #[inline]
    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    #[inline]
    pub fn slide(&self, index: usize) -> Option<&SlideRecord> {
        self.slides.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[inline]
    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    /// Non-fatal problems met during extraction, in slide order.
    #[inline]
    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }
}

/// What to do when one slide's XML cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlideErrorPolicy {
    /// Fail the whole conversion.
    #[default]
    Abort,
    /// Replace the slide with an empty one and record a warning.
    Skip,
}

/// Options for the extraction pipeline.
///
/// # Examples
///
/// ```rust
/// use pptx_reveal::presentation::{ConvertOptions, SlideErrorPolicy};
///
/// let options = ConvertOptions::new()
///     .with_slide_error_policy(SlideErrorPolicy::Skip)
///     .with_parallel(false);
/// assert_eq!(options.slide_error_policy, SlideErrorPolicy::Skip);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// How malformed slides are handled
    pub slide_error_policy: SlideErrorPolicy,
    /// Extract slides on the rayon pool for large decks
    pub parallel: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            slide_error_policy: SlideErrorPolicy::Abort,
            parallel: true,
        }
    }
}

impl ConvertOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_slide_error_policy(mut self, policy: SlideErrorPolicy) -> Self {
        self.slide_error_policy = policy;
        self
    }

    /// Set whether slides may be extracted in parallel.
    ///
    /// Decks with fewer than [`PARALLEL_THRESHOLD`] slides are always
    /// extracted sequentially.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Runs the extraction pipeline.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the presentation at `path`, writing pictures to `store`.
    ///
    /// # Errors
    ///
    /// `Error::Container` when the package cannot be read,
    /// `Error::SlideParse` for a malformed slide under
    /// [`SlideErrorPolicy::Abort`], and `Error::ImageStore` when a picture
    /// cannot be written.
    pub fn convert<P: AsRef<Path>>(&self, path: P, store: &dyn ImageStore) -> Result<DeckRecord> {
        let package = Package::open(path)?;
        self.convert_package(&package, store)
    }

    /// Convert a presentation held in memory.
    pub fn convert_bytes(&self, data: Vec<u8>, store: &dyn ImageStore) -> Result<DeckRecord> {
        let package = Package::from_bytes(data)?;
        self.convert_package(&package, store)
    }

    /// Convert a presentation read from `reader`.
    pub fn convert_reader<R: Read>(&self, reader: R, store: &dyn ImageStore) -> Result<DeckRecord> {
        let package = Package::from_reader(reader)?;
        self.convert_package(&package, store)
    }

    /// Convert an already opened package.
    pub fn convert_package(&self, package: &Package, store: &dyn ImageStore) -> Result<DeckRecord> {
        let size = package.slide_size();
        let sources = package.slides()?;
        let extractor = SlideExtractor::new(package.phys(), size, store);

        let extracted: Vec<Result<SlideContent>> =
            if self.options.parallel && sources.len() >= PARALLEL_THRESHOLD {
                sources.par_iter().map(|source| extractor.extract(source)).collect()
            } else {
                sources.iter().map(|source| extractor.extract(source)).collect()
            };

        let mut slides = Vec::with_capacity(sources.len());
        let mut warnings = Vec::new();
        for (source, result) in sources.iter().zip(extracted) {
            slides.push(self.settle(source, result, &mut warnings)?);
        }

        info!(
            slides = slides.len(),
            warnings = warnings.len(),
            width = size.width,
            height = size.height,
            "converted presentation"
        );
        Ok(DeckRecord::new(slides, size, warnings))
    }

    /// Apply the slide error policy to one extraction result.
    fn settle(
        &self,
        source: &SlideSource<'_>,
        result: Result<SlideContent>,
        warnings: &mut Vec<ConversionWarning>,
    ) -> Result<SlideRecord> {
        match result {
            Ok(content) => {
                warnings.extend(content.warnings);
                Ok(SlideRecord::assemble(source.index, content.shapes))
            },
            Err(err @ Error::SlideParse { .. })
                if self.options.slide_error_policy == SlideErrorPolicy::Skip =>
            {
                let reason = err.to_string();
                warn!(slide = source.index, part = %source.partname, %reason, "skipping malformed slide");
                warnings.push(ConversionWarning::SlideSkipped {
                    slide: source.index,
                    reason,
                });
                Ok(SlideRecord::empty(source.index))
            },
            Err(err) => Err(err),
        }
    }
}
