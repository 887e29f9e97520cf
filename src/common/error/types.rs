//! Unified error and warning types for pptx-reveal.
use serde::Serialize;
use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The archive, the manifest or a relationship part is unreadable.
    ///
    /// Fatal: no partial deck is produced.
    #[error("Container error: {0}")]
    Container(#[from] crate::ooxml::error::OoxmlError),

    /// One slide's XML is malformed.
    #[error("Slide {index} could not be parsed: {reason}")]
    SlideParse {
        /// Zero-based slide index in presentation order
        index: usize,
        /// Underlying parser message
        reason: String,
    },

    /// An extracted image could not be stored.
    #[error("Image store error: {0}")]
    ImageStore(String),
}

impl Error {
    /// Build a slide parse error for the given slide.
    pub(crate) fn slide_parse(index: usize, reason: impl ToString) -> Self {
        Error::SlideParse {
            index,
            reason: reason.to_string(),
        }
    }

    /// Slide index associated with this error, when known.
    pub fn slide_index(&self) -> Option<usize> {
        match self {
            Error::SlideParse { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal conditions collected while converting a deck.
///
/// Each warning is also logged through `tracing` when it is raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionWarning {
    /// A shape had no usable transform and was placed at zero geometry.
    GeometryFallback {
        /// Zero-based slide index
        slide: usize,
        /// Shape name from `p:cNvPr`, if any
        shape: String,
    },
    /// A picture could not be extracted and was left out.
    ImageSkipped {
        /// Zero-based slide index
        slide: usize,
        /// Shape name from `p:cNvPr`, if any
        shape: String,
        /// Why the picture was dropped
        reason: String,
    },
    /// A slide failed to parse and was replaced by an empty slide.
    SlideSkipped {
        /// Zero-based slide index
        slide: usize,
        /// Rendered parse error
        reason: String,
    },
}
