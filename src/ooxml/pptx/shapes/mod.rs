/// Shapes module for PowerPoint presentations.
///
/// This module provides the extracted shape records:
/// - Title placeholders and other text shapes with their paragraphs
/// - Pictures (images)
/// - Tables
pub mod base;
pub mod picture;
pub mod table;
pub mod textframe;

pub use base::{Geometry, PlaceholderRole, ShapeRecord, TextShape, TitleShape, Transform};
pub use picture::ImageShape;
pub use table::{TableCell, TableRecord, TableShape};
pub use textframe::{Alignment, ParagraphKind, ParagraphRecord, Run};
