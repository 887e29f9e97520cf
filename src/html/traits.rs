/// Core trait for markup rendering.
///
/// This module defines the `ToHtml` trait that enables extracted records to
/// be rendered as Reveal.js markup.
use super::config::HtmlOptions;

/// Core trait for types that can be rendered as Reveal.js markup.
///
/// Implemented for [`DeckRecord`](crate::presentation::DeckRecord) (the whole
/// document body) and [`SlideRecord`](crate::presentation::SlideRecord) (one
/// `<section>`). Rendering borrows the records and cannot fail.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_reveal::html::{HtmlOptions, LayoutMode, ToHtml};
/// use pptx_reveal::ooxml::pptx::MemoryImageStore;
/// use pptx_reveal::presentation::Converter;
///
/// # fn main() -> Result<(), pptx_reveal::Error> {
/// let store = MemoryImageStore::new();
/// let deck = Converter::default().convert("talk.pptx", &store)?;
///
/// // Render the whole deck
/// let html = deck.to_html();
///
/// // Or a single slide, positioned
/// let options = HtmlOptions::new().with_layout(LayoutMode::Positioned);
/// if let Some(slide) = deck.slide(0) {
///     println!("{}", slide.to_html_with_options(&options));
/// }
/// # Ok(())
/// # }
/// ```
pub trait ToHtml {
    /// Render with default options.
    fn to_html(&self) -> String {
        self.to_html_with_options(&HtmlOptions::default())
    }

    /// Render with custom options.
    fn to_html_with_options(&self, options: &HtmlOptions) -> String;
}
