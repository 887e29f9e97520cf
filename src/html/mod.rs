/// Reveal.js markup rendering for extracted decks.
///
/// Every slide becomes one `<section>` element. Two layouts are available:
///
/// - [`LayoutMode::Flow`]: text streams into a shared `r-fit-text` wrapper,
///   bullets nest as `<ul>`/`<ol>` lists and tables keep their absolute
///   position on the slide
/// - [`LayoutMode::Positioned`]: every shape gets its own absolutely
///   positioned box sized from the slide geometry
///
/// # Quick Start
///
/// ```rust,no_run
/// use pptx_reveal::html::{HtmlOptions, LayoutMode, render_deck};
/// use pptx_reveal::ooxml::pptx::DirImageStore;
/// use pptx_reveal::presentation::Converter;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = DirImageStore::new("static/images");
/// let deck = Converter::default().convert("talk.pptx", &store)?;
///
/// let options = HtmlOptions::new().with_layout(LayoutMode::Positioned);
/// let rendered = render_deck(&deck, &options);
/// std::fs::write("static/slides.html", rendered.html())?;
/// # Ok(())
/// # }
/// ```
///
/// Output depends only on the deck and the options, so converting the same
/// file twice yields byte-identical markup.
pub mod config;
pub mod presentation;
pub mod traits;
pub mod writer;

pub use config::{HtmlOptions, LayoutMode};
pub use presentation::{RenderedDeck, render_deck, render_slide};
pub use traits::ToHtml;
pub use writer::HtmlWriter;
