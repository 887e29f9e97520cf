/// Configuration types for Reveal.js markup rendering.
///
/// This module defines the options and enums that control how extracted
/// slides are turned into `<section>` markup.
/// Configuration options for markup rendering.
///
/// # Examples
///
/// ```rust
/// use pptx_reveal::html::{HtmlOptions, LayoutMode};
///
/// // Create with defaults
/// let options = HtmlOptions::default();
/// assert_eq!(options.layout, LayoutMode::Flow);
///
/// // Or customize
/// let options = HtmlOptions::new()
///     .with_layout(LayoutMode::Positioned)
///     .with_transition("slide")
///     .with_fragments(false);
/// ```
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// How shapes are placed inside a section
    pub layout: LayoutMode,
    /// Value of the `data-transition` attribute on every section
    pub transition: String,
    /// Whether paragraphs, list items and tables reveal one by one
    pub fragments: bool,
    /// Whether to render sections in parallel for large decks
    pub use_parallel: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Flow,
            transition: "fade".to_string(),
            fragments: true,
            use_parallel: true,
        }
    }
}

impl HtmlOptions {
    /// Create a new `HtmlOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout mode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pptx_reveal::html::{HtmlOptions, LayoutMode};
    ///
    /// let options = HtmlOptions::new().with_layout(LayoutMode::Positioned);
    /// ```
    #[inline]
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    /// Set the Reveal.js transition name.
    #[inline]
    pub fn with_transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = transition.into();
        self
    }

    /// Set whether content carries the `fragment` class.
    ///
    /// When disabled, everything on a slide appears at once.
    #[inline]
    pub fn with_fragments(mut self, fragments: bool) -> Self {
        self.fragments = fragments;
        self
    }

    /// Set whether large decks render on the rayon pool.
    #[inline]
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }
}

/// Placement strategy for slide content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Stream text into a shared fit-to-slide wrapper.
    ///
    /// Tables keep their absolute position and break the wrapper around
    /// themselves.
    #[default]
    Flow,

    /// Give every shape its own absolutely positioned box.
    Positioned,
}
