//! Hyperlink support for PowerPoint presentations.
//!
//! Runs reference hyperlinks through `a:hlinkClick/@r:id`; the address lives
//! in the slide's relationship part.

use serde::Serialize;
use std::collections::HashMap;

/// Hyperlink relationship id to target address for one slide.
pub type HyperlinkMap = HashMap<String, String>;

/// Schemes other than `http`, `https` and `mailto` that may be linked.
const LINKABLE_SCHEMES: &[&str] = &["ftp", "ftps", "file", "tel"];

/// Classification of a hyperlink by URI scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HyperlinkKind {
    /// `mailto:` address
    Email,
    /// `http://` or `https://` URL
    Web,
    /// Any other target (file links, slide jumps, custom schemes)
    Other,
    /// No hyperlink
    None,
}

impl HyperlinkKind {
    /// Classify an optional address.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pptx_reveal::ooxml::pptx::HyperlinkKind;
    ///
    /// assert_eq!(HyperlinkKind::classify(Some("mailto:a@b.com")), HyperlinkKind::Email);
    /// assert_eq!(HyperlinkKind::classify(Some("https://x.com")), HyperlinkKind::Web);
    /// assert_eq!(HyperlinkKind::classify(Some("file:///x")), HyperlinkKind::Other);
    /// assert_eq!(HyperlinkKind::classify(None), HyperlinkKind::None);
    /// ```
    pub fn classify(address: Option<&str>) -> Self {
        match address {
            None => HyperlinkKind::None,
            Some(addr) if addr.starts_with("mailto:") => HyperlinkKind::Email,
            Some(addr) if addr.starts_with("http://") || addr.starts_with("https://") => {
                HyperlinkKind::Web
            },
            Some(_) => HyperlinkKind::Other,
        }
    }
}

/// A resolved hyperlink on a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hyperlink {
    pub address: String,
    pub kind: HyperlinkKind,
}

impl Hyperlink {
    /// Create a hyperlink, classifying the address.
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let kind = HyperlinkKind::classify(Some(&address));
        Self { address, kind }
    }

    /// Whether the link should open in a new browsing context.
    #[inline]
    pub fn is_web(&self) -> bool {
        self.kind == HyperlinkKind::Web
    }

    /// Whether the address may be emitted as an `href`.
    ///
    /// Web and mail links always qualify. Other targets qualify when they
    /// are relative (no scheme) or use one of a few inert schemes, so
    /// `javascript:` and `data:` targets are never linked.
    pub fn is_linkable(&self) -> bool {
        match self.kind {
            HyperlinkKind::Web | HyperlinkKind::Email => true,
            HyperlinkKind::None => false,
            HyperlinkKind::Other => match uri_scheme(&self.address) {
                None => true,
                Some(scheme) => LINKABLE_SCHEMES.contains(&scheme.as_str()),
            },
        }
    }
}

/// Lower-cased URI scheme of `address`, if it has one.
///
/// Browsers ignore ASCII whitespace and control characters inside a scheme,
/// so those are dropped before looking for the colon.
fn uri_scheme(address: &str) -> Option<String> {
    let mut scheme = String::new();
    for ch in address.chars() {
        if ch.is_ascii_whitespace() || ch.is_ascii_control() {
            continue;
        }
        match ch {
            ':' => return (!scheme.is_empty()).then_some(scheme),
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {
                scheme.push(c.to_ascii_lowercase())
            },
            _ => return None,
        }
    }
    None
}
