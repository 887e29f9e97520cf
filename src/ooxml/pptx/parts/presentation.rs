/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::common::unit::{DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU};
use crate::common::xml::{attr_i64, prefixed_attr_value};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;

/// Slide dimensions in EMUs (English Metric Units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideSize {
    pub width: i64,
    pub height: i64,
}

impl SlideSize {
    /// Create a slide size, rejecting non-positive extents.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(OoxmlError::InvalidFormat(format!(
                "slide size must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }
}

impl Default for SlideSize {
    /// The 10 in × 7.5 in size PowerPoint assumes when `p:sldSz` is absent.
    fn default() -> Self {
        Self {
            width: DEFAULT_SLIDE_WIDTH_EMU,
            height: DEFAULT_SLIDE_HEIGHT_EMU,
        }
    }
}

/// The parsed presentation manifest.
///
/// Holds the slide relationship ids in display order and the slide size.
/// Everything else in the part (masters, notes, default text styles) is
/// not needed for conversion and is skipped.
#[derive(Debug, Clone)]
pub struct PresentationPart {
    slide_rids: Vec<String>,
    slide_size: SlideSize,
}

impl PresentationPart {
    /// Parse the presentation part in a single pass.
    ///
    /// # Errors
    ///
    /// Returns `OoxmlError::Xml` for malformed XML and
    /// `OoxmlError::InvalidFormat` for a zero or non-numeric `p:sldSz`.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut slide_rids = Vec::new();
        let mut slide_size = None;
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    saw_root = true;
                    depth += 1;
                    Self::handle_element(e, &mut slide_rids, &mut slide_size)?;
                },
                Ok(Event::Empty(ref e)) => {
                    saw_root = true;
                    Self::handle_element(e, &mut slide_rids, &mut slide_size)?;
                },
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        if !saw_root || depth != 0 {
            return Err(OoxmlError::Xml(
                "presentation part has a missing or unterminated root element".to_string(),
            ));
        }

        Ok(Self {
            slide_rids,
            slide_size: slide_size.unwrap_or_default(),
        })
    }

    fn handle_element(
        e: &BytesStart<'_>,
        slide_rids: &mut Vec<String>,
        slide_size: &mut Option<SlideSize>,
    ) -> Result<()> {
        match e.local_name().as_ref() {
            b"sldId" => {
                if let Some(rid) = prefixed_attr_value(e, b"id") {
                    slide_rids.push(rid);
                }
            },
            b"sldSz" => {
                let cx = attr_i64(e, b"cx").map_err(|raw| {
                    OoxmlError::InvalidFormat(format!("Invalid slide width: {}", raw))
                })?;
                let cy = attr_i64(e, b"cy").map_err(|raw| {
                    OoxmlError::InvalidFormat(format!("Invalid slide height: {}", raw))
                })?;
                *slide_size = Some(SlideSize::new(
                    cx.unwrap_or(DEFAULT_SLIDE_WIDTH_EMU),
                    cy.unwrap_or(DEFAULT_SLIDE_HEIGHT_EMU),
                )?);
            },
            _ => {},
        }
        Ok(())
    }

    /// Get the relationship IDs of all slides in presentation order.
    #[inline]
    pub fn slide_rids(&self) -> &[String] {
        &self.slide_rids
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_rids.len()
    }

    #[inline]
    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESENTATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
  <p:sldIdLst>
    <p:sldId id="257" r:id="rId3"/>
    <p:sldId id="256" r:id="rId2"/>
  </p:sldIdLst>
  <p:sldSz cx="12192000" cy="6858000"/>
  <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#;

    #[test]
    fn test_slide_rids_in_document_order() {
        let part = PresentationPart::from_xml(PRESENTATION.as_bytes()).unwrap();
        assert_eq!(part.slide_rids(), &["rId3".to_string(), "rId2".to_string()]);
        assert_eq!(part.slide_count(), 2);
    }

    #[test]
    fn test_slide_size() {
        let part = PresentationPart::from_xml(PRESENTATION.as_bytes()).unwrap();
        assert_eq!(part.slide_size(), SlideSize { width: 12_192_000, height: 6_858_000 });
    }

    #[test]
    fn test_missing_slide_size_uses_default() {
        let xml = r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst/></p:presentation>"#;
        let part = PresentationPart::from_xml(xml.as_bytes()).unwrap();
        assert_eq!(part.slide_size(), SlideSize::default());
        assert_eq!(part.slide_count(), 0);
    }

    #[test]
    fn test_invalid_slide_size() {
        let zero = r#"<p:presentation xmlns:p="p"><p:sldSz cx="0" cy="6858000"/></p:presentation>"#;
        assert!(matches!(
            PresentationPart::from_xml(zero.as_bytes()),
            Err(OoxmlError::InvalidFormat(_))
        ));

        let junk = r#"<p:presentation xmlns:p="p"><p:sldSz cx="wide" cy="6858000"/></p:presentation>"#;
        assert!(matches!(
            PresentationPart::from_xml(junk.as_bytes()),
            Err(OoxmlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_unterminated_manifest() {
        let xml = r#"<p:presentation xmlns:p="p"><p:sldIdLst>"#;
        assert!(PresentationPart::from_xml(xml.as_bytes()).is_err());
    }
}
