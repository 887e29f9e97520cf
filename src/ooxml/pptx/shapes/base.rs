/// Base shape types for PowerPoint presentations.
use crate::common::unit::{extent_percent, offset_percent};
use crate::common::xml::attr_i64;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::parts::presentation::SlideSize;
use crate::ooxml::pptx::shapes::picture::ImageShape;
use crate::ooxml::pptx::shapes::table::TableShape;
use crate::ooxml::pptx::shapes::textframe::ParagraphRecord;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;

/// Placeholder role of a text shape, from `p:nvPr/p:ph/@type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderRole {
    /// `title`
    Title,
    /// `ctrTitle`
    CenteredTitle,
    /// `subTitle`
    Subtitle,
}

impl PlaceholderRole {
    /// Map a placeholder type attribute to a role.
    ///
    /// Body, date, footer and the other placeholder kinds carry no role.
    pub fn from_ph_type(ph_type: &str) -> Option<Self> {
        match ph_type {
            "title" => Some(PlaceholderRole::Title),
            "ctrTitle" => Some(PlaceholderRole::CenteredTitle),
            "subTitle" => Some(PlaceholderRole::Subtitle),
            _ => None,
        }
    }

    /// Whether paragraphs in this placeholder center by default.
    #[inline]
    pub fn centers_by_default(self) -> bool {
        matches!(self, PlaceholderRole::CenteredTitle | PlaceholderRole::Subtitle)
    }
}

/// Shape position and size as percentages of the slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Normalize a transform against the slide size.
    ///
    /// Offsets are clamped to be non-negative and extents to at most 100%.
    pub fn from_transform(xfrm: &Transform, size: SlideSize) -> Self {
        Self {
            x: offset_percent(xfrm.x, size.width),
            y: offset_percent(xfrm.y, size.height),
            width: extent_percent(xfrm.cx, size.width),
            height: extent_percent(xfrm.cy, size.height),
        }
    }
}

/// Raw `a:xfrm` / `p:xfrm` values in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Transform {
    /// Read the children of an `xfrm` element whose start tag was just consumed.
    ///
    /// Returns `Ok(None)` when `a:off` or `a:ext` is missing or not numeric;
    /// the caller places the shape at zero geometry in that case.
    pub(crate) fn read(reader: &mut Reader<&[u8]>) -> Result<Option<Self>> {
        let mut off: Option<(i64, i64)> = None;
        let mut ext: Option<(i64, i64)> = None;
        let mut malformed = false;
        let mut depth = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if depth == 0 {
                        Self::read_pair(&e, &mut off, &mut ext, &mut malformed);
                    }
                    depth += 1;
                },
                Ok(Event::Empty(e)) => {
                    if depth == 0 {
                        Self::read_pair(&e, &mut off, &mut ext, &mut malformed);
                    }
                },
                Ok(Event::End(_)) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                },
                Ok(Event::Eof) => {
                    return Err(OoxmlError::Xml("unexpected end of document in xfrm".to_string()));
                },
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        if malformed {
            return Ok(None);
        }
        Ok(match (off, ext) {
            (Some((x, y)), Some((cx, cy))) => Some(Self { x, y, cx, cy }),
            _ => None,
        })
    }

    fn read_pair(
        e: &BytesStart<'_>,
        off: &mut Option<(i64, i64)>,
        ext: &mut Option<(i64, i64)>,
        malformed: &mut bool,
    ) {
        let (slot, keys): (&mut Option<(i64, i64)>, [&[u8]; 2]) = match e.local_name().as_ref() {
            b"off" => (off, [&b"x"[..], &b"y"[..]]),
            b"ext" => (ext, [&b"cx"[..], &b"cy"[..]]),
            _ => return,
        };
        match (attr_i64(e, keys[0]), attr_i64(e, keys[1])) {
            (Ok(Some(a)), Ok(Some(b))) => *slot = Some((a, b)),
            _ => *malformed = true,
        }
    }
}

/// A title-role text shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleShape {
    pub role: PlaceholderRole,
    pub paragraphs: Vec<ParagraphRecord>,
    pub geometry: Geometry,
}

impl TitleShape {
    /// Concatenated text of all paragraphs, one line per paragraph.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(ParagraphRecord::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Any other text-bearing shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextShape {
    pub paragraphs: Vec<ParagraphRecord>,
    pub geometry: Geometry,
}

/// One extracted shape, in slide document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeRecord {
    Title(TitleShape),
    Text(TextShape),
    Table(TableShape),
    Image(ImageShape),
}

impl ShapeRecord {
    #[inline]
    pub fn geometry(&self) -> Geometry {
        match self {
            ShapeRecord::Title(s) => s.geometry,
            ShapeRecord::Text(s) => s.geometry,
            ShapeRecord::Table(s) => s.geometry,
            ShapeRecord::Image(s) => s.geometry,
        }
    }

    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, ShapeRecord::Table(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_xfrm(xml: &str) -> Result<Option<Transform>> {
        let mut reader = Reader::from_str(xml);
        // consume the xfrm start tag
        loop {
            if let Event::Start(_) = reader.read_event().unwrap() {
                break;
            }
        }
        Transform::read(&mut reader)
    }

    #[test]
    fn test_read_transform() {
        let t = read_xfrm(r#"<a:xfrm><a:off x="914400" y="0"/><a:ext cx="4572000" cy="685800"/></a:xfrm>"#)
            .unwrap()
            .unwrap();
        assert_eq!(t, Transform { x: 914_400, y: 0, cx: 4_572_000, cy: 685_800 });
    }

    #[test]
    fn test_incomplete_transform() {
        let missing_ext = read_xfrm(r#"<a:xfrm><a:off x="1" y="2"/></a:xfrm>"#).unwrap();
        assert_eq!(missing_ext, None);

        let junk = read_xfrm(r#"<a:xfrm><a:off x="left" y="2"/><a:ext cx="1" cy="1"/></a:xfrm>"#).unwrap();
        assert_eq!(junk, None);
    }

    #[test]
    fn test_geometry_clamps() {
        let size = SlideSize::default();
        let origin = Geometry::from_transform(&Transform { x: 0, y: 0, cx: 0, cy: 0 }, size);
        assert_eq!((origin.x, origin.y), (0.0, 0.0));

        let wide = Geometry::from_transform(
            &Transform { x: -10, y: 3_429_000, cx: size.width * 2, cy: size.height / 4 },
            size,
        );
        assert_eq!(wide.x, 0.0);
        assert_eq!(wide.y, 50.0);
        assert_eq!(wide.width, 100.0);
        assert_eq!(wide.height, 25.0);
    }

    #[test]
    fn test_placeholder_roles() {
        assert_eq!(PlaceholderRole::from_ph_type("ctrTitle"), Some(PlaceholderRole::CenteredTitle));
        assert_eq!(PlaceholderRole::from_ph_type("body"), None);
        assert!(PlaceholderRole::Subtitle.centers_by_default());
        assert!(!PlaceholderRole::Title.centers_by_default());
    }
}
