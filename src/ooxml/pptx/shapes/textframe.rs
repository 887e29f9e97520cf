/// Text frame content: runs and paragraphs.
///
/// DrawingML text lives in `txBody` (shapes) and `a:txBody` (table cells) as
/// a sequence of `a:p` paragraphs, each holding `a:r` runs. Only formatting
/// that is explicit on the run or paragraph is read; theme and master
/// inheritance is not resolved.
use crate::common::unit::centipoints_to_px;
use crate::common::xml::{attr_i64, attr_value, general_ref_value, prefixed_attr_value, text_value};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::hyperlinks::{Hyperlink, HyperlinkKind, HyperlinkMap};
use crate::ooxml::pptx::shapes::base::PlaceholderRole;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;

/// A formatted span of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub hyperlink: Option<Hyperlink>,
    /// Effective font size in CSS pixels, when one is set explicitly.
    pub font_size_px: Option<f64>,
}

impl Run {
    /// An unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn hyperlink_kind(&self) -> HyperlinkKind {
        match &self.hyperlink {
            Some(link) => link.kind,
            None => HyperlinkKind::None,
        }
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// List classification of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphKind {
    Plain,
    Bullet,
    Numbered,
}

impl ParagraphKind {
    #[inline]
    pub fn is_list(self) -> bool {
        !matches!(self, ParagraphKind::Plain)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Map an `a:pPr/@algn` value.
    pub fn from_algn(algn: &str) -> Option<Self> {
        match algn {
            "l" => Some(Alignment::Left),
            "ctr" => Some(Alignment::Center),
            "r" => Some(Alignment::Right),
            "just" | "justLow" | "dist" | "thaiDist" => Some(Alignment::Justify),
            _ => None,
        }
    }

    /// CSS `text-align` keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

/// One extracted paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphRecord {
    pub runs: Vec<Run>,
    pub level: u32,
    pub kind: ParagraphKind,
    pub alignment: Alignment,
}

impl ParagraphRecord {
    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// What the paragraph reader needs to know about the enclosing shape.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextContext<'a> {
    pub hyperlinks: &'a HyperlinkMap,
    pub role: Option<PlaceholderRole>,
}

impl<'a> TextContext<'a> {
    pub fn new(hyperlinks: &'a HyperlinkMap, role: Option<PlaceholderRole>) -> Self {
        Self { hyperlinks, role }
    }
}

/// Run under construction.
#[derive(Default)]
struct RunState {
    run: Run,
    size: Option<u32>,
    in_text: bool,
}

/// Bullet markers seen in `a:pPr`.
#[derive(Default)]
struct BulletMarkers {
    none: bool,
    auto_num: bool,
    char: bool,
}

impl BulletMarkers {
    fn kind(&self) -> ParagraphKind {
        if self.none {
            ParagraphKind::Plain
        } else if self.auto_num {
            ParagraphKind::Numbered
        } else {
            // buChar, and the default when no marker is present
            ParagraphKind::Bullet
        }
    }
}

fn is_true(value: Option<String>) -> bool {
    matches!(value.as_deref(), Some("1") | Some("true"))
}

fn unsigned(e: &BytesStart<'_>, key: &[u8]) -> Option<u32> {
    attr_i64(e, key)
        .ok()
        .flatten()
        .and_then(|v| u32::try_from(v).ok())
}

/// Read every paragraph of a text body whose start tag was just consumed.
///
/// Blank paragraphs are left out of the result.
pub(crate) fn read_text_body(
    reader: &mut Reader<&[u8]>,
    ctx: &TextContext<'_>,
) -> Result<Vec<ParagraphRecord>> {
    let mut paragraphs = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 && e.local_name().as_ref() == b"p" {
                    if let Some(para) = read_paragraph(reader, ctx)? {
                        paragraphs.push(para);
                    }
                } else {
                    depth += 1;
                }
            },
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return Ok(paragraphs);
                }
                depth -= 1;
            },
            Ok(Event::Eof) => {
                return Err(OoxmlError::Xml("unexpected end of document in text body".to_string()));
            },
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
    }
}

/// Read one `a:p` whose start tag was just consumed.
///
/// Returns `Ok(None)` when the paragraph has no non-whitespace text.
pub(crate) fn read_paragraph(
    reader: &mut Reader<&[u8]>,
    ctx: &TextContext<'_>,
) -> Result<Option<ParagraphRecord>> {
    let mut level = 0u32;
    let mut alignment: Option<Alignment> = None;
    let mut markers = BulletMarkers::default();
    let mut default_size: Option<u32> = None;
    let mut in_ppr = false;
    let mut runs: Vec<(Run, Option<u32>)> = Vec::new();
    let mut current: Option<RunState> = None;
    let mut depth = 0usize;

    loop {
        let (e, is_start) = match reader.read_event() {
            Ok(Event::Start(e)) => (e, true),
            Ok(Event::Empty(e)) => (e, false),
            Ok(Event::Text(t)) => {
                if let Some(state) = current.as_mut().filter(|s| s.in_text) {
                    let text = text_value(&t).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    state.run.text.push_str(&text);
                }
                continue;
            },
            Ok(Event::GeneralRef(r)) => {
                if let Some(state) = current.as_mut().filter(|s| s.in_text) {
                    state.run.text.push_str(&general_ref_value(&r));
                }
                continue;
            },
            Ok(Event::CData(c)) => {
                if let Some(state) = current.as_mut().filter(|s| s.in_text) {
                    state.run.text.push_str(&String::from_utf8_lossy(c.as_ref()));
                }
                continue;
            },
            Ok(Event::End(end)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                match end.local_name().as_ref() {
                    b"pPr" => in_ppr = false,
                    b"t" => {
                        if let Some(state) = current.as_mut() {
                            state.in_text = false;
                        }
                    },
                    b"r" => {
                        if let Some(state) = current.take() {
                            if !state.run.is_blank() {
                                runs.push((state.run, state.size));
                            }
                        }
                    },
                    _ => {},
                }
                continue;
            },
            Ok(Event::Eof) => {
                return Err(OoxmlError::Xml("unexpected end of document in paragraph".to_string()));
            },
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => continue,
        };

        if is_start {
            depth += 1;
        }

        match e.local_name().as_ref() {
            b"pPr" if current.is_none() => {
                in_ppr = is_start;
                if let Some(lvl) = unsigned(&e, b"lvl") {
                    level = lvl;
                }
                alignment = attr_value(&e, b"algn")
                    .as_deref()
                    .and_then(Alignment::from_algn);
            },
            b"buNone" if in_ppr => markers.none = true,
            b"buAutoNum" if in_ppr => markers.auto_num = true,
            b"buChar" if in_ppr => markers.char = true,
            b"defRPr" if in_ppr => default_size = unsigned(&e, b"sz").filter(|&sz| sz > 0),
            b"r" => current = Some(RunState::default()),
            b"rPr" => {
                if let Some(state) = current.as_mut() {
                    state.run.bold = is_true(attr_value(&e, b"b"));
                    state.run.italic = is_true(attr_value(&e, b"i"));
                    state.run.underline = attr_value(&e, b"u").is_some_and(|u| u != "none");
                    state.run.strikethrough =
                        attr_value(&e, b"strike").is_some_and(|s| s != "noStrike");
                    state.size = unsigned(&e, b"sz").filter(|&sz| sz > 0);
                }
            },
            b"hlinkClick" => {
                if let Some(state) = current.as_mut() {
                    state.run.hyperlink = prefixed_attr_value(&e, b"id")
                        .and_then(|rid| ctx.hyperlinks.get(&rid))
                        .map(|address| Hyperlink::new(address.as_str()));
                }
            },
            b"t" if is_start => {
                if let Some(state) = current.as_mut() {
                    state.in_text = true;
                }
            },
            _ => {},
        }
    }

    let forced_plain = ctx.role.is_some();
    let runs: Vec<Run> = runs
        .into_iter()
        .map(|(mut run, size)| {
            run.font_size_px = size.or(default_size).and_then(centipoints_to_px);
            run
        })
        .collect();

    if runs.iter().all(Run::is_blank) {
        return Ok(None);
    }

    let default_alignment = match ctx.role {
        Some(role) if role.centers_by_default() => Alignment::Center,
        _ => Alignment::Left,
    };

    Ok(Some(ParagraphRecord {
        runs,
        level,
        kind: if forced_plain {
            ParagraphKind::Plain
        } else {
            markers.kind()
        },
        alignment: alignment.unwrap_or(default_alignment),
    }))
}
