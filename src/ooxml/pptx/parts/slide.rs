/// Slide parts and shape extraction.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package. The extractor
/// walks the direct children of `p:spTree` in document order and turns each
/// supported shape into a [`ShapeRecord`].
use crate::common::{ConversionWarning, Error};
use crate::common::xml::{attr_value, prefixed_attr_value};
use crate::ooxml::error::{OoxmlError, Result as OoxmlResult};
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::{PackURI, PhysPkgReader, Relationships};
use crate::ooxml::pptx::hyperlinks::HyperlinkMap;
use crate::ooxml::pptx::media::{ImageStore, image_dimensions, image_extension};
use crate::ooxml::pptx::parts::presentation::SlideSize;
use crate::ooxml::pptx::shapes::picture::image_file_name;
use crate::ooxml::pptx::shapes::table::read_table;
use crate::ooxml::pptx::shapes::textframe::{TextContext, read_text_body};
use crate::ooxml::pptx::shapes::{
    Geometry, ImageShape, ParagraphRecord, PlaceholderRole, ShapeRecord, TableRecord, TableShape,
    TextShape, TitleShape, Transform,
};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Relationship lookups for one slide.
#[derive(Debug, Clone, Default)]
pub struct SlideLinks {
    /// Hyperlink rId to target address
    pub hyperlinks: HyperlinkMap,
    /// Image rId to picture part name
    pub images: HashMap<String, PackURI>,
}

impl SlideLinks {
    /// Collect hyperlink and image relationships from a slide's `.rels` part.
    pub fn from_relationships(rels: &Relationships) -> OoxmlResult<Self> {
        let mut links = Self::default();
        for rel in rels.iter() {
            if rel.is_type(relationship_type::HYPERLINK) {
                links
                    .hyperlinks
                    .insert(rel.r_id().to_string(), rel.target_ref().to_string());
            } else if rel.is_type(relationship_type::IMAGE) && !rel.is_external() {
                links
                    .images
                    .insert(rel.r_id().to_string(), rels.target_partname(rel)?);
            }
        }
        Ok(links)
    }
}

/// A slide part ready for extraction.
#[derive(Debug, Clone)]
pub struct SlideSource<'a> {
    /// Zero-based position in presentation order
    pub index: usize,
    pub partname: PackURI,
    pub xml: &'a [u8],
    pub links: SlideLinks,
}

/// Shapes extracted from one slide, with the warnings raised on the way.
#[derive(Debug, Clone, Default)]
pub struct SlideContent {
    pub shapes: Vec<ShapeRecord>,
    pub warnings: Vec<ConversionWarning>,
}

/// Which `p:spTree` child is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Shape,
    GraphicFrame,
    Picture,
}

/// Everything gathered from one shape element before it becomes a record.
#[derive(Debug, Default)]
struct RawShape {
    name: String,
    role: Option<PlaceholderRole>,
    saw_xfrm: bool,
    transform: Option<Transform>,
    paragraphs: Vec<ParagraphRecord>,
    table: Option<TableRecord>,
    embed: Option<String>,
}

impl RawShape {
    /// Read the body of a shape element whose start tag was just consumed.
    fn read(reader: &mut Reader<&[u8]>, hyperlinks: &HyperlinkMap) -> OoxmlResult<Self> {
        let mut raw = RawShape::default();
        let mut depth = 0usize;

        loop {
            let (e, is_start) = match reader.read_event() {
                Ok(Event::Start(e)) => (e, true),
                Ok(Event::Empty(e)) => (e, false),
                Ok(Event::End(_)) => {
                    if depth == 0 {
                        return Ok(raw);
                    }
                    depth -= 1;
                    continue;
                },
                Ok(Event::Eof) => {
                    return Err(OoxmlError::Xml("unexpected end of document in shape".to_string()));
                },
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => continue,
            };

            match e.local_name().as_ref() {
                b"cNvPr" if raw.name.is_empty() => {
                    raw.name = attr_value(&e, b"name").unwrap_or_default();
                },
                b"ph" => {
                    raw.role = attr_value(&e, b"type")
                        .as_deref()
                        .and_then(PlaceholderRole::from_ph_type);
                },
                b"blip" => raw.embed = prefixed_attr_value(&e, b"embed"),
                b"xfrm" if !raw.saw_xfrm => {
                    raw.saw_xfrm = true;
                    if is_start {
                        raw.transform = Transform::read(reader)?;
                        continue;
                    }
                },
                b"txBody" if is_start => {
                    let ctx = TextContext::new(hyperlinks, raw.role);
                    raw.paragraphs = read_text_body(reader, &ctx)?;
                    continue;
                },
                b"tbl" if is_start => {
                    let ctx = TextContext::new(hyperlinks, None);
                    raw.table = Some(read_table(reader, &ctx)?);
                    continue;
                },
                _ => {},
            }

            if is_start {
                depth += 1;
            }
        }
    }
}

/// Turns slide XML into shape records.
///
/// Holds only shared references, so one extractor can serve several slides
/// from different threads.
pub struct SlideExtractor<'a> {
    phys: &'a PhysPkgReader,
    size: SlideSize,
    store: &'a dyn ImageStore,
}

impl<'a> SlideExtractor<'a> {
    pub fn new(phys: &'a PhysPkgReader, size: SlideSize, store: &'a dyn ImageStore) -> Self {
        Self { phys, size, store }
    }

    /// Extract every supported shape of a slide in document order.
    ///
    /// # Errors
    ///
    /// `Error::SlideParse` when the slide XML is malformed and
    /// `Error::ImageStore` when a picture cannot be written.
    pub fn extract(&self, source: &SlideSource<'_>) -> crate::Result<SlideContent> {
        let mut content = SlideContent::default();
        let mut reader = Reader::from_reader(source.xml);

        let mut depth = 0usize;
        let mut tree_depth: Option<usize> = None;
        let mut saw_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    saw_root = true;
                    if tree_depth == Some(depth) {
                        let kind = match e.local_name().as_ref() {
                            b"sp" => Some(ShapeKind::Shape),
                            b"graphicFrame" => Some(ShapeKind::GraphicFrame),
                            b"pic" => Some(ShapeKind::Picture),
                            _ => None,
                        };
                        match kind {
                            Some(kind) => {
                                let raw = RawShape::read(&mut reader, &source.links.hyperlinks)
                                    .map_err(|err| Error::slide_parse(source.index, err))?;
                                self.push_shape(kind, raw, source, &mut content)?;
                            },
                            None => {
                                if !matches!(e.local_name().as_ref(), b"nvGrpSpPr" | b"grpSpPr" | b"extLst") {
                                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                                    debug!(slide = source.index, element = %name, "skipping unsupported shape");
                                }
                                let end = e.to_end().into_owned();
                                reader
                                    .read_to_end(end.name())
                                    .map_err(|err| Error::slide_parse(source.index, err))?;
                            },
                        }
                        continue;
                    }
                    if tree_depth.is_none() && e.local_name().as_ref() == b"spTree" {
                        tree_depth = Some(depth + 1);
                    }
                    depth += 1;
                },
                Ok(Event::Empty(_)) => saw_root = true,
                Ok(Event::End(_)) => {
                    depth = depth.saturating_sub(1);
                    if tree_depth == Some(depth + 1) {
                        tree_depth = None;
                    }
                },
                Ok(Event::Eof) => break,
                Err(err) => return Err(Error::slide_parse(source.index, err)),
                _ => {},
            }
        }

        if !saw_root || depth != 0 {
            return Err(Error::slide_parse(
                source.index,
                "missing or unterminated root element",
            ));
        }

        Ok(content)
    }

    fn geometry(&self, raw: &RawShape, source: &SlideSource<'_>, content: &mut SlideContent) -> Geometry {
        match raw.transform {
            Some(ref xfrm) => Geometry::from_transform(xfrm, self.size),
            None => {
                warn!(slide = source.index, shape = %raw.name, "shape has no usable transform, using zero geometry");
                content.warnings.push(ConversionWarning::GeometryFallback {
                    slide: source.index,
                    shape: raw.name.clone(),
                });
                Geometry::default()
            },
        }
    }

    fn push_shape(
        &self,
        kind: ShapeKind,
        mut raw: RawShape,
        source: &SlideSource<'_>,
        content: &mut SlideContent,
    ) -> crate::Result<()> {
        let record = match kind {
            ShapeKind::Shape => {
                if raw.paragraphs.is_empty() {
                    return Ok(());
                }
                let geometry = self.geometry(&raw, source, content);
                match raw.role {
                    Some(role) => ShapeRecord::Title(TitleShape {
                        role,
                        paragraphs: raw.paragraphs,
                        geometry,
                    }),
                    None => ShapeRecord::Text(TextShape {
                        paragraphs: raw.paragraphs,
                        geometry,
                    }),
                }
            },
            ShapeKind::GraphicFrame => {
                let Some(table) = raw.table.take() else {
                    debug!(slide = source.index, shape = %raw.name, "graphic frame without a table");
                    return Ok(());
                };
                let geometry = self.geometry(&raw, source, content);
                ShapeRecord::Table(TableShape { table, geometry })
            },
            ShapeKind::Picture => match self.store_picture(&raw, source, content)? {
                Some(image) => ShapeRecord::Image(image),
                None => return Ok(()),
            },
        };
        content.shapes.push(record);
        Ok(())
    }

    fn store_picture(
        &self,
        raw: &RawShape,
        source: &SlideSource<'_>,
        content: &mut SlideContent,
    ) -> crate::Result<Option<ImageShape>> {
        let resolved = raw
            .embed
            .as_deref()
            .ok_or_else(|| "picture has no embedded blip".to_string())
            .and_then(|rid| {
                source
                    .links
                    .images
                    .get(rid)
                    .ok_or_else(|| format!("relationship {} is not an embedded image", rid))
            })
            .and_then(|partname| {
                self.phys
                    .blob_for(partname)
                    .map(|blob| (partname, blob))
                    .map_err(|err| err.to_string())
            });

        let (partname, blob) = match resolved {
            Ok(found) => found,
            Err(reason) => {
                warn!(slide = source.index, shape = %raw.name, %reason, "skipping picture");
                content.warnings.push(ConversionWarning::ImageSkipped {
                    slide: source.index,
                    shape: raw.name.clone(),
                    reason,
                });
                return Ok(None);
            },
        };

        let file_name = image_file_name(source.index + 1, content.shapes.len() + 1, partname.ext());
        let path = self
            .store
            .put(&file_name, blob)
            .map_err(|err| Error::ImageStore(format!("{}: {}", file_name, err)))?;
        let geometry = self.geometry(raw, source, content);

        Ok(Some(ImageShape {
            path,
            extension: image_extension(partname.ext()),
            pixel_size: image_dimensions(blob),
            geometry,
        }))
    }
}
