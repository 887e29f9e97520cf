use super::config::{HtmlOptions, LayoutMode};
use super::traits::ToHtml;
use super::writer::HtmlWriter;
/// ToHtml implementations for extracted decks and slides.
///
/// Flow layout streams a slide's text into a shared `r-fit-text` wrapper and
/// leaves tables absolutely positioned outside it. Positioned layout gives
/// every shape its own box.
use crate::common::xml::escape_html;
use crate::ooxml::pptx::shapes::{PlaceholderRole, ShapeRecord, TitleShape};
use crate::presentation::bullets::{ContentBlock, SlideStream, group_paragraphs};
use crate::presentation::{DeckRecord, PARALLEL_THRESHOLD, SlideRecord};
use rayon::prelude::*;

const FIT_OPEN: &str = "<div class=\"r-fit-text\">\n";
const FIT_CLOSE: &str = "</div>\n";

/// Rendered sections of a deck, in slide order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDeck {
    pub sections: Vec<String>,
}

impl RenderedDeck {
    /// All sections concatenated into one document body.
    pub fn html(&self) -> String {
        self.sections.concat()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(String::as_str)
    }
}

/// Render every slide of `deck` into its own `<section>`.
pub fn render_deck(deck: &DeckRecord, options: &HtmlOptions) -> RenderedDeck {
    let slides = deck.slides();
    let sections = if options.use_parallel && slides.len() >= PARALLEL_THRESHOLD {
        slides
            .par_iter()
            .map(|slide| render_slide(slide, options))
            .collect()
    } else {
        slides.iter().map(|slide| render_slide(slide, options)).collect()
    };
    RenderedDeck { sections }
}

/// Render one slide in the configured layout.
pub fn render_slide(slide: &SlideRecord, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter::new(options);
    writer.push_str(&format!(
        "<section data-transition='{}'>\n",
        escape_html(&options.transition)
    ));
    match options.layout {
        LayoutMode::Flow => write_flow(&mut writer, slide),
        LayoutMode::Positioned => write_positioned(&mut writer, slide),
    }
    writer.push_str("</section>\n");
    writer.finish()
}

fn write_flow(writer: &mut HtmlWriter<'_>, slide: &SlideRecord) {
    let blocks = SlideStream::from_shapes(&slide.body);
    let has_table = slide.has_table();
    let has_text = blocks.iter().any(|b| !matches!(b, ContentBlock::Table(_)));

    if has_text {
        writer.push_str(FIT_OPEN);
    }
    if let Some(title) = &slide.title {
        let tag = if has_table { "h4" } else { "h2" };
        writer.write_heading(tag, &title.paragraphs);
    }

    for block in &blocks {
        match block {
            ContentBlock::Table(shape) => {
                if has_text {
                    writer.push_str(FIT_CLOSE);
                }
                writer.write_positioned_table(&shape.table, &shape.geometry);
                writer.push_str("\n");
                if has_text {
                    writer.push_str(FIT_OPEN);
                }
            },
            other => writer.write_blocks(std::slice::from_ref(other)),
        }
    }

    if has_text {
        writer.push_str(FIT_CLOSE);
    }
}

fn write_positioned(writer: &mut HtmlWriter<'_>, slide: &SlideRecord) {
    if let Some(title) = &slide.title {
        write_title_box(writer, title);
    }
    for shape in &slide.body {
        match shape {
            ShapeRecord::Title(title) => write_title_box(writer, title),
            ShapeRecord::Text(text) => {
                writer.open_shape(&text.geometry);
                writer.write_blocks(&group_paragraphs(&text.paragraphs));
                writer.close_shape();
            },
            ShapeRecord::Table(table) => {
                writer.open_shape(&table.geometry);
                writer.write_table(&table.table);
                writer.push_str("\n");
                writer.close_shape();
            },
            ShapeRecord::Image(image) => {
                writer.open_shape(&image.geometry);
                writer.write_image(image);
                writer.push_str("\n");
                writer.close_shape();
            },
        }
    }
}

fn write_title_box(writer: &mut HtmlWriter<'_>, title: &TitleShape) {
    writer.open_shape(&title.geometry);
    writer.write_heading(heading_tag(title.role), &title.paragraphs);
    writer.close_shape();
}

fn heading_tag(role: PlaceholderRole) -> &'static str {
    match role {
        PlaceholderRole::CenteredTitle => "h1",
        PlaceholderRole::Title => "h2",
        PlaceholderRole::Subtitle => "h3",
    }
}

impl ToHtml for SlideRecord {
    fn to_html_with_options(&self, options: &HtmlOptions) -> String {
        render_slide(self, options)
    }
}

impl ToHtml for DeckRecord {
    fn to_html_with_options(&self, options: &HtmlOptions) -> String {
        render_deck(self, options).html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::{
        Alignment, Geometry, ImageShape, ParagraphKind, ParagraphRecord, Run, TableRecord,
        TableShape, TextShape,
    };
    use crate::ooxml::pptx::{MemoryImageStore, SlideSize};
    use crate::presentation::tests::{PptxFixture, table_frame, text_sp, title_sp};
    use crate::presentation::{ConvertOptions, Converter};

    fn para(text: &str, level: u32, kind: ParagraphKind) -> ParagraphRecord {
        ParagraphRecord {
            runs: vec![Run::plain(text)],
            level,
            kind,
            alignment: Alignment::Left,
        }
    }

    fn title(role: PlaceholderRole, text: &str) -> TitleShape {
        TitleShape {
            role,
            paragraphs: vec![para(text, 0, ParagraphKind::Plain)],
            geometry: Geometry {
                x: 5.0,
                y: 4.0,
                width: 90.0,
                height: 15.0,
            },
        }
    }

    fn table() -> TableShape {
        TableShape {
            table: TableRecord {
                rows: vec![
                    vec![vec![Run::plain("h")]],
                    vec![vec![Run::plain("v")]],
                ],
                column_widths: Some(vec![100.0]),
            },
            geometry: Geometry {
                x: 10.0,
                y: 30.0,
                width: 80.0,
                height: 40.0,
            },
        }
    }

    fn text(paragraphs: Vec<ParagraphRecord>) -> ShapeRecord {
        ShapeRecord::Text(TextShape {
            paragraphs,
            geometry: Geometry {
                x: 5.0,
                y: 25.0,
                width: 90.0,
                height: 70.0,
            },
        })
    }

    #[test]
    fn test_flow_text_only() {
        let slide = SlideRecord {
            index: 0,
            title: Some(title(PlaceholderRole::Title, "Agenda")),
            body: vec![text(vec![
                para("Intro", 0, ParagraphKind::Plain),
                para("One", 0, ParagraphKind::Bullet),
                para("Two", 1, ParagraphKind::Bullet),
            ])],
        };
        assert_eq!(
            slide.to_html(),
            "<section data-transition='fade'>\n\
             <div class=\"r-fit-text\">\n\
             \x20 <h2>Agenda</h2>\n\
             \x20 <p class='fragment'>Intro</p>\n\
             <ul><li class='fragment'>One<ul><li class='fragment'>Two</li></ul></li></ul>\n\
             </div>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_flow_table_breaks_wrapper() {
        let slide = SlideRecord {
            index: 0,
            title: Some(title(PlaceholderRole::Title, "Numbers")),
            body: vec![
                text(vec![para("Before", 0, ParagraphKind::Plain)]),
                ShapeRecord::Table(table()),
                text(vec![para("After", 0, ParagraphKind::Plain)]),
            ],
        };
        assert_eq!(
            slide.to_html(),
            "<section data-transition='fade'>\n\
             <div class=\"r-fit-text\">\n\
             \x20 <h4>Numbers</h4>\n\
             \x20 <p class='fragment'>Before</p>\n\
             </div>\n\
             <div style=\"position:absolute; top:30.00%; left:10.00%; width:80.00%; height:40.00%;\">\n\
             <table class=\"fragment auto-fit\">\n\
             \x20 <colgroup>\n\
             \x20   <col style=\"width:100.00%;\">\n\
             \x20 </colgroup>\n\
             <tr><th>h</th> </tr>\n\
             <tr><td>v</td> </tr>\n\
             </table></div>\n\
             \n\
             <div class=\"r-fit-text\">\n\
             \x20 <p class='fragment'>After</p>\n\
             </div>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_flow_table_only_has_no_wrapper() {
        let slide = SlideRecord {
            index: 0,
            title: None,
            body: vec![ShapeRecord::Table(table())],
        };
        let html = slide.to_html();
        assert!(!html.contains("r-fit-text"));
        assert!(html.starts_with("<section data-transition='fade'>\n<div style="));
    }

    #[test]
    fn test_positioned_headings_by_role() {
        let slide = SlideRecord {
            index: 0,
            title: Some(title(PlaceholderRole::CenteredTitle, "Launch")),
            body: vec![ShapeRecord::Title(title(PlaceholderRole::Subtitle, "Q3 plan"))],
        };
        let options = HtmlOptions::new().with_layout(LayoutMode::Positioned);
        let html = slide.to_html_with_options(&options);
        assert!(html.contains("  <h1>Launch</h1>\n"));
        assert!(html.contains("  <h3>Q3 plan</h3>\n"));
        assert!(html.contains(
            "<div class='shape' style='position:absolute; left:5.00%; top:4.00%; width:90.00%; height:15.00%;'>"
        ));

        let plain = SlideRecord {
            index: 0,
            title: Some(title(PlaceholderRole::Title, "Plain")),
            body: vec![],
        };
        assert!(plain.to_html_with_options(&options).contains("<h2>Plain</h2>"));
    }

    #[test]
    fn test_positioned_shapes_get_own_boxes() {
        let image = ImageShape {
            path: "images/slide1_img3.png".to_string(),
            extension: "png".to_string(),
            pixel_size: None,
            geometry: Geometry {
                x: 50.0,
                y: 50.0,
                width: 50.0,
                height: 50.0,
            },
        };
        let slide = SlideRecord {
            index: 0,
            title: None,
            body: vec![
                text(vec![para("a", 0, ParagraphKind::Bullet)]),
                ShapeRecord::Table(table()),
                ShapeRecord::Image(image),
            ],
        };
        let options = HtmlOptions::new().with_layout(LayoutMode::Positioned);
        let html = slide.to_html_with_options(&options);
        assert_eq!(html.matches("<div class='shape'").count(), 3);
        assert!(!html.contains("r-fit-text"));
        assert!(html.contains("<img src='images/slide1_img3.png' alt=''"));
        assert!(html.contains("<table class=\"fragment auto-fit\">"));
    }

    #[test]
    fn test_empty_slide() {
        let slide = SlideRecord::empty(3);
        assert_eq!(slide.to_html(), "<section data-transition='fade'>\n</section>\n");
    }

    #[test]
    fn test_custom_transition() {
        let slide = SlideRecord::empty(0);
        let options = HtmlOptions::new().with_transition("zoom");
        assert!(slide.to_html_with_options(&options).starts_with("<section data-transition='zoom'>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let mut fixture = PptxFixture::new();
        for i in 0..PARALLEL_THRESHOLD + 1 {
            fixture = fixture.slide(&format!(
                "{}{}{}",
                title_sp("title", &format!("Slide {}", i)),
                text_sp(&[(0, "bu", "alpha"), (1, "bu", "beta"), (0, "none", "gamma")]),
                table_frame(&[&["k", "v"], &["x", "1"]])
            ));
        }
        let data = fixture.build();

        let render = |parallel: bool| {
            let store = MemoryImageStore::new();
            let deck = Converter::new(ConvertOptions::new().with_parallel(parallel))
                .convert_bytes(data.clone(), &store)
                .unwrap();
            render_deck(&deck, &HtmlOptions::new().with_parallel(parallel))
        };

        let first = render(true);
        let second = render(true);
        let sequential = render(false);
        assert_eq!(first, second);
        assert_eq!(first, sequential);
        assert_eq!(first.len(), PARALLEL_THRESHOLD + 1);
        assert!(first.sections[0].contains("<h4>Slide 0</h4>"));
    }

    #[test]
    fn test_deck_html_concatenates_sections() {
        let deck = DeckRecord::new(
            vec![SlideRecord::empty(0), SlideRecord::empty(1)],
            SlideSize::default(),
            Vec::new(),
        );
        assert_eq!(
            deck.to_html(),
            "<section data-transition='fade'>\n</section>\n<section data-transition='fade'>\n</section>\n"
        );
    }
}
