/// Low-level writer for Reveal.js markup.
///
/// This module provides the `HtmlWriter` struct which turns runs, content
/// blocks, tables and images into markup. Section layout lives in
/// `presentation`.
use super::config::HtmlOptions;
use crate::common::xml::escape_html;
use crate::ooxml::pptx::HyperlinkKind;
use crate::ooxml::pptx::shapes::{Alignment, Geometry, ImageShape, ParagraphRecord, Run, TableRecord};
use crate::presentation::bullets::{BulletNode, BulletTree, ContentBlock};

/// Markup buffer with rendering options.
pub struct HtmlWriter<'o> {
    buffer: String,
    options: &'o HtmlOptions,
}

impl<'o> HtmlWriter<'o> {
    pub fn new(options: &'o HtmlOptions) -> Self {
        Self {
            buffer: String::with_capacity(2048),
            options,
        }
    }

    /// Write one formatted run.
    ///
    /// Wrapping goes inside out: `<strong>`, `<em>`, `<u>`, one styled
    /// `<span>` for size and strikethrough, then the link.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pptx_reveal::html::{HtmlOptions, HtmlWriter};
    /// use pptx_reveal::ooxml::pptx::Run;
    ///
    /// let options = HtmlOptions::default();
    /// let mut writer = HtmlWriter::new(&options);
    /// let mut run = Run::plain("a < b");
    /// run.bold = true;
    /// writer.write_run(&run);
    /// assert_eq!(writer.finish(), "<strong>a &lt; b</strong>");
    /// ```
    pub fn write_run(&mut self, run: &Run) {
        if run.text.is_empty() {
            return;
        }

        let mut html = escape_html(&run.text);
        if run.bold {
            html = format!("<strong>{}</strong>", html);
        }
        if run.italic {
            html = format!("<em>{}</em>", html);
        }
        if run.underline {
            html = format!("<u>{}</u>", html);
        }

        let mut style = String::new();
        if let Some(px) = run.font_size_px {
            style.push_str(&format!("font-size:{:.2}px;", px));
        }
        if run.strikethrough {
            if !style.is_empty() {
                style.push(' ');
            }
            style.push_str("text-decoration: line-through;");
        }
        if !style.is_empty() {
            html = format!("<span style='{}'>{}</span>", style, html);
        }

        if let Some(link) = run.hyperlink.as_ref().filter(|link| link.is_linkable()) {
            let href = escape_html(&link.address);
            html = match link.kind {
                HyperlinkKind::Web => format!(
                    "<a href='{}' target='_blank' rel='noopener noreferrer'>{}</a>",
                    href, html
                ),
                _ => format!("<a href='{}'>{}</a>", href, html),
            };
        }

        self.buffer.push_str(&html);
    }

    pub fn write_runs(&mut self, runs: &[Run]) {
        for run in runs {
            self.write_run(run);
        }
    }

    /// Write a `<p>` for a plain paragraph.
    pub fn write_paragraph(&mut self, para: &ParagraphRecord) {
        self.buffer.push_str("  <p");
        self.push_attrs(para.alignment);
        self.buffer.push('>');
        self.write_runs(&para.runs);
        self.buffer.push_str("</p>");
    }

    /// Write a heading. Paragraphs are separated by `<br>`.
    pub fn write_heading(&mut self, tag: &str, paragraphs: &[ParagraphRecord]) {
        self.buffer.push_str(&format!("  <{}>", tag));
        for (i, para) in paragraphs.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str("<br>");
            }
            self.write_runs(&para.runs);
        }
        self.buffer.push_str(&format!("</{}>\n", tag));
    }

    /// Write a list tree as nested `<ul>`/`<ol>` elements.
    pub fn write_list(&mut self, tree: &BulletTree<'_>) {
        self.write_items(&tree.roots, tree.ordered);
    }

    fn write_items(&mut self, nodes: &[BulletNode<'_>], ordered: bool) {
        let tag = if ordered { "ol" } else { "ul" };
        self.buffer.push_str(&format!("<{}>", tag));
        for node in nodes {
            self.buffer.push_str("<li");
            self.push_attrs(node.alignment);
            self.buffer.push('>');
            self.write_runs(node.runs);
            if !node.children.is_empty() {
                self.write_items(&node.children, node.ordered);
            }
            self.buffer.push_str("</li>");
        }
        self.buffer.push_str(&format!("</{}>", tag));
    }

    /// Write a bare `<table>` element.
    ///
    /// The first row is the header row. Empty cells render blank.
    pub fn write_table(&mut self, table: &TableRecord) {
        if self.options.fragments {
            self.buffer.push_str("<table class=\"fragment auto-fit\">\n");
        } else {
            self.buffer.push_str("<table class=\"auto-fit\">\n");
        }

        if let Some(widths) = &table.column_widths {
            self.buffer.push_str("  <colgroup>\n");
            for width in widths {
                self.buffer
                    .push_str(&format!("    <col style=\"width:{:.2}%;\">\n", width));
            }
            self.buffer.push_str("  </colgroup>\n");
        }

        for (i, row) in table.rows.iter().enumerate() {
            let tag = if i == 0 { "th" } else { "td" };
            self.buffer.push_str("<tr>");
            for cell in row {
                self.buffer.push_str(&format!("<{}>", tag));
                self.write_runs(cell);
                self.buffer.push_str(&format!("</{}> ", tag));
            }
            self.buffer.push_str("</tr>\n");
        }
        self.buffer.push_str("</table>");
    }

    /// Write a table inside its own absolutely positioned container.
    pub fn write_positioned_table(&mut self, table: &TableRecord, geometry: &Geometry) {
        self.buffer.push_str(&format!(
            "<div style=\"position:absolute; top:{:.2}%; left:{:.2}%; width:{:.2}%; height:{:.2}%;\">\n",
            geometry.y, geometry.x, geometry.width, geometry.height
        ));
        self.write_table(table);
        self.buffer.push_str("</div>\n");
    }

    /// Write an image that fills its container.
    pub fn write_image(&mut self, image: &ImageShape) {
        self.buffer.push_str(&format!(
            "<img src='{}' alt='' style='width:100%; height:100%; object-fit:contain;'>",
            escape_html(&image.path)
        ));
    }

    /// Write an image in flow layout, scaled to the available width.
    pub fn write_inline_image(&mut self, image: &ImageShape) {
        self.buffer.push_str("  <p");
        self.push_attrs(Alignment::Left);
        self.buffer.push_str(&format!(
            "><img src='{}' alt='' style='max-width:100%; object-fit:contain;'></p>",
            escape_html(&image.path)
        ));
    }

    /// Write grouped text blocks, one per line.
    ///
    /// Tables and images are written with their in-flow variants.
    pub fn write_blocks(&mut self, blocks: &[ContentBlock<'_>]) {
        for block in blocks {
            match block {
                ContentBlock::Paragraph(para) => self.write_paragraph(para),
                ContentBlock::List(tree) => self.write_list(tree),
                ContentBlock::Table(shape) => self.write_table(&shape.table),
                ContentBlock::Image(image) => self.write_inline_image(image),
            }
            self.buffer.push('\n');
        }
    }

    /// Open a positioned shape box.
    pub fn open_shape(&mut self, geometry: &Geometry) {
        self.buffer.push_str(&format!(
            "<div class='shape' style='position:absolute; left:{:.2}%; top:{:.2}%; width:{:.2}%; height:{:.2}%;'>\n",
            geometry.x, geometry.y, geometry.width, geometry.height
        ));
    }

    pub fn close_shape(&mut self) {
        self.buffer.push_str("</div>\n");
    }

    /// `class` and `style` attributes for a paragraph or list item.
    fn push_attrs(&mut self, alignment: Alignment) {
        if self.options.fragments {
            self.buffer.push_str(" class='fragment'");
        }
        if alignment != Alignment::Left {
            self.buffer
                .push_str(&format!(" style='text-align:{};'", alignment.as_css()));
        }
    }

    /// Get the final markup.
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Append raw markup to the buffer.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}
