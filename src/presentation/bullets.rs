//! Bullet hierarchy and content grouping.
//!
//! Extraction yields flat paragraphs carrying an indent level. Rendering
//! wants nested lists, so consecutive list paragraphs are folded into trees
//! here. The builder keeps an explicit stack rooted at a virtual level −1
//! node: a new item pops every open item at the same or a deeper level and
//! becomes a child of whatever is left on top. Popped items move into their
//! parent, so the finished tree owns its nodes outright.

use crate::ooxml::pptx::shapes::{
    Alignment, ImageShape, ParagraphKind, ParagraphRecord, Run, ShapeRecord, TableShape,
};

/// One list item and its nested items.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletNode<'a> {
    pub runs: &'a [Run],
    pub level: u32,
    pub ordered: bool,
    pub alignment: Alignment,
    pub children: Vec<BulletNode<'a>>,
}

impl<'a> BulletNode<'a> {
    fn new(record: &'a ParagraphRecord, ordered: bool) -> Self {
        Self {
            runs: &record.runs,
            level: record.level,
            ordered,
            alignment: record.alignment,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(BulletNode::len).sum::<usize>()
    }

    /// Concatenated run text of this item alone.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A top-level list: the children of the virtual root.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletTree<'a> {
    pub ordered: bool,
    pub roots: Vec<BulletNode<'a>>,
}

impl<'a> BulletTree<'a> {
    /// Total number of items at every depth.
    pub fn len(&self) -> usize {
        self.roots.iter().map(BulletNode::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Build one list tree from paragraphs in document order.
///
/// Levels need not be contiguous: a jump from 0 to 3 nests the level-3 item
/// directly under the level-0 one.
pub fn build_tree<'a, I>(records: I, ordered: bool) -> BulletTree<'a>
where
    I: IntoIterator<Item = &'a ParagraphRecord>,
{
    let mut roots: Vec<BulletNode<'a>> = Vec::new();
    let mut stack: Vec<BulletNode<'a>> = Vec::new();

    for record in records {
        while stack.last().is_some_and(|top| top.level >= record.level) {
            close_top(&mut stack, &mut roots);
        }
        stack.push(BulletNode::new(record, ordered));
    }
    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    BulletTree { ordered, roots }
}

/// Pop the top of the stack and append it to its parent (or the root).
fn close_top<'a>(stack: &mut Vec<BulletNode<'a>>, roots: &mut Vec<BulletNode<'a>>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// A renderable unit of slide content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock<'a> {
    Paragraph(&'a ParagraphRecord),
    List(BulletTree<'a>),
    Table(&'a TableShape),
    Image(&'a ImageShape),
}

/// Groups a stream of paragraphs, tables and images into content blocks.
///
/// List paragraphs are buffered while their kind stays the same. A plain
/// paragraph, a switch between bulleted and numbered, a table or an image
/// flushes the buffer into a finished tree first.
#[derive(Debug, Default)]
pub struct SlideStream<'a> {
    blocks: Vec<ContentBlock<'a>>,
    pending: Vec<&'a ParagraphRecord>,
    pending_kind: Option<ParagraphKind>,
}

impl<'a> SlideStream<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream every body shape of a slide in order.
    pub fn from_shapes(shapes: &'a [ShapeRecord]) -> Vec<ContentBlock<'a>> {
        let mut stream = Self::new();
        for shape in shapes {
            stream.push_shape(shape);
        }
        stream.finish()
    }

    pub fn push_shape(&mut self, shape: &'a ShapeRecord) {
        match shape {
            ShapeRecord::Title(title) => title.paragraphs.iter().for_each(|p| self.push_paragraph(p)),
            ShapeRecord::Text(text) => text.paragraphs.iter().for_each(|p| self.push_paragraph(p)),
            ShapeRecord::Table(table) => self.push_table(table),
            ShapeRecord::Image(image) => self.push_image(image),
        }
    }

    pub fn push_paragraph(&mut self, record: &'a ParagraphRecord) {
        if record.kind == ParagraphKind::Plain {
            self.flush();
            self.blocks.push(ContentBlock::Paragraph(record));
            return;
        }
        if self.pending_kind != Some(record.kind) {
            self.flush();
            self.pending_kind = Some(record.kind);
        }
        self.pending.push(record);
    }

    pub fn push_table(&mut self, table: &'a TableShape) {
        self.flush();
        self.blocks.push(ContentBlock::Table(table));
    }

    pub fn push_image(&mut self, image: &'a ImageShape) {
        self.flush();
        self.blocks.push(ContentBlock::Image(image));
    }

    fn flush(&mut self) {
        if let Some(kind) = self.pending_kind.take()
            && !self.pending.is_empty()
        {
            let ordered = kind == ParagraphKind::Numbered;
            let tree = build_tree(self.pending.drain(..), ordered);
            self.blocks.push(ContentBlock::List(tree));
        }
        self.pending.clear();
    }

    /// Flush pending list items and return the blocks.
    pub fn finish(mut self) -> Vec<ContentBlock<'a>> {
        self.flush();
        self.blocks
    }
}

/// Group the paragraphs of one text shape.
pub fn group_paragraphs(records: &[ParagraphRecord]) -> Vec<ContentBlock<'_>> {
    let mut stream = SlideStream::new();
    for record in records {
        stream.push_paragraph(record);
    }
    stream.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::{Geometry, TableRecord};
    use proptest::prelude::*;

    fn para(text: &str, level: u32, kind: ParagraphKind) -> ParagraphRecord {
        ParagraphRecord {
            runs: vec![Run::plain(text)],
            level,
            kind,
            alignment: Alignment::Left,
        }
    }

    fn bullets(levels: &[u32]) -> Vec<ParagraphRecord> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &lvl)| para(&format!("item{}", i), lvl, ParagraphKind::Bullet))
            .collect()
    }

    fn shape(text: &str, tree: &BulletNode<'_>) -> String {
        if tree.children.is_empty() {
            return text.to_string();
        }
        let kids: Vec<String> = tree.children.iter().map(|c| shape(&c.text(), c)).collect();
        format!("{}[{}]", text, kids.join(","))
    }

    fn outline(tree: &BulletTree<'_>) -> String {
        tree.roots
            .iter()
            .map(|n| shape(&n.text(), n))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_increasing_levels_form_a_chain() {
        let records = bullets(&[0, 1, 2, 3]);
        let tree = build_tree(&records, false);
        assert_eq!(outline(&tree), "item0[item1[item2[item3]]]");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_siblings_and_return_to_top() {
        let records = bullets(&[0, 1, 1, 0]);
        let tree = build_tree(&records, false);
        assert_eq!(outline(&tree), "item0[item1,item2],item3");
    }

    #[test]
    fn test_level_jump_nests_directly() {
        let records = bullets(&[0, 3, 1]);
        let tree = build_tree(&records, true);
        assert_eq!(outline(&tree), "item0[item1,item2]");
        assert!(tree.roots[0].ordered);
    }

    #[test]
    fn test_tree_starting_deep() {
        let records = bullets(&[2, 0]);
        let tree = build_tree(&records, false);
        assert_eq!(outline(&tree), "item0,item1");
    }

    #[test]
    fn test_paragraph_list_table_sequence() {
        let intro = para("Intro", 0, ParagraphKind::Plain);
        let items = bullets(&[0, 0, 0]);
        let table = TableShape {
            table: TableRecord {
                rows: vec![
                    vec![vec![Run::plain("a")], vec![Run::plain("b")]],
                    vec![vec![Run::plain("c")], vec![Run::plain("d")]],
                ],
                column_widths: None,
            },
            geometry: Geometry::default(),
        };

        let mut stream = SlideStream::new();
        stream.push_paragraph(&intro);
        items.iter().for_each(|p| stream.push_paragraph(p));
        stream.push_table(&table);
        let blocks = stream.finish();

        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], ContentBlock::Paragraph(_)));
        match &blocks[1] {
            ContentBlock::List(tree) => assert_eq!(tree.len(), 3),
            other => panic!("expected list, got {:?}", other),
        }
        assert!(matches!(blocks[2], ContentBlock::Table(_)));
    }

    #[test]
    fn test_kind_change_starts_new_tree() {
        let records = vec![
            para("a", 0, ParagraphKind::Bullet),
            para("b", 0, ParagraphKind::Numbered),
            para("c", 1, ParagraphKind::Numbered),
            para("p", 0, ParagraphKind::Plain),
            para("q", 0, ParagraphKind::Plain),
            para("d", 0, ParagraphKind::Bullet),
        ];
        let blocks = group_paragraphs(&records);
        let summary: Vec<String> = blocks
            .iter()
            .map(|b| match b {
                ContentBlock::Paragraph(p) => format!("P:{}", p.text()),
                ContentBlock::List(t) => format!("{}:{}", if t.ordered { "OL" } else { "UL" }, outline(t)),
                _ => "other".to_string(),
            })
            .collect();
        assert_eq!(summary, vec!["UL:a", "OL:b[c]", "P:p", "P:q", "UL:d"]);
    }

    fn preorder(nodes: &[BulletNode<'_>], out: &mut Vec<(u32, String)>) {
        for node in nodes {
            out.push((node.level, node.text()));
            preorder(&node.children, out);
        }
    }

    fn children_deeper(node: &BulletNode<'_>) -> bool {
        node.children
            .iter()
            .all(|c| c.level > node.level && children_deeper(c))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_tree_preserves_every_item_in_order(levels in prop::collection::vec(0u32..6, 0..40)) {
            let records = bullets(&levels);
            let tree = build_tree(&records, false);

            prop_assert_eq!(tree.len(), records.len());

            let mut seen = Vec::new();
            preorder(&tree.roots, &mut seen);
            let expected: Vec<(u32, String)> = records.iter().map(|r| (r.level, r.text())).collect();
            prop_assert_eq!(seen, expected);
        }

        #[test]
        fn prop_children_are_deeper_than_parents(levels in prop::collection::vec(0u32..6, 1..40)) {
            let records = bullets(&levels);
            let tree = build_tree(&records, false);
            prop_assert!(tree.roots.iter().all(children_deeper));
        }
    }
}
