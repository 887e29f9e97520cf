/// Table shape implementation for PowerPoint presentations.
///
/// Tables in PowerPoint are DrawingML tables (`a:tbl`) contained within
/// graphic frames. They contain rows, which contain cells.
use crate::common::xml::attr_i64;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::base::Geometry;
use crate::ooxml::pptx::shapes::textframe::{Run, TextContext, read_text_body};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;

/// Runs of one table cell. Empty for blank cells.
pub type TableCell = Vec<Run>;

/// Extracted table content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRecord {
    pub rows: Vec<Vec<TableCell>>,
    /// Column widths as percentages of the table width.
    pub column_widths: Option<Vec<f64>>,
}

impl TableRecord {
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Plain text of a cell, if it exists.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|cell| cell.iter().map(|run| run.text.as_str()).collect())
    }
}

/// A table placed on a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableShape {
    pub table: TableRecord,
    pub geometry: Geometry,
}

/// Normalize grid column widths (EMU) so they sum to 100.
///
/// Returns `None` when there are no columns or their total is zero.
pub fn normalize_column_widths(widths: &[i64]) -> Option<Vec<f64>> {
    let total: i64 = widths.iter().map(|w| (*w).max(0)).sum();
    if widths.is_empty() || total <= 0 {
        return None;
    }
    Some(
        widths
            .iter()
            .map(|w| (*w).max(0) as f64 / total as f64 * 100.0)
            .collect(),
    )
}

/// Read an `a:tbl` whose start tag was just consumed.
pub(crate) fn read_table(reader: &mut Reader<&[u8]>, ctx: &TextContext<'_>) -> Result<TableRecord> {
    let mut grid: Vec<i64> = Vec::new();
    let mut rows: Vec<Vec<TableCell>> = Vec::new();
    let mut row: Option<Vec<TableCell>> = None;
    let mut cell: Option<TableCell> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"txBody" if cell.is_some() => {
                    let paragraphs = read_text_body(reader, ctx)?;
                    if let Some(cell) = cell.as_mut() {
                        for (i, para) in paragraphs.into_iter().enumerate() {
                            if i > 0 {
                                cell.push(Run::plain(" "));
                            }
                            cell.extend(para.runs);
                        }
                    }
                },
                name => {
                    depth += 1;
                    match name {
                        b"gridCol" => grid.push(attr_i64(&e, b"w").ok().flatten().unwrap_or(0)),
                        b"tr" => row = Some(Vec::new()),
                        b"tc" => cell = Some(Vec::new()),
                        _ => {},
                    }
                },
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"gridCol" => grid.push(attr_i64(&e, b"w").ok().flatten().unwrap_or(0)),
                b"tc" => {
                    if let Some(row) = row.as_mut() {
                        row.push(Vec::new());
                    }
                },
                b"tr" => rows.push(Vec::new()),
                _ => {},
            },
            Ok(Event::End(e)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                match e.local_name().as_ref() {
                    b"tc" => {
                        if let (Some(row), Some(cell)) = (row.as_mut(), cell.take()) {
                            row.push(cell);
                        }
                    },
                    b"tr" => {
                        if let Some(row) = row.take() {
                            rows.push(row);
                        }
                    },
                    _ => {},
                }
            },
            Ok(Event::Eof) => {
                return Err(OoxmlError::Xml("unexpected end of document in table".to_string()));
            },
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(TableRecord {
        rows,
        column_widths: normalize_column_widths(&grid),
    })
}
