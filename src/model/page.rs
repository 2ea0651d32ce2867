//! Page construction: one ordered dispatch pass over a page's blocks.

use serde::Serialize;
use std::fmt;

use crate::block::{Block, BlockMap, BlockType, EntityType};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use crate::layout::{self, OrderedLine};
use crate::model::{BoundingBox, Field, Form, Geometry, Line, Table};

/// One resolved element of a page, in source block order.
///
/// The same entities are reachable through [`Page::lines`], [`Page::tables`],
/// and [`Page::form`]; this enum carries owned copies so the interleaved
/// order survives. Entities sharing an id are equal in content, not identity.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageElement {
    /// A line of text
    Line(Line),
    /// A table
    Table(Table),
    /// A form field
    Field(Field),
}

impl PageElement {
    /// Check if this element is a line.
    pub fn is_line(&self) -> bool {
        matches!(self, PageElement::Line(_))
    }

    /// Check if this element is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, PageElement::Table(_))
    }

    /// Check if this element is a form field.
    pub fn is_field(&self) -> bool {
        matches!(self, PageElement::Field(_))
    }
}

impl fmt::Display for PageElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageElement::Line(line) => line.fmt(f),
            PageElement::Table(table) => table.fmt(f),
            PageElement::Field(field) => field.fmt(f),
        }
    }
}

/// One page of the analyzed document.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    id: String,
    geometry: Geometry,
    text: String,
    lines: Vec<Line>,
    tables: Vec<Table>,
    form: Form,
    content: Vec<PageElement>,
    #[serde(skip)]
    blocks: Vec<Block>,
}

impl Page {
    /// Build a page from one document-page's block list.
    ///
    /// The list is scanned once in order: the PAGE block contributes the
    /// page's identity and geometry, LINE blocks accumulate lines and text,
    /// TABLE blocks accumulate tables, and KEY-tagged KEY_VALUE_SET blocks
    /// become form fields. Keyless fields are excluded and reported through
    /// the sink.
    pub fn from_blocks(
        blocks: Vec<Block>,
        map: &BlockMap,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self> {
        let mut id = None;
        let mut geometry = None;
        let mut text = String::new();
        let mut lines = Vec::new();
        let mut tables = Vec::new();
        let mut form = Form::new();
        let mut content = Vec::new();

        for block in &blocks {
            match block.block_type {
                BlockType::Page => {
                    id = Some(block.id.clone());
                    geometry = Some(block.require_geometry()?);
                }
                BlockType::Line => {
                    let line = Line::from_block(block, map)?;
                    text.push_str(line.text());
                    text.push('\n');
                    content.push(PageElement::Line(line.clone()));
                    lines.push(line);
                }
                BlockType::Table => {
                    let table = Table::from_block(block, map)?;
                    content.push(PageElement::Table(table.clone()));
                    tables.push(table);
                }
                BlockType::KeyValueSet => {
                    if block.has_entity_type(EntityType::Key) {
                        let field = Field::from_block(block, map)?;
                        if field.key().is_some() {
                            content.push(PageElement::Field(field.clone()));
                            form.add_field(field);
                        } else {
                            sink.report(Diagnostic::keyless_field(&block.id));
                        }
                    }
                }
                // WORD, CELL and SELECTION_ELEMENT blocks are reached
                // through their parents; unknown types pass through.
                _ => {}
            }
        }

        Ok(Self {
            id: id.ok_or(Error::MissingPageBlock)?,
            geometry: geometry.ok_or(Error::MissingPageBlock)?,
            text,
            lines,
            tables,
            form,
            content,
            blocks,
        })
    }

    /// The PAGE block's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The page's geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// All line texts concatenated, each followed by a newline, in block
    /// order.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The page's lines, in block order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The page's tables, in block order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The page's form fields.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Lines, tables, and fields interleaved in block order.
    pub fn content(&self) -> &[PageElement] {
        &self.content
    }

    /// The raw blocks this page was built from.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The page's lines grouped into columns and sorted for natural
    /// reading. See [`crate::layout`] for the heuristic.
    pub fn get_lines_in_reading_order(&self) -> Vec<OrderedLine> {
        layout::lines_in_reading_order(&self.lines)
    }

    /// The reading-order line texts, each followed by a newline.
    pub fn get_text_in_reading_order(&self) -> String {
        layout::text_in_reading_order(&self.lines)
    }

    /// The lines whose top-left corner falls inside the given box, bounds
    /// inclusive, in original line order.
    pub fn get_lines_in_bounding_box(&self, bounding_box: &BoundingBox) -> Vec<&Line> {
        self.lines
            .iter()
            .filter(|line| {
                let bbox = line.geometry().bounding_box();
                bbox.left() >= bounding_box.left()
                    && bbox.left() <= bounding_box.right()
                    && bbox.top() >= bounding_box.top()
                    && bbox.top() <= bounding_box.bottom()
            })
            .collect()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page")?;
        writeln!(f, "==========")?;
        for element in &self.content {
            writeln!(f, "{}", element)?;
        }
        Ok(())
    }
}
