//! Table, row, and cell resolution.

use serde::Serialize;
use std::fmt;

use crate::block::{self, Block, BlockMap, BlockType, RelationshipType};
use crate::error::{Error, Result};
use crate::model::{Geometry, InlineContent, SelectionElement, Word};

/// One cell of a table.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    id: String,
    confidence: f32,
    row_index: u32,
    column_index: u32,
    row_span: u32,
    column_span: u32,
    geometry: Geometry,
    content: Vec<InlineContent>,
    text: String,
}

impl Cell {
    /// Resolve a cell from its CELL block, rebuilding word and selection
    /// children from the block map.
    pub fn from_block(block: &Block, map: &BlockMap) -> Result<Self> {
        let mut content = Vec::new();
        let mut text = String::new();
        for relationship in block.relationships_of_type(RelationshipType::Child) {
            for child_id in &relationship.ids {
                let child = block::resolve(map, child_id)?;
                match child.block_type {
                    BlockType::Word => {
                        let word = Word::from_block(child)?;
                        text.push_str(word.text());
                        text.push(' ');
                        content.push(InlineContent::Word(word));
                    }
                    BlockType::SelectionElement => {
                        let element = SelectionElement::from_block(child)?;
                        text.push_str(&element.selection_status().to_string());
                        text.push_str(", ");
                        content.push(InlineContent::Selection(element));
                    }
                    _ => {}
                }
            }
        }

        Ok(Self {
            id: block.id.clone(),
            confidence: block.require_confidence()?,
            row_index: block
                .row_index
                .ok_or_else(|| Error::missing_field(&block.id, "RowIndex"))?,
            column_index: block
                .column_index
                .ok_or_else(|| Error::missing_field(&block.id, "ColumnIndex"))?,
            row_span: block
                .row_span
                .ok_or_else(|| Error::missing_field(&block.id, "RowSpan"))?,
            column_span: block
                .column_span
                .ok_or_else(|| Error::missing_field(&block.id, "ColumnSpan"))?,
            geometry: block.require_geometry()?,
            content,
            text,
        })
    }

    /// Block id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Detection confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// 1-based row position.
    pub fn row_index(&self) -> u32 {
        self.row_index
    }

    /// 1-based column position.
    pub fn column_index(&self) -> u32 {
        self.column_index
    }

    /// Number of rows spanned.
    pub fn row_span(&self) -> u32 {
        self.row_span
    }

    /// Number of columns spanned.
    pub fn column_span(&self) -> u32 {
        self.column_span
    }

    /// Cell geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The cell's word and selection children, in source order.
    pub fn content(&self) -> &[InlineContent] {
        &self.content
    }

    /// Concatenated cell text: words joined by trailing spaces, selection
    /// statuses by ", ".
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// An ordered group of cells sharing a visual row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// The row's cells, in relationship order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "[{}]", cell)?;
        }
        Ok(())
    }
}

/// A detected table.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    id: String,
    confidence: f32,
    geometry: Geometry,
    rows: Vec<Row>,
}

impl Table {
    /// Resolve a table from its TABLE block.
    ///
    /// Cells are visited in relationship order, which is assumed to be
    /// row-major: a cell whose row index exceeds the current one closes the
    /// row; an equal or decreasing index merges into it.
    pub fn from_block(block: &Block, map: &BlockMap) -> Result<Self> {
        let mut rows = Vec::new();
        let mut current_index: u32 = 1;
        let mut row = Row::default();

        for relationship in block.relationships_of_type(RelationshipType::Child) {
            for child_id in &relationship.ids {
                let cell = Cell::from_block(block::resolve(map, child_id)?, map)?;
                if cell.row_index() > current_index {
                    current_index = cell.row_index();
                    rows.push(std::mem::take(&mut row));
                }
                row.cells.push(cell);
            }
        }
        if !row.cells.is_empty() {
            rows.push(row);
        }

        Ok(Self {
            id: block.id.clone(),
            confidence: block.require_confidence()?,
            geometry: block.require_geometry()?,
            rows,
        })
    }

    /// Block id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Detection confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Table geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The table's rows, in grouping order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table")?;
        writeln!(f, "==========")?;
        for row in &self.rows {
            writeln!(f, "Row")?;
            writeln!(f, "==========")?;
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
