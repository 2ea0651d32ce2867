//! Leaf content entities and the line composite.

use serde::Serialize;
use std::fmt;

use crate::block::{self, Block, BlockMap, BlockType, RelationshipType, SelectionStatus};
use crate::error::Result;
use crate::model::Geometry;

/// A single recognized word.
#[derive(Debug, Clone, Serialize)]
pub struct Word {
    id: String,
    confidence: f32,
    text: String,
    geometry: Geometry,
}

impl Word {
    /// Resolve a word from its WORD block.
    pub fn from_block(block: &Block) -> Result<Self> {
        Ok(Self {
            id: block.id.clone(),
            confidence: block.require_confidence()?,
            text: block.text.clone().unwrap_or_default(),
            geometry: block.require_geometry()?,
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

    /// Recognized text; empty when the block carried none.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Word geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A checkbox or radio button.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionElement {
    id: String,
    confidence: f32,
    selection_status: SelectionStatus,
    geometry: Geometry,
}

impl SelectionElement {
    /// Resolve a selection element from its SELECTION_ELEMENT block.
    pub fn from_block(block: &Block) -> Result<Self> {
        Ok(Self {
            id: block.id.clone(),
            confidence: block.require_confidence()?,
            selection_status: block
                .selection_status
                .ok_or_else(|| crate::error::Error::missing_field(&block.id, "SelectionStatus"))?,
            geometry: block.require_geometry()?,
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

    /// Whether the element is selected.
    pub fn selection_status(&self) -> SelectionStatus {
        self.selection_status
    }

    /// Element geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl fmt::Display for SelectionElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selection_status)
    }
}

/// Mixed child content of cells and field values.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A word
    Word(Word),
    /// A selection element
    Selection(SelectionElement),
}

impl InlineContent {
    /// Check if this content is a word.
    pub fn is_word(&self) -> bool {
        matches!(self, InlineContent::Word(_))
    }

    /// Check if this content is a selection element.
    pub fn is_selection(&self) -> bool {
        matches!(self, InlineContent::Selection(_))
    }
}

impl fmt::Display for InlineContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineContent::Word(word) => word.fmt(f),
            InlineContent::Selection(element) => element.fmt(f),
        }
    }
}

/// A visual line of text and the words composing it.
#[derive(Debug, Clone, Serialize)]
pub struct Line {
    id: String,
    confidence: f32,
    text: String,
    geometry: Geometry,
    words: Vec<Word>,
}

impl Line {
    /// Resolve a line from its LINE block, rebuilding each WORD child from
    /// the block map.
    pub fn from_block(block: &Block, map: &BlockMap) -> Result<Self> {
        let mut words = Vec::new();
        for relationship in block.relationships_of_type(RelationshipType::Child) {
            for child_id in &relationship.ids {
                let child = block::resolve(map, child_id)?;
                if child.block_type == BlockType::Word {
                    words.push(Word::from_block(child)?);
                }
            }
        }

        Ok(Self {
            id: block.id.clone(),
            confidence: block.require_confidence()?,
            text: block.text.clone().unwrap_or_default(),
            geometry: block.require_geometry()?,
            words,
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

    /// The line's text as recognized by the service.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The words of the line, in source order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Line")?;
        writeln!(f, "==========")?;
        writeln!(f, "{}", self.text)?;
        writeln!(f, "Words")?;
        writeln!(f, "----------")?;
        for word in &self.words {
            write!(f, "[{}]", word)?;
        }
        Ok(())
    }
}
