//! Typed model of the analysis service's raw block records.
//!
//! A response is a flat list of [`Block`] records linked to each other by id
//! through [`Relationship`] entries. This module only mirrors the wire shape;
//! resolution into the nested document graph lives in [`crate::model`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::Geometry;

/// Lookup index from block id to block, built once per document.
pub type BlockMap = HashMap<String, Block>;

/// Look up a relationship target, failing on a dangling id.
pub(crate) fn resolve<'a>(map: &'a BlockMap, id: &str) -> Result<&'a Block> {
    map.get(id).ok_or_else(|| Error::BlockNotFound(id.to_string()))
}

/// One analysis API response: a flat list of blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Response {
    /// The blocks, in service order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// The type tag of a block.
///
/// The set is closed over the types this crate resolves; anything else the
/// service emits deserializes as [`BlockType::Unknown`] and passes through
/// undispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// One page of the analyzed document
    Page,
    /// A visual line of text
    Line,
    /// A single word
    Word,
    /// A detected table
    Table,
    /// One cell of a table
    Cell,
    /// A checkbox or radio button
    SelectionElement,
    /// One side (key or value) of a form field pair
    KeyValueSet,
    /// Any block type outside the enumerated set
    #[serde(other)]
    Unknown,
}

/// The type of a relationship link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Link to child blocks
    Child,
    /// Link from a key block to its paired value block
    Value,
    /// Any other link kind the service emits
    #[serde(other)]
    Unknown,
}

/// Entity tag carried by KEY_VALUE_SET blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// The key side of a field
    Key,
    /// The value side of a field
    Value,
    /// Any other entity tag
    #[serde(other)]
    Unknown,
}

/// Selection state of a checkbox or radio button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    /// The element is checked
    Selected,
    /// The element is unchecked
    NotSelected,
}

impl fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionStatus::Selected => write!(f, "SELECTED"),
            SelectionStatus::NotSelected => write!(f, "NOT_SELECTED"),
        }
    }
}

/// A typed link from one block to an ordered list of other block ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    /// Link kind
    pub r#type: RelationshipType,
    /// Target block ids, in service order
    #[serde(default)]
    pub ids: Vec<String>,
}

/// One record in the service's flat output.
///
/// `block_type` and `id` are required; a payload missing either fails at the
/// deserialization boundary. Every other field is present only for the block
/// types that carry it, so resolution checks them per entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// The block's type tag
    pub block_type: BlockType,

    /// Unique id within a response
    pub id: String,

    /// Detection confidence, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Bounding box and polygon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    /// Recognized text (WORD, LINE)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Selection state (SELECTION_ELEMENT)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,

    /// KEY/VALUE tags (KEY_VALUE_SET)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,

    /// Links to other blocks; absent and JSON null both mean no links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,

    /// 1-based row position (CELL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column position (CELL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Rows spanned (CELL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    /// Columns spanned (CELL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
}

impl Block {
    /// Create a block with the given type and id; all other fields empty.
    pub fn new(block_type: BlockType, id: impl Into<String>) -> Self {
        Self {
            block_type,
            id: id.into(),
            confidence: None,
            geometry: None,
            text: None,
            selection_status: None,
            entity_types: Vec::new(),
            relationships: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
        }
    }

    /// Whether this block carries the given entity tag.
    pub fn has_entity_type(&self, entity_type: EntityType) -> bool {
        self.entity_types.contains(&entity_type)
    }

    /// The relationships of the given type, in declaration order.
    pub fn relationships_of_type(
        &self,
        relationship_type: RelationshipType,
    ) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .flatten()
            .filter(move |r| r.r#type == relationship_type)
    }

    pub(crate) fn require_confidence(&self) -> Result<f32> {
        self.confidence
            .ok_or_else(|| Error::missing_field(&self.id, "Confidence"))
    }

    pub(crate) fn require_geometry(&self) -> Result<Geometry> {
        self.geometry
            .clone()
            .ok_or_else(|| Error::missing_field(&self.id, "Geometry"))
    }
}
