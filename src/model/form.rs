//! Form field resolution: key/value pairs and the per-page form index.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::block::{self, Block, BlockMap, BlockType, EntityType, RelationshipType};
use crate::error::{Error, Result};
use crate::model::{Geometry, InlineContent, SelectionElement, Word};

/// The key side of a form field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldKey {
    id: String,
    confidence: f32,
    geometry: Geometry,
    content: Vec<Word>,
    text: String,
}

impl FieldKey {
    /// Resolve a field key from the KEY-tagged block and its CHILD ids.
    pub fn from_block(block: &Block, child_ids: &[String], map: &BlockMap) -> Result<Self> {
        let mut content = Vec::new();
        let mut texts = Vec::new();
        for child_id in child_ids {
            let child = block::resolve(map, child_id)?;
            if child.block_type == BlockType::Word {
                let word = Word::from_block(child)?;
                texts.push(word.text().to_string());
                content.push(word);
            }
        }

        Ok(Self {
            id: block.id.clone(),
            confidence: block.require_confidence()?,
            geometry: block.require_geometry()?,
            content,
            text: texts.join(" "),
        })
    }

    /// Block id of the key side.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Detection confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Key geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The key's words, in source order.
    pub fn content(&self) -> &[Word] {
        &self.content
    }

    /// Space-joined key text; empty when the key has no words.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// The value side of a form field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldValue {
    id: String,
    confidence: f32,
    geometry: Geometry,
    content: Vec<InlineContent>,
    text: String,
}

impl FieldValue {
    /// Resolve a field value from the VALUE-tagged block and its CHILD ids.
    ///
    /// The text is the space-joined word texts; a value holding only
    /// selection elements renders the last element's status instead.
    pub fn from_block(block: &Block, child_ids: &[String], map: &BlockMap) -> Result<Self> {
        let mut content = Vec::new();
        let mut texts = Vec::new();
        let mut text = String::new();
        for child_id in child_ids {
            let child = block::resolve(map, child_id)?;
            match child.block_type {
                BlockType::Word => {
                    let word = Word::from_block(child)?;
                    texts.push(word.text().to_string());
                    content.push(InlineContent::Word(word));
                }
                BlockType::SelectionElement => {
                    let element = SelectionElement::from_block(child)?;
                    text = element.selection_status().to_string();
                    content.push(InlineContent::Selection(element));
                }
                _ => {}
            }
        }
        if !texts.is_empty() {
            text = texts.join(" ");
        }

        Ok(Self {
            id: block.id.clone(),
            confidence: block.require_confidence()?,
            geometry: block.require_geometry()?,
            content,
            text,
        })
    }

    /// Block id of the value side.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Detection confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Value geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The value's words and selection elements, in source order.
    pub fn content(&self) -> &[InlineContent] {
        &self.content
    }

    /// The value's text rendering.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// One form field: a key paired with at most one value.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    key: Option<FieldKey>,
    value: Option<FieldValue>,
}

impl Field {
    /// Resolve a field from a KEY-tagged KEY_VALUE_SET block.
    ///
    /// The block's CHILD relationship yields the key; its VALUE relationship
    /// names the paired VALUE-tagged block(s), whose own CHILD relationship
    /// yields the value. A key block without relationships cannot be
    /// resolved at all and fails.
    pub fn from_block(block: &Block, map: &BlockMap) -> Result<Self> {
        let relationships = block
            .relationships
            .as_deref()
            .ok_or_else(|| Error::missing_field(&block.id, "Relationships"))?;

        let mut key = None;
        let mut value = None;
        for relationship in relationships {
            match relationship.r#type {
                RelationshipType::Child => {
                    key = Some(FieldKey::from_block(block, &relationship.ids, map)?);
                }
                RelationshipType::Value => {
                    for value_id in &relationship.ids {
                        let value_block = block::resolve(map, value_id)?;
                        if value_block.has_entity_type(EntityType::Value) {
                            for value_relationship in
                                value_block.relationships_of_type(RelationshipType::Child)
                            {
                                value = Some(FieldValue::from_block(
                                    value_block,
                                    &value_relationship.ids,
                                    map,
                                )?);
                            }
                        }
                    }
                }
                RelationshipType::Unknown => {}
            }
        }

        Ok(Self { key, value })
    }

    /// The key side, absent when the source block had no CHILD relationship.
    pub fn key(&self) -> Option<&FieldKey> {
        self.key.as_ref()
    }

    /// The value side; a key-only field is valid.
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Field")?;
        writeln!(f, "==========")?;
        let key = self.key.as_ref().map(|k| k.text()).unwrap_or_default();
        let value = self.value.as_ref().map(|v| v.text()).unwrap_or_default();
        writeln!(f, "Key: {}", key)?;
        write!(f, "Value: {}", value)
    }
}

/// The form fields of one page, ordered, with a key-text lookup index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Form {
    fields: Vec<Field>,
    #[serde(skip)]
    fields_by_key: HashMap<String, usize>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, indexing it by key text. A later field with the same
    /// key text wins the index slot; both remain in the ordered list.
    pub fn add_field(&mut self, field: Field) {
        if let Some(key) = field.key() {
            self.fields_by_key
                .insert(key.text().to_string(), self.fields.len());
        }
        self.fields.push(field);
    }

    /// The fields, in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Exact, case-sensitive lookup by key text.
    pub fn get_field_by_key(&self, key: &str) -> Option<&Field> {
        self.fields_by_key.get(key).map(|&index| &self.fields[index])
    }

    /// Case-insensitive substring search over key texts, in insertion order.
    pub fn search_fields_by_key(&self, key: &str) -> Vec<&Field> {
        let needle = key.to_lowercase();
        self.fields
            .iter()
            .filter(|field| {
                field
                    .key()
                    .is_some_and(|k| k.text().to_lowercase().contains(&needle))
            })
            .collect()
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            writeln!(f, "{}", field)?;
        }
        Ok(())
    }
}
