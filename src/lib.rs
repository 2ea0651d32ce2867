//! # docugraph
//!
//! Turn the flat block list returned by an optical document-analysis service
//! into a navigable document graph of pages, lines, words, tables, cells,
//! form fields, and selection marks.
//!
//! The service's response is a flat collection of blocks linked by id
//! references. This library resolves those references once, at construction
//! time, and hands back structured accessors instead of the raw graph walk.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> docugraph::Result<()> {
//!     let doc = docugraph::parse_file("response.json")?;
//!
//!     for page in doc.pages() {
//!         println!("{}", page.get_text_in_reading_order());
//!         for table in page.tables() {
//!             println!("table with {} rows", table.row_count());
//!         }
//!         if let Some(field) = page.form().get_field_by_key("Total Due") {
//!             println!("total: {:?}", field.value().map(|v| v.text()));
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Graph resolution**: flat blocks to Document → Page → Line → Word (and
//!   Table → Row → Cell, Field → Key/Value) in one pass
//! - **Reading order**: column-aware line ordering recovered from bounding
//!   boxes alone
//! - **Form access**: exact and substring key lookup over detected fields
//! - **Fail-fast errors**: dangling references and missing fields abort
//!   construction instead of producing a partial graph

pub mod block;
pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod model;

// Re-export commonly used types
pub use block::{
    Block, BlockMap, BlockType, EntityType, Relationship, RelationshipType, Response,
    SelectionStatus,
};
pub use diagnostics::{CollectSink, Diagnostic, DiagnosticKind, DiagnosticSink, LogSink};
pub use error::{Error, Result};
pub use layout::OrderedLine;
pub use model::{
    BoundingBox, Cell, Document, Field, FieldKey, FieldValue, Form, Geometry, InlineContent, Line,
    Page, PageElement, Point, Row, SelectionElement, Table, Word,
};

use serde::Deserialize;
use std::path::Path;

/// A payload that is either one response or an ordered list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Many(Vec<Response>),
    One(Response),
}

impl Payload {
    fn into_responses(self) -> Vec<Response> {
        match self {
            Payload::Many(responses) => responses,
            Payload::One(response) => vec![response],
        }
    }
}

/// Parse a response JSON string into a document.
///
/// Accepts a single response object or a JSON array of responses from
/// paginated calls.
///
/// # Example
///
/// ```
/// let json = r#"{"Blocks": [{
///     "BlockType": "PAGE",
///     "Id": "p-1",
///     "Geometry": {
///         "BoundingBox": {"Width": 1.0, "Height": 1.0, "Left": 0.0, "Top": 0.0},
///         "Polygon": []
///     }
/// }]}"#;
/// let doc = docugraph::parse_str(json).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn parse_str(json: &str) -> Result<Document> {
    let payload: Payload = serde_json::from_str(json)?;
    Document::from_responses(payload.into_responses())
}

/// Parse response JSON bytes into a document.
pub fn parse_slice(data: &[u8]) -> Result<Document> {
    let payload: Payload = serde_json::from_slice(data)?;
    Document::from_responses(payload.into_responses())
}

/// Read and parse a response JSON file.
///
/// # Example
///
/// ```no_run
/// let doc = docugraph::parse_file("response.json").unwrap();
/// println!("pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = std::fs::read(path)?;
    parse_slice(&data)
}

/// Parse an already-deserialized JSON value into a document.
pub fn parse_value(value: serde_json::Value) -> Result<Document> {
    let payload: Payload = serde_json::from_value(value)?;
    Document::from_responses(payload.into_responses())
}
