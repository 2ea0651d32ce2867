//! Document construction: payload partitioning and the global block map.

use serde::Serialize;
use std::fmt;

use crate::block::{Block, BlockMap, BlockType, Response};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::Result;
use crate::model::Page;

/// A fully resolved document graph.
///
/// Construction is one blocking pass: the responses are partitioned into
/// per-page block lists, the global id index is built, and every page is
/// resolved before the constructor returns. The raw responses stay available
/// afterwards for id lookups.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(skip)]
    responses: Vec<Response>,
    #[serde(skip)]
    block_map: BlockMap,
    pages: Vec<Page>,
}

impl Document {
    /// Build a document from a single response.
    pub fn from_response(response: Response) -> Result<Self> {
        Self::from_responses(vec![response])
    }

    /// Build a document from an ordered sequence of responses (paginated
    /// calls). Keyless-field warnings go to the `log` crate.
    pub fn from_responses(responses: Vec<Response>) -> Result<Self> {
        Self::from_responses_with_sink(responses, &mut LogSink)
    }

    /// Build a document, reporting non-fatal diagnostics to the given sink.
    pub fn from_responses_with_sink(
        responses: Vec<Response>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self> {
        let (page_blocks, block_map) = partition(&responses);
        let mut pages = Vec::with_capacity(page_blocks.len());
        for blocks in page_blocks {
            pages.push(Page::from_blocks(blocks, &block_map, sink)?);
        }

        Ok(Self {
            responses,
            block_map,
            pages,
        })
    }

    /// The document's pages, in source order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up a raw block by id in the global index.
    pub fn get_block_by_id(&self, block_id: &str) -> Option<&Block> {
        self.block_map.get(block_id)
    }

    /// The raw responses the document was built from.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// The partitioned per-page block lists.
    pub fn page_blocks(&self) -> impl Iterator<Item = &[Block]> {
        self.pages.iter().map(|page| page.blocks())
    }
}

/// Scan all responses once, building the global block map and splitting the
/// flat block stream at PAGE blocks.
///
/// Every block lands in the map (last write wins on a colliding id). A PAGE
/// block closes the open accumulator and starts a new one; blocks preceding
/// the first PAGE block have no accumulator and are dropped.
fn partition(responses: &[Response]) -> (Vec<Vec<Block>>, BlockMap) {
    let mut block_map = BlockMap::new();
    let mut document_pages: Vec<Vec<Block>> = Vec::new();
    let mut current: Option<Vec<Block>> = None;

    for response in responses {
        for block in &response.blocks {
            block_map.insert(block.id.clone(), block.clone());

            if block.block_type == BlockType::Page {
                if let Some(open) = current.take() {
                    document_pages.push(open);
                }
                current = Some(vec![block.clone()]);
            } else if let Some(open) = current.as_mut() {
                open.push(block.clone());
            }
        }
    }
    if let Some(open) = current {
        document_pages.push(open);
    }

    (document_pages, block_map)
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Document")?;
        writeln!(f, "==========")?;
        for page in &self.pages {
            writeln!(f, "{}", page)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
