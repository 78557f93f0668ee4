//! Block trees of guide, tutorial and message content.
//!
//! A block's `content` is either a leaf string or a list of nested blocks.
//! Leaves become strings with a composite id built from the path of block ids
//! (`guide.intro.block.list.item1`).

use std::{collections::HashSet, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ExtractError, is_valid_id};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Blocks(Vec<Block>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Block {
    pub id: String,
    /// `text`, `title`, `ulist`, `olist`... Nested list items omit it.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A string found while walking a block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'a> {
    /// Composite id derived from the block path.
    pub string_id: String,
    pub text: &'a str,
    /// The item's own comment, if any.
    pub comment: Option<&'a str>,
    /// Type of the nearest enclosing typed block.
    pub kind: Option<&'a str>,
}

/// Default comments per block type.
pub type CommentTable = &'static [(&'static str, &'static str)];

pub fn default_comment(table: CommentTable, kind: Option<&str>) -> &'static str {
    kind.and_then(|kind| table.iter().find(|(k, _)| *k == kind))
        .map(|(_, comment)| *comment)
        .unwrap_or("")
}

/// Depth-first walk over `blocks`, calling `visit` for every leaf string.
///
/// Every top-level block must declare a `type`; nested list items may omit
/// it. Block ids are validated on the way down, and a composite id used by
/// two blocks of the tree is a duplicate whether they hold text or a list.
pub fn walk_blocks<'a, F>(
    blocks: &'a [Block],
    prefix: &str,
    origin: &Path,
    visit: &mut F,
) -> Result<(), ExtractError>
where
    F: FnMut(Leaf<'a>) -> Result<(), ExtractError>,
{
    let mut walker = Walker {
        origin,
        seen: HashSet::new(),
        visit,
    };
    for block in blocks {
        if block.kind.is_none() {
            return Err(ExtractError::MissingBlockType {
                path: origin.to_path_buf(),
                block: block.id.clone(),
            });
        }
        walker.walk(block, format!("{}.block.{}", prefix, block.id), None)?;
    }
    Ok(())
}

struct Walker<'p, 'v, F> {
    origin: &'p Path,
    seen: HashSet<String>,
    visit: &'v mut F,
}

impl<'a, F> Walker<'_, '_, F>
where
    F: FnMut(Leaf<'a>) -> Result<(), ExtractError>,
{
    fn walk(
        &mut self,
        block: &'a Block,
        string_id: String,
        inherited_kind: Option<&'a str>,
    ) -> Result<(), ExtractError> {
        if !is_valid_id(&block.id) {
            return Err(ExtractError::InvalidId {
                path: self.origin.to_path_buf(),
                id: string_id,
            });
        }
        if !self.seen.insert(string_id.clone()) {
            return Err(ExtractError::Duplicate {
                path: self.origin.to_path_buf(),
                id: string_id,
            });
        }
        let kind = block.kind.as_deref().or(inherited_kind);

        match &block.content {
            Content::Text(text) => (self.visit)(Leaf {
                string_id,
                text: text.as_str(),
                comment: block.comment.as_deref(),
                kind,
            }),
            Content::Blocks(children) => {
                for child in children {
                    let child_id = format!("{}.{}", string_id, child.id);
                    self.walk(child, child_id, kind)?;
                }
                Ok(())
            }
        }
    }
}
