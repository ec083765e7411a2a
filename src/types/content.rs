use serde::{Deserialize, Serialize};

use super::JsonMap;

/// Message content: a plain text fragment or an ordered list of content blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text
    Text(String),
    /// Ordered content blocks
    Blocks(Vec<ContentBlock>),
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl MessageContent {
    /// Text content if this is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Blocks(_) => None,
        }
    }

    /// Content blocks if this is block content
    pub fn as_blocks(&self) -> Option<&[ContentBlock]> {
        match self {
            Self::Blocks(blocks) => Some(blocks),
            Self::Text(_) => None,
        }
    }

    /// Concatenate all text carried by this content.
    ///
    /// Bare text blocks and typed blocks with `"type": "text"` contribute,
    /// everything else is skipped.
    pub fn all_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks.iter().filter_map(ContentBlock::text_value).collect(),
        }
    }

    /// True for empty text or an empty block list
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Blocks(blocks) => blocks.is_empty(),
        }
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<ContentBlock>> for MessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

/// One entry of block content.
///
/// Typed blocks are open JSON objects, conventionally carrying a `type` key.
/// Streamed blocks also carry an integer `index`; blocks sharing an index are
/// merged when deltas are folded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContentBlock {
    /// Bare text
    Text(String),
    /// Typed block (e.g. `{"type": "text", "text": "...", "index": 0}`)
    Typed(JsonMap),
}

impl ContentBlock {
    /// Bare text block
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Typed block from a JSON value; `None` unless the value is an object.
    pub fn typed(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(map) => Some(Self::Typed(map)),
            _ => None,
        }
    }

    /// Streaming merge key of a typed block
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Typed(map) => map
                .get("index")
                .and_then(serde_json::Value::as_u64)
                .and_then(|i| usize::try_from(i).ok()),
            Self::Text(_) => None,
        }
    }

    /// Value of the `type` key of a typed block
    pub fn block_type(&self) -> Option<&str> {
        match self {
            Self::Typed(map) => map.get("type").and_then(serde_json::Value::as_str),
            Self::Text(_) => None,
        }
    }

    fn text_value(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Typed(map) if self.block_type() == Some("text") => {
                map.get("text").and_then(serde_json::Value::as_str)
            }
            Self::Typed(_) => None,
        }
    }
}
