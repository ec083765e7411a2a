//! Tool-call fragments and finalized tool calls

use serde::{Deserialize, Serialize};

use super::JsonMap;

/// One streamed fragment of a single tool invocation.
///
/// Fragments sharing an `index` belong to the same tool call; their `args`
/// are concatenated in arrival order. Fragments without an index are never
/// merged with each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCallChunk {
    /// Slot key
    #[serde(default)]
    pub index: Option<usize>,
    /// Provider-assigned tool call id (usually on the first fragment only)
    #[serde(default)]
    pub id: Option<String>,
    /// Tool name (usually on the first fragment only)
    #[serde(default)]
    pub name: Option<String>,
    /// Fragment of the JSON-encoded argument object
    #[serde(default)]
    pub args: String,
}

impl ToolCallChunk {
    /// Fragment for the given slot
    pub fn new(index: Option<usize>) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Fragment of slot `index` carrying an argument slice
    pub fn at(index: usize, args: impl Into<String>) -> Self {
        Self::new(Some(index)).with_args(args)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }
}

/// A finalized tool call whose arguments parsed into a JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Tool call id
    #[serde(default)]
    pub id: Option<String>,
    /// Tool name
    pub name: String,
    /// Parsed arguments (always a JSON object)
    #[serde(default)]
    pub args: JsonMap,
}

impl ToolCall {
    /// Create a tool call without an id
    pub fn new(name: impl Into<String>, args: JsonMap) -> Self {
        Self {
            id: None,
            name: name.into(),
            args,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Arguments re-encoded as a JSON string
    pub fn arguments_json(&self) -> String {
        serde_json::Value::Object(self.args.clone()).to_string()
    }
}

/// A finalized tool call whose arguments could not be used.
///
/// `error` is set when the argument text failed to parse. It is `None` when
/// the text parsed but was not a JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvalidToolCall {
    /// Tool call id
    #[serde(default)]
    pub id: Option<String>,
    /// Tool name, if one was streamed
    #[serde(default)]
    pub name: Option<String>,
    /// Raw, unparsed argument text
    #[serde(default)]
    pub args: String,
    /// Parse error message
    #[serde(default)]
    pub error: Option<String>,
}
