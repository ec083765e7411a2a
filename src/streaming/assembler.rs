//! Tool Call Assembly
//!
//! Turns streamed [`ToolCallChunk`] fragments into finalized [`ToolCall`]s and
//! [`InvalidToolCall`]s. Malformed argument text never fails the stream; it is
//! reported as an invalid tool call carrying the raw text.

use serde_json::Value;
use std::collections::HashMap;

use super::partial_json::{parse_complete_json, parse_partial_json};
use crate::merge::IndexedFragment;
use crate::types::{InvalidToolCall, JsonMap, ToolCall, ToolCallChunk};

/// How accumulated argument text is parsed when tool calls are materialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgumentsParsing {
    /// The stream may still be running: truncated text is repaired.
    Partial,
    /// The stream has ended: the text must be complete JSON. Raw control
    /// characters inside strings are still escaped.
    #[default]
    Complete,
}

/// Tool calls materialized from a set of chunks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledToolCalls {
    pub tool_calls: Vec<ToolCall>,
    pub invalid_tool_calls: Vec<InvalidToolCall>,
}

impl AssembledToolCalls {
    pub fn is_empty(&self) -> bool {
        self.tool_calls.is_empty() && self.invalid_tool_calls.is_empty()
    }

    /// Total number of valid and invalid calls
    pub fn len(&self) -> usize {
        self.tool_calls.len() + self.invalid_tool_calls.len()
    }
}

/// Group fragments into one chunk per slot.
///
/// Slots appear in first-seen order. Within a slot the first non-empty name
/// and id win and argument text is concatenated in arrival order. Fragments
/// without an index stay separate, in place.
pub fn chunks_from_fragments(fragments: &[ToolCallChunk]) -> Vec<ToolCallChunk> {
    let mut groups: Vec<ToolCallChunk> = Vec::with_capacity(fragments.len());
    let mut slots: HashMap<usize, usize> = HashMap::new();

    for fragment in fragments {
        match fragment.index {
            Some(index) => match slots.get(&index) {
                Some(&pos) => groups[pos].absorb(fragment),
                None => {
                    slots.insert(index, groups.len());
                    groups.push(fragment.clone());
                }
            },
            None => groups.push(fragment.clone()),
        }
    }
    groups
}

/// Derive a chunk view from already finalized calls.
///
/// Valid calls contribute their re-encoded arguments, invalid calls their raw
/// text. Derived chunks carry no index.
pub fn chunks_from_finalized_calls(
    tool_calls: &[ToolCall],
    invalid_tool_calls: &[InvalidToolCall],
) -> Vec<ToolCallChunk> {
    let valid = tool_calls.iter().map(|call| ToolCallChunk {
        index: None,
        id: call.id.clone(),
        name: Some(call.name.clone()),
        args: call.arguments_json(),
    });
    let invalid = invalid_tool_calls.iter().map(|call| ToolCallChunk {
        index: None,
        id: call.id.clone(),
        name: call.name.clone(),
        args: call.args.clone(),
    });
    valid.chain(invalid).collect()
}

/// Materialize tool calls from streamed chunks.
pub fn assemble_tool_calls(chunks: &[ToolCallChunk], mode: ArgumentsParsing) -> AssembledToolCalls {
    let mut assembled = AssembledToolCalls::default();

    for chunk in chunks_from_fragments(chunks) {
        let name = chunk.name.filter(|n| !n.is_empty());
        let id = chunk.id.filter(|i| !i.is_empty());

        match parse_arguments(&chunk.args, mode) {
            Ok(Value::Object(args)) => assembled.tool_calls.push(ToolCall {
                id,
                name: name.unwrap_or_default(),
                args,
            }),
            Ok(other) => {
                tracing::debug!(
                    "Tool call {:?} arguments are not a JSON object: {}",
                    name,
                    other
                );
                assembled.invalid_tool_calls.push(InvalidToolCall {
                    id,
                    name,
                    args: chunk.args,
                    error: None,
                });
            }
            Err(err) => {
                let error = format!(
                    "Function {} arguments are not valid JSON: {}",
                    name.as_deref().unwrap_or("<unnamed>"),
                    err
                );
                tracing::debug!("{}", error);
                assembled.invalid_tool_calls.push(InvalidToolCall {
                    id,
                    name,
                    args: chunk.args,
                    error: Some(error),
                });
            }
        }
    }
    assembled
}

fn parse_arguments(text: &str, mode: ArgumentsParsing) -> Result<Value, serde_json::Error> {
    if text.is_empty() {
        return Ok(Value::Object(JsonMap::new()));
    }
    match mode {
        ArgumentsParsing::Partial => parse_partial_json(text),
        ArgumentsParsing::Complete => parse_complete_json(text),
    }
}
