//! Streamed message deltas and finalized AI messages

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

use super::{InvalidToolCall, JsonMap, MessageContent, ToolCall, ToolCallChunk, UsageMetadata};
use crate::error::Result;
use crate::streaming::{
    ArgumentsParsing, AssembledToolCalls, assemble_tool_calls, chunks_from_finalized_calls,
    fold_deltas,
};

/// One streamed fragment of an AI message.
///
/// `tool_calls` and `invalid_tool_calls` are the finalized views of
/// `tool_call_chunks`. They stay empty while fragments are being folded and
/// are filled by [`MessageDelta::finalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MessageDelta {
    pub content: MessageContent,
    /// Provider-specific payload that has no dedicated field
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub additional_data: JsonMap,
    /// Response metadata (model name, finish reason, ...)
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub response_metadata: JsonMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_call_chunks: Vec<ToolCallChunk>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_tool_calls: Vec<InvalidToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Marks few-shot example messages; only equal flags can be folded
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub example: bool,
}

impl MessageDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta carrying a text fragment
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: MessageContent::Text(text.into()),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<MessageContent>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_usage(mut self, usage: UsageMetadata) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_example(mut self, example: bool) -> Self {
        self.example = example;
        self
    }

    pub fn with_tool_call_chunk(mut self, chunk: ToolCallChunk) -> Self {
        self.tool_call_chunks.push(chunk);
        self
    }

    pub fn with_tool_call(mut self, call: ToolCall) -> Self {
        self.tool_calls.push(call);
        self
    }

    pub fn with_additional_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_data.insert(key.into(), value.into());
        self
    }

    pub fn with_response_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.response_metadata.insert(key.into(), value.into());
        self
    }

    /// Chunks this delta contributes to a fold.
    ///
    /// A delta with no chunks but with finalized calls contributes chunks
    /// derived from those calls.
    pub fn tool_call_chunk_view(&self) -> Cow<'_, [ToolCallChunk]> {
        if self.tool_call_chunks.is_empty()
            && !(self.tool_calls.is_empty() && self.invalid_tool_calls.is_empty())
        {
            Cow::Owned(chunks_from_finalized_calls(
                &self.tool_calls,
                &self.invalid_tool_calls,
            ))
        } else {
            Cow::Borrowed(&self.tool_call_chunks)
        }
    }

    /// Fold `rest` onto this delta, left to right. See [`fold_deltas`].
    pub fn fold(&self, rest: &[MessageDelta]) -> Result<MessageDelta> {
        fold_deltas(self, rest)
    }

    /// Tool calls as they stand, with truncated argument text repaired.
    ///
    /// Does not change the delta.
    pub fn preview_tool_calls(&self) -> AssembledToolCalls {
        if self.tool_call_chunks.is_empty() {
            AssembledToolCalls {
                tool_calls: self.tool_calls.clone(),
                invalid_tool_calls: self.invalid_tool_calls.clone(),
            }
        } else {
            assemble_tool_calls(&self.tool_call_chunks, ArgumentsParsing::Partial)
        }
    }

    /// Materialize the finalized tool-call views.
    ///
    /// With chunks present the calls are recomputed from them; otherwise any
    /// existing finalized calls are kept. Finalizing twice with the same mode
    /// gives the same result.
    pub fn finalize(mut self, mode: ArgumentsParsing) -> Self {
        if !self.tool_call_chunks.is_empty() {
            let assembled = assemble_tool_calls(&self.tool_call_chunks, mode);
            self.tool_calls = assembled.tool_calls;
            self.invalid_tool_calls = assembled.invalid_tool_calls;
        }
        self
    }

    /// Finalize as a completed stream and convert into an [`AiMessage`].
    pub fn into_message(self) -> AiMessage {
        self.into_message_with(ArgumentsParsing::Complete)
    }

    pub fn into_message_with(self, mode: ArgumentsParsing) -> AiMessage {
        AiMessage::from(self.finalize(mode))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A complete AI message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiMessage {
    pub content: MessageContent,
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub additional_data: JsonMap,
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub response_metadata: JsonMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_tool_calls: Vec<InvalidToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub example: bool,
}

impl AiMessage {
    /// Whether the message requests any tool invocation
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Concatenated text of the message content
    pub fn text(&self) -> String {
        self.content.all_text()
    }
}

/// Takes the finalized views as they are; use [`MessageDelta::into_message`]
/// to materialize them first.
impl From<MessageDelta> for AiMessage {
    fn from(delta: MessageDelta) -> Self {
        Self {
            content: delta.content,
            additional_data: delta.additional_data,
            response_metadata: delta.response_metadata,
            tool_calls: delta.tool_calls,
            invalid_tool_calls: delta.invalid_tool_calls,
            usage: delta.usage,
            id: delta.id,
            example: delta.example,
        }
    }
}

impl From<AiMessage> for MessageDelta {
    fn from(message: AiMessage) -> Self {
        Self {
            tool_call_chunks: chunks_from_finalized_calls(
                &message.tool_calls,
                &message.invalid_tool_calls,
            ),
            content: message.content,
            additional_data: message.additional_data,
            response_metadata: message.response_metadata,
            tool_calls: message.tool_calls,
            invalid_tool_calls: message.invalid_tool_calls,
            usage: message.usage,
            id: message.id,
            example: message.example,
        }
    }
}
