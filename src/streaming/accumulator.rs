//! Delta Accumulator
//!
//! Folds streamed [`MessageDelta`]s into one aggregate delta. [`fold_deltas`]
//! is the pure, variadic entry point; [`DeltaAccumulator`] keeps the running
//! aggregate for callers that receive fragments one at a time.

use super::assembler::{ArgumentsParsing, AssembledToolCalls, chunks_from_finalized_calls};
use crate::error::{DeltaError, Result};
use crate::ids::reconcile_ids;
use crate::merge::{merge_content_into, merge_dicts_into, merge_lists_into};
use crate::types::{AiMessage, MessageContent, MessageDelta, add_usage};

/// Fold deltas left to right.
///
/// Every operand must carry the same `example` flag; otherwise the whole fold
/// fails and nothing is returned. With `rest` empty the result is a copy of
/// `first`. Finalized tool calls of the result are left empty until
/// materialized.
pub fn fold_deltas(first: &MessageDelta, rest: &[MessageDelta]) -> Result<MessageDelta> {
    for (offset, other) in rest.iter().enumerate() {
        ensure_same_example(first, offset + 1, other)?;
    }

    let mut folded = first.clone();
    for next in rest {
        absorb_delta(&mut folded, next);
    }
    Ok(folded)
}

fn ensure_same_example(first: &MessageDelta, position: usize, other: &MessageDelta) -> Result<()> {
    if other.example == first.example {
        return Ok(());
    }
    tracing::warn!(
        "Refusing to fold message deltas with different example values at operand {}",
        position
    );
    Err(DeltaError::ExampleMismatch {
        position,
        expected: first.example,
        found: other.example,
    })
}

/// Pairwise merge primitive behind every fold; appends `right` onto `target`.
fn absorb_delta(target: &mut MessageDelta, right: &MessageDelta) {
    merge_content_into(&mut target.content, &right.content);
    merge_dicts_into(&mut target.additional_data, &right.additional_data);
    merge_dicts_into(&mut target.response_metadata, &right.response_metadata);

    if target.tool_call_chunks.is_empty() {
        target.tool_call_chunks =
            chunks_from_finalized_calls(&target.tool_calls, &target.invalid_tool_calls);
    }
    merge_lists_into(&mut target.tool_call_chunks, &right.tool_call_chunk_view());
    target.tool_calls.clear();
    target.invalid_tool_calls.clear();

    if right.usage.is_some() {
        target.usage = Some(add_usage(target.usage.as_ref(), right.usage.as_ref()));
    }
    target.id = reconcile_ids([target.id.as_deref(), right.id.as_deref()]);
}

/// Overflow handler callback type
///
/// Called once per limit when a soft limit is exceeded.
/// Parameters: (limit_name, observed_size)
pub type OverflowHandler = Box<dyn Fn(&str, usize) + Send + Sync>;

/// Delta Accumulator Configuration
///
/// Limits are soft: exceeding one is logged and reported to the overflow
/// handler, but no fragment data is ever dropped.
#[derive(Default)]
pub struct AccumulatorConfig {
    /// Parsing mode used by [`DeltaAccumulator::finish`]
    pub final_arguments: ArgumentsParsing,
    /// Number of tool-call slots above which the handler is notified
    pub max_tool_call_slots: Option<usize>,
    /// Received text length (in bytes) above which the handler is notified
    pub max_content_len: Option<usize>,
    /// Handler for exceeded limits
    pub overflow_handler: Option<OverflowHandler>,
}

impl std::fmt::Debug for AccumulatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccumulatorConfig")
            .field("final_arguments", &self.final_arguments)
            .field("max_tool_call_slots", &self.max_tool_call_slots)
            .field("max_content_len", &self.max_content_len)
            .field("has_overflow_handler", &self.overflow_handler.is_some())
            .finish()
    }
}

/// Running fold over a stream of deltas.
///
/// Fragments must be pushed in arrival order. A failed push leaves the
/// accumulated state untouched.
#[derive(Debug, Default)]
pub struct DeltaAccumulator {
    current: Option<MessageDelta>,
    fragments: usize,
    content_len: usize,
    config: AccumulatorConfig,
    slots_reported: bool,
    content_reported: bool,
}

impl DeltaAccumulator {
    /// Create an accumulator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator with custom configuration
    pub fn with_config(config: AccumulatorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Fold the next fragment into the aggregate.
    ///
    /// The aggregate is extended in place; earlier fragments are not copied.
    pub fn push(&mut self, delta: MessageDelta) -> Result<&MessageDelta> {
        let received = text_len(&delta.content);
        let current = match self.current.take() {
            None => delta,
            Some(mut current) => {
                if let Err(err) = ensure_same_example(&current, 1, &delta) {
                    self.current = Some(current);
                    return Err(err);
                }
                absorb_delta(&mut current, &delta);
                current
            }
        };

        self.fragments += 1;
        self.content_len = self.content_len.saturating_add(received);
        tracing::debug!(
            fragments = self.fragments,
            tool_call_slots = current.tool_call_chunks.len(),
            "Folded message delta"
        );
        self.check_limits(current.tool_call_chunks.len());
        Ok(self.current.insert(current))
    }

    /// The aggregate so far
    pub fn current(&self) -> Option<&MessageDelta> {
        self.current.as_ref()
    }

    /// Number of fragments folded so far
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Tool calls as they stand mid-stream, with truncated arguments repaired.
    pub fn preview_tool_calls(&self) -> AssembledToolCalls {
        self.current
            .as_ref()
            .map(MessageDelta::preview_tool_calls)
            .unwrap_or_default()
    }

    /// End the stream and finalize the aggregate.
    pub fn finish(self) -> Option<MessageDelta> {
        let mode = self.config.final_arguments;
        self.current.map(|delta| delta.finalize(mode))
    }

    /// End the stream and convert the aggregate into a finalized message.
    pub fn into_message(self) -> Option<AiMessage> {
        self.finish().map(AiMessage::from)
    }

    fn check_limits(&mut self, slots: usize) {
        if !self.slots_reported {
            if let Some(max) = self.config.max_tool_call_slots {
                if slots > max {
                    self.slots_reported = true;
                    self.report_overflow("tool_call_slots", slots);
                }
            }
        }
        if !self.content_reported {
            if let Some(max) = self.config.max_content_len {
                if self.content_len > max {
                    self.content_reported = true;
                    self.report_overflow("content", self.content_len);
                }
            }
        }
    }

    fn report_overflow(&self, limit: &str, size: usize) {
        tracing::warn!("Delta accumulator limit exceeded: {} = {}", limit, size);
        if let Some(handler) = &self.config.overflow_handler {
            (handler)(limit, size);
        }
    }
}

fn text_len(content: &MessageContent) -> usize {
    match content {
        MessageContent::Text(text) => text.len(),
        MessageContent::Blocks(_) => content.all_text().len(),
    }
}
