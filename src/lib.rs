//! siumai-delta
//!
//! Streaming message-delta accumulation.
//!
//! Chat models stream a response as many small fragments: text pieces, slices
//! of tool-call arguments, usage counters and identifiers. This crate folds
//! those fragments ([`MessageDelta`]) back into one aggregate message, in
//! arrival order, and materializes the tool calls they carry.
//!
//! ```rust,ignore
//! use siumai_delta::{DeltaAccumulator, MessageDelta, ToolCallChunk};
//!
//! let mut acc = DeltaAccumulator::new();
//! acc.push(MessageDelta::text("Hel"))?;
//! acc.push(MessageDelta::text("lo"))?;
//! let message = acc.into_message().expect("at least one fragment");
//! assert_eq!(message.content.as_text(), Some("Hello"));
//! ```
#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod merge;
pub mod streaming;
pub mod types;

pub use error::{DeltaError, Result};
pub use ids::{SYNTHESIZED_ID_PREFIX, is_synthesized, reconcile_ids, synthesized_id};
pub use streaming::{
    AccumulatorConfig, ArgumentsParsing, AssembledToolCalls, DeltaAccumulator, OverflowHandler,
    assemble_tool_calls, chunks_from_finalized_calls, chunks_from_fragments, collect_deltas,
    fold_deltas, parse_complete_json, parse_partial_json, parse_strict,
};
pub use types::*;
