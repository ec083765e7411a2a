//! Streaming Module
//!
//! Everything needed to turn a stream of [`MessageDelta`](crate::types::MessageDelta)
//! fragments into one message:
//!
//! - [`fold_deltas`] / [`DeltaAccumulator`] - order-sensitive folding
//! - [`assemble_tool_calls`] - tool-call materialization from chunks
//! - [`parse_partial_json`] - tolerant parsing of truncated argument text
//! - [`collect_deltas`] - async adapter over a `futures::Stream`

mod accumulator;
mod assembler;
mod collect;
mod partial_json;

pub use accumulator::{AccumulatorConfig, DeltaAccumulator, OverflowHandler, fold_deltas};
pub use assembler::{
    ArgumentsParsing, AssembledToolCalls, assemble_tool_calls, chunks_from_finalized_calls,
    chunks_from_fragments,
};
pub use collect::collect_deltas;
pub use partial_json::{parse_complete_json, parse_partial_json, parse_strict};
