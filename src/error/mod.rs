//! Error handling types for siumai-delta.
//!
//! Only a mismatched `example` flag is fatal to a fold. Malformed tool-call
//! arguments are never reported here; they surface as
//! [`InvalidToolCall`](crate::types::InvalidToolCall) entries instead.

mod conversions;
pub mod types;

pub use types::*;
