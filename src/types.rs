//! Core Data Type Definitions
//!
//! ## Module Organization
//!
//! - **`content`** - Message content (plain text or ordered content blocks)
//! - **`tools`** - Tool-call fragments and finalized tool calls
//! - **`usage`** - Token usage with open-ended breakdown maps
//! - **`message`** - Streamed message deltas and the finalized AI message
//!
//! All types are plain values: folding deltas always produces new values and
//! never mutates its inputs.

pub mod content;
pub mod message;
pub mod tools;
pub mod usage;

pub use content::*;
pub use message::*;
pub use tools::*;
pub use usage::*;

/// Open JSON object used for provider-specific side-channel data.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
