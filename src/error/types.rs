use thiserror::Error;

/// Errors produced while folding message deltas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeltaError {
    /// Two operands of a fold disagree on the `example` flag.
    ///
    /// `position` is the operand's offset in the fold (the first operand is 0).
    #[error(
        "Cannot concatenate message deltas with different example values \
         (operand {position} has example={found}, expected example={expected})"
    )]
    ExampleMismatch {
        position: usize,
        expected: bool,
        found: bool,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl DeltaError {
    /// Whether this is a validation failure of the fold inputs.
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ExampleMismatch { .. })
    }
}

/// Result type for siumai-delta operations
pub type Result<T> = std::result::Result<T, DeltaError>;
