//! Type Conversions for DeltaError

use super::types::DeltaError;

impl From<serde_json::Error> for DeltaError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
