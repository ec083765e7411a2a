//! Drain a delta stream into a finalized message

use futures::{Stream, StreamExt, pin_mut};

use super::accumulator::{AccumulatorConfig, DeltaAccumulator};
use crate::error::Result;
use crate::types::{AiMessage, MessageDelta};

/// Fold every delta of `stream` and finalize the result.
///
/// Returns `Ok(None)` for an empty stream. The first fold error stops
/// collection; deltas already folded are discarded with it.
pub async fn collect_deltas<S>(stream: S, config: AccumulatorConfig) -> Result<Option<AiMessage>>
where
    S: Stream<Item = MessageDelta>,
{
    pin_mut!(stream);
    let mut accumulator = DeltaAccumulator::with_config(config);

    while let Some(delta) = stream.next().await {
        accumulator.push(delta)?;
    }

    tracing::debug!(
        fragments = accumulator.fragment_count(),
        "Delta stream completed"
    );
    Ok(accumulator.into_message())
}
