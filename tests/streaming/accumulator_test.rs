use crate::support::fixtures::{search_call_stream, text_stream};
use futures::stream;
use siumai_delta::{
    AccumulatorConfig, ArgumentsParsing, DeltaAccumulator, MessageDelta, ToolCallChunk,
    collect_deltas, fold_deltas,
};
use std::sync::{Arc, Mutex};

#[test]
fn accumulator_matches_variadic_fold() {
    let stream = search_call_stream();
    let expected = fold_deltas(&stream[0], &stream[1..]).unwrap();

    let mut acc = DeltaAccumulator::new();
    for delta in stream {
        acc.push(delta).unwrap();
    }
    assert_eq!(acc.fragment_count(), 4);
    assert_eq!(acc.current(), Some(&expected));
}

#[test]
fn previews_track_the_stream() {
    let mut acc = DeltaAccumulator::new();
    let mut previews = Vec::new();
    for delta in search_call_stream() {
        acc.push(delta).unwrap();
        previews.push(
            acc.preview_tool_calls()
                .tool_calls
                .first()
                .and_then(|c| c.args.get("q").cloned()),
        );
    }
    assert_eq!(previews[0], None);
    assert_eq!(previews[1], Some(serde_json::json!("ca")));
    assert_eq!(previews[3], Some(serde_json::json!("cats")));
}

#[test]
fn overflow_handler_sees_each_limit_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let mut acc = DeltaAccumulator::with_config(AccumulatorConfig {
        max_tool_call_slots: Some(1),
        max_content_len: Some(8),
        overflow_handler: Some(Box::new(move |limit, size| {
            sink.lock().unwrap().push((limit.to_string(), size));
        })),
        ..Default::default()
    });

    for delta in text_stream("0123456789abcdef", 4) {
        acc.push(delta).unwrap();
    }
    for slot in 0..3 {
        acc.push(MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(slot, "{}")))
            .unwrap();
    }

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![("content".to_string(), 12), ("tool_call_slots".to_string(), 2)]
    );

    let message = acc.into_message().unwrap();
    assert_eq!(message.text(), "0123456789abcdef");
    assert_eq!(message.tool_calls.len(), 3);
}

#[test]
fn debug_output_hides_handler() {
    let config = AccumulatorConfig {
        final_arguments: ArgumentsParsing::Partial,
        overflow_handler: Some(Box::new(|_, _| {})),
        ..Default::default()
    };
    let rendered = format!("{config:?}");
    assert!(rendered.contains("has_overflow_handler: true"));
    assert!(rendered.contains("Partial"));
}

#[tokio::test]
async fn collect_uses_configured_final_mode() {
    let deltas = vec![
        MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "{\"q\": \"ca").with_name("search")),
    ];

    let strict = collect_deltas(stream::iter(deltas.clone()), AccumulatorConfig::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(strict.invalid_tool_calls.len(), 1);

    let lenient = collect_deltas(
        stream::iter(deltas),
        AccumulatorConfig {
            final_arguments: ArgumentsParsing::Partial,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(lenient.tool_calls[0].args["q"], "ca");
}
