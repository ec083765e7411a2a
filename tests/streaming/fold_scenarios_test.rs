use crate::support::fixtures::{search_call_stream, text_stream};
use serde_json::json;
use siumai_delta::{
    ContentBlock, DeltaError, MessageContent, MessageDelta, ToolCallChunk, UsageMetadata,
    fold_deltas,
};

#[test]
fn search_call_folds_into_one_tool_call() {
    let stream = search_call_stream();
    let folded = fold_deltas(&stream[0], &stream[1..]).unwrap();

    assert_eq!(folded.tool_call_chunks.len(), 1);
    assert!(folded.tool_calls.is_empty(), "fold leaves finalized views empty");
    assert_eq!(folded.usage, Some(UsageMetadata::new(12, 7)));
    assert_eq!(folded.response_metadata["finish_reason"], "tool_calls");

    let message = folded.into_message();
    assert_eq!(message.tool_calls.len(), 1);
    let call = &message.tool_calls[0];
    assert_eq!(call.name, "search");
    assert_eq!(call.id.as_deref(), Some("call_1"));
    assert_eq!(serde_json::Value::Object(call.args.clone()), json!({"q": "cats"}));
    assert!(message.invalid_tool_calls.is_empty());
}

#[test]
fn fold_is_associative_over_prefixes() {
    let stream = search_call_stream();
    let all_at_once = fold_deltas(&stream[0], &stream[1..]).unwrap();

    let head = fold_deltas(&stream[0], &stream[1..2]).unwrap();
    let stepwise = fold_deltas(&head, &stream[2..]).unwrap();
    assert_eq!(stepwise, all_at_once);
}

#[test]
fn text_fragments_reassemble_in_order() {
    let text = "The quick brown fox jumps over the lazy dog";
    let stream = text_stream(text, 4);
    let folded = fold_deltas(&stream[0], &stream[1..]).unwrap();
    assert_eq!(folded.content, MessageContent::Text(text.into()));
}

#[test]
fn reversed_fragments_change_arguments() {
    let a = MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "{\"n\": 1").with_name("f"));
    let b = MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "2}"));

    let forward = fold_deltas(&a, std::slice::from_ref(&b)).unwrap();
    let backward = fold_deltas(&b, std::slice::from_ref(&a)).unwrap();
    assert_eq!(forward.tool_call_chunks[0].args, "{\"n\": 12}");
    assert_eq!(backward.tool_call_chunks[0].args, "2}{\"n\": 1");

    assert_eq!(forward.into_message().tool_calls[0].args["n"], 12);
    assert_eq!(backward.into_message().invalid_tool_calls.len(), 1);
}

#[test]
fn example_flags_must_agree() {
    let first = MessageDelta::text("a").with_example(true);
    let rest = [MessageDelta::text("b").with_example(true), MessageDelta::text("c")];
    let err = fold_deltas(&first, &rest).unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(
        err,
        DeltaError::ExampleMismatch {
            position: 2,
            expected: true,
            found: false,
        }
    );

    let folded = fold_deltas(&first, &rest[..1]).unwrap();
    assert!(folded.example);
}

#[test]
fn content_blocks_merge_by_index_after_text() {
    let block = |value| ContentBlock::typed(value).unwrap();
    let first = MessageDelta::text("Intro. ");
    let rest = [
        MessageDelta::new().with_content(vec![block(json!({"type": "text", "text": "Hel", "index": 0}))]),
        MessageDelta::new().with_content(vec![block(json!({"type": "text", "text": "lo", "index": 0}))]),
        MessageDelta::text(" tail"),
    ];

    let folded = fold_deltas(&first, &rest).unwrap();
    let blocks = folded.content.as_blocks().unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0], ContentBlock::text("Intro. "));
    assert_eq!(blocks[1], block(json!({"type": "text", "text": "Hello", "index": 0})));
    assert_eq!(blocks[2], ContentBlock::text(" tail"));
    assert_eq!(folded.content.all_text(), "Intro. Hello tail");
}

#[test]
fn metadata_null_never_clobbers() {
    let first = MessageDelta::new().with_response_metadata("stop_reason", "end_turn");
    let rest = [MessageDelta::new().with_response_metadata("stop_reason", serde_json::Value::Null)];
    let folded = fold_deltas(&first, &rest).unwrap();
    assert_eq!(folded.response_metadata["stop_reason"], "end_turn");
}

#[test]
fn finalized_operands_contribute_their_calls() {
    let finished = MessageDelta::text("a")
        .with_tool_call_chunk(ToolCallChunk::at(0, "{\"k\": true}").with_name("first"))
        .into_message();
    let earlier = MessageDelta::from(finished);
    let mut plain = earlier.clone();
    plain.tool_call_chunks.clear();

    let next = MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "{}").with_name("second"));
    let folded = fold_deltas(&plain, std::slice::from_ref(&next)).unwrap();

    let names: Vec<_> = folded
        .into_message()
        .tool_calls
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["first", "second"]);
}
