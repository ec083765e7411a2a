use siumai_delta::{
    ArgumentsParsing, JsonMap, MessageDelta, ToolCall, ToolCallChunk, assemble_tool_calls,
    fold_deltas,
};

fn fold(deltas: &[MessageDelta]) -> MessageDelta {
    fold_deltas(&deltas[0], &deltas[1..]).unwrap()
}

#[test]
fn truncated_arguments_are_invalid_at_stream_end() {
    let folded = fold(&[
        MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "{\"x\"").with_name("f")),
        MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, ": 1")),
    ]);

    let preview = folded.preview_tool_calls();
    assert_eq!(preview.tool_calls.len(), 1);
    assert_eq!(preview.tool_calls[0].args["x"], 1);

    let message = folded.into_message();
    assert!(message.tool_calls.is_empty());
    let invalid = &message.invalid_tool_calls[0];
    assert_eq!(invalid.name.as_deref(), Some("f"));
    assert_eq!(invalid.args, "{\"x\": 1");
    assert!(invalid.error.as_deref().is_some_and(|e| e.contains("not valid JSON")));
}

#[test]
fn empty_arguments_become_an_empty_object() {
    let message = MessageDelta::new()
        .with_tool_call_chunk(ToolCallChunk::at(0, "").with_name("get_time").with_id("call_t"))
        .into_message();
    assert_eq!(
        message.tool_calls,
        vec![ToolCall::new("get_time", JsonMap::new()).with_id("call_t")]
    );
}

#[test]
fn parallel_calls_keep_first_seen_slot_order() {
    let folded = fold(&[
        MessageDelta::new()
            .with_tool_call_chunk(ToolCallChunk::at(1, "{\"city\":").with_name("weather"))
            .with_tool_call_chunk(ToolCallChunk::at(0, "{\"tz\":").with_name("time")),
        MessageDelta::new()
            .with_tool_call_chunk(ToolCallChunk::at(0, "\"UTC\"}"))
            .with_tool_call_chunk(ToolCallChunk::at(1, "\"Oslo\"}")),
    ]);

    let message = folded.into_message();
    let calls: Vec<_> = message
        .tool_calls
        .iter()
        .map(|c| (c.name.as_str(), c.arguments_json()))
        .collect();
    assert_eq!(
        calls,
        [
            ("weather", "{\"city\":\"Oslo\"}".to_string()),
            ("time", "{\"tz\":\"UTC\"}".to_string()),
        ]
    );
}

#[test]
fn non_object_arguments_are_invalid_without_error() {
    let message = MessageDelta::new()
        .with_tool_call_chunk(ToolCallChunk::at(0, "\"just a string\"").with_name("echo"))
        .into_message();
    assert!(message.tool_calls.is_empty());
    assert_eq!(message.invalid_tool_calls[0].error, None);
}

#[test]
fn malformed_fragments_never_fail_the_fold() {
    let chunks = [
        ToolCallChunk::at(0, "[1, 2").with_name("bad"),
        ToolCallChunk::at(1, "{\"ok\": [1, 2]}").with_name("good"),
    ];
    for mode in [ArgumentsParsing::Partial, ArgumentsParsing::Complete] {
        let assembled = assemble_tool_calls(&chunks, mode);
        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled.tool_calls[0].name, "good");
        assert_eq!(assembled.invalid_tool_calls[0].name.as_deref(), Some("bad"));
    }
}

#[test]
fn finalize_twice_changes_nothing() {
    let folded = fold(&[
        MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "{\"a\":").with_name("f")),
        MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "1}")),
    ]);
    let once = folded.finalize(ArgumentsParsing::Complete);
    assert_eq!(once.clone().finalize(ArgumentsParsing::Complete), once);
}

#[test]
fn raw_newlines_in_code_arguments_survive_finalization() {
    let folded = fold(&[
        MessageDelta::new()
            .with_tool_call_chunk(ToolCallChunk::at(0, "{\"code\": \"fn main() {").with_name("run_code")),
        MessageDelta::new().with_tool_call_chunk(ToolCallChunk::at(0, "\n}\"}")),
    ]);

    let message = folded.into_message();
    assert!(message.invalid_tool_calls.is_empty());
    assert_eq!(message.tool_calls[0].name, "run_code");
    assert_eq!(message.tool_calls[0].args["code"], "fn main() {\n}");
}
