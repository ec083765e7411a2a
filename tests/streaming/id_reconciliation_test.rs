use siumai_delta::{
    MessageDelta, SYNTHESIZED_ID_PREFIX, fold_deltas, is_synthesized, reconcile_ids,
    synthesized_id,
};

#[test]
fn provider_id_beats_synthesized_ids() {
    let ids = [Some("run-abc"), Some("call_77"), Some("run-xyz")];
    assert_eq!(reconcile_ids(ids).as_deref(), Some("call_77"));
}

#[test]
fn first_synthesized_id_is_the_fallback() {
    let ids = [Some("run-abc"), Some("run-xyz")];
    assert_eq!(reconcile_ids(ids).as_deref(), Some("run-abc"));
}

#[test]
fn empty_and_missing_ids_are_skipped() {
    assert_eq!(reconcile_ids([None, Some(""), None]), None);
    assert_eq!(reconcile_ids([Some(""), Some("msg_1")]).as_deref(), Some("msg_1"));
}

#[test]
fn fold_reconciles_across_all_operands() {
    let first = MessageDelta::text("a").with_id(synthesized_id());
    let rest = [
        MessageDelta::text("b"),
        MessageDelta::text("c").with_id("msg_01"),
        MessageDelta::text("d").with_id(synthesized_id()),
    ];
    let folded = fold_deltas(&first, &rest).unwrap();
    assert_eq!(folded.id.as_deref(), Some("msg_01"));
}

#[test]
fn synthesized_ids_carry_the_shared_prefix() {
    let id = synthesized_id();
    assert!(id.starts_with(SYNTHESIZED_ID_PREFIX));
    assert!(is_synthesized(&id));
    assert_ne!(id, synthesized_id());
    assert!(!is_synthesized("chatcmpl-1"));
}
