use super::merge_lists_into;
use crate::types::{ContentBlock, MessageContent};

/// Merge two message contents.
///
/// - text + text: concatenation
/// - text + blocks: the text becomes a leading text block
/// - blocks + text: appended to a trailing text block, else pushed as a new one
/// - blocks + blocks: index-keyed [`merge_lists`](super::merge_lists)
///
/// Empty text never produces a block of its own.
pub fn merge_content(left: &MessageContent, right: &MessageContent) -> MessageContent {
    let mut merged = left.clone();
    merge_content_into(&mut merged, right);
    merged
}

/// In-place form of [`merge_content`]; appends to `target` without copying it.
pub fn merge_content_into(target: &mut MessageContent, right: &MessageContent) {
    match (&mut *target, right) {
        (MessageContent::Text(l), MessageContent::Text(r)) => l.push_str(r),
        (MessageContent::Text(l), MessageContent::Blocks(r)) => {
            let mut blocks = Vec::with_capacity(r.len() + 1);
            if !l.is_empty() {
                blocks.push(ContentBlock::Text(std::mem::take(l)));
            }
            blocks.extend(r.iter().cloned());
            *target = MessageContent::Blocks(blocks);
        }
        (MessageContent::Blocks(blocks), MessageContent::Text(r)) => {
            if !r.is_empty() {
                match blocks.last_mut() {
                    Some(ContentBlock::Text(tail)) => tail.push_str(r),
                    _ => blocks.push(ContentBlock::Text(r.clone())),
                }
            }
        }
        (MessageContent::Blocks(l), MessageContent::Blocks(r)) => merge_lists_into(l, r),
    }
}
