use super::StringMerge;
use super::dicts::merge_into;
use crate::types::{ContentBlock, ToolCallChunk};

/// A list entry that can be combined in place with a later entry sharing its key.
pub trait IndexedFragment: Clone {
    /// Merge key; `None` entries are never combined.
    fn merge_key(&self) -> Option<usize>;

    /// Fold a later fragment with the same key into `self`.
    fn absorb(&mut self, later: &Self);
}

/// Merge two ordered fragment lists.
///
/// A right-hand entry whose key matches an entry already in the result is
/// absorbed into that entry; every other entry is appended in order.
pub fn merge_lists<T: IndexedFragment>(left: &[T], right: &[T]) -> Vec<T> {
    let mut merged = left.to_vec();
    merge_lists_into(&mut merged, right);
    merged
}

/// In-place form of [`merge_lists`].
pub fn merge_lists_into<T: IndexedFragment>(target: &mut Vec<T>, right: &[T]) {
    for item in right {
        let slot = item
            .merge_key()
            .and_then(|key| target.iter().position(|m| m.merge_key() == Some(key)));
        match slot {
            Some(pos) => target[pos].absorb(item),
            None => target.push(item.clone()),
        }
    }
}

impl IndexedFragment for ToolCallChunk {
    fn merge_key(&self) -> Option<usize> {
        self.index
    }

    fn absorb(&mut self, later: &Self) {
        if self.name.as_deref().is_none_or(str::is_empty) {
            if let Some(name) = later.name.as_ref().filter(|n| !n.is_empty()) {
                self.name = Some(name.clone());
            }
        }
        if self.id.as_deref().is_none_or(str::is_empty) {
            if let Some(id) = later.id.as_ref().filter(|i| !i.is_empty()) {
                self.id = Some(id.clone());
            }
        }
        self.args.push_str(&later.args);
    }
}

impl IndexedFragment for ContentBlock {
    fn merge_key(&self) -> Option<usize> {
        self.index()
    }

    fn absorb(&mut self, later: &Self) {
        match (self, later) {
            (ContentBlock::Typed(left), ContentBlock::Typed(right)) => {
                let mut right = right.clone();
                // the block type is fixed by the first fragment
                right.remove("type");
                merge_into(left, &right, StringMerge::Concat);
            }
            (slot, block) => *slot = block.clone(),
        }
    }
}
