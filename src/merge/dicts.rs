use serde_json::Value;

use super::StringMerge;
use crate::types::JsonMap;

/// Merge two open maps.
///
/// For keys present on both sides: nested maps merge recursively, lists
/// concatenate, any other right-hand value replaces the left-hand one. A JSON
/// `null` on the right never replaces an existing value.
pub fn merge_dicts(left: &JsonMap, right: &JsonMap) -> JsonMap {
    let mut merged = left.clone();
    merge_dicts_into(&mut merged, right);
    merged
}

/// In-place form of [`merge_dicts`].
pub fn merge_dicts_into(target: &mut JsonMap, right: &JsonMap) {
    merge_into(target, right, StringMerge::Overwrite);
}

/// Left-fold [`merge_dicts`] over any number of maps.
pub fn merge_all_dicts<'a, I>(maps: I) -> JsonMap
where
    I: IntoIterator<Item = &'a JsonMap>,
{
    maps.into_iter()
        .fold(JsonMap::new(), |acc, next| merge_dicts(&acc, next))
}

pub(super) fn merge_into(target: &mut JsonMap, source: &JsonMap, strings: StringMerge) {
    for (key, value) in source {
        match target.get_mut(key) {
            Some(existing) => merge_value(existing, value, strings),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_value(existing: &mut Value, incoming: &Value, strings: StringMerge) {
    match (existing, incoming) {
        (_, Value::Null) => {}
        (Value::Object(left), Value::Object(right)) => merge_into(left, right, strings),
        (Value::Array(left), Value::Array(right)) => left.extend(right.iter().cloned()),
        (Value::String(left), Value::String(right)) if strings == StringMerge::Concat => {
            left.push_str(right)
        }
        (slot, value) => *slot = value.clone(),
    }
}
