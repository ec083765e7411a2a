//! Message identifiers
//!
//! Ids generated locally carry [`SYNTHESIZED_ID_PREFIX`]; ids assigned by the
//! upstream provider do not. When deltas are folded, a provider-assigned id
//! always wins over a synthesized one.

/// Prefix marking an id generated locally rather than by the provider.
///
/// Both [`synthesized_id`] and [`reconcile_ids`] read this constant; changing
/// how local ids are generated must go through it.
pub const SYNTHESIZED_ID_PREFIX: &str = "run-";

/// Generate a new local message id (`run-<uuid v4>`).
pub fn synthesized_id() -> String {
    format!("{SYNTHESIZED_ID_PREFIX}{}", uuid::Uuid::new_v4())
}

/// Whether `id` was generated locally
pub fn is_synthesized(id: &str) -> bool {
    id.starts_with(SYNTHESIZED_ID_PREFIX)
}

/// Pick the canonical id among candidates observed across folded deltas.
///
/// The first non-empty provider-assigned id wins; failing that, the first
/// non-empty id of any kind. Returns `None` when every candidate is empty.
pub fn reconcile_ids<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let present: Vec<&str> = candidates
        .into_iter()
        .flatten()
        .filter(|id| !id.is_empty())
        .collect();

    present
        .iter()
        .find(|id| !is_synthesized(id))
        .or_else(|| present.first())
        .map(|id| (*id).to_string())
}
