//! Client-side filtering helpers.

use ledgerdesk_core::RecordId;

/// Whether an optional record key loosely equals `value`.
pub fn key_matches(key: Option<&RecordId>, value: &RecordId) -> bool {
    key.is_some_and(|k| k.loosely_eq(value))
}

/// Keep the items whose key loosely equals `value`, order preserved.
pub fn filter_loose<T, F>(items: Vec<T>, value: &RecordId, key: F) -> Vec<T>
where
    F: Fn(&T) -> Option<&RecordId>,
{
    items
        .into_iter()
        .filter(|item| key_matches(key(item), value))
        .collect()
}
