//! Next-value computation for the search history and favorites lists.
//!
//! Lists are ordered most recent first and hold no two entries that are
//! equal ignoring case and surrounding whitespace. Every function returns a
//! new list and leaves its input alone; persisting the result is up to the
//! caller.

/// Maximum length of the search history. Favorites are unbounded.
pub const HISTORY_LIMIT: usize = 8;

fn same_city(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Move `entry` to the front, dropping any earlier spelling of it, then cap
/// the list at `max_len`.
///
/// The new spelling wins. A blank entry leaves the list unchanged.
pub fn upsert_front(list: &[String], entry: &str, max_len: Option<usize>) -> Vec<String> {
    let entry = entry.trim();
    if entry.is_empty() {
        return list.to_vec();
    }

    let mut next = Vec::with_capacity(list.len() + 1);
    next.push(entry.to_string());
    next.extend(list.iter().filter(|e| !same_city(e, entry)).cloned());

    if let Some(max) = max_len {
        next.truncate(max);
    }
    next
}

/// Drop every entry matching `entry`. Absent entries are not an error.
pub fn remove(list: &[String], entry: &str) -> Vec<String> {
    list.iter().filter(|e| !same_city(e, entry)).cloned().collect()
}

pub fn clear() -> Vec<String> {
    Vec::new()
}

pub fn contains(list: &[String], entry: &str) -> bool {
    list.iter().any(|e| same_city(e, entry))
}
