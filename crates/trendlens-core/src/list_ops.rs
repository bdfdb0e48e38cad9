//! Value-returning operations shared by the trend-query and link lists.
//!
//! Every operation takes the current list and returns a fresh `Vec`; the
//! input is never modified, so earlier snapshots stay valid.

/// Append `text` unless it is blank after trimming. The stored text is not trimmed.
pub fn add(list: &[String], text: &str) -> Vec<String> {
    let mut next = list.to_vec();
    if !text.trim().is_empty() {
        next.push(text.to_string());
    }
    next
}

/// Replace the element at `index`. Out-of-range indices leave the list unchanged.
pub fn update(list: &[String], index: usize, text: &str) -> Vec<String> {
    let mut next = list.to_vec();
    if let Some(slot) = next.get_mut(index) {
        *slot = text.to_string();
    }
    next
}

/// Remove the element at `index`, shifting later elements down.
pub fn delete(list: &[String], index: usize) -> Vec<String> {
    let mut next = list.to_vec();
    if index < next.len() {
        next.remove(index);
    }
    next
}

/// Append every entry of `extra` as-is.
pub fn extend(list: &[String], extra: &[String]) -> Vec<String> {
    list.iter().chain(extra.iter()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_blank_is_noop() {
        let current = list(&["a"]);
        assert_eq!(add(&current, ""), current);
        assert_eq!(add(&current, "   "), current);
        assert_eq!(add(&current, "\t\n"), current);
    }

    #[test]
    fn test_add_appends_last() {
        let current = list(&["a", "b"]);
        assert_eq!(add(&current, "x"), list(&["a", "b", "x"]));
    }

    #[test]
    fn test_add_keeps_surrounding_whitespace() {
        assert_eq!(add(&[], " organic "), list(&[" organic "]));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let current = list(&["a", "b", "c"]);
        assert_eq!(update(&current, 1, "B"), list(&["a", "B", "c"]));
        assert_eq!(update(&current, 7, "B"), current);
    }

    #[test]
    fn test_delete_shifts_following() {
        let current = list(&["a", "b", "c"]);
        assert_eq!(delete(&current, 0), list(&["b", "c"]));
        assert_eq!(delete(&current, 3), current);
    }

    #[test]
    fn test_update_after_delete_targets_new_positions() {
        let current = list(&["a", "b", "c"]);
        let after_delete = delete(&current, 0);
        // Index 1 now refers to "c", not "b".
        let updated = update(&after_delete, 1, "z");
        assert_eq!(updated, list(&["b", "z"]));
        assert_eq!(current, list(&["a", "b", "c"]));
    }

    #[test]
    fn test_extend_preserves_order() {
        let current = list(&["a"]);
        assert_eq!(extend(&current, &list(&["b", "c"])), list(&["a", "b", "c"]));
    }
}
