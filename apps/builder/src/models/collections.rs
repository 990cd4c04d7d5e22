//! Whole-collection replacement helpers.
//!
//! Every edit to a repeated section produces a fresh `Vec`; the input slice is
//! never mutated, so a snapshot handed to the preview pipeline stays valid.

use uuid::Uuid;

/// A list item with a stable identity.
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// Returns a new list with `item` appended.
pub fn with_added<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

/// Returns a new list where the item with `id` is replaced by `update(item)`.
/// Unknown ids leave the list unchanged.
pub fn with_updated<T, F>(items: &[T], id: Uuid, update: F) -> Vec<T>
where
    T: Clone + Identified,
    F: FnOnce(T) -> T,
{
    let mut update = Some(update);
    items
        .iter()
        .map(|item| {
            if item.id() == id {
                if let Some(f) = update.take() {
                    return f(item.clone());
                }
            }
            item.clone()
        })
        .collect()
}

/// Returns a new list without the item with `id`.
pub fn with_removed<T: Clone + Identified>(items: &[T], id: Uuid) -> Vec<T> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Experience;

    fn make_entry(company: &str) -> Experience {
        Experience {
            company: company.to_string(),
            ..Experience::new()
        }
    }

    #[test]
    fn test_with_added_preserves_order_and_input() {
        let original = vec![make_entry("Acme")];
        let next = with_added(&original, make_entry("Globex"));
        assert_eq!(original.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].company, "Globex");
    }

    #[test]
    fn test_with_updated_changes_only_target() {
        let list = vec![make_entry("Acme"), make_entry("Globex")];
        let target = list[1].id;
        let next = with_updated(&list, target, |mut e| {
            e.position = "Engineer".to_string();
            e
        });
        assert_eq!(next[1].position, "Engineer");
        assert_eq!(next[1].id, target);
        assert!(next[0].position.is_empty());
        assert!(list[1].position.is_empty());
    }

    #[test]
    fn test_with_removed_drops_target() {
        let list = vec![make_entry("Acme"), make_entry("Globex"), make_entry("Initech")];
        let next = with_removed(&list, list[1].id);
        let names: Vec<&str> = next.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Initech"]);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let list = vec![make_entry("Acme")];
        let next = with_removed(&list, Uuid::new_v4());
        assert_eq!(next, list);
    }
}
