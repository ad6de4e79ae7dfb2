//! Category hierarchy rules and tree assembly.
//!
//! Categories nest at most three levels deep (levels `0..=2`). The procedure
//! store is authoritative for enforcing this; the helpers here give the
//! HTTP layer and the in-memory store the same arithmetic.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use validator::ValidationError;

use crate::error::CoreError;
use crate::types::DbId;

/// Deepest level a category may occupy. Root categories are level 0.
pub const MAX_CATEGORY_LEVEL: i16 = 2;

/// Live categories one account may hold.
pub const MAX_CATEGORIES_PER_ACCOUNT: usize = 50;

/// Minimum category name length (after trimming).
pub const NAME_MIN_LEN: u64 = 2;

/// Maximum category name length (after trimming).
pub const NAME_MAX_LEN: u64 = 50;

/// Compute the level of a new child under a parent at `parent_level`.
///
/// Returns a validation error when the parent already sits at
/// [`MAX_CATEGORY_LEVEL`].
pub fn child_level(parent_level: i16) -> Result<i16, CoreError> {
    if parent_level >= MAX_CATEGORY_LEVEL {
        return Err(CoreError::Validation(format!(
            "Categories can be nested at most {} levels deep",
            MAX_CATEGORY_LEVEL + 1
        )));
    }
    Ok(parent_level + 1)
}

/// Anything that can be placed in a parent/child tree.
pub trait HierarchyItem {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
}

/// A node in an assembled category tree.
///
/// The item's own fields are flattened so a node serializes as the item
/// plus a `children` array.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

/// Nest a flat list into a forest.
///
/// Sibling order follows input order. Items whose parent is not present in
/// the input (for example a soft-deleted parent) are promoted to roots.
pub fn build_tree<T: HierarchyItem>(items: Vec<T>) -> Vec<TreeNode<T>> {
    let ids: HashSet<DbId> = items.iter().map(HierarchyItem::id).collect();

    let mut by_parent: HashMap<Option<DbId>, Vec<T>> = HashMap::new();
    for item in items {
        let key = item.parent_id().filter(|p| ids.contains(p));
        by_parent.entry(key).or_default().push(item);
    }

    attach(None, &mut by_parent)
}

fn attach<T: HierarchyItem>(
    parent: Option<DbId>,
    by_parent: &mut HashMap<Option<DbId>, Vec<T>>,
) -> Vec<TreeNode<T>> {
    // Removing the bucket means each parent is expanded once, so malformed
    // input with cycles cannot recurse forever.
    let Some(children) = by_parent.remove(&parent) else {
        return Vec::new();
    };

    children
        .into_iter()
        .map(|item| {
            let children = attach(Some(item.id()), by_parent);
            TreeNode { item, children }
        })
        .collect()
}

/// `validator` rule: trimmed name must be within the length bounds.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count() as u64;
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::new("length").with_message(
            format!("Name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters").into(),
        ));
    }
    Ok(())
}

/// Normalize a category name for uniqueness comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, Clone, Serialize)]
    struct Item {
        id: DbId,
        parent: Option<DbId>,
    }

    impl HierarchyItem for Item {
        fn id(&self) -> DbId {
            self.id
        }
        fn parent_id(&self) -> Option<DbId> {
            self.parent
        }
    }

    fn item(id: DbId, parent: Option<DbId>) -> Item {
        Item { id, parent }
    }

    #[test]
    fn child_level_increments() {
        assert_eq!(child_level(0).unwrap(), 1);
        assert_eq!(child_level(1).unwrap(), 2);
    }

    #[test]
    fn child_level_rejects_fourth_level() {
        assert_matches!(child_level(2), Err(CoreError::Validation(_)));
    }

    #[test]
    fn builds_nested_forest_in_input_order() {
        let tree = build_tree(vec![
            item(1, None),
            item(2, Some(1)),
            item(3, None),
            item(4, Some(2)),
            item(5, Some(1)),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].item.id, 1);
        assert_eq!(tree[1].item.id, 3);

        let children: Vec<DbId> = tree[0].children.iter().map(|c| c.item.id).collect();
        assert_eq!(children, vec![2, 5]);
        assert_eq!(tree[0].children[0].children[0].item.id, 4);
    }

    #[test]
    fn orphan_is_promoted_to_root() {
        let tree = build_tree(vec![item(7, Some(99)), item(8, Some(7))]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].item.id, 7);
        assert_eq!(tree[0].children[0].item.id, 8);
    }

    #[test]
    fn empty_input_gives_empty_forest() {
        assert!(build_tree(Vec::<Item>::new()).is_empty());
    }

    #[test]
    fn node_serializes_flat_with_children() {
        let tree = build_tree(vec![item(1, None), item(2, Some(1))]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["children"][0]["id"], 2);
        assert!(json[0]["children"][0]["children"].as_array().unwrap().is_empty());
    }

    #[test]
    fn name_length_is_measured_after_trim() {
        assert!(validate_name("ab").is_ok());
        assert!(validate_name("  a  ").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());
        assert!(validate_name(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn normalize_ignores_case_and_padding() {
        assert_eq!(normalize_name("  Work "), "work");
        assert_eq!(normalize_name("WORK"), normalize_name("work"));
    }
}
