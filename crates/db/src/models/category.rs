//! Category rows and request DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use taskhub_core::category::{validate_name, HierarchyItem};
use taskhub_core::types::{DbId, Timestamp};
use taskhub_core::validation::validate_hex_color;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (procedure result rows)
// ---------------------------------------------------------------------------

/// A category row as returned by the `spCategory*` procedures.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub account_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub parent_id: Option<DbId>,
    /// Depth in the hierarchy, `0..=2`.
    pub level: i16,
    /// Number of live tasks associated with this category.
    pub task_count: i32,
    /// Default categories cannot be deleted.
    pub is_default: bool,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HierarchyItem for Category {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Color given to categories created without one.
pub const DEFAULT_COLOR: &str = "#3498db";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Keeps "field absent" (`None`) apart from "field is null" (`Some(None)`).
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /category`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[validate(length(max = 50, message = "Icon must be at most 50 characters"))]
    pub icon: Option<String>,
    #[serde(alias = "idParent")]
    #[validate(range(min = 1, message = "Parent id must be positive"))]
    pub parent_id: Option<DbId>,
}

/// Body of `PUT /category/{id}`.
///
/// `parentId` has three states: absent keeps the current parent, `null`
/// moves the category to the root, and an id moves it under that category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[validate(length(max = 50, message = "Icon must be at most 50 characters"))]
    pub icon: Option<String>,
    #[serde(default, alias = "idParent", deserialize_with = "deserialize_present")]
    #[validate(range(min = 1, message = "Parent id must be positive"))]
    pub parent_id: Option<Option<DbId>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use taskhub_core::validation::field_errors;

    use super::*;

    #[test]
    fn create_payload_uses_camel_case() {
        let input: CreateCategory = serde_json::from_value(json!({
            "name": "Work",
            "color": "#336699",
            "parentId": 4
        }))
        .unwrap();
        assert_eq!(input.parent_id, Some(4));
        assert!(input.icon.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_color_defaults_when_omitted() {
        let input: CreateCategory = serde_json::from_value(json!({ "name": "Inbox" })).unwrap();
        assert_eq!(input.color, DEFAULT_COLOR);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_distinguishes_absent_and_null_parent() {
        let base = json!({ "name": "Work", "color": "#336699" });

        let absent: UpdateCategory = serde_json::from_value(base.clone()).unwrap();
        assert_eq!(absent.parent_id, None);

        let mut with_null = base.clone();
        with_null["parentId"] = json!(null);
        let null: UpdateCategory = serde_json::from_value(with_null).unwrap();
        assert_eq!(null.parent_id, Some(None));

        let mut with_id = base;
        with_id["idParent"] = json!(7);
        let moved: UpdateCategory = serde_json::from_value(with_id).unwrap();
        assert_eq!(moved.parent_id, Some(Some(7)));
        assert!(moved.validate().is_ok());
    }

    #[test]
    fn update_rejects_non_positive_parent() {
        let input: UpdateCategory = serde_json::from_value(json!({
            "name": "Work",
            "color": "#336699",
            "parentId": 0
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(field_errors(&errors).contains_key("parentId"));
    }

    #[test]
    fn create_payload_reports_each_bad_field() {
        let input = CreateCategory {
            name: "x".into(),
            color: "blue".into(),
            icon: None,
            parent_id: Some(0),
        };
        let errors = input.validate().unwrap_err();
        let fields = field_errors(&errors);
        assert_eq!(
            fields.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["color", "name", "parentId"]
        );
    }
}
