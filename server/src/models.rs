//! Catalog documents and their render views.
//!
//! `Category` and `Item` are the stored shapes. The `*View` structs are what
//! the templates see, with ids flattened to hex and the URL derived from the
//! id rather than stored.

use std::collections::BTreeSet;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const CATEGORY_COLLECTION: &str = "categories";
pub const ITEM_COLLECTION: &str = "items";

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    pub title: String,
    pub summary: String,

    /// Ids of the categories this item belongs to. The store does not
    /// enforce the reference; category deletion is refused while any item
    /// still points at it.
    #[serde(default)]
    pub category: Vec<ObjectId>,
}

pub fn category_url(id: &ObjectId) -> String {
    format!("/catalog/categories/{}", id.to_hex())
}

pub fn item_url(id: &ObjectId) -> String {
    format!("/catalog/items/{}", id.to_hex())
}

#[derive(Serialize, Debug)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category._id.map(|id| id.to_hex()).unwrap_or_default(),
            name: category.name.clone(),
            url: category._id.map(|id| category_url(&id)).unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item._id.map(|id| id.to_hex()).unwrap_or_default(),
            title: item.title.clone(),
            summary: item.summary.clone(),
            url: item._id.map(|id| item_url(&id)).unwrap_or_default(),
        }
    }
}

/// One checkbox row on the item form.
#[derive(Serialize, Debug)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub checked: bool,
}

pub fn category_options(categories: &[Category], selected: &BTreeSet<String>) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|category| {
            let id = category._id.map(|id| id.to_hex()).unwrap_or_default();

            CategoryOption {
                checked: selected.contains(&id),
                name: category.name.clone(),
                id,
            }
        })
        .collect()
}

/// Keeps only the selections that name a category which exists right now.
pub fn selected_ids(categories: &[Category], selected: &BTreeSet<String>) -> Vec<ObjectId> {
    categories
        .iter()
        .filter_map(|category| category._id)
        .filter(|id| selected.contains(&id.to_hex()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(hex: &str, name: &str) -> Category {
        Category {
            _id: Some(ObjectId::parse_str(hex).unwrap()),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_urls_derive_from_id() {
        let id = ObjectId::parse_str("657f1f77bcf86cd799439011").unwrap();

        assert_eq!(
            category_url(&id),
            "/catalog/categories/657f1f77bcf86cd799439011"
        );
        assert_eq!(item_url(&id), "/catalog/items/657f1f77bcf86cd799439011");
    }

    #[test]
    fn test_views_flatten_ids() {
        let category = category("657f1f77bcf86cd799439011", "Tools");
        let view = CategoryView::from(&category);

        assert_eq!(view.id, "657f1f77bcf86cd799439011");
        assert_eq!(view.name, "Tools");
        assert_eq!(view.url, "/catalog/categories/657f1f77bcf86cd799439011");
    }

    #[test]
    fn test_options_mark_selected() {
        let categories = vec![
            category("657f1f77bcf86cd799439011", "Tools"),
            category("657f1f77bcf86cd799439012", "Paint"),
        ];
        let selected = BTreeSet::from(["657f1f77bcf86cd799439012".to_string()]);

        let options = category_options(&categories, &selected);

        assert_eq!(options.len(), 2);
        assert!(!options[0].checked);
        assert!(options[1].checked);
    }

    #[test]
    fn test_selected_ids_drop_unknown_categories() {
        let categories = vec![category("657f1f77bcf86cd799439011", "Tools")];
        let selected = BTreeSet::from([
            "657f1f77bcf86cd799439011".to_string(),
            "ffffffffffffffffffffffff".to_string(),
        ]);

        let ids = selected_ids(&categories, &selected);

        assert_eq!(ids, vec![ObjectId::parse_str("657f1f77bcf86cd799439011").unwrap()]);
    }
}
