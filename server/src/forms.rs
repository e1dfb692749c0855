//! Form decoding and validation.
//!
//! Free-text fields are trimmed before validation; emptiness after the trim
//! is the only rejection. The item form's `category` field may arrive zero,
//! one, or many times, so the whole body is decoded as key/value pairs and
//! the selections collapsed into a set before anything else looks at them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("The {field} field must not be empty."),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(FieldError::required("name"));
        }

        errors
    }
}

#[derive(Deserialize, Debug)]
pub struct CategoryDeleteInput {
    pub categoryid: String,
}

#[derive(Deserialize, Debug)]
pub struct ItemDeleteInput {
    pub itemid: String,
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct ItemInput {
    pub title: String,
    pub summary: String,
    pub category: BTreeSet<String>,
}

impl ItemInput {
    pub fn from_body(body: &[u8]) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;

        Ok(Self::from_pairs(pairs))
    }

    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut input = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "title" => input.title = value.trim().to_string(),
                "summary" => input.summary = value.trim().to_string(),
                "category" => {
                    input.category.insert(value);
                }
                _ => {}
            }
        }

        input
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.title.is_empty() {
            errors.push(FieldError::required("title"));
        }

        if self.summary.is_empty() {
            errors.push(FieldError::required("summary"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_category_name_trimmed() {
        let input = CategoryInput {
            name: "  Tools  ".to_string(),
        }
        .sanitize();

        assert_eq!(input.name, "Tools");
        assert!(input.validate().is_empty());
    }

    #[test]
    fn test_category_blank_name_rejected() {
        let input = CategoryInput {
            name: "   ".to_string(),
        }
        .sanitize();

        let errors = input.validate();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_item_fields_trimmed() {
        let input = ItemInput::from_pairs(pairs(&[
            ("title", "  Hammer "),
            ("summary", " Drives nails.  "),
        ]));

        assert_eq!(input.title, "Hammer");
        assert_eq!(input.summary, "Drives nails.");
        assert!(input.validate().is_empty());
    }

    #[test]
    fn test_item_blank_fields_rejected() {
        let input = ItemInput::from_pairs(pairs(&[("title", "  "), ("summary", "")]));

        let errors = input.validate();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "summary");
    }

    #[test]
    fn test_repeated_selections_collapse_to_a_set() {
        let input = ItemInput::from_pairs(pairs(&[
            ("title", "Hammer"),
            ("summary", "Drives nails."),
            ("category", "a"),
            ("category", "b"),
            ("category", "a"),
        ]));

        assert_eq!(
            input.category,
            BTreeSet::from(["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_single_selection_becomes_one_element_set() {
        let input = ItemInput::from_pairs(pairs(&[("category", "a")]));

        assert_eq!(input.category, BTreeSet::from(["a".to_string()]));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let input = ItemInput::from_pairs(pairs(&[("title", "Hammer"), ("color", "red")]));

        assert_eq!(input.title, "Hammer");
        assert!(input.summary.is_empty());
        assert!(input.category.is_empty());
    }

    #[test]
    fn test_from_body_decodes_urlencoded_pairs() {
        let body = b"title=Hammer&summary=Drives+nails.&category=a&category=b";

        let input = ItemInput::from_body(body).unwrap();

        assert_eq!(input.title, "Hammer");
        assert_eq!(input.summary, "Drives nails.");
        assert_eq!(
            input.category,
            BTreeSet::from(["a".to_string(), "b".to_string()])
        );
    }
}
