//! HTML view rendering.
//!
//! Templates are minijinja based and live as stand-alone files next to this
//! module, which keeps them easy to edit and diff. They are compiled into
//! the binary with include_str! and registered once in a shared
//! environment. Registration uses the `.html` names so minijinja applies
//! HTML auto-escaping to everything user-entered.

use minijinja::{Environment, Value};
use once_cell::sync::Lazy;

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();

    for (name, source) in [
        ("base.html", include_str!("templates/base.html")),
        ("index.html", include_str!("templates/index.html")),
        ("category_list.html", include_str!("templates/category_list.html")),
        (
            "category_detail.html",
            include_str!("templates/category_detail.html"),
        ),
        ("category_form.html", include_str!("templates/category_form.html")),
        (
            "category_delete.html",
            include_str!("templates/category_delete.html"),
        ),
        ("item_list.html", include_str!("templates/item_list.html")),
        ("item_detail.html", include_str!("templates/item_detail.html")),
        ("item_form.html", include_str!("templates/item_form.html")),
        ("item_delete.html", include_str!("templates/item_delete.html")),
        ("error.html", include_str!("templates/error.html")),
    ] {
        env.add_template(name, source).expect("Template misconfigured!");
    }

    env
});

pub fn render(name: &str, ctx: Value) -> Result<String, minijinja::Error> {
    ENV.get_template(name)?.render(ctx)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use minijinja::context;

    use super::render;
    use crate::{
        forms::{FieldError, ItemInput},
        models::{category_options, Category, CategoryView},
    };

    fn categories() -> Vec<Category> {
        vec![
            Category {
                _id: Some(bson::oid::ObjectId::new()),
                name: "Paint".to_string(),
            },
            Category {
                _id: Some(bson::oid::ObjectId::new()),
                name: "Tools".to_string(),
            },
        ]
    }

    #[test]
    fn test_index_shows_counts() {
        let page = render(
            "index.html",
            context! {
                title => "Inventory Application Home",
                item_count => 3,
                category_count => 2,
            },
        )
        .unwrap();

        assert!(page.contains("Inventory Application Home"));
        assert!(page.contains("3"));
        assert!(page.contains("2"));
    }

    #[test]
    fn test_category_form_renders_errors_and_value() {
        let errors = vec![FieldError::required("name")];

        let page = render(
            "category_form.html",
            context! {
                title => "Create Category",
                name => "Tools",
                errors => errors,
            },
        )
        .unwrap();

        assert!(page.contains("The name field must not be empty."));
        assert!(page.contains(r#"value="Tools""#));
    }

    #[test]
    fn test_item_form_preserves_values_and_selection() {
        let categories = categories();
        let selected: BTreeSet<String> =
            BTreeSet::from([categories[1]._id.unwrap().to_hex()]);

        let input = ItemInput {
            title: "Hammer".to_string(),
            summary: String::new(),
            category: selected.clone(),
        };

        let page = render(
            "item_form.html",
            context! {
                title => "Create Item",
                item => input,
                categories => category_options(&categories, &selected),
                errors => vec![FieldError::required("summary")],
            },
        )
        .unwrap();

        assert!(page.contains(r#"value="Hammer""#));
        assert!(page.contains("The summary field must not be empty."));
        assert_eq!(page.matches("checked").count(), 1);
    }

    #[test]
    fn test_user_input_is_escaped() {
        let category = Category {
            _id: Some(bson::oid::ObjectId::new()),
            name: "<script>alert(1)</script>".to_string(),
        };

        let page = render(
            "category_list.html",
            context! {
                title => "Category List",
                category_list => vec![CategoryView::from(&category)],
            },
        )
        .unwrap();

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_error_page_renders_status() {
        let page = render(
            "error.html",
            context! {
                title => "Error",
                status => 404,
                message => "Item not found",
            },
        )
        .unwrap();

        assert!(page.contains("Item not found"));
        assert!(page.contains("404"));
    }
}
