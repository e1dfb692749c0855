use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use bson::oid::ObjectId;
use minijinja::context;
use tokio::try_join;

use super::parse_id;
use crate::{
    error::AppError,
    forms::{CategoryDeleteInput, CategoryInput},
    models::{category_url, Category, CategoryView, Item, ItemView},
    state::AppState,
    templates,
};

pub async fn category_list(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let categories = state.store.list_categories().await?;
    let category_list: Vec<CategoryView> = categories.iter().map(CategoryView::from).collect();

    Ok(Html(templates::render(
        "category_list.html",
        context! {
            title => "Category List",
            category_list => category_list,
        },
    )?))
}

pub async fn category_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id, "Category")?;

    let (category, items) = try_join!(
        state.store.get_category(&id),
        state.store.items_in_category(&id)
    )?;

    let category = category.ok_or(AppError::NotFound("Category"))?;
    let items: Vec<ItemView> = items.iter().map(ItemView::from).collect();

    Ok(Html(templates::render(
        "category_detail.html",
        context! {
            title => category.name.clone(),
            category => CategoryView::from(&category),
            items => items,
        },
    )?))
}

pub async fn category_create_get() -> Result<Html<String>, AppError> {
    Ok(Html(templates::render(
        "category_form.html",
        context! {
            title => "Create Category",
            name => "",
        },
    )?))
}

pub async fn category_create_post(
    State(state): State<Arc<AppState>>,
    Form(input): Form<CategoryInput>,
) -> Result<Response, AppError> {
    let input = input.sanitize();
    let errors = input.validate();

    if !errors.is_empty() {
        let page = templates::render(
            "category_form.html",
            context! {
                title => "Create Category",
                name => input.name,
                errors => errors,
            },
        )?;

        return Ok(Html(page).into_response());
    }

    let id = ObjectId::new();
    let category = Category {
        _id: Some(id),
        name: input.name,
    };

    state.store.insert_category(&category).await?;

    Ok(Redirect::to(&category_url(&id)).into_response())
}

fn confirmation_page(category: &Category, items: &[Item]) -> Result<Html<String>, AppError> {
    let items: Vec<ItemView> = items.iter().map(ItemView::from).collect();

    Ok(Html(templates::render(
        "category_delete.html",
        context! {
            title => "Delete Category",
            category => CategoryView::from(category),
            items => items,
        },
    )?))
}

pub async fn category_delete_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id, "Category")?;

    let (category, items) = try_join!(
        state.store.get_category(&id),
        state.store.items_in_category(&id)
    )?;
    let category = category.ok_or(AppError::NotFound("Category"))?;

    confirmation_page(&category, &items)
}

pub async fn category_delete_post(
    State(state): State<Arc<AppState>>,
    Form(input): Form<CategoryDeleteInput>,
) -> Result<Response, AppError> {
    let id = parse_id(&input.categoryid, "Category")?;

    let (category, items) = try_join!(
        state.store.get_category(&id),
        state.store.items_in_category(&id)
    )?;
    let category = category.ok_or(AppError::NotFound("Category"))?;

    if !items.is_empty() {
        // Still referenced; show the confirmation again with the blockers.
        return Ok(confirmation_page(&category, &items)?.into_response());
    }

    // The emptiness check above and this delete are separate store calls,
    // so an item written in between can end up referencing a dead category.
    state.store.delete_category(&id).await?;

    Ok(Redirect::to("/catalog/categories").into_response())
}

pub async fn category_update_get() -> &'static str {
    "NOT IMPLEMENTED: Category update GET"
}

pub async fn category_update_post() -> &'static str {
    "NOT IMPLEMENTED: Category update POST"
}

#[cfg(test)]
mod tests {
    use super::{category_update_get, category_update_post};

    #[tokio::test]
    async fn test_update_is_a_stub() {
        assert_eq!(category_update_get().await, "NOT IMPLEMENTED: Category update GET");
        assert_eq!(category_update_post().await, "NOT IMPLEMENTED: Category update POST");
    }
}
