use std::sync::Arc;

use axum::{
    extract::{Path, RawForm, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use bson::oid::ObjectId;
use minijinja::context;
use tokio::try_join;

use super::parse_id;
use crate::{
    error::AppError,
    forms::{FieldError, ItemDeleteInput, ItemInput},
    models::{category_options, item_url, selected_ids, Category, CategoryView, Item, ItemView},
    state::AppState,
    templates,
};

pub async fn item_list(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let items = state.store.list_items().await?;
    let item_list: Vec<ItemView> = items.iter().map(ItemView::from).collect();

    Ok(Html(templates::render(
        "item_list.html",
        context! {
            title => "Item List",
            item_list => item_list,
        },
    )?))
}

pub async fn item_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id, "Item")?;

    let item = state
        .store
        .get_item(&id)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    let categories = state.store.categories_by_ids(&item.category).await?;
    let categories: Vec<CategoryView> = categories.iter().map(CategoryView::from).collect();

    Ok(Html(templates::render(
        "item_detail.html",
        context! {
            title => item.title.clone(),
            item => ItemView::from(&item),
            categories => categories,
        },
    )?))
}

fn form_page(
    title: &str,
    input: &ItemInput,
    categories: &[Category],
    errors: &[FieldError],
) -> Result<Html<String>, AppError> {
    Ok(Html(templates::render(
        "item_form.html",
        context! {
            title => title,
            item => input,
            categories => category_options(categories, &input.category),
            errors => errors,
        },
    )?))
}

pub async fn item_create_get(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let categories = state.store.list_categories().await?;

    form_page("Create Item", &ItemInput::default(), &categories, &[])
}

pub async fn item_create_post(
    State(state): State<Arc<AppState>>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let input = ItemInput::from_body(&body).map_err(|_| AppError::MalformedPayload)?;
    let categories = state.store.list_categories().await?;

    let errors = input.validate();
    if !errors.is_empty() {
        return Ok(form_page("Create Item", &input, &categories, &errors)?.into_response());
    }

    let id = ObjectId::new();
    let item = Item {
        _id: Some(id),
        title: input.title,
        summary: input.summary,
        category: selected_ids(&categories, &input.category),
    };

    state.store.insert_item(&item).await?;

    Ok(Redirect::to(&item_url(&id)).into_response())
}

pub async fn item_update_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id, "Item")?;

    let (item, categories) = try_join!(state.store.get_item(&id), state.store.list_categories())?;
    let item = item.ok_or(AppError::NotFound("Item"))?;

    let input = ItemInput {
        title: item.title,
        summary: item.summary,
        category: item.category.iter().map(|id| id.to_hex()).collect(),
    };

    form_page("Update Item", &input, &categories, &[])
}

pub async fn item_update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let id = parse_id(&id, "Item")?;

    let input = ItemInput::from_body(&body).map_err(|_| AppError::MalformedPayload)?;
    let categories = state.store.list_categories().await?;

    let errors = input.validate();
    if !errors.is_empty() {
        return Ok(form_page("Update Item", &input, &categories, &errors)?.into_response());
    }

    // Same id, new contents.
    let item = Item {
        _id: Some(id),
        title: input.title,
        summary: input.summary,
        category: selected_ids(&categories, &input.category),
    };

    state.store.update_item(&id, &item).await?;

    Ok(Redirect::to(&item_url(&id)).into_response())
}

pub async fn item_delete_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id, "Item")?;

    let item = state
        .store
        .get_item(&id)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    Ok(Html(templates::render(
        "item_delete.html",
        context! {
            title => "Delete Item",
            item => ItemView::from(&item),
        },
    )?))
}

pub async fn item_delete_post(
    State(state): State<Arc<AppState>>,
    Form(input): Form<ItemDeleteInput>,
) -> Result<Response, AppError> {
    let id = parse_id(&input.itemid, "Item")?;

    // No dependency check here; items are leaves.
    state.store.delete_item(&id).await?;

    Ok(Redirect::to("/catalog/items").into_response())
}
