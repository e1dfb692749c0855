//! Request handlers.
//!
//! One function per verb/path pair, stateless apart from the shared store
//! handle. Validation failures re-render the originating form with HTTP 200;
//! missing resources surface as [`AppError::NotFound`].

pub mod categories;
pub mod items;

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use bson::oid::ObjectId;
use minijinja::context;
use tokio::try_join;

use crate::{error::AppError, state::AppState, templates};

pub async fn home() -> Redirect {
    Redirect::permanent("/catalog")
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let (item_count, category_count) =
        try_join!(state.store.count_items(), state.store.count_categories())?;

    Ok(Html(templates::render(
        "index.html",
        context! {
            title => "Inventory Application Home",
            item_count => item_count,
            category_count => category_count,
        },
    )?))
}

/// A path segment that does not parse as an id cannot name a stored
/// document, so it gets the same treatment as a missing one.
fn parse_id(id: &str, what: &'static str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::NotFound(what))
}

#[cfg(test)]
mod tests {
    use super::parse_id;
    use crate::error::AppError;

    #[test]
    fn test_valid_id_parses() {
        assert!(parse_id("657f1f77bcf86cd799439011", "Item").is_ok());
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        assert!(matches!(
            parse_id("not-an-id", "Item"),
            Err(AppError::NotFound("Item"))
        ));
    }
}
