//! # MongoDB
//!
//! Document store holding the two catalog collections.
//!
//! ## Requirements
//!
//! - Two collections, `categories` and `items`
//! - Sorted listings (categories by name, items by title)
//! - Reverse lookup of the items referencing a category
//! - Batch resolution of an item's category ids
//!
//! ## Implementation
//!
//! - One explicitly constructed [`Store`] handle, passed down through the
//!   application state. Connect verifies the server with a `ping` and keeps
//!   the driver timeouts short so an unreachable deployment fails fast.
//! - Every write is a single-document operation. There is no cross-document
//!   atomicity: the category-delete dependency check and the delete itself
//!   are separate calls, so an item written in between can end up
//!   referencing a removed category.

use std::time::Duration;

use bson::{doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Collection};
use tracing::info;

use crate::{
    error::AppError,
    models::{Category, Item, CATEGORY_COLLECTION, ITEM_COLLECTION},
};

#[derive(Clone)]
pub struct Store {
    categories: Collection<Category>,
    items: Collection<Item>,
}

impl Store {
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, AppError> {
        info!("Connecting to MongoDB at {url}");

        let mut options = ClientOptions::parse(url).await?;
        options.server_selection_timeout = Some(Duration::from_secs(3));
        options.connect_timeout = Some(Duration::from_secs(3));

        let client = Client::with_options(options)?;
        let database = client.database(db_name);

        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to database '{db_name}'");

        Ok(Self {
            categories: database.collection(CATEGORY_COLLECTION),
            items: database.collection(ITEM_COLLECTION),
        })
    }

    pub async fn count_categories(&self) -> Result<u64, AppError> {
        Ok(self.categories.count_documents(doc! {}).await?)
    }

    pub async fn count_items(&self) -> Result<u64, AppError> {
        Ok(self.items.count_documents(doc! {}).await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let cursor = self
            .categories
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn get_category(&self, id: &ObjectId) -> Result<Option<Category>, AppError> {
        Ok(self.categories.find_one(doc! { "_id": *id }).await?)
    }

    /// Resolves a batch of category ids, sorted by name. Dangling ids are
    /// silently absent from the result.
    pub async fn categories_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Category>, AppError> {
        let cursor = self
            .categories
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "name": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn insert_category(&self, category: &Category) -> Result<(), AppError> {
        self.categories.insert_one(category).await?;

        Ok(())
    }

    pub async fn delete_category(&self, id: &ObjectId) -> Result<(), AppError> {
        self.categories.delete_one(doc! { "_id": *id }).await?;

        Ok(())
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, AppError> {
        let cursor = self.items.find(doc! {}).sort(doc! { "title": 1 }).await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn get_item(&self, id: &ObjectId) -> Result<Option<Item>, AppError> {
        Ok(self.items.find_one(doc! { "_id": *id }).await?)
    }

    /// All items referencing the given category, sorted by title.
    pub async fn items_in_category(&self, id: &ObjectId) -> Result<Vec<Item>, AppError> {
        let cursor = self
            .items
            .find(doc! { "category": *id })
            .sort(doc! { "title": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn insert_item(&self, item: &Item) -> Result<(), AppError> {
        self.items.insert_one(item).await?;

        Ok(())
    }

    /// Replaces the whole document, keyed by id. A missing id is a no-op.
    pub async fn update_item(&self, id: &ObjectId, item: &Item) -> Result<(), AppError> {
        self.items.replace_one(doc! { "_id": *id }, item).await?;

        Ok(())
    }

    pub async fn delete_item(&self, id: &ObjectId) -> Result<(), AppError> {
        self.items.delete_one(doc! { "_id": *id }).await?;

        Ok(())
    }
}
