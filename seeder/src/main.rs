//! Populates a store with some test categories and items.
//!
//! ```sh
//! cargo run -p seeder -- "mongodb://localhost:27017"
//! ```

use anyhow::Result;
use bson::oid::ObjectId;
use clap::Parser;

use server::{
    database::Store,
    models::{Category, Item},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// MongoDB connection string, e.g. mongodb://localhost:27017
    database_url: String,

    /// Database to populate
    #[arg(long, default_value = "inventory")]
    database_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("About to connect");
    let store = Store::connect(&args.database_url, &args.database_name).await?;

    let categories = create_categories(&store).await?;
    create_items(&store, &categories).await?;

    println!("Done");
    Ok(())
}

async fn create_categories(store: &Store) -> Result<[Category; 2]> {
    println!("Adding categories");

    let first = category_create(store, "Category 1").await?;
    let second = category_create(store, "Category 2").await?;

    Ok([first, second])
}

async fn create_items(store: &Store, categories: &[Category; 2]) -> Result<()> {
    println!("Adding items");

    item_create(
        store,
        "Test Item 1",
        "Summary of Test Item 1.",
        &[&categories[0]],
    )
    .await?;

    item_create(
        store,
        "Test Item 2",
        "Summary of Test Item 2.",
        &[&categories[0], &categories[1]],
    )
    .await?;

    Ok(())
}

async fn category_create(store: &Store, name: &str) -> Result<Category> {
    let category = Category {
        _id: Some(ObjectId::new()),
        name: name.to_string(),
    };

    store.insert_category(&category).await?;
    println!("Added category: {name}");

    Ok(category)
}

async fn item_create(
    store: &Store,
    title: &str,
    summary: &str,
    categories: &[&Category],
) -> Result<()> {
    let item = Item {
        _id: Some(ObjectId::new()),
        title: title.to_string(),
        summary: summary.to_string(),
        category: categories.iter().filter_map(|category| category._id).collect(),
    };

    store.insert_item(&item).await?;
    println!("Added item: {title}");

    Ok(())
}
