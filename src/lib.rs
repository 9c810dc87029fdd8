//! Bookstore application library
//!
//! Feature modules mounted by the `bookstore-app` binary, plus the bootstrap
//! helpers shared with integration tests.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use bookstore_kernel::{settings::Settings, ModuleRegistry};

use modules::books::store::{self, BookStore};

/// Connect the document store and register every module against it.
pub async fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let database = bookstore_db::connect(&settings.database)
        .await
        .context("failed to connect to the document store")?;

    tracing::info!(backend = database.backend_name(), "document store selected");

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store::from_database(&database));
    Ok(registry)
}

/// Build the full HTTP application around an already-chosen book store.
pub fn app_with_store(settings: &Settings, book_store: Arc<dyn BookStore>) -> Router {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, book_store);
    bookstore_http::build_router(&registry, settings)
}
