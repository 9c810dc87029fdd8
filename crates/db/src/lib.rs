//! Document store client factory.
//!
//! [`connect`] turns [`DatabaseSettings`] into a [`Database`] handle. Feature
//! modules open their own collections from it; the in-memory variant hands
//! out [`MemoryCollection`]s instead of driver collections.

use anyhow::Context;
use bookstore_kernel::settings::{DatabaseBackend, DatabaseSettings};

pub mod memory;

pub use memory::MemoryCollection;

/// Handle to the configured document store.
#[derive(Clone, Debug)]
pub enum Database {
    Mongo(mongodb::Database),
    Memory,
}

impl Database {
    /// Short backend label for logs.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Database::Mongo(_) => "mongo",
            Database::Memory => "memory",
        }
    }
}

/// Establish the document store handle described by `settings`.
///
/// The MongoDB driver connects lazily, so an unreachable server surfaces as
/// a store error on the first request rather than at startup.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    match settings.backend {
        DatabaseBackend::Memory => {
            tracing::warn!(
                target: "bookstore-db",
                "using in-memory document store; data will not survive a restart"
            );
            Ok(Database::Memory)
        }
        DatabaseBackend::Mongo => {
            let client = mongodb::Client::with_uri_str(&settings.endpoint)
                .await
                .with_context(|| format!("invalid MongoDB endpoint '{}'", settings.endpoint))?;

            tracing::info!(
                target: "bookstore-db",
                endpoint = %settings.endpoint,
                database = %settings.name,
                "document store client ready"
            );

            Ok(Database::Mongo(client.database(&settings.name)))
        }
    }
}
