//! Persistence seam for the books module.
//!
//! Handlers only ever talk to a [`BookStore`]; which document store sits
//! behind it is decided once at startup by [`from_database`].

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bookstore_db::{Database, MemoryCollection};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

use super::models::{Book, NewBook};

const COLLECTION: &str = "books";

/// List/insert/delete access to stored books.
///
/// Each call touches a single document; there are no cross-document
/// transactions.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every stored book, in the store's natural order.
    async fn list(&self) -> anyhow::Result<Vec<Book>>;

    /// Persist `book` and return it with its new identifier.
    async fn insert(&self, book: NewBook) -> anyhow::Result<Book>;

    /// Remove the book with `id`. `Ok(None)` means nothing matched.
    async fn delete(&self, id: &str) -> anyhow::Result<Option<Book>>;
}

/// Build the store matching the configured backend.
pub fn from_database(database: &Database) -> Arc<dyn BookStore> {
    match database {
        Database::Mongo(db) => Arc::new(MongoBookStore::new(db.collection(COLLECTION))),
        Database::Memory => Arc::new(MemoryBookStore::new()),
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: MemoryCollection<NewBook>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        Ok(self
            .books
            .find_all()
            .await
            .into_iter()
            .map(|(id, book)| book.with_id(id))
            .collect())
    }

    async fn insert(&self, book: NewBook) -> anyhow::Result<Book> {
        let id = self.books.insert(book.clone()).await;
        Ok(book.with_id(id))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<Option<Book>> {
        Ok(self
            .books
            .find_by_id_and_delete(id)
            .await
            .map(|book| book.with_id(id)))
    }
}

/// Book as laid out in a MongoDB collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    description: String,
    price: f64,
    quantity: i64,
    image_url: String,
}

impl From<NewBook> for BookDocument {
    fn from(book: NewBook) -> Self {
        Self {
            id: None,
            title: book.title,
            description: book.description,
            price: book.price,
            quantity: book.quantity,
            image_url: book.image_url,
        }
    }
}

impl BookDocument {
    fn into_book(self) -> anyhow::Result<Book> {
        let id = self
            .id
            .context("stored book document has no _id")?
            .to_hex();

        Ok(Book {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            image_url: self.image_url,
        })
    }
}

/// Store backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoBookStore {
    collection: mongodb::Collection<BookDocument>,
}

impl MongoBookStore {
    fn new(collection: mongodb::Collection<BookDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        let documents: Vec<BookDocument> = self
            .collection
            .find(doc! {})
            .await
            .context("failed to query books")?
            .try_collect()
            .await
            .context("failed to read book cursor")?;

        documents.into_iter().map(BookDocument::into_book).collect()
    }

    async fn insert(&self, book: NewBook) -> anyhow::Result<Book> {
        let mut document = BookDocument::from(book);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .context("failed to insert book")?;

        document.id = Some(
            result
                .inserted_id
                .as_object_id()
                .context("store returned a non-ObjectId identifier")?,
        );
        document.into_book()
    }

    async fn delete(&self, id: &str) -> anyhow::Result<Option<Book>> {
        // An id that cannot be an ObjectId cannot match any document.
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await
            .context("failed to delete book")?
            .map(BookDocument::into_book)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            description: "desc".to_string(),
            price: 12.5,
            quantity: 3,
            image_url: "http://img/1.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryBookStore::new();
        let created = store.insert(new_book("Dune")).await.unwrap();
        assert!(!created.id.is_empty());

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let deleted = store.delete(&created.id).await.unwrap();
        assert_eq!(deleted, Some(created.clone()));
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.delete(&created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_store_keeps_insertion_order() {
        let store = MemoryBookStore::new();
        let first = store.insert(new_book("first")).await.unwrap();
        let second = store.insert(new_book("second")).await.unwrap();

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn document_conversion_uses_hex_object_id() {
        let oid = ObjectId::new();
        let document = BookDocument {
            id: Some(oid),
            ..BookDocument::from(new_book("Emma"))
        };

        let book = document.into_book().unwrap();
        assert_eq!(book.id, oid.to_hex());
        assert_eq!(book.title, "Emma");
    }

    #[tokio::test]
    async fn mongo_delete_with_malformed_id_matches_nothing() {
        // The driver connects lazily; a malformed id returns before any I/O.
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let store =
            MongoBookStore::new(client.database("bookstore_test").collection(COLLECTION));

        assert_eq!(store.delete("never-created").await.unwrap(), None);
    }

    #[test]
    fn document_without_id_is_an_error() {
        assert!(BookDocument::from(new_book("Emma")).into_book().is_err());
    }
}
