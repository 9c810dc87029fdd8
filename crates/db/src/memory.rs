//! Process-local document collection.

use tokio::sync::RwLock;
use uuid::Uuid;

/// An insertion-ordered collection of documents keyed by generated ids.
///
/// Each operation takes the lock once, so single-document inserts and
/// deletes are atomic with respect to each other.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    documents: RwLock<Vec<(String, T)>>,
}

impl<T: Clone> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Store `document` under a freshly generated id and return the id.
    pub async fn insert(&self, document: T) -> String {
        let id = Uuid::now_v7().simple().to_string();
        self.documents.write().await.push((id.clone(), document));
        id
    }

    /// All documents in insertion order.
    pub async fn find_all(&self) -> Vec<(String, T)> {
        self.documents.read().await.clone()
    }

    /// Remove the document with `id`, returning it if it existed.
    pub async fn find_by_id_and_delete(&self, id: &str) -> Option<T> {
        let mut documents = self.documents.write().await;
        let index = documents.iter().position(|(doc_id, _)| doc_id == id)?;
        Some(documents.remove(index).1)
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Clone> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_unique_and_order_is_preserved() {
        let collection = MemoryCollection::new();
        let a = collection.insert("a").await;
        let b = collection.insert("b").await;

        assert_ne!(a, b);
        assert!(!a.is_empty());

        let all = collection.find_all().await;
        assert_eq!(all, vec![(a, "a"), (b, "b")]);
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let collection = MemoryCollection::new();
        let id = collection.insert(42).await;

        assert_eq!(collection.find_by_id_and_delete(&id).await, Some(42));
        assert_eq!(collection.find_by_id_and_delete(&id).await, None);
        assert!(collection.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_id_leaves_collection_untouched() {
        let collection = MemoryCollection::new();
        collection.insert("kept").await;

        assert_eq!(collection.find_by_id_and_delete("missing").await, None);
        assert_eq!(collection.len().await, 1);
    }
}
