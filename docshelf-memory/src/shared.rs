//! Lock-protected collections for concurrent callers.
//!
//! [`Collection`] itself performs no locking. [`SharedCollection`] wraps one in an
//! async-aware read-write lock so that scans can run concurrently with each other while
//! every mutation, including the find-then-mutate sequence of `update_one`, runs alone.

use std::sync::Arc;
use bson::Bson;
use mea::rwlock::RwLock;

use docshelf_core::{
    backend::BackingKind,
    document::Document,
    query::Filter,
    update::{Update, UpdateResult},
};

use crate::collection::Collection;


/// A cloneable handle to a collection guarded by an async read-write lock.
///
/// Clones share the same underlying collection. Reads return owned copies of the
/// matching documents, so no lock is held once a call returns.
///
/// # Example
///
/// ```ignore
/// use bson::doc;
/// use docshelf_core::backend::BackingKind;
/// use docshelf_memory::{Collection, SharedCollection};
///
/// #[tokio::main]
/// async fn main() {
///     let activities = SharedCollection::new(Collection::new("activities", BackingKind::Sequence));
///
///     activities.insert_one(doc! { "_id": "Chess Club", "participants": [] }).await;
///     activities
///         .update_one(doc! { "_id": "Chess Club" }, doc! { "$push": { "participants": "a@x.edu" } })
///         .await;
///
///     assert_eq!(activities.count_documents(doc! { "participants": { "$in": ["a@x.edu"] } }).await, 1);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SharedCollection {
    name: Arc<str>,
    inner: Arc<RwLock<Collection>>,
}

impl SharedCollection {
    /// Wraps a collection for shared use.
    pub fn new(collection: Collection) -> Self {
        Self {
            name: Arc::from(collection.name()),
            inner: Arc::new(RwLock::new(collection)),
        }
    }

    /// Returns the name of the wrapped collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backing layout of the wrapped collection.
    pub async fn backing_kind(&self) -> BackingKind {
        self.inner.read().await.backing_kind()
    }

    /// Returns the number of stored documents.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns `true` if the collection holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// See [`Collection::find`].
    pub async fn find(&self, filter: impl Into<Filter>) -> Vec<Document> {
        let filter = filter.into();

        self.inner
            .read()
            .await
            .find(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// See [`Collection::find_one`].
    pub async fn find_one(&self, filter: impl Into<Filter>) -> Option<Document> {
        let filter = filter.into();

        self.inner
            .read()
            .await
            .find_one(filter)
            .cloned()
    }

    /// See [`Collection::count_documents`].
    pub async fn count_documents(&self, filter: impl Into<Filter>) -> usize {
        let filter = filter.into();

        self.inner.read().await.count_documents(filter)
    }

    /// See [`Collection::insert_one`].
    pub async fn insert_one(&self, document: Document) -> Bson {
        self.inner.write().await.insert_one(document)
    }

    /// See [`Collection::insert_many`].
    pub async fn insert_many(&self, documents: Vec<Document>) -> Vec<Bson> {
        self.inner.write().await.insert_many(documents)
    }

    /// See [`Collection::update_one`]. The write lock is held from lookup to mutation.
    pub async fn update_one(&self, filter: impl Into<Filter>, update: impl Into<Update>) -> UpdateResult {
        let filter = filter.into();
        let update = update.into();

        self.inner.write().await.update_one(filter, update)
    }

    /// See [`Collection::seed_if_empty`]. Emptiness is checked under the write lock.
    pub async fn seed_if_empty(&self, documents: Vec<Document>) -> bool {
        self.inner.write().await.seed_if_empty(documents)
    }

    /// Runs `f` with shared access to the collection.
    pub async fn read<R>(&self, f: impl FnOnce(&Collection) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Runs `f` with exclusive access to the collection, for read-modify-write sequences
    /// that must not interleave with other mutations.
    pub async fn write<R>(&self, f: impl FnOnce(&mut Collection) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }
}

impl From<Collection> for SharedCollection {
    fn from(collection: Collection) -> Self {
        SharedCollection::new(collection)
    }
}
