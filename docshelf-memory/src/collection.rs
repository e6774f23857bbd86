//! Collections: named document sets with a Mongo-style query interface.
//!
//! A [`Collection`] owns a [`DocumentBacking`] and exposes `find`, `find_one`,
//! `insert_one`, `insert_many`, `update_one` and `count_documents` on top of it.
//! Operations never fail; an unmatched query produces an empty result or `None`, and an
//! unmatched update does nothing.
//!
//! # Example
//!
//! ```ignore
//! use bson::doc;
//! use docshelf_core::backend::BackingKind;
//! use docshelf_memory::Collection;
//!
//! let mut teachers = Collection::builder("teachers")
//!     .backing(BackingKind::Keyed)
//!     .build();
//!
//! teachers.insert_one(doc! { "_id": "mchen", "display_name": "Mr. Chen" });
//! teachers.update_one(doc! { "_id": "mchen" }, doc! { "$set": { "role": "teacher" } });
//!
//! assert_eq!(teachers.count_documents(doc! { "role": "teacher" }), 1);
//! ```

use bson::Bson;
use tracing::{debug, trace};

use docshelf_core::{
    backend::{BackingKind, DocumentBacking},
    document::{Document, DocumentId, ensure_id},
    query::Filter,
    update::{Update, UpdateResult},
};

use crate::{
    evaluator::DocumentEvaluator,
    store::{KeyedStore, SequenceStore},
};


/// A named, in-memory set of documents.
///
/// Mutating operations take `&mut self`; share a collection between tasks through
/// [`SharedCollection`](crate::SharedCollection).
#[derive(Debug)]
pub struct Collection {
    name: String,
    backing: Box<dyn DocumentBacking>,
}

impl Collection {
    /// Creates an empty collection with the given backing layout.
    pub fn new(name: impl Into<String>, kind: BackingKind) -> Self {
        Collection::builder(name).backing(kind).build()
    }

    /// Creates a collection over a custom backing.
    pub fn with_backing(name: impl Into<String>, backing: impl DocumentBacking + 'static) -> Self {
        Self {
            name: name.into(),
            backing: Box::new(backing),
        }
    }

    /// Creates a builder for a collection with the given name.
    pub fn builder(name: impl Into<String>) -> CollectionBuilder {
        CollectionBuilder::new(name)
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backing layout of this collection.
    pub fn backing_kind(&self) -> BackingKind {
        self.backing.kind()
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.backing.len()
    }

    /// Returns `true` if the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.backing.is_empty()
    }

    /// Iterates over every stored document in scan order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.backing.scan()
    }

    /// Returns every document matching `filter`, in scan order.
    ///
    /// Scan order is insertion order for both backings. An empty filter matches all
    /// documents.
    pub fn find(&self, filter: impl Into<Filter>) -> Vec<&Document> {
        let filter = filter.into();

        let found = self
            .backing
            .scan()
            .filter(|document| DocumentEvaluator::new(document).matches(&filter))
            .collect::<Vec<_>>();

        trace!(collection = %self.name, matched = found.len(), "find");
        found
    }

    /// Returns the first document matching `filter`.
    ///
    /// When the filter pins an identity (an equality clause on `_id`) the document is
    /// resolved by identity lookup alone and the remaining clauses are not evaluated.
    pub fn find_one(&self, filter: impl Into<Filter>) -> Option<&Document> {
        let filter = filter.into();

        match filter.identity() {
            Some(id) => self.backing.lookup_by_id(id),
            None => self
                .backing
                .scan()
                .find(|document| DocumentEvaluator::new(document).matches(&filter)),
        }
    }

    /// Stores a document and returns its identity.
    ///
    /// A document without an `_id` is given a generated one. In a keyed collection a
    /// document with an existing identity replaces the stored one.
    pub fn insert_one(&mut self, mut document: Document) -> Bson {
        let id = ensure_id(&mut document);

        debug!(collection = %self.name, id = %DocumentId::from(&id), "insert_one");
        self.backing.insert(document);

        id
    }

    /// Stores each document in order via [`insert_one`](Self::insert_one) and returns
    /// their identities.
    pub fn insert_many(&mut self, documents: impl IntoIterator<Item = Document>) -> Vec<Bson> {
        documents
            .into_iter()
            .map(|document| self.insert_one(document))
            .collect()
    }

    /// Applies `update` to the first document [`find_one`](Self::find_one) would return.
    ///
    /// When nothing matches the collection is left untouched.
    pub fn update_one(&mut self, filter: impl Into<Filter>, update: impl Into<Update>) -> UpdateResult {
        let filter = filter.into();
        let update = update.into();

        let target = match filter.identity() {
            Some(id) => self.backing.lookup_by_id_mut(id),
            None => self
                .backing
                .scan_mut()
                .find(|document| DocumentEvaluator::new(document).matches(&filter)),
        };

        let Some(document) = target else {
            trace!(collection = %self.name, "update_one matched nothing");
            return UpdateResult::default();
        };

        let modified = update.apply(document);
        debug!(collection = %self.name, modified, "update_one");

        UpdateResult { matched: true, modified }
    }

    /// Returns the number of documents [`find`](Self::find) would return.
    pub fn count_documents(&self, filter: impl Into<Filter>) -> usize {
        self.find(filter).len()
    }

    /// Inserts `documents` if, and only if, the collection is empty.
    ///
    /// Returns `true` if the documents were inserted.
    pub fn seed_if_empty(&mut self, documents: impl IntoIterator<Item = Document>) -> bool {
        if !self.is_empty() {
            debug!(collection = %self.name, existing = self.len(), "collection already populated; skipping seed");
            return false;
        }

        let inserted = self.insert_many(documents).len();
        debug!(collection = %self.name, inserted, "seeded collection");

        true
    }
}


/// Builder for constructing [`Collection`] instances.
///
/// # Example
///
/// ```ignore
/// use docshelf_core::backend::BackingKind;
/// use docshelf_memory::Collection;
///
/// let activities = Collection::builder("activities")
///     .backing(BackingKind::Sequence)
///     .capacity(16)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    name: String,
    kind: BackingKind,
    capacity: usize,
}

impl CollectionBuilder {
    /// Creates a builder for a sequence-backed collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BackingKind::default(),
            capacity: 0,
        }
    }

    /// Sets the backing layout.
    pub fn backing(mut self, kind: BackingKind) -> Self {
        self.kind = kind;
        self
    }

    /// Reserves room for `capacity` documents up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the collection.
    pub fn build(self) -> Collection {
        match self.kind {
            BackingKind::Sequence => {
                Collection::with_backing(self.name, SequenceStore::with_capacity(self.capacity))
            }
            BackingKind::Keyed => {
                Collection::with_backing(self.name, KeyedStore::with_capacity(self.capacity))
            }
        }
    }
}
