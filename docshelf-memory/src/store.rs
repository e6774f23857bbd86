//! In-memory backings for collections.
//!
//! Two layouts are provided, both implementing [`DocumentBacking`]:
//!
//! - [`SequenceStore`] keeps documents in a `Vec` in insertion order.
//! - [`KeyedStore`] keeps documents in insertion-ordered slots with an identity index,
//!   so a repeated identity overwrites its slot instead of adding a document.

use std::collections::HashMap;
use bson::Bson;

use docshelf_core::{
    backend::{BackingKind, DocumentBacking},
    document::{Document, DocumentId, ID_FIELD},
};


fn identity_of(document: &Document) -> DocumentId {
    document
        .get(ID_FIELD)
        .map(DocumentId::from)
        .unwrap_or(DocumentId::Null)
}


/// Insertion-ordered document list.
///
/// Identity lookups scan for the first document with a matching `_id`. Duplicate
/// identities are kept.
#[derive(Debug, Default, Clone)]
pub struct SequenceStore {
    documents: Vec<Document>,
}

impl SequenceStore {
    /// Creates an empty sequence store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence store with room for `capacity` documents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { documents: Vec::with_capacity(capacity) }
    }
}

impl DocumentBacking for SequenceStore {
    fn kind(&self) -> BackingKind {
        BackingKind::Sequence
    }

    fn scan(&self) -> Box<dyn Iterator<Item = &Document> + '_> {
        Box::new(self.documents.iter())
    }

    fn scan_mut(&mut self) -> Box<dyn Iterator<Item = &mut Document> + '_> {
        Box::new(self.documents.iter_mut())
    }

    fn lookup_by_id(&self, id: &Bson) -> Option<&Document> {
        let key = DocumentId::from(id);

        self.documents
            .iter()
            .find(|document| identity_of(document) == key)
    }

    fn lookup_by_id_mut(&mut self, id: &Bson) -> Option<&mut Document> {
        let key = DocumentId::from(id);

        self.documents
            .iter_mut()
            .find(|document| identity_of(document) == key)
    }

    fn insert(&mut self, document: Document) {
        self.documents.push(document);
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}


/// Identity-keyed document store.
///
/// Scans visit documents in the order their identity was first inserted. Inserting a
/// document with an identity that is already stored replaces the stored document in its
/// existing slot.
#[derive(Debug, Default, Clone)]
pub struct KeyedStore {
    documents: Vec<Document>,
    index: HashMap<DocumentId, usize>,
}

impl KeyedStore {
    /// Creates an empty keyed store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty keyed store with room for `capacity` documents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }
}

impl DocumentBacking for KeyedStore {
    fn kind(&self) -> BackingKind {
        BackingKind::Keyed
    }

    fn scan(&self) -> Box<dyn Iterator<Item = &Document> + '_> {
        Box::new(self.documents.iter())
    }

    fn scan_mut(&mut self) -> Box<dyn Iterator<Item = &mut Document> + '_> {
        Box::new(self.documents.iter_mut())
    }

    fn lookup_by_id(&self, id: &Bson) -> Option<&Document> {
        self.index
            .get(&DocumentId::from(id))
            .and_then(|slot| self.documents.get(*slot))
    }

    fn lookup_by_id_mut(&mut self, id: &Bson) -> Option<&mut Document> {
        match self.index.get(&DocumentId::from(id)) {
            Some(slot) => self.documents.get_mut(*slot),
            None => None,
        }
    }

    fn insert(&mut self, document: Document) {
        let key = identity_of(&document);

        if let Some(existing) = self
            .index
            .get(&key)
            .and_then(|slot| self.documents.get_mut(*slot))
        {
            *existing = document;
            return;
        }

        self.index.insert(key, self.documents.len());
        self.documents.push(document);
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}
