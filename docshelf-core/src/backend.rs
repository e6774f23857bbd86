//! Storage backing abstraction for collections.
//!
//! A collection keeps its documents in a backing chosen at construction time. Every
//! backing offers the same small capability set through [`DocumentBacking`]: ordered
//! scans, identity lookups and insertion.
//!
//! # Backings
//!
//! - [`BackingKind::Sequence`]: an insertion-ordered list. Inserting a document whose
//!   identity is already present adds a second document with that identity.
//! - [`BackingKind::Keyed`]: a mapping keyed on the identity field. Inserting a document
//!   whose identity is already present replaces the stored document.

use bson::Bson;
use std::fmt::Debug;

use crate::document::Document;

/// Selects the storage layout of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackingKind {
    /// Insertion-ordered list; identities are not deduplicated.
    #[default]
    Sequence,
    /// Identity-keyed mapping; inserts overwrite (last write wins).
    Keyed,
}

/// Capability interface shared by all document backings.
///
/// Implementations perform no locking. Callers that share a backing between threads
/// must serialize mutations themselves.
pub trait DocumentBacking: Send + Sync + Debug {
    /// Returns the layout of this backing.
    fn kind(&self) -> BackingKind;

    /// Iterates over all documents in a stable order.
    fn scan(&self) -> Box<dyn Iterator<Item = &Document> + '_>;

    /// Iterates mutably over all documents in the same order as [`scan`](Self::scan).
    fn scan_mut(&mut self) -> Box<dyn Iterator<Item = &mut Document> + '_>;

    /// Returns the first document whose identity equals `id`.
    fn lookup_by_id(&self, id: &Bson) -> Option<&Document>;

    /// Mutable variant of [`lookup_by_id`](Self::lookup_by_id).
    fn lookup_by_id_mut(&mut self, id: &Bson) -> Option<&mut Document>;

    /// Stores a document. The document is expected to carry an identity field.
    fn insert(&mut self, document: Document);

    /// Returns the number of stored documents.
    fn len(&self) -> usize;

    /// Returns `true` if no documents are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
