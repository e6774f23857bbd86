//! Convenient re-exports of commonly used types from docshelf.
//!
//! ```ignore
//! use docshelf::prelude::*;
//! ```

pub use docshelf_core::{
    backend::{BackingKind, DocumentBacking},
    document::{Document, DocumentId, Record, RecordExt, ID_FIELD, ensure_id, to_json},
    query::{Clause, Filter, QueryVisitor},
    update::{Update, UpdateResult},
    error::{DocumentStoreError, DocumentStoreResult},
};

pub use docshelf_memory::{Collection, CollectionBuilder, SharedCollection};
