//! In-memory collections for docshelf.
//!
//! This crate provides the query engine and the storage layouts behind a docshelf
//! collection, plus a lock-protected handle for sharing a collection between tasks.
//!
//! # Features
//!
//! - **Two backings** - Insertion-ordered [`SequenceStore`] and identity-keyed [`KeyedStore`]
//! - **Mongo-style operations** - `find`, `find_one`, `insert_one`, `insert_many`,
//!   `update_one` and `count_documents` on [`Collection`]
//! - **Lenient matching** - Equality, `$in`, `$gte` and `$lte` clauses; unknown operators are ignored
//! - **Shared access** - [`SharedCollection`] serializes mutations behind an async-aware RwLock
//!
//! # Quick Start
//!
//! ```ignore
//! use bson::doc;
//! use docshelf_core::backend::BackingKind;
//! use docshelf_memory::Collection;
//!
//! let mut announcements = Collection::new("announcements", BackingKind::Sequence);
//!
//! announcements.insert_many([
//!     doc! { "title": "Welcome Back Students!", "expiration_date": "2026-02-28" },
//!     doc! { "title": "Spring Activities Fair", "expiration_date": "2026-03-15" },
//! ]);
//!
//! let current = announcements.find(doc! { "expiration_date": { "$gte": "2026-03-01" } });
//! assert_eq!(current.len(), 1);
//! ```

pub mod collection;
pub mod evaluator;
pub mod shared;
pub mod store;

pub use collection::{Collection, CollectionBuilder};
pub use shared::SharedCollection;
pub use store::{KeyedStore, SequenceStore};
