//! Main docshelf crate: an in-process JSON document store with a Mongo-style query
//! interface.
//!
//! This crate is the primary entry point. It re-exports the data model and query
//! language from `docshelf-core`, the collections from `docshelf-memory`, and, with the
//! `school` feature, the school activities store.
//!
//! # Features
//!
//! - **Schemaless documents** - Store any [`bson::Document`]; only `_id` is interpreted
//! - **Mongo-style queries** - Equality, `$in`, `$gte` and `$lte`, combined conjunctively
//! - **Mongo-style updates** - `$set` and `$push` on the first matching document
//! - **Two backings** - Insertion-ordered sequence or identity-keyed storage
//!
//! # Quick Start
//!
//! ```ignore
//! use docshelf::{prelude::*, bson::doc};
//!
//! let mut activities = Collection::builder("activities")
//!     .backing(BackingKind::Keyed)
//!     .build();
//!
//! activities.seed_if_empty([
//!     doc! { "_id": "Chess Club", "max_participants": 12, "participants": [] },
//!     doc! { "_id": "Art Club", "max_participants": 15, "participants": [] },
//! ]);
//!
//! activities.update_one(
//!     doc! { "_id": "Chess Club" },
//!     doc! { "$push": { "participants": "zoe@mergington.edu" } },
//! );
//!
//! let enrolled = activities.count_documents(doc! {
//!     "participants": { "$in": ["zoe@mergington.edu"] },
//! });
//! assert_eq!(enrolled, 1);
//! ```
//!
//! # Sharing a collection
//!
//! A [`Collection`](memory::Collection) needs `&mut` access to mutate. To share one between
//! tasks, wrap it in a [`SharedCollection`](memory::SharedCollection):
//!
//! ```ignore
//! use docshelf::{prelude::*, bson::doc};
//!
//! #[tokio::main]
//! async fn main() {
//!     let teachers = SharedCollection::new(Collection::new("teachers", BackingKind::Keyed));
//!
//!     let handle = teachers.clone();
//!     tokio::spawn(async move {
//!         handle.insert_one(doc! { "_id": "mchen", "role": "teacher" }).await;
//!     })
//!     .await
//!     .unwrap();
//!
//!     assert!(teachers.find_one(doc! { "_id": "mchen" }).await.is_some());
//! }
//! ```

pub mod prelude;

pub use docshelf_core::{backend, document, error, query, update};

// Re-export BSON types for convenience
pub use bson;

/// In-memory collections and storage layouts.
pub mod memory {
    pub use docshelf_memory::{Collection, CollectionBuilder, KeyedStore, SequenceStore, SharedCollection};
}

/// The school activities store.
///
/// This module is only available when the `school` feature is enabled.
#[cfg(feature = "school")]
pub mod school {
    pub use docshelf_school::*;
}
