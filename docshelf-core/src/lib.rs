//! The core of the docshelf project: the data model and the query language shared by
//! every collection implementation.
//!
//! This crate provides:
//!
//! - **Documents** ([`document`]) - The document type, identities and typed records
//! - **Filters** ([`query`]) - The query descriptor AST and its lenient parser
//! - **Updates** ([`update`]) - The `$set` / `$push` update descriptor
//! - **Storage abstraction** ([`backend`]) - The capability trait implemented by backings
//! - **Error handling** ([`error`]) - Error and result types for the fallible edges
//!
//! # Example
//!
//! ```ignore
//! use bson::doc;
//! use docshelf_core::query::Filter;
//!
//! // Both forms describe the same query.
//! let parsed = Filter::from_document(&doc! { "expiration_date": { "$gte": "2026-03-01" } });
//! let built = Filter::new().gte("expiration_date", "2026-03-01");
//!
//! assert_eq!(parsed, built);
//! ```

pub mod backend;
pub mod document;
pub mod error;
pub mod query;
pub mod update;
