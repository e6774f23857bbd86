//! Update descriptors.
//!
//! An [`Update`] carries the `$set` assignments and `$push` appends of a Mongo-style
//! update descriptor. Assignments are applied before appends, each group in the order it
//! was written.

use bson::{Bson, Document};
use tracing::warn;

use crate::document::ID_FIELD;

/// Outcome of an update operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// A document matched the filter.
    pub matched: bool,
    /// The matched document changed.
    pub modified: bool,
}

/// An in-place mutation of a single document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Vec<(String, Bson)>,
    push: Vec<(String, Bson)>,
}

impl Update {
    /// Creates an update that changes nothing.
    pub fn new() -> Self {
        Update::default()
    }

    /// Adds a `$set` assignment, overwriting or creating `field`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.set.push((field.into(), value.into()));
        self
    }

    /// Adds a `$push` append to the array in `field`, creating it when absent.
    pub fn push(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push.push((field.into(), value.into()));
        self
    }

    /// Returns `true` if applying this update can never change a document.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.push.is_empty()
    }

    /// Parses an update descriptor.
    ///
    /// Only `$set` and `$push` are recognised. Other top-level keys, and operands that
    /// are not documents, are ignored.
    pub fn from_document(descriptor: &Document) -> Self {
        let mut update = Update::new();

        if let Ok(assignments) = descriptor.get_document("$set") {
            update.set.extend(assignments.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        if let Ok(appends) = descriptor.get_document("$push") {
            update.push.extend(appends.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        update
    }

    /// Applies this update to `document` in place.
    ///
    /// The identity field is never touched. `$push` requires the target field to be an
    /// array or absent; a present non-array value is left as it is.
    ///
    /// Returns `true` if the document changed.
    pub fn apply(&self, document: &mut Document) -> bool {
        let mut modified = false;

        for (field, value) in &self.set {
            if field == ID_FIELD {
                warn!("ignoring $set on the identity field");
                continue;
            }

            if document.get(field) != Some(value) {
                document.insert(field.clone(), value.clone());
                modified = true;
            }
        }

        for (field, value) in &self.push {
            if field == ID_FIELD {
                warn!("ignoring $push on the identity field");
                continue;
            }

            match document.get_mut(field) {
                None => {
                    document.insert(field.clone(), Bson::Array(vec![value.clone()]));
                    modified = true;
                }
                Some(Bson::Array(items)) => {
                    items.push(value.clone());
                    modified = true;
                }
                Some(other) => {
                    warn!(
                        field = %field,
                        found = ?other.element_type(),
                        "$push target is not an array; leaving it unchanged"
                    );
                }
            }
        }

        modified
    }
}

impl From<Document> for Update {
    fn from(descriptor: Document) -> Self {
        Update::from_document(&descriptor)
    }
}

impl From<&Document> for Update {
    fn from(descriptor: &Document) -> Self {
        Update::from_document(descriptor)
    }
}
