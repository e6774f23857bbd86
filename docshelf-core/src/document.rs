//! Documents, identities and typed records.
//!
//! A document is a plain [`bson::Document`]: an ordered mapping from field names to
//! values with no fixed schema. The only field the store interprets is the identity
//! field [`ID_FIELD`].

use bson::{Bson, de::deserialize_from_document, ser::serialize_to_document};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::error::DocumentStoreResult;

pub use bson::Document;

/// Name of the identity field every stored document carries.
pub const ID_FIELD: &str = "_id";

/// Returns the identity value of a document, if it has one.
pub fn document_id(document: &Document) -> Option<&Bson> {
    document.get(ID_FIELD)
}

/// Generates a fresh identity value (a UUIDv4 rendered as a string).
pub fn new_id() -> Bson {
    Bson::String(Uuid::new_v4().to_string())
}

/// Makes sure `document` has an identity, assigning a fresh one when it is missing.
///
/// Returns the identity value the document carries after the call.
pub fn ensure_id(document: &mut Document) -> Bson {
    if let Some(id) = document.get(ID_FIELD) {
        return id.clone();
    }

    let id = new_id();
    document.insert(ID_FIELD, id.clone());
    id
}

/// Converts a document into a JSON value suitable for a response payload.
pub fn to_json(document: &Document) -> DocumentStoreResult<Value> {
    Ok(serde_json::to_value(document)?)
}

/// Hashable projection of an identity value.
///
/// Used as the key of keyed storage. Numbers are projected by value, so `1i32`, `1i64`
/// and `1.0` all map to `DocumentId::Int(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentId {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    /// Any other BSON value, keyed by its debug rendering.
    Other(String),
}

impl From<&Bson> for DocumentId {
    fn from(value: &Bson) -> Self {
        match value {
            Bson::Null => DocumentId::Null,
            Bson::Boolean(value) => DocumentId::Bool(*value),
            Bson::Int32(value) => DocumentId::Int(i64::from(*value)),
            Bson::Int64(value) => DocumentId::Int(*value),
            Bson::Double(value) if value.fract() == 0.0 && value.abs() < 9.0e15 => {
                DocumentId::Int(*value as i64)
            }
            Bson::String(value) => DocumentId::String(value.clone()),
            other => DocumentId::Other(format!("{other:?}")),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Null => f.write_str("null"),
            DocumentId::Bool(value) => write!(f, "{value}"),
            DocumentId::Int(value) => write!(f, "{value}"),
            DocumentId::String(value) => f.write_str(value),
            DocumentId::Other(value) => f.write_str(value),
        }
    }
}

/// A typed record that can be stored as a document.
///
/// The record's serde representation becomes the document body and [`Record::id`]
/// supplies the identity field. Records that return `None` get a generated identity
/// when they are inserted.
///
/// # Example
///
/// ```ignore
/// use docshelf_core::document::Record;
/// use bson::Bson;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Account {
///     pub username: String,
///     pub display_name: String,
/// }
///
/// impl Record for Account {
///     fn id(&self) -> Option<Bson> {
///         Some(Bson::String(self.username.clone()))
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned {
    /// Returns the identity this record is stored under.
    fn id(&self) -> Option<Bson>;
}

/// Extension trait providing document conversions for records.
///
/// This trait is automatically implemented for all types that implement [`Record`].
pub trait RecordExt: Record {
    /// Converts this record to a document, with the identity field first.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the record does not serialize to a map.
    fn to_document(&self) -> DocumentStoreResult<Document>;

    /// Creates a record from a stored document. Fields the record does not declare,
    /// including the identity field, are ignored unless the record says otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not have the record's shape.
    fn from_document(document: Document) -> DocumentStoreResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_document(&self) -> DocumentStoreResult<Document> {
        let body = serialize_to_document(self)?;

        let mut document = Document::new();
        if let Some(id) = self.id() {
            document.insert(ID_FIELD, id);
        }
        for (key, value) in body {
            document.insert(key, value);
        }

        Ok(document)
    }

    fn from_document(document: Document) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_document(document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Account {
        username: String,
        role: String,
    }

    impl Record for Account {
        fn id(&self) -> Option<Bson> {
            Some(Bson::String(self.username.clone()))
        }
    }

    #[test]
    fn numeric_ids_project_by_value() {
        assert_eq!(DocumentId::from(&Bson::Int32(7)), DocumentId::from(&Bson::Int64(7)));
        assert_eq!(DocumentId::from(&Bson::Double(7.0)), DocumentId::Int(7));
        assert_ne!(DocumentId::from(&Bson::Double(7.5)), DocumentId::Int(7));
        assert_ne!(
            DocumentId::from(&Bson::String("7".into())),
            DocumentId::from(&Bson::Int32(7))
        );
    }

    #[test]
    fn ensure_id_keeps_an_existing_identity() {
        let mut document = doc! { "_id": "A", "x": 1 };

        assert_eq!(ensure_id(&mut document), Bson::String("A".into()));
        assert_eq!(document, doc! { "_id": "A", "x": 1 });
    }

    #[test]
    fn ensure_id_assigns_a_fresh_identity() {
        let mut first = doc! { "title": "Fair" };
        let mut second = doc! { "title": "Fair" };

        let first_id = ensure_id(&mut first);
        let second_id = ensure_id(&mut second);

        assert_ne!(first_id, second_id);
        assert_eq!(document_id(&first), Some(&first_id));
        assert!(matches!(first_id, Bson::String(_)));
    }

    #[test]
    fn record_documents_lead_with_the_identity() {
        let account = Account { username: "mchen".into(), role: "teacher".into() };
        let document = account.to_document().unwrap();

        assert_eq!(document.keys().next().map(String::as_str), Some(ID_FIELD));
        assert_eq!(document, doc! { "_id": "mchen", "username": "mchen", "role": "teacher" });
        assert_eq!(Account::from_document(document).unwrap(), account);
    }

    #[test]
    fn documents_render_as_json() {
        let json = to_json(&doc! { "_id": "A", "tags": ["x"], "start": null }).unwrap();

        assert_eq!(json, serde_json::json!({ "_id": "A", "tags": ["x"], "start": null }));
    }
}
