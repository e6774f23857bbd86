//! Query descriptors and the filter AST.
//!
//! A [`Filter`] is a conjunction of [`Clause`]s. It can be built with the chainable
//! methods on [`Filter`] or parsed from a Mongo-style query descriptor:
//!
//! ```ignore
//! use bson::doc;
//! use docshelf_core::query::Filter;
//!
//! let filter = Filter::from_document(&doc! {
//!     "participants": { "$in": ["b@mergington.edu"] },
//!     "max_participants": 12,
//! });
//!
//! let same = Filter::new()
//!     .is_in("participants", ["b@mergington.edu"])
//!     .eq("max_participants", 12);
//!
//! assert_eq!(filter, same);
//! ```
//!
//! # Lenient parsing
//!
//! Parsing never fails. Top-level keys starting with `$` are reserved for logical
//! combinators and are skipped. A document value is always read as an operator document.
//! It yields at most one clause, chosen in the order `$in`, `$gte`, `$lte`; a document
//! with none of those, including a plain nested document, places no constraint on its
//! field. Equality against a nested document is available through [`Filter::eq`].

use bson::{Bson, Document};
use tracing::trace;

use crate::document::ID_FIELD;

/// A single constraint on one field of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// The field is present and equal to `value`.
    Equals {
        field: String,
        value: Bson,
    },
    /// The field value is one of `values` or, for an array field, shares a member with them.
    In {
        field: String,
        values: Vec<Bson>,
    },
    /// The field value (`""` when absent) is greater than or equal to `bound`.
    Gte {
        field: String,
        bound: Bson,
    },
    /// The field value (`""` when absent) is less than or equal to `bound`.
    Lte {
        field: String,
        bound: Bson,
    },
}

impl Clause {
    /// Returns the name of the field this clause constrains.
    pub fn field(&self) -> &str {
        match self {
            Clause::Equals { field, .. }
            | Clause::In { field, .. }
            | Clause::Gte { field, .. }
            | Clause::Lte { field, .. } => field,
        }
    }
}

/// A conjunction of clauses selecting documents from a collection.
///
/// The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Filter { clauses: Vec::new() }
    }

    /// Creates a filter that matches every document.
    pub fn all() -> Self {
        Filter::new()
    }

    /// Creates a filter matching the document with the given identity.
    pub fn by_id(id: impl Into<Bson>) -> Self {
        Filter::new().eq(ID_FIELD, id)
    }

    /// Adds an equality clause.
    pub fn eq(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.with(Clause::Equals { field: field.into(), value: value.into() })
    }

    /// Adds a membership clause.
    pub fn is_in<V>(self, field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Bson>,
    {
        self.with(Clause::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Adds a lower-bound clause.
    pub fn gte(self, field: impl Into<String>, bound: impl Into<Bson>) -> Self {
        self.with(Clause::Gte { field: field.into(), bound: bound.into() })
    }

    /// Adds an upper-bound clause.
    pub fn lte(self, field: impl Into<String>, bound: impl Into<Bson>) -> Self {
        self.with(Clause::Lte { field: field.into(), bound: bound.into() })
    }

    /// Adds an arbitrary clause.
    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Returns the clauses of this filter, in the order they were added.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns `true` if this filter has no clauses and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the identity value this filter pins, if any.
    ///
    /// Only an equality clause on [`ID_FIELD`] pins an identity; `$in` or range clauses on
    /// the identity field are evaluated like any other clause.
    pub fn identity(&self) -> Option<&Bson> {
        self.clauses.iter().find_map(|clause| match clause {
            Clause::Equals { field, value } if field == ID_FIELD => Some(value),
            _ => None,
        })
    }

    /// Parses a query descriptor.
    pub fn from_document(descriptor: &Document) -> Self {
        let mut filter = Filter::new();

        for (field, value) in descriptor {
            if field.starts_with('$') {
                trace!(field = %field, "skipping reserved top-level query key");
                continue;
            }

            match value {
                Bson::Document(operators) => {
                    if let Some(clause) = parse_operators(field, operators) {
                        filter.clauses.push(clause);
                    }
                }
                literal => filter.clauses.push(Clause::Equals {
                    field: field.clone(),
                    value: literal.clone(),
                }),
            }
        }

        filter
    }
}

fn parse_operators(field: &str, operators: &Document) -> Option<Clause> {
    if let Some(values) = operators.get("$in") {
        let values = match values {
            Bson::Array(values) => values.clone(),
            single => vec![single.clone()],
        };
        return Some(Clause::In { field: field.to_string(), values });
    }

    if let Some(bound) = operators.get("$gte") {
        return Some(Clause::Gte { field: field.to_string(), bound: bound.clone() });
    }

    if let Some(bound) = operators.get("$lte") {
        return Some(Clause::Lte { field: field.to_string(), bound: bound.clone() });
    }

    trace!(field, "no supported operator in document value; field is unconstrained");
    None
}

impl From<Document> for Filter {
    fn from(descriptor: Document) -> Self {
        Filter::from_document(&descriptor)
    }
}

impl From<&Document> for Filter {
    fn from(descriptor: &Document) -> Self {
        Filter::from_document(descriptor)
    }
}

impl From<Clause> for Filter {
    fn from(clause: Clause) -> Self {
        Filter::new().with(clause)
    }
}

impl From<&Filter> for Filter {
    fn from(filter: &Filter) -> Self {
        filter.clone()
    }
}

/// Visitor over filter clauses, implemented by query evaluators.
pub trait QueryVisitor {
    type Output;

    fn visit_equals(&mut self, field: &str, value: &Bson) -> Self::Output;
    fn visit_in(&mut self, field: &str, values: &[Bson]) -> Self::Output;
    fn visit_gte(&mut self, field: &str, bound: &Bson) -> Self::Output;
    fn visit_lte(&mut self, field: &str, bound: &Bson) -> Self::Output;

    fn visit_clause(&mut self, clause: &Clause) -> Self::Output {
        match clause {
            Clause::Equals { field, value } => self.visit_equals(field, value),
            Clause::In { field, values } => self.visit_in(field, values),
            Clause::Gte { field, bound } => self.visit_gte(field, bound),
            Clause::Lte { field, bound } => self.visit_lte(field, bound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn parses_literals_and_operators() {
        let filter = Filter::from_document(&doc! {
            "_id": "Chess Club",
            "participants": { "$in": ["a@x.edu", "b@x.edu"] },
            "expiration_date": { "$gte": "2026-03-01" },
            "start_date": { "$lte": "2026-03-10" },
        });

        assert_eq!(
            filter,
            Filter::by_id("Chess Club")
                .is_in("participants", ["a@x.edu", "b@x.edu"])
                .gte("expiration_date", "2026-03-01")
                .lte("start_date", "2026-03-10")
        );
    }

    #[test]
    fn reserved_keys_are_skipped() {
        let filter = Filter::from_document(&doc! {
            "$or": [{ "a": 1 }, { "b": 2 }],
            "c": 3,
        });

        assert_eq!(filter.clauses(), &[Clause::Equals { field: "c".into(), value: Bson::Int32(3) }]);
    }

    #[test]
    fn one_operator_per_field_in_precedence_order() {
        let filter = Filter::from_document(&doc! {
            "date": { "$lte": "2026-12-31", "$gte": "2026-01-01" },
            "tags": { "$gte": "a", "$in": ["x"] },
        });

        assert_eq!(filter, Filter::new().gte("date", "2026-01-01").is_in("tags", ["x"]));
    }

    #[test]
    fn unknown_operators_place_no_constraint() {
        let filter = Filter::from_document(&doc! { "qty": { "$gt": 5 }, "status": "A" });

        assert_eq!(filter, Filter::new().eq("status", "A"));
    }

    #[test]
    fn nested_documents_without_operators_place_no_constraint() {
        let filter = Filter::from_document(&doc! { "size": { "h": 14, "w": 21 }, "qty": 3 });

        assert_eq!(filter, Filter::new().eq("qty", 3));
    }

    #[test]
    fn scalar_in_operand_is_a_single_member_set() {
        let filter = Filter::from_document(&doc! { "role": { "$in": "admin" } });

        assert_eq!(filter, Filter::new().is_in("role", ["admin"]));
    }

    #[test]
    fn identity_only_comes_from_equality() {
        assert_eq!(Filter::by_id("A").identity(), Some(&Bson::String("A".into())));
        assert_eq!(Filter::new().is_in(ID_FIELD, ["A"]).identity(), None);
        assert!(Filter::all().is_empty());
    }
}
