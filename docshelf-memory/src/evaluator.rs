//! Filter evaluation for in-memory document matching.
//!
//! This module provides the evaluation engine for filters, comparing BSON field values
//! against clause operands.

use std::{cmp::Ordering, collections::HashMap};
use bson::{Bson, Document, datetime::DateTime};

use docshelf_core::query::{Filter, QueryVisitor};


/// Type-erased, comparable representation of BSON values.
///
/// Integers compare exactly with each other and by `f64` value against floats, so `1`,
/// `1i64` and `1.0` are equal. Ordering is only defined between values of the same kind.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (`Int32` widened to i64)
    Int(i64),
    /// Floating-point value
    Number(f64),
    /// DateTime value
    DateTime(DateTime),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Map/Object of comparable values
    Map(HashMap<&'a str, Comparable<'a>>),
    /// Any other BSON value, compared structurally and never ordered
    Other(&'a Bson),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Int(i64::from(*value)),
            Bson::Int64(value) => Comparable::Int(*value),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            other => Comparable::Other(other),
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Int(a), Comparable::Int(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::Int(a), Comparable::Number(b)) | (Comparable::Number(b), Comparable::Int(a)) => {
                *a as f64 == *b
            }
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            (Comparable::Other(a), Comparable::Other(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Int(a), Comparable::Int(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::Int(a), Comparable::Number(b)) => (*a as f64).partial_cmp(b),
            (Comparable::Number(a), Comparable::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}


/// Evaluates filters against a single document.
pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Returns `true` if the document satisfies every clause of `filter`.
    pub fn matches(&mut self, filter: &Filter) -> bool {
        filter
            .clauses()
            .iter()
            .all(|clause| self.visit_clause(clause))
    }

    /// Looks a field up as a literal key first, then as a dotted path through nested
    /// documents.
    fn resolve(&self, field: &str) -> Option<&'a Bson> {
        if let Some(value) = self.document.get(field) {
            return Some(value);
        }

        if !field.contains('.') {
            return None;
        }

        let mut segments = field.split('.');
        let mut current = self.document.get(segments.next()?)?;
        for segment in segments {
            current = current.as_document()?.get(segment)?;
        }

        Some(current)
    }

    fn compare_with_default(&self, field: &str, bound: &Bson) -> Option<Ordering> {
        self.resolve(field)
            .map(Comparable::from)
            .unwrap_or(Comparable::String(""))
            .partial_cmp(&Comparable::from(bound))
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;

    fn visit_equals(&mut self, field: &str, value: &Bson) -> Self::Output {
        match self.resolve(field) {
            Some(field_value) => Comparable::from(field_value) == Comparable::from(value),
            None => false,
        }
    }

    fn visit_in(&mut self, field: &str, values: &[Bson]) -> Self::Output {
        match self.resolve(field).map(Comparable::from) {
            Some(Comparable::Array(items)) => values
                .iter()
                .any(|value| items.contains(&Comparable::from(value))),
            Some(single_value) => values
                .iter()
                .any(|value| Comparable::from(value) == single_value),
            None => values
                .iter()
                .any(|value| Comparable::from(value) == Comparable::Null),
        }
    }

    fn visit_gte(&mut self, field: &str, bound: &Bson) -> Self::Output {
        matches!(
            self.compare_with_default(field, bound),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }

    fn visit_lte(&mut self, field: &str, bound: &Bson) -> Self::Output {
        matches!(
            self.compare_with_default(field, bound),
            Some(Ordering::Less | Ordering::Equal)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    fn matches(document: &Document, filter: impl Into<Filter>) -> bool {
        DocumentEvaluator::new(document).matches(&filter.into())
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(matches(&doc! {}, Filter::all()));
        assert!(matches(&doc! { "_id": "A" }, doc! {}));
    }

    #[test]
    fn equality_compares_type_and_value() {
        let document = doc! { "_id": "A", "x": 1, "flag": true, "name": "1" };

        assert!(matches(&document, doc! { "x": 1 }));
        assert!(matches(&document, doc! { "x": 1i64 }));
        assert!(matches(&document, doc! { "x": 1.0 }));
        assert!(!matches(&document, doc! { "x": "1" }));
        assert!(!matches(&document, doc! { "name": 1 }));
        assert!(!matches(&document, doc! { "flag": 1 }));
    }

    #[test]
    fn missing_fields_never_equal_a_literal() {
        let document = doc! { "_id": "A" };

        assert!(!matches(&document, doc! { "start_date": null }));
        assert!(!matches(&document, doc! { "start_date": "" }));
    }

    #[test]
    fn in_intersects_array_fields() {
        let document = doc! { "participants": ["a@x.edu", "b@x.edu"] };

        assert!(matches(&document, doc! { "participants": { "$in": ["b@x.edu"] } }));
        assert!(matches(&document, doc! { "participants": { "$in": ["c@x.edu", "a@x.edu"] } }));
        assert!(!matches(&document, doc! { "participants": { "$in": ["c@x.edu"] } }));
        assert!(!matches(&document, doc! { "participants": { "$in": [] } }));
    }

    #[test]
    fn in_tests_scalar_membership() {
        let document = doc! { "role": "admin" };

        assert!(matches(&document, doc! { "role": { "$in": ["teacher", "admin"] } }));
        assert!(!matches(&document, doc! { "role": { "$in": ["teacher"] } }));
    }

    #[test]
    fn in_treats_missing_as_null() {
        let document = doc! { "_id": "A" };

        assert!(matches(&document, doc! { "start_date": { "$in": [null, "2026-03-01"] } }));
        assert!(!matches(&document, doc! { "start_date": { "$in": ["2026-03-01"] } }));
    }

    #[test]
    fn ranges_compare_strings_lexicographically() {
        let early = doc! { "expiration_date": "2026-02-28" };
        let late = doc! { "expiration_date": "2026-03-15" };
        let filter = Filter::new().gte("expiration_date", "2026-03-01");

        assert!(!matches(&early, &filter));
        assert!(matches(&late, &filter));
        assert!(matches(&early, doc! { "expiration_date": { "$lte": "2026-02-28" } }));
        assert!(!matches(&late, doc! { "expiration_date": { "$lte": "2026-02-28" } }));
    }

    #[test]
    fn ranges_compare_numbers_by_value() {
        let document = doc! { "max_participants": 12 };

        assert!(matches(&document, doc! { "max_participants": { "$gte": 12 } }));
        assert!(matches(&document, doc! { "max_participants": { "$lte": 12.5 } }));
        assert!(!matches(&document, doc! { "max_participants": { "$gte": 13i64 } }));
    }

    #[test]
    fn missing_range_fields_default_to_empty_string() {
        let document = doc! { "_id": "A" };

        assert!(matches(&document, doc! { "start_date": { "$lte": "2026-03-01" } }));
        assert!(!matches(&document, doc! { "start_date": { "$gte": "2026-03-01" } }));
        assert!(matches(&document, doc! { "start_date": { "$gte": "" } }));
    }

    #[test]
    fn incomparable_types_do_not_match_ranges() {
        let document = doc! { "start_date": null, "count": 3 };

        assert!(!matches(&document, doc! { "start_date": { "$lte": "2026-03-01" } }));
        assert!(!matches(&document, doc! { "count": { "$gte": "1" } }));
    }

    #[test]
    fn clauses_are_conjunctive() {
        let document = doc! { "_id": "A", "role": "teacher", "display_name": "Mr. Chen" };

        assert!(matches(&document, doc! { "role": "teacher", "display_name": "Mr. Chen" }));
        assert!(!matches(&document, doc! { "role": "teacher", "display_name": "Ms. Rodriguez" }));
    }

    #[test]
    fn dotted_paths_reach_nested_documents() {
        let document = doc! {
            "schedule_details": { "days": ["Monday", "Friday"], "start_time": "15:15" },
        };

        assert!(matches(&document, doc! { "schedule_details.days": { "$in": ["Friday"] } }));
        assert!(matches(&document, doc! { "schedule_details.start_time": "15:15" }));
        assert!(!matches(&document, doc! { "schedule_details.days": { "$in": ["Sunday"] } }));
        assert!(!matches(&document, doc! { "schedule_details.room": "B12" }));
    }

    #[test]
    fn literal_keys_win_over_dotted_paths() {
        let document = doc! { "a.b": 1, "a": { "b": 2 } };

        assert!(matches(&document, doc! { "a.b": 1 }));
        assert!(!matches(&document, doc! { "a.b": 2 }));
    }

    #[test]
    fn nested_documents_compare_structurally() {
        let document = doc! { "size": { "h": 14, "w": 21 } };

        assert!(matches(&document, Filter::new().eq("size", doc! { "w": 21, "h": 14 })));
        assert!(!matches(&document, Filter::new().eq("size", doc! { "h": 14 })));
    }

    #[test]
    fn nested_query_documents_without_operators_match_anything() {
        let sized = doc! { "_id": "A", "size": { "h": 14, "w": 21 } };
        let unsized_ = doc! { "_id": "B" };

        assert!(matches(&sized, doc! { "size": { "h": 14 } }));
        assert!(matches(&unsized_, doc! { "size": { "h": 14 } }));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let document = doc! { "_id": 9_007_199_254_740_993i64 };

        assert!(matches(&document, doc! { "_id": 9_007_199_254_740_993i64 }));
        assert!(!matches(&document, doc! { "_id": { "$in": [9_007_199_254_740_992i64] } }));
        assert!(matches(&document, doc! { "_id": { "$gte": 9_007_199_254_740_993i64 } }));
        assert!(!matches(&document, doc! { "_id": { "$lte": 9_007_199_254_740_992i64 } }));
        assert!(matches(&doc! { "x": 3 }, doc! { "x": { "$lte": 3.5 } }));
    }

    #[test]
    fn other_bson_types_compare_structurally() {
        let id = ObjectId::new();
        let document = doc! { "ref": id };

        assert!(matches(&document, doc! { "ref": id }));
        assert!(!matches(&document, doc! { "ref": ObjectId::new() }));
    }
}
