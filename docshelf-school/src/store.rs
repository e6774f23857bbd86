//! The school's document store.
//!
//! [`SchoolStore`] owns the `activities`, `teachers` and `announcements` collections. It
//! is constructed once by the application and populated with
//! [`seed_if_empty`](SchoolStore::seed_if_empty) before serving requests.

use tracing::info;

use docshelf_core::{
    backend::BackingKind,
    document::{Document, Record, RecordExt},
    error::DocumentStoreResult,
};
use docshelf_memory::{Collection, SharedCollection};

use crate::{
    activities::Activities,
    announcements::Announcements,
    error::SchoolResult,
    seed::{initial_activities, initial_announcements, initial_teachers},
};

pub const ACTIVITIES: &str = "activities";
pub const TEACHERS: &str = "teachers";
pub const ANNOUNCEMENTS: &str = "announcements";

/// Number of documents each collection received from a seeding pass.
///
/// A zero means the collection already held documents and was left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub activities: usize,
    pub teachers: usize,
    pub announcements: usize,
}

impl SeedReport {
    /// Returns `true` if nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.activities == 0 && self.teachers == 0 && self.announcements == 0
    }
}

/// The three school collections behind shared, lock-protected handles.
///
/// Cloning the store clones the handles, not the data.
#[derive(Debug, Clone)]
pub struct SchoolStore {
    activities: SharedCollection,
    teachers: SharedCollection,
    announcements: SharedCollection,
}

impl SchoolStore {
    /// Creates an empty store with the default backings.
    pub fn new() -> Self {
        SchoolStore::builder().build()
    }

    /// Creates a builder for choosing each collection's backing.
    pub fn builder() -> SchoolStoreBuilder {
        SchoolStoreBuilder::default()
    }

    /// Activity operations.
    pub fn activities(&self) -> Activities {
        Activities::new(self.activities.clone())
    }

    /// Announcement operations.
    pub fn announcements(&self) -> Announcements {
        Announcements::new(self.announcements.clone())
    }

    /// The staff account collection, keyed on username by default.
    pub fn teachers(&self) -> &SharedCollection {
        &self.teachers
    }

    /// Returns a collection by name.
    pub fn collection(&self, name: &str) -> Option<&SharedCollection> {
        match name {
            ACTIVITIES => Some(&self.activities),
            TEACHERS => Some(&self.teachers),
            ANNOUNCEMENTS => Some(&self.announcements),
            _ => None,
        }
    }

    /// Populates every empty collection from the fixed seed data.
    ///
    /// Collections that already hold documents are skipped, so calling this again is
    /// harmless.
    pub async fn seed_if_empty(&self) -> SchoolResult<SeedReport> {
        let mut report = SeedReport::default();

        if self.activities.is_empty().await {
            report.activities = seed(&self.activities, to_documents(&initial_activities())?).await;
        }

        if self.teachers.is_empty().await {
            report.teachers = seed(&self.teachers, to_documents(&initial_teachers()?)?).await;
        }

        if self.announcements.is_empty().await {
            report.announcements = seed(&self.announcements, to_documents(&initial_announcements())?).await;
        }

        info!(
            activities = report.activities,
            teachers = report.teachers,
            announcements = report.announcements,
            "seeded school store"
        );

        Ok(report)
    }
}

impl Default for SchoolStore {
    fn default() -> Self {
        SchoolStore::new()
    }
}

fn to_documents<R: Record>(records: &[R]) -> DocumentStoreResult<Vec<Document>> {
    records.iter().map(|record| record.to_document()).collect()
}

async fn seed(collection: &SharedCollection, documents: Vec<Document>) -> usize {
    let count = documents.len();

    if collection.seed_if_empty(documents).await {
        count
    } else {
        0
    }
}


/// Builder for [`SchoolStore`].
///
/// Activities and announcements default to sequence backings, teachers to a keyed
/// backing.
#[derive(Debug, Clone)]
pub struct SchoolStoreBuilder {
    activities: BackingKind,
    teachers: BackingKind,
    announcements: BackingKind,
}

impl Default for SchoolStoreBuilder {
    fn default() -> Self {
        Self {
            activities: BackingKind::Sequence,
            teachers: BackingKind::Keyed,
            announcements: BackingKind::Sequence,
        }
    }
}

impl SchoolStoreBuilder {
    pub fn activities_backing(mut self, kind: BackingKind) -> Self {
        self.activities = kind;
        self
    }

    pub fn teachers_backing(mut self, kind: BackingKind) -> Self {
        self.teachers = kind;
        self
    }

    pub fn announcements_backing(mut self, kind: BackingKind) -> Self {
        self.announcements = kind;
        self
    }

    pub fn build(self) -> SchoolStore {
        SchoolStore {
            activities: Collection::new(ACTIVITIES, self.activities).into(),
            teachers: Collection::new(TEACHERS, self.teachers).into(),
            announcements: Collection::new(ANNOUNCEMENTS, self.announcements).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use docshelf_core::query::Filter;

    use crate::{credentials::verify_password, records::TeacherAccount};

    #[tokio::test]
    async fn seeds_every_collection_once() {
        let store = SchoolStore::new();

        let first = store.seed_if_empty().await.unwrap();
        assert_eq!(first, SeedReport { activities: 12, teachers: 3, announcements: 2 });

        let second = store.seed_if_empty().await.unwrap();
        assert!(second.is_empty());
        assert_eq!(store.teachers().len().await, 3);
    }

    #[tokio::test]
    async fn seeding_skips_populated_collections() {
        let store = SchoolStore::new();
        store.teachers().insert_one(doc! { "_id": "substitute", "role": "teacher" }).await;

        let report = store.seed_if_empty().await.unwrap();

        assert_eq!(report.teachers, 0);
        assert_eq!(report.activities, 12);
        assert!(store.teachers().find_one(doc! { "_id": "mchen" }).await.is_none());
    }

    #[tokio::test]
    async fn seeded_accounts_carry_hashed_passwords() {
        let store = SchoolStore::new();
        store.seed_if_empty().await.unwrap();

        let document = store.teachers().find_one(Filter::by_id("principal")).await.unwrap();
        let account = TeacherAccount::from_document(document).unwrap();

        assert_eq!(account.display_name, "Principal Martinez");
        assert_ne!(account.password, "admin789");
        assert!(verify_password(&account.password, "admin789"));
        assert_eq!(store.teachers().count_documents(doc! { "role": "admin" }).await, 1);
    }

    #[tokio::test]
    async fn builder_overrides_backings() {
        let store = SchoolStore::builder()
            .activities_backing(BackingKind::Keyed)
            .teachers_backing(BackingKind::Sequence)
            .announcements_backing(BackingKind::Keyed)
            .build();

        assert_eq!(store.collection(ACTIVITIES).unwrap().backing_kind().await, BackingKind::Keyed);
        assert_eq!(store.collection(TEACHERS).unwrap().backing_kind().await, BackingKind::Sequence);
        assert_eq!(store.collection(ANNOUNCEMENTS).unwrap().backing_kind().await, BackingKind::Keyed);
        assert!(store.collection("students").is_none());
    }
}
