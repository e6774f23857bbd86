//! Announcement operations.
//!
//! Announcements are shown between their optional `start_date` and their
//! `expiration_date`, inclusive. Both are ISO-8601 strings compared lexicographically.
//! Deleting an announcement marks it with `_deleted: true`; marked announcements are left
//! out of every listing.

use bson::Bson;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use docshelf_core::{
    document::{Document, RecordExt, ensure_id},
    query::Filter,
    update::Update,
};
use docshelf_memory::SharedCollection;

use crate::{
    error::{SchoolError, SchoolResult},
    records::Announcement,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];
const DELETED_FIELD: &str = "_deleted";

/// Fields of a new announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub start_date: Option<String>,
    pub expiration_date: String,
    pub created_by: String,
}

/// Fields to change on an existing announcement. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementChanges {
    pub title: Option<String>,
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
}

impl AnnouncementChanges {
    fn to_update(&self) -> Update {
        [
            ("title", &self.title),
            ("message", &self.message),
            ("start_date", &self.start_date),
            ("expiration_date", &self.expiration_date),
        ]
        .into_iter()
        .fold(Update::new(), |update, (field, value)| match value {
            Some(value) => update.set(field, value.as_str()),
            None => update,
        })
    }
}

/// Checks that `value` is a `YYYY-MM-DD` date or an ISO-8601 date-time.
///
/// Date-times may omit seconds, use a space instead of `T`, and carry a UTC offset.
pub fn validate_date(value: &str) -> SchoolResult<()> {
    let valid = NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
        || OFFSET_FORMATS
            .iter()
            .any(|format| DateTime::parse_from_str(value, format).is_ok());

    if valid {
        Ok(())
    } else {
        Err(SchoolError::InvalidDate(value.to_string()))
    }
}

fn validate_optional_date(value: Option<&str>) -> SchoolResult<()> {
    match value {
        Some(value) if !value.is_empty() => validate_date(value),
        _ => Ok(()),
    }
}

fn is_deleted(document: &Document) -> bool {
    matches!(document.get(DELETED_FIELD), Some(Bson::Boolean(true)))
}

fn has_started(document: &Document, today: &str) -> bool {
    match document.get("start_date") {
        Some(Bson::String(start)) if !start.is_empty() => start.as_str() <= today,
        _ => true,
    }
}

/// Operations on the `announcements` collection.
#[derive(Debug, Clone)]
pub struct Announcements {
    collection: SharedCollection,
}

impl Announcements {
    pub(crate) fn new(collection: SharedCollection) -> Self {
        Self { collection }
    }

    /// Announcements visible on `date`.
    pub async fn active_on(&self, date: NaiveDate) -> Vec<Document> {
        let today = date.format(DATE_FORMAT).to_string();

        self.collection
            .find(Filter::new().gte("expiration_date", today.as_str()))
            .await
            .into_iter()
            .filter(|announcement| !is_deleted(announcement) && has_started(announcement, &today))
            .collect()
    }

    /// Announcements visible today, in local time.
    pub async fn active_today(&self) -> Vec<Document> {
        self.active_on(Local::now().date_naive()).await
    }

    /// Every announcement that has not been deleted.
    pub async fn all(&self) -> Vec<Document> {
        self.collection
            .find(Filter::all())
            .await
            .into_iter()
            .filter(|announcement| !is_deleted(announcement))
            .collect()
    }

    /// Looks an announcement up by identity.
    pub async fn get(&self, id: &str) -> Option<Document> {
        self.collection
            .find_one(Filter::by_id(id))
            .await
            .filter(|announcement| !is_deleted(announcement))
    }

    /// Validates and stores a new announcement, returning it with its identity and
    /// creation timestamp.
    pub async fn create(&self, announcement: NewAnnouncement) -> SchoolResult<Document> {
        validate_date(&announcement.expiration_date)?;
        validate_optional_date(announcement.start_date.as_deref())?;

        let record = Announcement {
            id: None,
            title: announcement.title,
            message: announcement.message,
            start_date: announcement.start_date,
            expiration_date: announcement.expiration_date,
            created_by: announcement.created_by,
            created_at: Some(Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
        };

        let mut document = record.to_document()?;
        let id = ensure_id(&mut document);
        self.collection.insert_one(document.clone()).await;

        debug!(id = %id, "created announcement");
        Ok(document)
    }

    /// Applies `changes` to an announcement and returns the updated document.
    pub async fn update(&self, id: &str, changes: AnnouncementChanges) -> SchoolResult<Document> {
        if self.get(id).await.is_none() {
            return Err(SchoolError::AnnouncementNotFound(id.to_string()));
        }

        // The expiration date can be changed but not cleared.
        if let Some(expiration_date) = &changes.expiration_date {
            validate_date(expiration_date)?;
        }
        validate_optional_date(changes.start_date.as_deref())?;

        let update = changes.to_update();
        if !update.is_empty() {
            self.collection.update_one(Filter::by_id(id), update).await;
        }

        self.get(id)
            .await
            .ok_or_else(|| SchoolError::AnnouncementNotFound(id.to_string()))
    }

    /// Marks an announcement as deleted.
    pub async fn delete(&self, id: &str) -> SchoolResult<()> {
        if self.get(id).await.is_none() {
            return Err(SchoolError::AnnouncementNotFound(id.to_string()));
        }

        self.collection
            .update_one(Filter::by_id(id), Update::new().set(DELETED_FIELD, true))
            .await;

        debug!(id, "deleted announcement");
        Ok(())
    }
}
