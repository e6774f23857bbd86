//! Activity operations.

use bson::Bson;
use tracing::debug;

use docshelf_core::{
    document::{Document, RecordExt},
    query::Filter,
    update::Update,
};
use docshelf_memory::SharedCollection;

use crate::{
    error::{SchoolError, SchoolResult},
    records::Activity,
};

const PARTICIPANTS: &str = "participants";

fn to_activities(documents: Vec<Document>) -> SchoolResult<Vec<Activity>> {
    documents
        .into_iter()
        .map(|document| Activity::from_document(document).map_err(SchoolError::from))
        .collect()
}

fn participant_limit(activity: &Document) -> Option<usize> {
    match activity.get("max_participants")? {
        Bson::Int32(limit) => usize::try_from(*limit).ok(),
        Bson::Int64(limit) => usize::try_from(*limit).ok(),
        _ => None,
    }
}

fn participant_count(activity: &Document) -> usize {
    activity.get_array(PARTICIPANTS).map_or(0, Vec::len)
}

/// Operations on the `activities` collection.
#[derive(Debug, Clone)]
pub struct Activities {
    collection: SharedCollection,
}

impl Activities {
    pub(crate) fn new(collection: SharedCollection) -> Self {
        Self { collection }
    }

    /// Every activity, in insertion order.
    pub async fn all(&self) -> SchoolResult<Vec<Activity>> {
        to_activities(self.collection.find(Filter::all()).await)
    }

    /// Looks an activity up by name.
    pub async fn get(&self, name: &str) -> SchoolResult<Option<Activity>> {
        self.collection
            .find_one(Filter::by_id(name))
            .await
            .map(Activity::from_document)
            .transpose()
            .map_err(SchoolError::from)
    }

    /// Activities that meet on `day` (e.g. `"Monday"`).
    pub async fn meeting_on(&self, day: &str) -> SchoolResult<Vec<Activity>> {
        to_activities(
            self.collection
                .find(Filter::new().is_in("schedule_details.days", [day]))
                .await,
        )
    }

    /// Activities the student with `email` is signed up for.
    pub async fn enrolled(&self, email: &str) -> SchoolResult<Vec<Activity>> {
        to_activities(self.collection.find(Filter::new().is_in(PARTICIPANTS, [email])).await)
    }

    /// Adds `email` to the participants of the activity called `name`.
    ///
    /// The checks and the push run under one write lock, so concurrent signups can neither
    /// exceed the participant limit nor enrol the same student twice.
    pub async fn signup(&self, name: &str, email: &str) -> SchoolResult<Activity> {
        let updated = self
            .collection
            .write(|collection| -> SchoolResult<Document> {
                let activity = collection
                    .find_one(Filter::by_id(name))
                    .ok_or_else(|| SchoolError::ActivityNotFound(name.to_string()))?;

                let limit = participant_limit(activity);
                let enrolled = participant_count(activity);

                let already = Filter::by_id(name).is_in(PARTICIPANTS, [email]);
                if collection.count_documents(already) > 0 {
                    return Err(SchoolError::AlreadySignedUp {
                        activity: name.to_string(),
                        email: email.to_string(),
                    });
                }

                if limit.is_some_and(|limit| enrolled >= limit) {
                    return Err(SchoolError::ActivityFull(name.to_string()));
                }

                collection.update_one(Filter::by_id(name), Update::new().push(PARTICIPANTS, email));

                collection
                    .find_one(Filter::by_id(name))
                    .cloned()
                    .ok_or_else(|| SchoolError::ActivityNotFound(name.to_string()))
            })
            .await?;

        debug!(activity = name, email, "signed up");
        Ok(Activity::from_document(updated)?)
    }
}
