//! Typed records stored in the school collections.

use bson::Bson;
use serde::{Deserialize, Serialize};

use docshelf_core::document::Record;

/// When an activity meets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDetails {
    pub days: Vec<String>,
    /// 24-hour `HH:MM`.
    pub start_time: String,
    /// 24-hour `HH:MM`.
    pub end_time: String,
}

/// An extracurricular activity, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub name: String,
    pub description: String,
    /// Human-readable schedule, e.g. `Mondays and Fridays, 3:15 PM - 4:45 PM`.
    pub schedule: String,
    pub schedule_details: ScheduleDetails,
    pub max_participants: i32,
    /// Student e-mail addresses.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Record for Activity {
    fn id(&self) -> Option<Bson> {
        Some(Bson::String(self.name.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Admin,
}

/// A staff account, identified by its username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAccount {
    pub username: String,
    pub display_name: String,
    /// Argon2 PHC hash of the account password.
    pub password: String,
    pub role: Role,
}

impl Record for TeacherAccount {
    fn id(&self) -> Option<Bson> {
        Some(Bson::String(self.username.clone()))
    }
}

/// A dated notice shown to students.
///
/// Dates are ISO-8601 strings so that the store's lexicographic range clauses order them
/// chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub message: String,
    pub start_date: Option<String>,
    pub expiration_date: String,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Record for Announcement {
    fn id(&self) -> Option<Bson> {
        self.id.clone().map(Bson::String)
    }
}
