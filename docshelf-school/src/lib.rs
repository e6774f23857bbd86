//! The school activities store built on docshelf collections.
//!
//! [`SchoolStore`] holds three collections. `activities` is identified by activity name
//! and sequence-backed by default, `teachers` is keyed by username, and
//! `announcements` carries generated identities. The composition root constructs the
//! store once, seeds it, and hands clones to request handlers.
//!
//! # Quick Start
//!
//! ```ignore
//! use docshelf_school::SchoolStore;
//!
//! #[tokio::main]
//! async fn main() -> docshelf_school::SchoolResult<()> {
//!     let store = SchoolStore::new();
//!     store.seed_if_empty().await?;
//!
//!     let chess = store.activities().signup("Chess Club", "zoe@mergington.edu").await?;
//!     println!("{} now has {} participants", chess.name, chess.participants.len());
//!
//!     for announcement in store.announcements().active_today().await {
//!         println!("{}", announcement.get_str("title").unwrap_or_default());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod activities;
pub mod announcements;
pub mod credentials;
pub mod error;
pub mod records;
pub mod seed;
pub mod store;

pub use activities::Activities;
pub use announcements::{AnnouncementChanges, Announcements, NewAnnouncement};
pub use credentials::{hash_password, verify_password};
pub use error::{SchoolError, SchoolResult};
pub use records::{Activity, Announcement, Role, ScheduleDetails, TeacherAccount};
pub use store::{SchoolStore, SchoolStoreBuilder, SeedReport};
