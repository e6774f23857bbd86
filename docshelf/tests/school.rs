#![cfg(feature = "school")]

use chrono::NaiveDate;
use docshelf::{
    bson::doc,
    prelude::*,
    school::{AnnouncementChanges, NewAnnouncement, SchoolError, SchoolStore, TeacherAccount, verify_password},
};

async fn store() -> SchoolStore {
    let store = SchoolStore::new();
    store.seed_if_empty().await.unwrap();
    store
}

#[tokio::test]
async fn reseeding_keeps_existing_data() {
    let store = store().await;
    store.activities().signup("Art Club", "zoe@mergington.edu").await.unwrap();

    let report = store.seed_if_empty().await.unwrap();

    assert!(report.is_empty());
    let art = store.activities().get("Art Club").await.unwrap().unwrap();
    assert_eq!(art.participants.len(), 3);
}

#[tokio::test]
async fn signup_flow() {
    let store = store().await;
    let activities = store.activities();

    let debate = activities.signup("Debate Team", "zoe@mergington.edu").await.unwrap();
    assert!(debate.participants.contains(&"zoe@mergington.edu".to_string()));

    assert!(matches!(
        activities.signup("Debate Team", "zoe@mergington.edu").await,
        Err(SchoolError::AlreadySignedUp { .. })
    ));

    let monday = activities.meeting_on("Monday").await.unwrap();
    assert!(monday.iter().any(|activity| activity.name == "Chess Club"));
    assert!(monday.iter().all(|activity| activity.schedule_details.days.contains(&"Monday".to_string())));
}

#[tokio::test]
async fn announcement_lifecycle() {
    let store = store().await;
    let announcements = store.announcements();
    let day = |value: &str| NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap();

    let created = announcements
        .create(NewAnnouncement {
            title: "Picture Day".into(),
            message: "Bring your best smile".into(),
            start_date: Some("2026-04-01".into()),
            expiration_date: "2026-04-10".into(),
            created_by: "mrodriguez".into(),
        })
        .await
        .unwrap();
    let id = created.get_str(ID_FIELD).unwrap().to_string();

    assert!(announcements.active_on(day("2026-03-31")).await.is_empty());
    assert_eq!(announcements.active_on(day("2026-04-05")).await, vec![created.clone()]);

    let moved = announcements
        .update(&id, AnnouncementChanges { expiration_date: Some("2026-04-20".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(moved.get_str("expiration_date").unwrap(), "2026-04-20");
    assert_eq!(announcements.active_on(day("2026-04-15")).await.len(), 1);

    announcements.delete(&id).await.unwrap();
    assert!(announcements.active_on(day("2026-04-15")).await.is_empty());
    assert!(matches!(
        announcements.update(&id, AnnouncementChanges::default()).await,
        Err(SchoolError::AnnouncementNotFound(_))
    ));
}

#[tokio::test]
async fn teachers_are_keyed_by_username() {
    let store = store().await;

    let document = store.teachers().find_one(doc! { "_id": "mchen" }).await.unwrap();
    let account = TeacherAccount::from_document(document).unwrap();
    assert!(verify_password(&account.password, "chess456"));
    assert!(!verify_password(&account.password, "art123"));

    let mut replacement = account.to_document().unwrap();
    replacement.insert("display_name", "Dr. Chen");
    store.teachers().insert_one(replacement).await;

    assert_eq!(store.teachers().len().await, 3);
    assert_eq!(
        store.teachers().find_one(Filter::by_id("mchen")).await.unwrap().get_str("display_name").unwrap(),
        "Dr. Chen"
    );
}
