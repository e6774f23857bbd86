//! Fixed seed data loaded into empty collections at startup.

use crate::{
    credentials::hash_password,
    error::SchoolResult,
    records::{Activity, Announcement, Role, ScheduleDetails, TeacherAccount},
};

#[allow(clippy::too_many_arguments)]
fn activity(
    name: &str,
    description: &str,
    schedule: &str,
    days: &[&str],
    start_time: &str,
    end_time: &str,
    max_participants: i32,
    participants: &[&str],
) -> Activity {
    Activity {
        name: name.to_string(),
        description: description.to_string(),
        schedule: schedule.to_string(),
        schedule_details: ScheduleDetails {
            days: days.iter().map(|day| day.to_string()).collect(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        },
        max_participants,
        participants: participants.iter().map(|email| email.to_string()).collect(),
    }
}

/// The activities offered at the start of term.
pub fn initial_activities() -> Vec<Activity> {
    vec![
        activity(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Mondays and Fridays, 3:15 PM - 4:45 PM",
            &["Monday", "Friday"],
            "15:15",
            "16:45",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        activity(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 7:00 AM - 8:00 AM",
            &["Tuesday", "Thursday"],
            "07:00",
            "08:00",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        activity(
            "Morning Fitness",
            "Early morning physical training and exercises",
            "Mondays, Wednesdays, Fridays, 6:30 AM - 7:45 AM",
            &["Monday", "Wednesday", "Friday"],
            "06:30",
            "07:45",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        ),
        activity(
            "Soccer Team",
            "Join the school soccer team and compete in matches",
            "Tuesdays and Thursdays, 3:30 PM - 5:30 PM",
            &["Tuesday", "Thursday"],
            "15:30",
            "17:30",
            22,
            &["liam@mergington.edu", "noah@mergington.edu"],
        ),
        activity(
            "Basketball Team",
            "Practice and compete in basketball tournaments",
            "Wednesdays and Fridays, 3:15 PM - 5:00 PM",
            &["Wednesday", "Friday"],
            "15:15",
            "17:00",
            15,
            &["ava@mergington.edu", "mia@mergington.edu"],
        ),
        activity(
            "Art Club",
            "Explore various art techniques and create masterpieces",
            "Thursdays, 3:15 PM - 5:00 PM",
            &["Thursday"],
            "15:15",
            "17:00",
            15,
            &["amelia@mergington.edu", "harper@mergington.edu"],
        ),
        activity(
            "Drama Club",
            "Act, direct, and produce plays and performances",
            "Mondays and Wednesdays, 3:30 PM - 5:30 PM",
            &["Monday", "Wednesday"],
            "15:30",
            "17:30",
            20,
            &["ella@mergington.edu", "scarlett@mergington.edu"],
        ),
        activity(
            "Math Club",
            "Solve challenging problems and prepare for math competitions",
            "Tuesdays, 7:15 AM - 8:00 AM",
            &["Tuesday"],
            "07:15",
            "08:00",
            10,
            &["james@mergington.edu", "benjamin@mergington.edu"],
        ),
        activity(
            "Debate Team",
            "Develop public speaking and argumentation skills",
            "Fridays, 3:30 PM - 5:30 PM",
            &["Friday"],
            "15:30",
            "17:30",
            12,
            &["charlotte@mergington.edu", "amelia@mergington.edu"],
        ),
        activity(
            "Weekend Robotics Workshop",
            "Build and program robots in our state-of-the-art workshop",
            "Saturdays, 10:00 AM - 2:00 PM",
            &["Saturday"],
            "10:00",
            "14:00",
            15,
            &["ethan@mergington.edu", "oliver@mergington.edu"],
        ),
        activity(
            "Science Olympiad",
            "Weekend science competition preparation for regional and state events",
            "Saturdays, 1:00 PM - 4:00 PM",
            &["Saturday"],
            "13:00",
            "16:00",
            18,
            &["isabella@mergington.edu", "lucas@mergington.edu"],
        ),
        activity(
            "Sunday Chess Tournament",
            "Weekly tournament for serious chess players with rankings",
            "Sundays, 2:00 PM - 5:00 PM",
            &["Sunday"],
            "14:00",
            "17:00",
            16,
            &["william@mergington.edu", "jacob@mergington.edu"],
        ),
    ]
}

/// The staff accounts, with their passwords hashed.
///
/// Each call runs Argon2 once per account.
pub fn initial_teachers() -> SchoolResult<Vec<TeacherAccount>> {
    [
        ("mrodriguez", "Ms. Rodriguez", "art123", Role::Teacher),
        ("mchen", "Mr. Chen", "chess456", Role::Teacher),
        ("principal", "Principal Martinez", "admin789", Role::Admin),
    ]
    .into_iter()
    .map(|(username, display_name, password, role)| -> SchoolResult<TeacherAccount> {
        Ok(TeacherAccount {
            username: username.to_string(),
            display_name: display_name.to_string(),
            password: hash_password(password)?,
            role,
        })
    })
    .collect()
}

/// The announcements posted at the start of term. They carry no identity; one is
/// generated when they are stored.
pub fn initial_announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: None,
            title: "Spring Activities Fair".to_string(),
            message: "Join us for the Spring Activities Fair on March 15th! Explore all available clubs and sign up for your favorites. Free refreshments will be provided!".to_string(),
            start_date: Some("2026-03-01".to_string()),
            expiration_date: "2026-03-15".to_string(),
            created_by: "principal".to_string(),
            created_at: None,
        },
        Announcement {
            id: None,
            title: "Welcome Back Students!".to_string(),
            message: "We're excited to have you back for the new semester. Check out our updated activity schedule and join something new today!".to_string(),
            start_date: None,
            expiration_date: "2026-02-28".to_string(),
            created_by: "principal".to_string(),
            created_at: None,
        },
    ]
}
