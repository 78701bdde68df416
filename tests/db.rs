//! Session store behavior against a real on-disk database.

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;
use tempo::db::Database;
use tempo::models::{FocusSession, SessionSpec};

fn session(name: &str, created_offset_hours: i64) -> FocusSession {
    let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
        + Duration::hours(created_offset_hours);
    let mut session = FocusSession::new(
        SessionSpec {
            activity_name: Some(name.into()),
            color_tag: Some("#ff8800".into()),
            total_seconds: 1500,
        },
        created_at,
    );
    session.spent_seconds = 600;
    session
}

#[tokio::test]
async fn insert_then_get_round_trips_every_field() {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("tempo.db")).unwrap();

    let written = session("reading", 0);
    db.insert_session(&written).await.unwrap();

    let loaded = db.get_session(&written.id).await.unwrap().unwrap();
    assert_eq!(loaded, written);

    assert!(db.get_session("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn range_query_is_half_open_and_oldest_first() {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("tempo.db")).unwrap();

    // Inserted out of order on purpose
    for offset in [30, 0, 12, 24, 47] {
        db.insert_session(&session("s", offset)).await.unwrap();
    }

    let from = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let to = from + Duration::hours(30);
    let in_range = db.get_sessions_in_range(from, to).await.unwrap();

    // The session at exactly `to` is excluded, the one at `from` included
    let offsets: Vec<i64> = in_range
        .iter()
        .map(|s| (s.created_at - from).num_hours())
        .collect();
    assert_eq!(offsets, vec![0, 12, 24]);
}

#[tokio::test]
async fn save_session_upserts_progress() {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("tempo.db")).unwrap();

    let mut record = session("writing", 0);
    db.save_session(&record).await.unwrap();

    record.spent_seconds = 900;
    record.paused_amount = 3;
    record.completed = true;
    db.save_session(&record).await.unwrap();

    let loaded = db.get_session(&record.id).await.unwrap().unwrap();
    assert_eq!(loaded.spent_seconds, 900);
    assert_eq!(loaded.paused_amount, 3);
    assert!(loaded.completed);
}

#[tokio::test]
async fn recent_sessions_are_newest_first_and_limited() {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("tempo.db")).unwrap();

    for offset in 0..5 {
        db.insert_session(&session("s", offset)).await.unwrap();
    }

    let recent = db.list_recent_sessions(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert!(recent.windows(2).all(|pair| pair[0].created_at >= pair[1].created_at));
}
