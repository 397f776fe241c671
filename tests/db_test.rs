mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::create_test_db;
use quizforge::db::{Db, PreferencesUpdate};
use quizforge::models::ScoreField;

async fn register(db: &Db, name: &str) -> i64 {
    db.create_profile(name, &format!("{name}@example.com"), "default", "2025-01-01")
        .await
        .unwrap()
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn test_new_profile_has_defaults() {
    let db = create_test_db().await;
    let id = register(&db, "ada").await;

    let profile = db.get_profile(id).await.unwrap().unwrap();
    assert_eq!(profile.display_name, "ada");
    assert_eq!(profile.all_time_score, 0);
    assert_eq!(profile.weekly_score, 0);
    assert_eq!(profile.monthly_score, 0);
    assert_eq!(profile.last_game_score, 0);
    assert_eq!(profile.preferred_difficulty, "any");
    assert_eq!(profile.preferred_question_count, 10);
    assert_eq!(profile.notification_hour, -1);
    assert_eq!(profile.daily_streak, 0);
    assert_eq!(profile.last_attempt_date, None);
}

#[tokio::test]
async fn test_missing_profile_is_none() {
    let db = create_test_db().await;
    assert!(db.get_profile(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_game_score_accumulates_and_last_game_overwrites() {
    let db = create_test_db().await;
    let id = register(&db, "ada").await;

    db.add_game_score(id, 12).await.unwrap();
    db.add_game_score(id, 5).await.unwrap();

    let profile = db.get_profile(id).await.unwrap().unwrap();
    assert_eq!(profile.all_time_score, 17);
    assert_eq!(profile.weekly_score, 17);
    assert_eq!(profile.monthly_score, 17);
    assert_eq!(profile.last_game_score, 5);
}

#[tokio::test]
async fn test_preference_update_touches_only_named_fields() {
    let db = create_test_db().await;
    let id = register(&db, "ada").await;
    db.add_game_score(id, 9).await.unwrap();

    db.update_preferences(
        id,
        &PreferencesUpdate {
            preferred_difficulty: Some("hard".to_string()),
            preferred_question_count: None,
            notification_hour: Some(18),
            avatar: None,
        },
    )
    .await
    .unwrap();

    let profile = db.get_profile(id).await.unwrap().unwrap();
    assert_eq!(profile.preferred_difficulty, "hard");
    assert_eq!(profile.notification_hour, 18);
    // untouched fields keep their values
    assert_eq!(profile.preferred_question_count, 10);
    assert_eq!(profile.avatar, "default");
    assert_eq!(profile.all_time_score, 9);
}

#[tokio::test]
async fn test_streak_update_leaves_scores_alone() {
    let db = create_test_db().await;
    let id = register(&db, "ada").await;
    db.add_game_score(id, 4).await.unwrap();

    db.update_streak(id, 3, "2025-03-10").await.unwrap();

    let profile = db.get_profile(id).await.unwrap().unwrap();
    assert_eq!(profile.daily_streak, 3);
    assert_eq!(profile.last_attempt_date.as_deref(), Some("2025-03-10"));
    assert_eq!(profile.all_time_score, 4);
}

#[tokio::test]
async fn test_achievement_unlock_is_idempotent() {
    let db = create_test_db().await;
    let id = register(&db, "ada").await;

    let first = db
        .unlock_achievement(id, "perfect_score", "2025-03-10T10:00:00+00:00")
        .await
        .unwrap();
    assert!(first);

    // second unlock is ignored and the original timestamp survives
    let second = db
        .unlock_achievement(id, "perfect_score", "2025-04-01T10:00:00+00:00")
        .await
        .unwrap();
    assert!(!second);

    let rows = db.achievements_for_user(id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].unlocked);
    assert_eq!(
        rows[0].unlocked_at.as_deref(),
        Some("2025-03-10T10:00:00+00:00")
    );
}

#[tokio::test]
async fn test_achievements_are_per_user() {
    let db = create_test_db().await;
    let ada = register(&db, "ada").await;
    let bob = register(&db, "bob").await;

    db.unlock_achievement(ada, "daily_champion", "2025-03-10T10:00:00+00:00")
        .await
        .unwrap();

    assert_eq!(db.achievements_for_user(ada).await.unwrap().len(), 1);
    assert!(db.achievements_for_user(bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_leaderboard_orders_by_score_then_id() {
    let db = create_test_db().await;
    let a = register(&db, "a").await;
    let b = register(&db, "b").await;
    let c = register(&db, "c").await;
    let d = register(&db, "d").await;

    db.add_game_score(a, 50).await.unwrap();
    db.add_game_score(b, 80).await.unwrap();
    db.add_game_score(c, 80).await.unwrap();
    db.add_game_score(d, 10).await.unwrap();

    let ordered = db.profiles_ordered(ScoreField::AllTime).await.unwrap();
    let ids: Vec<i64> = ordered.iter().map(|p| p.id).collect();
    // b and c tie at 80; the earlier id wins the tie
    assert_eq!(ids, vec![b, c, a, d]);
}

#[tokio::test]
async fn test_saved_facts_keep_insertion_order() {
    let db = create_test_db().await;
    let id = register(&db, "ada").await;

    assert_eq!(db.next_fact_number(id).await.unwrap(), 1);
    assert_eq!(db.next_fact_number(id).await.unwrap(), 2);

    db.append_saved_fact(id, 1, "Honey never spoils.", "10 Mar 2025")
        .await
        .unwrap();
    db.append_saved_fact(id, 2, "Octopuses have three hearts.", "11 Mar 2025")
        .await
        .unwrap();

    let facts = db.saved_facts(id).await.unwrap();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].fact_number, 1);
    assert_eq!(facts[0].fact_text, "Honey never spoils.");
    assert_eq!(facts[1].fact_number, 2);
    assert_eq!(facts[1].saved_date, "11 Mar 2025");
}

#[tokio::test]
async fn test_user_sessions_round_trip() {
    let db = create_test_db().await;
    let id = register(&db, "ada").await;

    let token = db.create_user_session(id).await.unwrap();
    let user = db.get_user_by_session(&token).await.unwrap().unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.display_name, "ada");

    db.delete_user_session(&token).await.unwrap();
    assert!(db.get_user_by_session(&token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_weekly_reset_fires_alone_after_eight_days() {
    let db = create_test_db().await;
    let ada = register(&db, "ada").await;
    let bob = register(&db, "bob").await;
    db.add_game_score(ada, 30).await.unwrap();
    db.add_game_score(bob, 7).await.unwrap();

    // both periods last reset 8 days ago, within the same month
    db.initialize_reset_state(at(2025, 3, 2)).await.unwrap();

    let report = db.check_and_reset_scores(at(2025, 3, 10)).await.unwrap();
    assert!(report.weekly);
    assert!(!report.monthly);

    for id in [ada, bob] {
        let profile = db.get_profile(id).await.unwrap().unwrap();
        assert_eq!(profile.weekly_score, 0);
        assert_ne!(profile.monthly_score, 0);
        assert_ne!(profile.all_time_score, 0);
    }

    let state = db.reset_state().await.unwrap();
    assert_eq!(
        state.last_weekly_reset.as_deref(),
        Some(at(2025, 3, 10).to_rfc3339().as_str())
    );
    assert_eq!(
        state.last_monthly_reset.as_deref(),
        Some(at(2025, 3, 2).to_rfc3339().as_str())
    );
}

#[tokio::test]
async fn test_monthly_and_weekly_reset_fire_together() {
    let db = create_test_db().await;
    let ada = register(&db, "ada").await;
    db.add_game_score(ada, 30).await.unwrap();

    db.initialize_reset_state(at(2025, 2, 20)).await.unwrap();

    let report = db.check_and_reset_scores(at(2025, 3, 2)).await.unwrap();
    assert!(report.weekly);
    assert!(report.monthly);

    let profile = db.get_profile(ada).await.unwrap().unwrap();
    assert_eq!(profile.weekly_score, 0);
    assert_eq!(profile.monthly_score, 0);
    assert_eq!(profile.all_time_score, 30);
}

#[tokio::test]
async fn test_reset_is_noop_when_nothing_due() {
    let db = create_test_db().await;
    let ada = register(&db, "ada").await;
    db.add_game_score(ada, 30).await.unwrap();

    db.initialize_reset_state(at(2025, 3, 8)).await.unwrap();

    let report = db.check_and_reset_scores(at(2025, 3, 10)).await.unwrap();
    assert!(!report.weekly);
    assert!(!report.monthly);

    let profile = db.get_profile(ada).await.unwrap().unwrap();
    assert_eq!(profile.weekly_score, 30);
    assert_eq!(profile.monthly_score, 30);
}

#[tokio::test]
async fn test_initialize_reset_state_does_not_disturb_existing_row() {
    let db = create_test_db().await;

    db.initialize_reset_state(at(2025, 3, 2)).await.unwrap();
    db.initialize_reset_state(at(2025, 3, 9)).await.unwrap();

    let state = db.reset_state().await.unwrap();
    assert_eq!(
        state.last_weekly_reset.as_deref(),
        Some(at(2025, 3, 2).to_rfc3339().as_str())
    );
}
