//! Persistence tests for the `SQLite` gamification repository.

use super::helpers::{TempDatabase, database};
use crate::test_helpers::at;
use done::gamification::{
    adapters::sqlite::SqliteGamificationRepository, domain::GamificationState,
    ports::GamificationRepository,
};
use rstest::rstest;

fn store_raw_payload(db: &TempDatabase, payload: &str) -> eyre::Result<()> {
    use diesel::connection::SimpleConnection;

    let mut connection = db.pool.get()?;
    connection.batch_execute(&format!(
        "INSERT INTO gamification (key, payload) VALUES ('stats', '{payload}')"
    ))?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_database_loads_default_record(
    database: eyre::Result<TempDatabase>,
) -> eyre::Result<()> {
    let db = database?;
    let repo = SqliteGamificationRepository::new(db.pool.clone());

    assert_eq!(repo.load().await?, GamificationState::default());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_record_survives_reopen(database: eyre::Result<TempDatabase>) -> eyre::Result<()> {
    let db = database?;
    let mut state = GamificationState {
        total_points: 215,
        completed_count: 14,
        current_streak: 3,
        longest_streak: 8,
        last_completion_date: Some(at(2026, 10, 19, 9)),
        first_completion_date: Some(at(2026, 8, 2, 10)),
        ..GamificationState::default()
    };
    state.unlock("first_task");
    SqliteGamificationRepository::new(db.pool.clone())
        .save(&state)
        .await?;

    let loaded = SqliteGamificationRepository::new(db.reopen()?).load().await?;

    assert_eq!(loaded, state);
    assert_eq!(loaded.level(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_payload_with_nulls_loads(database: eyre::Result<TempDatabase>) -> eyre::Result<()> {
    let db = database?;
    store_raw_payload(
        &db,
        r#"{"total_points":130,"level":9,"completed_tasks":null,"achievements":null}"#,
    )?;

    let loaded = SqliteGamificationRepository::new(db.pool.clone())
        .load()
        .await?;

    assert_eq!(loaded.total_points, 130);
    assert_eq!(loaded.completed_count, 0);
    assert_eq!(loaded.level(), 2);
    assert!(loaded.achievements.is_empty());
    Ok(())
}

#[rstest]
#[case::negative_points(r#"{"total_points":-5,"completed_tasks":2}"#, 2)]
#[case::not_json("stats: broken", 0)]
#[case::truncated(r#"{"total_points":"#, 0)]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_payload_loads_with_defaults(
    database: eyre::Result<TempDatabase>,
    #[case] payload: &str,
    #[case] completed_count: u64,
) -> eyre::Result<()> {
    let db = database?;
    store_raw_payload(&db, payload)?;

    let loaded = SqliteGamificationRepository::new(db.pool.clone())
        .load()
        .await?;

    assert_eq!(loaded.total_points, 0);
    assert_eq!(loaded.completed_count, completed_count);
    Ok(())
}
