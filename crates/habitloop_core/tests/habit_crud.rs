use habitloop_core::db::open_db_in_memory;
use habitloop_core::{
    Habit, HabitRepository, HabitService, HabitValidationError, RepoError, SqliteHabitRepository,
};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);

    let habit = store.create_habit("  Morning run  ").unwrap();
    assert_eq!(habit.name, "Morning run");
    assert!(habit.completion_days.is_empty());

    let loaded = store.get_habit(habit.id).unwrap().unwrap();
    assert_eq!(loaded, habit);
}

#[test]
fn create_rejects_blank_names_and_stores_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);

    for blank in ["", "   ", "\t"] {
        let err = store.create_habit(blank).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(HabitValidationError::EmptyName)
        ));
    }

    assert!(store.list_habits().unwrap().is_empty());
}

#[test]
fn rename_persists_and_rejects_blank() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);

    let mut habit = store.create_habit("draft").unwrap();
    store.rename_habit(&mut habit, "  Stretch  ").unwrap();

    let loaded = store.get_habit(habit.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Stretch");

    let err = store.rename_habit(&mut habit, "   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(HabitValidationError::EmptyName)
    ));
    let unchanged = store.get_habit(habit.id).unwrap().unwrap();
    assert_eq!(unchanged.name, "Stretch");
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);

    let habit = Habit::new("missing").unwrap();
    let err = repo.update_habit(&habit).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == habit.id));
}

#[test]
fn list_orders_by_creation_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);

    let older = Habit::with_id(Uuid::new_v4(), "older", 1_000).unwrap();
    let newer = Habit::with_id(Uuid::new_v4(), "newer", 2_000).unwrap();
    // Insert newest first to prove ordering comes from created_at.
    repo.insert_habit(&newer).unwrap();
    repo.insert_habit(&older).unwrap();

    let listed = repo.list_habits().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, older.id);
    assert_eq!(listed[1].id, newer.id);
}

#[test]
fn completion_days_survive_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);

    let mut habit = store.create_habit("meditate").unwrap();
    store.set_completed(&mut habit, 20_344, true).unwrap();
    store.set_completed(&mut habit, 20_345, true).unwrap();
    store.set_completed(&mut habit, 20_346, true).unwrap();
    store.set_completed(&mut habit, 20_345, false).unwrap();

    let loaded = store.get_habit(habit.id).unwrap().unwrap();
    let days: Vec<i64> = loaded.completion_days.iter().copied().collect();
    assert_eq!(days, vec![20_344, 20_346]);
}

#[test]
fn delete_removes_habit_from_subsequent_queries() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);

    let keep = store.create_habit("keep").unwrap();
    let mut gone = store.create_habit("gone").unwrap();
    store.set_completed(&mut gone, 20_346, true).unwrap();

    store.delete_habit(&gone).unwrap();

    let listed = store.list_habits().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
    assert!(store.get_habit(gone.id).unwrap().is_none());

    // Completion rows go with the habit.
    let orphaned: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM habit_completions WHERE habit_uuid = ?1;",
            [gone.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphaned, 0);
}

#[test]
fn delete_missing_habit_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);

    let never_stored = Habit::new("never stored").unwrap();
    let err = store.delete_habit(&never_stored).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == never_stored.id));
}

#[test]
fn read_path_rejects_invalid_persisted_state() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);

    let habit = store.create_habit("tampered").unwrap();
    // Calendar-style day written behind the repository's back.
    conn.execute(
        "INSERT INTO habit_completions (habit_uuid, day) VALUES (?1, 20250915);",
        [habit.id.to_string()],
    )
    .unwrap();

    let err = store.get_habit(habit.id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(HabitValidationError::InvalidCompletionDay(20_250_915))
    ));
}
