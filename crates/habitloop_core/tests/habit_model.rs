use habitloop_core::{Habit, HabitValidationError};
use std::collections::BTreeSet;
use uuid::Uuid;

#[test]
fn new_sets_defaults_and_trims_name() {
    let habit = Habit::new("  Morning run  ").unwrap();

    assert!(!habit.id.is_nil());
    assert_eq!(habit.name, "Morning run");
    assert!(habit.created_at > 0);
    assert!(habit.completion_days.is_empty());
}

#[test]
fn new_rejects_empty_and_whitespace_names() {
    assert_eq!(Habit::new("").unwrap_err(), HabitValidationError::EmptyName);
    assert_eq!(
        Habit::new("   ").unwrap_err(),
        HabitValidationError::EmptyName
    );
    assert_eq!(
        Habit::new("\t\n").unwrap_err(),
        HabitValidationError::EmptyName
    );
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Habit::with_id(Uuid::nil(), "read", 1_700_000_000_000).unwrap_err();
    assert_eq!(err, HabitValidationError::NilId);
}

#[test]
fn rename_trims_and_rejects_blank() {
    let mut habit = Habit::new("draft").unwrap();

    habit.rename("  Stretch  ").unwrap();
    assert_eq!(habit.name, "Stretch");

    let err = habit.rename("   ").unwrap_err();
    assert_eq!(err, HabitValidationError::EmptyName);
    assert_eq!(habit.name, "Stretch");
}

#[test]
fn completion_set_has_set_semantics() {
    let mut habit = Habit::new("meditate").unwrap();

    assert!(habit.mark_completed(20_346));
    assert!(!habit.mark_completed(20_346));
    assert_eq!(habit.completion_days.len(), 1);
    assert!(habit.is_completed(20_346));

    assert!(habit.clear_completed(20_346));
    assert!(!habit.clear_completed(20_346));
    assert!(!habit.is_completed(20_346));
}

#[test]
fn validate_rejects_calendar_range_days() {
    let mut habit = Habit::new("journal").unwrap();
    habit.completion_days.insert(20_250_915);

    let err = habit.validate().unwrap_err();
    assert_eq!(err, HabitValidationError::InvalidCompletionDay(20_250_915));
}

#[test]
fn validate_rejects_negative_days() {
    let mut habit = Habit::new("journal").unwrap();
    habit.completion_days.insert(-1);

    let err = habit.validate().unwrap_err();
    assert_eq!(err, HabitValidationError::InvalidCompletionDay(-1));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let habit_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut habit = Habit::with_id(habit_id, "Read 20 pages", 1_700_000_000_000).unwrap();
    habit.mark_completed(20_345);
    habit.mark_completed(20_346);

    let json = serde_json::to_value(&habit).unwrap();
    assert_eq!(json["id"], habit_id.to_string());
    assert_eq!(json["name"], "Read 20 pages");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["completion_days"], serde_json::json!([20_345, 20_346]));

    let decoded: Habit = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, habit);
}

#[test]
fn completion_days_serialize_in_ascending_order() {
    let mut habit = Habit::new("walk").unwrap();
    habit.mark_completed(30);
    habit.mark_completed(10);
    habit.mark_completed(20);

    let ordered: Vec<i64> = habit.completion_days.iter().copied().collect();
    assert_eq!(ordered, vec![10, 20, 30]);
    assert_eq!(
        habit.completion_days,
        BTreeSet::from([10_i64, 20_i64, 30_i64])
    );
}
