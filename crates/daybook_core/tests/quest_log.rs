use daybook_core::db::open_store_in_memory;
use daybook_core::model::quest::{MAX_HEALTH, MISSED_DAILY_PENALTY, TASK_XP};
use daybook_core::service::quest_service::{DayRollover, QuestService, QuestServiceError};
use daybook_core::{DayKey, SqliteKvStore, TaskKind, TaskValidationError};

fn day(value: &str) -> DayKey {
    value.parse().unwrap()
}

fn service(conn: &rusqlite::Connection) -> QuestService<SqliteKvStore<'_>> {
    QuestService::new(SqliteKvStore::try_new(conn).unwrap())
}

#[test]
fn added_tasks_persist_with_defaults() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let todo = quests.add_task(TaskKind::Todo, "water the plants").unwrap();
    let habit = quests.add_task(TaskKind::Habit, "stretch").unwrap();

    let state = quests.state().unwrap();
    assert_eq!(state.tasks.len(), 2);
    assert!(!state.task(todo.id).unwrap().done);
    assert_eq!(state.task(habit.id).unwrap().habit_score, 0);
    assert_eq!(state.stats.level, 1);
    assert_eq!(state.stats.health, MAX_HEALTH);
}

#[test]
fn blank_titles_are_rejected() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let err = quests.add_task(TaskKind::Daily, "  ").unwrap_err();
    assert!(matches!(
        err,
        QuestServiceError::Validation(TaskValidationError::BlankTitle)
    ));
    assert!(quests.state().unwrap().tasks.is_empty());
}

#[test]
fn completing_a_todo_awards_xp_and_removes_it() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let todo = quests.add_task(TaskKind::Todo, "mail the letter").unwrap();
    let state = quests.complete_todo(todo.id).unwrap();

    assert!(state.task(todo.id).is_none());
    assert_eq!(state.stats.xp, TASK_XP);

    let err = quests.complete_todo(todo.id).unwrap_err();
    assert!(matches!(err, QuestServiceError::TaskNotFound(id) if id == todo.id));
}

#[test]
fn completing_enough_todos_levels_up_and_restores_health() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let habit = quests.add_task(TaskKind::Habit, "skip breakfast").unwrap();
    quests.score_habit(habit.id, false).unwrap();
    assert!(quests.state().unwrap().stats.health < MAX_HEALTH);

    for index in 0..10 {
        let todo = quests
            .add_task(TaskKind::Todo, format!("errand {index}"))
            .unwrap();
        quests.complete_todo(todo.id).unwrap();
    }

    let stats = quests.state().unwrap().stats;
    assert_eq!(stats.level, 2);
    assert_eq!(stats.xp, 0);
    assert_eq!(stats.health, MAX_HEALTH);
}

#[test]
fn daily_check_awards_xp_only_on_the_transition() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let daily = quests.add_task(TaskKind::Daily, "morning pages").unwrap();

    let state = quests.set_daily_done(daily.id, true).unwrap();
    assert_eq!(state.stats.xp, TASK_XP);

    // Re-checking an already-done daily awards nothing.
    let state = quests.set_daily_done(daily.id, true).unwrap();
    assert_eq!(state.stats.xp, TASK_XP);

    let state = quests.set_daily_done(daily.id, false).unwrap();
    assert_eq!(state.stats.xp, TASK_XP);
    assert!(!state.task(daily.id).unwrap().done);
}

#[test]
fn habit_scoring_moves_xp_and_health() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let habit = quests.add_task(TaskKind::Habit, "late-night snack").unwrap();

    let state = quests.score_habit(habit.id, true).unwrap();
    assert_eq!(state.task(habit.id).unwrap().habit_score, 1);
    assert!(state.stats.xp > 0);

    let state = quests.score_habit(habit.id, false).unwrap();
    assert_eq!(state.task(habit.id).unwrap().habit_score, 0);
    assert!(state.stats.health < MAX_HEALTH);
}

#[test]
fn actions_reject_the_wrong_task_kind() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let daily = quests.add_task(TaskKind::Daily, "tidy desk").unwrap();
    let err = quests.complete_todo(daily.id).unwrap_err();
    assert!(matches!(
        err,
        QuestServiceError::WrongKind {
            expected: TaskKind::Todo,
            actual: TaskKind::Daily,
        }
    ));
}

#[test]
fn rollover_resets_dailies_and_penalizes_missed_ones_once() {
    let conn = open_store_in_memory().unwrap();
    let quests = service(&conn);

    let done_daily = quests.add_task(TaskKind::Daily, "journal").unwrap();
    let missed_daily = quests.add_task(TaskKind::Daily, "run").unwrap();
    let todo = quests.add_task(TaskKind::Todo, "untouched todo").unwrap();
    quests.set_daily_done(done_daily.id, true).unwrap();

    // The first check only anchors the marker.
    assert_eq!(
        quests.roll_over(day("2026-03-04")).unwrap(),
        DayRollover::Unchanged
    );
    assert_eq!(
        quests.state().unwrap().last_rollover,
        Some(day("2026-03-04"))
    );

    // Crossing midnight: one missed daily, flags reset, marker advances.
    let health_before = quests.state().unwrap().stats.health;
    let outcome = quests.roll_over(day("2026-03-05")).unwrap();
    assert_eq!(outcome, DayRollover::Applied { missed_dailies: 1 });

    let state = quests.state().unwrap();
    assert_eq!(state.stats.health, health_before - MISSED_DAILY_PENALTY);
    assert!(!state.task(done_daily.id).unwrap().done);
    assert!(!state.task(missed_daily.id).unwrap().done);
    assert!(state.task(todo.id).is_some());
    assert_eq!(state.last_rollover, Some(day("2026-03-05")));

    // The same day never rolls twice.
    assert_eq!(
        quests.roll_over(day("2026-03-05")).unwrap(),
        DayRollover::Unchanged
    );
    assert_eq!(quests.state().unwrap().stats.health, state.stats.health);
}
