//! Quest log use-case service.
//!
//! # Responsibility
//! - Persist the quest log blob (tasks + stats + rollover marker).
//! - Apply xp/health transitions for task actions.
//! - Apply the midnight rollover transition for dailies.
//!
//! # Invariants
//! - Every mutation is committed as a whole-blob write after the
//!   transition succeeds; failed transitions leave the store untouched.
//! - Completing a todo removes it; dailies and habits persist.

use crate::model::day_key::DayKey;
use crate::model::quest::{
    QuestState, Task, TaskKind, TaskValidationError, HABIT_HEALTH_PENALTY, HABIT_XP, TASK_XP,
};
use crate::repo::kv_repo::{KvStore, StoreError, StoreResult};
use crate::service::load_or_default;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const QUEST_STATE_KEY: &str = "quest_state";

/// Service error for quest log use-cases.
#[derive(Debug)]
pub enum QuestServiceError {
    /// Task failed its creation preconditions.
    Validation(TaskValidationError),
    /// No task exists under the given id.
    TaskNotFound(Uuid),
    /// The action does not apply to the task's kind.
    WrongKind {
        expected: TaskKind,
        actual: TaskKind,
    },
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for QuestServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::WrongKind { expected, actual } => write!(
                f,
                "action applies to {} tasks, but task is a {}",
                expected.as_str(),
                actual.as_str()
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QuestServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for QuestServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for QuestServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of a midnight rollover check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayRollover {
    /// Marker already matches `today`.
    Unchanged,
    /// Daily flags were reset and penalties applied.
    Applied { missed_dailies: usize },
}

/// Quest log facade over the key-value store.
pub struct QuestService<S: KvStore> {
    store: S,
}

impl<S: KvStore> QuestService<S> {
    /// Creates a service over the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current quest state; missing or malformed blobs read as a fresh
    /// state with default stats.
    pub fn state(&self) -> StoreResult<QuestState> {
        load_or_default(&self.store, QUEST_STATE_KEY, "quest")
    }

    /// Creates a task of the given kind.
    pub fn add_task(
        &self,
        kind: TaskKind,
        title: impl Into<String>,
    ) -> Result<Task, QuestServiceError> {
        let task = Task::new(kind, title)?;
        let mut state = self.state()?;
        state.tasks.push(task.clone());
        self.commit(&state)?;

        info!(
            "event=task_added module=quest status=ok kind={} id={}",
            task.kind.as_str(),
            task.id
        );
        Ok(task)
    }

    /// Removes a task by id.
    pub fn remove_task(&self, id: Uuid) -> Result<QuestState, QuestServiceError> {
        let mut state = self.state()?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        if state.tasks.len() == before {
            return Err(QuestServiceError::TaskNotFound(id));
        }
        self.commit(&state)?;
        Ok(state)
    }

    /// Completes a todo: awards xp and removes the task.
    pub fn complete_todo(&self, id: Uuid) -> Result<QuestState, QuestServiceError> {
        let mut state = self.state()?;
        expect_kind(&state, id, TaskKind::Todo)?;
        state.tasks.retain(|task| task.id != id);
        state.stats.gain_xp(TASK_XP);
        self.commit(&state)?;

        info!("event=todo_completed module=quest status=ok id={id}");
        Ok(state)
    }

    /// Checks or unchecks a daily. Newly checking awards xp; unchecking
    /// adjusts nothing else.
    pub fn set_daily_done(&self, id: Uuid, done: bool) -> Result<QuestState, QuestServiceError> {
        let mut state = self.state()?;
        expect_kind(&state, id, TaskKind::Daily)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(QuestServiceError::TaskNotFound(id))?;

        let newly_checked = done && !task.done;
        task.done = done;
        if newly_checked {
            state.stats.gain_xp(TASK_XP);
        }
        self.commit(&state)?;
        Ok(state)
    }

    /// Scores a habit up (+xp) or down (−health).
    pub fn score_habit(&self, id: Uuid, up: bool) -> Result<QuestState, QuestServiceError> {
        let mut state = self.state()?;
        expect_kind(&state, id, TaskKind::Habit)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(QuestServiceError::TaskNotFound(id))?;

        if up {
            task.habit_score += 1;
            state.stats.gain_xp(HABIT_XP);
        } else {
            task.habit_score -= 1;
            state.stats.lose_health(HABIT_HEALTH_PENALTY);
        }
        self.commit(&state)?;
        Ok(state)
    }

    /// Midnight rollover check: resets daily flags and applies missed
    /// penalties when `today` differs from the stored marker.
    pub fn roll_over(&self, today: DayKey) -> StoreResult<DayRollover> {
        let mut state = self.state()?;
        let had_marker = state.last_rollover.is_some();
        let Some(missed_dailies) = state.roll_over(today) else {
            // The first check ever anchors the marker; persist it.
            if !had_marker {
                self.commit(&state)?;
            }
            return Ok(DayRollover::Unchanged);
        };
        self.commit(&state)?;

        info!(
            "event=day_rollover module=quest status=ok date={today} missed={missed_dailies}"
        );
        Ok(DayRollover::Applied { missed_dailies })
    }

    fn commit(&self, state: &QuestState) -> StoreResult<()> {
        self.store.put_json(QUEST_STATE_KEY, state)
    }
}

fn expect_kind(state: &QuestState, id: Uuid, expected: TaskKind) -> Result<(), QuestServiceError> {
    let task = state
        .task(id)
        .ok_or(QuestServiceError::TaskNotFound(id))?;
    if task.kind != expected {
        return Err(QuestServiceError::WrongKind {
            expected,
            actual: task.kind,
        });
    }
    Ok(())
}
