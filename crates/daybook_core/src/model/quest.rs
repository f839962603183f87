//! Quest log domain model: gamified tasks and player stats.
//!
//! # Responsibility
//! - Define todo/daily/habit task records and the player stat block.
//! - Apply xp/health transitions for task actions and daily rollover.
//!
//! # Invariants
//! - Task ids are stable and never reused.
//! - `health` stays within `0..=MAX_HEALTH`; `level` only increases.
//! - Leveling up carries overflow xp into the new level and restores
//!   health to full.

use crate::model::day_key::DayKey;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Health ceiling and level-up restore target.
pub const MAX_HEALTH: u32 = 50;
/// Xp awarded for finishing a todo or checking a daily.
pub const TASK_XP: u32 = 10;
/// Xp awarded for a positive habit score.
pub const HABIT_XP: u32 = 5;
/// Health lost on a negative habit score.
pub const HABIT_HEALTH_PENALTY: u32 = 5;
/// Health lost per daily left unchecked at rollover.
pub const MISSED_DAILY_PENALTY: u32 = 10;
/// Xp needed to clear a level: `level * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 100;

/// Task category in the quest log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// One-shot item, removed when completed.
    Todo,
    /// Recurring item, completion flag resets every day.
    Daily,
    /// Scored item with no completion flag.
    Habit,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Daily => "daily",
            Self::Habit => "habit",
        }
    }
}

/// Validation failure for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// One quest log item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable task id.
    pub id: Uuid,
    /// Task category.
    pub kind: TaskKind,
    /// Display title.
    pub title: String,
    /// Completion flag. Meaningful for todos and dailies.
    pub done: bool,
    /// Running habit score (ups minus downs). Meaningful for habits.
    pub habit_score: i32,
}

impl Task {
    /// Creates a task with a generated id.
    pub fn new(kind: TaskKind, title: impl Into<String>) -> Result<Self, TaskValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            title,
            done: false,
            habit_score: 0,
        })
    }
}

/// Player stat block driven by task actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Current health, `0..=MAX_HEALTH`.
    pub health: u32,
    /// Xp accumulated toward the next level.
    pub xp: u32,
    /// Current level, starting at 1.
    pub level: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            xp: 0,
            level: 1,
        }
    }
}

impl PlayerStats {
    /// Xp required to clear the current level.
    pub fn xp_to_next_level(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    /// Adds xp, applying as many level-ups as the total supports.
    /// Each level-up restores health to full.
    pub fn gain_xp(&mut self, amount: u32) {
        self.xp += amount;
        while self.xp >= self.xp_to_next_level() {
            self.xp -= self.xp_to_next_level();
            self.level += 1;
            self.health = MAX_HEALTH;
        }
    }

    /// Removes health, flooring at zero.
    pub fn lose_health(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

/// Persisted quest log blob: tasks, stats, and the rollover marker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestState {
    /// All tasks across the three kinds.
    pub tasks: Vec<Task>,
    /// Player stat block.
    #[serde(default)]
    pub stats: PlayerStats,
    /// Day the last rollover was applied, if any.
    pub last_rollover: Option<DayKey>,
}

impl QuestState {
    /// Finds a task by id.
    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Applies the midnight rollover for `today`.
    ///
    /// Every daily left unchecked costs `MISSED_DAILY_PENALTY` health,
    /// all daily completion flags reset, and the marker advances. Calling
    /// again with the same day is a no-op, so a boundary crossing applies
    /// exactly once. The very first check only anchors the marker.
    ///
    /// Returns the number of missed dailies, or `None` when no rollover
    /// was due.
    pub fn roll_over(&mut self, today: DayKey) -> Option<usize> {
        if self.last_rollover == Some(today) {
            return None;
        }
        if self.last_rollover.is_none() {
            self.last_rollover = Some(today);
            return None;
        }

        let mut missed = 0;
        for task in &mut self.tasks {
            if task.kind != TaskKind::Daily {
                continue;
            }
            if !task.done {
                missed += 1;
            }
            task.done = false;
        }

        self.stats
            .lose_health(MISSED_DAILY_PENALTY * missed as u32);
        self.last_rollover = Some(today);
        Some(missed)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerStats, Task, TaskKind, TaskValidationError, MAX_HEALTH};

    #[test]
    fn task_new_rejects_blank_title() {
        let err = Task::new(TaskKind::Todo, "   ").unwrap_err();
        assert_eq!(err, TaskValidationError::BlankTitle);
    }

    #[test]
    fn gain_xp_levels_up_and_carries_overflow() {
        let mut stats = PlayerStats::default();
        stats.health = 20;
        stats.gain_xp(110);

        assert_eq!(stats.level, 2);
        assert_eq!(stats.xp, 10);
        assert_eq!(stats.health, MAX_HEALTH);
    }

    #[test]
    fn gain_xp_clears_multiple_levels_at_once() {
        let mut stats = PlayerStats::default();
        // 100 clears level 1, 200 clears level 2, 10 remains.
        stats.gain_xp(310);

        assert_eq!(stats.level, 3);
        assert_eq!(stats.xp, 10);
    }

    #[test]
    fn lose_health_floors_at_zero() {
        let mut stats = PlayerStats::default();
        stats.lose_health(MAX_HEALTH + 10);
        assert_eq!(stats.health, 0);
    }
}
