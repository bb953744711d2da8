//! Domain model definitions
//!
//! Field names match the relational backend's column names so the same
//! types serialize cleanly in both storage modes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level grouping of categories (e.g. "Work", "Personal").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Tab {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            created_at: Utc::now(),
        }
    }
}

/// Named grouping of tasks, owned by exactly one tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub tab_id: Uuid,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, tab_id: Uuid, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tab_id,
            color: color.into(),
            created_at: Utc::now(),
        }
    }
}

/// A single actionable item, owned by exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub priority: bool,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task; `completed` and `priority` default to false.
    pub fn new(title: impl Into<String>, category_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            priority: false,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a task; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<bool>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.priority.is_none()
    }

    /// Mark a task as priority, leaving everything else untouched.
    pub fn priority(value: bool) -> Self {
        Self {
            priority: Some(value),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let category_id = Uuid::new_v4();
        let task = Task::new("Test task", category_id);
        assert_eq!(task.title, "Test task");
        assert_eq!(task.category_id, category_id);
        assert!(!task.completed);
        assert!(!task.priority);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_update_is_empty() {
        assert!(TaskUpdate::default().is_empty());
        assert!(!TaskUpdate::priority(true).is_empty());
    }
}
