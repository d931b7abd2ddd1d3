use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority; the default for new tasks.
    Medium,
    /// High priority.
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Represents a task entity as stored in the database and returned by the
/// API. Serialized with camelCase field names (`isCompleted`, `dueDate`,
/// `userId`, ...).
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier.
    pub id: i32,
    /// The title of the task.
    pub title: String,
    /// Free-text description; may be empty.
    pub description: String,
    /// Whether the task is completed. Starts out false.
    pub is_completed: bool,
    /// When the task is due.
    pub due_date: DateTime<Utc>,
    /// The priority of the task.
    pub priority: TaskPriority,
    /// Identifier of the owning user. Immutable once set; every query
    /// touching this task is additionally predicated on it.
    pub user_id: i32,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a task.
///
/// The owner is never part of this payload; it is always stamped from the
/// authenticated identity.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Description for the task; defaults to empty when omitted.
    /// Maximum length of 1000 characters.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    /// When the task is due.
    pub due_date: DateTime<Utc>,

    /// Priority of the task; `Medium` when omitted.
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Partial-update payload for a task.
///
/// Each field distinguishes present-and-set from absent: only fields present
/// in the request overwrite stored values, absent fields are left untouched.
/// The updated timestamp is refreshed on every successful update regardless
/// of which fields were sent.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title, if provided. Must remain non-empty.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    /// New description, if provided. An explicit empty string clears it.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// New completion flag, if provided.
    pub is_completed: Option<bool>,

    /// New due date, if provided.
    pub due_date: Option<DateTime<Utc>>,

    /// New priority, if provided.
    pub priority: Option<TaskPriority>,
}
