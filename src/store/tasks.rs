use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

const TASK_COLUMNS: &str =
    "id, title, description, is_completed, due_date, priority, user_id, created_at, updated_at";

/// Lists all tasks owned by `user_id`, most recently created first.
pub async fn list_for_owner(pool: &PgPool, user_id: i32) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Fetches a single task by id, scoped to its owner.
///
/// A task owned by someone else yields `None`, exactly like a task that does
/// not exist; ownership is part of the predicate, not a post-check.
pub async fn find_for_owner(
    pool: &PgPool,
    task_id: i32,
    user_id: i32,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2"
    ))
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Inserts a new task owned by `user_id` and returns the stored record.
///
/// The owner id always comes from the authenticated identity; the request
/// payload has no owner field. `created_at` and `updated_at` are both set to
/// the same instant by the database.
pub async fn insert(
    pool: &PgPool,
    input: &CreateTaskRequest,
    user_id: i32,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, due_date, priority, user_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.due_date)
    .bind(input.priority)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

/// Applies a partial update to a task, scoped to its owner.
///
/// Fields absent from the patch bind as NULL and fall through to the current
/// stored value via COALESCE; `updated_at` is refreshed unconditionally, even
/// when the patch changes nothing. Returns `None` when the task is absent or
/// owned by another user.
pub async fn update_for_owner(
    pool: &PgPool,
    task_id: i32,
    user_id: i32,
    patch: &UpdateTaskRequest,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks \
         SET title = COALESCE($3, title), \
             description = COALESCE($4, description), \
             is_completed = COALESCE($5, is_completed), \
             due_date = COALESCE($6, due_date), \
             priority = COALESCE($7, priority), \
             updated_at = now() \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(task_id)
    .bind(user_id)
    .bind(patch.title.as_deref())
    .bind(patch.description.as_deref())
    .bind(patch.is_completed)
    .bind(patch.due_date)
    .bind(patch.priority)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Deletes a task, scoped to its owner. Returns whether a row was removed.
pub async fn delete_for_owner(
    pool: &PgPool,
    task_id: i32,
    user_id: i32,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
