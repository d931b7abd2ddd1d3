use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskRequest, UpdateTaskRequest},
    store::tasks,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// Returns only tasks owned by the caller, ordered by creation date
/// descending (most recent first). The owner id comes exclusively from the
/// validated token.
///
/// ## Responses:
/// - `200 OK`: A JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task_list = tasks::list_for_owner(&pool, user.id).await?;

    Ok(HttpResponse::Ok().json(task_list))
}

/// Creates a new task for the authenticated user.
///
/// The owner of the task is always the authenticated caller; the payload has
/// no owner field. Omitted description defaults to empty, omitted priority to
/// `Medium`, and the completion flag starts out false.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description` (optional): free text.
/// - `dueDate`: due timestamp (UTC).
/// - `priority` (optional): `"Low"`, `"Medium"`, or `"High"`.
///
/// ## Responses:
/// - `201 Created`: The newly created `Task`.
/// - `400 Bad Request`: If validation fails (e.g. blank title).
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<CreateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::insert(&pool, &task_data, user.id).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// The query is predicated on (task id, owner id) together, so a task owned
/// by a different user is indistinguishable from one that does not exist.
///
/// ## Responses:
/// - `200 OK`: The `Task` object.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task is absent or owned by someone else.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks::find_for_owner(&pool, task_id.into_inner(), user.id).await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Applies a partial update to a task owned by the authenticated user.
///
/// Only fields present in the payload overwrite stored values; absent fields
/// are left untouched. The updated timestamp is refreshed on every successful
/// update, even when the patch is a no-op.
///
/// ## Request Body:
/// Any subset of `title`, `description`, `isCompleted`, `dueDate`,
/// `priority`.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `400 Bad Request`: If validation fails (e.g. blank title).
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task is absent or owned by someone else.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    task_data: web::Json<UpdateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::update_for_owner(&pool, task_id.into_inner(), user.id, &task_data).await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted successfully"}`.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task is absent or owned by someone else.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let deleted = tasks::delete_for_owner(&pool, task_id.into_inner(), user.id).await?;

    if !deleted {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}
