use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

/// Returns whether a user with this email already exists.
///
/// Advisory only: the unique index on `email` is the authority. Two
/// concurrent registrations can both pass this check; the loser's insert
/// then fails with a unique violation, which maps to the same conflict error.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Returns whether a user with this username already exists. Advisory, like
/// `email_exists`.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AppError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Inserts a new user with the default `user` role and returns the stored
/// record. A unique-constraint violation on username or email surfaces as
/// `AppError::Conflict` via the `From<sqlx::Error>` conversion.
pub async fn insert(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password_hash) \
         VALUES ($1, $2, $3) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Looks up a user by email for login. Absence is not an error here; the
/// caller maps it to a generic credentials failure.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
