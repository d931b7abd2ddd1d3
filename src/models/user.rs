use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role assigned to a user account.
/// Corresponds to the `user_role` SQL enum.
///
/// A closed enumeration rather than a free string, so authorization checks
/// stay exhaustive. No admin-only behavior is defined yet.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    /// Regular account; the default for every registration.
    User,
    /// Administrative account.
    Admin,
}

/// A user record as stored in the database.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// service. Public views of a user (username, email, role) are built
/// explicitly, see `auth::AuthResponse`.
#[derive(Debug, Deserialize, FromRow)]
pub struct User {
    /// Store-assigned identifier, immutable.
    pub id: i32,
    /// Unique display name.
    pub username: String,
    /// Unique email address, used as the login identifier.
    pub email: String,
    /// Opaque bcrypt digest of the user's password.
    pub password_hash: String,
    /// Account role, `Role::User` unless explicitly promoted.
    pub role: Role,
    /// Timestamp of account creation, set once by the store.
    pub created_at: DateTime<Utc>,
}
