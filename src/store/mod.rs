//! Storage access, built on `sqlx` against PostgreSQL.
//!
//! `users` is the credential store backing registration and login; `tasks`
//! holds the owned resources. Every task query in `tasks` is predicated on
//! the owning user id together with the task id, never the task id alone.

pub mod tasks;
pub mod users;
