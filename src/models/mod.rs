pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, Task, TaskPriority, UpdateTaskRequest};
pub use user::{Role, User};
