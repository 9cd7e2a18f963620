//! Persistence for users, courses and tasks.
//!
//! The planner talks to storage only through [`PlannerStore`]. The import
//! pipeline needs three calls from it (`find_user`, `list_courses`,
//! `insert_tasks`); the rest back the task views and update actions.

mod json;

pub use json::{Database, JsonStore};

use crate::error::PlannerResult;
use crate::model::{Course, NewCourse, NewTask, Task, TaskPatch, User};

pub trait PlannerStore: Send + Sync {
    fn find_user(&self, id: &str) -> PlannerResult<Option<User>>;

    /// All users, ordered by name.
    fn list_users(&self) -> PlannerResult<Vec<User>>;

    fn create_user(&self, name: &str) -> PlannerResult<User>;

    /// The course catalog in stored order.
    fn list_courses(&self) -> PlannerResult<Vec<Course>>;

    fn create_course(&self, course: NewCourse) -> PlannerResult<Course>;

    /// Insert a batch atomically: either every task is stored or none is.
    fn insert_tasks(&self, tasks: Vec<NewTask>) -> PlannerResult<Vec<Task>>;

    /// A user's tasks in stored order.
    fn tasks_for_user(&self, user_id: &str) -> PlannerResult<Vec<Task>>;

    fn get_task(&self, id: &str) -> PlannerResult<Option<Task>>;

    /// Apply `patch` to the task. Errors with `NotFound` for unknown ids.
    fn update_task(&self, id: &str, patch: TaskPatch) -> PlannerResult<Task>;

    fn delete_task(&self, id: &str) -> PlannerResult<()>;
}
