//! Task actions used by the views: listing, ticking off, progress and date edits.
//!
//! Every action keeps `completed == (progress == 100)` and routes dates through
//! the normalizer, so no stored task ever ends before it starts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::TaskType;
use crate::error::{PlannerError, PlannerResult};
use crate::model::{CourseId, NewTask, Task, TaskPatch, User};
use crate::normalize::normalize;
use crate::store::PlannerStore;

/// A user's tasks, soonest deadline first.
pub fn list_tasks(store: &dyn PlannerStore, user_id: &str) -> PlannerResult<Vec<Task>> {
    let mut tasks = store.tasks_for_user(user_id)?;
    tasks.sort_by_key(|t| t.end_date);
    Ok(tasks)
}

/// Tick a task on or off. Completing sets progress to 100, reopening to 0.
pub fn set_completed(store: &dyn PlannerStore, task_id: &str, completed: bool) -> PlannerResult<Task> {
    store.update_task(
        task_id,
        TaskPatch {
            progress: Some(if completed { 100 } else { 0 }),
            completed: Some(completed),
            span: None,
        },
    )
}

pub fn set_progress(store: &dyn PlannerStore, task_id: &str, progress: u8) -> PlannerResult<Task> {
    if progress > 100 {
        return Err(PlannerError::Validation(format!(
            "progress must be between 0 and 100, got {}",
            progress
        )));
    }

    store.update_task(
        task_id,
        TaskPatch {
            progress: Some(progress),
            completed: Some(progress == 100),
            span: None,
        },
    )
}

/// Move a task, e.g. after a drag on the Gantt chart. An end before the start
/// is clamped to the start.
pub fn set_dates(
    store: &dyn PlannerStore,
    task_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> PlannerResult<Task> {
    store.update_task(
        task_id,
        TaskPatch {
            span: Some(normalize(Some(start), Some(end), start)),
            ..Default::default()
        },
    )
}

/// A task entered by hand rather than imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub user_id: String,
    #[serde(default)]
    pub course_id: Option<CourseId>,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Classified from the title when absent
    #[serde(default, rename = "type")]
    pub task_type: Option<TaskType>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn create_task(store: &dyn PlannerStore, draft: TaskDraft) -> PlannerResult<Task> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(PlannerError::Validation("Task title is required".into()));
    }
    if draft.progress > 100 {
        return Err(PlannerError::Validation(format!(
            "progress must be between 0 and 100, got {}",
            draft.progress
        )));
    }
    if store.find_user(&draft.user_id)?.is_none() {
        return Err(PlannerError::NotFound("User not found".into()));
    }

    let span = normalize(draft.start_date, draft.end_date, Utc::now());
    let task = NewTask {
        user_id: draft.user_id,
        course_id: draft.course_id,
        title: title.to_string(),
        start_date: span.start,
        end_date: span.end,
        task_type: draft.task_type.unwrap_or_else(|| TaskType::classify(title)),
        progress: draft.progress,
        completed: draft.progress == 100,
        notes: draft.notes,
    };

    store
        .insert_tasks(vec![task])?
        .pop()
        .ok_or_else(|| PlannerError::Store("insert returned no rows".into()))
}

pub fn delete_task(store: &dyn PlannerStore, task_id: &str) -> PlannerResult<()> {
    store.delete_task(task_id)
}

pub fn create_user(store: &dyn PlannerStore, name: &str) -> PlannerResult<User> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlannerError::Validation("Name is required".into()));
    }
    let user = store.create_user(name)?;
    tracing::info!(user = %user.name, id = %user.id, "created user");
    Ok(user)
}
