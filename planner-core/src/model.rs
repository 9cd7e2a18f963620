//! Persisted planner records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::TaskType;
use crate::normalize::DateSpan;

pub type UserId = String;
pub type CourseId = i64;
pub type TaskId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// A course in the catalog. The import pipeline only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    pub credits: u32,
    /// CSS colour used for bars and badges, e.g. "#4f46e5"
    pub color: String,
}

/// A deliverable on a user's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub course_id: Option<CourseId>,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// 0..=100
    pub progress: u8,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn span(&self) -> DateSpan {
        DateSpan {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// A task that has not been stored yet. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: UserId,
    pub course_id: Option<CourseId>,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub progress: u8,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTask {
    /// A freshly imported task: no progress, not completed.
    pub fn imported(
        user_id: &str,
        course_id: Option<CourseId>,
        title: &str,
        task_type: TaskType,
        span: DateSpan,
    ) -> Self {
        NewTask {
            user_id: user_id.to_string(),
            course_id,
            title: title.to_string(),
            start_date: span.start,
            end_date: span.end,
            task_type,
            progress: 0,
            completed: false,
            notes: None,
        }
    }

    pub(crate) fn into_task(self, id: TaskId, now: DateTime<Utc>) -> Task {
        Task {
            id,
            user_id: self.user_id,
            course_id: self.course_id,
            title: self.title,
            start_date: self.start_date,
            end_date: self.end_date,
            task_type: self.task_type,
            progress: self.progress,
            completed: self.completed,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields an update may change. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub progress: Option<u8>,
    pub completed: Option<bool>,
    pub span: Option<DateSpan>,
}

impl TaskPatch {
    pub(crate) fn apply(self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(progress) = self.progress {
            task.progress = progress;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(span) = self.span {
            task.start_date = span.start;
            task.end_date = span.end;
        }
        task.updated_at = now;
    }
}

/// Course fields supplied when adding a course to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub color: String,
}
