//! JSON-file backed store.
//!
//! The whole database lives in memory behind a mutex and is written back to a
//! single JSON file after every mutation. Mutations run against a copy; the
//! copy replaces the live data only once it passed the constraint checks and
//! reached the disk, so a failed write leaves both file and memory untouched.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use uuid::Uuid;

use super::PlannerStore;
use crate::error::{PlannerError, PlannerResult};
use crate::model::{Course, CourseId, NewCourse, NewTask, Task, TaskPatch, User};

/// Everything the planner persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Database {
    fn has_user(&self, id: &str) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn has_course(&self, id: CourseId) -> bool {
        self.courses.iter().any(|c| c.id == id)
    }

    /// Row-level constraints every stored task must satisfy.
    fn check_task(&self, task: &Task) -> PlannerResult<()> {
        if task.title.trim().is_empty() {
            return Err(PlannerError::Store(
                "null value in column \"title\" of relation \"tasks\" violates not-null constraint"
                    .into(),
            ));
        }
        if !self.has_user(&task.user_id) {
            return Err(PlannerError::Store(format!(
                "insert or update on table \"tasks\" violates foreign key constraint \
                 \"tasks_user_id_fkey\": key (user_id)=({}) is not present in table \"users\"",
                task.user_id
            )));
        }
        if let Some(course_id) = task.course_id
            && !self.has_course(course_id)
        {
            return Err(PlannerError::Store(format!(
                "insert or update on table \"tasks\" violates foreign key constraint \
                 \"tasks_course_id_fkey\": key (course_id)=({}) is not present in table \"courses\"",
                course_id
            )));
        }
        if task.progress > 100 {
            return Err(PlannerError::Store(format!(
                "new row for relation \"tasks\" violates check constraint \"tasks_progress_check\" \
                 (progress={})",
                task.progress
            )));
        }
        if task.end_date < task.start_date {
            return Err(PlannerError::Store(format!(
                "new row for relation \"tasks\" violates check constraint \"tasks_dates_check\" \
                 ('{}' ends before it starts)",
                task.title
            )));
        }
        Ok(())
    }
}

pub struct JsonStore {
    path: Option<PathBuf>,
    db: Mutex<Database>,
}

impl JsonStore {
    /// Open the store at `path`. A missing file is an empty database; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> PlannerResult<Self> {
        let path = path.into();

        let db = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                PlannerError::Serialization(format!("{}: {}", path.display(), e))
            })?
        } else {
            Database::default()
        };

        tracing::debug!(path = %path.display(), "opened planner store");

        Ok(JsonStore {
            path: Some(path),
            db: Mutex::new(db),
        })
    }

    /// A store that never touches the disk.
    pub fn in_memory(db: Database) -> Self {
        JsonStore {
            path: None,
            db: Mutex::new(db),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> PlannerResult<Database> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> PlannerResult<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| PlannerError::Store("store lock poisoned".into()))
    }

    /// Run a mutation on a copy, persist it, then publish it.
    fn commit<T>(&self, f: impl FnOnce(&mut Database) -> PlannerResult<T>) -> PlannerResult<T> {
        let mut live = self.lock()?;
        let mut next = live.clone();

        let out = f(&mut next)?;
        self.persist(&next)?;
        *live = next;

        Ok(out)
    }

    /// Write to a sibling temp file and rename it over the target.
    fn persist(&self, db: &Database) -> PlannerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, db)?;
        tmp.persist(path).map_err(|e| {
            PlannerError::Store(format!("could not write {}: {}", path.display(), e.error))
        })?;

        Ok(())
    }
}

impl PlannerStore for JsonStore {
    fn find_user(&self, id: &str) -> PlannerResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    fn list_users(&self) -> PlannerResult<Vec<User>> {
        let mut users = self.lock()?.users.clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    fn create_user(&self, name: &str) -> PlannerResult<User> {
        self.commit(|db| {
            let user = User {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
            };
            db.users.push(user.clone());
            Ok(user)
        })
    }

    fn list_courses(&self) -> PlannerResult<Vec<Course>> {
        Ok(self.lock()?.courses.clone())
    }

    fn create_course(&self, course: NewCourse) -> PlannerResult<Course> {
        self.commit(|db| {
            if db.courses.iter().any(|c| c.code == course.code) {
                return Err(PlannerError::Store(format!(
                    "duplicate key value violates unique constraint \"courses_code_key\": \
                     key (code)=({}) already exists",
                    course.code
                )));
            }

            let id = db.courses.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let course = Course {
                id,
                code: course.code,
                name: course.name,
                credits: course.credits,
                color: course.color,
            };
            db.courses.push(course.clone());
            Ok(course)
        })
    }

    fn insert_tasks(&self, tasks: Vec<NewTask>) -> PlannerResult<Vec<Task>> {
        let now = Utc::now();

        let result = self.commit(|db| {
            let mut inserted = Vec::with_capacity(tasks.len());
            for new_task in tasks {
                let task = new_task.into_task(Uuid::new_v4().to_string(), now);
                db.check_task(&task)?;
                inserted.push(task);
            }
            db.tasks.extend(inserted.iter().cloned());
            Ok(inserted)
        });

        if let Err(e) = &result {
            tracing::warn!(error = %e, "task batch rejected");
        }
        result
    }

    fn tasks_for_user(&self, user_id: &str) -> PlannerResult<Vec<Task>> {
        Ok(self
            .lock()?
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_task(&self, id: &str) -> PlannerResult<Option<Task>> {
        Ok(self.lock()?.tasks.iter().find(|t| t.id == id).cloned())
    }

    fn update_task(&self, id: &str, patch: TaskPatch) -> PlannerResult<Task> {
        let now = Utc::now();

        self.commit(|db| {
            let index = db
                .tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| PlannerError::NotFound(format!("Task not found: {}", id)))?;

            let mut task = db.tasks[index].clone();
            patch.apply(&mut task, now);
            db.check_task(&task)?;

            db.tasks[index] = task.clone();
            Ok(task)
        })
    }

    fn delete_task(&self, id: &str) -> PlannerResult<()> {
        self.commit(|db| {
            let before = db.tasks.len();
            db.tasks.retain(|t| t.id != id);
            if db.tasks.len() == before {
                return Err(PlannerError::NotFound(format!("Task not found: {}", id)));
            }
            Ok(())
        })
    }
}
