//! Calendar import: ICS text in, tasks stored.
//!
//! One call does one sequential pass: validate the request, look up the user,
//! parse the file, read the course catalog once, turn each event into a task,
//! and hand the whole batch to the store in a single insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::TaskType;
use crate::course_match::CourseMatcher;
use crate::error::{PlannerError, PlannerResult};
use crate::event::CalendarEvent;
use crate::ics;
use crate::model::NewTask;
use crate::normalize::normalize;
use crate::store::PlannerStore;

pub const NOTHING_TO_IMPORT: &str = "No VEVENT entries found";

/// Successful import result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    Imported { count: usize },
    /// The file had no usable events. Not an error, nothing was written.
    Empty { message: String },
}

impl ImportOutcome {
    pub fn count(&self) -> usize {
        match self {
            ImportOutcome::Imported { count } => *count,
            ImportOutcome::Empty { .. } => 0,
        }
    }
}

/// Turn parsed events into insertable tasks.
///
/// Events without a summary, or with a blank one, are dropped rather than
/// given a placeholder title.
pub fn assemble(
    events: &[CalendarEvent],
    matcher: &CourseMatcher,
    user_id: &str,
    now: DateTime<Utc>,
) -> Vec<NewTask> {
    events
        .iter()
        .filter_map(|event| {
            let title = event.title()?;
            let task_type = TaskType::classify(title);
            let course_id = matcher.match_summary(title);
            let span = normalize(
                event.start.as_ref().map(|t| t.to_utc()),
                event.end.as_ref().map(|t| t.to_utc()),
                now,
            );

            tracing::debug!(title, %task_type, ?course_id, "classified event");

            Some(NewTask::imported(user_id, course_id, title, task_type, span))
        })
        .collect()
}

/// Import `ics_content` as tasks for `user_id`.
pub fn import_calendar(
    store: &dyn PlannerStore,
    ics_content: &str,
    user_id: &str,
) -> PlannerResult<ImportOutcome> {
    import_calendar_at(store, ics_content, user_id, Utc::now())
}

/// [`import_calendar`] with an explicit clock, used for events with no start.
pub fn import_calendar_at(
    store: &dyn PlannerStore,
    ics_content: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> PlannerResult<ImportOutcome> {
    if ics_content.is_empty() || user_id.is_empty() {
        return Err(PlannerError::Validation(
            "Missing icsContent or userId".into(),
        ));
    }

    let user = store
        .find_user(user_id)?
        .ok_or_else(|| PlannerError::NotFound("User not found".into()))?;

    let events = ics::parse_calendar(ics_content)?;

    let courses = store.list_courses()?;
    let matcher = CourseMatcher::new(&courses);

    let tasks = assemble(&events, &matcher, &user.id, now);

    if tasks.is_empty() {
        tracing::info!(user = %user.name, events = events.len(), "nothing to import");
        return Ok(ImportOutcome::Empty {
            message: NOTHING_TO_IMPORT.to_string(),
        });
    }

    let inserted = store.insert_tasks(tasks)?;

    tracing::info!(user = %user.name, count = inserted.len(), "imported calendar");

    Ok(ImportOutcome::Imported {
        count: inserted.len(),
    })
}
