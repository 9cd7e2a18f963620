pub mod courses;
pub mod dashboard;
pub mod import;
pub mod progress;
pub mod tasks;
pub mod users;

use anyhow::Result;
use planner_core::{Course, PlannerStore};

/// Courses ordered by name, the order every listing uses.
fn courses_by_name(store: &dyn PlannerStore) -> Result<Vec<Course>> {
    let mut courses = store.list_courses()?;
    courses.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(courses)
}
