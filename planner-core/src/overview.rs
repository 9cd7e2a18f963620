//! Read-only views over a user's tasks: grouped list, dashboard, Gantt bars.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::classify::TaskType;
use crate::model::{Course, CourseId, Task};

pub const DEFAULT_BAR_COLOR: &str = "#6366f1";
pub const COMPLETED_BAR_COLOR: &str = "#22c55e";

/// How many open deadlines the dashboard lists.
const NEXT_DEADLINES: usize = 3;

/// How pressing a deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Past,
    /// Due within three days
    Critical,
    /// Due within a week
    Soon,
    Later,
}

impl Urgency {
    pub fn of(end: DateTime<Utc>, now: DateTime<Utc>) -> Urgency {
        if end < now {
            Urgency::Past
        } else if end <= now + Duration::days(3) {
            Urgency::Critical
        } else if end <= now + Duration::days(7) {
            Urgency::Soon
        } else {
            Urgency::Later
        }
    }
}

/// Short Spanish label for a deadline, as shown next to each task.
pub fn relative_label(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if end < now {
        return "Entregado".to_string();
    }

    let left = end - now;
    match (left.num_days(), left.num_hours()) {
        (_, 0) => "en menos de una hora".to_string(),
        (_, 1) => "en 1 hora".to_string(),
        (0, hours) => format!("en {} horas", hours),
        (1, _) => "en 1 día".to_string(),
        (days, _) => format!("en {} días", days),
    }
}

/// Tasks of one course, soonest deadline first.
#[derive(Debug, Clone, Serialize)]
pub struct CourseGroup {
    /// `None` for tasks that matched no course
    pub course: Option<Course>,
    pub done: usize,
    pub tasks: Vec<Task>,
}

/// Group tasks by course in catalog order. Courses without tasks are left
/// out; tasks without a course come last.
pub fn group_by_course(tasks: &[Task], courses: &[Course]) -> Vec<CourseGroup> {
    let mut groups: Vec<CourseGroup> = courses
        .iter()
        .map(|course| make_group(Some(course.clone()), tasks, Some(course.id)))
        .collect();
    groups.push(make_group(None, tasks, None));

    groups.retain(|g| !g.tasks.is_empty());
    groups
}

fn make_group(course: Option<Course>, tasks: &[Task], course_id: Option<CourseId>) -> CourseGroup {
    let mut tasks: Vec<Task> = tasks
        .iter()
        .filter(|t| t.course_id == course_id)
        .cloned()
        .collect();
    tasks.sort_by_key(|t| t.end_date);

    CourseGroup {
        course,
        done: tasks.iter().filter(|t| t.completed).count(),
        tasks,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    pub course: Course,
    pub total: usize,
    pub done: usize,
    /// Rounded mean of task progress
    pub avg_progress: u8,
    pub next_task: Option<Task>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total: usize,
    pub completed: usize,
    /// Share of completed tasks, rounded percent
    pub overall_progress: u8,
    pub next_deadlines: Vec<Task>,
    pub by_course: Vec<CourseSummary>,
}

impl Dashboard {
    pub fn build(tasks: &[Task], courses: &[Course]) -> Dashboard {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();

        let by_course = courses
            .iter()
            .filter_map(|course| {
                let course_tasks: Vec<&Task> =
                    tasks.iter().filter(|t| t.course_id == Some(course.id)).collect();
                if course_tasks.is_empty() {
                    return None;
                }

                let progress_sum: usize = course_tasks.iter().map(|t| t.progress as usize).sum();
                Some(CourseSummary {
                    course: course.clone(),
                    total: course_tasks.len(),
                    done: course_tasks.iter().filter(|t| t.completed).count(),
                    avg_progress: rounded_percent(progress_sum, course_tasks.len() * 100),
                    next_task: open_by_deadline(course_tasks.into_iter()).into_iter().next(),
                })
            })
            .collect();

        let mut next_deadlines = open_by_deadline(tasks.iter());
        next_deadlines.truncate(NEXT_DEADLINES);

        Dashboard {
            total,
            completed,
            overall_progress: rounded_percent(completed, total),
            next_deadlines,
            by_course,
        }
    }
}

/// Unfinished tasks, soonest deadline first.
fn open_by_deadline<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut open: Vec<Task> = tasks.filter(|t| !t.completed).cloned().collect();
    open.sort_by_key(|t| t.end_date);
    open
}

fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}

/// One bar on the Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttBar {
    pub id: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub progress: u8,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub color: String,
}

/// Bars for every task. Zero-length tasks get a one-day bar so they stay visible.
pub fn gantt_bars(tasks: &[Task], courses: &[Course]) -> Vec<GanttBar> {
    tasks
        .iter()
        .map(|task| {
            let span = task.span().for_display();
            let color = if task.completed {
                COMPLETED_BAR_COLOR.to_string()
            } else {
                task.course_id
                    .and_then(|id| courses.iter().find(|c| c.id == id))
                    .map(|c| c.color.clone())
                    .unwrap_or_else(|| DEFAULT_BAR_COLOR.to_string())
            };

            GanttBar {
                id: task.id.clone(),
                name: task.title.clone(),
                start: span.start,
                end: span.end,
                progress: task.progress,
                task_type: task.task_type,
                color,
            }
        })
        .collect()
}
