//! Terminal rendering for planner types.
//!
//! Extension traits and helpers that add colored output to planner-core
//! types using owo_colors.

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use planner_core::overview::{Urgency, relative_label};
use planner_core::{Course, Task, TaskType};

const BAR_WIDTH: usize = 20;

pub trait Render {
    fn render(&self) -> String;
}

const LABEL_WIDTH: usize = 15;

/// Type badge, padded so titles line up.
impl Render for TaskType {
    fn render(&self) -> String {
        let label = format!("{:<width$}", self.label(), width = LABEL_WIDTH);
        match self {
            TaskType::Pec => label.blue().to_string(),
            TaskType::Pra => label.magenta().to_string(),
            TaskType::Ex => label.red().to_string(),
            TaskType::Ps => label.yellow().to_string(),
            TaskType::Lectura => label.cyan().to_string(),
        }
    }
}

impl Render for Course {
    fn render(&self) -> String {
        format!("📚 {} {}", self.name.bold(), format!("[{}]", self.code).dimmed())
    }
}

/// Ids are UUIDs; eight characters are plenty to tell tasks apart.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Deadline as "dd/mm" plus a relative label, colored by urgency.
pub fn deadline(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let text = format!(
        "{} ({})",
        end.with_timezone(&Local).format("%d/%m"),
        relative_label(end, now)
    );

    match Urgency::of(end, now) {
        Urgency::Past => text.dimmed().to_string(),
        Urgency::Critical => text.red().bold().to_string(),
        Urgency::Soon => text.yellow().to_string(),
        Urgency::Later => text,
    }
}

/// One line per task: checkbox, id, type, title, deadline and partial progress.
pub fn task_line(task: &Task, now: DateTime<Utc>) -> String {
    let check = if task.completed {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };

    let title = if task.completed {
        task.title.dimmed().strikethrough().to_string()
    } else {
        task.title.clone()
    };

    let mut line = format!(
        "{} {} {} {}  {}",
        check,
        short_id(&task.id).dimmed(),
        task.task_type.render(),
        title,
        deadline(task.end_date, now)
    );

    if task.progress > 0 && !task.completed {
        line.push_str(&format!(" {}", format!("{}%", task.progress).cyan()));
    }

    line
}

/// A fixed-width bar such as `[#####-----] 50%`.
pub fn progress_bar(percent: u8) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled).green(),
        "-".repeat(BAR_WIDTH - filled).dimmed(),
        percent
    )
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
