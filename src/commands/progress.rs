use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use planner_core::tasks::{list_tasks, set_completed, set_progress};
use planner_core::{PlannerStore, Task, User};

use crate::render::{short_id, task_line};

pub fn complete(store: &dyn PlannerStore, user: &User, task_ref: &str, completed: bool) -> Result<()> {
    let task = resolve_task(store, user, task_ref)?;
    let task = set_completed(store, &task.id, completed)?;

    println!("{}", task_line(&task, Utc::now()));

    Ok(())
}

pub fn set(store: &dyn PlannerStore, user: &User, task_ref: &str, percent: u8) -> Result<()> {
    let task = resolve_task(store, user, task_ref)?;
    let task = set_progress(store, &task.id, percent)?;

    println!("{}", task_line(&task, Utc::now()));

    Ok(())
}

/// Find one of the user's tasks by id or unique id prefix.
fn resolve_task(store: &dyn PlannerStore, user: &User, task_ref: &str) -> Result<Task> {
    let task_ref = task_ref.trim();
    if task_ref.is_empty() {
        anyhow::bail!("Task id can't be empty");
    }

    let mut matches: Vec<Task> = list_tasks(store, &user.id)?
        .into_iter()
        .filter(|t| t.id.starts_with(task_ref))
        .collect();

    match matches.len() {
        0 => anyhow::bail!(
            "No task '{}' for {}. See `planner tasks` for ids",
            task_ref,
            user.name
        ),
        1 => Ok(matches.remove(0)),
        _ => {
            let candidates: Vec<_> = matches
                .iter()
                .map(|t| format!("{} {}", short_id(&t.id), t.title))
                .collect();
            anyhow::bail!(
                "'{}' matches several tasks, use a longer prefix:\n  {}",
                task_ref,
                candidates.join("\n  ").dimmed()
            );
        }
    }
}
