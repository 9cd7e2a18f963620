use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use planner_core::overview::group_by_course;
use planner_core::tasks::list_tasks;
use planner_core::{PlannerStore, User};

use crate::render::{Render, task_line};

pub fn run(store: &dyn PlannerStore, user: &User) -> Result<()> {
    let tasks = list_tasks(store, &user.id)?;

    if tasks.is_empty() {
        println!("{}", "No tasks yet".dimmed());
        println!(
            "{}",
            "Import a calendar with `planner import <file.ics>`".dimmed()
        );
        return Ok(());
    }

    let courses = super::courses_by_name(store)?;
    let now = Utc::now();

    for (i, group) in group_by_course(&tasks, &courses).iter().enumerate() {
        if i > 0 {
            println!();
        }

        let header = match &group.course {
            Some(course) => course.render(),
            None => format!("📚 {}", "Sin asignatura".bold()),
        };
        let count = format!("{}/{}", group.done, group.tasks.len());
        println!("{} {}", header, count.dimmed());

        for task in &group.tasks {
            println!("   {}", task_line(task, now));
        }
    }

    Ok(())
}
