use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use planner_core::overview::Dashboard;
use planner_core::tasks::list_tasks;
use planner_core::{PlannerStore, User};

use crate::render::{Render, progress_bar, task_line};

pub fn run(store: &dyn PlannerStore, user: &User) -> Result<()> {
    let tasks = list_tasks(store, &user.id)?;
    let courses = super::courses_by_name(store)?;
    let dashboard = Dashboard::build(&tasks, &courses);
    let now = Utc::now();

    println!("{}", user.name.bold());
    println!(
        "{} {}",
        progress_bar(dashboard.overall_progress),
        format!("({}/{} completed)", dashboard.completed, dashboard.total).dimmed()
    );

    println!();
    println!("{}", "Next deadlines".bold());
    if dashboard.next_deadlines.is_empty() {
        println!("   {}", "Nothing pending".dimmed());
    }
    for task in &dashboard.next_deadlines {
        println!("   {}", task_line(task, now));
    }

    if !dashboard.by_course.is_empty() {
        println!();
        println!("{}", "By course".bold());
    }
    for summary in &dashboard.by_course {
        println!(
            "{} {}",
            summary.course.render(),
            format!("{}/{}", summary.done, summary.total).dimmed()
        );
        println!("   {}", progress_bar(summary.avg_progress));
        if let Some(next) = &summary.next_task {
            println!("   next: {}", task_line(next, now));
        }
    }

    Ok(())
}
