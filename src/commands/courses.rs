use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::{NewCourse, PlannerStore};

use crate::render::Render;

pub fn list(store: &dyn PlannerStore) -> Result<()> {
    let courses = super::courses_by_name(store)?;

    if courses.is_empty() {
        println!("{}", "No courses yet. Add one with `planner courses add <code> <name>`".dimmed());
        return Ok(());
    }

    for course in courses {
        println!(
            "{} {}",
            course.render(),
            format!("{} credits, {}", course.credits, course.color).dimmed()
        );
    }

    Ok(())
}

pub fn add(
    store: &dyn PlannerStore,
    code: String,
    name: String,
    credits: u32,
    color: String,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Course name can't be blank; events are matched against it");
    }

    let course = store.create_course(NewCourse {
        code: code.trim().to_string(),
        name: name.trim().to_string(),
        credits,
        color,
    })?;

    println!("{} Added {}", "✓".green(), course.render());

    Ok(())
}
