use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use planner_core::{ImportOutcome, PlannerStore, User, import_calendar};

use crate::render::pluralize;

pub fn run(store: &dyn PlannerStore, user: &User, file: &Path) -> Result<()> {
    let ics = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    match import_calendar(store, &ics, &user.id)? {
        ImportOutcome::Imported { count } => {
            println!(
                "{} Imported {} {} for {}",
                "✓".green(),
                count,
                pluralize("task", count),
                user.name.bold()
            );
        }
        ImportOutcome::Empty { message } => {
            println!("{}", message.dimmed());
        }
    }

    Ok(())
}
