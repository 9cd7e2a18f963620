use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::{PlannerStore, tasks};

pub fn list(store: &dyn PlannerStore) -> Result<()> {
    let users = store.list_users()?;

    if users.is_empty() {
        println!("{}", "No users yet. Add one with `planner users add <name>`".dimmed());
        return Ok(());
    }

    for user in users {
        println!("{}  {}", user.id.dimmed(), user.name);
    }

    Ok(())
}

pub fn add(store: &dyn PlannerStore, name: &str) -> Result<()> {
    let user = tasks::create_user(store, name)?;

    println!("{} Created {}", "✓".green(), user.name.bold());
    println!("  id: {}", user.id);
    println!();
    println!("To make it the default, add to your config.toml:");
    println!("default_user = \"{}\"", user.id);

    Ok(())
}
