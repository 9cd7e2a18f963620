mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planner_core::config::PlannerConfig;
use planner_core::{JsonStore, PlannerStore, User};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Import course calendars and keep track of your deliverables")]
struct Cli {
    /// Act as this user (defaults to default_user from config)
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an .ics file as tasks
    Import { file: PathBuf },
    /// List tasks grouped by course
    Tasks,
    /// Overall progress and upcoming deadlines
    Dashboard,
    Users {
        #[command(subcommand)]
        action: Option<UserAction>,
    },
    Courses {
        #[command(subcommand)]
        action: Option<CourseAction>,
    },
    /// Mark a task as completed (by id or id prefix)
    Done { task: String },
    /// Reopen a completed task
    Undo { task: String },
    /// Set a task's progress
    Progress {
        task: String,

        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
}

#[derive(Subcommand)]
enum UserAction {
    Add { name: String },
}

#[derive(Subcommand)]
enum CourseAction {
    Add {
        /// Short course code, e.g. "MAT1"
        code: String,

        /// Full name as it appears in calendar event titles
        name: String,

        #[arg(long, default_value_t = 6)]
        credits: u32,

        /// Hex color for the timeline bars
        #[arg(long, default_value = planner_core::overview::DEFAULT_BAR_COLOR)]
        color: String,
    },
}

fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")?;

    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = PlannerConfig::load()?;
    let data_path = config.data_path();
    let store = JsonStore::open(&data_path)
        .with_context(|| format!("Failed to open data file {}", data_path.display()))?;

    match cli.command {
        Commands::Import { file } => {
            let user = resolve_user(&store, cli.user.as_deref(), &config)?;
            commands::import::run(&store, &user, &file)
        }
        Commands::Tasks => {
            let user = resolve_user(&store, cli.user.as_deref(), &config)?;
            commands::tasks::run(&store, &user)
        }
        Commands::Dashboard => {
            let user = resolve_user(&store, cli.user.as_deref(), &config)?;
            commands::dashboard::run(&store, &user)
        }
        Commands::Users { action: None } => commands::users::list(&store),
        Commands::Users {
            action: Some(UserAction::Add { name }),
        } => commands::users::add(&store, &name),
        Commands::Courses { action: None } => commands::courses::list(&store),
        Commands::Courses {
            action:
                Some(CourseAction::Add {
                    code,
                    name,
                    credits,
                    color,
                }),
        } => commands::courses::add(&store, code, name, credits, color),
        Commands::Done { task } => {
            let user = resolve_user(&store, cli.user.as_deref(), &config)?;
            commands::progress::complete(&store, &user, &task, true)
        }
        Commands::Undo { task } => {
            let user = resolve_user(&store, cli.user.as_deref(), &config)?;
            commands::progress::complete(&store, &user, &task, false)
        }
        Commands::Progress { task, percent } => {
            let user = resolve_user(&store, cli.user.as_deref(), &config)?;
            commands::progress::set(&store, &user, &task, percent)
        }
    }
}

/// The user from `--user`, falling back to `default_user` from the config.
fn resolve_user(
    store: &dyn PlannerStore,
    user_flag: Option<&str>,
    config: &PlannerConfig,
) -> Result<User> {
    let Some(id) = user_flag.or(config.default_user.as_deref()) else {
        anyhow::bail!(
            "No user selected.\n\n\
            Pass one with:\n  \
            planner --user <id> ...\n\n\
            or set default_user in {}",
            PlannerConfig::config_path()?.display()
        );
    };

    match store.find_user(id)? {
        Some(user) => Ok(user),
        None => {
            let available: Vec<_> = store
                .list_users()?
                .into_iter()
                .map(|u| format!("{} ({})", u.id, u.name))
                .collect();
            anyhow::bail!(
                "User '{}' not found. Available: {}",
                id,
                if available.is_empty() {
                    "none, create one with `planner users add <name>`".to_string()
                } else {
                    available.join(", ")
                }
            );
        }
    }
}
