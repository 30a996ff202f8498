//! `done` command-line client.
//!
//! Usage:
//!
//! ```text
//! done [--db-path <path>] [--log <filter>] <command>
//! ```
//!
//! Every command prints a JSON document on stdout. Task-mutating commands
//! answer with the pending queue after the change, so a front end can
//! redraw from a single response.

use clap::{Parser, Subcommand};
use done::config::{DB_PATH_ENV, DoneConfig};
use done::gamification::adapters::sqlite::SqliteGamificationRepository;
use done::gamification::domain::GamificationState;
use done::storage::{self, StorageError};
use done::task::adapters::sqlite::SqliteTaskRepository;
use done::task::services::{
    CommandOutcome, CreateTaskRequest, TaskCommand, TaskLifecycleError, TaskLifecycleService,
};
use done::{config::ConfigError, telemetry};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "done", version, about = "Gamified personal task queue")]
struct Cli {
    /// Database file location
    #[arg(long, global = true, env = DB_PATH_ENV)]
    db_path: Option<PathBuf>,
    /// Tracing filter directive, e.g. `debug` or `done=trace`
    #[arg(long, global = true)]
    log: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List pending tasks in queue order
    List,
    /// Add a task at the front of the queue
    Add {
        /// Task text, plain or in a legacy encoding
        body: String,
        /// Estimated duration in seconds
        #[arg(short, long, default_value_t = 0)]
        estimate: u64,
        /// Deadline month (1-12); blank or `MM` leaves it unset
        #[arg(long, default_value = "")]
        month: String,
        /// Deadline day (1-31); blank or `DD` leaves it unset
        #[arg(long, default_value = "")]
        day: String,
        /// Deadline year; blank or `YYYY` leaves it unset
        #[arg(long, default_value = "")]
        year: String,
    },
    /// Delete a pending task without completing it
    Remove {
        /// Task identifier
        id: String,
    },
    /// Move a task into another task's slot
    Move {
        /// Task being moved
        source: String,
        /// Task whose slot it takes
        destination: String,
    },
    /// Complete a pending task
    Done {
        /// Task identifier
        id: String,
    },
    /// Record elapsed execution time for a pending task
    Time {
        /// Task identifier
        id: String,
        /// Elapsed seconds
        seconds: u64,
    },
    /// List tasks completed today
    Today,
    /// Show points, level and streaks
    Stats,
    /// Replace the gamification record with a JSON document
    StatsSet {
        /// Gamification record as JSON
        json: String,
    },
    /// Bring the database schema up to date
    Upgrade,
    /// Print the application version
    Version,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
    #[error("invalid gamification JSON: {0}")]
    InvalidStats(#[source] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct Version<'a> {
    version: &'a str,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = DoneConfig::resolve(cli.db_path, cli.log);
    telemetry::init(config.log_filter.as_deref());
    run(&config, cli.command).await.map_err(Into::into)
}

async fn run(config: &DoneConfig, command: Command) -> Result<(), CliError> {
    if matches!(command, Command::Version) {
        return emit(&Version {
            version: env!("CARGO_PKG_VERSION"),
        });
    }

    config.ensure_parent_dir()?;
    let pool = storage::open(config.db_path())?;
    debug!(db_path = %config.db_path().display(), "database ready");

    if matches!(command, Command::Upgrade) {
        let message = storage::upgrade(&pool)?;
        return emit(&Message { message: &message });
    }

    let service = TaskLifecycleService::new(
        Arc::new(SqliteTaskRepository::new(pool.clone())),
        Arc::new(SqliteGamificationRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let outcome = service.execute(into_task_command(command)?).await?;
    match outcome {
        CommandOutcome::Acknowledged => emit(&Message {
            message: "gamification state updated",
        }),
        CommandOutcome::NoContent => Ok(()),
        other => emit(&other),
    }
}

fn into_task_command(command: Command) -> Result<TaskCommand, CliError> {
    Ok(match command {
        Command::List | Command::Version | Command::Upgrade => TaskCommand::ListTasks,
        Command::Add {
            body,
            estimate,
            month,
            day,
            year,
        } => TaskCommand::CreateTask(
            CreateTaskRequest::new(body, estimate).with_raw_deadline(&month, &day, &year),
        ),
        Command::Remove { id } => TaskCommand::RemoveTask {
            id: TaskCommand::parse_id(&id)?,
        },
        Command::Move {
            source,
            destination,
        } => TaskCommand::ReorderTask {
            source_id: TaskCommand::parse_id(&source)?,
            destination_id: TaskCommand::parse_id(&destination)?,
        },
        Command::Done { id } => TaskCommand::CompleteTask {
            id: TaskCommand::parse_id(&id)?,
        },
        Command::Time { id, seconds } => TaskCommand::UpdateExecutionSeconds {
            id: TaskCommand::parse_id(&id)?,
            seconds,
        },
        Command::Today => TaskCommand::TodayResults,
        Command::Stats => TaskCommand::GetGamification,
        Command::StatsSet { json } => TaskCommand::SetGamification {
            state: serde_json::from_str::<GamificationState>(&json)
                .map_err(CliError::InvalidStats)?,
        },
    })
}

fn emit(value: &impl Serialize) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(CliError::Encode)?;
    writeln!(stdout)?;
    Ok(())
}
