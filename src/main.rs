use anyhow::{bail, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use project_ledger::config::{self, Config};
use project_ledger::db;
use project_ledger::models::WorkSession;
use project_ledger::reconcile::StatsCache;
use project_ledger::report::{render_project, render_sessions, render_stats};
use project_ledger::sessions::{format_duration, parse_date, parse_duration, SessionStore};

/// Per-project revenue, spend and tracked time
#[derive(Parser, Debug)]
#[command(name = "project_ledger", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print stats for every project, or one project
    Stats {
        /// Only show this project id
        #[arg(long)]
        project: Option<String>,
    },
    /// Reprint stats whenever invoices, expenses or sessions change
    Watch,
    /// Inspect or record work sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// List recorded sessions
    List {
        #[arg(long)]
        project: Option<String>,
    },
    /// Record a session against a project
    Add {
        project_id: String,
        /// Seconds, H:MM or H:MM:SS
        duration: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a session by id
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?;

    // The session store is shared by every command
    let store = SessionStore::open(&config.session_store_dir())?;

    match cli.command {
        Command::Stats { project } => run_stats(&config, &store, project.as_deref()).await,
        Command::Watch => run_watch(&config, &store).await,
        Command::Sessions { command } => run_sessions(&config, &store, command).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run_stats(config: &Config, store: &SessionStore, project: Option<&str>) -> Result<()> {
    let db = db::init(config).await?;
    let snapshot = db.load_snapshot().await?;
    let sessions = store.snapshot().sessions;

    let report = snapshot.inputs(&sessions).build();

    match project {
        Some(id) => match snapshot.project(id) {
            Some(project) => print!("{}", render_project(&report, project)),
            None => bail!("no project with id '{}'", id),
        },
        None => print!("{}", render_stats(&report, &snapshot.projects)),
    }

    Ok(())
}

async fn run_watch(config: &Config, store: &SessionStore) -> Result<()> {
    let db = db::init(config).await?;
    let mut snapshot = db.load_snapshot().await?;
    let mut cache = StatsCache::new();

    let poller = store.spawn_poller(config.session_poll_interval());
    let mut sessions_rx = store.subscribe();
    let mut reload = tokio::time::interval(config.session_poll_interval());
    // The first tick completes immediately; the snapshot was just loaded.
    reload.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let sessions = store.snapshot().sessions;
        let builds = cache.build_count();
        let report = cache.get_or_build(&snapshot.inputs(&sessions));
        if cache.build_count() != builds {
            println!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
            print!("{}", render_stats(&report, &snapshot.projects));
            println!();
        }

        tokio::select! {
            _ = &mut shutdown => break,
            changed = sessions_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = reload.tick() => match db.load_snapshot().await {
                Ok(fresh) => snapshot = fresh,
                Err(err) => warn!(error = %err, "reloading records failed, keeping previous snapshot"),
            },
        }
    }

    poller.abort();
    Ok(())
}

async fn run_sessions(config: &Config, store: &SessionStore, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::List { project } => {
            let snapshot = store.snapshot();
            let sessions: Vec<WorkSession> = snapshot
                .sessions
                .iter()
                .filter(|s| project.is_none() || s.project_key() == project.as_deref())
                .cloned()
                .collect();

            if sessions.is_empty() {
                println!("No sessions recorded in {}", store.path().display());
            } else {
                print!("{}", render_sessions(&sessions));
                let total: i64 = sessions.iter().map(|s| s.duration_seconds.max(0)).sum();
                println!("Total: {}", format_duration(total));
            }
        }
        SessionCommand::Add {
            project_id,
            duration,
            date,
        } => {
            let duration_seconds = parse_duration(&duration)?;
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };

            let db = db::init(config).await?;
            let projects = db.load_projects().await?;
            if !projects.iter().any(|p| p.id == project_id) {
                bail!("no project with id '{}'", project_id);
            }

            // Pick up sessions other processes added since the store was opened
            store.refresh()?;
            let id = store.unused_id(&format!("ws-{}", Utc::now().format("%Y%m%d%H%M%S%3f")));
            let session = WorkSession::new(
                id,
                project_id,
                duration_seconds,
                date,
            );
            let summary = format!(
                "Recorded {} on {} as {}",
                format_duration(session.duration_seconds),
                session.date.format("%Y-%m-%d"),
                session.id
            );
            store.insert(session)?;
            println!("{}", summary);
        }
        SessionCommand::Remove { id } => {
            if store.remove(&id)? {
                println!("Removed session {}", id);
            } else {
                println!("No session with id '{}'", id);
            }
        }
    }

    Ok(())
}
