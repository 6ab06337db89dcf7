// Secret Stress - Anonymous student stress log with crisis detection
// Main entry point

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, IsTerminal, Read};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use secret_stress::config::{load_config, Config};
use secret_stress::crisis::Category;
use secret_stress::server::CrisisServer;
use secret_stress::storage::{Mood, NewSubmission, SubmissionTag};
use secret_stress::{build_detector, open_store};

#[derive(Parser, Debug)]
#[command(name = "secret-stress")]
#[command(about = "Anonymous stress log with crisis-language detection", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess text for crisis language (reads stdin when TEXT is omitted)
    Assess {
        text: Option<String>,
    },
    /// List the crisis keyword table
    Keywords {
        /// Only show keywords in this category (e.g. self-harm, abuse)
        #[arg(long)]
        category: Option<Category>,
    },
    /// List all crisis resources
    Resources,
    /// Save an anonymous submission
    Submit {
        text: String,
        /// Mood from 1 (very stressed) to 5 (doing well)
        #[arg(long, default_value_t = 5)]
        mood: u8,
        /// Tag (repeatable): exams, deadlines, grades, social, family, future, burnout, isolation, sleep, other
        #[arg(long = "tag")]
        tags: Vec<SubmissionTag>,
    },
    /// List stored submissions, newest first
    List,
    /// Delete one submission
    Delete {
        id: String,
    },
    /// Remove submissions past the retention window
    Purge,
    /// Delete every stored submission
    Wipe {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
    /// Show submission statistics
    Stats,
    /// Run HTTP daemon server
    Daemon {
        /// Bind address (default from config, 127.0.0.1:8787)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config()?;

    match args.command {
        Command::Daemon { bind } => run_daemon(config, bind).await,
        command => {
            init_tracing(&config);
            run_command(&config, command)
        }
    }
}

fn run_command(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Assess { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let detector = build_detector(config)?;
            let assessment = detector.detect_crisis(&text);
            let resources = detector.relevant_resources(&assessment);
            print_json(&serde_json::json!({
                "assessment": assessment,
                "resources": resources,
            }))
        }
        Command::Keywords { category } => {
            let detector = build_detector(config)?;
            let keywords: Vec<_> = detector
                .keywords()
                .into_iter()
                .filter(|k| category.map_or(true, |c| k.category == c))
                .collect();
            print_json(&keywords)
        }
        Command::Resources => print_json(&build_detector(config)?.all_resources()),
        Command::Submit { text, mood, tags } => {
            let detector = build_detector(config)?;
            let store = open_store(config)?;

            let assessment = detector.detect_crisis(&text);
            let resources = detector.relevant_resources(&assessment);
            let submission = NewSubmission::new(text, Mood::new(mood)?)
                .with_tags(tags)
                .with_assessment(assessment);

            let stored = store.save(submission)?;
            print_json(&serde_json::json!({
                "submission": stored,
                "resources": resources,
            }))
        }
        Command::List => print_json(&open_store(config)?.list()?),
        Command::Delete { id } => {
            if !open_store(config)?.delete(&id)? {
                bail!("Submission not found: {}", id);
            }
            println!("Deleted {}", id);
            Ok(())
        }
        Command::Purge => {
            let deleted = open_store(config)?.delete_expired()?;
            println!("Removed {} expired submission(s)", deleted);
            Ok(())
        }
        Command::Wipe { yes } => {
            if !yes {
                bail!("Refusing to delete all submissions without --yes");
            }
            open_store(config)?.clear_all()?;
            println!("All submissions deleted");
            Ok(())
        }
        Command::Stats => print_json(&open_store(config)?.stats()?),
        Command::Daemon { .. } => bail!("daemon mode is started from main"),
    }
}

async fn run_daemon(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    // Daemon logs go to <home>/daemon.log
    std::fs::create_dir_all(&config.home)
        .with_context(|| format!("Failed to create {}", config.home.display()))?;
    let log_path = config.log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open daemon log: {}", log_path.display()))?;

    let file_writer = Arc::new(log_file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(move || file_writer.clone())
        .with_ansi(false); // No ANSI colors in log file

    tracing_subscriber::registry()
        .with(env_filter(&config))
        .with(file_layer)
        .init();
    tracing_log::LogTracer::init().ok();

    eprintln!("Daemon logs: {}", log_path.display());
    tracing::info!("Starting Secret Stress in daemon mode");

    let detector = build_detector(&config)?;
    let store = open_store(&config)?;
    tracing::info!(
        keywords = detector.keyword_count(),
        data = %store.path().display(),
        retention_days = store.retention_days(),
        "Loaded crisis detector and submission store"
    );

    let purged = store.delete_expired()?;
    if purged > 0 {
        tracing::info!(purged, "Purged expired submissions at startup");
    }

    CrisisServer::new(config.server.clone(), detector, store)?
        .serve()
        .await
}

fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

/// Default INFO, RUST_LOG overrides, debug_logging forces DEBUG when RUST_LOG is unset
fn env_filter(config: &Config) -> tracing_subscriber::EnvFilter {
    let fallback = if config.debug_logging { "debug" } else { "info" };
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback))
}

fn read_stdin() -> Result<String> {
    if io::stdin().is_terminal() {
        bail!("No text given. Pass TEXT or pipe it on stdin.");
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
