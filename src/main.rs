use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use timetable_sync::config::Config;
use timetable_sync::constants::AUTH_TOKEN_ENV;
use timetable_sync::report::{class_line, render_text};
use timetable_sync::timetable::{clock, upcoming_classes};
use timetable_sync::{
    logging, AuthToken, HttpScheduleStore, NormalizedTimetable, RawScheduleEntry,
    TimetableError, TimetableSession, UploadFile,
};

#[derive(Parser)]
#[command(name = "timetable_sync")]
#[command(about = "Normalize uploaded class timetables into a weekly schedule")]
#[command(version = "0.1.0")]
struct Cli {
    /// Bearer token for the schedule service
    #[arg(long, global = true, env = AUTH_TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw schedule rows read from a JSON file
    Normalize {
        /// JSON array of raw schedule rows
        #[arg(long)]
        input: PathBuf,
    },
    /// Fetch the stored schedule and normalize it
    Fetch,
    /// Upload a timetable document, then fetch and normalize the result
    Upload {
        /// PDF, DOC, DOCX, JPG or PNG file
        #[arg(long)]
        file: PathBuf,
    },
    /// List classes starting within the reminder window
    Upcoming {
        /// Read rows from a JSON file instead of fetching them
        #[arg(long)]
        input: Option<PathBuf>,
        /// Reference time (defaults to now), e.g. 2024-09-02T09:30
        #[arg(long)]
        at: Option<String>,
    },
}

fn require_token(token: Option<String>) -> Result<AuthToken, TimetableError> {
    token
        .filter(|t| !t.trim().is_empty())
        .map(AuthToken::new)
        .ok_or(TimetableError::MissingToken)
}

fn read_rows(path: &Path) -> anyhow::Result<Vec<RawScheduleEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of schedule rows", path.display()))?;
    Ok(rows)
}

fn print_timetable(timetable: &NormalizedTimetable, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(timetable)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(timetable)?),
    }
    Ok(())
}

fn parse_reference_time(at: Option<String>) -> anyhow::Result<NaiveDateTime> {
    match at {
        Some(value) => clock::parse_wall_clock(&value)
            .with_context(|| format!("could not parse reference time '{value}'")),
        None => Ok(Local::now().naive_local()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let store = Arc::new(HttpScheduleStore::new(config.api.base_url.clone()));
    let session = TimetableSession::new(store)
        .with_venue_lecturer_split(config.normalize.split_venue_lecturer);

    match cli.command {
        Commands::Normalize { input } => {
            let rows = read_rows(&input)?;
            info!("Normalizing {} rows from {}", rows.len(), input.display());
            let timetable = session.normalize_entries(rows);
            print_timetable(&timetable, cli.format)?;
        }
        Commands::Fetch => {
            let token = require_token(cli.token)?;
            let timetable = session.refresh(&token).await?;
            print_timetable(&timetable, cli.format)?;
        }
        Commands::Upload { file } => {
            let token = require_token(cli.token)?;
            let upload = UploadFile::from_path(&file).await?;
            info!("Uploading {} ({} bytes)", upload.file_name, upload.bytes.len());
            let timetable = session.upload(upload, &token).await?;
            print_timetable(&timetable, cli.format)?;
        }
        Commands::Upcoming { input, at } => {
            let now = parse_reference_time(at)?;
            let timetable = match input {
                Some(path) => Arc::new(session.normalize_entries(read_rows(&path)?)),
                None => session.refresh(&require_token(cli.token)?).await?,
            };

            let upcoming =
                upcoming_classes(&timetable.weekly_schedule, now, config.reminder_window());
            if upcoming.is_empty() {
                info!("No classes in the next {} minutes", config.reminder.window_minutes);
            }
            match cli.format {
                OutputFormat::Text => {
                    for class in &upcoming {
                        println!("{}", class_line(class));
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&upcoming)?),
            }
        }
    }

    Ok(())
}
