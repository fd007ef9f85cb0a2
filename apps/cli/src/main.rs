use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod prompt;

use shared_config::ClientConfig;
use shared_gateway::{ApiGateway, SessionHandle, SessionStore};
use shared_models::health_log::Symptom;
use shared_models::insights::Severity;

#[derive(Parser)]
#[command(name = "carelog", version)]
#[command(about = "Daily health logs, medical reports and AI insights from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Record today's health log
    Log {
        /// Symptom tag, repeatable (headache, fever, cough, fatigue, nausea, back_pain, joint_pain, dizziness)
        #[arg(short, long = "symptom")]
        symptoms: Vec<Symptom>,
        /// Mood from 1 to 10
        #[arg(long)]
        mood: Option<String>,
        /// Hours slept
        #[arg(long)]
        sleep: Option<String>,
        /// Pain from 0 to 10
        #[arg(long)]
        pain: Option<String>,
        /// Body temperature in °F
        #[arg(long)]
        temperature: Option<String>,
        #[arg(long)]
        systolic: Option<String>,
        #[arg(long)]
        diastolic: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List recorded health logs
    Logs,
    /// Manage medical reports
    Reports {
        #[command(subcommand)]
        action: ReportsCommand,
    },
    /// Show log and report counts
    Dashboard,
    /// Ask for an AI summary of recent logs
    Insights {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Ask for advice about a symptom
    Advice {
        symptom: String,
        #[arg(long, default_value = "mild")]
        severity: Severity,
    },
    /// Send a message to the health assistant
    Chat { message: String },
    /// Summarise logged sleep
    Sleep,
}

#[derive(Subcommand)]
enum ReportsCommand {
    /// List uploaded reports
    List,
    /// Delete a report
    Delete {
        id: String,
        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },
    /// Upload a new report file
    Upload {
        file: PathBuf,
        #[arg(short, long)]
        title: String,
        #[arg(long = "type")]
        report_type: Option<String>,
        /// Report date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    debug!("Using API at {}", config.api_base_url);

    let session = SessionHandle::with_store(SessionStore::new(&config.session_file));
    let gateway = ApiGateway::new(&config, session);

    commands::run(cli.command, &config, gateway).await
}
