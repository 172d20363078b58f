use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vr_engine::api::{AppState, create_router};
use vr_engine::config::ConfigLoader;
use vr_engine::models::Competency;
use vr_engine::pipeline::run_from_dir;
use vr_engine::publish::{CsvPublisher, SqlitePublisher, TablePublisher};

#[derive(Parser)]
#[command(name = "vr-engine")]
#[command(about = "Meal-voucher benefit reconciliation and eligibility engine")]
struct Args {
    /// Configuration directory
    #[arg(long, default_value = "config/vr")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the benefit table for one competency
    Run {
        /// Target month (1-12)
        #[arg(long)]
        month: u32,
        /// Target year
        #[arg(long)]
        year: i32,
        /// Directory holding the source extracts
        #[arg(long, default_value = "data")]
        sources: PathBuf,
        /// SQLite database to replace the published table in
        #[arg(long)]
        store: Option<PathBuf>,
        /// Directory to write the table as CSV
        #[arg(long)]
        csv_dir: Option<PathBuf>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,
        /// Directory holding the source extracts
        #[arg(long, default_value = "data")]
        sources: PathBuf,
        /// SQLite database that publish requests write to
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    let config = loader.into_config();

    match args.command {
        Command::Run {
            month,
            year,
            sources,
            store,
            csv_dir,
            json,
        } => {
            let competency = Competency::new(month, year)?;
            let result = run_from_dir(&sources, &config, competency)?;
            let table = &config.publish().table_name;

            if let Some(path) = store {
                let mut publisher = SqlitePublisher::open(&path)?;
                publisher.publish(table, &result.rows)?;
            }
            if let Some(dir) = csv_dir {
                CsvPublisher::new(dir).publish(table, &result.rows)?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let summary = &result.summary;
                println!("Competency:            {}", result.competency);
                println!("Active workers:        {}", summary.base_population);
                println!("Excluded (job title):  {}", summary.excluded_by_job_title);
                println!("Excluded (leave):      {}", summary.excluded_on_leave);
                println!("Excluded (overseas):   {}", summary.excluded_overseas);
                println!("Rows:                  {}", summary.published_rows);
                println!("Admission periods:     {}", summary.admission_periods.join(", "));
                println!("Termination periods:   {}", summary.termination_periods.join(", "));
                println!("Warnings:              {}", result.audit_trace.warnings.len());
            }
        }
        Command::Serve {
            bind,
            sources,
            store,
        } => {
            let mut state = AppState::new(config, sources);
            if let Some(path) = store {
                state = state.with_store(path);
            }
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("binding {}", bind))?;
            info!(address = %bind, "VR engine API listening");
            axum::serve(listener, create_router(state)).await?;
        }
    }

    Ok(())
}
