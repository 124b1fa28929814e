mod logging;

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use ecomgen_core::ProjectPaths;
use ecomgen_generate::{GenerateOptions, GenerationEngine, GenerationError};
use ecomgen_load::{LoadError, LoadOptions, load_dataset};
use ecomgen_query::{QueryError, QueryOptions, render_output, run_query};
use logging::{LoggingError, init_logging};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generate(#[from] GenerationError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "ecomgen",
    version,
    about = "Synthetic e-commerce dataset: generate CSVs, load them into SQLite, query them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Write the five CSV tables into data/.
    Generate,
    /// Load data/*.csv into ecom.db and validate row counts.
    Load,
    /// Run query.sql against ecom.db and print the result.
    Query,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Command::Generate => "generate",
            Command::Load => "load",
            Command::Query => "query",
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    let paths = ProjectPaths::new(std::env::current_dir()?);
    init_logging(&paths.log_path())?;

    let run_id = Uuid::new_v4();
    let start = Instant::now();
    tracing::info!(event = "run_started", run_id = %run_id, command = command.name());

    match command {
        Command::Generate => generate_stage(&paths)?,
        Command::Load => load_stage(&paths).await?,
        Command::Query => query_stage(&paths).await?,
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(event = "run_finished", run_id = %run_id, status = "success", duration_ms);
    Ok(())
}

fn generate_stage(paths: &ProjectPaths) -> Result<(), CliError> {
    let options = GenerateOptions {
        out_dir: paths.data_dir.clone(),
        ..GenerateOptions::default()
    };
    let report = GenerationEngine::new(options).run()?;

    for table in &report.tables {
        println!("Wrote {} ({} rows)", table.file, table.rows);
    }
    println!(
        "Data generation complete. Files are in the {} directory.",
        paths.data_dir.display()
    );
    Ok(())
}

async fn load_stage(paths: &ProjectPaths) -> Result<(), CliError> {
    let options = LoadOptions {
        data_dir: paths.data_dir.clone(),
        database_path: paths.database_path.clone(),
    };
    let report = load_dataset(&options).await?;
    for line in report.render_lines() {
        println!("{line}");
    }
    Ok(())
}

async fn query_stage(paths: &ProjectPaths) -> Result<(), CliError> {
    let options = QueryOptions {
        database_path: paths.database_path.clone(),
        query_path: paths.query_path.clone(),
    };
    let output = run_query(&options).await?;
    println!("{}", render_output(&output));
    Ok(())
}
