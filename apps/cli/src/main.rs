use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, FileCandidate, ReviewClient, ReviewSession};
use shared::domain::{AnalysisResult, ADVERTISED_UPLOAD_LIMIT_BYTES};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "elevatecv", about = "Get AI-powered feedback on a PDF resume")]
struct Cli {
    /// Settings file; defaults to <config dir>/elevatecv/client.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    /// Reject larger files before uploading. 0 disables the check.
    #[arg(long, global = true)]
    max_upload_bytes: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the backend whether it is running and configured.
    Health,
    /// Upload a PDF resume and print the feedback.
    Analyze {
        path: PathBuf,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(limit) = cli.max_upload_bytes {
        settings.max_upload_bytes = (limit > 0).then_some(limit);
    }
    let client = ReviewClient::from_settings(&settings).context("invalid client settings")?;
    tracing::debug!(
        base_url = client.base_url(),
        max_upload_bytes = ?settings.max_upload_bytes,
        "client ready"
    );
    let mut session = ReviewSession::with_upload_limit(settings.max_upload_bytes);

    match cli.command {
        Command::Health => {
            let status = session.start(&client).await;
            println!("backend:        {}", client.base_url());
            println!("healthy:        {}", status.healthy);
            println!("api configured: {}", status.api_configured);
            if status.usable() {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("Backend not configured - add GROQ_API_KEY to proceed");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Analyze { path, json } => {
            let candidate = FileCandidate::from_path(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            session.start(&client).await;

            if session.select_file(Some(candidate)) {
                if let Some(file) = session.selected_file() {
                    eprintln!("Selected: {} ({})", file.name(), file.size_label());
                }
                if session.max_upload_bytes().is_none()
                    && session
                        .selected_file()
                        .is_some_and(|file| file.size_bytes() > ADVERTISED_UPLOAD_LIMIT_BYTES)
                {
                    eprintln!(
                        "Warning: files up to 5MB are supported; the backend may reject this one"
                    );
                }
                eprintln!("Analyzing your resume... This may take a few seconds.");
                if let Err(rejection) = session.submit(&client).await {
                    tracing::debug!(?rejection, "submit rejected");
                }
            }

            match session.result() {
                Some(result) => {
                    print_result(result, json)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!(
                        "Error: {}",
                        session.error().unwrap_or("analysis produced no result")
                    );
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn print_result(result: &AnalysisResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    println!("Analysis Results\n");
    println!("{}\n", result.analysis.trim_end());
    println!("Filename: {}", result.filename);
    if let Some(model) = &result.model {
        println!("Model: {model}");
    }
    Ok(())
}
