//! CLI binary for pdfconv-sdk.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! [`ConversionClient`] and prints results. Each invocation performs exactly
//! one request; polling or batching is left to the caller's shell.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdfconv_sdk::{ClientConfig, ConversionClient, JobId, ServiceOutcome};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Upload a document for conversion
  pdfconv --url http://localhost:8080 upload report.docx

  # Check on a job
  pdfconv --url http://localhost:8080 status 42

  # Download the converted file into the current directory
  pdfconv --url http://localhost:8080 download 42

  # Download into a specific directory, JSON output
  pdfconv --url http://localhost:8080 --json download 42 --dir ./converted

  # Upload with a 30-second deadline
  pdfconv --url http://localhost:8080 --timeout 30 upload scan.png

ENVIRONMENT VARIABLES:
  PDFCONV_URL      Base URL of the conversion service (same as --url)
  PDFCONV_TIMEOUT  Per-request timeout in seconds (same as --timeout)

EXIT STATUS:
  0  the service accepted the request
  1  the service refused it (non-200 answer) or the call itself failed
"#;

/// Talk to a remote PDF-conversion service.
#[derive(Parser, Debug)]
#[command(
    name = "pdfconv",
    version,
    about = "Upload documents to a PDF-conversion service, check jobs, download results",
    long_about = "Client for a remote PDF-conversion service. Upload submits a document and \
prints the job id; status prints the service's progress text for a job; download saves the \
converted file. A non-200 answer from the service exits with status 1.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Base URL of the conversion service, e.g. http://localhost:8080.
    #[arg(long, env = "PDFCONV_URL")]
    url: String,

    /// Per-request timeout in seconds. No deadline when unset.
    #[arg(long, env = "PDFCONV_TIMEOUT")]
    timeout: Option<u64>,

    /// Print the outcome as JSON instead of plain text.
    #[arg(long, env = "PDFCONV_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFCONV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, env = "PDFCONV_QUIET")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a local file; prints the job id.
    Upload {
        /// File to submit for conversion.
        file: PathBuf,
    },
    /// Print the status text of a job.
    Status {
        /// Job id returned by upload.
        job_id: i64,
    },
    /// Download the converted output of a job.
    Download {
        /// Job id returned by upload.
        job_id: i64,

        /// Directory to save into; must already exist.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build client ─────────────────────────────────────────────────────
    let mut config = ClientConfig::builder(&cli.url);
    if let Some(secs) = cli.timeout {
        config = config.timeout(Duration::from_secs(secs));
    }
    let client = ConversionClient::with_config(config.build().context("Invalid --url")?)
        .context("Failed to set up the HTTP client")?;

    // ── Run one request ──────────────────────────────────────────────────
    let accepted = match cli.command {
        Command::Upload { ref file } => run_upload(&client, file, &cli).await?,
        Command::Status { job_id } => run_status(&client, JobId(job_id), &cli).await?,
        Command::Download { job_id, ref dir } => {
            run_download(&client, JobId(job_id), dir, &cli).await?
        }
    };

    if !accepted {
        std::process::exit(1);
    }
    Ok(())
}

/// Upload one file and print the resulting job id.
async fn run_upload(client: &ConversionClient, file: &Path, cli: &Cli) -> Result<bool> {
    let outcome = client
        .upload_file(file)
        .await
        .with_context(|| format!("Failed to upload {}", file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        ServiceOutcome::Success(job) => {
            if !cli.json {
                println!("{job}");
            }
            if !cli.quiet {
                eprintln!("{} job {} accepted", green("✔"), bold(&job.to_string()));
            }
            Ok(true)
        }
        ServiceOutcome::Refused { status } => {
            if !cli.quiet {
                eprintln!("{} upload refused: HTTP {status}", red("✘"));
            }
            Ok(false)
        }
    }
}

/// Print the service's status text for a job.
async fn run_status(client: &ConversionClient, job: JobId, cli: &Cli) -> Result<bool> {
    let outcome = client
        .job_status(job)
        .await
        .with_context(|| format!("Failed to check status of job {job}"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        ServiceOutcome::Success(text) => {
            if !cli.json {
                println!("{text}");
            }
            Ok(true)
        }
        ServiceOutcome::Refused { status } => {
            if !cli.quiet {
                eprintln!("{} no status for job {job}: HTTP {status}", red("✘"));
            }
            Ok(false)
        }
    }
}

/// Download a job's output and print where it was saved.
async fn run_download(client: &ConversionClient, job: JobId, dir: &Path, cli: &Cli) -> Result<bool> {
    let outcome = client
        .download_file(job, dir)
        .await
        .with_context(|| format!("Failed to download job {job}"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        ServiceOutcome::Success(saved) => {
            if !cli.json {
                println!("{}", saved.path.display());
            }
            if !cli.quiet {
                eprintln!(
                    "{} saved {} {}",
                    green("✔"),
                    bold(&saved.path.display().to_string()),
                    dim(&format!("({} bytes)", saved.bytes_written)),
                );
            }
            Ok(true)
        }
        ServiceOutcome::Refused { status } => {
            if !cli.quiet {
                eprintln!("{} download of job {job} refused: HTTP {status}", red("✘"));
            }
            Ok(false)
        }
    }
}
