//! # pdfconv-sdk
//!
//! Client SDK for a remote PDF-conversion service.
//!
//! ## Why this crate?
//!
//! The conversion service exposes three plain HTTP endpoints and a handful of
//! unwritten conventions: a timestamp-derived multipart boundary, a job-id
//! prefix glued onto download filenames, a sentinel `-1` for rejected
//! uploads. This crate packages those conventions behind a typed API so
//! callers deal with [`JobId`]s and [`ServiceOutcome`]s instead of raw
//! status codes and string surgery.
//!
//! ## Conversion lifecycle
//!
//! ```text
//! local file
//!  │
//!  ├─ 1. Upload    POST /uploadFile        multipart, one part named "file"
//!  ├─ 2. Status    GET  /getStatus/{job}   opaque progress text
//!  └─ 3. Download  GET  /downloadFile/{job} converted PDF saved to disk
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfconv_sdk::{ConversionClient, ServiceOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ConversionClient::new("http://localhost:8080")?;
//!
//!     match client.upload_file("quarterly-report.docx").await? {
//!         ServiceOutcome::Success(job) => {
//!             if let Some(text) = client.job_status(job).await?.success() {
//!                 println!("job {job}: {text}");
//!             }
//!             if let ServiceOutcome::Success(saved) =
//!                 client.download_file(job, "downloads").await?
//!             {
//!                 println!("saved {} ({} bytes)", saved.path.display(), saved.bytes_written);
//!             }
//!         }
//!         ServiceOutcome::Refused { status } => eprintln!("service refused: HTTP {status}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Refusals vs. errors
//!
//! The service says "no" in-band: any non-200 answer is a
//! [`ServiceOutcome::Refused`] value, never an `Err`. An `Err(`[`ClientError`]`)`
//! always means the call itself could not complete (unreadable input,
//! unreachable host, unusable response body).
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfconv` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdfconv-sdk = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
mod multipart;
pub mod outcome;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::ConversionClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ClientError;
pub use outcome::{DownloadedFile, JobId, ServiceOutcome};
