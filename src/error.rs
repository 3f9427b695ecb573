//! Error types for the pdfconv-sdk library.
//!
//! The SDK draws a hard line between two failure modes:
//!
//! * [`ClientError`] — **Fatal**: the operation could not complete at all
//!   (unreadable input file, unreachable host, unparseable job id). Returned
//!   as `Err(ClientError)` from every client method.
//!
//! * A remote **refusal** — the service answered, but with a non-success
//!   HTTP status. That is part of the wire protocol, not a failure of this
//!   client, so it is never a `ClientError`; it surfaces as
//!   [`crate::ServiceOutcome::Refused`] and callers decide what to do with it.
//!
//! The separation keeps `?` meaningful: propagating a `ClientError` aborts
//! the operation, while a refusal is a value you can match on, log, or map
//! back to the service's legacy sentinel conventions.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfconv-sdk library.
///
/// Remote non-success statuses use [`crate::ServiceOutcome::Refused`] and
/// are not represented here.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// The configured base URL is not an absolute HTTP/HTTPS URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // ── Local input errors ────────────────────────────────────────────────
    /// Upload input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the upload input file.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Reading the upload input file failed for another reason.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to initialize the HTTP transport: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    /// The request never produced a usable response: connection refused,
    /// DNS failure, timeout, or the response body stream broke mid-read.
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // ── Response errors ───────────────────────────────────────────────────
    /// The upload endpoint answered 200 but the body is not a decimal job id.
    #[error("Upload response is not a job id: {body:?}")]
    InvalidJobId { body: String },

    // ── Local output errors ───────────────────────────────────────────────
    /// Could not create or write the downloaded file. The download directory
    /// must already exist and be writable; it is never created by the SDK.
    #[error("Failed to write download to '{path}': {source}")]
    DownloadWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
