//! The service client: upload, status check, download.
//!
//! ## One request per call
//!
//! Every method performs a single open-request-close HTTP cycle: connections
//! are never pooled, nothing retries, and no state outlives the call. The
//! service's own answer is always a value ([`ServiceOutcome`]), never an
//! `Err` — `Err` is reserved for local and transport failures that kept the
//! exchange from completing at all.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::multipart;
use crate::outcome::{DownloadedFile, JobId, ServiceOutcome};
use futures::StreamExt;
use reqwest::{header, StatusCode};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Name a download is saved under when the service names none.
const FALLBACK_FILE_NAME: &str = "somefile.pdf";

/// Length of the numeric job-id prefix the service prepends to download
/// filenames. Coupled to the service's naming scheme; if the id width there
/// ever changes, this constant is the single place to update.
const FILE_NAME_PREFIX_LEN: usize = 6;

/// Client for the remote conversion service.
///
/// One instance per service; cheap to clone and safe to share across tasks.
/// The client holds only immutable configuration — job state lives entirely
/// on the service side.
///
/// # Example
/// ```rust,no_run
/// use pdfconv_sdk::{ConversionClient, ServiceOutcome};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ConversionClient::new("http://localhost:8080")?;
/// if let ServiceOutcome::Success(job) = client.upload_file("report.docx").await? {
///     println!("job {} status: {:?}", job, client.job_status(job).await?.success());
///     client.download_file(job, ".").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConversionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ConversionClient {
    /// `User-Agent` sent on upload and status requests. Download requests
    /// carry no `User-Agent` at all.
    pub const USER_AGENT: &'static str = concat!("pdfconv-sdk/", env!("CARGO_PKG_VERSION"));

    /// Client with default transport settings against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::builder(base_url).build()?)
    }

    /// Client from a prepared [`ClientConfig`].
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let http = match config.http_client {
            Some(client) => client,
            None => {
                // Idle connections are never kept: one open-request-close
                // cycle per call.
                let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
                if let Some(timeout) = config.timeout {
                    builder = builder.timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| ClientError::HttpClient { source: e })?
            }
        };

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The normalized service root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a local file for conversion.
    ///
    /// # Arguments
    /// * `path` — Local file to submit
    ///
    /// # Returns
    /// `Success(JobId)` when the service accepts the file; `Refused` when it
    /// answers with a non-200 status ([`ServiceOutcome::id_or_sentinel`]
    /// maps that back to the legacy `-1`).
    ///
    /// # Errors
    /// Fatal only: unreadable input file, transport failure, or a 200
    /// response whose body is not a decimal job id.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ServiceOutcome<JobId>, ClientError> {
        let path = path.as_ref();
        let bytes = read_input(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_owned());
        self.upload_bytes(&file_name, &bytes).await
    }

    /// Upload an in-memory payload under the given file name.
    ///
    /// Same wire behavior as [`ConversionClient::upload_file`] without
    /// touching the filesystem; useful when the document comes from a
    /// database or another request. The part content type is guessed from
    /// `file_name`'s extension.
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ServiceOutcome<JobId>, ClientError> {
        let url = format!("{}/uploadFile", self.base_url);
        let boundary = multipart::boundary_token();
        let body = multipart::encode_file_part(&boundary, file_name, bytes);
        info!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

        let response = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, multipart::form_content_type(&boundary))
            .header(header::USER_AGENT, Self::USER_AGENT)
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Upload of {} refused with HTTP {}", file_name, status);
            return Ok(ServiceOutcome::Refused {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport { url, source: e })?;
        let id: i64 = body
            .trim()
            .parse()
            .map_err(|_| ClientError::InvalidJobId { body: body.clone() })?;

        debug!("Upload accepted as job {}", id);
        Ok(ServiceOutcome::Success(JobId(id)))
    }

    /// Fetch the current status text for a job.
    ///
    /// The 200 body is returned verbatim; the service's status vocabulary is
    /// not interpreted by the client.
    pub async fn job_status(&self, job: JobId) -> Result<ServiceOutcome<String>, ClientError> {
        let url = format!("{}/getStatus/{}", self.base_url, job);
        debug!("Checking status of job {}", job);

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, Self::USER_AGENT)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Status check for job {} refused with HTTP {}", job, status);
            return Ok(ServiceOutcome::Refused {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport { url, source: e })?;
        Ok(ServiceOutcome::Success(body))
    }

    /// Download the converted output of a job into `download_dir`.
    ///
    /// The saved name comes from the response `Content-Disposition` header,
    /// with the service's job-id prefix stripped; when the header names
    /// nothing usable the file is saved as `somefile.pdf`. The directory
    /// must already exist — it is never created.
    ///
    /// # Errors
    /// Fatal only: transport failure or an unwritable destination. A refusal
    /// writes nothing and returns `Ok(Refused { .. })`.
    pub async fn download_file(
        &self,
        job: JobId,
        download_dir: impl AsRef<Path>,
    ) -> Result<ServiceOutcome<DownloadedFile>, ClientError> {
        let url = format!("{}/downloadFile/{}", self.base_url, job);
        info!("Downloading output of job {} from {}", job, url);

        // This endpoint gets no User-Agent header.
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Download of job {} refused with HTTP {}", job, status);
            return Ok(ServiceOutcome::Refused {
                status: status.as_u16(),
            });
        }

        let file_name = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(derived_file_name)
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_owned());

        let target = download_dir.as_ref().join(&file_name);
        let bytes_written = save_body(response, &target, &url).await?;

        info!(
            "Saved job {} output to {} ({} bytes)",
            job,
            target.display(),
            bytes_written
        );
        Ok(ServiceOutcome::Success(DownloadedFile {
            path: target,
            bytes_written,
        }))
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Read the upload payload, mapping io errors to their specific variants.
async fn read_input(path: &Path) -> Result<Vec<u8>, ClientError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ClientError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ClientError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ClientError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Stream the response body to `target`, returning the byte count.
async fn save_body(
    response: reqwest::Response,
    target: &Path,
    url: &str,
) -> Result<u64, ClientError> {
    let mut file = tokio::fs::File::create(target)
        .await
        .map_err(|e| ClientError::DownloadWrite {
            path: target.to_path_buf(),
            source: e,
        })?;

    let mut bytes_written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| ClientError::Transport {
            url: url.to_owned(),
            source: e,
        })?;
        file.write_all(&chunk)
            .await
            .map_err(|e| ClientError::DownloadWrite {
                path: target.to_path_buf(),
                source: e,
            })?;
        bytes_written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| ClientError::DownloadWrite {
        path: target.to_path_buf(),
        source: e,
    })?;
    Ok(bytes_written)
}

/// Derive the local file name from a `Content-Disposition` header value.
///
/// The service answers with `attachment; filename="<job id><original name>"`
/// where the id is a fixed-width numeric prefix. Everything after
/// `filename=` is taken, quotes are trimmed, the prefix is dropped, and only
/// the final path component is kept. Returns `None` when the value names
/// nothing usable; the caller then falls back to [`FALLBACK_FILE_NAME`].
fn derived_file_name(header: &str) -> Option<String> {
    let after = header.split_once("filename=")?.1;
    let value = after.split(';').next()?;
    let trimmed = value.trim().trim_matches('"');
    let stripped = trimmed.get(FILE_NAME_PREFIX_LEN..)?;
    let name = stripped.rsplit(['/', '\\']).next()?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_owned())
}
