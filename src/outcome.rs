//! Job identity and per-call outcome types.
//!
//! The conversion service signals "no" by answering with a non-success HTTP
//! status, not by breaking the connection. Historically each operation
//! surfaced that differently: upload returned the sentinel `-1`, status
//! returned nothing, download quietly wrote no file. [`ServiceOutcome`]
//! unifies the three into one success-or-refusal value while the accessor
//! methods keep every legacy view available, so callers migrating from the
//! old conventions see identical behavior.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifier of a server-side conversion job.
///
/// Created implicitly by a successful upload; passed back to the status and
/// download calls. The client attaches no lifecycle to it — the remote
/// service owns job state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl JobId {
    /// The reserved value meaning "the service refused the upload".
    ///
    /// Kept for callers that check the legacy sentinel convention instead of
    /// matching on [`ServiceOutcome`].
    pub const SENTINEL: JobId = JobId(-1);

    /// The raw integer id.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        JobId(id)
    }
}

/// What the remote service answered, for calls where a non-success status is
/// part of the protocol rather than an error.
///
/// Transport failures and local I/O problems never show up here — those are
/// [`crate::ClientError`] and abort the call. A `Refused` means the request
/// completed and the service said no.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceOutcome<T> {
    /// HTTP 200 with a parsed payload.
    Success(T),
    /// The service answered with a non-success HTTP status.
    Refused {
        /// The status code the service returned.
        status: u16,
    },
}

impl<T> ServiceOutcome<T> {
    /// The payload, or `None` on refusal.
    ///
    /// This is the legacy view of the status call, which returned nothing
    /// when the service answered non-200.
    pub fn success(self) -> Option<T> {
        match self {
            ServiceOutcome::Success(v) => Some(v),
            ServiceOutcome::Refused { .. } => None,
        }
    }

    /// Borrowing variant of [`ServiceOutcome::success`].
    pub fn as_success(&self) -> Option<&T> {
        match self {
            ServiceOutcome::Success(v) => Some(v),
            ServiceOutcome::Refused { .. } => None,
        }
    }

    /// True when the service answered with a non-success status.
    pub fn is_refused(&self) -> bool {
        matches!(self, ServiceOutcome::Refused { .. })
    }

    /// The refusal status code, if any.
    pub fn refused_status(&self) -> Option<u16> {
        match self {
            ServiceOutcome::Success(_) => None,
            ServiceOutcome::Refused { status } => Some(*status),
        }
    }

    /// Map the success payload, leaving refusals untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceOutcome<U> {
        match self {
            ServiceOutcome::Success(v) => ServiceOutcome::Success(f(v)),
            ServiceOutcome::Refused { status } => ServiceOutcome::Refused { status },
        }
    }
}

impl ServiceOutcome<JobId> {
    /// Legacy sentinel view of an upload outcome: the job id on success,
    /// `-1` on refusal.
    pub fn id_or_sentinel(&self) -> i64 {
        match self {
            ServiceOutcome::Success(id) => id.as_i64(),
            ServiceOutcome::Refused { .. } => JobId::SENTINEL.as_i64(),
        }
    }
}

/// A file saved by [`crate::ConversionClient::download_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedFile {
    /// Where the file was written: `{download_dir}/{derived_name}`.
    pub path: PathBuf,
    /// Number of body bytes copied to disk.
    pub bytes_written: u64,
}
