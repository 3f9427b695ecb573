//! Hand-assembled `multipart/form-data` bodies for the upload call.
//!
//! The service routes uploads by a single form part named `file` and its
//! historical clients stamp the boundary from the wall clock. reqwest's own
//! multipart support would pick a random boundary, so the body is framed by
//! hand here and the boundary token stays caller-visible for tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Form field name the service routes uploads by.
pub(crate) const FIELD_NAME: &str = "file";

// Millisecond timestamps collide when two uploads start inside the same
// clock tick; the counter keeps tokens distinct regardless.
static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);

/// A fresh boundary token of the form `===<millis>.<seq>===`.
pub(crate) fn boundary_token() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("==={millis}.{seq}===")
}

/// Value for the request-level `Content-Type` header.
pub(crate) fn form_content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Part content type guessed from the file name extension, falling back to
/// `application/octet-stream`.
pub(crate) fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

/// Frame `bytes` as the single `file` part of a form body.
pub(crate) fn encode_file_part(boundary: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let content_type = content_type_for(file_name);
    let mut body = Vec::with_capacity(bytes.len() + 2 * boundary.len() + file_name.len() + 160);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{FIELD_NAME}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Transfer-Encoding: binary\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
