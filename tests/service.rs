//! Integration tests for the conversion client against a local mock service.
//!
//! Every test starts a `wiremock::MockServer`, points a client at it, and
//! asserts both the wire format of what the client sends and how the client
//! treats the answers. No real conversion service is needed.
//!
//! Run with:
//!   cargo test --test service

use pdfconv_sdk::{ClientError, ConversionClient, JobId, ServiceOutcome};
use std::path::PathBuf;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────

fn client_for(server: &MockServer) -> ConversionClient {
    ConversionClient::new(server.uri()).expect("mock server uri is a valid base url")
}

/// A scratch input file with known contents, kept alive by the TempDir.
fn scratch_file(name: &str, contents: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let file = dir.path().join(name);
    std::fs::write(&file, contents).expect("write scratch file");
    (dir, file)
}

// ── Upload ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn upload_returns_the_job_id_the_service_assigns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadFile"))
        .and(header("user-agent", ConversionClient::USER_AGENT))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("important words"))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, file) = scratch_file("report.txt", b"important words");
    let outcome = client_for(&server)
        .upload_file(&file)
        .await
        .expect("upload should succeed");

    assert_eq!(outcome, ServiceOutcome::Success(JobId(42)));
    assert_eq!(outcome.id_or_sentinel(), 42);
}

#[tokio::test]
async fn upload_body_is_a_single_multipart_file_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadFile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("7"))
        .mount(&server)
        .await;

    client_for(&server)
        .upload_bytes("notes.txt", b"hello multipart")
        .await
        .expect("upload should succeed");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .expect("content-type present")
        .to_str()
        .expect("ascii header");
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .expect("content type carries the boundary");

    let body = String::from_utf8(requests[0].body.clone()).expect("text payload");
    assert!(body.starts_with(&format!("--{boundary}\r\n")), "got: {body}");
    assert!(body.contains("Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\""));
    assert!(body.contains("Content-Type: text/plain"));
    assert!(body.contains("Content-Transfer-Encoding: binary"));
    assert!(body.contains("hello multipart"));
    assert!(body.ends_with(&format!("\r\n--{boundary}--\r\n")), "got: {body}");
}

#[tokio::test]
async fn sequential_uploads_use_distinct_boundaries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadFile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.upload_bytes("one.txt", b"first").await.expect("first upload");
    client.upload_bytes("two.txt", b"second").await.expect("second upload");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);

    let boundaries: Vec<String> = requests
        .iter()
        .map(|r| {
            r.headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .and_then(|ct| ct.split_once("boundary=").map(|(_, b)| b.to_owned()))
                .expect("upload carries a boundary")
        })
        .collect();
    assert_ne!(boundaries[0], boundaries[1], "boundary tokens must be fresh per request");
}

#[tokio::test]
async fn refused_upload_maps_to_the_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadFile"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .upload_bytes("a.pdf", b"%PDF-")
        .await
        .expect("a refusal is not an error");

    assert_eq!(outcome, ServiceOutcome::Refused { status: 503 });
    assert_eq!(outcome.id_or_sentinel(), -1);
}

#[tokio::test]
async fn unparseable_upload_response_is_a_fatal_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadFile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload_bytes("a.pdf", b"x")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidJobId { .. }), "got: {err}");
}

#[tokio::test]
async fn job_id_parsing_tolerates_surrounding_whitespace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadFile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  42\n"))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .upload_bytes("a.txt", b"x")
        .await
        .expect("upload should succeed");

    assert_eq!(outcome, ServiceOutcome::Success(JobId(42)));
}

#[tokio::test]
async fn missing_input_file_fails_before_any_request() {
    let server = MockServer::start().await;

    let err = client_for(&server)
        .upload_file("/definitely/not/here.docx")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::FileNotFound { .. }), "got: {err}");
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty(), "no request should have been sent");
}

// ── Status ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_hits_the_job_path_and_returns_the_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getStatus/42"))
        .and(header("user-agent", ConversionClient::USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("CONVERTING: page 3 of 9\n"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .job_status(JobId(42))
        .await
        .expect("status should succeed");

    assert_eq!(outcome.success().as_deref(), Some("CONVERTING: page 3 of 9\n"));
}

#[tokio::test]
async fn refused_status_check_yields_no_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getStatus/43"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .job_status(JobId(43))
        .await
        .expect("a refusal is not an error");

    assert!(outcome.is_refused());
    assert_eq!(outcome.refused_status(), Some(404));
    assert_eq!(outcome.success(), None);
}

// ── Download ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn download_saves_the_body_under_the_advertised_name() {
    // A payload large enough to arrive in several chunks, with every byte value.
    let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloadFile/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"123456myfile.pdf\"",
                )
                .set_body_bytes(payload.clone()),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("create download dir");
    let outcome = client_for(&server)
        .download_file(JobId(42), dir.path())
        .await
        .expect("download should succeed");

    let saved = outcome.success().expect("download accepted");
    assert_eq!(saved.path, dir.path().join("myfile.pdf"));
    assert_eq!(saved.bytes_written, payload.len() as u64);
    assert_eq!(std::fs::read(&saved.path).expect("read saved file"), payload);
}

#[tokio::test]
async fn nameless_download_falls_back_to_the_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloadFile/7"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 converted".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("create download dir");
    let outcome = client_for(&server)
        .download_file(JobId(7), dir.path())
        .await
        .expect("download should succeed");

    let saved = outcome.success().expect("download accepted");
    assert_eq!(saved.path, dir.path().join("somefile.pdf"));
    assert_eq!(
        std::fs::read(&saved.path).expect("read saved file"),
        b"%PDF-1.7 converted"
    );
}

#[tokio::test]
async fn refused_download_writes_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloadFile/9"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("create download dir");
    let outcome = client_for(&server)
        .download_file(JobId(9), dir.path())
        .await
        .expect("a refusal is not an error");

    assert_eq!(outcome, ServiceOutcome::Refused { status: 500 });
    let leftovers = std::fs::read_dir(dir.path()).expect("list dir").count();
    assert_eq!(leftovers, 0, "directory must stay empty on refusal");
}

#[tokio::test]
async fn missing_download_directory_is_a_fatal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloadFile/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("converted"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .download_file(JobId(3), "/no/such/directory/anywhere")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::DownloadWrite { .. }), "got: {err}");
}

#[tokio::test]
async fn download_requests_carry_no_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloadFile/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("create download dir");
    client_for(&server)
        .download_file(JobId(5), dir.path())
        .await
        .expect("download should succeed");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(
        !requests[0].headers.contains_key("user-agent"),
        "download must not identify the client"
    );
}

// ── Transport failures ───────────────────────────────────────────────────

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Port 1 is reserved; nothing listens there.
    let client = ConversionClient::new("http://127.0.0.1:1").expect("valid base url");

    let err = client.job_status(JobId(1)).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }), "got: {err}");
}

// ── Full lifecycle ───────────────────────────────────────────────────────

#[tokio::test]
async fn full_conversion_lifecycle_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploadFile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("314"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getStatus/314"))
        .respond_with(ResponseTemplate::new(200).set_body_string("DONE"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/downloadFile/314"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"000314report.pdf\"",
                )
                .set_body_bytes(b"%PDF-1.4 converted report".to_vec()),
        )
        .mount(&server)
        .await;

    let (_input_dir, input) = scratch_file("report.docx", b"original words");
    let download_dir = tempfile::tempdir().expect("create download dir");
    let client = client_for(&server);

    let job = client
        .upload_file(&input)
        .await
        .expect("upload should succeed")
        .success()
        .expect("upload accepted");
    assert_eq!(job, JobId(314));

    let status = client
        .job_status(job)
        .await
        .expect("status should succeed")
        .success()
        .expect("status text present");
    assert_eq!(status, "DONE");

    let saved = client
        .download_file(job, download_dir.path())
        .await
        .expect("download should succeed")
        .success()
        .expect("download accepted");
    assert_eq!(saved.path, download_dir.path().join("report.pdf"));
    assert_eq!(
        std::fs::read(&saved.path).expect("read saved file"),
        b"%PDF-1.4 converted report"
    );
}
