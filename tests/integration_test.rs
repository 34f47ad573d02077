//! Integration tests for the API client
//!
//! These tests verify the full request path - URL construction, the HTTP
//! transport, status handling, and JSON decoding - against an in-process
//! stub server that speaks just enough HTTP/1.1 for one request per
//! connection.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dikti::api::{ApiClient, ApiError};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Canned response the stub server writes for its single connection
struct StubResponse {
    status_line: &'static str,
    body: String,
    chunked: bool,
}

impl StubResponse {
    fn ok(body: &str) -> Self {
        Self {
            status_line: "HTTP/1.1 200 OK",
            body: body.to_string(),
            chunked: false,
        }
    }

    fn error(status_line: &'static str, body: &str) -> Self {
        Self {
            status_line,
            body: body.to_string(),
            chunked: false,
        }
    }

    fn chunked(body: &str) -> Self {
        Self {
            status_line: "HTTP/1.1 200 OK",
            body: body.to_string(),
            chunked: true,
        }
    }
}

/// Spawn a stub server that serves one connection, then exits.
///
/// Returns the client pointed at the stub and a receiver yielding the
/// request line the server saw (e.g. `GET /search/123?page=1&limit=10`).
fn serve_once(response: StubResponse) -> (ApiClient, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream);

        // Read the request head up to the blank line
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("request header");
            if line == "\r\n" || line == "\n" || line.is_empty() {
                break;
            }
        }
        let _ = tx.send(request_line.trim_end().to_string());

        let mut stream = reader.into_inner();
        if response.chunked {
            let head = format!(
                "{}\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
                response.status_line
            );
            stream.write_all(head.as_bytes()).expect("write head");
            let body = response.body.as_bytes();
            let half = body.len() / 2;
            for part in [&body[..half], &body[half..]] {
                if !part.is_empty() {
                    stream
                        .write_all(format!("{:x}\r\n", part.len()).as_bytes())
                        .expect("write chunk size");
                    stream.write_all(part).expect("write chunk");
                    stream.write_all(b"\r\n").expect("write chunk end");
                }
            }
            stream.write_all(b"0\r\n\r\n").expect("write last chunk");
        } else {
            let head = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                response.status_line,
                response.body.len()
            );
            stream.write_all(head.as_bytes()).expect("write head");
            stream
                .write_all(response.body.as_bytes())
                .expect("write body");
        }
        stream.flush().expect("flush response");
    });

    let client = ApiClient::new(&format!("http://{addr}"), TIMEOUT);
    (client, rx)
}

fn sample_search_body() -> String {
    serde_json::json!([
        {
            "id": "abc-1",
            "nama": "BUDI SANTOSO",
            "nim": "1906123456",
            "nama_pt": "Universitas Indonesia",
            "sinkatan_pt": "UI",
            "nama_prodi": "Ilmu Komputer"
        },
        {
            "id": "abc-2",
            "nama": "SITI AMINAH",
            "nim": "1906123457",
            "nama_pt": "Institut Teknologi Bandung",
            "sinkatan_pt": "ITB",
            "nama_prodi": "Teknik Sipil"
        }
    ])
    .to_string()
}

fn sample_detail_body() -> String {
    serde_json::json!({
        "nama": "BUDI SANTOSO",
        "nim": "1906123456",
        "prodi": "Ilmu Komputer",
        "nama_pt": "Universitas Indonesia",
        "jenis_kelamin": "L",
        "tanggal_masuk": "2019-08-05",
        "jenis_daftar": "Peserta didik baru",
        "status_saat_ini": "Aktif"
    })
    .to_string()
}

#[test]
fn test_search_decodes_rows_and_builds_url() {
    let (client, rx) = serve_once(StubResponse::ok(&sample_search_body()));

    let students = client.search_students("1906123456", 1, 10).unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].name, "BUDI SANTOSO");
    assert_eq!(students[0].institution_display(), "Universitas Indonesia (UI)");
    assert_eq!(students[1].nim, "1906123457");

    let request_line = rx.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(
        request_line,
        "GET /search/1906123456?page=1&limit=10 HTTP/1.1"
    );
}

#[test]
fn test_search_percent_encodes_term() {
    let (client, rx) = serve_once(StubResponse::ok("[]"));

    let students = client.search_students("budi santoso", 2, 50).unwrap();
    assert!(students.is_empty());

    let request_line = rx.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(
        request_line,
        "GET /search/budi%20santoso?page=2&limit=50 HTTP/1.1"
    );
}

#[test]
fn test_search_http_500_is_status_error() {
    let (client, _rx) = serve_once(StubResponse::error(
        "HTTP/1.1 500 Internal Server Error",
        "{\"message\":\"boom\"}",
    ));

    match client.search_students("123", 1, 10) {
        Err(ApiError::Status { status }) => assert_eq!(status, 500),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[test]
fn test_search_malformed_body_is_error() {
    let (client, _rx) = serve_once(StubResponse::ok("this is not json"));

    match client.search_students("123", 1, 10) {
        Err(ApiError::Malformed(_)) => {}
        other => panic!("expected Malformed error, got {other:?}"),
    }
}

#[test]
fn test_search_chunked_response_is_decoded() {
    let (client, _rx) = serve_once(StubResponse::chunked(&sample_search_body()));

    let students = client.search_students("123", 1, 10).unwrap();
    assert_eq!(students.len(), 2);
}

#[test]
fn test_detail_decodes_record_and_builds_url() {
    let (client, rx) = serve_once(StubResponse::ok(&sample_detail_body()));

    let detail = client.student_detail("abc-1").unwrap();
    assert_eq!(detail.name, "BUDI SANTOSO");
    assert_eq!(detail.sex_display(), "Laki-Laki");
    assert_eq!(detail.enrolled_at_display(), "Senin, 5 Agustus 2019");
    assert_eq!(detail.current_status, "Aktif");

    let request_line = rx.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(request_line, "GET /detail/abc-1 HTTP/1.1");
}

#[test]
fn test_detail_http_404_is_status_error() {
    let (client, _rx) = serve_once(StubResponse::error("HTTP/1.1 404 Not Found", "{}"));

    match client.student_detail("missing") {
        Err(ApiError::Status { status }) => assert_eq!(status, 404),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[test]
fn test_connection_refused_is_connect_error() {
    // Nothing listens on port 1
    let client = ApiClient::new("http://127.0.0.1:1", Duration::from_millis(500));

    match client.search_students("123", 1, 10) {
        Err(ApiError::Connect(_) | ApiError::Io(_)) => {}
        other => panic!("expected a transport error, got {other:?}"),
    }
}
