//! Minimal blocking HTTP transport
//!
//! Performs a single HTTP/1.1 GET without pulling in a full HTTP client
//! stack. Plain HTTP goes over `std::net::TcpStream` with connect, read and
//! write timeouts; HTTPS is delegated to a `curl` subprocess so the crate
//! stays free of TLS bindings. No retries and no redirect following: any
//! non-success outcome is reported to the caller as-is.

use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Read as _, Write as _};
use std::net::TcpStream;
use std::time::Duration;

use super::error::ApiError;

/// Maximum response body bytes to read.
const BODY_LIMIT: usize = 4 * 1024 * 1024; // 4 MiB

/// A captured HTTP response.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers (lowercased keys).
    pub headers: BTreeMap<String, String>,
    /// Response body bytes (truncated to `BODY_LIMIT`).
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Get a header value by lowercase key.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedUrl {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scheme {
    Http,
    Https,
}

impl Scheme {
    const fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl ParsedUrl {
    pub(crate) fn parse(url: &str) -> Result<Self, ApiError> {
        let (scheme, rest) = if let Some(rest) = url.strip_prefix("https://") {
            (Scheme::Https, rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            (Scheme::Http, rest)
        } else {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme in URL: {url}"
            )));
        };

        let (host_port, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        let (host, port) = if let Some(colon) = host_port.rfind(':') {
            let h = &host_port[..colon];
            let p = host_port[colon + 1..]
                .parse::<u16>()
                .map_err(|e| ApiError::InvalidUrl(format!("invalid port: {e}")))?;
            (h.to_string(), p)
        } else {
            (host_port.to_string(), scheme.default_port())
        };

        if host.is_empty() {
            return Err(ApiError::InvalidUrl("empty host".to_string()));
        }

        Ok(Self {
            scheme,
            host,
            port,
            path: path.to_string(),
        })
    }

    /// Host plus port, omitting the scheme's default port.
    pub(crate) fn authority(&self) -> String {
        if self.port == self.scheme.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    fn to_url(&self) -> String {
        format!("{}://{}{}", self.scheme.as_str(), self.authority(), self.path)
    }
}

/// Perform a single HTTP GET request against the given URL.
///
/// # Errors
///
/// Returns an `ApiError` categorizing the failure: bad URL, DNS failure,
/// connection failure, timeout, or a malformed response. A non-2xx status
/// is NOT an error at this layer; callers check `HttpResponse::status`.
pub fn http_get(url: &str, timeout: Duration) -> Result<HttpResponse, ApiError> {
    let parsed = ParsedUrl::parse(url)?;

    match parsed.scheme {
        Scheme::Http => get_over_tcp(&parsed, timeout),
        Scheme::Https => get_via_curl(&parsed, timeout),
    }
}

fn get_over_tcp(parsed: &ParsedUrl, timeout: Duration) -> Result<HttpResponse, ApiError> {
    let addr = format!("{}:{}", parsed.host, parsed.port);

    let socket_addr = addr.parse().or_else(|_| {
        use std::net::ToSocketAddrs;
        addr.to_socket_addrs()
            .map_err(|e| ApiError::Dns(e.to_string()))?
            .next()
            .ok_or_else(|| ApiError::Dns(format!("no addresses for {addr}")))
    })?;

    let stream = TcpStream::connect_timeout(&socket_addr, timeout)
        .map_err(|e| categorize_io_error(e, timeout))?;

    stream
        .set_read_timeout(Some(timeout))
        .map_err(|e| ApiError::Io(e.to_string()))?;
    stream
        .set_write_timeout(Some(timeout))
        .map_err(|e| ApiError::Io(e.to_string()))?;

    send_and_receive(stream, parsed, timeout)
}

/// Send an HTTP/1.1 GET request and parse the response.
fn send_and_receive<S: io::Read + io::Write>(
    mut stream: S,
    parsed: &ParsedUrl,
    timeout: Duration,
) -> Result<HttpResponse, ApiError> {
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nUser-Agent: dikti/{}\r\nAccept: application/json\r\nConnection: close\r\n\r\n",
        parsed.path,
        parsed.authority(),
        env!("CARGO_PKG_VERSION"),
    );

    stream
        .write_all(request.as_bytes())
        .map_err(|e| categorize_io_error(e, timeout))?;
    stream
        .flush()
        .map_err(|e| categorize_io_error(e, timeout))?;

    let mut reader = BufReader::new(stream);

    // Parse status line
    let mut status_line = String::new();
    reader
        .read_line(&mut status_line)
        .map_err(|e| categorize_io_error(e, timeout))?;

    let status = parse_status_line(&status_line)?;

    // Parse headers
    let mut headers = BTreeMap::new();
    let mut content_length: Option<usize> = None;
    let mut chunked = false;

    loop {
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| categorize_io_error(e, timeout))?;

        let trimmed = line.trim_end_matches("\r\n").trim_end_matches('\n');
        if trimmed.is_empty() {
            break;
        }

        if let Some((key, value)) = trimmed.split_once(':') {
            let key_lower = key.trim().to_lowercase();
            let value_trimmed = value.trim().to_string();

            if key_lower == "content-length" {
                content_length = value_trimmed.parse().ok();
            }
            if key_lower == "transfer-encoding" && value_trimmed.to_lowercase().contains("chunked")
            {
                chunked = true;
            }

            headers.insert(key_lower, value_trimmed);
        }
    }

    // Read body
    let body = if chunked {
        read_chunked_body(&mut reader)?
    } else if let Some(len) = content_length {
        let capped = len.min(BODY_LIMIT);
        let mut buf = vec![0u8; capped];
        reader
            .read_exact(&mut buf)
            .map_err(|e| categorize_io_error(e, timeout))?;
        buf
    } else {
        // Read until EOF (Connection: close)
        let mut buf = Vec::new();
        let _ = reader.take(BODY_LIMIT as u64).read_to_end(&mut buf);
        buf
    };

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Fetch over HTTPS via a `curl` subprocess (avoids a native TLS dependency).
fn get_via_curl(parsed: &ParsedUrl, timeout: Duration) -> Result<HttpResponse, ApiError> {
    let url = parsed.to_url();
    let timeout_secs = timeout.as_secs().max(1);

    let output = std::process::Command::new("curl")
        .args([
            "-sS",
            "-D",
            "-", // dump headers to stdout ahead of the body
            "--max-time",
            &timeout_secs.to_string(),
            "--max-redirs",
            "0",
            "-A",
            concat!("dikti/", env!("CARGO_PKG_VERSION")),
            &url,
        ])
        .output()
        .map_err(|e| ApiError::Connect(format!("curl not available: {e}")))?;

    if !output.status.success() && output.stdout.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("timed out") {
            #[allow(clippy::cast_possible_truncation)]
            return Err(ApiError::Timeout(timeout.as_millis() as u64));
        }
        return Err(ApiError::Connect(format!("curl failed: {}", stderr.trim())));
    }

    // curl output: headers and body separated by a blank line
    let raw = String::from_utf8_lossy(&output.stdout);
    let (header_section, body_str) = raw.split_once("\r\n\r\n").unwrap_or((&raw, ""));

    let mut lines = header_section.lines();
    let status_line = lines.next().unwrap_or("");
    let status = parse_status_line(status_line)?;

    let mut headers = BTreeMap::new();
    for line in lines {
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }

    Ok(HttpResponse {
        status,
        headers,
        body: body_str.as_bytes().to_vec(),
    })
}

fn parse_status_line(line: &str) -> Result<u16, ApiError> {
    // "HTTP/1.1 200 OK" -> 200
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(ApiError::Malformed(format!(
            "malformed status line: {line:?}"
        )));
    }
    parts[1]
        .parse::<u16>()
        .map_err(|_| ApiError::Malformed(format!("invalid status code in: {line:?}")))
}

fn read_chunked_body<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader
            .read_line(&mut size_line)
            .map_err(|e| ApiError::Io(e.to_string()))?;

        let size_str = size_line.trim();
        // Strip chunk extensions (";ext=val")
        let size_hex = size_str.split(';').next().unwrap_or("0").trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| ApiError::Malformed(format!("invalid chunk size: {size_str}")))?;

        if size == 0 {
            // Read trailing \r\n
            let mut trailer = String::new();
            let _ = reader.read_line(&mut trailer);
            break;
        }

        if body.len() + size > BODY_LIMIT {
            let remaining = BODY_LIMIT - body.len();
            let mut buf = vec![0u8; remaining];
            reader
                .read_exact(&mut buf)
                .map_err(|e| ApiError::Io(e.to_string()))?;
            body.extend_from_slice(&buf);
            break;
        }

        let mut buf = vec![0u8; size];
        reader
            .read_exact(&mut buf)
            .map_err(|e| ApiError::Io(e.to_string()))?;
        body.extend_from_slice(&buf);

        // Read trailing \r\n after chunk data
        let mut crlf = [0u8; 2];
        let _ = reader.read_exact(&mut crlf);
    }

    Ok(body)
}

fn categorize_io_error(err: io::Error, timeout: Duration) -> ApiError {
    match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
            #[allow(clippy::cast_possible_truncation)]
            ApiError::Timeout(timeout.as_millis() as u64)
        }
        io::ErrorKind::ConnectionRefused => ApiError::Connect("connection refused".to_string()),
        io::ErrorKind::ConnectionReset => ApiError::Connect("connection reset".to_string()),
        _ => ApiError::Io(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- URL parsing --------------------------------------------------

    #[test]
    fn parse_http_url() {
        let p = ParsedUrl::parse("http://example.com/search/123").unwrap();
        assert_eq!(p.host, "example.com");
        assert_eq!(p.port, 80);
        assert_eq!(p.path, "/search/123");
        assert!(matches!(p.scheme, Scheme::Http));
    }

    #[test]
    fn parse_https_url() {
        let p = ParsedUrl::parse("https://example.com/detail/abc").unwrap();
        assert_eq!(p.port, 443);
        assert!(matches!(p.scheme, Scheme::Https));
    }

    #[test]
    fn parse_url_with_port() {
        let p = ParsedUrl::parse("http://127.0.0.1:9000/search/1").unwrap();
        assert_eq!(p.host, "127.0.0.1");
        assert_eq!(p.port, 9000);
    }

    #[test]
    fn parse_url_no_path() {
        let p = ParsedUrl::parse("https://example.com").unwrap();
        assert_eq!(p.path, "/");
    }

    #[test]
    fn parse_invalid_scheme() {
        assert!(ParsedUrl::parse("ftp://example.com").is_err());
    }

    #[test]
    fn parse_empty_host() {
        assert!(ParsedUrl::parse("http:///search/1").is_err());
    }

    #[test]
    fn authority_omits_default_port() {
        let p = ParsedUrl::parse("https://example.com/x").unwrap();
        assert_eq!(p.authority(), "example.com");
    }

    #[test]
    fn authority_keeps_custom_port() {
        let p = ParsedUrl::parse("http://localhost:8080/x").unwrap();
        assert_eq!(p.authority(), "localhost:8080");
    }

    #[test]
    fn to_url_roundtrip() {
        let url = "https://example.com/detail/abc";
        let p = ParsedUrl::parse(url).unwrap();
        assert_eq!(p.to_url(), url);
    }

    // -- Status line parsing ------------------------------------------

    #[test]
    fn parse_status_200() {
        assert_eq!(parse_status_line("HTTP/1.1 200 OK").unwrap(), 200);
    }

    #[test]
    fn parse_status_500() {
        assert_eq!(
            parse_status_line("HTTP/1.1 500 Internal Server Error").unwrap(),
            500
        );
    }

    #[test]
    fn parse_status_malformed() {
        assert!(parse_status_line("garbage").is_err());
        assert!(parse_status_line("").is_err());
    }

    // -- Chunked bodies -----------------------------------------------

    #[test]
    fn chunked_body_single_chunk() {
        let data = b"5\r\nhello\r\n0\r\n\r\n";
        let mut cursor = std::io::Cursor::new(data.as_ref());
        let body = read_chunked_body(&mut std::io::BufReader::new(&mut cursor)).unwrap();
        assert_eq!(body, b"hello");
    }

    #[test]
    fn chunked_body_multiple_chunks() {
        let data = b"5\r\nhello\r\n6\r\n world\r\n0\r\n\r\n";
        let mut cursor = std::io::Cursor::new(data.as_ref());
        let body = read_chunked_body(&mut std::io::BufReader::new(&mut cursor)).unwrap();
        assert_eq!(body, b"hello world");
    }

    #[test]
    fn chunked_body_empty() {
        let data = b"0\r\n\r\n";
        let mut cursor = std::io::Cursor::new(data.as_ref());
        let body = read_chunked_body(&mut std::io::BufReader::new(&mut cursor)).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn chunked_body_with_extension() {
        let data = b"5;ext=val\r\nhello\r\n0\r\n\r\n";
        let mut cursor = std::io::Cursor::new(data.as_ref());
        let body = read_chunked_body(&mut std::io::BufReader::new(&mut cursor)).unwrap();
        assert_eq!(body, b"hello");
    }

    // -- Error categorization -----------------------------------------

    #[test]
    fn categorize_timeout() {
        let err = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        match categorize_io_error(err, Duration::from_secs(5)) {
            ApiError::Timeout(ms) => assert_eq!(ms, 5000),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn categorize_connection_refused() {
        let err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        match categorize_io_error(err, Duration::from_secs(5)) {
            ApiError::Connect(detail) => assert!(detail.contains("refused")),
            other => panic!("expected Connect, got {other:?}"),
        }
    }

    // -- Response helpers ---------------------------------------------

    #[test]
    fn response_header_lookup_and_success() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let resp = HttpResponse {
            status: 200,
            headers,
            body: b"[]".to_vec(),
        };
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("missing"), None);
        assert!(resp.is_success());

        let err = HttpResponse {
            status: 404,
            headers: BTreeMap::new(),
            body: Vec::new(),
        };
        assert!(!err.is_success());
    }
}
