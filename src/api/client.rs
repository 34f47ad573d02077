//! API client for the two PDDIKTI endpoints
//!
//! Builds request URLs from a configured base, performs the GET via the
//! transport layer, enforces the success-status check, and decodes the
//! JSON body into wire types.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport;
use super::types::{StudentDetail, StudentSummary};
use crate::config::DiktiConfig;

/// Client for the PDDIKTI search and detail endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for the given base URL
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Create a client from the application configuration
    #[must_use]
    pub fn from_config(config: &DiktiConfig) -> Self {
        Self::new(&config.base_url, config.timeout())
    }

    /// The configured base URL (without trailing slash)
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for students matching `term`.
    ///
    /// Issues `GET /search/{term}?page={page}&limit={limit}` and returns
    /// the decoded summary rows. The caller is responsible for rejecting
    /// empty terms; this method only encodes whatever it is given.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not a JSON array of summaries.
    pub fn search_students(
        &self,
        term: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<StudentSummary>, ApiError> {
        self.get_json(&search_path(term, page, limit))
    }

    /// Fetch the full enrollment record for one student id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not a JSON detail object.
    pub fn student_detail(&self, student_id: &str) -> Result<StudentDetail, ApiError> {
        self.get_json(&detail_path(student_id))
    }

    fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let started = Instant::now();

        let response = transport::http_get(&url, self.timeout)?;
        log::debug!(
            "GET {path_and_query} -> {} ({}ms)",
            response.status,
            started.elapsed().as_millis()
        );

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

/// Build the search endpoint path and query string.
pub(crate) fn search_path(term: &str, page: u32, limit: u32) -> String {
    format!("/search/{}?page={page}&limit={limit}", encode_segment(term))
}

/// Build the detail endpoint path.
pub(crate) fn detail_path(student_id: &str) -> String {
    format!("/detail/{}", encode_segment(student_id))
}

/// Percent-encode a value for use as a single URL path segment.
///
/// Unreserved characters pass through; everything else (spaces, slashes,
/// non-ASCII names) is encoded byte-wise.
fn encode_segment(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment_passthrough() {
        assert_eq!(encode_segment("1906123456"), "1906123456");
        assert_eq!(encode_segment("abc-DEF_1.2~"), "abc-DEF_1.2~");
    }

    #[test]
    fn test_encode_segment_reserved() {
        assert_eq!(encode_segment("budi santoso"), "budi%20santoso");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_segment("50%"), "50%25");
    }

    #[test]
    fn test_encode_segment_non_ascii() {
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_search_path() {
        assert_eq!(
            search_path("1906123456", 1, 10),
            "/search/1906123456?page=1&limit=10"
        );
        assert_eq!(
            search_path("budi santoso", 2, 50),
            "/search/budi%20santoso?page=2&limit=50"
        );
    }

    #[test]
    fn test_detail_path() {
        assert_eq!(detail_path("abc-123"), "/detail/abc-123");
        assert_eq!(detail_path("id with space"), "/detail/id%20with%20space");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:9000/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:9000");
    }
}
