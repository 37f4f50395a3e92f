//! Request/response shapes and the transport seam every command goes through.

pub mod cookies;
pub mod transport;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ApiError;
pub use cookies::CookieJar;
pub use transport::HttpTransport;

/// File part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(FilePart),
}

/// One HTTP call, path relative to the server base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// JSON body, if any.
    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Value of the first query pair named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Parsed JSON body; `Null` when empty, a JSON string when the body is not JSON.
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Decode a raw body the way every transport should.
    #[must_use]
    pub fn decode_body(bytes: &[u8]) -> Value {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Value::Null;
        }
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
    }

    /// String field of the body.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the field is absent, not a string, or empty.
    pub fn str_field(&self, field: &str) -> Result<&str, ApiError> {
        self.body
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::MissingField(field.to_string()))
    }
}

/// Performs a single request on behalf of a session's cookie jar.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest, cookies: &CookieJar)
    -> Result<ApiResponse, ApiError>;
}

/// Check `response.status` against the endpoint's documented statuses.
///
/// # Errors
///
/// Returns `UnexpectedStatus` when the status is not one of `expected`.
pub fn expect_status(
    request: &ApiRequest,
    response: ApiResponse,
    expected: &[u16],
) -> Result<ApiResponse, ApiError> {
    if expected.contains(&response.status) {
        return Ok(response);
    }

    let body = match &response.body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Err(ApiError::UnexpectedStatus {
        method: request.method.to_string(),
        path: request.path.clone(),
        expected: expected
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(" or "),
        actual: response.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expect_status_passes_matching_response_through() {
        let req = ApiRequest::get("/api/v4/bots");
        let resp = expect_status(&req, ApiResponse::new(200, json!([])), &[200]).unwrap();
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn expect_status_reports_mismatch_with_body() {
        let req = ApiRequest::post("/api/v4/channels");
        let err = expect_status(
            &req,
            ApiResponse::new(400, json!({"message": "bad name"})),
            &[201],
        )
        .unwrap_err();

        assert_eq!(err.status(), Some(400));
        let text = err.to_string();
        assert!(text.contains("POST /api/v4/channels"));
        assert!(text.contains("expected 201, got 400"));
        assert!(text.contains("bad name"));
    }

    #[test]
    fn expect_status_lists_every_accepted_status() {
        let req = ApiRequest::delete("/api/v4/plugins/x");
        let err = expect_status(&req, ApiResponse::new(500, Value::Null), &[200, 404]).unwrap_err();
        assert!(err.to_string().contains("expected 200 or 404"));
    }

    #[test]
    fn decode_body_handles_empty_json_and_text() {
        assert_eq!(ApiResponse::decode_body(b""), Value::Null);
        assert_eq!(ApiResponse::decode_body(b" \n"), Value::Null);
        assert_eq!(ApiResponse::decode_body(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(
            ApiResponse::decode_body(b"pong"),
            Value::String("pong".to_string())
        );
    }

    #[test]
    fn str_field_rejects_missing_and_empty() {
        let resp = ApiResponse::new(201, json!({"id": "", "name": "x"}));
        assert!(matches!(resp.str_field("id"), Err(ApiError::MissingField(_))));
        assert!(matches!(resp.str_field("nope"), Err(ApiError::MissingField(_))));
        assert_eq!(resp.str_field("name").unwrap(), "x");
    }

    #[test]
    fn request_builder_collects_query_pairs() {
        let req = ApiRequest::get("/api/v4/users")
            .query("not_in_team", "t1")
            .query("page", 0);
        assert_eq!(req.query_value("not_in_team"), Some("t1"));
        assert_eq!(req.query_value("page"), Some("0"));
        assert!(req.json_body().is_none());
    }
}
