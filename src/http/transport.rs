//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use super::{ApiRequest, ApiResponse, CookieJar, RequestBody, Transport};
use crate::core::config::AppConfig;
use crate::core::constants::{CSRF_COOKIE, CSRF_HEADER, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE};
use crate::errors::ApiError;

/// Sends requests to a live server with a shared connection pool.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns `HttpError` if the underlying client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            REQUESTED_WITH_HEADER,
            HeaderValue::from_static(REQUESTED_WITH_VALUE),
        );

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::HttpError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        resolve_url(&self.base_url, path)
    }
}

/// Resolve `path` against `base`, keeping any path prefix the base URL carries.
///
/// # Errors
///
/// Returns `ConfigError` if the joined URL is invalid.
pub fn resolve_url(base: &Url, path: &str) -> Result<Url, ApiError> {
    let mut joined = base.as_str().trim_end_matches('/').to_string();
    joined.push('/');
    joined.push_str(path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| ApiError::ConfigError(format!("{joined}: {e}")))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        cookies: &CookieJar,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self.client.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(cookie_header) = cookies.header_value() {
            builder = builder.header(COOKIE, cookie_header);
        }
        if request.method != Method::GET
            && let Some(csrf) = cookies.get(CSRF_COOKIE)
        {
            builder = builder.header(CSRF_HEADER, csrf);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime_type)
                    .map_err(|e| {
                        ApiError::HttpError(format!("Invalid MIME type {}: {e}", file.mime_type))
                    })?;
                builder.multipart(Form::new().part(file.field.clone(), part))
            }
        };

        let resp = builder.send().await.map_err(|e| {
            ApiError::HttpError(format!("{} {} failed: {e}", request.method, request.path))
        })?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await?;
        debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.path,
            status,
            bytes.len()
        );

        Ok(ApiResponse {
            status,
            headers,
            body: ApiResponse::decode_body(&bytes),
        })
    }
}
