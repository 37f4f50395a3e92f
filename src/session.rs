//! An authenticated session and the request plumbing shared by every command.

use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::core::config::AppConfig;
use crate::core::constants::{HTTP_OK, SESSION_COOKIES, USER_ID_COOKIE};
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse, CookieJar, expect_status};

/// Cookie-authenticated context. Every command runs as the user this session belongs to.
#[derive(Clone)]
pub struct Session {
    client: ApiClient,
    cookies: CookieJar,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cookies", &self.cookies.names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A session with no cookies; only useful for unauthenticated calls and login.
    #[must_use]
    pub fn anonymous(client: ApiClient) -> Self {
        Self {
            client,
            cookies: CookieJar::new(),
        }
    }

    #[must_use]
    pub fn with_cookies(client: ApiClient, cookies: CookieJar) -> Self {
        Self { client, cookies }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        self.client.config()
    }

    #[must_use]
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Id of the logged-in user, read from the `MMUSERID` cookie.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session carries no user id.
    pub fn current_user_id(&self) -> Result<&str, ApiError> {
        self.cookies
            .get(USER_ID_COOKIE)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::SessionError(format!("{USER_ID_COOKIE} cookie not set")))
    }

    /// Send without checking the status.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.client.transport().send(request, &self.cookies).await
    }

    /// Send and require one of `expected` statuses.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` on any other status, or a transport error.
    pub async fn request(
        &self,
        request: ApiRequest,
        expected: &[u16],
    ) -> Result<ApiResponse, ApiError> {
        let response = self.send(&request).await?;
        expect_status(&request, response, expected)
    }

    /// Log in as `login_id`, replacing any cookies this session held.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn login(&mut self, login_id: &str, password: &str) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post("/api/v4/users/login")
            .json(json!({ "login_id": login_id, "password": password }));

        let response = self
            .client
            .transport()
            .send(&request, &CookieJar::new())
            .await?;
        let response = expect_status(&request, response, &[HTTP_OK])?;

        self.cookies.clear();
        self.cookies.absorb(&response.headers);
        info!("Logged in as {}", login_id);
        Ok(response)
    }

    /// Log out and drop every cookie. The jar is empty afterwards, even when
    /// the server rejects the logout.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200, or a transport error.
    pub async fn logout(&mut self) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::new(Method::POST, "/api/v4/users/logout");
        let sent = self.send(&request).await;

        for name in SESSION_COOKIES {
            self.cookies.remove(name);
        }
        self.cookies.clear();
        debug!("Session cookies cleared");

        expect_status(&request, sent?, &[HTTP_OK])
    }
}
