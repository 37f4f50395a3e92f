//! Privileged calls made as an explicitly supplied actor, outside any caller-held session.
//!
//! Each call logs the actor in on a fresh session and out again afterwards, so it
//! never disturbs the cookies of the session a test is driving.

use reqwest::Method;
use serde_json::Value;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::core::constants::{API_PREFIX, HTTP_OK};
use crate::core::models::Credentials;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};

/// Absolute API path for a path given relative to the API root (`users/{id}/demote`).
#[must_use]
pub fn external_path(relative: &str) -> String {
    format!("{API_PREFIX}/{}", relative.trim_start_matches('/'))
}

impl ApiClient {
    /// Send `method` to `/api/v4/{path}` as `actor`, logging the actor out afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the call does not answer 200.
    pub async fn external_request(
        &self,
        actor: &Credentials,
        method: Method,
        path: &str,
        data: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let mut session = self.login(actor).await?;

        let mut request = ApiRequest::new(method, external_path(path));
        if let Some(data) = data {
            request = request.json(data.clone());
        }

        let result = session.request(request, &[HTTP_OK]).await;
        if let Err(e) = session.logout().await {
            warn!("Logout of {} after external request failed: {}", actor.username, e);
        }

        let response = result?;
        info!("External request {} by {} succeeded", path, actor.username);
        Ok(response)
    }

    /// Demote a member to guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn ext_demote_user(
        &self,
        actor: &Credentials,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.external_request(actor, Method::POST, &format!("users/{user_id}/demote"), None)
            .await
    }

    /// Promote a guest to member.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn ext_promote_user(
        &self,
        actor: &Credentials,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.external_request(actor, Method::POST, &format!("users/{user_id}/promote"), None)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn ext_remove_user_from_channel(
        &self,
        actor: &Credentials,
        channel_id: &str,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.external_request(
            actor,
            Method::DELETE,
            &format!("channels/{channel_id}/members/{user_id}"),
            None,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn ext_remove_user_from_team(
        &self,
        actor: &Credentials,
        team_id: &str,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.external_request(
            actor,
            Method::DELETE,
            &format!("teams/{team_id}/members/{user_id}"),
            None,
        )
        .await
    }

    /// [`ApiClient::ext_demote_user`] as the configured administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn demote_user(&self, user_id: &str) -> Result<ApiResponse, ApiError> {
        self.ext_demote_user(&self.config().admin_credentials(), user_id)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn promote_user(&self, user_id: &str) -> Result<ApiResponse, ApiError> {
        self.ext_promote_user(&self.config().admin_credentials(), user_id)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn remove_user_from_channel(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.ext_remove_user_from_channel(&self.config().admin_credentials(), channel_id, user_id)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the actor cannot log in or the server does not answer 200.
    pub async fn remove_user_from_team(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.ext_remove_user_from_team(&self.config().admin_credentials(), team_id, user_id)
            .await
    }
}
