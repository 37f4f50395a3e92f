use serde_json::{Value, json};

use crate::core::constants::{HTTP_CREATED, HTTP_OK};
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;

#[must_use]
pub fn build_create_bot_payload(username: &str, display_name: &str, description: &str) -> Value {
    json!({
        "username": username,
        "display_name": display_name,
        "description": description,
    })
}

impl Session {
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_bots(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/bots"), &[HTTP_OK])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the bot is created (201).
    pub async fn create_bot(
        &self,
        username: &str,
        display_name: &str,
        description: &str,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post("/api/v4/bots").json(build_create_bot_payload(
            username,
            display_name,
            description,
        ));
        self.request(request, &[HTTP_CREATED]).await
    }

    /// Issue a personal access token for `user_id` (a bot or a regular user).
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn create_access_token(
        &self,
        user_id: &str,
        description: &str,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post(format!("/api/v4/users/{user_id}/tokens"))
            .json(json!({ "description": description }));
        self.request(request, &[HTTP_OK]).await
    }
}
