use serde_json::{Value, json};

use crate::core::constants::{HTTP_CREATED, HTTP_OK};
use crate::core::models::ResolvedUser;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;

pub const DEFAULT_USERS_PER_PAGE: u32 = 60;

#[must_use]
pub fn build_create_user_payload(user: &ResolvedUser) -> Value {
    json!({
        "email": user.email,
        "username": user.username,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "password": user.password,
        "nickname": user.nickname,
    })
}

impl Session {
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_me(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/users/me"), &[HTTP_OK])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_user_by_email(&self, email: &str) -> Result<ApiResponse, ApiError> {
        self.request(
            ApiRequest::get(format!("/api/v4/users/email/{email}")),
            &[HTTP_OK],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_users_by_usernames(
        &self,
        usernames: &[&str],
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post("/api/v4/users/usernames").json(json!(usernames));
        self.request(request, &[HTTP_OK]).await
    }

    /// One page of users that are not members of `team_id`.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_users_not_in_team(
        &self,
        team_id: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get("/api/v4/users")
            .query("not_in_team", team_id)
            .query("page", page.unwrap_or(0))
            .query("per_page", per_page.unwrap_or(DEFAULT_USERS_PER_PAGE));
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn patch_user(&self, user_id: &str, patch: &Value) -> Result<ApiResponse, ApiError> {
        let request =
            ApiRequest::put(format!("/api/v4/users/{user_id}/patch")).json(patch.clone());
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn patch_me(&self, patch: &Value) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::put("/api/v4/users/me/patch").json(patch.clone());
        self.request(request, &[HTTP_OK]).await
    }

    /// Set the session user's status: `online` (default), `offline`, `away` or `dnd`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session has no user id.
    pub async fn update_user_status(&self, status: Option<&str>) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::put("/api/v4/users/me/status").json(json!({
            "user_id": self.current_user_id()?,
            "status": status.unwrap_or("online"),
        }));
        self.request(request, &[HTTP_OK]).await
    }

    /// Create an account. Requires a session allowed to create users.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the user is created (201).
    pub async fn create_user(&self, user: &ResolvedUser) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post("/api/v4/users").json(build_create_user_payload(user));
        self.request(request, &[HTTP_CREATED]).await
    }
}
