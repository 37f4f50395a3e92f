use serde_json::{Value, json};

use crate::core::constants::{HTTP_CREATED, HTTP_OK};
use crate::core::models::{Team, TeamMember};
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;
use crate::utils::unique_name;

#[must_use]
pub fn build_create_team_payload(team_name: &str, display_name: &str, team_type: &str) -> Value {
    json!({
        "name": team_name,
        "display_name": display_name,
        "type": team_type,
    })
}

/// Decode the team list body of `GET /teams`.
///
/// # Errors
///
/// Returns `ParseError` if the body is not a list of teams.
pub fn parse_teams(body: &Value) -> Result<Vec<Team>, ApiError> {
    Ok(serde_json::from_value(body.clone())?)
}

impl Session {
    /// Create a team named `name-<random>`. `team_type` is `O` (open) or `I` (invite only).
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the team is created (201).
    pub async fn create_team(
        &self,
        name: &str,
        display_name: &str,
        team_type: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let payload =
            build_create_team_payload(&unique_name(name), display_name, team_type.unwrap_or("O"));
        self.request(ApiRequest::post("/api/v4/teams").json(payload), &[HTTP_CREATED])
            .await
    }

    /// Archive a team, or remove it for good when `permanent` is set.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn delete_team(&self, team_id: &str, permanent: bool) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::delete(format!("/api/v4/teams/{team_id}"));
        if permanent {
            request = request.query("permanent", true);
        }
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn patch_team(&self, team_id: &str, patch: &Value) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::put(format!("/api/v4/teams/{team_id}/patch")).json(patch.clone());
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_teams(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/teams"), &[HTTP_OK])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_my_teams(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/users/me/teams"), &[HTTP_OK])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_team(&self, team_id: &str) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get(format!("/api/v4/teams/{team_id}")), &[HTTP_OK])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the membership is created (201).
    pub async fn add_user_to_team(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post(format!("/api/v4/teams/{team_id}/members"))
            .query("team_id", team_id)
            .json(json!({ "team_id": team_id, "user_id": user_id }));
        self.request(request, &[HTTP_CREATED]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 201.
    pub async fn add_users_to_team(
        &self,
        team_id: &str,
        members: &[TeamMember],
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post(format!("/api/v4/teams/{team_id}/members/batch"))
            .json(serde_json::to_value(members)?);
        self.request(request, &[HTTP_CREATED]).await
    }
}
