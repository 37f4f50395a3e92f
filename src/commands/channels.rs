use serde_json::{Value, json};

use crate::core::constants::{HTTP_CREATED, HTTP_OK};
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;
use crate::utils::unique_name;

/// Optional fields of a new channel. Defaults to an open channel with empty purpose and header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOptions {
    /// `O` (open) or `P` (private); passed through unvalidated.
    pub channel_type: String,
    pub purpose: String,
    pub header: String,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self {
            channel_type: "O".to_string(),
            purpose: String::new(),
            header: String::new(),
        }
    }
}

#[must_use]
pub fn build_create_channel_payload(
    team_id: &str,
    channel_name: &str,
    display_name: &str,
    options: &ChannelOptions,
) -> Value {
    json!({
        "team_id": team_id,
        "name": channel_name,
        "display_name": display_name,
        "type": options.channel_type,
        "purpose": options.purpose,
        "header": options.header,
    })
}

/// Full-update body: the caller's fields with `id` forced to `channel_id`.
#[must_use]
pub fn build_update_channel_payload(channel_id: &str, channel: &Value) -> Value {
    let mut payload = match channel {
        Value::Object(map) => Value::Object(map.clone()),
        _ => json!({}),
    };
    payload["id"] = Value::String(channel_id.to_string());
    payload
}

impl Session {
    /// Create a channel named `name-<random>` so repeated runs do not collide.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the channel is created (201).
    pub async fn create_channel(
        &self,
        team_id: &str,
        name: &str,
        display_name: &str,
        options: &ChannelOptions,
    ) -> Result<ApiResponse, ApiError> {
        let payload =
            build_create_channel_payload(team_id, &unique_name(name), display_name, options);
        self.request(ApiRequest::post("/api/v4/channels").json(payload), &[HTTP_CREATED])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 201.
    pub async fn create_direct_channel(&self, user_ids: &[&str]) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post("/api/v4/channels/direct").json(json!(user_ids));
        self.request(request, &[HTTP_CREATED]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 201.
    pub async fn create_group_channel(&self, user_ids: &[&str]) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post("/api/v4/channels/group").json(json!(user_ids));
        self.request(request, &[HTTP_CREATED]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn delete_channel(&self, channel_id: &str) -> Result<ApiResponse, ApiError> {
        self.request(
            ApiRequest::delete(format!("/api/v4/channels/{channel_id}")),
            &[HTTP_OK],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn update_channel(
        &self,
        channel_id: &str,
        channel: &Value,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::put(format!("/api/v4/channels/{channel_id}"))
            .json(build_update_channel_payload(channel_id, channel));
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn patch_channel(
        &self,
        channel_id: &str,
        patch: &Value,
    ) -> Result<ApiResponse, ApiError> {
        let request =
            ApiRequest::put(format!("/api/v4/channels/{channel_id}/patch")).json(patch.clone());
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_channel_by_name(
        &self,
        team_name: &str,
        channel_name: &str,
    ) -> Result<ApiResponse, ApiError> {
        self.request(
            ApiRequest::get(format!(
                "/api/v4/teams/name/{team_name}/channels/name/{channel_name}"
            )),
            &[HTTP_OK],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_channel(&self, channel_id: &str) -> Result<ApiResponse, ApiError> {
        self.request(
            ApiRequest::get(format!("/api/v4/channels/{channel_id}")),
            &[HTTP_OK],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 201.
    pub async fn add_user_to_channel(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post(format!("/api/v4/channels/{channel_id}/members"))
            .json(json!({ "user_id": user_id }));
        self.request(request, &[HTTP_CREATED]).await
    }
}
