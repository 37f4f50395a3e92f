use serde_json::Value;

use crate::core::constants::HTTP_CREATED;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;

impl Session {
    /// Register a custom slash command (`team_id`, `method`, `trigger`, `url`, ...).
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 201.
    pub async fn create_command(&self, command: &Value) -> Result<ApiResponse, ApiError> {
        self.request(
            ApiRequest::post("/api/v4/commands").json(command.clone()),
            &[HTTP_CREATED],
        )
        .await
    }
}
