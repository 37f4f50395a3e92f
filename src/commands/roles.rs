use serde_json::Value;

use crate::core::constants::HTTP_OK;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;

impl Session {
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_role_by_name(&self, role_name: &str) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(format!("/api/v4/roles/name/{role_name}"))
            .timeout(self.config().slow_request_timeout);
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn patch_role(&self, role_id: &str, patch: &Value) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::put(format!("/api/v4/roles/{role_id}/patch"))
            .json(patch.clone())
            .timeout(self.config().slow_request_timeout);
        self.request(request, &[HTTP_OK]).await
    }
}
