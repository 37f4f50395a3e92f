use crate::core::constants::HTTP_OK;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;

impl Session {
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn unpin_post(&self, post_id: &str) -> Result<ApiResponse, ApiError> {
        self.request(
            ApiRequest::post(format!("/api/v4/posts/{post_id}/unpin")),
            &[HTTP_OK],
        )
        .await
    }
}
