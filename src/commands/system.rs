use serde_json::Value;
use tracing::info;

use crate::core::constants::HTTP_OK;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;
use crate::utils::merge_deep;

impl Session {
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn ping(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/system/ping"), &[HTTP_OK])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_config(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/config"), &[HTTP_OK])
            .await
    }

    /// Read the current config, deep-merge `settings` into it and write it back.
    ///
    /// # Errors
    ///
    /// Returns an error if either the read or the write is rejected.
    pub async fn update_config(&self, settings: &Value) -> Result<ApiResponse, ApiError> {
        let mut config = self.get_config().await?.body;
        merge_deep(&mut config, settings);

        let response = self
            .request(ApiRequest::put("/api/v4/config").json(config), &[HTTP_OK])
            .await?;
        info!("Server config updated");
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_analytics(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/analytics/old"), &[HTTP_OK])
            .await
    }
}
