use tracing::debug;

use crate::core::constants::{HTTP_CREATED, HTTP_NOT_FOUND, HTTP_OK};
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse, FilePart};
use crate::session::Session;
use crate::utils::mime::resolve_mime;

/// Multipart field the server expects the plugin bundle in.
pub const PLUGIN_UPLOAD_FIELD: &str = "plugin";

#[must_use]
pub fn plugin_path(plugin_id: &str) -> String {
    format!("/api/v4/plugins/{}", urlencoding::encode(plugin_id))
}

impl Session {
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the plugin is installed (201).
    pub async fn install_plugin_from_url(
        &self,
        download_url: &str,
        force: bool,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post("/api/v4/plugins/install_from_url")
            .query("plugin_download_url", download_url)
            .query("force", force)
            .timeout(self.config().slow_request_timeout);
        self.request(request, &[HTTP_CREATED]).await
    }

    /// Remove a plugin; a plugin that is not installed is not an error.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` for anything other than 200 or 404.
    pub async fn uninstall_plugin(&self, plugin_id: &str) -> Result<ApiResponse, ApiError> {
        self.request(
            ApiRequest::delete(plugin_path(plugin_id)),
            &[HTTP_OK, HTTP_NOT_FOUND],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_all_plugins(&self) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get("/api/v4/plugins"), &[HTTP_OK])
            .await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn enable_plugin(&self, plugin_id: &str) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post(format!("{}/enable", plugin_path(plugin_id)))
            .timeout(self.config().slow_request_timeout);
        self.request(request, &[HTTP_OK]).await
    }

    /// Upload a plugin bundle read from the fixtures directory.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the fixture cannot be read, `UnexpectedStatus` unless
    /// the upload is accepted (201).
    pub async fn upload_plugin_binary(
        &self,
        file_name: &str,
        file_type: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let path = self.config().fixtures_dir.join(file_name);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ApiError::IoError(format!("{}: {e}", path.display())))?;
        debug!("Uploading plugin {} ({} bytes)", file_name, bytes.len());

        let part = FilePart {
            field: PLUGIN_UPLOAD_FIELD.to_string(),
            file_name: file_name.to_string(),
            mime_type: resolve_mime(file_name, file_type),
            bytes,
        };
        let request = ApiRequest::post("/api/v4/plugins")
            .multipart(part)
            .timeout(self.config().slow_request_timeout);
        self.request(request, &[HTTP_CREATED]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_path_encodes_id() {
        assert_eq!(plugin_path("com.example.demo"), "/api/v4/plugins/com.example.demo");
        assert_eq!(plugin_path("a/b c"), "/api/v4/plugins/a%2Fb%20c");
    }
}
