use crate::core::constants::HTTP_OK;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;

impl Session {
    /// First page (50) of LDAP sync jobs, newest first.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_ldap_sync_jobs(&self) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get("/api/v4/jobs/type/ldap_sync")
            .query("page", 0)
            .query("per_page", 50)
            .timeout(self.config().slow_request_timeout);
        self.request(request, &[HTTP_OK]).await
    }
}
