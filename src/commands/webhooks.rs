use serde_json::Value;
use url::Url;

use crate::core::constants::HTTP_CREATED;
use crate::errors::ApiError;
use crate::http::ApiRequest;
use crate::session::Session;

/// Public URL of an incoming webhook.
#[must_use]
pub fn incoming_hook_url(base_url: &Url, hook_id: &str) -> String {
    format!("{}/hooks/{hook_id}", base_url.as_str().trim_end_matches('/'))
}

impl Session {
    /// Create a webhook and return its record with a `url` field added.
    ///
    /// `url` is the public post URL for incoming hooks and empty for outgoing ones.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the hook is created (201).
    pub async fn create_webhook(&self, hook: &Value, incoming: bool) -> Result<Value, ApiError> {
        let path = if incoming {
            "/api/v4/hooks/incoming"
        } else {
            "/api/v4/hooks/outgoing"
        };
        let response = self
            .request(ApiRequest::post(path).json(hook.clone()), &[HTTP_CREATED])
            .await?;

        let url = if incoming {
            incoming_hook_url(&self.config().base_url, response.str_field("id")?)
        } else {
            String::new()
        };

        let mut data = match response.body {
            Value::Object(map) => Value::Object(map),
            _ => return Err(ApiError::ParseError("webhook body is not an object".to_string())),
        };
        data["url"] = Value::String(url);
        Ok(data)
    }
}
