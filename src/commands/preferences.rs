//! Preference writes, plus wrappers for the categories tests commonly touch.
//!
//! Wrappers write a single preference for the session's user. Every value is
//! sent as a string; structured values (theme, sidebar) are JSON text.

use serde_json::{Value, json};

use crate::core::constants::HTTP_OK;
use crate::core::models::Preference;
use crate::errors::ApiError;
use crate::http::{ApiRequest, ApiResponse};
use crate::session::Session;
use crate::utils::merge_deep;

pub const DISPLAY_SETTINGS: &str = "display_settings";
pub const ADVANCED_SETTINGS: &str = "advanced_settings";
pub const THEME: &str = "theme";
pub const SIDEBAR_SETTINGS: &str = "sidebar_settings";

/// Sidebar settings written when the caller overrides nothing.
#[must_use]
pub fn default_sidebar_settings() -> Value {
    json!({
        "grouping": "by_type",
        "unreads_at_top": "true",
        "favorite_at_top": "true",
        "sorting": "alpha",
    })
}

/// Default sidebar settings with `overrides` laid on top.
#[must_use]
pub fn sidebar_settings_value(overrides: Option<&Value>) -> Value {
    let mut value = default_sidebar_settings();
    if let Some(overrides) = overrides {
        merge_deep(&mut value, overrides);
    }
    value
}

/// Text stored for a structured preference. JSON text passed as a string is
/// kept verbatim; any other value is serialized.
#[must_use]
pub fn preference_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Theme preference value; `{}` when no theme is given.
#[must_use]
pub fn theme_value(theme: Option<&Value>) -> String {
    theme.map_or_else(|| json!({}).to_string(), preference_text)
}

/// Sidebar preference value. Overrides given as JSON text replace the
/// defaults untouched; object overrides are merged into them.
#[must_use]
pub fn sidebar_settings_text(overrides: Option<&Value>) -> String {
    match overrides {
        Some(Value::String(text)) => text.clone(),
        other => sidebar_settings_value(other).to_string(),
    }
}

impl Session {
    /// Write `preferences` for `user_id` (`me` when `None`).
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn save_user_preferences(
        &self,
        preferences: &[Preference],
        user_id: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let user_id = user_id.unwrap_or("me");
        let request = ApiRequest::put(format!("/api/v4/users/{user_id}/preferences"))
            .json(serde_json::to_value(preferences)?);
        self.request(request, &[HTTP_OK]).await
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` unless the server answers 200.
    pub async fn get_user_preferences(
        &self,
        user_id: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let user_id = user_id.unwrap_or("me");
        self.request(
            ApiRequest::get(format!("/api/v4/users/{user_id}/preferences")),
            &[HTTP_OK],
        )
        .await
    }

    async fn save_my_preference(
        &self,
        category: &str,
        name: &str,
        value: &str,
    ) -> Result<ApiResponse, ApiError> {
        let preference = Preference::new(self.current_user_id()?, category, name, value);
        self.save_user_preferences(&[preference], None).await
    }

    /// `full` or `centered`; defaults to `full`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_channel_display_mode_preference(
        &self,
        value: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(
            DISPLAY_SETTINGS,
            "channel_display_mode",
            value.unwrap_or("full"),
        )
        .await
    }

    /// `clean` or `compact`; defaults to `clean`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_message_display_preference(
        &self,
        value: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(DISPLAY_SETTINGS, "message_display", value.unwrap_or("clean"))
            .await
    }

    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_show_markdown_preview_preference(
        &self,
        value: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(
            ADVANCED_SETTINGS,
            "feature_enabled_markdown_preview",
            value.unwrap_or("true"),
        )
        .await
    }

    /// `username`, `nickname_full_name` or `full_name`; defaults to `username`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_teammate_name_display_preference(
        &self,
        value: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(DISPLAY_SETTINGS, "name_format", value.unwrap_or("username"))
            .await
    }

    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_theme_preference(
        &self,
        theme: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(THEME, "", &theme_value(theme)).await
    }

    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_sidebar_setting_preference(
        &self,
        overrides: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(
            SIDEBAR_SETTINGS,
            "",
            &sidebar_settings_text(overrides),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_show_preview_preference(
        &self,
        show: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(DISPLAY_SETTINGS, "link_previews", show.unwrap_or("true"))
            .await
    }

    /// # Errors
    ///
    /// Returns `SessionError` without a logged-in user, or `UnexpectedStatus` unless the write is accepted (200).
    pub async fn save_preview_collapsed_preference(
        &self,
        collapse: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.save_my_preference(
            DISPLAY_SETTINGS,
            "collapse_previews",
            collapse.unwrap_or("true"),
        )
        .await
    }
}
