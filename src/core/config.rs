use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8065";
const DEFAULT_ADMIN_USERNAME: &str = "sysadmin";
const DEFAULT_ADMIN_PASSWORD: &str = "Sys@dmin-sample1";
const DEFAULT_TEAM_NAME: &str = "ad-1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SLOW_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_FIXTURES_DIR: &str = "fixtures";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub admin_username: String,
    pub admin_password: String,
    /// Team joined by provisioning in addition to the first two active teams.
    pub default_team_name: String,
    pub request_timeout: Duration,
    /// Used by plugin install/enable, LDAP sync status and role calls.
    pub slow_request_timeout: Duration,
    pub fixtures_dir: PathBuf,
}

impl AppConfig {
    /// Configuration for `base_url` with every other setting at its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            default_team_name: DEFAULT_TEAM_NAME.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            slow_request_timeout: Duration::from_secs(DEFAULT_SLOW_REQUEST_TIMEOUT_SECS),
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
        })
    }

    /// # Errors
    ///
    /// Returns `ConfigError` naming the offending variable.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var("MM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: parse_base_url(&base_url).map_err(|e| match e {
                ApiError::ConfigError(msg) => ApiError::ConfigError(format!("MM_BASE_URL: {msg}")),
                other => other,
            })?,
            admin_username: env::var("MM_ADMIN_USERNAME")
                .unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_string()),
            admin_password: env::var("MM_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            default_team_name: env::var("MM_DEFAULT_TEAM")
                .unwrap_or_else(|_| DEFAULT_TEAM_NAME.to_string()),
            request_timeout: secs_from_env(
                "MM_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            slow_request_timeout: secs_from_env(
                "MM_SLOW_REQUEST_TIMEOUT_SECS",
                DEFAULT_SLOW_REQUEST_TIMEOUT_SECS,
            )?,
            fixtures_dir: env::var("MM_FIXTURES_DIR")
                .map_or_else(|_| PathBuf::from(DEFAULT_FIXTURES_DIR), PathBuf::from),
        })
    }

    #[must_use]
    pub fn admin_credentials(&self) -> crate::core::models::Credentials {
        crate::core::models::Credentials::new(&self.admin_username, &self.admin_password)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::ConfigError(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::ConfigError(format!("{raw}: not a base URL")));
    }
    Ok(url)
}

fn secs_from_env(name: &str, default: u64) -> Result<Duration, ApiError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ApiError::ConfigError(format!("{name}: {e}"))),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
