//! Entry point: owns the transport and configuration, hands out sessions.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::core::models::Credentials;
use crate::errors::ApiError;
use crate::http::{HttpTransport, Transport};
use crate::session::Session;

/// Cheap to clone; clones share the transport and configuration.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: Arc<AppConfig>,
}

impl ApiClient {
    /// Client talking to `config.base_url` over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    #[must_use]
    pub fn with_transport(config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    #[must_use]
    pub fn anonymous_session(&self) -> Session {
        Session::anonymous(self.clone())
    }

    /// # Errors
    ///
    /// Returns `UnexpectedStatus` if the login is rejected.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let mut session = self.anonymous_session();
        session
            .login(&credentials.username, &credentials.password)
            .await?;
        Ok(session)
    }

    /// Log in with the configured administrator account.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedStatus` if the login is rejected.
    pub async fn login_as_admin(&self) -> Result<Session, ApiError> {
        self.login(&self.config.admin_credentials()).await
    }

    /// Poll the ping endpoint until the server answers, backing off between attempts.
    ///
    /// # Errors
    ///
    /// Returns the last failure once `attempts` retries are exhausted.
    pub async fn wait_until_ready(&self, attempts: usize) -> Result<(), ApiError> {
        let session = self.anonymous_session();
        // 100ms, 200ms, 400ms ... capped at 5s
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(attempts);

        Retry::spawn(strategy, || async {
            session.ping().await.map_err(|e| {
                warn!("Server not ready: {}", e);
                e
            })
        })
        .await?;

        info!("Server at {} is ready", self.config.base_url);
        Ok(())
    }

    /// Merge `settings` into the server configuration as administrator, then log out.
    ///
    /// # Errors
    ///
    /// Returns an error if login, either config call, or logout fails.
    pub async fn update_config_as_admin(&self, settings: &Value) -> Result<Value, ApiError> {
        let mut admin = self.login_as_admin().await?;
        let updated = admin.update_config(settings).await?;
        admin.logout().await?;
        Ok(updated.body)
    }

    /// # Errors
    ///
    /// Returns an error if login or the config call fails.
    pub async fn get_config_as_admin(&self) -> Result<Value, ApiError> {
        let admin = self.login_as_admin().await?;
        Ok(admin.get_config().await?.body)
    }

    /// # Errors
    ///
    /// Returns an error if login or the analytics call fails.
    pub async fn get_analytics_as_admin(&self) -> Result<Value, ApiError> {
        let admin = self.login_as_admin().await?;
        Ok(admin.get_analytics().await?.body)
    }
}
