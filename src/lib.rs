/// mm-e2e - REST helpers that prepare chat-server state for end-to-end tests.
///
/// Every command sends one request to the server's `/api/v4` API, checks the
/// status code the endpoint documents, and hands the response back. On top of
/// them sit a few workflows, most notably provisioning a fresh user that is
/// already on teams and past the onboarding tutorial.
///
/// # Architecture
///
/// - `http` defines the `Transport` seam and a reqwest implementation
/// - `ApiClient` owns transport and configuration and hands out sessions
/// - `Session` carries the login cookies; every command is a method on it
/// - `workflows` and `external` compose commands into multi-step operations
///
/// # Example
///
/// ```no_run
/// use mm_e2e::client::ApiClient;
/// use mm_e2e::core::config::AppConfig;
/// use mm_e2e::core::models::NewUserRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     mm_e2e::setup_logging();
///
///     let client = ApiClient::new(AppConfig::new("http://localhost:8065")?)?;
///     client.wait_until_ready(10).await?;
///
///     // Fresh user on the default teams, tutorial skipped, already logged in
///     let (user, session) = client
///         .login_as_new_user(NewUserRequest::default(), &[], true)
///         .await?;
///
///     session.save_message_display_preference(Some("compact")).await?;
///     println!("Logged in as {} ({})", user.username, user.id);
///
///     Ok(())
/// }
/// ```
pub mod client;
pub mod commands;
pub mod core;
pub mod errors;
pub mod external;
pub mod http;
pub mod session;
pub mod utils;
pub mod workflows;

pub use client::ApiClient;
pub use errors::ApiError;
pub use session::Session;

/// Configure structured JSON logging filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// mm_e2e::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
