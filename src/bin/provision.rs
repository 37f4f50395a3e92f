use anyhow::{Context, Result};
use clap::Parser;
use mm_e2e::ApiClient;
use mm_e2e::core::config::AppConfig;
use mm_e2e::core::models::NewUserRequest;
use tracing::{error, info};

/// Provision a ready-to-use test user and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "mm-provision", version)]
struct Args {
    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    password: Option<String>,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    nickname: Option<String>,

    /// Team id to join; repeatable. Without it the user joins the default teams.
    #[arg(long = "team")]
    teams: Vec<String>,

    /// Leave the onboarding tutorial enabled.
    #[arg(long)]
    show_tutorial: bool,

    /// Create a guest on a dedicated team instead of a regular member.
    #[arg(long, conflicts_with = "teams")]
    guest: bool,

    /// Ping attempts before giving up on the server.
    #[arg(long, default_value_t = 10, env = "MM_WAIT_ATTEMPTS")]
    wait_attempts: usize,
}

impl Args {
    fn new_user_request(&self) -> NewUserRequest {
        NewUserRequest {
            email: self.email.clone(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            nickname: self.nickname.clone(),
            password: self.password.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    mm_e2e::setup_logging();
    let args = Args::parse();

    let config = AppConfig::from_env().context("reading configuration")?;
    let client = ApiClient::new(config).context("building API client")?;

    client
        .wait_until_ready(args.wait_attempts)
        .await
        .context("waiting for server")?;

    let bypass_tutorial = !args.show_tutorial;
    let result = if args.guest {
        client
            .login_as_new_guest_user(args.new_user_request(), bypass_tutorial)
            .await
            .map(|guest| guest.user)
    } else {
        client
            .login_as_new_user(args.new_user_request(), &args.teams, bypass_tutorial)
            .await
            .map(|(user, _session)| user)
    };

    let user = result.map_err(|e| {
        error!("Provisioning failed: {}", e);
        e
    })?;
    info!("Provisioned {}", user.username);

    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}
