//! New-user provisioning: create an account, join teams, skip onboarding, log in.
//!
//! Nothing is rolled back when a step fails; test servers are reset between runs.

use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::commands::teams::parse_teams;
use crate::core::constants::{
    GUEST_TEAM_DISPLAY_NAME, GUEST_TEAM_NAME, TUTORIAL_COMPLETE_VALUE, TUTORIAL_STEP_CATEGORY,
};
use crate::core::models::{NewUserRequest, Preference, ProvisionedUser, Team};
use crate::errors::ApiError;
use crate::session::Session;
use crate::utils::unique_token;

/// How many active teams a user joins when no teams are named.
pub const FALLBACK_TEAM_COUNT: usize = 2;

/// Result of [`ApiClient::login_as_new_guest_user`].
#[derive(Debug)]
pub struct GuestLogin {
    pub user: ProvisionedUser,
    /// Body of the team created for the guest.
    pub team: Value,
    /// Session logged in as the guest.
    pub session: Session,
}

/// Team ids joined when the caller names none: the first two non-deleted
/// teams, plus every team called `default_team_name`. Each id appears once.
#[must_use]
pub fn select_fallback_teams(teams: &[Team], default_team_name: &str) -> Vec<String> {
    let mut ids: Vec<String> = teams
        .iter()
        .filter(|t| !t.is_deleted())
        .take(FALLBACK_TEAM_COUNT)
        .map(|t| t.id.clone())
        .collect();

    for team in teams.iter().filter(|t| t.name == default_team_name) {
        if !ids.contains(&team.id) {
            ids.push(team.id.clone());
        }
    }

    ids
}

/// Preference that marks the tutorial as finished for `user_id`.
#[must_use]
pub fn tutorial_bypass_preference(user_id: &str) -> Preference {
    Preference::new(
        user_id,
        TUTORIAL_STEP_CATEGORY,
        user_id,
        TUTORIAL_COMPLETE_VALUE,
    )
}

impl Session {
    /// Create a user and prepare it for a test. Must run as an administrator.
    ///
    /// With `team_ids` empty the user joins the teams chosen by
    /// [`select_fallback_teams`]. Team joins run concurrently and are all
    /// awaited before the preference step.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the creation response has no id; otherwise
    /// the first failing command's error.
    pub async fn create_new_user(
        &self,
        user: NewUserRequest,
        team_ids: &[String],
        bypass_tutorial: bool,
    ) -> Result<ProvisionedUser, ApiError> {
        let resolved = user.fill_defaults(&unique_token());

        let created = self.create_user(&resolved).await?;
        let user_id = created.str_field("id")?.to_string();
        info!("Created user {} ({})", resolved.username, user_id);

        let targets = if team_ids.is_empty() {
            let teams = parse_teams(&self.get_teams().await?.body)?;
            select_fallback_teams(&teams, &self.config().default_team_name)
        } else {
            team_ids.to_vec()
        };
        self.join_teams(&targets, &user_id).await?;

        if bypass_tutorial {
            self.save_user_preferences(&[tutorial_bypass_preference(&user_id)], Some(&user_id))
                .await?;
            debug!("Tutorial bypassed for {}", user_id);
        }

        Ok(resolved.into_provisioned(user_id))
    }

    async fn join_teams(&self, team_ids: &[String], user_id: &str) -> Result<(), ApiError> {
        try_join_all(
            team_ids
                .iter()
                .map(|team_id| self.add_user_to_team(team_id, user_id)),
        )
        .await?;
        debug!("User {} joined {} team(s)", user_id, team_ids.len());
        Ok(())
    }
}

impl ApiClient {
    /// Provision a user as administrator, then return a session logged in as that user.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn login_as_new_user(
        &self,
        user: NewUserRequest,
        team_ids: &[String],
        bypass_tutorial: bool,
    ) -> Result<(ProvisionedUser, Session), ApiError> {
        let mut admin = self.login_as_admin().await?;
        let new_user = admin
            .create_new_user(user, team_ids, bypass_tutorial)
            .await?;
        admin.logout().await?;

        let session = self.login(&new_user.credentials()).await?;
        Ok((new_user, session))
    }

    /// Provision a guest: a fresh team shared with the administrator, a user
    /// joined only to it and demoted to guest, then a session as that guest.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn login_as_new_guest_user(
        &self,
        user: NewUserRequest,
        bypass_tutorial: bool,
    ) -> Result<GuestLogin, ApiError> {
        let mut admin = self.login_as_admin().await?;

        let team = admin
            .create_team(GUEST_TEAM_NAME, GUEST_TEAM_DISPLAY_NAME, None)
            .await?;
        let team_id = team.str_field("id")?.to_string();
        admin
            .add_user_to_team(&team_id, admin.current_user_id()?)
            .await?;

        let new_user = admin
            .create_new_user(user, &[team_id], bypass_tutorial)
            .await?;
        self.demote_user(&new_user.id).await?;
        admin.logout().await?;

        let session = self.login(&new_user.credentials()).await?;
        info!("Guest {} ready", new_user.username);
        Ok(GuestLogin {
            user: new_user,
            team: team.body,
            session,
        })
    }
}
