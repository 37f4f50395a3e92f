use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_EMAIL_DOMAIN, DEFAULT_PASSWORD};

/// Login identity used for sessions and external requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Partial description of a user to provision. Unset fields get unique defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub password: Option<String>,
}

impl NewUserRequest {
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Fill every unset field using `token` as the uniqueness marker.
    #[must_use]
    pub fn fill_defaults(self, token: &str) -> ResolvedUser {
        ResolvedUser {
            email: self
                .email
                .unwrap_or_else(|| format!("user{token}@{DEFAULT_EMAIL_DOMAIN}")),
            username: self.username.unwrap_or_else(|| format!("user{token}")),
            first_name: self.first_name.unwrap_or_else(|| format!("First{token}")),
            last_name: self.last_name.unwrap_or_else(|| format!("Last{token}")),
            nickname: self
                .nickname
                .unwrap_or_else(|| format!("NewE2ENickname{token}")),
            password: self
                .password
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        }
    }
}

/// A `NewUserRequest` with every field decided, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password: String,
}

impl ResolvedUser {
    #[must_use]
    pub fn into_provisioned(self, id: String) -> ProvisionedUser {
        ProvisionedUser {
            id,
            email: self.email,
            username: self.username,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            nickname: self.nickname,
        }
    }
}

/// An account created by provisioning, with the password needed to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
}

impl ProvisionedUser {
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub user_id: String,
    pub category: String,
    pub name: String,
    pub value: String,
}

impl Preference {
    #[must_use]
    pub fn new(user_id: &str, category: &str, name: &str, value: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            category: category.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub roles: Option<String>,
}

/// The part of a team record read by provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub team_type: String,
    #[serde(default)]
    pub delete_at: i64,
}

impl Team {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.delete_at != 0
    }
}
