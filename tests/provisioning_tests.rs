mod common;

use common::{ADMIN_ID, MockTransport, client};
use mm_e2e::core::models::NewUserRequest;
use mm_e2e::errors::ApiError;
use mm_e2e::http::ApiResponse;
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;

/// Server that echoes created users back with id `new-<username>`.
fn provisioning_server() -> Arc<MockTransport> {
    let mock = MockTransport::new();
    mock.with_login();
    mock.on_fn(Method::POST, "/api/v4/users", |req| {
        let username = req
            .json_body()
            .and_then(|b| b.get("username"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        ApiResponse::new(201, json!({"id": format!("new-{username}"), "username": username}))
    });
    mock.on(
        Method::GET,
        "/api/v4/teams",
        200,
        json!([
            {"id": "archived", "name": "old", "delete_at": 1_600_000_000_000_i64},
            {"id": "t1", "name": "alpha", "delete_at": 0},
            {"id": "t2", "name": "beta", "delete_at": 0},
            {"id": "t3", "name": "gamma", "delete_at": 0},
            {"id": "def", "name": "ad-1", "delete_at": 0}
        ]),
    );
    for team in ["t1", "t2", "t3", "def", "explicit"] {
        mock.on(
            Method::POST,
            &format!("/api/v4/teams/{team}/members"),
            201,
            json!({"team_id": team}),
        );
    }
    for user in ["new-ada", "new-cy", "new-dee", "new-gus"] {
        mock.on(
            Method::PUT,
            &format!("/api/v4/users/{user}/preferences"),
            200,
            json!({"status": "OK"}),
        );
    }
    mock
}

fn joined_teams(mock: &MockTransport) -> Vec<String> {
    let mut teams: Vec<String> = mock
        .requests()
        .into_iter()
        .filter(|r| r.request.method == Method::POST && r.request.path.ends_with("/members"))
        .filter_map(|r| r.body()["team_id"].as_str().map(str::to_string))
        .collect();
    teams.sort();
    teams
}

#[tokio::test]
async fn test_new_user_joins_fallback_and_default_teams() {
    let mock = provisioning_server();
    let admin = client(&mock).login_as_admin().await.unwrap();

    let user = admin
        .create_new_user(NewUserRequest::default().with_username("ada"), &[], true)
        .await
        .unwrap();

    assert_eq!(user.id, "new-ada");
    assert_eq!(user.username, "ada");
    assert_eq!(user.password, "password123");
    assert_eq!(joined_teams(&mock), vec!["def", "t1", "t2"]);

    let prefs = mock.requests_to(Method::PUT, "/api/v4/users/new-ada/preferences");
    assert_eq!(prefs.len(), 1);
    assert_eq!(
        prefs[0].body(),
        json!([{"user_id": "new-ada", "category": "tutorial_step", "name": "new-ada", "value": "999"}])
    );
    // written by the admin on the new user's behalf
    assert_eq!(prefs[0].user_id(), Some(ADMIN_ID));
}

#[tokio::test]
async fn test_tutorial_kept_when_not_bypassed() {
    let mock = provisioning_server();
    let admin = client(&mock).login_as_admin().await.unwrap();

    admin
        .create_new_user(NewUserRequest::default().with_username("bo"), &[], false)
        .await
        .unwrap();

    assert!(
        mock.requests()
            .iter()
            .all(|r| !r.request.path.ends_with("/preferences"))
    );
}

#[tokio::test]
async fn test_explicit_teams_skip_team_lookup() {
    let mock = provisioning_server();
    let admin = client(&mock).login_as_admin().await.unwrap();

    admin
        .create_new_user(
            NewUserRequest::default().with_username("cy"),
            &["explicit".to_string()],
            true,
        )
        .await
        .unwrap();

    assert!(mock.requests_to(Method::GET, "/api/v4/teams").is_empty());
    assert_eq!(joined_teams(&mock), vec!["explicit"]);
}

#[tokio::test]
async fn test_missing_user_id_stops_provisioning() {
    let mock = provisioning_server();
    mock.on(Method::POST, "/api/v4/users", 201, json!({"username": "ghost"}));
    let admin = client(&mock).login_as_admin().await.unwrap();

    let err = admin
        .create_new_user(NewUserRequest::default(), &[], true)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::MissingField(ref f) if f == "id"));
    assert!(joined_teams(&mock).is_empty());
    assert!(mock.requests_to(Method::GET, "/api/v4/teams").is_empty());
}

#[tokio::test]
async fn test_rejected_user_creation_propagates() {
    let mock = provisioning_server();
    mock.on(
        Method::POST,
        "/api/v4/users",
        400,
        json!({"id": "app.user.save.username_exists.app_error"}),
    );

    let err = client(&mock)
        .login_as_new_user(NewUserRequest::default().with_username("taken"), &[], true)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_failed_team_join_propagates() {
    let mock = provisioning_server();
    mock.on(Method::POST, "/api/v4/teams/t2/members", 403, json!({}));
    let admin = client(&mock).login_as_admin().await.unwrap();

    let err = admin
        .create_new_user(NewUserRequest::default(), &[], true)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(
        mock.requests()
            .iter()
            .all(|r| !r.request.path.ends_with("/preferences"))
    );
}

#[tokio::test]
async fn test_login_as_new_user_returns_user_session() {
    let mock = provisioning_server();

    let (user, session) = client(&mock)
        .login_as_new_user(NewUserRequest::default().with_username("dee"), &[], true)
        .await
        .unwrap();

    assert_eq!(user.id, "new-dee");
    // mock login ids map "dee" -> "id-dee"
    assert_eq!(session.current_user_id().unwrap(), "id-dee");

    let logouts = mock.requests_to(Method::POST, "/api/v4/users/logout");
    assert_eq!(logouts.len(), 1);
    assert_eq!(logouts[0].user_id(), Some(ADMIN_ID));

    let logins = mock.requests_to(Method::POST, "/api/v4/users/login");
    let last = logins.last().unwrap().body();
    assert_eq!(last["login_id"], "dee");
    assert_eq!(last["password"], "password123");
}

#[tokio::test]
async fn test_default_users_are_unique() {
    let mock = provisioning_server();
    let admin = client(&mock).login_as_admin().await.unwrap();

    let first = admin
        .create_new_user(NewUserRequest::default(), &["explicit".to_string()], false)
        .await
        .unwrap();
    let second = admin
        .create_new_user(NewUserRequest::default(), &["explicit".to_string()], false)
        .await
        .unwrap();

    assert_ne!(first.username, second.username);
    assert_ne!(first.email, second.email);
    assert!(first.email.ends_with("@sample.mattermost.com"));
}

#[tokio::test]
async fn test_guest_user_gets_own_team_and_demotion() {
    let mock = provisioning_server();
    mock.on(
        Method::POST,
        "/api/v4/teams",
        201,
        json!({"id": "guest-team-id", "name": "guest-team-1"}),
    );
    mock.on(Method::POST, "/api/v4/teams/guest-team-id/members", 201, json!({}));
    mock.on(Method::POST, "/api/v4/users/new-gus/demote", 200, json!({"status": "OK"}));

    let guest = client(&mock)
        .login_as_new_guest_user(NewUserRequest::default().with_username("gus"), true)
        .await
        .unwrap();

    assert_eq!(guest.user.id, "new-gus");
    assert_eq!(guest.team["id"], "guest-team-id");
    assert_eq!(guest.session.current_user_id().unwrap(), "id-gus");

    let team_body = mock.requests_to(Method::POST, "/api/v4/teams")[0].body();
    assert!(team_body["name"].as_str().unwrap().starts_with("guest-team-"));
    assert_eq!(team_body["display_name"], "Guest Team");

    let members: Vec<String> = mock
        .requests_to(Method::POST, "/api/v4/teams/guest-team-id/members")
        .iter()
        .map(|r| r.body()["user_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(members, vec![ADMIN_ID.to_string(), "new-gus".to_string()]);

    assert!(mock.requests_to(Method::GET, "/api/v4/teams").is_empty());
    assert_eq!(
        mock.requests_to(Method::POST, "/api/v4/users/new-gus/demote").len(),
        1
    );
}
