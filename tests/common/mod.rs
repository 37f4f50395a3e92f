//! Scripted in-memory transport shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use mm_e2e::ApiClient;
use mm_e2e::core::config::AppConfig;
use mm_e2e::errors::ApiError;
use mm_e2e::http::{ApiRequest, ApiResponse, CookieJar, Transport};
use reqwest::Method;
use reqwest::header::{HeaderValue, SET_COOKIE};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://localhost:8065";
pub const ADMIN_ID: &str = "admin-id";

type Handler = Box<dyn Fn(&ApiRequest) -> ApiResponse + Send + Sync>;

struct Route {
    method: Method,
    path: String,
    handler: Handler,
}

/// A request as the server saw it, with the cookies the session sent.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub request: ApiRequest,
    pub cookies: CookieJar,
}

impl Recorded {
    pub fn user_id(&self) -> Option<&str> {
        self.cookies.get("MMUSERID")
    }

    pub fn body(&self) -> Value {
        self.request.json_body().cloned().unwrap_or(Value::Null)
    }
}

/// Routes are matched on method and exact path; the latest registration wins.
/// Unrouted requests get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    log: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) {
        self.on_fn(method, path, move |_| ApiResponse::new(status, body.clone()));
    }

    pub fn on_fn(
        &self,
        method: Method,
        path: &str,
        handler: impl Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
    ) {
        self.routes.lock().unwrap().push(Route {
            method,
            path: path.to_string(),
            handler: Box::new(handler),
        });
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.request.method == method && r.request.path == path)
            .collect()
    }

    /// Login that answers with cookies for `sysadmin` -> `admin-id` and
    /// `<name>` -> `id-<name>`; any password is accepted.
    pub fn with_login(&self) {
        self.on_fn(Method::POST, "/api/v4/users/login", |req| {
            let login = req
                .json_body()
                .and_then(|b| b.get("login_id"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let user_id = if login == "sysadmin" {
                ADMIN_ID.to_string()
            } else {
                format!("id-{login}")
            };
            login_response(&user_id)
        });
        self.on(Method::POST, "/api/v4/users/logout", 200, json!({"status": "OK"}));
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        cookies: &CookieJar,
    ) -> Result<ApiResponse, ApiError> {
        self.log.lock().unwrap().push(Recorded {
            request: request.clone(),
            cookies: cookies.clone(),
        });

        let routes = self.routes.lock().unwrap();
        let response = routes
            .iter()
            .rev()
            .find(|r| r.method == request.method && r.path == request.path)
            .map_or_else(
                || ApiResponse::new(404, json!({"message": "no route"})),
                |r| (r.handler)(request),
            );
        Ok(response)
    }
}

pub fn login_response(user_id: &str) -> ApiResponse {
    let mut response = ApiResponse::new(200, json!({"id": user_id}));
    for cookie in [
        format!("MMAUTHTOKEN=token-{user_id}; Path=/; HttpOnly"),
        format!("MMUSERID={user_id}; Path=/"),
        format!("MMCSRF=csrf-{user_id}; Path=/"),
    ] {
        response
            .headers
            .append(SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    }
    response
}

pub fn config() -> AppConfig {
    AppConfig::new(BASE_URL).unwrap()
}

pub fn client(mock: &Arc<MockTransport>) -> ApiClient {
    ApiClient::with_transport(config(), mock.clone())
}

pub fn client_with_config(mock: &Arc<MockTransport>, config: AppConfig) -> ApiClient {
    ApiClient::with_transport(config, mock.clone())
}
