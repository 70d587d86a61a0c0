#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use diesel::{sql_query, sql_types::Text, Connection, RunQueryDsl, SqliteConnection};
use fintrack_server::{api::app_router, build_state, config::Config, AppState};
use rand::{rngs::OsRng, RngCore};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub struct TestApp {
    _dir: TempDir,
    db_path: String,
    pub router: Router,
    pub state: Arc<AppState>,
}

pub async fn spawn_app() -> TestApp {
    let dir = tempdir().unwrap();
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);

    let db_path = dir.path().join("test.db").to_string_lossy().into_owned();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: db_path.clone(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: secret.to_vec(),
        token_ttl: Duration::from_secs(3600),
        settlement_interval: Duration::from_secs(60),
    };
    let state = build_state(&config).await.unwrap();
    let router = app_router(state.clone(), &config);
    TestApp {
        _dir: dir,
        db_path,
        router,
        state,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.request_with_headers(method, uri, token, &[], body).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    /// Creates an account, seeds its balance, and returns `(id, access_token)`.
    pub async fn signup(&self, name: &str, email: &str, balance: f64) -> (String, String) {
        let (id, token) = self
            .signup_with(json!({ "name": name, "email": email }))
            .await;
        if balance != 0.0 {
            self.fund(&id, &balance.to_string());
        }
        (id, token)
    }

    /// Writes a balance straight into the accounts table.
    pub fn fund(&self, account_id: &str, balance: &str) {
        self.overwrite("UPDATE accounts SET balance = ? WHERE id = ?", balance, account_id);
    }

    /// Writes a goal's saved amount straight into the goals table.
    pub fn set_goal_current(&self, goal_id: &str, current: &str) {
        self.overwrite("UPDATE goals SET current = ? WHERE id = ?", current, goal_id);
    }

    fn overwrite(&self, sql: &str, value: &str, id: &str) {
        let mut conn = SqliteConnection::establish(&self.db_path).unwrap();
        let updated = sql_query(sql)
            .bind::<Text, _>(value)
            .bind::<Text, _>(id)
            .execute(&mut conn)
            .unwrap();
        assert_eq!(updated, 1, "no row with id {id}");
    }

    pub async fn signup_with(&self, body: Value) -> (String, String) {
        let (status, created) = self
            .request(Method::POST, "/api/v1/accounts", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{created}");
        (
            created["account"]["id"].as_str().unwrap().to_string(),
            created["accessToken"].as_str().unwrap().to_string(),
        )
    }

    pub async fn balance(&self, token: &str) -> f64 {
        let (status, body) = self
            .request(Method::GET, "/api/v1/accounts/me", Some(token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        body["balance"].as_f64().unwrap()
    }
}
