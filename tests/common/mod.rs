#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use draftline::middleware::auth::{create_access_token, Role};
use draftline::{build_router, AppState, MIGRATOR};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";
pub const MAX_VERSIONS: u32 = 5;

/// 메모리 SQLite 풀. 연결이 하나뿐이라 테스트마다 독립된 DB가 됩니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");

    MIGRATOR.run(&pool).await.expect("run migrations");
    pool
}

/// 임시 디렉터리의 파일 SQLite 풀. 여러 연결이 같은 DB를 공유해야 하는 동시성 테스트용입니다.
///
/// 돌려받은 경로의 파일은 테스트가 끝나면 지웁니다.
pub async fn file_pool(max_connections: u32) -> (SqlitePool, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!("draftline-{}.db", uuid::Uuid::now_v7()));
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(10));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("connect file sqlite");

    MIGRATOR.run(&pool).await.expect("run migrations");
    (pool, path)
}

pub fn test_app(pool: SqlitePool) -> Router {
    let state = AppState {
        pool,
        jwt_secret: SECRET.to_string(),
        max_draft_versions: MAX_VERSIONS,
    };
    build_router(state, Duration::from_secs(30))
}

pub fn token(user_id: &str, role: Role) -> String {
    create_access_token(user_id, role, SECRET, chrono::Duration::minutes(15))
        .expect("issue test token")
}

/// 라우터에 요청을 보내고 (상태 코드, JSON 본문)을 돌려줍니다. 본문이 비어 있으면 Null입니다.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
