//! # draftline
//!
//! 에세이 초안의 버전 체인을 관리하는 API 서버 라이브러리입니다.
//! 서버 실행 파일(main.rs)과 통합 테스트(tests/)가 같은 라우터를 사용하도록
//! 라우터 구성과 마이그레이션을 이곳에 둡니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::get,
    Router,
};
use sqlx::migrate::Migrator;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use routes::drafts::AppState;

/// ./migrations 폴더의 SQL 파일들을 컴파일 타임에 포함시킨 마이그레이터
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// 전체 HTTP 라우터를 만듭니다.
///
/// 모든 API는 `/api/v1` 아래에 중첩되고, CORS / 요청 타임아웃 / 요청 로깅 레이어가 붙습니다.
/// 타임아웃을 넘긴 요청은 408로 끝나며 서버 내부에서 재시도하지 않습니다.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .route(
            "/essay-drafts",
            get(routes::list_drafts).post(routes::save_draft),
        )
        // 정적 경로 `versions`가 `{id}`보다 우선 매칭됩니다.
        .route(
            "/essay-drafts/versions",
            get(routes::list_draft_versions).post(routes::revert_draft_version),
        )
        .route(
            "/essay-drafts/{id}",
            get(routes::get_draft).delete(routes::delete_draft),
        )
        .route("/admin/essay-drafts/stats", get(routes::draft_stats))
        .route("/health", get(routes::health_check))
        .with_state(state);

    // 개발 환경 기준으로 모든 출처를 허용합니다. 프로덕션에서는 프론트엔드 도메인만 허용해야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
