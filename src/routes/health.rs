//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok", "database": true }`
//!
//! 인증 없이 호출할 수 있으며, 로드밸런서나 컨테이너 헬스체크에서 사용합니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::drafts::AppState;

/// `GET /health`: 서버와 데이터베이스 상태를 확인합니다.
///
/// DB 연결이 실패해도 200을 반환하고 `database: false`로 알려줍니다.
/// (서버 프로세스 자체는 살아 있으므로)
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    if !database {
        tracing::warn!("Health check could not reach the database");
    }

    Json(json!({
        "status": "ok",
        "database": database
    }))
}
