//! # 관리자 전용 라우트 핸들러
//!
//! - `GET /api/v1/admin/essay-drafts/stats` → 전체 초안/체인/사용자 수
//!
//! 역할이 admin이 아니면 403 Forbidden을 반환합니다.

use crate::{db, error::AppError, middleware::auth::AuthUser, models::DraftStats};
use axum::{extract::State, Json};

use super::drafts::AppState;

pub async fn draft_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<DraftStats>, AppError> {
    auth_user.require_admin()?;

    let stats = db::draft_stats(&state.pool).await?;
    tracing::debug!(admin = %auth_user.user_id, ?stats, "Served draft stats");
    Ok(Json(stats))
}
