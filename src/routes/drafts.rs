//! # 에세이 초안(EssayDraft) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/essay-drafts`       → 내 초안 목록 (`?prompt_id=&current_only=`)
//! - `POST   /api/v1/essay-drafts`       → 초안 저장 (새 체인 또는 다음 버전), 201
//! - `GET    /api/v1/essay-drafts/{id}`  → 초안 하나 조회
//! - `DELETE /api/v1/essay-drafts/{id}`  → 초안 삭제 (후손 버전 포함), 204
//!
//! 모든 핸들러는 `AuthUser`를 받으므로 토큰이 없으면 401이 먼저 반환됩니다.
//! 다른 사용자의 초안은 존재하지 않는 것과 똑같이 404로 응답합니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    services,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 토큰 검증용 비밀키
    pub jwt_secret: String,
    /// 체인당 보관하는 최대 초안 수
    pub max_draft_versions: u32,
}

/// `GET /essay-drafts`: 내 초안 목록을 최신순으로 조회합니다.
///
/// 응답: `{ "drafts": [...] }`
pub async fn list_drafts(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListDraftsQuery>,
) -> Result<Json<Value>, AppError> {
    let drafts = db::list_drafts(&state.pool, &auth_user.user_id, &query).await?;
    Ok(Json(json!({ "drafts": drafts })))
}

/// `POST /essay-drafts`: 초안을 저장합니다.
///
/// `parent_draft_id`가 없으면 version 1로 새 체인을 시작하고,
/// 있으면 그 초안의 다음 버전을 current로 추가합니다.
pub async fn save_draft(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<SaveDraftRequest>,
) -> Result<(StatusCode, Json<EssayDraft>), AppError> {
    services::validate_content(&req.content)?;
    let title = services::normalize_title(req.title.as_deref())?;

    let draft = db::save_draft(
        &state.pool,
        &auth_user.user_id,
        &req,
        &title,
        state.max_draft_versions,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(draft)))
}

/// `GET /essay-drafts/{id}`: 초안 하나를 조회합니다.
pub async fn get_draft(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<EssayDraft>, AppError> {
    let draft = db::get_draft(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(draft))
}

/// `DELETE /essay-drafts/{id}`: 초안과 그 후손 버전을 삭제합니다.
///
/// 성공 시 HTTP 204 No Content를 반환합니다 (본문 없음).
pub async fn delete_draft(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = db::delete_draft(&state.pool, &id, &auth_user.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
