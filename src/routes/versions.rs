use crate::{db, error::AppError, middleware::auth::AuthUser, models::*};
use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use super::drafts::AppState;

/// `GET /essay-drafts/versions?draft_id=...`: 초안이 속한 체인의 모든 버전 (버전 내림차순)
pub async fn list_draft_versions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<VersionsQuery>,
) -> Result<Json<Value>, AppError> {
    // 소유권 확인
    let draft = db::get_draft(&state.pool, &query.draft_id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let versions = db::list_chain(&state.pool, &draft.chain_id, &auth_user.user_id).await?;
    Ok(Json(json!({ "versions": versions })))
}

/// `POST /essay-drafts/versions`: 체인의 current를 지정한 버전으로 되돌린다.
/// 새 버전을 만들지 않고 포인터만 옮긴다.
pub async fn revert_draft_version(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<RevertRequest>,
) -> Result<Json<EssayDraft>, AppError> {
    let draft = db::revert_to_version(&state.pool, &auth_user.user_id, &req.version_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(draft))
}
