use crate::middleware::auth::AuthUser;
use axum::Json;
use serde_json::{json, Value};

/// `GET /auth/me`: 토큰에서 확인된 현재 사용자와 역할
///
/// 로그인/토큰 갱신은 외부 인증 제공자가 담당하므로 이 서버에는 조회만 있습니다.
pub async fn me(auth_user: AuthUser) -> Json<Value> {
    Json(json!({
        "user_id": auth_user.user_id,
        "role": auth_user.role,
    }))
}
