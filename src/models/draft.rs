//! # 에세이 초안(EssayDraft) 모델 정의
//!
//! 에세이 프롬프트에 대한 답안을 저장할 때마다 새 초안(버전)이 하나씩 생깁니다.
//! 같은 답안의 버전들은 하나의 **체인(chain)** 으로 묶이고,
//! 체인마다 현재 보여줄 초안(`is_current`)이 정확히 하나입니다.
//!
//! ## 체인 구조
//! ```text
//! v1 (chain_id = v1.id, parent = NULL)
//!  └─ v2 (parent = v1)
//!      └─ v3 (parent = v2, is_current)
//! ```

use serde::{Deserialize, Serialize};

/// 초안 엔티티: DB의 `essay_drafts` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EssayDraft {
    pub id: String,
    pub user_id: String,
    /// 체인을 시작한 초안의 id. 오래된 버전이 정리되어도 바뀌지 않습니다.
    pub chain_id: String,
    pub parent_draft_id: Option<String>,
    pub topic_id: Option<String>,
    pub prompt_id: Option<String>,
    pub title: String,
    pub content: String,
    pub word_count: i64,
    pub char_count: i64,
    pub version_number: i64,
    pub is_current: bool,
    pub created_at: String,
}

/// `POST /essay-drafts`의 요청 본문
#[derive(Debug, Default, Deserialize)]
pub struct SaveDraftRequest {
    pub topic_id: Option<String>,
    pub prompt_id: Option<String>,
    pub title: Option<String>,
    pub content: String,
    /// None이면 새 체인을 시작하고, Some이면 그 초안의 다음 버전을 만듭니다.
    pub parent_draft_id: Option<String>,
}

/// `POST /essay-drafts/versions`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct RevertRequest {
    pub version_id: String,
}

/// `GET /essay-drafts/versions?draft_id=...`의 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct VersionsQuery {
    pub draft_id: String,
}

/// `GET /essay-drafts`의 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct ListDraftsQuery {
    pub prompt_id: Option<String>,
    #[serde(default)]
    pub current_only: bool,
}

/// 관리자용 전체 통계
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DraftStats {
    pub total_drafts: i64,
    pub total_chains: i64,
    pub total_users: i64,
}
