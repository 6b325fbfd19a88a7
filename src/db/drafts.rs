//! # 에세이 초안 버전 체인 쿼리 모듈
//!
//! 초안 저장(새 체인 / 다음 버전), 버전 되돌리기(revert), 삭제, 조회를 담당합니다.
//!
//! 체인을 바꾸는 작업(`save_draft`, `revert_to_version`, `delete_draft`)은
//! 모두 하나의 트랜잭션 안에서 "current 해제 → 정리 → 삽입/지정" 순서로 실행됩니다.
//! 중간에 실패하면 전체가 롤백되므로 current 초안이 없는 체인이 남지 않습니다.
//!
//! 트랜잭션은 `BEGIN IMMEDIATE`로 시작해 쓰기 잠금을 먼저 잡습니다. 동시에 들어온
//! 저장은 차례로 실행되고, 뒤에 온 요청은 부모가 더 이상 최신 버전이 아니므로 Conflict가 됩니다.
//! 스키마의 유니크 인덱스는 마지막 방어선입니다.

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::AppError;
use crate::models::{DraftStats, EssayDraft, ListDraftsQuery, SaveDraftRequest};
use crate::services::{
    self,
    retention::{self, ChainMember},
};

/// 체인을 바꾸는 트랜잭션의 시작 구문
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

const DRAFT_COLUMNS: &str = "id, user_id, chain_id, parent_draft_id, topic_id, prompt_id, title, \
     content, word_count, char_count, version_number, is_current, created_at";

/// 사용자 소유의 초안 하나를 조회합니다. 다른 사용자의 초안이면 None입니다.
pub async fn get_draft(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
) -> Result<Option<EssayDraft>, AppError> {
    let mut conn = pool.acquire().await?;
    fetch_owned(&mut conn, id, user_id).await
}

/// 사용자의 초안 목록을 최신순으로 조회합니다.
pub async fn list_drafts(
    pool: &SqlitePool,
    user_id: &str,
    query: &ListDraftsQuery,
) -> Result<Vec<EssayDraft>, AppError> {
    let mut sql = format!("SELECT {DRAFT_COLUMNS} FROM essay_drafts WHERE user_id = ?");
    if query.prompt_id.is_some() {
        sql.push_str(" AND prompt_id = ?");
    }
    if query.current_only {
        sql.push_str(" AND is_current = 1");
    }
    sql.push_str(" ORDER BY created_at DESC, version_number DESC");

    let mut q = sqlx::query_as::<_, EssayDraft>(&sql).bind(user_id);
    if let Some(prompt_id) = &query.prompt_id {
        q = q.bind(prompt_id);
    }

    Ok(q.fetch_all(pool).await?)
}

/// 체인의 모든 버전을 버전 번호 내림차순으로 조회합니다.
pub async fn list_chain(
    pool: &SqlitePool,
    chain_id: &str,
    user_id: &str,
) -> Result<Vec<EssayDraft>, AppError> {
    let versions = sqlx::query_as::<_, EssayDraft>(&format!(
        "SELECT {DRAFT_COLUMNS} FROM essay_drafts \
         WHERE chain_id = ? AND user_id = ? \
         ORDER BY version_number DESC"
    ))
    .bind(chain_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

/// 초안을 저장합니다.
///
/// - `parent_draft_id`가 없으면 새 체인을 시작합니다 (version 1).
///   `prompt_id`가 있으면 같은 프롬프트의 기존 초안은 모두 current에서 내려옵니다.
/// - 있으면 부모의 다음 버전을 만듭니다 (version = parent + 1).
///   부모는 체인의 최신 버전이어야 하며(분기 없음), 아니면 Conflict입니다.
///   체인이 보관 한도에 도달해 있으면 오래된 버전부터 정리한 뒤 삽입합니다.
///   `topic_id`/`prompt_id`는 요청 값과 관계없이 부모에서 물려받습니다.
///
/// 어느 경우든 새 초안이 체인의 유일한 current가 됩니다.
pub async fn save_draft(
    pool: &SqlitePool,
    user_id: &str,
    req: &SaveDraftRequest,
    title: &str,
    max_versions: u32,
) -> Result<EssayDraft, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let mut tx = pool.begin_with(BEGIN_WRITE).await?;

    let (chain_id, parent_id, version_number, topic_id, prompt_id) = match &req.parent_draft_id {
        None => {
            if let Some(prompt_id) = &req.prompt_id {
                sqlx::query(
                    "UPDATE essay_drafts SET is_current = 0 \
                     WHERE user_id = ? AND prompt_id = ? AND is_current = 1",
                )
                .bind(user_id)
                .bind(prompt_id)
                .execute(&mut *tx)
                .await?;
            }

            (id.clone(), None, 1, req.topic_id.clone(), req.prompt_id.clone())
        }
        Some(parent_id) => {
            let parent = fetch_owned(&mut tx, parent_id, user_id)
                .await?
                .ok_or(AppError::NotFound)?;

            let latest: i64 = sqlx::query_scalar(
                "SELECT MAX(version_number) FROM essay_drafts WHERE chain_id = ?",
            )
            .bind(&parent.chain_id)
            .fetch_one(&mut *tx)
            .await?;

            if parent.version_number != latest {
                return Err(AppError::Conflict(format!(
                    "Draft {} is version {} but the latest version is {}",
                    parent.id, parent.version_number, latest
                )));
            }

            clear_current(&mut tx, &parent.chain_id).await?;
            enforce_retention(&mut tx, &parent.chain_id, max_versions).await?;

            (
                parent.chain_id,
                Some(parent.id),
                parent.version_number + 1,
                parent.topic_id,
                parent.prompt_id,
            )
        }
    };

    let word_count = services::count_words(&req.content) as i64;
    let char_count = services::count_chars(&req.content) as i64;

    sqlx::query(
        r#"
        INSERT INTO essay_drafts (id, user_id, chain_id, parent_draft_id, topic_id, prompt_id,
                                  title, content, word_count, char_count, version_number, is_current)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(&chain_id)
    .bind(&parent_id)
    .bind(&topic_id)
    .bind(&prompt_id)
    .bind(title)
    .bind(&req.content)
    .bind(word_count)
    .bind(char_count)
    .bind(version_number)
    .execute(&mut *tx)
    .await?;

    let draft = fetch_owned(&mut tx, &id, user_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve saved draft".to_string()))?;

    tx.commit().await?;

    tracing::debug!(
        draft_id = %draft.id,
        chain_id = %draft.chain_id,
        version = draft.version_number,
        "Saved essay draft"
    );
    Ok(draft)
}

/// 체인의 current 포인터를 지정한 버전으로 옮깁니다.
///
/// 내용이나 버전 번호는 바뀌지 않고 새 행도 만들지 않습니다.
/// 버전이 없거나 다른 사용자의 것이면 `Ok(None)`을 반환합니다.
pub async fn revert_to_version(
    pool: &SqlitePool,
    user_id: &str,
    version_id: &str,
) -> Result<Option<EssayDraft>, AppError> {
    let mut tx = pool.begin_with(BEGIN_WRITE).await?;

    let Some(target) = fetch_owned(&mut tx, version_id, user_id).await? else {
        return Ok(None);
    };

    clear_current(&mut tx, &target.chain_id).await?;

    sqlx::query("UPDATE essay_drafts SET is_current = 1 WHERE id = ?")
        .bind(&target.id)
        .execute(&mut *tx)
        .await?;

    let draft = fetch_owned(&mut tx, &target.id, user_id).await?;
    tx.commit().await?;

    tracing::debug!(
        draft_id = %target.id,
        chain_id = %target.chain_id,
        version = target.version_number,
        "Reverted essay draft chain"
    );
    Ok(draft)
}

/// 초안을 삭제합니다. 후손 버전은 `ON DELETE CASCADE`로 함께 삭제됩니다.
///
/// 지워진 범위에 체인의 current가 있었다면 남은 버전 중 가장 높은 버전이 current가 됩니다.
/// 원래 current가 없던 체인(같은 프롬프트의 새 체인에 밀려난 체인)은 그대로 둡니다.
/// 삭제할 초안이 없으면 false를 반환합니다.
pub async fn delete_draft(pool: &SqlitePool, id: &str, user_id: &str) -> Result<bool, AppError> {
    let mut tx = pool.begin_with(BEGIN_WRITE).await?;

    let Some(target) = fetch_owned(&mut tx, id, user_id).await? else {
        return Ok(false);
    };

    let removes_current: Option<i64> = sqlx::query_scalar(
        r#"
        WITH RECURSIVE subtree(id) AS (
            SELECT ?
            UNION ALL
            SELECT d.id FROM essay_drafts d JOIN subtree s ON d.parent_draft_id = s.id
        )
        SELECT 1 FROM essay_drafts
        WHERE id IN (SELECT id FROM subtree) AND is_current = 1
        LIMIT 1
        "#,
    )
    .bind(&target.id)
    .fetch_optional(&mut *tx)
    .await?;

    let result = sqlx::query("DELETE FROM essay_drafts WHERE id = ?")
        .bind(&target.id)
        .execute(&mut *tx)
        .await?;

    if removes_current.is_some() {
        sqlx::query(
            r#"
            UPDATE essay_drafts SET is_current = 1
            WHERE id = (
                SELECT id FROM essay_drafts
                WHERE chain_id = ?
                ORDER BY version_number DESC
                LIMIT 1
            )
            "#,
        )
        .bind(&target.chain_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(draft_id = %target.id, chain_id = %target.chain_id, "Deleted essay draft");
    Ok(result.rows_affected() > 0)
}

pub async fn draft_stats(pool: &SqlitePool) -> Result<DraftStats, AppError> {
    let stats = sqlx::query_as::<_, DraftStats>(
        r#"
        SELECT COUNT(*) AS total_drafts,
               COUNT(DISTINCT chain_id) AS total_chains,
               COUNT(DISTINCT user_id) AS total_users
        FROM essay_drafts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}

async fn fetch_owned(
    conn: &mut SqliteConnection,
    id: &str,
    user_id: &str,
) -> Result<Option<EssayDraft>, AppError> {
    let draft = sqlx::query_as::<_, EssayDraft>(&format!(
        "SELECT {DRAFT_COLUMNS} FROM essay_drafts WHERE id = ? AND user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(draft)
}

async fn clear_current(conn: &mut SqliteConnection, chain_id: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE essay_drafts SET is_current = 0 WHERE chain_id = ? AND is_current = 1")
        .bind(chain_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// 보관 한도를 넘지 않도록 오래된 버전을 지웁니다 (삽입 전에 호출).
///
/// 지워지는 행의 자식 중 살아남는 것은 먼저 부모 참조를 끊어서
/// CASCADE로 함께 지워지지 않게 합니다. 살아남은 가장 오래된 버전이 체인의 새 루트가 됩니다.
async fn enforce_retention(
    conn: &mut SqliteConnection,
    chain_id: &str,
    max_versions: u32,
) -> Result<(), AppError> {
    let members = sqlx::query_as::<_, ChainMember>(
        "SELECT id, version_number, created_at FROM essay_drafts WHERE chain_id = ?",
    )
    .bind(chain_id)
    .fetch_all(&mut *conn)
    .await?;

    let evicted = retention::evictions_before_insert(&members, max_versions);
    if evicted.is_empty() {
        return Ok(());
    }

    for id in &evicted {
        sqlx::query("UPDATE essay_drafts SET parent_draft_id = NULL WHERE parent_draft_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        sqlx::query("DELETE FROM essay_drafts WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    tracing::info!(
        chain_id = %chain_id,
        evicted = evicted.len(),
        max_versions,
        "Evicted old essay draft versions"
    );
    Ok(())
}
