//! # 버전 보관(retention) 정책
//!
//! 체인 하나에 초안이 `max_versions`개 이상 쌓여 있으면, 새 버전을 넣기 전에
//! 가장 오래된 초안부터 지워서 `max_versions - 1`개만 남깁니다.
//! 삽입 후에는 체인이 정확히 `max_versions`개가 되며, 그 이상은 되지 않습니다.
//!
//! 어떤 행을 지울지 고르는 부분만 순수 함수로 분리해 두었습니다.
//! 실제 삭제는 `db::drafts::save_draft`의 트랜잭션 안에서 일어납니다.

/// 보관 정책 계산에 필요한 체인 구성원의 최소 정보
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ChainMember {
    pub id: String,
    pub version_number: i64,
    pub created_at: String,
}

/// 새 버전을 넣기 전에 지워야 할 초안 id 목록을 반환합니다.
///
/// 정렬 기준은 생성 시각 내림차순이고, 같은 시각이면 버전 번호가 높은 쪽을 최신으로 봅니다.
/// `created_at`은 ISO 8601 문자열이라 문자열 비교가 곧 시간 비교입니다.
pub fn evictions_before_insert(members: &[ChainMember], max_versions: u32) -> Vec<String> {
    let keep = (max_versions as usize).saturating_sub(1);
    if members.len() <= keep {
        return Vec::new();
    }

    let mut newest_first: Vec<&ChainMember> = members.iter().collect();
    newest_first.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.version_number.cmp(&a.version_number))
    });

    newest_first
        .into_iter()
        .skip(keep)
        .map(|m| m.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(version: i64, created_at: &str) -> ChainMember {
        ChainMember {
            id: format!("v{}", version),
            version_number: version,
            created_at: created_at.to_string(),
        }
    }

    fn chain(n: i64) -> Vec<ChainMember> {
        (1..=n)
            .map(|v| member(v, &format!("2026-03-01T10:00:{:02}.000Z", v)))
            .collect()
    }

    #[test]
    fn nothing_is_evicted_below_the_bound() {
        assert!(evictions_before_insert(&chain(4), 5).is_empty());
        assert!(evictions_before_insert(&[], 5).is_empty());
    }

    #[test]
    fn full_chain_evicts_only_the_oldest() {
        assert_eq!(evictions_before_insert(&chain(5), 5), vec!["v1"]);
    }

    #[test]
    fn overfull_chain_is_trimmed_down_to_bound_minus_one() {
        // 보관 한도를 줄인 뒤 처음 저장하는 경우
        let mut evicted = evictions_before_insert(&chain(7), 3);
        evicted.sort();
        assert_eq!(evicted, vec!["v1", "v2", "v3", "v4", "v5"]);
    }

    #[test]
    fn creation_time_wins_over_version_number() {
        let members = vec![
            member(1, "2026-03-01T10:00:05.000Z"),
            member(2, "2026-03-01T10:00:01.000Z"),
            member(3, "2026-03-01T10:00:06.000Z"),
        ];
        assert_eq!(evictions_before_insert(&members, 3), vec!["v2"]);
    }

    #[test]
    fn equal_timestamps_fall_back_to_version_order() {
        let ts = "2026-03-01T10:00:00.000Z";
        let members = vec![member(3, ts), member(1, ts), member(2, ts)];
        assert_eq!(evictions_before_insert(&members, 3), vec!["v1"]);
    }
}
