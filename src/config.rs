//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: 외부 인증 제공자와 공유하는 JWT 서명 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `DB_MAX_CONNECTIONS`: 커넥션 풀 크기
//! - `MAX_DRAFT_VERSIONS`: 체인 하나가 보관하는 최대 초안 수
//! - `REQUEST_TIMEOUT_SECS`: 요청 단위 타임아웃(초)

use std::env;

/// 체인당 보관하는 초안 수의 기본값
pub const DEFAULT_MAX_DRAFT_VERSIONS: u32 = 5;

/// 새 버전의 부모(최신 버전)가 항상 살아남으려면 최소 2개는 보관해야 합니다.
const MIN_DRAFT_VERSIONS: u32 = 2;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/draftline.db?mode=rwc")
    pub database_url: String,
    /// JWT 토큰 검증에 사용하는 비밀키
    pub jwt_secret: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// SQLite 커넥션 풀의 최대 연결 수 (기본값: 5)
    pub db_max_connections: u32,
    /// 체인 하나에 남겨두는 최대 초안 수 (기본값: 5, 최소 2)
    pub max_draft_versions: u32,
    /// 요청 하나에 허용하는 최대 처리 시간(초) (기본값: 30)
    pub request_timeout_secs: u64,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5),
            max_draft_versions: clamp_versions(parse_or(
                "MAX_DRAFT_VERSIONS",
                DEFAULT_MAX_DRAFT_VERSIONS,
            )),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30),
        })
    }
}

/// 환경변수를 읽어 파싱하고, 없거나 파싱에 실패하면 기본값을 사용합니다.
///
/// 제네릭 `T: FromStr`: 문자열에서 파싱할 수 있는 모든 타입(u16, u32, u64 등)에 사용 가능
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn clamp_versions(value: u32) -> u32 {
    value.max(MIN_DRAFT_VERSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_bound_has_a_floor_of_two() {
        assert_eq!(clamp_versions(0), 2);
        assert_eq!(clamp_versions(1), 2);
        assert_eq!(clamp_versions(5), 5);
    }

    #[test]
    fn unparsable_values_fall_back_to_default() {
        // 테스트 전용 키라서 다른 테스트와 충돌하지 않습니다.
        env::set_var("DRAFTLINE_TEST_PORT", "not-a-number");
        assert_eq!(parse_or("DRAFTLINE_TEST_PORT", 3000u16), 3000);

        env::set_var("DRAFTLINE_TEST_PORT", " 8080 ");
        assert_eq!(parse_or("DRAFTLINE_TEST_PORT", 3000u16), 8080);

        env::remove_var("DRAFTLINE_TEST_PORT");
        assert_eq!(parse_or("DRAFTLINE_TEST_PORT", 3000u16), 3000);
    }
}
