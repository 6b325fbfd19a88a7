//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `admin`: 관리자 전용 통계
//! - `auth`: 현재 사용자 확인 (`/auth/me`)
//! - `drafts`: 초안 목록/저장/조회/삭제와 공유 상태(`AppState`)
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `versions`: 버전 체인 조회와 되돌리기

pub mod admin;
pub mod auth;
pub mod drafts;
pub mod health;
pub mod versions;

// main.rs / lib.rs에서 `routes::save_draft`처럼 바로 접근 가능하게 합니다.
pub use admin::*;
pub use drafts::*;
pub use health::*;
pub use versions::*;
