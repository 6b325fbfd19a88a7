//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! - `drafts`: 에세이 초안 버전 체인의 저장/되돌리기/삭제/조회 쿼리

pub mod drafts;

pub use drafts::*;
