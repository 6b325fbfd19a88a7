//! # 서비스 모듈
//!
//! DB에 의존하지 않는 순수 로직을 모아둔 모듈입니다.
//! - `text`: 단어 수/문자 수 계산과 입력 검증
//! - `retention`: 체인별 버전 보관 정책 (지울 초안 선택)

pub mod retention;
pub mod text;

pub use text::*;
