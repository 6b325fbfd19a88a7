//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `draft`: 에세이 초안과 요청/쿼리 구조체
//!
//! `pub use X::*;`로 재공개하여 `crate::models::EssayDraft`처럼 짧게 접근합니다.

pub mod draft;

pub use draft::*;
