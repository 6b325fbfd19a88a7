//! # 미들웨어 모듈
//!
//! - `auth`: Bearer JWT에서 인증된 사용자(`AuthUser`)를 추출하는 Extractor

pub mod auth;
