//! # 초안 본문 통계 및 입력 검증
//!
//! - `count_words()`: 텍스트의 단어 수 계산 (IELTS 최소 단어 수 확인용)
//! - `count_chars()`: 텍스트의 문자 수 계산
//! - `normalize_title()`: 제목 기본값/길이 검증
//! - `validate_content()`: 빈 본문 거부

use crate::error::AppError;

/// 제목의 최대 길이 (문자 단위)
pub const MAX_TITLE_CHARS: usize = 200;

const DEFAULT_TITLE: &str = "Untitled";

/// 텍스트의 단어 수를 계산합니다.
///
/// 공백(스페이스, 탭, 줄바꿈)으로 분리하여 단어를 셉니다.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 텍스트의 문자 수를 계산합니다.
///
/// 유니코드 문자 단위로 셉니다 (한글 1자 = 1문자).
/// `.len()`은 바이트 수를 반환하므로 한글 등에는 부적합합니다.
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

/// 제목 앞뒤 공백을 제거하고, 비어 있으면 "Untitled"를 사용합니다.
pub fn normalize_title(title: Option<&str>) -> Result<String, AppError> {
    let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE);

    if count_chars(title) > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }

    Ok(title.to_string())
}

pub fn validate_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_split_on_any_whitespace() {
        assert_eq!(count_words("Some people believe\tthat\nuniversities"), 5);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn chars_count_unicode_scalars_not_bytes() {
        assert_eq!(count_chars("에세이"), 3);
        assert_eq!(count_chars("essay"), 5);
    }

    #[test]
    fn blank_title_becomes_untitled() {
        assert_eq!(normalize_title(None).unwrap(), "Untitled");
        assert_eq!(normalize_title(Some("   ")).unwrap(), "Untitled");
        assert_eq!(normalize_title(Some("  Task 2  ")).unwrap(), "Task 2");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "a".repeat(MAX_TITLE_CHARS + 1);
        assert!(matches!(
            normalize_title(Some(&title)),
            Err(AppError::Validation(_))
        ));
        assert!(normalize_title(Some(&"a".repeat(MAX_TITLE_CHARS))).is_ok());
    }

    #[test]
    fn whitespace_only_content_is_rejected() {
        assert!(matches!(validate_content(" \n\t"), Err(AppError::Validation(_))));
        assert!(validate_content("Essay body").is_ok());
    }
}
