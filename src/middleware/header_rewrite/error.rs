use std::fmt;

/// 헤더 재작성 중 발생할 수 있는 에러
///
/// 요청 처리는 절대 중단되지 않으며, 이 에러는 로그로만 보고됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteError {
    /// 정규식 컴파일 실패
    InvalidRegex {
        pattern: String,
        reason: String,
    },
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::InvalidRegex { pattern, reason } =>
                write!(f, "정규식 {:?} 컴파일 실패: {}", pattern, reason),
        }
    }
}

impl std::error::Error for RewriteError {}
