use std::fmt;

/// 미들웨어 생성 및 설정 관련 에러
#[derive(Debug)]
pub enum MiddlewareError {
    /// 설정 오류
    Config {
        middleware: String,
        message: String,
    },
}

impl fmt::Display for MiddlewareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareError::Config { middleware, message } =>
                write!(f, "미들웨어 {} 설정 오류: {}", middleware, message),
        }
    }
}

impl std::error::Error for MiddlewareError {}
