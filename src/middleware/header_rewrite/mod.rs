//! 헤더 재작성 플러그인
//!
//! 요청의 `from` 헤더 값을 `to` 헤더로 복사하거나 이름을 바꾸고,
//! 필요하면 접두사를 붙이거나 정규식으로 값을 변환합니다.

mod config;
mod error;
mod middleware;
mod rewrite;

/// 라벨과 로그에서 사용하는 플러그인 이름
pub const PLUGIN_NAME: &str = "header-rewrite";

pub use config::{create_config, RewriteRule};
pub(crate) use config::label_prefix;
pub use error::RewriteError;
pub use middleware::HeaderRewrite;
pub use rewrite::rewrite_headers;
