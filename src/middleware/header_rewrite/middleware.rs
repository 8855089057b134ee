use crate::middleware::{Handler, MiddlewareError, Plugin, Request, Response};
use super::config::RewriteRule;
use super::rewrite::rewrite_headers;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// 헤더 재작성 미들웨어
///
/// 모든 요청의 헤더에 규칙을 적용한 뒤 항상 다음 처리기로 넘깁니다.
pub struct HeaderRewrite {
    next: Arc<dyn Handler>,
    name: String,
    config: Arc<RewriteRule>,
}

impl Plugin for HeaderRewrite {
    type Config = RewriteRule;

    /// 검증은 요청 시점으로 미루므로 생성은 실패하지 않습니다.
    fn new(next: Arc<dyn Handler>, config: RewriteRule, name: &str) -> Result<Self, MiddlewareError> {
        debug!(
            middleware = %name,
            from = %config.from,
            to = %config.to,
            "헤더 재작성 미들웨어 생성"
        );

        Ok(Self {
            next,
            name: name.to_string(),
            config: Arc::new(config),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Handler for HeaderRewrite {
    async fn serve(&self, mut req: Request) -> Response {
        rewrite_headers(req.headers_mut(), &self.config);
        debug!(middleware = %self.name, "요청 헤더 재작성 완료");
        self.next.serve(req).await
    }
}
