use super::{MiddlewareError, Request, Response};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// 요청 처리기 트레이트
///
/// 요청을 받아 응답을 돌려주는 체인의 한 단계입니다. 미들웨어는 다음 처리기를
/// 감싸고, 체인의 끝에는 백엔드로 전달하는 프록시 처리기가 위치합니다.
#[async_trait]
pub trait Handler: Send + Sync {
    /// HTTP 요청을 처리합니다.
    async fn serve(&self, req: Request) -> Response;
}

/// 호스트가 로드하는 플러그인 트레이트
///
/// 호스트는 `create_config`로 기본 설정을 만든 뒤 사용자 설정을 채우고,
/// `new`로 다음 처리기를 감싼 인스턴스를 생성합니다.
pub trait Plugin: Handler + Sized {
    type Config: Default + DeserializeOwned + Send + Sync;

    /// 빈 기본 설정을 생성합니다.
    fn create_config() -> Self::Config {
        Self::Config::default()
    }

    /// 다음 처리기를 감싼 플러그인 인스턴스를 생성합니다.
    fn new(next: Arc<dyn Handler>, config: Self::Config, name: &str) -> Result<Self, MiddlewareError>;

    /// 인스턴스 이름을 반환합니다.
    fn name(&self) -> &str;
}
