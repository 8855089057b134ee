use std::convert::Infallible;
use std::sync::Arc;
use hyper::{Request, StatusCode};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use http_body_util::{BodyExt, Full};
use tracing::{debug, error};
use crate::middleware::{Handler, Response};
use crate::proxy::build_error_response;
use super::Result;

/// 연결 단위로 요청을 받아 처리기 체인에 넘깁니다.
pub struct RequestHandler {
    handler: Arc<dyn Handler>,
}

impl RequestHandler {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> std::result::Result<Response, Infallible> {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                error!(error = %e, "요청 본문 수집 실패");
                return Ok(build_error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read request body: {}", e),
                ));
            }
        };

        debug!(method = %parts.method, path = %parts.uri.path(), "요청 처리 시작");
        Ok(self.handler.serve(Request::from_parts(parts, Full::new(body))).await)
    }

    pub async fn handle_connection<I>(&self, io: I) -> Result<()>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(|req| self.handle_request(req)),
            )
            .await?;
        Ok(())
    }
}
