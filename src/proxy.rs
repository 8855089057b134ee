use async_trait::async_trait;
use hyper::{StatusCode, Uri};
use hyper::body::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::fmt;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{error, info};
use crate::middleware::{Handler, Request, Response};

#[derive(Debug)]
pub enum ProxyError {
    InvalidUri(hyper::http::uri::InvalidUri),
    Backend(legacy::Error),
    Body(hyper::Error),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::InvalidUri(e) => write!(f, "Failed to build request: {}", e),
            ProxyError::Backend(e) => write!(f, "Backend request failed: {}", e),
            ProxyError::Body(e) => write!(f, "Failed to collect response body: {}", e),
        }
    }
}

impl std::error::Error for ProxyError {}

/// 체인의 마지막 처리기: 요청을 백엔드로 전달합니다.
#[derive(Clone)]
pub struct ProxyHandler {
    backend: SocketAddr,
    client: legacy::Client<HttpConnector, Full<Bytes>>,
}

impl ProxyHandler {
    pub fn new(backend: SocketAddr) -> Self {
        let connector = HttpConnector::new();
        let client = legacy::Client::builder(TokioExecutor::new())
            .build::<_, Full<Bytes>>(connector);

        Self { backend, client }
    }

    async fn forward(&self, req: Request) -> Result<Response, ProxyError> {
        let proxied_req = build_proxied_request(self.backend, req)?;
        let res = self.client.request(proxied_req).await.map_err(ProxyError::Backend)?;

        let (parts, body) = res.into_parts();
        let bytes = body.collect().await.map_err(ProxyError::Body)?.to_bytes();
        info!(status = %parts.status, bytes_size = bytes.len(), "Response body collected");

        Ok(Response::from_parts(parts, Full::new(bytes)))
    }
}

#[async_trait]
impl Handler for ProxyHandler {
    async fn serve(&self, req: Request) -> Response {
        let start_time = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        info!(backend = %self.backend, method = %method, path = %path, "Proxying request to backend");

        match self.forward(req).await {
            Ok(response) => {
                info!(
                    status = %response.status(),
                    duration_ms = start_time.elapsed().as_millis() as u64,
                    "Request completed"
                );
                response
            }
            Err(e) => {
                error!(
                    error = %e,
                    duration_ms = start_time.elapsed().as_millis() as u64,
                    "Request failed"
                );
                build_error_response(StatusCode::BAD_GATEWAY, e.to_string())
            }
        }
    }
}

fn build_proxied_request(address: SocketAddr, req: Request) -> Result<Request, ProxyError> {
    let path = req.uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");
    let uri: Uri = format!("http://{}{}", address, path)
        .parse()
        .map_err(ProxyError::InvalidUri)?;

    let (mut parts, body) = req.into_parts();
    parts.uri = uri;
    Ok(Request::from_parts(parts, body))
}

pub(crate) fn build_error_response(status: StatusCode, message: String) -> Response {
    let mut response = Response::new(Full::new(Bytes::from(message)));
    *response.status_mut() = status;
    response
}
