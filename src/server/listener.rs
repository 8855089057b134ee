use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use hyper_util::rt::TokioIo;
use tracing::{error, info};
use super::handler::RequestHandler;
use super::Result;

pub struct ServerListener {
    http_listener: TcpListener,
}

impl ServerListener {
    /// 주어진 포트의 모든 인터페이스에 바인딩합니다.
    pub async fn new(http_port: u16) -> Result<Self> {
        Self::bind(SocketAddr::from(([0, 0, 0, 0], http_port))).await
    }

    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let http_listener = TcpListener::bind(addr)
            .await
            .map_err(|e| {
                error!(error = %e, addr = %addr, "HTTP 포트 바인딩 실패");
                e
            })?;

        info!(addr = %http_listener.local_addr()?, "HTTP 리스너 시작");
        Ok(Self { http_listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.http_listener.local_addr()?)
    }

    pub async fn run(self, handler: Arc<RequestHandler>) {
        loop {
            match self.http_listener.accept().await {
                Ok((stream, remote)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        if let Err(err) = handler.handle_connection(io).await {
                            error!(error = %err, remote = %remote, "HTTP 연결 처리 실패");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "HTTP 연결 수락 실패");
                }
            }
        }
    }
}
