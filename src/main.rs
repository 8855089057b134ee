use std::sync::Arc;
use header_rewrite_traefik::{
    logging,
    middleware::MiddlewareChain,
    proxy::ProxyHandler,
    server::{RequestHandler, ServerListener},
    settings::Settings,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_logging(&settings.logging) {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    info!(
        http_port = settings.server.http_port,
        backend = %settings.server.backend,
        "헤더 재작성 프록시 시작"
    );

    let proxy = Arc::new(ProxyHandler::new(settings.server.backend));
    let chain = MiddlewareChain::new(&settings.middlewares, proxy);
    let handler = Arc::new(RequestHandler::new(Arc::new(chain)));

    let listener = match ServerListener::new(settings.server.http_port).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "리스너 생성 실패");
            std::process::exit(1);
        }
    };

    listener.run(handler).await;
}
