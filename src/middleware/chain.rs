use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use super::header_rewrite::{HeaderRewrite, RewriteRule};
use super::{Handler, MiddlewareConfig, MiddlewareError, Plugin, Request, Response};

/// 설정된 미들웨어들로 감싼 처리기 체인
///
/// 낮은 `order`의 미들웨어가 먼저 요청을 받고, 마지막에 `terminal` 처리기로
/// 전달됩니다. 순서가 같으면 이름순입니다.
pub struct MiddlewareChain {
    entry: Arc<dyn Handler>,
    names: Vec<String>,
}

/// 미들웨어 설정으로부터 미들웨어 인스턴스를 생성합니다.
fn create_middleware(
    name: &str,
    config: &MiddlewareConfig,
    next: Arc<dyn Handler>,
) -> Result<Arc<dyn Handler>, MiddlewareError> {
    debug!("미들웨어 생성 시작: name={}, settings={:?}", name, config.settings);

    let rule = RewriteRule::from_json(&config.settings)?;
    Ok(Arc::new(HeaderRewrite::new(next, rule, name)?))
}

impl MiddlewareChain {
    pub fn new(configs: &HashMap<String, MiddlewareConfig>, terminal: Arc<dyn Handler>) -> Self {
        let mut ordered: Vec<_> = configs.iter()
            .filter(|(_, config)| config.enabled)
            .collect();
        ordered.sort_by(|(a_name, a), (b_name, b)| {
            a.order.cmp(&b.order).then_with(|| a_name.cmp(b_name))
        });

        // 안쪽(마지막 실행)부터 감싸 나감
        let mut entry = terminal;
        let mut names = Vec::new();
        for (name, config) in ordered.into_iter().rev() {
            match create_middleware(name, config, entry.clone()) {
                Ok(middleware) => {
                    entry = middleware;
                    names.push(name.clone());
                }
                Err(e) => {
                    error!("미들웨어 생성 실패: {}", e);
                    continue;
                }
            }
        }
        names.reverse();

        info!(middlewares = ?names, "미들웨어 체인 구성 완료");
        Self { entry, names }
    }

    /// 실행 순서대로 정렬된 미들웨어 이름
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[async_trait]
impl Handler for MiddlewareChain {
    async fn serve(&self, req: Request) -> Response {
        self.entry.serve(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http_body_util::Full;
    use hyper::HeaderMap;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<HeaderMap>>,
    }

    #[async_trait]
    impl Handler for Recorder {
        async fn serve(&self, req: Request) -> Response {
            self.seen.lock().unwrap().push(req.headers().clone());
            hyper::Response::new(Full::new(Bytes::from("ok")))
        }
    }

    fn middleware(order: i32, settings: serde_json::Value) -> MiddlewareConfig {
        MiddlewareConfig {
            order,
            settings,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_chain_runs_in_order() {
        let mut configs = HashMap::new();
        // a → b → c 순서로 이름이 바뀌어야 함
        configs.insert("second".to_string(), middleware(2, json!({ "from": "X-B", "to": "X-C" })));
        configs.insert("first".to_string(), middleware(1, json!({ "from": "X-A", "to": "X-B" })));

        let recorder = Arc::new(Recorder::default());
        let chain = MiddlewareChain::new(&configs, recorder.clone());
        assert_eq!(chain.names(), ["first", "second"]);

        let req = hyper::Request::builder()
            .header("x-a", "value")
            .body(Full::new(Bytes::new()))
            .unwrap();
        chain.serve(req).await;

        let seen = recorder.seen.lock().unwrap();
        assert!(!seen[0].contains_key("x-a"));
        assert!(!seen[0].contains_key("x-b"));
        assert_eq!(seen[0].get("x-c").unwrap(), "value");
    }

    #[tokio::test]
    async fn test_disabled_and_invalid_configs_skipped() {
        let mut configs = HashMap::new();
        configs.insert("off".to_string(), MiddlewareConfig {
            enabled: false,
            ..middleware(0, json!({ "from": "X-A", "to": "X-B" }))
        });
        configs.insert("broken".to_string(), middleware(0, json!({ "from": ["not", "a", "string"] })));

        let recorder = Arc::new(Recorder::default());
        let chain = MiddlewareChain::new(&configs, recorder.clone());
        assert!(chain.names().is_empty());

        let req = hyper::Request::builder()
            .header("x-a", "value")
            .body(Full::new(Bytes::new()))
            .unwrap();
        chain.serve(req).await;

        assert_eq!(recorder.seen.lock().unwrap()[0].get("x-a").unwrap(), "value");
    }
}
