//! Header Rewrite Traefik은 요청 헤더를 다른 이름으로 복사하거나 변환하는
//! 리버스 프록시 미들웨어 플러그인입니다.
//!
//! # 주요 기능
//!
//! - `from` 헤더 값을 `to` 헤더로 복사/이름 변경
//! - 값 접두사 추가 및 정규식 치환
//! - 원본 헤더와 대상 헤더의 기존 값 유지 옵션
//!
//! # 예제
//!
//! ```
//! use header_rewrite_traefik::middleware::header_rewrite::{rewrite_headers, RewriteRule};
//! use hyper::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.append("x-user-id", "id42".parse().unwrap());
//!
//! let rule = RewriteRule {
//!     from: "X-User-Id".to_string(),
//!     to: "X-Remote-User".to_string(),
//!     regex: r"(\d+)".to_string(),
//!     replacement: "#$1".to_string(),
//!     ..Default::default()
//! };
//! rewrite_headers(&mut headers, &rule);
//!
//! assert!(!headers.contains_key("x-user-id"));
//! assert_eq!(headers.get("x-remote-user").unwrap(), "id#42");
//! ```
//!
//! # 체인 구성
//!
//! ```no_run
//! use header_rewrite_traefik::middleware::{MiddlewareChain, MiddlewareConfig};
//! use header_rewrite_traefik::proxy::ProxyHandler;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let mut configs = HashMap::new();
//! configs.insert("rename".to_string(), MiddlewareConfig {
//!     settings: serde_json::json!({ "from": "X-Old", "to": "X-New" }),
//!     ..Default::default()
//! });
//!
//! let proxy = Arc::new(ProxyHandler::new("127.0.0.1:8080".parse().unwrap()));
//! let chain = MiddlewareChain::new(&configs, proxy);
//! assert_eq!(chain.names(), ["rename"]);
//! ```

pub mod logging;
pub mod proxy;
pub mod middleware;
pub mod server;
pub mod settings;
