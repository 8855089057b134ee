pub mod chain;
pub mod config;
pub mod error;
pub mod header_rewrite;
pub mod traits;

use bytes::Bytes;
use http_body_util::Full;

pub use chain::MiddlewareChain;
pub use config::MiddlewareConfig;
pub use error::MiddlewareError;
pub use traits::{Handler, Plugin};

/// 미들웨어 체인이 다루는 요청 타입 (본문은 미리 수집됨)
pub type Request = hyper::Request<Full<Bytes>>;

/// 미들웨어 체인이 돌려주는 응답 타입
pub type Response = hyper::Response<Full<Bytes>>;
