use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use super::header_rewrite::{label_prefix, RewriteRule};

/// 헤더 재작성 플러그인 인스턴스 설정
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MiddlewareConfig {
    /// 미들웨어 활성화 여부
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// 실행 순서 (낮은 숫자가 먼저 실행)
    #[serde(default)]
    pub order: i32,

    /// 플러그인 설정 (`from`, `to`, `prefix`, ...)
    #[serde(default)]
    pub settings: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            order: 0,
            settings: serde_json::Value::Null,
        }
    }
}

impl MiddlewareConfig {
    /// 라벨에서 미들웨어 설정을 파싱합니다.
    ///
    /// `traefik.http.middlewares.<name>.plugin.header-rewrite.*` 라벨이 있는
    /// 이름만 인스턴스로 인식하며, `<name>.enabled`와 `<name>.order`도 읽습니다.
    pub fn from_labels(labels: &HashMap<String, String>) -> Vec<(String, Self)> {
        let prefix = "traefik.http.middlewares.";
        let mut names: Vec<String> = labels.keys()
            .filter_map(|key| key.strip_prefix(prefix))
            .filter_map(|rest| rest.split_once('.'))
            .map(|(name, _)| name.to_string())
            .filter(|name| {
                let plugin_prefix = label_prefix(name);
                labels.keys().any(|key| key.starts_with(&plugin_prefix))
            })
            .collect();
        names.sort();
        names.dedup();

        names.into_iter()
            .map(|name| {
                let rule = RewriteRule::from_labels(labels, &name);
                let config = MiddlewareConfig {
                    enabled: labels.get(&format!("{}{}.enabled", prefix, name))
                        .map(|v| v.to_lowercase() == "true")
                        .unwrap_or(true),
                    order: labels.get(&format!("{}{}.order", prefix, name))
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0),
                    settings: serde_json::to_value(&rule).unwrap_or_default(),
                };
                (name, config)
            })
            .collect()
    }
}
