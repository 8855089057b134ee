use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::debug;
use crate::middleware::MiddlewareError;
use super::PLUGIN_NAME;

/// 헤더 재작성 규칙 (플러그인 인스턴스당 하나)
///
/// 호스트가 넘겨주는 키는 `from`, `to`, `prefix`, `keepOriginal`,
/// `keepOriginalTarget`, `regex`, `replacement` 이며 모두 생략 가능합니다.
///
/// # 라벨 파일 예시 (`PROXY_LABELS_FILE`)
/// ```text
/// traefik.http.middlewares.rename-user.plugin.header-rewrite.from=X-Forwarded-User
/// traefik.http.middlewares.rename-user.plugin.header-rewrite.to=X-Remote-User
/// traefik.http.middlewares.rename-user.plugin.header-rewrite.prefix=sso:
/// traefik.http.middlewares.rename-user.plugin.header-rewrite.keepOriginal=true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriteRule {
    /// 원본 헤더 이름 (대소문자 구분 없음)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,

    /// 대상 헤더 이름
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to: String,

    /// 각 값 앞에 붙일 문자열 (정규식 치환 전에 적용)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    /// 복사 후 원본 헤더 유지 여부
    #[serde(deserialize_with = "deserialize_flag")]
    pub keep_original: bool,

    /// 대상 헤더의 기존 값 유지 여부 (false면 먼저 비움)
    #[serde(deserialize_with = "deserialize_flag")]
    pub keep_original_target: bool,

    /// 값에 적용할 정규식
    #[serde(skip_serializing_if = "String::is_empty")]
    pub regex: String,

    /// 치환 템플릿 (`$1`, `${name}` 역참조 지원)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub replacement: String,
}

/// 빈 기본 설정을 생성합니다.
pub fn create_config() -> RewriteRule {
    RewriteRule::default()
}

/// 라벨이나 환경 변수처럼 문자열로만 전달되는 불리언도 허용합니다.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(value)) => parse_flag(&value),
        None => false,
    })
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl RewriteRule {
    /// 호스트가 넘겨준 구조화된 설정에서 규칙을 만듭니다.
    ///
    /// `null`은 기본 설정으로 취급합니다.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, MiddlewareError> {
        if value.is_null() {
            return Ok(create_config());
        }

        Self::deserialize(value).map_err(|e| MiddlewareError::Config {
            middleware: PLUGIN_NAME.to_string(),
            message: e.to_string(),
        })
    }

    /// 라벨에서 `name` 인스턴스의 규칙을 파싱합니다.
    ///
    /// 알 수 없는 키는 무시합니다.
    pub fn from_labels(labels: &HashMap<String, String>, name: &str) -> Self {
        let prefix = label_prefix(name);
        let mut rule = create_config();

        for (key, value) in labels {
            let Some(field) = key.strip_prefix(&prefix) else {
                continue;
            };

            match field {
                "from" => rule.from = value.clone(),
                "to" => rule.to = value.clone(),
                "prefix" => rule.prefix = value.clone(),
                "keepOriginal" => rule.keep_original = parse_flag(value),
                "keepOriginalTarget" => rule.keep_original_target = parse_flag(value),
                "regex" => rule.regex = value.clone(),
                "replacement" => rule.replacement = value.clone(),
                unknown => debug!(middleware = %name, key = %unknown, "알 수 없는 라벨 무시"),
            }
        }

        rule
    }
}

/// `name` 인스턴스의 플러그인 라벨 접두사
pub(crate) fn label_prefix(name: &str) -> String {
    format!("traefik.http.middlewares.{}.plugin.{}.", name, PLUGIN_NAME)
}
