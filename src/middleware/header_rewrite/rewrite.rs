use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use regex::bytes::Regex;
use tracing::{debug, error, warn};
use super::config::RewriteRule;
use super::error::RewriteError;

/// 규칙에 따라 `from` 헤더의 값을 `to` 헤더로 옮겨 씁니다.
///
/// 처리 순서:
/// 1. `from`의 모든 값을 순서대로 읽음
/// 2. `keep_original_target`이 아니면 `to`를 비움
/// 3. 빈 값은 건너뛰고, 접두사 → 정규식 치환 순으로 변환 후 `to`에 추가
/// 4. `keep_original`이 아니면 `from`을 삭제
///
/// `from`과 `to` 이외의 헤더는 건드리지 않습니다. 정규식 오류는 로그만 남기고
/// 값은 치환 없이 그대로 사용합니다.
pub fn rewrite_headers(headers: &mut HeaderMap, rule: &RewriteRule) {
    let from = parse_header_name(&rule.from, "from");
    let to = parse_header_name(&rule.to, "to");

    let values: Vec<HeaderValue> = match &from {
        Some(name) => headers.get_all(name).iter().cloned().collect(),
        None => Vec::new(),
    };

    if !rule.keep_original_target {
        if let Some(name) = &to {
            headers.remove(name);
        }
    }

    if let Some(name) = &to {
        for value in values.iter().filter(|v| !v.is_empty()) {
            let rewritten = rewrite_value(value.as_bytes(), rule);
            match HeaderValue::from_bytes(&rewritten) {
                Ok(value) => {
                    headers.append(name.clone(), value);
                }
                Err(e) => warn!(
                    header = %name,
                    error = %e,
                    "변환된 값이 유효한 헤더 값이 아니어서 건너뜀"
                ),
            }
        }
    }

    if !rule.keep_original {
        if let Some(name) = &from {
            headers.remove(name);
        }
    }
}

/// 값 하나에 접두사와 정규식 치환을 적용합니다.
fn rewrite_value(raw: &[u8], rule: &RewriteRule) -> Vec<u8> {
    let mut value = Vec::with_capacity(rule.prefix.len() + raw.len());
    value.extend_from_slice(rule.prefix.as_bytes());
    value.extend_from_slice(raw);

    if rule.regex.is_empty() {
        return value;
    }

    // 요청마다 새로 컴파일
    let pattern = match compile_pattern(&rule.regex) {
        Ok(pattern) => pattern,
        Err(e) => {
            error!(pattern = %rule.regex, error = %e, "정규식 컴파일 실패, 치환 생략");
            return value;
        }
    };

    // obs-text(0x80-0xFF)가 섞인 값도 바이트 단위로 치환
    pattern
        .replace_all(&value, rule.replacement.as_bytes())
        .into_owned()
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, RewriteError> {
    Regex::new(pattern).map_err(|e| RewriteError::InvalidRegex {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// 설정된 이름을 헤더 이름으로 변환합니다. 비어 있거나 잘못된 이름은 `None`.
fn parse_header_name(name: &str, field: &str) -> Option<HeaderName> {
    if name.is_empty() {
        debug!(field = %field, "헤더 이름이 설정되지 않음");
        return None;
    }

    match HeaderName::from_bytes(name.as_bytes()) {
        Ok(name) => Some(name),
        Err(e) => {
            warn!(field = %field, name = %name, error = %e, "유효하지 않은 헤더 이름");
            None
        }
    }
}
