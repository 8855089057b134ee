use std::{collections::HashMap, env, fs, path::Path};
use serde::Deserialize;
use tracing::debug;
use crate::middleware::MiddlewareConfig;

mod server;
pub mod logging;
mod error;

pub use server::ServerSettings;
pub use logging::LogSettings;
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;
pub use server::parse_env_var;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 미들웨어 인스턴스 설정 (이름 → 설정)
    #[serde(default)]
    pub middlewares: HashMap<String, MiddlewareConfig>,
}

impl Settings {
    /// `PROXY_CONFIG_FILE`이 있으면 TOML 파일에서, 없으면 환경 변수에서 로드합니다.
    ///
    /// `PROXY_LABELS_FILE`이 있으면 그 라벨로 정의된 미들웨어를 추가합니다.
    pub fn load() -> Result<Self> {
        let mut settings = if let Ok(config_path) = env::var("PROXY_CONFIG_FILE") {
            Self::from_toml_file(&config_path)?
        } else {
            Self::from_env()?
        };

        if let Ok(labels_path) = env::var("PROXY_LABELS_FILE") {
            let labels = read_labels_file(&labels_path)?;
            settings.merge_labels(&labels);
        }

        Ok(settings)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("설정 파일 로드: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| SettingsError::FileError {
            path: path.to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            middlewares: HashMap::new(),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    ///
    /// 미들웨어 규칙 자체는 요청 시점까지 검증하지 않습니다.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()
    }

    /// 라벨로 정의된 미들웨어를 추가합니다. 같은 이름은 라벨이 우선합니다.
    pub fn merge_labels(&mut self, labels: &HashMap<String, String>) {
        for (name, config) in MiddlewareConfig::from_labels(labels) {
            debug!(middleware = %name, "라벨 미들웨어 추가");
            self.middlewares.insert(name, config);
        }
    }
}

/// `docker run --label-file`과 같은 형식의 라벨 파일을 읽습니다.
///
/// 한 줄에 `key=value` 하나. 빈 줄과 `#` 주석은 건너뛰고,
/// `=`가 없는 줄은 빈 값의 라벨로 취급합니다.
pub fn read_labels_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    debug!("라벨 파일 로드: {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| SettingsError::FileError {
        path: path.to_string_lossy().to_string(),
        error: e,
    })?;

    Ok(parse_labels(&content))
}

fn parse_labels(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}
