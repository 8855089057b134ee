use serde::{Deserialize, Deserializer};
use tracing::Level;
use super::{parse_env_var, SettingsError};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// 로그 출력 대상 (`stdout` 또는 파일 경로)
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogOutput {
    #[default]
    Stdout,
    File(String),
}

impl std::str::FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(LogOutput::Stdout),
            "" => Err("빈 로그 출력 경로".to_string()),
            _ => Ok(LogOutput::File(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: Level,
    pub output: LogOutput,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let level: String = parse_env_var("PROXY_LOG_LEVEL", || "info".to_string())?;

        Ok(Self {
            format: parse_env_var("PROXY_LOG_FORMAT", LogFormat::default)?,
            level: parse_log_level(&level).map_err(|reason| SettingsError::EnvVarInvalid {
                var_name: "PROXY_LOG_LEVEL".to_string(),
                value: level.clone(),
                reason,
            })?,
            output: parse_env_var("PROXY_LOG_OUTPUT", LogOutput::default)?,
        })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            output: LogOutput::default(),
        }
    }
}

fn parse_log_level(level: &str) -> Result<Level, String> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err("유효하지 않은 로그 레벨".to_string()),
    }
}

impl<'de> Deserialize<'de> for LogSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            format: LogFormat,
            #[serde(default = "default_log_level_string")]
            level: String,
            #[serde(default = "default_log_output_string")]
            output: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        let level = parse_log_level(&helper.level)
            .map_err(|reason| serde::de::Error::custom(format!("{}: {}", reason, helper.level)))?;
        let output = helper.output.parse().map_err(serde::de::Error::custom)?;

        Ok(LogSettings {
            format: helper.format,
            level,
            output,
        })
    }
}

fn default_log_level_string() -> String {
    "info".to_string()
}

fn default_log_output_string() -> String {
    "stdout".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_log_settings() {
        let settings: LogSettings = toml::from_str(r#"
            format = "json"
            level = "DEBUG"
            output = "/var/log/header-rewrite.log"
        "#).unwrap();

        assert_eq!(settings.format, LogFormat::Json);
        assert_eq!(settings.level, Level::DEBUG);
        assert_eq!(settings.output, LogOutput::File("/var/log/header-rewrite.log".to_string()));
    }

    #[test]
    fn test_deserialize_defaults() {
        let settings: LogSettings = toml::from_str("").unwrap();
        assert_eq!(settings, LogSettings::default());
    }

    #[test]
    fn test_invalid_level_rejected() {
        let result: Result<LogSettings, _> = toml::from_str(r#"level = "loud""#);
        assert!(result.is_err());
    }
}
