use header_rewrite_traefik::middleware::header_rewrite::RewriteRule;
use header_rewrite_traefik::settings::{logging::{LogFormat, LogOutput}, Settings, SettingsError};
use std::net::SocketAddr;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "PROXY_CONFIG_FILE",
        "PROXY_LABELS_FILE",
        "PROXY_HTTP_PORT",
        "PROXY_BACKEND",
        "PROXY_LOG_LEVEL",
        "PROXY_LOG_FORMAT",
        "PROXY_LOG_OUTPUT",
    ];

    // 테스트 전후 환경변수 초기화를 위한 헬퍼 함수
    fn cleanup_env() {
        for var in VARS.iter() {
            std::env::remove_var(var);
        }
    }

    // 테스트용 임시 TOML 파일 생성 헬퍼
    fn create_test_toml(content: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        std::fs::write(&file_path, content).unwrap();
        (file_path.to_str().unwrap().to_string(), dir)
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        cleanup_env();

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.server.http_port, 80);
        assert_eq!(settings.server.backend, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.logging.level, tracing::Level::INFO);
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.logging.output, LogOutput::Stdout);
        assert!(settings.middlewares.is_empty());
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        cleanup_env();
        std::env::set_var("PROXY_HTTP_PORT", "9090");
        std::env::set_var("PROXY_BACKEND", "10.0.0.2:3000");
        std::env::set_var("PROXY_LOG_LEVEL", "debug");
        std::env::set_var("PROXY_LOG_FORMAT", "json");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.server.http_port, 9090);
        assert_eq!(settings.server.backend, "10.0.0.2:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(settings.logging.format, LogFormat::Json);

        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_settings_validation() {
        let invalid = [
            ("PROXY_HTTP_PORT", "99999"),
            ("PROXY_HTTP_PORT", "0"),
            ("PROXY_BACKEND", "not-an-address"),
            ("PROXY_LOG_LEVEL", "invalid_level"),
            ("PROXY_LOG_FORMAT", "xml"),
        ];

        for (var, value) in invalid {
            cleanup_env();
            std::env::set_var(var, value);

            let result = Settings::from_env();
            assert!(
                matches!(result, Err(SettingsError::EnvVarInvalid { .. })),
                "{}={} 은 실패해야 함",
                var,
                value
            );
        }

        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_settings_from_toml_file() {
        cleanup_env();
        let (path, _dir) = create_test_toml(r#"
            [server]
            http_port = 8081
            backend = "127.0.0.1:5000"

            [logging]
            format = "json"
            level = "warn"

            [middlewares.rename]
            order = 2

            [middlewares.rename.settings]
            from = "X-Forwarded-User"
            to = "X-Remote-User"
            prefix = "sso:"
            keepOriginal = true

            [middlewares.disabled]
            enabled = false
        "#);

        std::env::set_var("PROXY_CONFIG_FILE", &path);
        let settings = Settings::load().unwrap();
        cleanup_env();

        assert_eq!(settings.server.http_port, 8081);
        assert_eq!(settings.server.backend, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.logging.level, tracing::Level::WARN);
        assert_eq!(settings.middlewares.len(), 2);

        let rename = settings.middlewares.get("rename").unwrap();
        assert!(rename.enabled);
        assert_eq!(rename.order, 2);

        let rule = RewriteRule::from_json(&rename.settings).unwrap();
        assert_eq!(rule.from, "X-Forwarded-User");
        assert_eq!(rule.to, "X-Remote-User");
        assert_eq!(rule.prefix, "sso:");
        assert!(rule.keep_original);

        assert!(!settings.middlewares.get("disabled").unwrap().enabled);
    }

    #[test]
    #[serial]
    fn test_settings_file_errors() {
        cleanup_env();

        let result = Settings::from_toml_file("/nonexistent/config.toml");
        assert!(matches!(result, Err(SettingsError::FileError { .. })));

        let (path, _dir) = create_test_toml("[server]\nhttp_port = \"eighty\"\n");
        let result = Settings::from_toml_file(&path);
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));
    }

    #[test]
    #[serial]
    fn test_load_merges_labels_file() {
        cleanup_env();
        let (config_path, _config_dir) = create_test_toml(r#"
            [middlewares.shared]
            order = 1

            [middlewares.shared.settings]
            from = "X-File"
            to = "X-File-New"

            [middlewares.kept]
            [middlewares.kept.settings]
            from = "X-Kept"
        "#);

        let labels_dir = tempfile::tempdir().unwrap();
        let labels_path = labels_dir.path().join("labels");
        std::fs::write(&labels_path, "\
# 라벨이 파일 설정보다 우선
traefik.http.middlewares.shared.plugin.header-rewrite.from=X-A
traefik.http.middlewares.shared.plugin.header-rewrite.to=X-B
traefik.http.middlewares.shared.plugin.header-rewrite.keepOriginal=true
traefik.http.middlewares.shared.order=5
").unwrap();

        std::env::set_var("PROXY_CONFIG_FILE", &config_path);
        std::env::set_var("PROXY_LABELS_FILE", &labels_path);
        let settings = Settings::load().unwrap();
        cleanup_env();

        assert_eq!(settings.middlewares.len(), 2);

        let shared = settings.middlewares.get("shared").unwrap();
        assert_eq!(shared.order, 5);
        let rule = RewriteRule::from_json(&shared.settings).unwrap();
        assert_eq!(rule.from, "X-A");
        assert_eq!(rule.to, "X-B");
        assert!(rule.keep_original);

        let kept = settings.middlewares.get("kept").unwrap();
        assert_eq!(RewriteRule::from_json(&kept.settings).unwrap().from, "X-Kept");
    }

    #[test]
    #[serial]
    fn test_labels_file_from_env_settings() {
        cleanup_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels");
        std::fs::write(
            &path,
            "traefik.http.middlewares.rename.plugin.header-rewrite.from=X-Old\n",
        ).unwrap();

        std::env::set_var("PROXY_LABELS_FILE", &path);
        let settings = Settings::load().unwrap();
        cleanup_env();

        let rename = settings.middlewares.get("rename").unwrap();
        assert!(rename.enabled);
        assert_eq!(RewriteRule::from_json(&rename.settings).unwrap().from, "X-Old");
    }

    #[test]
    #[serial]
    fn test_missing_labels_file() {
        cleanup_env();
        std::env::set_var("PROXY_LABELS_FILE", "/nonexistent/labels");

        let result = Settings::load();
        cleanup_env();

        assert!(matches!(result, Err(SettingsError::FileError { .. })));
    }
}
