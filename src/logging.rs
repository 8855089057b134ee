use std::path::Path;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};
use crate::settings::logging::{LogFormat, LogOutput, LogSettings};

/// 전역 tracing 구독자를 설정합니다.
///
/// `RUST_LOG` 필터에 설정된 레벨을 기본 지시어로 추가합니다.
/// 이미 초기화된 경우 에러를 돌려줍니다.
pub fn init_logging(settings: &LogSettings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::from_default_env()
        .add_directive(settings.level.into());

    let (writer, ansi) = match &settings.output {
        LogOutput::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let directory = path.parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name()
                .ok_or_else(|| format!("로그 파일 이름이 없음: {}", path.display()))?;
            (BoxMakeWriter::new(tracing_appender::rolling::never(directory, file_name)), false)
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .try_init(),
    }
}
