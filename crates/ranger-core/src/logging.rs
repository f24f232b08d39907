//! tracing 기반 로깅 초기화.
//!
//! `[logging]` 설정 섹션([`LoggingConfig`])이 필터 레벨, 출력 형식,
//! span 이벤트와 파일 위치 출력 여부를 결정합니다.
//! 로그는 stderr로만 나가며 stdout은 리포트 출력에 남겨둡니다.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 여러 줄, 색상 포함 (개발용)
    Pretty,
    /// 한 줄 JSON (로그 수집용)
    Json,
    /// 한 줄 요약
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// `span_events` 설정을 fmt 레이어의 span 이벤트 집합으로 변환합니다.
///
/// 켜져 있으면 span 생성과 종료(소요 시간 포함)를 기록합니다.
fn span_events(config: &LoggingConfig) -> FmtSpan {
    if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// `[logging]` 설정으로 전역 subscriber를 설치합니다.
///
/// `RUST_LOG` 환경 변수가 있으면 `level`보다 우선합니다.
///
/// # 에러
///
/// 필터 문자열이 잘못되었거나 subscriber가 이미 설치된 경우.
///
/// # 예제
///
/// ```no_run
/// use ranger_core::{init_logging, LogFormat, LoggingConfig};
///
/// let config = LoggingConfig {
///     level: "ranger_analytics=debug".to_string(),
///     format: LogFormat::Json,
///     span_events: true,
///     ..Default::default()
/// };
/// init_logging(&config).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.with_file)
        .with_line_number(config.with_file)
        .with_span_events(span_events(config));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        span_events = config.span_events,
        "Logging initialized"
    );

    Ok(())
}

/// 분석 대상 정보가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! analysis_span {
    ($name:expr, $source:expr) => {
        tracing::info_span!($name, source = %$source)
    };
    ($name:expr, $source:expr, $confidence:expr) => {
        tracing::info_span!($name, source = %$source, confidence = %$confidence)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_span_events_follow_config() {
        let mut config = LoggingConfig::default();
        assert_eq!(span_events(&config), FmtSpan::NONE);

        config.span_events = true;
        assert_eq!(span_events(&config), FmtSpan::NEW | FmtSpan::CLOSE);
    }

    #[test]
    fn test_logging_section_deserialize() {
        let config: LoggingConfig = serde_json::from_str(
            r#"{"level": "debug", "format": "json", "span_events": true, "with_file": true}"#,
        )
        .unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.span_events);
        assert!(config.with_file);

        // 누락된 키는 기본값
        let config: LoggingConfig = serde_json::from_str(r#"{"format": "pretty"}"#).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.span_events);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = serde_json::from_str::<LoggingConfig>(r#"{"format": "xml"}"#);
        assert!(result.is_err());
    }
}
