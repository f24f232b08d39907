//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → 환경 변수(`RANGER__` 접두사) 순으로 병합됩니다.
//!
//! ```toml
//! [analysis]
//! confidence_level = 95
//! periods_per_year = 252
//! price_field = "adj_close"
//!
//! [risk_free]
//! annual_rate = 4.25
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! span_events = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogFormat;
use crate::types::PriceField;

/// 기본 신뢰수준 (%)
pub const DEFAULT_CONFIDENCE_LEVEL: u8 = 95;

/// 연간 거래일 수 (연율화 계산 기본값)
///
/// 주식 시장은 연간 약 252일 거래됩니다.
/// 주간 데이터는 52, 월간 데이터는 12를 사용합니다.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 분석 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// 무위험 이자율 설정
    #[serde(default)]
    pub risk_free: RiskFreeConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// VaR 신뢰수준 (예: 95, 99)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: u8,
    /// 연간 기간 수 (일간 252, 주간 52, 월간 12)
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    /// 사용할 가격 필드 (close: 가격 수익률, adj_close: 총수익률)
    #[serde(default)]
    pub price_field: PriceField,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            periods_per_year: TRADING_DAYS_PER_YEAR,
            price_field: PriceField::default(),
        }
    }
}

fn default_confidence_level() -> u8 {
    DEFAULT_CONFIDENCE_LEVEL
}

fn default_periods_per_year() -> u32 {
    TRADING_DAYS_PER_YEAR
}

/// 무위험 이자율 설정.
///
/// 고정 이자율이 금리 지수보다 우선합니다. 둘 다 비어 있으면 CLI가 거부합니다.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RiskFreeConfig {
    /// 고정 연간 무위험 이자율 (%)
    #[serde(default)]
    pub annual_rate: Option<f64>,
    /// 단기 금리 지수 CSV 경로 (평균을 연간 이자율로 사용)
    #[serde(default)]
    pub rate_index_path: Option<PathBuf>,
}

/// 로깅 설정.
///
/// `RUST_LOG`가 있으면 `level`보다 우선합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨 필터 (예: "info", "ranger_analytics=debug")
    pub level: String,
    /// 로그 형식
    pub format: LogFormat,
    /// span 진입/종료 이벤트 출력 (분석 단계별 소요 시간 확인용)
    pub span_events: bool,
    /// 파일명과 줄 번호 출력
    pub with_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            span_events: false,
            with_file: false,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일 경로가 주어졌는데 파일이 없으면 에러입니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default(
                "analysis.confidence_level",
                i64::from(DEFAULT_CONFIDENCE_LEVEL),
            )?
            .set_default("analysis.periods_per_year", i64::from(TRADING_DAYS_PER_YEAR))?;

        // 파일에서 로드
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()));
        }

        // 환경 변수로 오버라이드
        let builder = builder.add_source(
            config::Environment::with_prefix("RANGER")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// 기본 경로(`config/default.toml`)가 있으면 로드하고, 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let default_path = Path::new("config/default.toml");
        if default_path.exists() {
            Self::load(Some(default_path))
        } else {
            Self::load(None::<&Path>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.confidence_level, 95);
        assert_eq!(config.analysis.periods_per_year, 252);
        assert_eq!(config.analysis.price_field, PriceField::Close);
        assert!(config.risk_free.annual_rate.is_none());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(!config.logging.span_events);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "ranger-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[analysis]\nconfidence_level = 99\nprice_field = \"adj_close\"\n\n[risk_free]\nannual_rate = 4.5\n\n[logging]\nformat = \"json\"\nspan_events = true\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.analysis.confidence_level, 99);
        assert_eq!(config.analysis.periods_per_year, 252);
        assert_eq!(config.analysis.price_field, PriceField::AdjClose);
        assert_eq!(config.risk_free.annual_rate, Some(4.5));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.span_events);
        assert!(!config.logging.with_file);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = AppConfig::load(Some("/nonexistent/ranger.toml"));
        assert!(result.is_err());
    }
}
