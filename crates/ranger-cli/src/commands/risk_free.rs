//! 무위험 이자율 명령어.
//!
//! 금리 지수 CSV(예: 13주 T-bill `^IRX`)의 평균 연간 이자율을 계산합니다.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ranger_analytics::average_annual_rate;
use ranger_core::RiskFreeConfig;
use ranger_data::{CsvRateFeed, RateFeed};
use tracing::info;

/// 무위험 이자율 출처.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskFreeSource {
    /// 고정 연간 이자율 (%)
    Fixed(f64),
    /// 금리 지수 CSV 파일
    RateIndex(PathBuf),
}

impl RiskFreeSource {
    /// CLI 인자와 설정에서 출처를 결정합니다. CLI 인자가 우선합니다.
    ///
    /// 둘 다 없으면 에러입니다 (0%로 대체하지 않음).
    pub fn resolve(
        fixed: Option<f64>,
        rate_index: Option<PathBuf>,
        config: &RiskFreeConfig,
    ) -> Result<Self> {
        match (fixed, rate_index) {
            (Some(rate), _) => Ok(Self::Fixed(rate)),
            (None, Some(path)) => Ok(Self::RateIndex(path)),
            (None, None) => match (config.annual_rate, &config.rate_index_path) {
                (Some(rate), _) => Ok(Self::Fixed(rate)),
                (None, Some(path)) => Ok(Self::RateIndex(path.clone())),
                (None, None) => anyhow::bail!(
                    "무위험 이자율이 지정되지 않았습니다: --risk-free 또는 --rate-index를 사용하세요"
                ),
            },
        }
    }

    /// 연간 무위험 이자율(%)을 계산합니다.
    pub async fn annual_rate(&self) -> Result<f64> {
        match self {
            Self::Fixed(rate) => {
                anyhow::ensure!(rate.is_finite(), "무위험 이자율이 유한한 값이 아닙니다");
                Ok(*rate)
            }
            Self::RateIndex(path) => average_rate_from_file(path).await,
        }
    }
}

/// 금리 지수 파일의 평균 연간 이자율(%).
pub async fn average_rate_from_file(path: &Path) -> Result<f64> {
    let feed = CsvRateFeed::new(path);
    let quotes = feed
        .fetch_rates()
        .await
        .with_context(|| format!("금리 지수 로드 실패: {}", path.display()))?;

    let rate = average_annual_rate(&quotes)?;
    info!(feed = feed.name(), quotes = quotes.len(), rate, "Risk-free rate resolved");
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let config = RiskFreeConfig {
            annual_rate: Some(1.0),
            rate_index_path: None,
        };

        let source = RiskFreeSource::resolve(Some(4.25), None, &config).unwrap();
        assert_eq!(source, RiskFreeSource::Fixed(4.25));

        let source =
            RiskFreeSource::resolve(None, Some(PathBuf::from("irx.csv")), &config).unwrap();
        assert_eq!(source, RiskFreeSource::RateIndex(PathBuf::from("irx.csv")));

        let source = RiskFreeSource::resolve(None, None, &config).unwrap();
        assert_eq!(source, RiskFreeSource::Fixed(1.0));
    }

    #[test]
    fn test_missing_source_is_error() {
        let config = RiskFreeConfig::default();
        assert!(RiskFreeSource::resolve(None, None, &config).is_err());
    }

    #[tokio::test]
    async fn test_rate_index_average() {
        let path = std::env::temp_dir().join(format!("ranger-cli-irx-{}.csv", std::process::id()));
        tokio::fs::write(&path, "Date,Close\n2015-01-02,4.0\n2015-01-05,5.0\n")
            .await
            .unwrap();

        let rate = RiskFreeSource::RateIndex(path.clone())
            .annual_rate()
            .await
            .unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert!((rate - 4.5).abs() < 1e-12);
    }
}
