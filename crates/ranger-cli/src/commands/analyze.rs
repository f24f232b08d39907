//! 리스크 분석 명령어.
//!
//! 가격 CSV를 읽어 [`RiskReport`]를 계산하고 텍스트 또는 JSON으로 출력합니다.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use ranger_analytics::{AnalysisParams, RiskAnalyzer, RiskReport};
use ranger_core::{analysis_span, AppConfig, PriceField};
use ranger_data::{CsvPriceFeed, PriceFeed};
use tracing::{info, Instrument};

use super::risk_free::RiskFreeSource;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 사람이 읽는 텍스트
    #[default]
    Text,
    /// JSON (serde)
    Json,
}

/// 분석 명령 옵션 (CLI 인자와 설정을 병합한 결과).
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// 가격 CSV 경로
    pub prices: PathBuf,
    /// 가격 필드
    pub field: PriceField,
    /// 분석 매개변수
    pub params: AnalysisParams,
    /// 무위험 이자율 출처
    pub risk_free: RiskFreeSource,
    /// 출력 형식
    pub output: OutputFormat,
}

/// CLI에서 직접 받은 분석 인자. `None`이면 설정값을 사용합니다.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    pub prices: PathBuf,
    pub field: Option<String>,
    pub confidence: Option<u8>,
    pub periods_per_year: Option<u32>,
    pub risk_free: Option<f64>,
    pub rate_index: Option<PathBuf>,
    pub output: OutputFormat,
}

impl AnalyzeOptions {
    /// CLI 인자를 설정 위에 덮어써 옵션을 만듭니다.
    pub fn resolve(args: AnalyzeArgs, config: &AppConfig) -> Result<Self> {
        let field = match args.field {
            Some(raw) => raw.parse::<PriceField>().map_err(anyhow::Error::msg)?,
            None => config.analysis.price_field,
        };

        let params = AnalysisParams::new(
            args.confidence.unwrap_or(config.analysis.confidence_level),
            args.periods_per_year
                .unwrap_or(config.analysis.periods_per_year),
        )
        .context("잘못된 분석 매개변수")?;

        let risk_free = RiskFreeSource::resolve(args.risk_free, args.rate_index, &config.risk_free)?;

        Ok(Self {
            prices: args.prices,
            field,
            params,
            risk_free,
            output: args.output,
        })
    }
}

/// 분석을 실행합니다.
pub async fn run_analyze(options: &AnalyzeOptions) -> Result<RiskReport> {
    let feed = CsvPriceFeed::new(&options.prices);
    let span = analysis_span!("analyze", feed.name(), options.params.confidence);

    async {
        let prices = feed
            .fetch_prices(options.field)
            .await
            .with_context(|| format!("가격 데이터 로드 실패: {}", options.prices.display()))?;

        let risk_free_rate = options.risk_free.annual_rate().await?;

        info!(
            field = %options.field,
            prices = prices.len(),
            risk_free_rate,
            "Starting risk analysis"
        );

        RiskAnalyzer::new(options.params)
            .analyze(&prices, risk_free_rate)
            .with_context(|| format!("리스크 분석 실패: {}", options.prices.display()))
    }
    .instrument(span)
    .await
}

/// 리포트를 지정한 형식의 문자열로 변환합니다.
pub fn render(report: &RiskReport, field: PriceField, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, field)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("리포트 JSON 직렬화 실패")
        }
    }
}

/// 텍스트 리포트.
pub fn render_text(report: &RiskReport, field: PriceField) -> String {
    let mut lines = Vec::new();

    lines.push("═══════════════════════════════════════════════════".to_string());
    lines.push(format!(
        "  분석 기간: {} ~ {} ({}개 수익률)",
        report.start.date_naive(),
        report.end.date_naive(),
        report.observations
    ));
    lines.push(format!(
        "  {} | 신뢰수준 {}% | 연간 {}기간",
        field.display_name(),
        report.confidence_level,
        report.periods_per_year
    ));
    lines.push("═══════════════════════════════════════════════════".to_string());
    lines.push(format!("총 수익률:            {:.4}%", report.total_return));
    lines.push(format!("연평균 수익률:        {:.4}%", report.annualized_return));
    lines.push(format!("수익/변동성 비율:     {:.4}", report.return_to_vol_ratio));
    lines.push(format!("연평균 무위험 이자율: {:.4}%", report.risk_free_rate));
    lines.push(format!("연간 초과 수익률:     {:.4}%", report.excess_return));
    lines.push(format!("샤프 비율:            {:.4}", report.sharpe_ratio));
    lines.push(String::new());
    lines.push(format!("변동성:               {:.4}%", report.volatility));
    lines.push(format!("Historic VaR:         {:.4}%", report.historic_var));
    lines.push(format!("Historic CVaR:        {:.4}%", report.historic_cvar));
    lines.push(format!("Cornish-Fisher VaR:   {:.4}%", report.cornish_fisher_var));
    lines.push(format!(
        "최대 낙폭:            {:.1}% ({} 발생, 고점 {})",
        report.max_drawdown * 100.0,
        report.max_drawdown_date.date_naive(),
        report.max_drawdown_peak_date.date_naive()
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_report() -> RiskReport {
        let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
        RiskReport {
            start: day(2),
            end: day(31),
            observations: 20,
            confidence_level: 95,
            periods_per_year: 252,
            total_return: 8.9,
            annualized_return: 12.3456,
            annualized_volatility: 20.0,
            return_to_vol_ratio: 0.61728,
            risk_free_rate: 4.25,
            excess_return: 8.0956,
            sharpe_ratio: 0.40478,
            mean_return: 0.05,
            volatility: 1.26,
            skewness: -0.2,
            kurtosis: 3.4,
            historic_var: 2.1,
            historic_cvar: 2.9,
            cornish_fisher_var: 2.2,
            max_drawdown: -0.125,
            max_drawdown_date: day(15),
            max_drawdown_peak_date: day(9),
        }
    }

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            prices: PathBuf::from("spy.csv"),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_report(), PriceField::AdjClose);

        assert!(text.contains("2024-01-02 ~ 2024-01-31"));
        assert!(text.contains("총수익률 (수정 종가)"));
        assert!(text.contains("연평균 수익률:        12.3456%"));
        assert!(text.contains("샤프 비율:            0.4048"));
        assert!(text.contains("Historic CVaR:        2.9000%"));
        assert!(text.contains("-12.5% (2024-01-15 발생, 고점 2024-01-09)"));
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample_report(), PriceField::Close, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["observations"], 20);
        assert_eq!(value["historic_var"], 2.1);
        assert_eq!(value["max_drawdown_date"], "2024-01-15T00:00:00Z");
    }

    #[test]
    fn test_cli_args_override_config() {
        let mut config = AppConfig::default();
        config.analysis.confidence_level = 99;
        config.analysis.price_field = PriceField::AdjClose;
        config.risk_free.annual_rate = Some(1.0);

        let options = AnalyzeOptions::resolve(
            AnalyzeArgs {
                confidence: Some(90),
                field: Some("close".to_string()),
                ..args()
            },
            &config,
        )
        .unwrap();

        assert_eq!(options.params.confidence.value(), 90);
        assert_eq!(options.params.periods_per_year, 252);
        assert_eq!(options.field, PriceField::Close);
        assert_eq!(options.risk_free, RiskFreeSource::Fixed(1.0));

        let options = AnalyzeOptions::resolve(args(), &config).unwrap();
        assert_eq!(options.params.confidence.value(), 99);
        assert_eq!(options.field, PriceField::AdjClose);
    }

    #[test]
    fn test_invalid_args_rejected() {
        let mut config = AppConfig::default();
        config.risk_free.annual_rate = Some(0.0);

        let bad_confidence = AnalyzeArgs {
            confidence: Some(100),
            ..args()
        };
        assert!(AnalyzeOptions::resolve(bad_confidence, &config).is_err());

        let bad_field = AnalyzeArgs {
            field: Some("open".to_string()),
            ..args()
        };
        assert!(AnalyzeOptions::resolve(bad_field, &config).is_err());
    }

    #[tokio::test]
    async fn test_run_analyze_end_to_end() {
        let path =
            std::env::temp_dir().join(format!("ranger-cli-prices-{}.csv", std::process::id()));
        tokio::fs::write(
            &path,
            "Date,Close,Adj Close\n\
             2023-06-01,100,100\n\
             2023-06-02,110,110\n\
             2023-06-05,121,121\n\
             2023-06-06,108.9,108.9\n",
        )
        .await
        .unwrap();

        let options = AnalyzeOptions {
            prices: path.clone(),
            field: PriceField::Close,
            params: AnalysisParams::new(90, 252).unwrap(),
            risk_free: RiskFreeSource::Fixed(2.0),
            output: OutputFormat::Text,
        };
        let report = run_analyze(&options).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert_eq!(report.observations, 3);
        assert!((report.historic_var - 6.0).abs() < 1e-9);
        assert!((report.historic_cvar - 10.0).abs() < 1e-9);
        assert_eq!(report.risk_free_rate, 2.0);
    }
}
