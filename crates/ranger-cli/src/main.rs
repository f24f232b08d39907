//! 리스크 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # SPY 일봉, 수정 종가 기준, 무위험 이자율 4.25%
//! ranger analyze --prices data/spy.csv --field adj-close --risk-free 4.25
//!
//! # 13주 T-bill 지수 평균을 무위험 이자율로 사용, 99% VaR, JSON 출력
//! ranger analyze --prices data/spy.csv --rate-index data/irx.csv --confidence 99 --output json
//!
//! # 금리 지수 평균만 확인
//! ranger risk-free --rate-index data/irx.csv
//! ```
//!
//! 설정 우선순위: CLI 인자 > 환경 변수(`RANGER__*`) > 설정 파일 > 기본값

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error};

use ranger_cli::commands::analyze::{render, run_analyze, AnalyzeArgs, AnalyzeOptions, OutputFormat};
use ranger_cli::commands::risk_free::average_rate_from_file;
use ranger_core::{init_logging, AppConfig};

#[derive(Parser)]
#[command(name = "ranger")]
#[command(about = "Risk Ranger - 가격 시계열 리스크/성과 지표 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/default.toml, 있으면)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 가격 CSV의 리스크 리포트 계산
    Analyze {
        /// 가격 CSV 경로 (date, close, adj_close 컬럼)
        #[arg(short, long)]
        prices: PathBuf,

        /// 가격 필드 (close: 가격 수익률, adj-close: 총수익률)
        #[arg(short, long)]
        field: Option<String>,

        /// VaR 신뢰수준 (1~99)
        #[arg(long)]
        confidence: Option<u8>,

        /// 연간 기간 수 (일간 252, 주간 52, 월간 12)
        #[arg(long)]
        periods_per_year: Option<u32>,

        /// 고정 연간 무위험 이자율 (%)
        #[arg(long, conflicts_with = "rate_index", allow_hyphen_values = true)]
        risk_free: Option<f64>,

        /// 단기 금리 지수 CSV 경로 (평균을 무위험 이자율로 사용)
        #[arg(long)]
        rate_index: Option<PathBuf>,

        /// 출력 형식
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// 금리 지수 CSV의 평균 연간 이자율 출력
    RiskFree {
        /// 단기 금리 지수 CSV 경로 (기본: 설정의 risk_free.rate_index_path)
        #[arg(long)]
        rate_index: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (없으면 무시)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("설정 파일 로드 실패: {}", path.display()))?,
        None => AppConfig::load_default().context("설정 로드 실패")?,
    };

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Analyze {
            prices,
            field,
            confidence,
            periods_per_year,
            risk_free,
            rate_index,
            output,
        } => {
            let options = AnalyzeOptions::resolve(
                AnalyzeArgs {
                    prices,
                    field,
                    confidence,
                    periods_per_year,
                    risk_free,
                    rate_index,
                    output,
                },
                &config,
            )?;

            match run_analyze(&options).await {
                Ok(report) => {
                    println!("{}", render(&report, options.field, options.output)?);
                }
                Err(e) => {
                    error!("Analysis failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::RiskFree { rate_index } => {
            let path = rate_index
                .or_else(|| config.risk_free.rate_index_path.clone())
                .context("금리 지수 경로가 필요합니다: --rate-index")?;

            let rate = average_rate_from_file(&path).await?;
            println!("연평균 무위험 이자율: {:.4}%", rate);
        }
    }

    Ok(())
}
