//! 리스크 및 성과 지표 분석 엔진.
//!
//! 이 크레이트는 단일 자산의 가격 시계열로부터 다음을 계산합니다:
//! - 기간 수익률 시계열
//! - 적률 통계 (평균, 모표준편차, 왜도, 원시 첨도)
//! - 꼬리 위험 (Historic VaR / CVaR, Cornish-Fisher VaR)
//! - 최대 낙폭과 발생 시점
//! - 연율화 수익률 / 변동성, 샤프 비율
//!
//! 모든 계산은 불변 입력에 대한 순수 함수이며, 실패 시 [`RiskError`]를 반환합니다.
//!
//! # 예시
//!
//! ```rust,ignore
//! use ranger_analytics::{AnalysisParams, RiskAnalyzer};
//!
//! let analyzer = RiskAnalyzer::new(AnalysisParams::new(95, 252)?);
//! let report = analyzer.analyze(&prices, 4.25)?;
//! println!("샤프: {:.4}", report.sharpe_ratio);
//! ```
//!
//! [`RiskError`]: ranger_core::RiskError

pub mod drawdown;
pub mod performance;
pub mod report;
pub mod risk_free;

pub use drawdown::{analyze_drawdown, DrawdownAnalysis, DrawdownPoint};
pub use performance::annualize::{annualize_returns, annualize_volatility, Annualized};
pub use performance::moments::{kurtosis, mean, skewness, std_dev, Moments};
pub use performance::ratios::PerformanceRatios;
pub use performance::returns::{build_returns, total_return};
pub use performance::tail_risk::{
    cornish_fisher_var, cornish_fisher_var_from_moments, gaussian_var, historic_cvar,
    historic_var, percentile,
};
pub use report::{AnalysisParams, RiskAnalyzer, RiskReport};
pub use risk_free::average_annual_rate;
