//! 리스크 리포트 조립.
//!
//! [`RiskAnalyzer`]는 모든 계산 컴포넌트를 데이터 의존 순서대로 실행하여
//! [`RiskReport`]를 만듭니다:
//!
//! ```text
//! 가격 ─┬─> 수익률 ─┬─> 적률 ──> VaR / CVaR / Cornish-Fisher VaR
//!       │           └─> 연율화 ──> 비율 (+ 무위험 이자율)
//!       ├─> 낙폭
//!       └─> 총 수익률
//! ```
//!
//! 리포트는 한 번 계산된 스칼라 값의 묶음이며, 포맷팅은 호출자가 담당합니다.

use chrono::{DateTime, Utc};
use ranger_core::{AnalysisConfig, ConfidenceLevel, PriceSeries, RiskError, RiskResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::drawdown::analyze_drawdown;
use crate::performance::annualize::Annualized;
use crate::performance::moments::Moments;
use crate::performance::ratios::PerformanceRatios;
use crate::performance::returns::{build_returns, total_return};
use crate::performance::tail_risk::{
    cornish_fisher_var_from_moments, historic_cvar, historic_var,
};

/// 분석 매개변수.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    /// VaR 신뢰수준
    pub confidence: ConfidenceLevel,
    /// 연간 기간 수 (일간 데이터 = 252)
    pub periods_per_year: u32,
}

impl AnalysisParams {
    /// 매개변수를 검증하여 생성합니다.
    ///
    /// # 에러
    ///
    /// 신뢰수준이 (0, 100) 밖이거나 연간 기간 수가 0이면 `InvalidParameter`.
    pub fn new(confidence_level: u8, periods_per_year: u32) -> RiskResult<Self> {
        if periods_per_year == 0 {
            return Err(RiskError::InvalidParameter(
                "연간 기간 수는 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(Self {
            confidence: ConfidenceLevel::new(confidence_level)?,
            periods_per_year,
        })
    }
}

impl TryFrom<&AnalysisConfig> for AnalysisParams {
    type Error = RiskError;

    fn try_from(config: &AnalysisConfig) -> Result<Self, Self::Error> {
        Self::new(config.confidence_level, config.periods_per_year)
    }
}

/// 리스크 및 성과 리포트
///
/// 수익률, 변동성, VaR 계열 값은 모두 백분율 단위입니다 (예: 2.5 = 2.5%).
/// 최대 낙폭만 비율 단위입니다 (예: -0.25 = -25%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// 분석 시작 시점 (첫 가격)
    pub start: DateTime<Utc>,
    /// 분석 종료 시점 (마지막 가격)
    pub end: DateTime<Utc>,
    /// 수익률 관측치 수
    pub observations: usize,
    /// VaR 신뢰수준 (%)
    pub confidence_level: u8,
    /// 연간 기간 수
    pub periods_per_year: u32,

    /// 전체 기간 총 수익률 (%)
    pub total_return: f64,
    /// 연율화 수익률 (%)
    pub annualized_return: f64,
    /// 연율화 변동성 (%)
    pub annualized_volatility: f64,
    /// 수익/변동성 비율
    pub return_to_vol_ratio: f64,
    /// 연간 무위험 이자율 (%)
    pub risk_free_rate: f64,
    /// 연간 초과 수익률 (%)
    pub excess_return: f64,
    /// 샤프 비율
    pub sharpe_ratio: f64,

    /// 기간 평균 수익률 (%)
    pub mean_return: f64,
    /// 기간 변동성 (모표준편차, %)
    pub volatility: f64,
    /// 왜도
    pub skewness: f64,
    /// 원시 첨도 (정규분포 = 3)
    pub kurtosis: f64,

    /// Historic VaR (%, 양수 손실)
    pub historic_var: f64,
    /// Historic CVaR (%, 양수 손실)
    pub historic_cvar: f64,
    /// Cornish-Fisher VaR (%, 양수 손실)
    pub cornish_fisher_var: f64,

    /// 최대 낙폭 (비율, 0 이하)
    pub max_drawdown: f64,
    /// 최대 낙폭 발생 시점
    pub max_drawdown_date: DateTime<Utc>,
    /// 최대 낙폭 직전 고점 시점
    pub max_drawdown_peak_date: DateTime<Utc>,
}

/// 리스크 분석기.
///
/// 상태를 갖지 않으며, 같은 입력에 대해 항상 같은 결과를 반환합니다.
/// 여러 자산은 자산마다 `analyze`를 한 번씩 호출하여 처리합니다.
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    params: AnalysisParams,
}

impl RiskAnalyzer {
    /// 새 분석기를 생성합니다.
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    /// 분석 매개변수.
    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// 가격 시계열 전체를 분석합니다.
    ///
    /// # 매개변수
    ///
    /// * `prices` - 가격 시계열 (종가 또는 수정 종가)
    /// * `annual_risk_free_rate` - 연간 무위험 이자율 (%)
    ///
    /// # 에러
    ///
    /// - 수익률 2개 미만 (가격 3개 미만): `InsufficientData`
    /// - 변동성 0 (모든 가격이 같은 경우 등): `ZeroVolatility`
    /// - 꼬리 구간 비어 있음: `EmptyTail`
    pub fn analyze(&self, prices: &PriceSeries, annual_risk_free_rate: f64) -> RiskResult<RiskReport> {
        let span = info_span!(
            "risk_analysis",
            prices = prices.len(),
            confidence = %self.params.confidence,
            periods_per_year = self.params.periods_per_year,
        );
        let _enter = span.enter();

        let returns = build_returns(prices)?;
        returns.ensure_min_len(2)?;
        debug!(returns = returns.len(), "Built return series");

        // 모든 비율 통계보다 먼저 변동성 0을 거부
        let moments = Moments::from_values(returns.values())?;
        debug!(
            mean = moments.mean,
            std_dev = moments.std_dev,
            skewness = moments.skewness,
            kurtosis = moments.kurtosis,
            "Computed moments"
        );

        let tail = self.params.confidence.tail_level();
        let var = historic_var(returns.values(), tail)?;
        let cvar = historic_cvar(returns.values(), tail)?;
        let cf_var = cornish_fisher_var_from_moments(&moments, tail)?;
        debug!(
            tail = %tail,
            historic_var = var,
            historic_cvar = cvar,
            cornish_fisher_var = cf_var,
            "Computed tail risk"
        );

        let drawdown = analyze_drawdown(prices)?;
        debug!(
            max_drawdown = drawdown.max_drawdown,
            at = %drawdown.max_drawdown_at,
            "Computed drawdown"
        );

        let total = total_return(prices)?;
        let annualized = Annualized::from_returns(returns.values(), self.params.periods_per_year)?;
        let ratios = PerformanceRatios::from_annualized(&annualized, annual_risk_free_rate)?;
        debug!(
            annualized_return = annualized.return_pct,
            annualized_volatility = annualized.volatility_pct,
            sharpe = ratios.sharpe_ratio,
            "Computed annualized ratios"
        );

        Ok(RiskReport {
            start: prices.first().timestamp,
            end: prices.last().timestamp,
            observations: returns.len(),
            confidence_level: self.params.confidence.value(),
            periods_per_year: self.params.periods_per_year,
            total_return: total,
            annualized_return: annualized.return_pct,
            annualized_volatility: annualized.volatility_pct,
            return_to_vol_ratio: ratios.return_to_vol_ratio,
            risk_free_rate: ratios.risk_free_rate,
            excess_return: ratios.excess_return,
            sharpe_ratio: ratios.sharpe_ratio,
            mean_return: moments.mean,
            volatility: moments.std_dev,
            skewness: moments.skewness,
            kurtosis: moments.kurtosis,
            historic_var: var,
            historic_cvar: cvar,
            cornish_fisher_var: cf_var,
            max_drawdown: drawdown.max_drawdown,
            max_drawdown_date: drawdown.max_drawdown_at,
            max_drawdown_peak_date: drawdown.peak_at,
        })
    }
}
