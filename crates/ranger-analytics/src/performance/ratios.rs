//! 위험 조정 수익률 비율 모듈
//!
//! 연율화 수익률, 연율화 변동성, 외부에서 주어진 연간 무위험 이자율로
//! 다음 비율을 계산합니다:
//! - 수익/변동성 비율: 연율화 수익률 / 연율화 변동성
//! - 초과 수익률: 연율화 수익률 - 무위험 이자율
//! - 샤프 비율: 초과 수익률 / 연율화 변동성
//!
//! 모든 입력은 같은 백분율 스케일이어야 합니다.

use ranger_core::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

use super::annualize::Annualized;

/// 위험 조정 수익률 비율 묶음
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRatios {
    /// 수익/변동성 비율
    pub return_to_vol_ratio: f64,

    /// 연간 초과 수익률 (%)
    pub excess_return: f64,

    /// 샤프 비율 (Sharpe Ratio)
    ///
    /// 변동성 한 단위당 초과 수익입니다.
    ///
    /// - 1.0 이상: 양호
    /// - 2.0 이상: 우수
    pub sharpe_ratio: f64,

    /// 사용된 연간 무위험 이자율 (%)
    pub risk_free_rate: f64,
}

impl PerformanceRatios {
    /// 연율화 값과 무위험 이자율로 비율을 계산합니다.
    ///
    /// # 매개변수
    ///
    /// * `annualized_return` - 연율화 수익률 (%)
    /// * `annualized_volatility` - 연율화 변동성 (%)
    /// * `annual_risk_free_rate` - 연간 무위험 이자율 (%, 예: 4.25)
    ///
    /// # 에러
    ///
    /// - 변동성 0: `ZeroVolatility`
    /// - 유한하지 않은 입력: `InvalidParameter`
    pub fn calculate(
        annualized_return: f64,
        annualized_volatility: f64,
        annual_risk_free_rate: f64,
    ) -> RiskResult<Self> {
        if !annualized_return.is_finite()
            || !annualized_volatility.is_finite()
            || !annual_risk_free_rate.is_finite()
        {
            return Err(RiskError::InvalidParameter(
                "비율 계산 입력이 유한한 값이 아닙니다".to_string(),
            ));
        }

        if annualized_volatility == 0.0 {
            return Err(RiskError::ZeroVolatility(
                "연율화 변동성이 0이라 비율을 정의할 수 없습니다".to_string(),
            ));
        }

        let excess_return = annualized_return - annual_risk_free_rate;

        Ok(Self {
            return_to_vol_ratio: annualized_return / annualized_volatility,
            excess_return,
            sharpe_ratio: excess_return / annualized_volatility,
            risk_free_rate: annual_risk_free_rate,
        })
    }

    /// [`Annualized`] 결과에서 비율을 계산합니다.
    pub fn from_annualized(annualized: &Annualized, annual_risk_free_rate: f64) -> RiskResult<Self> {
        Self::calculate(
            annualized.return_pct,
            annualized.volatility_pct,
            annual_risk_free_rate,
        )
    }
}
