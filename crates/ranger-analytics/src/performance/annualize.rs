//! 연율화 모듈
//!
//! 기간 수익률(백분율)을 연간 기준으로 환산합니다.
//!
//! # 스케일 규약
//!
//! 수익률과 변동성 모두 **백분율 스케일**에서 계산합니다.
//! 두 값을 비율로 결합할 때 스케일이 어긋나지 않도록 이 모듈 안에서만 연율화합니다.

use ranger_core::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

use super::moments::std_dev;

fn ensure_periods(periods_per_year: u32) -> RiskResult<()> {
    if periods_per_year == 0 {
        return Err(RiskError::InvalidParameter(
            "연간 기간 수는 0보다 커야 합니다".to_string(),
        ));
    }
    Ok(())
}

/// 연율화 수익률 (%).
///
/// # 계산 공식
///
/// 기하(복리) 연율화: ((∏(1 + rᵢ/100))^(연간 기간 수 / n) − 1) × 100
///
/// 산술 평균이 아닌 복리 성장을 기준으로 합니다.
/// 곱셈은 로그 합으로 계산하여 긴 시계열에서도 안정적입니다.
///
/// # 에러
///
/// - 수익률 2개 미만: `InsufficientData`
/// - 연간 기간 수 0: `InvalidParameter`
/// - -100% 이하 수익률 (복리 성장 정의 불가): `InvalidParameter`
/// - 결과가 f64 범위를 벗어남: `InvalidParameter`
pub fn annualize_returns(returns: &[f64], periods_per_year: u32) -> RiskResult<f64> {
    ensure_periods(periods_per_year)?;
    if returns.len() < 2 {
        return Err(RiskError::InsufficientData(format!(
            "연율화에는 수익률 2개 이상이 필요합니다 ({}개)",
            returns.len()
        )));
    }

    let mut log_growth = 0.0;
    for r in returns {
        let gross = 1.0 + r / 100.0;
        if gross <= 0.0 {
            return Err(RiskError::InvalidParameter(format!(
                "-100% 이하 수익률은 복리 연율화할 수 없습니다: {}",
                r
            )));
        }
        log_growth += (r / 100.0).ln_1p();
    }

    let exponent = f64::from(periods_per_year) / returns.len() as f64;
    let annual = (log_growth * exponent).exp_m1() * 100.0;
    if !annual.is_finite() {
        return Err(RiskError::InvalidParameter(format!(
            "연율화 수익률이 표현 범위를 벗어났습니다 (수익률 {}개, 연간 {}기간)",
            returns.len(),
            periods_per_year
        )));
    }

    Ok(annual)
}

/// 연율화 변동성 (%).
///
/// `σ × √(연간 기간 수)`
///
/// σ는 모표준편차이며 입력 수익률과 같은 백분율 스케일입니다.
pub fn annualize_volatility(returns: &[f64], periods_per_year: u32) -> RiskResult<f64> {
    ensure_periods(periods_per_year)?;
    Ok(std_dev(returns)? * f64::from(periods_per_year).sqrt())
}

/// 연율화 결과 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annualized {
    /// 연율화 수익률 (%)
    pub return_pct: f64,
    /// 연율화 변동성 (%)
    pub volatility_pct: f64,
    /// 사용된 연간 기간 수
    pub periods_per_year: u32,
}

impl Annualized {
    /// 수익률 시계열에서 연율화 수익률과 변동성을 함께 계산합니다.
    pub fn from_returns(returns: &[f64], periods_per_year: u32) -> RiskResult<Self> {
        Ok(Self {
            return_pct: annualize_returns(returns, periods_per_year)?,
            volatility_pct: annualize_volatility(returns, periods_per_year)?,
            periods_per_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_not_arithmetic() {
        // +10%, -10% 두 기간, 연 2기간 → 1.1 × 0.9 = 0.99 → -1%
        let returns = [10.0, -10.0];
        let annual = annualize_returns(&returns, 2).unwrap();
        assert!((annual + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_compounding_to_full_year() {
        // 월 1%씩 12개월 → 1.01^12 - 1 ≈ 12.6825%
        let returns = [1.0; 12];
        let annual = annualize_returns(&returns, 12).unwrap();
        assert!((annual - 12.682_503_013_196_97).abs() < 1e-9);
    }

    #[test]
    fn test_partial_year_is_scaled_up() {
        // 6개월 총 6.152% (1.01^6) → 연율 ≈ 12.6825%
        let returns = [1.0; 6];
        let annual = annualize_returns(&returns, 12).unwrap();
        assert!((annual - 12.682_503_013_196_97).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_sqrt_time() {
        let returns = [1.0, -1.0, 1.0, -1.0];
        // 모표준편차 1 → √252
        let vol = annualize_volatility(&returns, 252).unwrap();
        assert!((vol - 252f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            annualize_returns(&[1.0], 0),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            annualize_volatility(&[1.0, 2.0], 0),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            annualize_returns(&[], 252),
            Err(RiskError::InsufficientData(_))
        ));
        assert!(matches!(
            annualize_returns(&[1.0], 252),
            Err(RiskError::InsufficientData(_))
        ));
        assert!(matches!(
            annualize_returns(&[5.0, -100.0], 252),
            Err(RiskError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_overflowing_growth_rejected() {
        // 두 기간 +900%씩, 연 100만 기간 → exp 오버플로
        let returns = [900.0, 900.0];
        assert!(matches!(
            annualize_returns(&returns, 1_000_000),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(Annualized::from_returns(&returns, 1_000_000).is_err());
    }

    #[test]
    fn test_annualized_bundle() {
        let returns = [0.5, -0.2, 0.3, 0.1];
        let annualized = Annualized::from_returns(&returns, 252).unwrap();

        assert_eq!(annualized.periods_per_year, 252);
        assert_eq!(
            annualized.return_pct,
            annualize_returns(&returns, 252).unwrap()
        );
        assert_eq!(
            annualized.volatility_pct,
            annualize_volatility(&returns, 252).unwrap()
        );
    }
}
