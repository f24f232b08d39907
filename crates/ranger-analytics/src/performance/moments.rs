//! 적률 통계 모듈
//!
//! 수익률 분포의 평균, 모표준편차, 왜도, 첨도를 계산합니다.
//!
//! # 주의
//!
//! - 표준편차는 **모표준편차** (분모 n) 입니다. 표본표준편차(n-1)가 아닙니다.
//!   VaR / CVaR / Cornish-Fisher 공식이 모두 이 스케일을 전제로 합니다.
//! - 첨도는 **원시(Pearson) 첨도** 입니다. 정규분포에서 3이며, 초과 첨도(-3)가 아닙니다.
//!   -3 보정은 Cornish-Fisher 공식 내부에서만 적용됩니다.

use ranger_core::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// 적률 계산에 필요한 최소 관측치 수
const MIN_OBSERVATIONS: usize = 2;

/// 변동성 0 판정 상대 허용오차.
///
/// 표준편차가 `max(1, max|x|) × 1e-12` 이하이면 반올림 잡음으로 보고 0으로 취급합니다.
const ZERO_VOLATILITY_TOLERANCE: f64 = 1e-12;

fn ensure_observations(values: &[f64]) -> RiskResult<()> {
    if values.len() < MIN_OBSERVATIONS {
        return Err(RiskError::InsufficientData(format!(
            "적률 계산에는 관측치 {}개 이상이 필요합니다 ({}개)",
            MIN_OBSERVATIONS,
            values.len()
        )));
    }
    Ok(())
}

/// 산술 평균.
pub fn mean(values: &[f64]) -> RiskResult<f64> {
    ensure_observations(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// 모표준편차: √(Σ(x - 평균)² / n)
pub fn std_dev(values: &[f64]) -> RiskResult<f64> {
    let m = mean(values)?;
    Ok(central_moment(values, m, 2).sqrt())
}

/// 왜도: E[(x - 평균)³] / σ³
///
/// # 에러
///
/// σ = 0 이면 `ZeroVolatility`.
pub fn skewness(values: &[f64]) -> RiskResult<f64> {
    Ok(Moments::from_values(values)?.skewness)
}

/// 원시(Pearson) 첨도: E[(x - 평균)⁴] / σ⁴
///
/// 정규분포에서 3입니다. 초과 첨도가 아닙니다.
///
/// # 에러
///
/// σ = 0 이면 `ZeroVolatility`.
pub fn kurtosis(values: &[f64]) -> RiskResult<f64> {
    Ok(Moments::from_values(values)?.kurtosis)
}

/// k차 중심적률: Σ(x - 평균)^k / n
fn central_moment(values: &[f64], mean: f64, k: i32) -> f64 {
    values.iter().map(|x| (x - mean).powi(k)).sum::<f64>() / values.len() as f64
}

/// 수익률 분포의 적률 묶음.
///
/// 한 번 계산하여 VaR 계산 등에 재사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// 산술 평균
    pub mean: f64,
    /// 모표준편차 (분모 n)
    pub std_dev: f64,
    /// 왜도 (3차 표준화 적률)
    pub skewness: f64,
    /// 원시 첨도 (4차 표준화 적률, 정규분포 = 3)
    pub kurtosis: f64,
}

impl Moments {
    /// 관측치에서 적률을 계산합니다.
    ///
    /// # 에러
    ///
    /// - 관측치 2개 미만: `InsufficientData`
    /// - 표준편차 0: `ZeroVolatility`
    pub fn from_values(values: &[f64]) -> RiskResult<Self> {
        let mean = mean(values)?;
        let variance = central_moment(values, mean, 2);
        let std_dev = variance.sqrt();

        // 등비 수열의 수익률처럼 수학적으로 상수인 값도 잡음 수준의 σ를 남김
        let scale = values.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
        if std_dev <= ZERO_VOLATILITY_TOLERANCE * scale {
            return Err(RiskError::ZeroVolatility(
                "표준편차가 0이라 왜도/첨도를 정의할 수 없습니다".to_string(),
            ));
        }

        let skewness = central_moment(values, mean, 3) / std_dev.powi(3);
        let kurtosis = central_moment(values, mean, 4) / std_dev.powi(4);

        Ok(Self {
            mean,
            std_dev,
            skewness,
            kurtosis,
        })
    }

    /// 초과 첨도 (원시 첨도 - 3).
    pub fn excess_kurtosis(&self) -> f64 {
        self.kurtosis - 3.0
    }
}
