//! 꼬리 위험(Tail Risk) 계산 모듈
//!
//! 수익률 분포의 하위 꼬리에서 손실 규모를 추정합니다:
//! - **Historic VaR**: 경험적 백분위 기반 (비모수)
//! - **Historic CVaR**: VaR 이하 관측치의 평균 손실
//! - **Cornish-Fisher VaR**: 왜도와 첨도로 정규 분위수를 보정한 준모수 추정
//!
//! 모든 결과는 양수 손실 크기(백분율)로 보고됩니다.
//! 예: VaR 2.5 = 해당 신뢰수준에서 한 기간 최대 2.5% 손실 예상

use ranger_core::{RiskError, RiskResult, TailLevel};
use statrs::distribution::{ContinuousCDF, Normal};

use super::moments::Moments;

/// 선형 보간 백분위.
///
/// 정렬된 값에서 순위 `p/100 × (n-1)`의 양옆 순서통계량을 선형 보간합니다.
/// (NumPy `percentile`의 기본 방식과 동일)
///
/// # 인자
///
/// * `values` - 관측치 (정렬 불필요)
/// * `p` - 백분위 (0 ~ 100)
pub fn percentile(values: &[f64], p: f64) -> RiskResult<f64> {
    if values.is_empty() {
        return Err(RiskError::InsufficientData(
            "백분위 계산에 관측치가 없습니다".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(RiskError::InvalidParameter(format!(
            "백분위는 0 ~ 100 범위여야 합니다 (입력: {})",
            p
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Ok(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

fn ensure_observations(values: &[f64]) -> RiskResult<()> {
    if values.len() < 2 {
        return Err(RiskError::InsufficientData(format!(
            "VaR 계산에는 수익률 2개 이상이 필요합니다 ({}개)",
            values.len()
        )));
    }
    Ok(())
}

/// Historic VaR.
///
/// `VaR = -percentile(returns, tail_level)`
///
/// 하위 꼬리 백분위 수익률의 부호를 바꿔 양수 손실로 보고합니다.
pub fn historic_var(returns: &[f64], tail: TailLevel) -> RiskResult<f64> {
    ensure_observations(returns)?;
    Ok(-percentile(returns, f64::from(tail.value()))?)
}

/// Historic CVaR (Expected Shortfall).
///
/// `CVaR = -mean({ r : r ≤ -VaR })`
///
/// # 에러
///
/// 꼬리 구간에 관측치가 없으면 `EmptyTail`.
pub fn historic_cvar(returns: &[f64], tail: TailLevel) -> RiskResult<f64> {
    let var = historic_var(returns, tail)?;
    tail_loss(returns, -var, tail)
}

/// 임계값 이하 관측치의 평균 손실.
fn tail_loss(returns: &[f64], threshold: f64, tail: TailLevel) -> RiskResult<f64> {
    let (sum, count) = returns
        .iter()
        .filter(|&&r| r <= threshold)
        .fold((0.0, 0usize), |(sum, count), r| (sum + r, count + 1));

    if count == 0 {
        return Err(RiskError::EmptyTail(format!(
            "꼬리 {} 구간(수익률 ≤ {:.4})에 관측치가 없습니다",
            tail, threshold
        )));
    }

    Ok(-(sum / count as f64))
}

/// 표준정규분포 역누적분포 z = Φ⁻¹(p).
fn standard_normal_quantile(tail: TailLevel) -> RiskResult<f64> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| RiskError::InvalidParameter(format!("표준정규분포 생성 실패: {}", e)))?;
    Ok(normal.inverse_cdf(tail.as_probability()))
}

/// Cornish-Fisher VaR (수익률에서 직접 계산).
///
/// 적률을 계산한 뒤 [`cornish_fisher_var_from_moments`]를 호출합니다.
pub fn cornish_fisher_var(returns: &[f64], tail: TailLevel) -> RiskResult<f64> {
    let moments = Moments::from_values(returns)?;
    cornish_fisher_var_from_moments(&moments, tail)
}

/// Cornish-Fisher VaR.
///
/// # 계산 공식
///
/// ```text
/// z0   = Φ⁻¹(tail / 100)
/// zAdj = z0
///      + (z0² − 1)·s / 6
///      + (z0³ − 3·z0)·(k − 3) / 24
///      − (2·z0³ − 5·z0)·s² / 36
/// VaR  = −(평균 + zAdj · σ)
/// ```
///
/// `s`는 왜도, `k`는 원시 첨도, `σ`는 모표준편차입니다.
/// s = 0, k = 3 이면 모든 보정항이 사라져 정규분포 VaR과 같아집니다.
pub fn cornish_fisher_var_from_moments(moments: &Moments, tail: TailLevel) -> RiskResult<f64> {
    let z = standard_normal_quantile(tail)?;
    let s = moments.skewness;
    let k = moments.kurtosis;

    let z_adj = z
        + (z.powi(2) - 1.0) * s / 6.0
        + (z.powi(3) - 3.0 * z) * (k - 3.0) / 24.0
        - (2.0 * z.powi(3) - 5.0 * z) * s.powi(2) / 36.0;

    Ok(-(moments.mean + z_adj * moments.std_dev))
}

/// 정규분포 (모수적) VaR.
///
/// `VaR = −(평균 + z0 · σ)`
pub fn gaussian_var(moments: &Moments, tail: TailLevel) -> RiskResult<f64> {
    let z = standard_normal_quantile(tail)?;
    Ok(-(moments.mean + z * moments.std_dev))
}
