//! 가격 시계열을 수익률로 변환합니다.

use ranger_core::{PriceSeries, ReturnSeries, RiskError, RiskResult};

/// 가격 시계열을 기간 수익률 시계열로 변환.
///
/// `return[i] = (price[i] / price[i-1] - 1) × 100`
///
/// 첫 번째 가격에는 대응하는 수익률이 없으므로 버립니다 (패딩하지 않음).
/// 각 수익률의 타임스탬프는 해당 기간의 종료 시점입니다.
///
/// # 반환
///
/// 백분율 단위 수익률 시계열 (길이: prices.len() - 1)
///
/// # 에러
///
/// 가격이 2개 미만이면 `InsufficientData`.
pub fn build_returns(prices: &PriceSeries) -> RiskResult<ReturnSeries> {
    if prices.len() < 2 {
        return Err(RiskError::InsufficientData(format!(
            "수익률 계산에는 가격 2개 이상이 필요합니다 ({}개)",
            prices.len()
        )));
    }

    let values: Vec<f64> = prices
        .prices_f64()?
        .windows(2)
        .map(|w| (w[1] / w[0] - 1.0) * 100.0)
        .collect();

    let timestamps = prices.timestamps().skip(1).collect();

    ReturnSeries::new(timestamps, values)
}

/// 전체 기간 총 수익률 (%).
///
/// `(마지막 가격 / 첫 가격 - 1) × 100`
pub fn total_return(prices: &PriceSeries) -> RiskResult<f64> {
    if prices.len() < 2 {
        return Err(RiskError::InsufficientData(format!(
            "총 수익률 계산에는 가격 2개 이상이 필요합니다 ({}개)",
            prices.len()
        )));
    }

    let values = prices.prices_f64()?;
    Ok((values[values.len() - 1] / values[0] - 1.0) * 100.0)
}
