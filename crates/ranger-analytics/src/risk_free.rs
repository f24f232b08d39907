//! 무위험 이자율 계산.
//!
//! 단기 금리 지수(예: 13주 T-bill)의 과거 호가를 평균하여
//! 하나의 연간 무위험 이자율(%)을 만듭니다.
//! 호가가 이미 연율화된 백분율이므로 추가 환산은 하지 않습니다.

use ranger_core::{RateQuote, RiskError, RiskResult};
use tracing::debug;

/// 금리 지수 호가의 평균 연간 이자율 (%).
///
/// # 에러
///
/// - 호가 없음: `InsufficientData`
/// - 유한하지 않은 호가: `InvalidParameter`
pub fn average_annual_rate(quotes: &[RateQuote]) -> RiskResult<f64> {
    if quotes.is_empty() {
        return Err(RiskError::InsufficientData(
            "무위험 이자율 계산에 금리 호가가 없습니다".to_string(),
        ));
    }

    if let Some(bad) = quotes.iter().find(|q| !q.annual_rate_pct.is_finite()) {
        return Err(RiskError::InvalidParameter(format!(
            "유한하지 않은 금리 호가: {}",
            bad.timestamp
        )));
    }

    let average =
        quotes.iter().map(|q| q.annual_rate_pct).sum::<f64>() / quotes.len() as f64;

    debug!(
        quotes = quotes.len(),
        average_rate = average,
        "Averaged risk-free rate index"
    );

    Ok(average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn quotes(rates: &[f64]) -> Vec<RateQuote> {
        let base = Utc.with_ymd_and_hms(2015, 1, 2, 0, 0, 0).unwrap();
        rates
            .iter()
            .enumerate()
            .map(|(i, r)| RateQuote::new(base + Duration::days(i as i64), *r))
            .collect()
    }

    #[test]
    fn test_average_rate() {
        let rate = average_annual_rate(&quotes(&[4.0, 5.0, 4.5, 4.5])).unwrap();
        assert!((rate - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_quotes() {
        assert!(matches!(
            average_annual_rate(&[]),
            Err(RiskError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_non_finite_quote() {
        assert!(matches!(
            average_annual_rate(&quotes(&[4.0, f64::INFINITY])),
            Err(RiskError::InvalidParameter(_))
        ));
    }
}
