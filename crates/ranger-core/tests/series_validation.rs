//! PriceSeries 검증 속성 테스트
//!
//! 임의의 양수 가격과 증가하는 타임스탬프는 항상 허용되고,
//! 하나라도 0 이하 가격이 섞이면 항상 거부되는지 확인합니다.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use ranger_core::{PricePoint, PriceSeries, RiskError};
use rust_decimal::Decimal;

fn build_points(prices: &[i64]) -> Vec<PricePoint> {
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PricePoint::new(base + Duration::days(i as i64), Decimal::new(p, 2)))
        .collect()
}

proptest! {
    #[test]
    fn positive_increasing_series_is_accepted(prices in prop::collection::vec(1i64..1_000_000, 1..64)) {
        let series = PriceSeries::new(build_points(&prices)).unwrap();
        prop_assert_eq!(series.len(), prices.len());
        prop_assert_eq!(series.prices_f64().unwrap().len(), prices.len());
    }

    #[test]
    fn any_non_positive_price_is_rejected(
        prices in prop::collection::vec(1i64..1_000_000, 1..64),
        bad in -1_000i64..=0,
        idx in any::<prop::sample::Index>(),
    ) {
        let mut prices = prices;
        let pos = idx.index(prices.len());
        prices[pos] = bad;

        let err = PriceSeries::new(build_points(&prices)).unwrap_err();
        prop_assert!(matches!(err, RiskError::InvalidParameter(_)));
    }
}

#[test]
fn test_reversed_series_rejected() {
    let mut points = build_points(&[10000, 10100, 10200]);
    points.reverse();

    let err = PriceSeries::new(points).unwrap_err();
    assert!(err.is_parameter_error());
}
