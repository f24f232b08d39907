//! 가격 시계열 타입.
//!
//! 외부 데이터 소스(PriceFeed)가 생성하고, 분석 코어는 읽기 전용으로만 사용합니다.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 시장 데이터 레코드에서 가격으로 사용할 필드.
///
/// 분석 코어는 어떤 필드가 선택되었는지 신경 쓰지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// 종가 (가격 수익률, 배당 미포함)
    #[default]
    Close,
    /// 수정 종가 (총수익률, 배당 포함)
    AdjClose,
}

impl PriceField {
    /// 표시용 이름을 반환합니다.
    pub fn display_name(&self) -> &'static str {
        match self {
            PriceField::Close => "가격 수익률 (종가)",
            PriceField::AdjClose => "총수익률 (수정 종가)",
        }
    }
}

impl std::str::FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "close" | "price" => Ok(Self::Close),
            "adj_close" | "adjclose" | "adjusted" | "total" => Ok(Self::AdjClose),
            _ => Err(format!("Unknown price field: {}", s)),
        }
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceField::Close => write!(f, "close"),
            PriceField::AdjClose => write!(f, "adj_close"),
        }
    }
}

/// 단일 가격 관측치.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 관측 시각 (UTC)
    pub timestamp: DateTime<Utc>,
    /// 가격 (양수)
    pub price: Price,
}

impl PricePoint {
    /// 새 가격 관측치를 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// 가격 시계열.
///
/// # 불변식
///
/// - 최소 1개 이상의 관측치
/// - 타임스탬프는 엄격하게 증가
/// - 모든 가격은 0보다 큼
///
/// 생성 후에는 변경할 수 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 관측치 목록을 검증하여 가격 시계열을 생성합니다.
    ///
    /// # 에러
    ///
    /// - 빈 목록: `InsufficientData`
    /// - 0 이하 가격, 증가하지 않는 타임스탬프: `InvalidParameter`
    pub fn new(points: Vec<PricePoint>) -> RiskResult<Self> {
        if points.is_empty() {
            return Err(RiskError::InsufficientData(
                "가격 시계열이 비어 있습니다".to_string(),
            ));
        }

        for (i, point) in points.iter().enumerate() {
            if point.price <= Decimal::ZERO {
                return Err(RiskError::InvalidParameter(format!(
                    "{}번째 가격이 양수가 아닙니다: {} ({})",
                    i, point.price, point.timestamp
                )));
            }
        }

        if let Some(w) = points
            .windows(2)
            .find(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(RiskError::InvalidParameter(format!(
                "타임스탬프가 엄격하게 증가하지 않습니다: {} -> {}",
                w[0].timestamp, w[1].timestamp
            )));
        }

        Ok(Self { points })
    }

    /// (타임스탬프, 가격) 쌍에서 가격 시계열을 생성합니다.
    pub fn from_pairs<I>(pairs: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = (DateTime<Utc>, Price)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(timestamp, price)| PricePoint::new(timestamp, price))
                .collect(),
        )
    }

    /// 모든 관측치를 반환합니다.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 관측치 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 항상 false (빈 시계열은 생성할 수 없음).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 첫 번째 관측치.
    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    /// 마지막 관측치.
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// 가격을 f64로 변환하여 반환합니다.
    ///
    /// 통계 계산은 f64로 수행됩니다.
    pub fn prices_f64(&self) -> RiskResult<Vec<f64>> {
        self.points
            .iter()
            .map(|p| {
                p.price.to_f64().ok_or_else(|| {
                    RiskError::InvalidParameter(format!("f64로 변환할 수 없는 가격: {}", p.price))
                })
            })
            .collect()
    }

    /// 타임스탬프 반복자.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.points.iter().map(|p| p.timestamp)
    }
}
