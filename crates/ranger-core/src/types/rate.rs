//! 단기 금리 지수 호가 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 단기 금리 지수의 단일 호가 (예: 13주 T-bill 지수).
///
/// 호가 자체가 연율화된 백분율입니다 (예: 4.25 = 연 4.25%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    /// 호가 시각 (UTC)
    pub timestamp: DateTime<Utc>,
    /// 연율화 금리 (%)
    pub annual_rate_pct: f64,
}

impl RateQuote {
    /// 새 금리 호가를 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, annual_rate_pct: f64) -> Self {
        Self {
            timestamp,
            annual_rate_pct,
        }
    }
}
