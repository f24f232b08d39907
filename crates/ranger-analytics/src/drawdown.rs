//! 낙폭(Drawdown) 분석 모듈.
//!
//! 가격 시계열(수익률이 아님)에서 고점 대비 하락률을 추적합니다.
//!
//! # 계산 방법
//!
//! 1. 자산 지수: `wealth[i] = price[i] / price[0]`
//! 2. 누적 고점: `peak[i] = max(wealth[0..=i])`
//! 3. 낙폭: `drawdown[i] = (wealth[i] - peak[i]) / peak[i]` (항상 0 이하)
//! 4. 최대 낙폭: `min(drawdown)`, 동률이면 가장 이른 시점
//!
//! # 예시
//!
//! 가격 100 → 120(고점) → 90 → 150
//! 낙폭 = [0, 0, -0.25, 0], 최대 낙폭 = -0.25 (세 번째 시점)

use chrono::{DateTime, Utc};
use ranger_core::{PriceSeries, RiskResult};
use serde::{Deserialize, Serialize};

/// 낙폭 시계열의 단일 데이터 포인트
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    /// 타임스탬프 (UTC)
    pub timestamp: DateTime<Utc>,

    /// 첫 가격 대비 자산 지수 (시작 = 1.0)
    pub wealth: f64,

    /// 현재까지의 누적 고점 자산 지수
    pub peak: f64,

    /// 고점 대비 낙폭 (비율, 0 이하)
    /// 예: -0.25 = 고점 대비 25% 하락
    pub drawdown: f64,
}

/// 낙폭 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownAnalysis {
    /// 시점별 낙폭 (가격 시계열과 같은 길이)
    pub points: Vec<DrawdownPoint>,

    /// 최대 낙폭 (비율, 0 이하)
    pub max_drawdown: f64,

    /// 최대 낙폭 발생 시점 (최저점)
    pub max_drawdown_at: DateTime<Utc>,

    /// 최대 낙폭 직전 고점 시점
    pub peak_at: DateTime<Utc>,
}

impl DrawdownAnalysis {
    /// 낙폭 값만 순서대로 반환합니다.
    pub fn drawdowns(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.drawdown).collect()
    }

    /// 분석 종료 시점의 낙폭.
    pub fn current_drawdown(&self) -> f64 {
        self.points.last().map(|p| p.drawdown).unwrap_or(0.0)
    }
}

/// 가격 시계열의 낙폭을 분석합니다.
///
/// PriceSeries는 최소 1개의 관측치를 보장하므로 단일 가격도 분석 가능합니다
/// (낙폭 0, 발생 시점 = 첫 시점).
pub fn analyze_drawdown(prices: &PriceSeries) -> RiskResult<DrawdownAnalysis> {
    let values = prices.prices_f64()?;
    let base = values[0];

    let mut points = Vec::with_capacity(values.len());
    let mut peak = f64::MIN;
    let mut peak_at = prices.first().timestamp;

    let mut max_drawdown = 0.0;
    let mut max_drawdown_at = prices.first().timestamp;
    let mut max_peak_at = peak_at;

    for (point, price) in prices.points().iter().zip(values) {
        let wealth = price / base;

        // 새로운 고점 갱신
        if wealth > peak {
            peak = wealth;
            peak_at = point.timestamp;
        }

        let drawdown = (wealth - peak) / peak;

        // 엄격한 비교: 동률이면 가장 이른 시점 유지
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
            max_drawdown_at = point.timestamp;
            max_peak_at = peak_at;
        }

        points.push(DrawdownPoint {
            timestamp: point.timestamp,
            wealth,
            peak,
            drawdown,
        });
    }

    Ok(DrawdownAnalysis {
        points,
        max_drawdown,
        max_drawdown_at,
        peak_at: max_peak_at,
    })
}
