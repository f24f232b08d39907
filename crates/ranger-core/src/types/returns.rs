//! 기간 수익률 시계열 타입.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// 기간 수익률 시계열 (백분율 단위, 예: 1.5 = 1.5%).
///
/// 첫 번째 가격에 대응하는 수익률은 존재하지 않으므로 길이는 가격 수 - 1 입니다.
/// 타임스탬프와 값은 같은 길이로 유지됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// 타임스탬프와 수익률 값으로 시계열을 생성합니다.
    ///
    /// # 에러
    ///
    /// - 두 목록의 길이가 다름: `InvalidParameter`
    /// - 유한하지 않은 값 (NaN, 무한대): `InvalidParameter`
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> RiskResult<Self> {
        if timestamps.len() != values.len() {
            return Err(RiskError::InvalidParameter(format!(
                "타임스탬프 수({})와 수익률 수({})가 다릅니다",
                timestamps.len(),
                values.len()
            )));
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(RiskError::InvalidParameter(format!(
                "{}번째 수익률이 유한하지 않습니다",
                pos
            )));
        }

        Ok(Self { timestamps, values })
    }

    /// 수익률 값 (백분율).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 각 수익률의 타임스탬프.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// 수익률 개수.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (타임스탬프, 수익률) 쌍 반복자.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// 최소 관측치 수를 만족하는지 검사합니다.
    pub fn ensure_min_len(&self, min: usize) -> RiskResult<()> {
        if self.values.len() < min {
            return Err(RiskError::InsufficientData(format!(
                "수익률 {}개 필요, {}개 존재",
                min,
                self.values.len()
            )));
        }
        Ok(())
    }
}
