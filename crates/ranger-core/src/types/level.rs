//! 신뢰수준과 꼬리 백분위.

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// VaR 신뢰수준 (0 < level < 100, 정수 %).
///
/// 예: 95 → 하위 5% 꼬리를 검사합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfidenceLevel(u8);

impl ConfidenceLevel {
    /// 신뢰수준을 생성합니다.
    ///
    /// # 에러
    ///
    /// 0 또는 100 이상이면 `InvalidParameter`.
    pub fn new(level: u8) -> RiskResult<Self> {
        if level == 0 || level >= 100 {
            return Err(RiskError::InvalidParameter(format!(
                "신뢰수준은 0과 100 사이여야 합니다 (입력: {})",
                level
            )));
        }
        Ok(Self(level))
    }

    /// 신뢰수준 값 (%).
    pub fn value(&self) -> u8 {
        self.0
    }

    /// 검사할 하위 꼬리 백분위 (100 - 신뢰수준).
    pub fn tail_level(&self) -> TailLevel {
        TailLevel(100 - self.0)
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = RiskError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// 하위 꼬리 백분위 (0 < level < 100, 정수 %).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TailLevel(u8);

impl TailLevel {
    /// 꼬리 백분위를 직접 생성합니다.
    pub fn new(level: u8) -> RiskResult<Self> {
        if level == 0 || level >= 100 {
            return Err(RiskError::InvalidParameter(format!(
                "꼬리 백분위는 0과 100 사이여야 합니다 (입력: {})",
                level
            )));
        }
        Ok(Self(level))
    }

    /// 백분위 값 (%).
    pub fn value(&self) -> u8 {
        self.0
    }

    /// 0~1 범위의 확률로 변환합니다 (예: 5 → 0.05).
    pub fn as_probability(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl std::fmt::Display for TailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
