//! 리스크 분석 에러 타입.
//!
//! 모든 계산 컴포넌트는 실패 시 즉시 아래 에러 중 하나를 반환합니다.
//! NaN이나 무한대를 결과로 흘려보내지 않습니다.

use thiserror::Error;

/// 리스크 계산 에러.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// 관측치 부족 (예: 가격 2개 미만, 수익률 2개 미만)
    #[error("데이터 부족: {0}")]
    InsufficientData(String),

    /// CVaR 꼬리 구간에 해당하는 관측치가 없음
    #[error("꼬리 구간이 비어 있음: {0}")]
    EmptyTail(String),

    /// 표준편차가 0이라 비율 기반 통계가 정의되지 않음
    #[error("변동성 0: {0}")]
    ZeroVolatility(String),

    /// 잘못된 매개변수 (신뢰수준, 연간 기간 수, 시계열 형태 등)
    #[error("잘못된 매개변수: {0}")]
    InvalidParameter(String),
}

/// 리스크 계산을 위한 Result 타입.
pub type RiskResult<T> = Result<T, RiskError>;

impl RiskError {
    /// 관측치 부족 계열의 에러인지 확인합니다.
    ///
    /// 빈 꼬리 구간도 관측치 부족의 한 형태로 분류됩니다.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, RiskError::InsufficientData(_) | RiskError::EmptyTail(_))
    }

    /// 호출자가 입력을 바꿔 다시 시도할 수 있는 에러인지 확인합니다.
    ///
    /// 계산 자체는 결정적이므로 같은 입력으로의 재시도는 의미가 없습니다.
    /// 매개변수 에러만 사용자가 값을 고쳐 재요청할 수 있습니다.
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, RiskError::InvalidParameter(_))
    }
}
