//! 성과 및 위험 통계 모듈
//!
//! 수익률 시계열에서 파생되는 지표를 계산합니다.
//!
//! # 모듈 구성
//!
//! - [`returns`]: 가격 → 기간 수익률, 총 수익률
//! - [`moments`]: 평균, 모표준편차, 왜도, 원시 첨도
//! - [`tail_risk`]: Historic VaR, CVaR, Cornish-Fisher VaR
//! - [`annualize`]: 연율화 수익률 / 변동성
//! - [`ratios`]: 수익/변동성 비율, 초과 수익, 샤프 비율

pub mod annualize;
pub mod moments;
pub mod ratios;
pub mod returns;
pub mod tail_risk;
