//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 가격 CSV 리스크 분석 (`analyze`)
//! - 금리 지수 평균 무위험 이자율 (`risk-free`)

pub mod commands;
