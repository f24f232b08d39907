//! # Ranger Core
//!
//! 리스크 분석 파이프라인의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 시계열 및 수익률 시계열
//! - 신뢰수준 / 꼬리 백분위 타입
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
