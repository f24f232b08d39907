//! 가격 및 금리 지수 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - 분석 엔진이 소비하는 `PriceFeed` / `RateFeed` 경계 트레이트
//! - CSV 파일 기반 구현 (`CsvPriceFeed`, `CsvRateFeed`)

pub mod error;
pub mod feed;

pub use error::{DataError, Result};
pub use feed::{CsvPriceFeed, CsvRateFeed, PriceFeed, RateFeed};
