//! 데이터 Feed 모듈.
//!
//! 분석 엔진은 가격을 직접 수집하지 않습니다. 수집은 이 모듈의
//! 트레이트를 구현하는 Feed가 담당하며, 엔진은 결과 시계열만 읽습니다.
//!
//! ## CSV Feed
//! - `CsvPriceFeed`: `date,close,adj_close` 형식의 일봉 파일
//! - `CsvRateFeed`: `date,close` 형식의 금리 지수 파일 (예: 13주 T-bill)

pub mod file;

use async_trait::async_trait;
use ranger_core::{PriceField, PriceSeries, RateQuote};

use crate::error::Result;

pub use self::file::{CsvPriceFeed, CsvRateFeed};

/// 가격 시계열 Feed.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Feed 이름.
    fn name(&self) -> &str;

    /// 지정한 가격 필드(종가 / 수정 종가)의 시계열 조회.
    async fn fetch_prices(&self, field: PriceField) -> Result<PriceSeries>;
}

/// 금리 지수 Feed.
#[async_trait]
pub trait RateFeed: Send + Sync {
    /// Feed 이름.
    fn name(&self) -> &str;

    /// 금리 지수 호가 조회 (연율화 백분율).
    async fn fetch_rates(&self) -> Result<Vec<RateQuote>>;
}
