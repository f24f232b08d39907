//! CSV Feed 통합 테스트
//!
//! 임시 디렉터리에 파일을 쓰고 트레이트 객체를 통해 읽습니다.

use std::path::PathBuf;

use ranger_core::PriceField;
use ranger_data::{CsvPriceFeed, CsvRateFeed, DataError, PriceFeed, RateFeed};
use rust_decimal_macros::dec;

async fn write_fixture(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "ranger-data-{}-{}.csv",
        std::process::id(),
        name
    ));
    tokio::fs::write(&path, content).await.unwrap();
    path
}

#[tokio::test]
async fn test_price_feed_reads_file() {
    let path = write_fixture(
        "prices",
        "Date,Close,Adj Close\n2023-06-01,100,99\n2023-06-02,110,108.9\n2023-06-05,121,119.79\n",
    )
    .await;

    let feed: Box<dyn PriceFeed> = Box::new(CsvPriceFeed::new(&path));
    assert!(feed.name().starts_with("ranger-data-"));

    let close = feed.fetch_prices(PriceField::Close).await.unwrap();
    assert_eq!(close.len(), 3);
    assert_eq!(close.last().price, dec!(121));

    let adj = feed.fetch_prices(PriceField::AdjClose).await.unwrap();
    assert_eq!(adj.first().price, dec!(99));

    tokio::fs::remove_file(&path).await.ok();
}

#[tokio::test]
async fn test_rate_feed_reads_file() {
    let path = write_fixture("rates", "date,close\n2015-01-02,4.0\n2015-01-05,5.0\n").await;

    let feed = CsvRateFeed::new(&path);
    let quotes = feed.fetch_rates().await.unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].annual_rate_pct, 4.0);

    tokio::fs::remove_file(&path).await.ok();
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let feed = CsvPriceFeed::new(std::env::temp_dir().join("ranger-data-does-not-exist.csv"));
    let err = feed.fetch_prices(PriceField::Close).await.unwrap_err();
    assert!(matches!(err, DataError::IoError(_)));
}
