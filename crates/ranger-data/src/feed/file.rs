//! CSV 파일 기반 Feed.
//!
//! 헤더 행이 필수이며 컬럼은 이름으로 찾습니다 (대소문자 무시).
//!
//! ```text
//! Date,Open,High,Low,Close,Adj Close,Volume
//! 2024-01-02,187.15,188.44,183.89,185.64,184.94,82488700
//! ```
//!
//! - 읽기는 `csv` 크레이트 (RFC 4180 따옴표, 이스케이프, 여러 줄 필드)
//! - 날짜: `YYYY-MM-DD` 또는 RFC 3339
//! - 빈 줄은 무시
//! - 값이 비어 있거나 `null`인 행은 경고 후 건너뜀
//! - 행은 날짜 오름차순이어야 함 (검증은 [`PriceSeries`]가 수행)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use ranger_core::{Price, PriceField, PricePoint, PriceSeries, RateQuote};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::{PriceFeed, RateFeed};
use crate::error::{DataError, Result};

const DATE_COLUMNS: &[&str] = &["date", "datetime", "timestamp"];
const CLOSE_COLUMNS: &[&str] = &["close"];
const ADJ_CLOSE_COLUMNS: &[&str] = &["adj_close", "adj close", "adjclose", "adjusted_close"];
const RATE_COLUMNS: &[&str] = &["close", "rate"];

// ==================== Price Feed ====================

/// CSV 가격 Feed.
#[derive(Debug, Clone)]
pub struct CsvPriceFeed {
    path: PathBuf,
    name: String,
}

impl CsvPriceFeed {
    /// 새 Feed 생성. 이름은 파일명(확장자 제외)입니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = feed_name(&path);
        Self { path, name }
    }

    /// 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PriceFeed for CsvPriceFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_prices(&self, field: PriceField) -> Result<PriceSeries> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DataError::IoError(format!("{}: {}", self.path.display(), e))
        })?;

        let series = parse_price_csv(&content, field)?;
        info!(
            feed = %self.name,
            field = %field,
            rows = series.len(),
            "Loaded price series"
        );
        Ok(series)
    }
}

// ==================== Rate Feed ====================

/// CSV 금리 지수 Feed.
///
/// `close` (또는 `rate`) 컬럼을 연율화 백분율 호가로 읽습니다.
#[derive(Debug, Clone)]
pub struct CsvRateFeed {
    path: PathBuf,
    name: String,
}

impl CsvRateFeed {
    /// 새 Feed 생성.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = feed_name(&path);
        Self { path, name }
    }

    /// 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RateFeed for CsvRateFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rates(&self) -> Result<Vec<RateQuote>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DataError::IoError(format!("{}: {}", self.path.display(), e))
        })?;

        let quotes = parse_rate_csv(&content)?;
        info!(feed = %self.name, rows = quotes.len(), "Loaded rate index");
        Ok(quotes)
    }
}

fn feed_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string())
}

// ==================== 파싱 ====================

/// CSV 내용에서 가격 시계열을 파싱합니다.
///
/// # 에러
///
/// - 헤더 없음 / 필수 컬럼 누락: `MissingColumn`
/// - CSV 구문, 날짜 또는 가격 형식 오류: `ParseError`
/// - 유효 행 없음, 0 이하 가격, 정렬 오류: `InvalidData`
pub fn parse_price_csv(content: &str, field: PriceField) -> Result<PriceSeries> {
    let mut source = CsvSource::new(content)?;
    let date_col = source.column(DATE_COLUMNS)?;
    let value_col = match field {
        PriceField::Close => source.column(CLOSE_COLUMNS)?,
        PriceField::AdjClose => source.column(ADJ_CLOSE_COLUMNS)?,
    };

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for record in source.reader.records() {
        let record = record?;
        let line = record_line(&record);
        let Some(raw) = present_value(&record, value_col) else {
            skipped += 1;
            continue;
        };

        let timestamp = parse_timestamp(record.get(date_col).unwrap_or(""), line)?;
        let price = parse_price(raw, line)?;
        points.push(PricePoint::new(timestamp, price));
    }

    if skipped > 0 {
        warn!(skipped, field = %field, "Skipped rows with missing values");
    }
    debug!(rows = points.len(), "Parsed price rows");

    Ok(PriceSeries::new(points)?)
}

/// CSV 내용에서 금리 지수 호가를 파싱합니다.
pub fn parse_rate_csv(content: &str) -> Result<Vec<RateQuote>> {
    let mut source = CsvSource::new(content)?;
    let date_col = source.column(DATE_COLUMNS)?;
    let rate_col = source.column(RATE_COLUMNS)?;

    let mut quotes = Vec::new();
    let mut skipped = 0usize;

    for record in source.reader.records() {
        let record = record?;
        let line = record_line(&record);
        let Some(raw) = present_value(&record, rate_col) else {
            skipped += 1;
            continue;
        };

        let timestamp = parse_timestamp(record.get(date_col).unwrap_or(""), line)?;
        let rate = raw
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| DataError::ParseError {
                line,
                message: format!("invalid rate '{}'", raw),
            })?;
        quotes.push(RateQuote::new(timestamp, rate));
    }

    if skipped > 0 {
        warn!(skipped, "Skipped rate rows with missing values");
    }

    if quotes.is_empty() {
        return Err(DataError::InvalidData(
            "rate index contains no quotes".to_string(),
        ));
    }

    Ok(quotes)
}

fn parse_timestamp(raw: &str, line: usize) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DataError::ParseError {
            line,
            message: format!("invalid date '{}'", raw),
        })
}

fn parse_price(raw: &str, line: usize) -> Result<Price> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| DataError::ParseError {
            line,
            message: format!("invalid price '{}'", raw),
        })
}

/// 헤더를 읽은 CSV 리더.
struct CsvSource<'a> {
    reader: csv::Reader<&'a [u8]>,
    headers: StringRecord,
}

impl<'a> CsvSource<'a> {
    fn new(content: &'a str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

        let headers = reader.headers()?.clone();
        if headers.iter().all(str::is_empty) {
            return Err(DataError::MissingColumn("header row".to_string()));
        }

        Ok(Self { reader, headers })
    }

    /// 후보 이름 중 처음 일치하는 컬럼 인덱스 (대소문자 무시).
    fn column(&self, names: &[&str]) -> Result<usize> {
        names
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
            .ok_or_else(|| DataError::MissingColumn(names[0].to_string()))
    }
}

/// 레코드가 시작하는 원본 행 번호 (1부터).
fn record_line(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

/// 비어 있거나 `null` / `nan`이면 None.
fn present_value(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|raw| {
        !raw.is_empty() && !raw.eq_ignore_ascii_case("null") && !raw.eq_ignore_ascii_case("nan")
    })
}
