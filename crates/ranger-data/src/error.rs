//! 데이터 모듈 오류 타입.

use ranger_core::RiskError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 읽기 오류
    #[error("I/O error: {0}")]
    IoError(String),

    /// 필수 컬럼 누락
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// 파싱 오류 (행 번호 포함)
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::IoError(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => DataError::ParseError {
                line: pos.line() as usize,
                message: err.to_string(),
            },
            None => DataError::InvalidData(err.to_string()),
        }
    }
}

impl From<RiskError> for DataError {
    fn from(err: RiskError) -> Self {
        DataError::InvalidData(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
