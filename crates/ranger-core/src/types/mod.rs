//! 분석 파이프라인 전반에서 사용되는 공통 타입.

mod level;
mod price;
mod rate;
mod returns;

pub use level::*;
pub use price::*;
pub use rate::*;
pub use returns::*;
