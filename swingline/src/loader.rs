//! CSV 数据加载。
//!
//! - `BarLoader`：带表头的 K 线文件，价格按文本精确解析为 `Decimal`。
//! - `TickLoader`：无表头逐笔文件，按时间排序后聚合为 1 分钟 K 线。

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::bar::PriceBar;
use crate::constant::SwingError;
use crate::tick::{TickInput, aggregate_ticks, parse_tick_lines};
use crate::utils::{parse_datetime, parse_decimal};

#[derive(Debug, Deserialize)]
struct CsvBarRow {
    datetime: String,
    #[serde(alias = "open_price")]
    open: String,
    #[serde(alias = "high_price")]
    high: String,
    #[serde(alias = "low_price")]
    low: String,
    #[serde(alias = "close_price")]
    close: String,
    #[serde(default)]
    volume: Option<String>,
}

impl CsvBarRow {
    fn into_bar(self) -> Result<PriceBar, SwingError> {
        let volume = match self.volume.as_deref().map(str::trim) {
            None | Some("") => Decimal::ZERO,
            Some(raw) => parse_decimal(raw)?,
        };
        Ok(PriceBar {
            datetime: parse_datetime(&self.datetime)?,
            open_price: parse_decimal(&self.open)?,
            high_price: parse_decimal(&self.high)?,
            low_price: parse_decimal(&self.low)?,
            close_price: parse_decimal(&self.close)?,
            volume,
        })
    }
}

pub struct BarLoader;

impl BarLoader {
    /// 读取 K 线文件，保持文件中的行顺序。
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<PriceBar>, SwingError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let bars = reader
            .deserialize::<CsvBarRow>()
            .map(|row| row.map_err(SwingError::from).and_then(CsvBarRow::into_bar))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(path = %path.display(), rows = bars.len(), "loaded bar csv");
        Ok(bars)
    }
}

pub struct TickLoader;

impl TickLoader {
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<TickInput>, SwingError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let ticks = parse_tick_lines(text.lines());
        debug!(path = %path.display(), ticks = ticks.len(), "loaded tick file");
        Ok(ticks)
    }

    pub fn load_minute_bars(path: impl AsRef<Path>) -> Result<Vec<PriceBar>, SwingError> {
        Ok(aggregate_ticks(Self::load(path)?))
    }
}
