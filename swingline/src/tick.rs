use chrono::{DateTime, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use crate::bar::PriceBar;
use crate::utils::parse_decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct TickInput {
    pub datetime: DateTime<Utc>,
    pub price: Decimal,
    pub low_price: Decimal,
    pub high_price: Decimal,
    pub volume: Decimal,
}

/// 解析一行逐笔数据：`YYYYMMDD,HHMMSSmmm,price,low,high,volume`。
///
/// 空行、字段不足或无法解析的行返回 `None`。
pub fn parse_tick_line(line: &str) -> Option<TickInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let parts = line.split(',').map(str::trim).collect::<Vec<_>>();
    if parts.len() < 6 {
        return None;
    }

    let date = parts[0].parse::<u32>().ok()?;
    let time = parts[1].parse::<u32>().ok()?;
    let day = NaiveDate::from_ymd_opt((date / 10000) as i32, (date / 100) % 100, date % 100)?;
    let naive = day.and_hms_milli_opt(
        time / 10_000_000,
        (time / 100_000) % 100,
        (time / 1000) % 100,
        time % 1000,
    )?;

    Some(TickInput {
        datetime: DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc),
        price: parse_decimal(parts[2]).ok()?,
        low_price: parse_decimal(parts[3]).ok()?,
        high_price: parse_decimal(parts[4]).ok()?,
        volume: parse_decimal(parts[5]).ok()?,
    })
}

pub(crate) fn parse_tick_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<TickInput> {
    let mut ticks = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        match parse_tick_line(line) {
            Some(tick) => ticks.push(tick),
            None if !line.trim().is_empty() => skipped += 1,
            None => {}
        }
    }
    if skipped > 0 {
        warn!(skipped, "skipped unparseable tick lines");
    }
    ticks.sort_by_key(|x| x.datetime);
    ticks
}

/// 逐笔聚合为 1 分钟 K 线，输入需按时间排序。
pub struct TickBarAggregator {
    current_bar: Option<PriceBar>,
}

impl Default for TickBarAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl TickBarAggregator {
    pub fn new() -> Self {
        Self { current_bar: None }
    }

    pub fn update(&mut self, tick: TickInput) -> Option<PriceBar> {
        let minute_dt = tick
            .datetime
            .with_second(0)
            .and_then(|x| x.with_nanosecond(0))
            .unwrap_or(tick.datetime);

        if let Some(bar) = self.current_bar.as_mut() {
            if bar.datetime == minute_dt {
                bar.high_price = bar.high_price.max(tick.high_price);
                bar.low_price = bar.low_price.min(tick.low_price);
                bar.close_price = tick.price;
                bar.volume += tick.volume;
                return None;
            }
        }

        let finished = self.current_bar.take();
        self.current_bar = Some(PriceBar {
            datetime: minute_dt,
            open_price: tick.price,
            high_price: tick.high_price,
            low_price: tick.low_price,
            close_price: tick.price,
            volume: tick.volume,
        });
        finished
    }

    pub fn flush(&mut self) -> Option<PriceBar> {
        self.current_bar.take()
    }
}

pub fn aggregate_ticks(ticks: impl IntoIterator<Item = TickInput>) -> Vec<PriceBar> {
    let mut aggregator = TickBarAggregator::new();
    let mut bars = ticks
        .into_iter()
        .filter_map(|tick| aggregator.update(tick))
        .collect::<Vec<_>>();
    bars.extend(aggregator.flush());
    bars
}
