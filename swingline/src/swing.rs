use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bar::PriceBar;
use crate::constant::{Const, SwingError, SwingSide, validate_strength};
use crate::window::{is_flat_window, is_swing_high, is_swing_low};

/// 单根 bar 对应的摆动点结果：截至该 bar 最近一次确认的摆动高/低点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub datetime: DateTime<Utc>,
    pub swing_high: Option<f64>,
    pub swing_low: Option<f64>,
}

impl SwingPoint {
    pub fn value(&self) -> Option<f64> {
        self.swing_high
    }

    pub fn side(&self, side: SwingSide) -> Option<f64> {
        match side {
            SwingSide::High => self.swing_high,
            SwingSide::Low => self.swing_low,
        }
    }
}

pub fn compute_swing_points_default(bars: &[PriceBar]) -> Result<Vec<SwingPoint>, SwingError> {
    compute_swing_points(bars, Const::DEFAULT_STRENGTH)
}

/// 计算每根 bar 的摆动高/低点。
///
/// 枢轴 `p` 在第 `p + strength` 根 bar 才能确认，确认后从 `p` 起回填。
/// `strength < 1` 时在读取任何 bar 之前返回 `InvalidParameter`。
pub fn compute_swing_points(
    bars: &[PriceBar],
    strength: i64,
) -> Result<Vec<SwingPoint>, SwingError> {
    let strength = validate_strength(strength)?;
    let mut scanner = SwingScanner::new(bars, strength);
    scanner.run();
    Ok(scanner.finish())
}

struct SwingScanner<'a> {
    bars: &'a [PriceBar],
    strength: usize,
    current_high: Option<Decimal>,
    current_low: Option<Decimal>,
    highs: Vec<Option<Decimal>>,
    lows: Vec<Option<Decimal>>,
    confirmed: usize,
}

impl<'a> SwingScanner<'a> {
    fn new(bars: &'a [PriceBar], strength: usize) -> Self {
        Self {
            bars,
            strength,
            current_high: None,
            current_low: None,
            highs: vec![None; bars.len()],
            lows: vec![None; bars.len()],
            confirmed: 0,
        }
    }

    fn run(&mut self) {
        let warmup = self.strength.saturating_mul(2);
        for i in 0..self.bars.len() {
            self.highs[i] = self.current_high;
            self.lows[i] = self.current_low;

            if i < warmup {
                continue;
            }

            let pivot = i - self.strength;
            let high = is_swing_high(self.bars, pivot, self.strength);
            let low = is_swing_low(self.bars, pivot, self.strength);

            match (high, low) {
                (true, true) => {
                    if is_flat_window(self.bars, pivot, self.strength) {
                        continue;
                    }
                    self.confirm(SwingSide::High, pivot, i);
                    self.confirm(SwingSide::Low, pivot, i);
                }
                (true, false) => self.confirm(SwingSide::High, pivot, i),
                (false, true) => self.confirm(SwingSide::Low, pivot, i),
                (false, false) => {}
            }
        }
    }

    /// 更新当前值并回填 `[pivot, current]` 区间。
    fn confirm(&mut self, side: SwingSide, pivot: usize, current: usize) {
        let bar = &self.bars[pivot];
        let (value, state, cells) = match side {
            SwingSide::High => (bar.high_price, &mut self.current_high, &mut self.highs),
            SwingSide::Low => (bar.low_price, &mut self.current_low, &mut self.lows),
        };
        *state = Some(value);
        cells[pivot..=current].fill(Some(value));
        self.confirmed += 1;
        debug!(
            pivot,
            confirmed_at = current,
            side = side.as_str(),
            %value,
            "swing pivot confirmed"
        );
    }

    fn finish(self) -> Vec<SwingPoint> {
        debug!(
            bars = self.bars.len(),
            strength = self.strength,
            confirmed = self.confirmed,
            "swing scan finished"
        );
        self.bars
            .iter()
            .zip(self.highs)
            .zip(self.lows)
            .map(|((bar, high), low)| SwingPoint {
                datetime: bar.datetime,
                swing_high: high.and_then(|x| x.to_f64()),
                swing_low: low.and_then(|x| x.to_f64()),
            })
            .collect()
    }
}

/// 值首次出现或发生变化的位置及新值。
pub fn swing_transitions(points: &[SwingPoint], side: SwingSide) -> Vec<(usize, f64)> {
    let mut transitions = Vec::new();
    let mut last: Option<f64> = None;
    for (idx, point) in points.iter().enumerate() {
        let Some(value) = point.side(side) else {
            continue;
        };
        if last != Some(value) {
            transitions.push((idx, value));
            last = Some(value);
        }
    }
    transitions
}
